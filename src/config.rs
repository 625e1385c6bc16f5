//! Runtime configuration for the explorer.
//!
//! Every field has a default, so a configuration file only needs to name the
//! settings it changes. Files are JSON:
//!
//! ```json
//! { "view": { "max_iterations": 500 }, "export": { "path": "out.png" } }
//! ```

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::data::pixel_rect::PixelRect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub view: ViewConfig,
    pub window: WindowConfig,
    pub export: ExportConfig,
    /// Pending input events the generator can fall behind by before new
    /// events are dropped.
    pub event_queue_capacity: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            view: ViewConfig::default(),
            window: WindowConfig::default(),
            export: ExportConfig::default(),
            event_queue_capacity: 256,
        }
    }
}

/// Initial view parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub center_x: f64,
    pub center_y: f64,
    pub zoom: f64,
    pub resolution_divisor: u32,
    pub max_iterations: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center_x: -0.5,
            center_y: 0.0,
            zoom: 1.0,
            resolution_divisor: 8,
            max_iterations: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Mandelbrot Explorer".to_string(),
            width: 900,
            height: 900,
        }
    }
}

impl WindowConfig {
    #[must_use]
    pub fn bounds(&self) -> PixelRect {
        PixelRect::from_size(self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Destination of exported images; overwritten on every export.
    pub path: PathBuf,
    /// Upper bound on waiting for the device to return pixels. Unset waits
    /// indefinitely.
    pub download_timeout_ms: Option<u64>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("mandel.png"),
            download_timeout_ms: None,
        }
    }
}

impl ExportConfig {
    #[must_use]
    pub fn download_timeout(&self) -> Option<Duration> {
        self.download_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config {}: {}", path.display(), source)
            }
            Self::Invalid(reason) => write!(f, "invalid config: {}", reason),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

impl ExplorerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.view.resolution_divisor == 0 {
            return Err(ConfigError::Invalid("view.resolution_divisor must be at least 1"));
        }

        if self.view.zoom == 0.0 || !self.view.zoom.is_finite() {
            return Err(ConfigError::Invalid("view.zoom must be finite and non-zero"));
        }

        if self.view.max_iterations == 0 {
            return Err(ConfigError::Invalid("view.max_iterations must be at least 1"));
        }

        if self.event_queue_capacity == 0 {
            return Err(ConfigError::Invalid("event_queue_capacity must be at least 1"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_initial_view() {
        let config = ExplorerConfig::default();

        assert_eq!(config.view.center_x, -0.5);
        assert_eq!(config.view.center_y, 0.0);
        assert_eq!(config.view.zoom, 1.0);
        assert_eq!(config.view.resolution_divisor, 8);
        assert_eq!(config.view.max_iterations, 1000);
        assert_eq!(config.export.path, PathBuf::from("mandel.png"));
        assert_eq!(config.export.download_timeout(), None);
        assert_eq!(config.event_queue_capacity, 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "view": {{ "max_iterations": 64 }}, "export": {{ "download_timeout_ms": 250 }} }}"#
        )
        .unwrap();

        let config = ExplorerConfig::load(file.path()).unwrap();

        assert_eq!(config.view.max_iterations, 64);
        assert_eq!(config.view.resolution_divisor, 8);
        assert_eq!(config.window, WindowConfig::default());
        assert_eq!(config.export.download_timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = ExplorerConfig::load(dir.path().join("absent.json"));

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let result = ExplorerConfig::load(file.path());

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_zero_divisor_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "view": {{ "resolution_divisor": 0 }} }}"#).unwrap();

        let result = ExplorerConfig::load(file.path());

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = ExplorerConfig::load_or_default(None::<&Path>).unwrap();

        assert_eq!(config, ExplorerConfig::default());
    }
}
