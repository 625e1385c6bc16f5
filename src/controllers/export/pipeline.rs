use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{error, info};

use crate::config::ExportConfig;
use crate::controllers::export::detached::DetachedTask;
use crate::controllers::render_loop::ports::device::{DownloadCompletion, DownloadWaitError};
use crate::storage::write_png::write_png;

const THREAD_NAME: &str = "mandel-export";

#[derive(Debug)]
pub enum ExportError {
    /// The device completed the download without an image.
    NoImage,
    DeviceDisconnected,
    TimedOut,
    Encode(image::ImageError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoImage => write!(f, "failed to download texture"),
            Self::DeviceDisconnected => write!(f, "device abandoned the texture download"),
            Self::TimedOut => write!(f, "timed out waiting for the texture download"),
            Self::Encode(err) => write!(f, "failed to write PNG: {}", err),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DownloadWaitError> for ExportError {
    fn from(err: DownloadWaitError) -> Self {
        match err {
            DownloadWaitError::Disconnected => Self::DeviceDisconnected,
            DownloadWaitError::TimedOut => Self::TimedOut,
        }
    }
}

impl From<image::ImageError> for ExportError {
    fn from(err: image::ImageError) -> Self {
        Self::Encode(err)
    }
}

#[derive(Debug)]
pub enum ExportOutcome {
    Written(PathBuf),
    Failed(ExportError),
}

impl ExportOutcome {
    #[must_use]
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }
}

pub type ExportTask = DetachedTask<ExportOutcome>;

/// Waits on `completion` in the background and writes the downloaded image
/// to the configured path.
///
/// Failures are logged and reported through the task's outcome; nothing is
/// retried. Concurrent exports are independent and all target the same path.
pub fn export_current_image(
    completion: DownloadCompletion,
    config: &ExportConfig,
) -> io::Result<ExportTask> {
    let path = config.path.clone();
    let timeout = config.download_timeout();

    DetachedTask::spawn(THREAD_NAME, move || {
        match download_and_write(completion, timeout, &path) {
            Ok(()) => {
                info!("Wrote texture to {}", path.display());
                ExportOutcome::Written(path)
            }
            Err(err) => {
                error!("Export to {} failed: {}", path.display(), err);
                ExportOutcome::Failed(err)
            }
        }
    })
}

fn download_and_write(
    completion: DownloadCompletion,
    timeout: Option<Duration>,
    path: &Path,
) -> Result<(), ExportError> {
    let image = completion.wait(timeout)?.ok_or(ExportError::NoImage)?;

    write_png(&image, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::pixel_buffer::PixelBuffer;
    use crate::core::data::pixel_rect::PixelRect;

    fn config_in(dir: &tempfile::TempDir) -> ExportConfig {
        ExportConfig {
            path: dir.path().join("mandel.png"),
            download_timeout_ms: None,
        }
    }

    #[test_log::test]
    fn test_downloaded_image_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let downloaded = PixelBuffer::new(PixelRect::from_size(6, 4));

        let task =
            export_current_image(DownloadCompletion::ready(Some(downloaded)), &config).unwrap();

        match task.join().unwrap() {
            ExportOutcome::Written(path) => assert_eq!(path, config.path),
            ExportOutcome::Failed(err) => panic!("export failed: {err}"),
        }
        let written = image::open(&config.path).unwrap();
        assert_eq!((written.width(), written.height()), (6, 4));
    }

    #[test_log::test]
    fn test_missing_image_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        let task = export_current_image(DownloadCompletion::ready(None), &config).unwrap();

        assert!(matches!(
            task.join().unwrap(),
            ExportOutcome::Failed(ExportError::NoImage)
        ));
        assert!(!config.path.exists());
    }

    #[test_log::test]
    fn test_abandoned_download_fails() {
        let dir = tempfile::tempdir().unwrap();
        let (sender, completion) = DownloadCompletion::channel();
        drop(sender);

        let task = export_current_image(completion, &config_in(&dir)).unwrap();

        assert!(matches!(
            task.join().unwrap(),
            ExportOutcome::Failed(ExportError::DeviceDisconnected)
        ));
    }

    #[test_log::test]
    fn test_download_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig {
            download_timeout_ms: Some(10),
            ..config_in(&dir)
        };
        let (_sender, completion) = DownloadCompletion::channel();

        let task = export_current_image(completion, &config).unwrap();

        assert!(matches!(
            task.join().unwrap(),
            ExportOutcome::Failed(ExportError::TimedOut)
        ));
    }

    #[test_log::test]
    fn test_unwritable_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig {
            path: dir.path().join("missing").join("mandel.png"),
            download_timeout_ms: None,
        };
        let downloaded = PixelBuffer::new(PixelRect::from_size(2, 2));

        let task =
            export_current_image(DownloadCompletion::ready(Some(downloaded)), &config).unwrap();

        assert!(matches!(
            task.join().unwrap(),
            ExportOutcome::Failed(ExportError::Encode(_))
        ));
    }

    #[test_log::test]
    fn test_export_does_not_block_the_caller() {
        let dir = tempfile::tempdir().unwrap();
        let (sender, completion) = DownloadCompletion::channel();

        let task = export_current_image(completion, &config_in(&dir)).unwrap();

        std::thread::sleep(Duration::from_millis(20));
        assert!(!task.is_finished());

        sender.complete(Some(PixelBuffer::new(PixelRect::from_size(1, 1))));
        assert!(task.join().unwrap().is_written());
    }
}
