use std::{error::Error, fmt};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MandelbrotError {
    EmptyImage { width: u32, height: u32 },
    ZeroMaxIterationsError,
    InvalidZoom(f64),
}

impl fmt::Display for MandelbrotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyImage { width, height } => {
                write!(f, "image size must be positive: {}x{}", width, height)
            }
            Self::ZeroMaxIterationsError => {
                write!(f, "Maximum iterations must be greater than zero")
            }
            Self::InvalidZoom(zoom) => {
                write!(f, "zoom must be finite and non-zero, got {}", zoom)
            }
        }
    }
}

impl Error for MandelbrotError {}
