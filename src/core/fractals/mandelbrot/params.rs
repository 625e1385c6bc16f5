use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::fractals::mandelbrot::errors::MandelbrotError;

/// Validated inputs for one evaluation. Holding a value of this type is proof
/// that the evaluator's domain requirements are met.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MandelbrotParams {
    pixel_rect: PixelRect,
    max_iterations: u32,
    zoom: f64,
    center: Complex,
}

impl MandelbrotParams {
    pub fn new(
        width: u32,
        height: u32,
        max_iterations: u32,
        zoom: f64,
        center: Complex,
    ) -> Result<Self, MandelbrotError> {
        if width == 0 || height == 0 {
            return Err(MandelbrotError::EmptyImage { width, height });
        }

        if max_iterations == 0 {
            return Err(MandelbrotError::ZeroMaxIterationsError);
        }

        if zoom == 0.0 || !zoom.is_finite() {
            return Err(MandelbrotError::InvalidZoom(zoom));
        }

        Ok(Self {
            pixel_rect: PixelRect::from_size(width, height),
            max_iterations,
            zoom,
            center,
        })
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        self.center
    }
}
