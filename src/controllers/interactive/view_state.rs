use log::{trace, warn};

use crate::config::ViewConfig;
use crate::controllers::interactive::events::input::InputEvent;
use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::fractals::mandelbrot::errors::MandelbrotError;
use crate::core::fractals::mandelbrot::params::MandelbrotParams;

/// Fraction of the current zoom added per unit of scroll.
pub const ZOOM_STEP: f64 = 0.06;
/// Screen pixels that pan the view by one complex-plane unit at zoom 1.
pub const PAN_SCALE: f64 = 900.0;
pub const RESOLUTION_STEP: u32 = 2;
pub const MAX_RESOLUTION_DIVISOR: u32 = 8;
/// Divisor the toggle wraps back to after passing the maximum.
pub const MIN_RESOLUTION_DIVISOR: u32 = 4;

/// The parameters one evaluation is computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParameters {
    pub center_x: f64,
    pub center_y: f64,
    pub zoom: f64,
    pub resolution_divisor: u32,
    pub max_iterations: u32,
    pub output_bounds: PixelRect,
}

impl ViewParameters {
    #[must_use]
    pub fn initial(config: &ViewConfig, output_bounds: PixelRect) -> Self {
        Self {
            center_x: config.center_x,
            center_y: config.center_y,
            zoom: config.zoom,
            resolution_divisor: config.resolution_divisor.max(1),
            max_iterations: config.max_iterations,
            output_bounds,
        }
    }

    /// Dimensions of the generated image: the output bounds scaled down by the
    /// resolution divisor.
    #[must_use]
    pub fn image_size(&self) -> PixelRect {
        self.output_bounds.divided_by(self.resolution_divisor)
    }

    pub fn mandelbrot_params(&self) -> Result<MandelbrotParams, MandelbrotError> {
        let size = self.image_size();

        MandelbrotParams::new(
            size.width(),
            size.height(),
            self.max_iterations,
            self.zoom,
            Complex {
                real: self.center_x,
                imag: self.center_y,
            },
        )
    }
}

/// View parameters plus the flag recording that they changed since the last
/// evaluation. Owned by the generator thread.
#[derive(Debug)]
pub struct ViewState {
    params: ViewParameters,
    dirty: bool,
}

impl ViewState {
    #[must_use]
    pub fn new(params: ViewParameters) -> Self {
        Self {
            params,
            dirty: false,
        }
    }

    #[must_use]
    pub fn params(&self) -> &ViewParameters {
        &self.params
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clears the dirty flag, returning whether it was set.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::Resize { width, height } => {
                // New bounds are picked up by the next regeneration only.
                self.params.output_bounds = PixelRect::from_size(width, height);
                trace!("Output bounds set to {}x{}", width, height);
            }
            InputEvent::ZoomDelta(amount) => {
                let zoom = self.params.zoom + amount * ZOOM_STEP * self.params.zoom.abs();

                if zoom == 0.0 || !zoom.is_finite() {
                    warn!(
                        "Ignoring zoom delta {} that would leave zoom at {}",
                        amount, zoom
                    );
                    return;
                }

                self.params.zoom = zoom;
                self.dirty = true;
                trace!("Zoom set to {}", zoom);
            }
            InputEvent::PanDelta { dx, dy } => {
                let scale = self.params.zoom.abs();

                self.params.center_x += (dx / PAN_SCALE) / scale;
                self.params.center_y += (dy / PAN_SCALE) / scale;
                self.dirty = true;
                trace!(
                    "Center moved to ({}, {})",
                    self.params.center_x, self.params.center_y
                );
            }
            InputEvent::ResolutionToggle => {
                let mut divisor = self
                    .params
                    .resolution_divisor
                    .saturating_add(RESOLUTION_STEP);
                if divisor > MAX_RESOLUTION_DIVISOR {
                    divisor = MIN_RESOLUTION_DIVISOR;
                }

                self.params.resolution_divisor = divisor;
                self.dirty = true;
                trace!("Resolution divisor set to {}", divisor);
            }
            InputEvent::ExportRequested | InputEvent::DisplayToggle => {}
        }
    }
}
