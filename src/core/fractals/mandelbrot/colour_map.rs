use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::algorithm::Escape;

pub const INTERIOR_COLOUR: Colour = Colour::BLACK;

/// Continuous escape-time shading on a white-to-blue ramp.
///
/// Brightness is `256 * log2(1.75 + n - log2(log2(|z|))) / log2(max_iterations)`
/// and drives the red and green channels; blue is always saturated.
///
/// The inner `log2(log2(|z|))` is undefined for `|z| <= 1`. Escaped orbits
/// always have `|z| > 2`, but the formula is kept verbatim rather than
/// clamped: out-of-range and NaN brightness values fall through Rust's
/// saturating float-to-int conversion (NaN becomes 0).
#[derive(Debug, Clone, Copy)]
pub struct SmoothEscapeColourMap {
    log2_max_iterations: f64,
}

impl SmoothEscapeColourMap {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self {
            log2_max_iterations: f64::from(max_iterations).log2(),
        }
    }

    #[must_use]
    pub fn brightness(&self, iterations: u32, magnitude: f64) -> u8 {
        let smoothed = 1.75 + f64::from(iterations) - magnitude.log2().log2();

        (256.0 * smoothed.log2() / self.log2_max_iterations) as u8
    }
}

impl ColourMap<Escape> for SmoothEscapeColourMap {
    fn map(&self, escape: Escape) -> Colour {
        match escape {
            Escape::Bounded => INTERIOR_COLOUR,
            Escape::Escaped {
                iterations,
                magnitude,
            } => {
                let brightness = self.brightness(iterations, magnitude);

                Colour {
                    r: brightness,
                    g: brightness,
                    b: 255,
                }
            }
        }
    }
}
