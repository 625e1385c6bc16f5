use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;

/// Horizontal stretch compensating for the usual landscape aspect.
pub const HORIZONTAL_SCALE: f64 = 1.5;

/// Maps a pixel to the complex plane around `center`.
///
/// The image centre maps to `center`; one half-width (or half-height) of the
/// image spans `1 / zoom` units, with the real axis stretched by
/// [`HORIZONTAL_SCALE`]. Points outside `pixel_rect` extrapolate linearly.
#[must_use]
pub fn pixel_to_complex_coords(
    pixel: Point,
    pixel_rect: PixelRect,
    zoom: f64,
    center: Complex,
) -> Complex {
    let width = f64::from(pixel_rect.width());
    let height = f64::from(pixel_rect.height());
    let x = f64::from(pixel.x - pixel_rect.top_left().x);
    let y = f64::from(pixel.y - pixel_rect.top_left().y);

    Complex {
        real: HORIZONTAL_SCALE * (x - width / 2.0) / (0.5 * zoom * width) + center.real,
        imag: (y - height / 2.0) / (0.5 * zoom * height) + center.imag,
    }
}
