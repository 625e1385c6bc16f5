use crate::core::actions::cancellation::{CancelToken, Cancelled, NeverCancel};
use crate::core::actions::generate_fractal::generate_fractal_parallel_rayon::generate_fractal_parallel_rayon_cancelable;
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::{
    GeneratePixelBufferError, generate_pixel_buffer_cancelable,
};
use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::fractals::mandelbrot::colour_map::SmoothEscapeColourMap;
use crate::core::fractals::mandelbrot::params::MandelbrotParams;

/// Side length of the orientation marker painted into the top-left corner.
pub const SENTINEL_SIZE: u32 = 5;
pub const SENTINEL_COLOUR: Colour = Colour::RED;

/// Renders the Mandelbrot set for `params`.
///
/// Deterministic and free of shared state; concurrent calls are independent.
#[must_use]
pub fn evaluate(params: &MandelbrotParams) -> PixelBuffer {
    match evaluate_cancelable(params, &NeverCancel) {
        Ok(pixel_buffer) => pixel_buffer,
        Err(Cancelled) => unreachable!("NeverCancel token should never signal cancellation"),
    }
}

/// Like [`evaluate`], but gives up with [`Cancelled`] once `cancel` fires.
pub fn evaluate_cancelable<C: CancelToken>(
    params: &MandelbrotParams,
    cancel: &C,
) -> Result<PixelBuffer, Cancelled> {
    let pixel_rect = params.pixel_rect();
    let algorithm = MandelbrotAlgorithm::new(params);
    let colour_map = SmoothEscapeColourMap::new(params.max_iterations());

    let escapes = generate_fractal_parallel_rayon_cancelable(pixel_rect, &algorithm, cancel)?;

    let mut pixel_buffer =
        match generate_pixel_buffer_cancelable(escapes, &colour_map, pixel_rect, cancel) {
            Ok(pixel_buffer) => pixel_buffer,
            Err(GeneratePixelBufferError::Cancelled(cancelled)) => return Err(cancelled),
            Err(GeneratePixelBufferError::PixelBuffer(err)) => {
                unreachable!("one escape is generated per pixel: {err}")
            }
        };

    stamp_orientation_sentinel(&mut pixel_buffer);

    Ok(pixel_buffer)
}

fn stamp_orientation_sentinel(pixel_buffer: &mut PixelBuffer) {
    pixel_buffer.fill_clipped(
        PixelRect::from_size(SENTINEL_SIZE, SENTINEL_SIZE),
        SENTINEL_COLOUR,
    );
}
