use rayon::prelude::*;

use crate::core::actions::cancellation::{CANCEL_CHECK_INTERVAL_PIXELS, CancelToken, Cancelled};
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;

/// Generates fractal data in parallel using rayon's work-stealing scheduler.
///
/// Results are returned in row-major order regardless of which thread
/// computed which row, so output is deterministic for a pure algorithm.
/// Checks the token at the start of each row and every
/// [`CANCEL_CHECK_INTERVAL_PIXELS`] pixels within a row.
pub fn generate_fractal_parallel_rayon_cancelable<Alg, C>(
    pixel_rect: PixelRect,
    algorithm: &Alg,
    cancel: &C,
) -> Result<Vec<Alg::Output>, Cancelled>
where
    Alg: FractalAlgorithm + Sync,
    Alg::Output: Send,
    C: CancelToken,
{
    let origin = pixel_rect.top_left();
    let row_width = pixel_rect.width() as usize;

    let rows: Result<Vec<Vec<Alg::Output>>, Cancelled> = (0..pixel_rect.height())
        .into_par_iter()
        .map(|dy| {
            let y = origin.y + dy as i32;
            let mut row = Vec::with_capacity(row_width);

            for i in 0..row_width {
                if i % CANCEL_CHECK_INTERVAL_PIXELS == 0 && cancel.is_cancelled() {
                    return Err(Cancelled);
                }

                row.push(algorithm.compute(Point {
                    x: origin.x + i as i32,
                    y,
                }));
            }

            Ok(row)
        })
        .collect();

    rows.map(|r| r.into_iter().flatten().collect())
}
