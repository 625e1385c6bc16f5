use crate::core::data::point::Point;

/// Per-pixel computation. Implementations must be pure so rows can be
/// evaluated on any thread in any order.
pub trait FractalAlgorithm {
    type Output;

    fn compute(&self, pixel: Point) -> Self::Output;
}
