use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::fractals::mandelbrot::params::MandelbrotParams;
use crate::core::util::pixel_to_complex_coords::pixel_to_complex_coords;

const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// Outcome of iterating `z = z² + c` for one pixel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Escape {
    /// The orbit stayed bounded for every iteration.
    Bounded,
    /// The orbit left the escape radius. `iterations` is the zero-based index
    /// of the step that escaped and `magnitude` is `|z|` after that step.
    Escaped { iterations: u32, magnitude: f64 },
}

#[derive(Debug)]
pub struct MandelbrotAlgorithm {
    pixel_rect: PixelRect,
    max_iterations: u32,
    zoom: f64,
    center: Complex,
}

impl MandelbrotAlgorithm {
    #[must_use]
    pub fn new(params: &MandelbrotParams) -> Self {
        Self {
            pixel_rect: params.pixel_rect(),
            max_iterations: params.max_iterations(),
            zoom: params.zoom(),
            center: params.center(),
        }
    }
}

impl FractalAlgorithm for MandelbrotAlgorithm {
    type Output = Escape;

    fn compute(&self, pixel: Point) -> Escape {
        let c = pixel_to_complex_coords(pixel, self.pixel_rect, self.zoom, self.center);
        let mut z = Complex::ZERO;

        for iteration in 0..self.max_iterations {
            z = z * z + c;

            if z.magnitude_squared() > ESCAPE_RADIUS_SQUARED {
                return Escape::Escaped {
                    iterations: iteration,
                    magnitude: z.magnitude(),
                };
            }
        }

        Escape::Bounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn algorithm(
        width: u32,
        height: u32,
        max_iterations: u32,
        center: Complex,
    ) -> MandelbrotAlgorithm {
        let params = MandelbrotParams::new(width, height, max_iterations, 1.0, center).unwrap();
        MandelbrotAlgorithm::new(&params)
    }

    #[test]
    fn test_main_cardioid_is_bounded() {
        let alg = algorithm(10, 10, 1000, Complex { real: -0.5, imag: 0.0 });

        assert_eq!(alg.compute(Point { x: 5, y: 5 }), Escape::Bounded);
    }

    #[test]
    fn test_far_point_escapes_on_first_step() {
        // c = 10: z1 = 10, |z1|² = 100 > 4
        let alg = algorithm(10, 10, 1000, Complex { real: 10.0, imag: 0.0 });

        assert_eq!(
            alg.compute(Point { x: 5, y: 5 }),
            Escape::Escaped {
                iterations: 0,
                magnitude: 10.0
            }
        );
    }

    #[test]
    fn test_escape_index_counts_completed_steps() {
        // c = 1: z = 1, 2, 5 -> escapes on the third step (index 2)
        let alg = algorithm(10, 10, 1000, Complex { real: 1.0, imag: 0.0 });

        assert_eq!(
            alg.compute(Point { x: 5, y: 5 }),
            Escape::Escaped {
                iterations: 2,
                magnitude: 5.0
            }
        );
    }

    #[test]
    fn test_iteration_bound_caps_the_orbit() {
        // c = 1 needs three steps to escape; with two it is reported bounded
        let alg = algorithm(10, 10, 2, Complex { real: 1.0, imag: 0.0 });

        assert_eq!(alg.compute(Point { x: 5, y: 5 }), Escape::Bounded);
    }
}
