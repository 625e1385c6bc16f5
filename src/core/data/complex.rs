use std::ops::{Add, Mul};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Complex {
    pub real: f64,
    pub imag: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex {
        real: 0.0,
        imag: 0.0,
    };

    #[must_use]
    pub fn magnitude_squared(&self) -> f64 {
        self.real * self.real + self.imag * self.imag
    }

    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            real: self.real + other.real,
            imag: self.imag + other.imag,
        }
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self {
            real: self.real * other.real - self.imag * other.imag,
            imag: self.real * other.imag + self.imag * other.real,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude_of_pythagorean_triple() {
        let c = Complex {
            real: -3.0,
            imag: 4.0,
        };

        assert_eq!(c.magnitude_squared(), 25.0);
        assert_eq!(c.magnitude(), 5.0);
    }

    #[test]
    fn test_zero_has_zero_magnitude() {
        assert_eq!(Complex::ZERO.magnitude(), 0.0);
    }

    #[test]
    fn test_square_plus_constant_is_one_escape_step() {
        // (1 + 2i)² + (0.5 - 1i) = (-3 + 4i) + (0.5 - 1i) = -2.5 + 3i
        let z = Complex {
            real: 1.0,
            imag: 2.0,
        };
        let c = Complex {
            real: 0.5,
            imag: -1.0,
        };

        let next = z * z + c;

        assert_eq!(next.real, -2.5);
        assert_eq!(next.imag, 3.0);
    }

    #[test]
    fn test_mul_by_zero() {
        let a = Complex {
            real: 5.0,
            imag: 3.0,
        };

        assert_eq!(a * Complex::ZERO, Complex::ZERO);
    }
}
