//! Value/gradient pairs propagated through products.
//!
//! Every hierarchical shape function is a product of barycentric coordinates
//! (affine, constant gradient) and Legendre polynomials of affine arguments.
//! Carrying the reference-space gradient alongside the value and applying the
//! product rule at each multiplication keeps the gradient code in lockstep
//! with the value code; there is no separate derivative path to drift out of
//! sync.

use std::ops::{Add, Mul, Sub};

/// A scalar value paired with its gradient in reference coordinates.
///
/// The gradient is stored padded to three components; consumers truncate to
/// the reference dimension.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Dual {
    /// Value at the evaluation point.
    pub v: f64,
    /// Reference-space gradient, padded with zeros beyond the cell dimension.
    pub g: [f64; 3],
}

impl Dual {
    /// A value with the given gradient.
    #[inline]
    pub const fn new(v: f64, g: [f64; 3]) -> Self {
        Self { v, g }
    }

    /// A constant (zero gradient).
    #[inline]
    pub const fn constant(v: f64) -> Self {
        Self { v, g: [0.0; 3] }
    }

    /// Gradient truncated to `dim` components.
    #[inline]
    pub fn gradient(&self, dim: usize) -> Vec<f64> {
        self.g[..dim].to_vec()
    }
}

impl Add for Dual {
    type Output = Dual;
    #[inline]
    fn add(self, rhs: Dual) -> Dual {
        Dual::new(
            self.v + rhs.v,
            [
                self.g[0] + rhs.g[0],
                self.g[1] + rhs.g[1],
                self.g[2] + rhs.g[2],
            ],
        )
    }
}

impl Sub for Dual {
    type Output = Dual;
    #[inline]
    fn sub(self, rhs: Dual) -> Dual {
        Dual::new(
            self.v - rhs.v,
            [
                self.g[0] - rhs.g[0],
                self.g[1] - rhs.g[1],
                self.g[2] - rhs.g[2],
            ],
        )
    }
}

impl Mul for Dual {
    type Output = Dual;
    #[inline]
    fn mul(self, rhs: Dual) -> Dual {
        Dual::new(
            self.v * rhs.v,
            [
                self.v * rhs.g[0] + rhs.v * self.g[0],
                self.v * rhs.g[1] + rhs.v * self.g[1],
                self.v * rhs.g[2] + rhs.v * self.g[2],
            ],
        )
    }
}

impl Mul<f64> for Dual {
    type Output = Dual;
    #[inline]
    fn mul(self, s: f64) -> Dual {
        Dual::new(self.v * s, [self.g[0] * s, self.g[1] * s, self.g[2] * s])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_rule() {
        // f = x, g = y on a 2D reference cell; (fg)' = (y, x).
        let x = Dual::new(0.3, [1.0, 0.0, 0.0]);
        let y = Dual::new(0.5, [0.0, 1.0, 0.0]);
        let fg = x * y;
        assert!((fg.v - 0.15).abs() < 1e-15);
        assert_eq!(fg.g, [0.5, 0.3, 0.0]);
    }

    #[test]
    fn linear_combinations() {
        let x = Dual::new(0.3, [1.0, 0.0, 0.0]);
        let one = Dual::constant(1.0);
        let u = (one - x) * 2.0;
        assert!((u.v - 1.4).abs() < 1e-15);
        assert_eq!(u.g, [-2.0, 0.0, 0.0]);
    }
}
