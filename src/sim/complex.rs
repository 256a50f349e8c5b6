//! Complex arithmetic and the escape-time iteration
//!
//! `escape_iterations` is pure: no shared state, safe to call for any number
//! of sample points in any order.

use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::ESCAPE_RADIUS;

/// A complex number with `f64` components
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Squared magnitude (avoids the square root)
    #[inline]
    pub fn norm_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    pub fn norm(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Distance between two points of the complex plane
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).norm()
    }

    pub fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl Add for Complex {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl AddAssign for Complex {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.re += rhs.re;
        self.im += rhs.im;
    }
}

impl Sub for Complex {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

/// Iterate `z = z² + c` from `z0` and count steps until `|z| > 2`
///
/// Returns `max_iter` when the orbit stays bounded for the whole budget.
pub fn escape_iterations(c: Complex, z0: Complex, max_iter: u32) -> u32 {
    let bound = ESCAPE_RADIUS * ESCAPE_RADIUS;
    let mut z = z0;
    let mut n = 0;
    while z.norm_sqr() <= bound && n < max_iter {
        z = z * z + c;
        n += 1;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_never_escapes() {
        assert_eq!(escape_iterations(Complex::ZERO, Complex::ZERO, 40), 40);
        assert_eq!(escape_iterations(Complex::ZERO, Complex::ZERO, 1000), 1000);
    }

    #[test]
    fn test_far_start_escapes_immediately() {
        assert_eq!(escape_iterations(Complex::ZERO, Complex::new(3.0, 0.0), 40), 0);
    }

    #[test]
    fn test_known_escape_count() {
        // z: 0 -> 1 -> 2 -> 5, |5| > 2 after the third step
        assert_eq!(escape_iterations(Complex::new(1.0, 0.0), Complex::ZERO, 40), 3);
    }

    #[test]
    fn test_zero_budget() {
        assert_eq!(escape_iterations(Complex::new(1.0, 1.0), Complex::ZERO, 0), 0);
    }

    #[test]
    fn test_multiplication() {
        let i = Complex::new(0.0, 1.0);
        assert_eq!(i * i, Complex::new(-1.0, 0.0));
        assert!((Complex::new(3.0, 4.0).norm() - 5.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_escape_is_pure(
            cr in -2.0f64..2.0, ci in -2.0f64..2.0,
            zr in -2.0f64..2.0, zi in -2.0f64..2.0,
            max_iter in 0u32..200,
        ) {
            let c = Complex::new(cr, ci);
            let z0 = Complex::new(zr, zi);
            let first = escape_iterations(c, z0, max_iter);
            let second = escape_iterations(c, z0, max_iter);
            prop_assert_eq!(first, second);
            prop_assert!(first <= max_iter);
        }
    }
}
