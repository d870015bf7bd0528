//! Floating-point compatibility API.
//!
//! Most floating-point functions are currently unavailable in `no_std`.
//! This module provides the missing functions using either the `libm` or
//! `micromath` crate, depending on which feature is enabled. As a fallback,
//! it also implements the subset of the functions needed by the rasterizer
//! even if none of the features is enabled.
//!
//! Code elsewhere in the crate imports `float::f32` and calls, for example,
//! `f32::floor(x)`; depending on the features, this resolves either to the
//! inherent `std` method or to one of the free functions below.

#[cfg(feature = "libm")]
pub mod libm {
    pub use libm::ceilf as ceil;
    pub use libm::fabsf as abs;
    pub use libm::floorf as floor;
    pub use libm::roundf as round;

    pub use libm::cosf as cos;
    pub use libm::sinf as sin;
    pub use libm::tanf as tan;
}

#[cfg(feature = "mm")]
pub mod mm {
    use micromath::F32Ext as mm;

    #[inline]
    pub fn abs(x: f32) -> f32 {
        mm::abs(x)
    }
    #[inline]
    pub fn floor(x: f32) -> f32 {
        mm::floor(x)
    }
    #[inline]
    pub fn ceil(x: f32) -> f32 {
        mm::ceil(x)
    }
    #[inline]
    pub fn round(x: f32) -> f32 {
        mm::round(x)
    }

    #[inline]
    pub fn sin(x: f32) -> f32 {
        mm::sin(x)
    }
    #[inline]
    pub fn cos(x: f32) -> f32 {
        mm::cos(x)
    }
    #[inline]
    pub fn tan(x: f32) -> f32 {
        mm::tan(x)
    }
}

pub mod fallback {
    /// Returns the absolute value of `x`.
    #[inline]
    pub fn abs(x: f32) -> f32 {
        f32::from_bits(x.to_bits() & 0x7FFF_FFFF)
    }
    /// Returns the largest integer less than or equal to `x`.
    #[inline]
    pub fn floor(x: f32) -> f32 {
        let t = x as i64 as f32;
        if t > x { t - 1.0 } else { t }
    }
    /// Returns the smallest integer greater than or equal to `x`.
    #[inline]
    pub fn ceil(x: f32) -> f32 {
        -floor(-x)
    }
    /// Rounds `x` to the nearest integer, halfway cases away from zero.
    #[inline]
    pub fn round(x: f32) -> f32 {
        let t = x as i64 as f32;
        // Exact for |x| < 2^23
        if abs(x - t) < 0.5 {
            t
        } else if x < 0.0 {
            t - 1.0
        } else {
            t + 1.0
        }
    }
}

#[cfg(feature = "std")]
#[allow(non_camel_case_types)]
pub type f32 = core::primitive::f32;

#[cfg(all(feature = "libm", not(feature = "std")))]
pub use libm as f32;

#[cfg(all(feature = "mm", not(feature = "std"), not(feature = "libm")))]
pub use mm as f32;

#[cfg(not(feature = "fp"))]
pub use fallback as f32;

#[cfg(test)]
#[allow(unused_imports)]
mod tests {
    use core::f32::consts::*;

    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn fallback_floor_and_ceil() {
        use fallback as fb;
        assert_eq!(fb::floor(1.5), 1.0);
        assert_eq!(fb::floor(0.99), 0.0);
        assert_eq!(fb::floor(-0.0), 0.0);
        assert_eq!(fb::floor(-1.1), -2.0);
        assert_eq!(fb::floor(-2.0), -2.0);

        assert_eq!(fb::ceil(1.1), 2.0);
        assert_eq!(fb::ceil(-1.1), -1.0);
        assert_eq!(fb::ceil(3.0), 3.0);
    }

    #[test]
    fn fallback_round_is_half_away_from_zero() {
        use fallback as fb;
        assert_eq!(fb::round(2.5), 3.0);
        assert_eq!(fb::round(2.49), 2.0);
        assert_eq!(fb::round(-2.5), -3.0);
        assert_eq!(fb::round(-2.49), -2.0);
        // Largest float below one half
        assert_eq!(fb::round(0.49999997), 0.0);
        assert_eq!(fb::round(-0.49999997), 0.0);
        assert_eq!(fb::round(0.5), 1.0);
        assert_eq!(fb::round(7.0), 7.0);
        assert_eq!(fb::abs(-4.25), 4.25);
    }

    #[cfg(feature = "libm")]
    #[test]
    fn libm_functions() {
        assert_eq!(libm::floor(-1.1), -2.0);
        assert_eq!(libm::ceil(-1.1), -1.0);
        assert_eq!(libm::round(-2.5), -3.0);
        assert_approx_eq!(libm::sin(FRAC_PI_6), 0.5);
        assert_eq!(libm::cos(PI), -1.0);
    }

    #[cfg(feature = "mm")]
    #[test]
    fn mm_functions() {
        assert_eq!(mm::floor(-1.1), -2.0);
        assert_eq!(mm::ceil(-1.1), -1.0);
        assert_approx_eq!(mm::sin(FRAC_PI_6), 0.5, eps = 1e-3);
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_functions() {
        assert_eq!(f32::floor(-0.0), 0.0);
        assert_eq!(f32::round(-2.5), -3.0);
        assert_eq!(f32::cos(PI), -1.0);
    }
}
