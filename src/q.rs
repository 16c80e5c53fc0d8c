//! Conversions between `f32` and the Q1.15 / Q1.31 fixed point formats.
//!
//! The plain conversions round half up: add one half, then truncate toward
//! negative infinity. For non-negative input this is the usual
//! `(int)(a * 2^n + 0.5)`; negative input is rounded to nearest as well
//! instead of being pulled toward zero. They do not validate their input:
//! anything outside of `[-1, 1)` saturates to the nearest representable
//! value. Use the `try_` variants where the input is not known to be in
//! range.

use fixed::types::{I1F15, I1F31};

/// `2^15` as `f32`.
const Q15_SCALE: f32 = 32_768.0;
/// `2^31` as `f32`.
const Q31_SCALE: f32 = 2_147_483_648.0;

/// The value did not fit in `[-1, 1)`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeError(pub f32);

/// Convert a Q1.15 number to `f32`.
#[inline]
pub fn q15_to_float(a: i16) -> f32 {
    a as f32 / Q15_SCALE
}

/// Convert a Q1.31 number to `f32`.
#[inline]
pub fn q31_to_float(a: i32) -> f32 {
    a as f32 / Q31_SCALE
}

/// Convert `f32` to a Q1.15 number.
#[inline]
pub fn float_to_q15(a: f32) -> i16 {
    libm::floorf(a * Q15_SCALE + 0.5) as i16
}

/// Convert `f32` to a Q1.31 number.
#[inline]
pub fn float_to_q31(a: f32) -> i32 {
    libm::floorf(a * Q31_SCALE + 0.5) as i32
}

#[inline]
fn in_range(a: f32) -> Result<f32, RangeError> {
    if (-1.0..1.0).contains(&a) {
        Ok(a)
    } else {
        Err(RangeError(a))
    }
}

/// Convert `f32` to a Q1.15 number, rejecting values outside of `[-1, 1)`.
pub fn try_float_to_q15(a: f32) -> Result<i16, RangeError> {
    in_range(a).map(float_to_q15)
}

/// Convert `f32` to a Q1.31 number, rejecting values outside of `[-1, 1)`.
pub fn try_float_to_q31(a: f32) -> Result<i32, RangeError> {
    in_range(a).map(float_to_q31)
}

/// Q1.15 bits as a `fixed` number.
#[inline]
pub fn to_i1f15(a: i16) -> I1F15 {
    I1F15::from_bits(a)
}

/// Q1.31 bits as a `fixed` number.
#[inline]
pub fn to_i1f31(a: i32) -> I1F31 {
    I1F31::from_bits(a)
}

/// Q1.31 bits of a `fixed` number.
#[inline]
pub fn from_i1f31(a: I1F31) -> i32 {
    a.to_bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    const Q15_LSB: f32 = 1.0 / Q15_SCALE;
    const Q31_LSB: f32 = 1.0 / Q31_SCALE;

    #[test]
    fn quarter_is_0x2000_0000() {
        assert_eq!(float_to_q31(0.25), 0x2000_0000);
        assert_eq!(float_to_q15(0.25), 0x2000);
    }

    #[test]
    fn exact_values() {
        assert_eq!(q31_to_float(0x4000_0000), 0.5);
        assert_eq!(q31_to_float(i32::MIN), -1.0);
        assert_eq!(q15_to_float(i16::MIN), -1.0);
        assert_eq!(q15_to_float(-0x4000), -0.5);
        assert_eq!(float_to_q31(-0.5), -0x4000_0000);
        assert_eq!(float_to_q15(0.0), 0);
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(float_to_q15(1.5 * Q15_LSB), 2);
        assert_eq!(float_to_q15(1.25 * Q15_LSB), 1);
        assert_eq!(float_to_q15(-1.25 * Q15_LSB), -1);
        assert_eq!(float_to_q15(-1.5 * Q15_LSB), -1);
        assert_eq!(float_to_q15(-1.75 * Q15_LSB), -2);
    }

    #[test]
    fn out_of_range_saturates() {
        assert_eq!(float_to_q15(1.0), i16::MAX);
        assert_eq!(float_to_q15(-4.0), i16::MIN);
        assert_eq!(float_to_q31(2.0), i32::MAX);
        assert_eq!(float_to_q31(-2.0), i32::MIN);
    }

    #[test]
    fn checked_conversions_validate_range() {
        assert_eq!(try_float_to_q31(0.25), Ok(0x2000_0000));
        assert_eq!(try_float_to_q31(-1.0), Ok(i32::MIN));
        assert_eq!(try_float_to_q31(1.0), Err(RangeError(1.0)));
        assert_eq!(try_float_to_q15(-1.5), Err(RangeError(-1.5)));
        assert!(try_float_to_q15(f32::NAN).is_err());
        assert!(try_float_to_q31(f32::INFINITY).is_err());
    }

    #[test]
    fn q31_round_trip_within_one_lsb() {
        let mut a = -1.0f32;
        while a < 1.0 {
            let back = q31_to_float(float_to_q31(a));
            assert!((back - a).abs() <= Q31_LSB, "{} -> {}", a, back);
            a += 1.0 / 4096.0 + 1.0 / 3_000_000.0;
        }

        let mut rng = fastrand::Rng::with_seed(0x5eed);
        for _ in 0..10_000 {
            let a = rng.f32() * 2.0 - 1.0;
            let back = q31_to_float(float_to_q31(a));
            assert!((back - a).abs() <= Q31_LSB, "{} -> {}", a, back);
        }
    }

    #[test]
    fn q15_round_trip_within_one_lsb() {
        let mut rng = fastrand::Rng::with_seed(0x15);
        for _ in 0..10_000 {
            let a = rng.f32() * 2.0 - 1.0;
            let back = q15_to_float(float_to_q15(a));
            assert!((back - a).abs() <= Q15_LSB, "{} -> {}", a, back);
        }
    }

    #[test]
    fn fixed_bridge_keeps_bits() {
        let q = float_to_q31(0.25);
        assert_eq!(to_i1f31(q), I1F31::from_num(0.25));
        assert_eq!(from_i1f31(to_i1f31(q)), q);
        assert_eq!(to_i1f15(float_to_q15(-0.5)), I1F15::from_num(-0.5));
    }
}
