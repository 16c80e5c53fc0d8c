//! Square root providers.
//!
//! The demo only needs one operation from an accelerator: the square root
//! of a Q1.31 argument. The CORDIC co-processor implements it in
//! [`crate::cordic`]; [`IntegerSqrt`] computes the exact result in software
//! for targets without one.

/// Square root of a Q1.31 number.
pub trait SqrtAccelerator {
    /// Error reported by the accelerator.
    type Error: core::fmt::Debug;

    /// Compute `sqrt(x)` with `x` and the result in Q1.31.
    ///
    /// `x` must not be negative.
    fn sqrt_q31(&mut self, x: i32) -> Result<i32, Self::Error>;
}

impl<T: SqrtAccelerator + ?Sized> SqrtAccelerator for &mut T {
    type Error = T::Error;

    #[inline]
    fn sqrt_q31(&mut self, x: i32) -> Result<i32, Self::Error> {
        (**self).sqrt_q31(x)
    }
}

/// Accelerator error
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccelError {
    /// The argument was negative
    Domain,
    /// No result within the configured number of polls
    Timeout,
}

/// Exact `floor(sqrt(x))` on Q1.31 numbers using integer arithmetic.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Clone, Copy)]
pub struct IntegerSqrt;

impl SqrtAccelerator for IntegerSqrt {
    type Error = AccelError;

    fn sqrt_q31(&mut self, x: i32) -> Result<i32, AccelError> {
        if x < 0 {
            return Err(AccelError::Domain);
        }

        // sqrt(x / 2^31) * 2^31 == sqrt(x * 2^31), and x * 2^31 < 2^62
        let root = isqrt((x as u64) << 31);
        log::trace!("isqrt {:#010x} -> {:#010x}", x, root);

        Ok(root as i32)
    }
}

/// Digit by digit integer square root.
pub(crate) fn isqrt(mut n: u64) -> u64 {
    let mut root = 0u64;
    let mut bit = 1u64 << 62;

    while bit > n {
        bit >>= 2;
    }

    while bit != 0 {
        if n >= root + bit {
            n -= root + bit;
            root = (root >> 1) + bit;
        } else {
            root >>= 1;
        }
        bit >>= 2;
    }

    root
}

/// Correctly rounded single precision square root.
#[inline]
pub fn software_sqrt(x: f32) -> f32 {
    libm::sqrtf(x)
}
