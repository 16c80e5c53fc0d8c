//! CORDIC square root.
//!
//! Example:
//!
//! ```rust,ignore
//! #[entry]
//! fn main() -> ! {
//!     let dp = stm32::Peripherals::take().expect("cannot take peripherals");
//!
//!     let mut cordic = dp
//!         .CORDIC
//!         .constrain(&dp.RCC)
//!         .freeze::<Q31, Q31, P60>(); // 32 bit arguments, 32 bit results, 60 iterations
//!
//!     // static operation, the argument must suit the scale
//!
//!     cordic.start::<N0>(I1F31::from_num(0.25));
//!     let root = cordic.result();
//!
//!     // range reduced operation, any non-negative argument
//!
//!     let root = cordic.sqrt_q31(0x0000_1000).unwrap();
//!
//!     loop {}
//! }
//! ```
//!
//! The co-processor only produces a precise square root for arguments in
//! `[0.027, 0.75)` at scale 0 and `[0.75, 1.75)` at scale 1. [`Reduction`]
//! moves any positive Q1.31 argument into those windows: small arguments are
//! multiplied by `4^k` and the root divided by `2^k`, large ones use scale 1.

#[cfg(feature = "device-selected")]
mod peripheral;

#[cfg(feature = "device-selected")]
pub use peripheral::*;

/// Lower bound of the scale 1 window, 0.75 in Q1.31.
const SCALE1_MIN: u32 = 0x6000_0000;
/// Reduced arguments land in `[0.1875, 0.75)`.
const REDUCED_MIN: u32 = SCALE1_MIN >> 2;

/// CORDIC function scale `n`. Argument and result are both multiplied
/// by `2^-n`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    N0 = 0,
    N1 = 1,
    N2 = 2,
}

impl Scale {
    /// Raw `SCALE` field value.
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Argument range reduction for one square root.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reduction {
    scale: Scale,
    /// The argument is multiplied by `4^k`.
    k: u32,
}

impl Reduction {
    /// Reduction for a Q1.31 argument.
    ///
    /// Zero and negative arguments have no root to scale and get the
    /// identity reduction.
    pub fn for_argument(x: i32) -> Self {
        if x <= 0 {
            return Reduction {
                scale: Scale::N0,
                k: 0,
            };
        }

        let mut v = x as u32;
        if v >= SCALE1_MIN {
            return Reduction {
                scale: Scale::N1,
                k: 0,
            };
        }

        let mut k = 0;
        while v < REDUCED_MIN {
            v <<= 2;
            k += 1;
        }

        Reduction { scale: Scale::N0, k }
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Register value to hand to the co-processor.
    #[inline]
    pub fn argument(&self, x: i32) -> i32 {
        ((x as u32) << (2 * self.k) >> self.scale.bits()) as i32
    }

    /// Square root of the original argument from the co-processor result.
    #[inline]
    pub fn result(&self, root: i32) -> i32 {
        ((root as u32) << self.scale.bits() >> self.k) as i32
    }
}
