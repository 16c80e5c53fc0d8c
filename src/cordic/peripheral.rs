#![deny(missing_docs)]
#![allow(private_bounds)]

//! CORDIC co-processor driver, configured for the square root function.

use fixed::types::I1F31;

use super::{Reduction, Scale};
use crate::{
    accel::{AccelError, SqrtAccelerator},
    stm32::{cordic::csr, CORDIC, RCC},
};

/// Polls of the ready flag before a computation is considered lost.
/// 60 iterations take 15 cycles, this leaves plenty of margin.
pub const DEFAULT_READY_POLLS: u32 = 1_000;

/// Extension trait for constraining the Cordic peripheral.
pub trait Ext {
    /// Enable the peripheral clock. The peripheral is expected to be in its
    /// reset state.
    fn constrain(self, rcc: &RCC) -> CordicReset;
}

impl Ext for CORDIC {
    #[inline]
    fn constrain(self, rcc: &RCC) -> CordicReset {
        rcc.ahb1enr().modify(|_, w| w.cordicen().set_bit());

        Cordic {
            rb: self,
            config: Config {
                arg: types::Q31,
                res: types::Q31,
                prec: prec::P20,
                op: op::Reset,
            },
            ready_polls: DEFAULT_READY_POLLS,
        }
    }
}

/// Traits and structures related to data types.
pub mod types {
    use super::csr;
    use fixed::traits::Fixed;

    pub use fixed::types::{I1F15, I1F31};

    pub(crate) mod sealed {
        /// Tag for argument or result data.
        pub trait Tag {
            /// Fixed point representation.
            type Repr: super::Ext<Tag = Self>;
        }
    }

    /// q1.15 fixed point number.
    pub struct Q15;
    /// q1.31 fixed point number.
    pub struct Q31;

    impl sealed::Tag for Q15 {
        type Repr = I1F15;
    }

    impl sealed::Tag for Q31 {
        type Repr = I1F31;
    }

    /// Register conversions of the fixed point types.
    pub trait Ext: Fixed {
        /// Tag representing this type.
        type Tag: sealed::Tag<Repr = Self>;

        /// Bits as written to `WDATA`.
        fn to_register(self) -> u32;
        /// Value from bits read from `RDATA`.
        fn from_register(bits: u32) -> Self;
    }

    impl Ext for I1F15 {
        type Tag = Q15;

        #[inline]
        fn to_register(self) -> u32 {
            // $RM0440 17.4.2
            // the square root takes a single argument, the upper half
            // is filled with the +1 default all the same
            self.to_bits() as u16 as u32 | (0x7fff << 16)
        }

        #[inline]
        fn from_register(bits: u32) -> Self {
            Self::from_bits(bits as u16 as i16)
        }
    }

    impl Ext for I1F31 {
        type Tag = Q31;

        #[inline]
        fn to_register(self) -> u32 {
            self.to_bits() as u32
        }

        #[inline]
        fn from_register(bits: u32) -> Self {
            Self::from_bits(bits as i32)
        }
    }

    /// Argument width type-states.
    pub(crate) mod arg {
        use super::{csr, sealed::Tag};

        pub trait State: Tag {
            fn set(w: csr::ARGSIZE_W<csr::CSRrs>) -> Self;
        }

        impl State for super::Q31 {
            #[inline]
            fn set(w: csr::ARGSIZE_W<csr::CSRrs>) -> Self {
                w.variant(csr::ARGSIZE::Bits32);
                Self
            }
        }

        impl State for super::Q15 {
            #[inline]
            fn set(w: csr::ARGSIZE_W<csr::CSRrs>) -> Self {
                w.variant(csr::ARGSIZE::Bits16);
                Self
            }
        }
    }

    /// Result width type-states.
    pub(crate) mod res {
        use super::{csr, sealed::Tag};

        pub trait State: Tag {
            fn set(w: csr::RESSIZE_W<csr::CSRrs>) -> Self;
        }

        impl State for super::Q31 {
            #[inline]
            fn set(w: csr::RESSIZE_W<csr::CSRrs>) -> Self {
                w.variant(csr::RESSIZE::Bits32);
                Self
            }
        }

        impl State for super::Q15 {
            #[inline]
            fn set(w: csr::RESSIZE_W<csr::CSRrs>) -> Self {
                w.variant(csr::RESSIZE::Bits16);
                Self
            }
        }
    }
}

/// Type-states for the square root scale.
///
/// The scale is picked per computation, so these only select it at compile
/// time for [`Cordic::start`].
pub mod scale {
    use super::Scale;

    /// Trait for function scale type-states.
    pub trait State {
        /// Scale represented by this type-state.
        const SCALE: Scale;
    }

    /// Scale of 0, arguments in `[0.027, 0.75)`.
    pub struct N0;
    /// Scale of 1, arguments in `[0.75, 1.75)` divided by 2.
    pub struct N1;
    /// Scale of 2, arguments in `[1.75, 2.341)` divided by 4.
    pub struct N2;

    impl State for N0 {
        const SCALE: Scale = Scale::N0;
    }

    impl State for N1 {
        const SCALE: Scale = Scale::N1;
    }

    impl State for N2 {
        const SCALE: Scale = Scale::N2;
    }
}

/// Traits and structures related to precision type-states.
pub mod prec {
    use super::csr;

    /// Trait for precision type-states.
    pub(crate) trait State {
        /// Bit representation of the precision.
        const BITS: u8;

        /// Configure the resource to be represented
        /// by this type-state.
        fn set(w: csr::PRECISION_W<csr::CSRrs>) -> Self;
    }

    macro_rules! precisions {
        ( $( ($NAME:ident, $BITS:expr, $DOC:expr) $(,)? )+ ) => {
            $(
                #[doc = $DOC]
                pub struct $NAME;

                impl State for $NAME {
                    const BITS: u8 = $BITS;

                    #[inline]
                    fn set(w: csr::PRECISION_W<csr::CSRrs>) -> Self {
                        // SAFETY: 1..=15 are valid precisions
                        unsafe { w.bits(<Self as State>::BITS) };

                        Self
                    }
                }
            )+
        };
    }

    precisions! {
        (P4, 1, "4 iterations."),
        (P8, 2, "8 iterations."),
        (P12, 3, "12 iterations."),
        (P16, 4, "16 iterations."),
        (P20, 5, "20 iterations."),
        (P24, 6, "24 iterations."),
        (P28, 7, "28 iterations."),
        (P32, 8, "32 iterations."),
        (P36, 9, "36 iterations."),
        (P40, 10, "40 iterations."),
        (P44, 11, "44 iterations."),
        (P48, 12, "48 iterations."),
        (P52, 13, "52 iterations."),
        (P56, 14, "56 iterations."),
        (P60, 15, "60 iterations."),
    }
}

/// Function type-states.
pub mod op {
    /// Whatever the peripheral was left with, cosine after reset.
    pub struct Reset;
    /// Square root, one argument, one result.
    pub struct Sqrt;

    pub(crate) trait State {}

    impl State for Reset {}
    impl State for Sqrt {}
}

/// Configuration for the Cordic, held as type-state tokens.
#[allow(unused)]
struct Config<Arg, Res, Prec, Op> {
    arg: Arg,
    res: Res,
    prec: Prec,
    op: Op,
}

/// Cordic co-processor interface.
pub struct Cordic<Arg, Res, Prec, Op>
where
    Arg: types::arg::State,
    Res: types::res::State,
    Prec: prec::State,
    Op: op::State,
{
    rb: CORDIC,
    #[allow(unused)]
    config: Config<Arg, Res, Prec, Op>,
    ready_polls: u32,
}

/// $RM0440 17.4.1
pub type CordicReset = Cordic<types::Q31, types::Q31, prec::P20, op::Reset>;

// root impl
impl<Arg, Res, Prec, Op> Cordic<Arg, Res, Prec, Op>
where
    Arg: types::arg::State,
    Res: types::res::State,
    Prec: prec::State,
    Op: op::State,
{
    /// Configure the square root function with the argument width, result
    /// width and precision of the resulting type-states.
    ///
    /// *Note: The configuration is inferred from context because
    /// it is represented by generic type-states.*
    #[inline]
    pub fn freeze<NewArg, NewRes, NewPrec>(self) -> Cordic<NewArg, NewRes, NewPrec, op::Sqrt>
    where
        NewArg: types::arg::State,
        NewRes: types::res::State,
        NewPrec: prec::State,
    {
        let config = self.rb.csr().from_modify(|_, w| {
            w.func().variant(csr::FUNC::SquareRoot);
            w.nargs().variant(csr::NARGS::Num1);
            w.nres().variant(csr::NRES::Num1);
            // SAFETY: 0 is a valid scale
            unsafe { w.scale().bits(Scale::N0.bits()) };

            Config {
                arg: NewArg::set(w.argsize()),
                res: NewRes::set(w.ressize()),
                prec: NewPrec::set(w.precision()),
                op: op::Sqrt,
            }
        });

        log::debug!("cordic: sqrt, precision {}", NewPrec::BITS);

        Cordic {
            rb: self.rb,
            config,
            ready_polls: self.ready_polls,
        }
    }

    /// Number of ready flag polls [`Cordic::try_when_ready`] waits for.
    #[inline]
    pub fn with_ready_polls(mut self, polls: u32) -> Self {
        self.ready_polls = polls;
        self
    }

    /// Determine whether a result is pending or not.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.rb.csr().read().rrdy().bit_is_set()
    }

    /// Dispatch an operation once a result is
    /// pending.
    ///
    /// *Note: This employs the polling strategy.
    /// For less overhead, reading the result
    /// with `result()` will lock the core
    /// until a result is ready.*
    #[inline]
    pub fn when_ready<F, T>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut Self) -> T,
    {
        while !self.is_ready() {}

        f(self)
    }

    /// Like [`Cordic::when_ready`], but give up after the configured number
    /// of polls.
    #[inline]
    pub fn try_when_ready<F, T>(&mut self, f: F) -> Result<T, AccelError>
    where
        F: FnOnce(&mut Self) -> T,
    {
        let mut polls = self.ready_polls;
        while !self.is_ready() {
            if polls == 0 {
                return Err(AccelError::Timeout);
            }
            polls -= 1;
        }

        Ok(f(self))
    }

    /// Release the Cordic resource binding as a noop.
    ///
    /// # Safety
    ///
    /// The Cordic peripheral is not reset.
    #[inline]
    pub unsafe fn release(self) -> CORDIC {
        self.rb
    }

    /// Release the Cordic resource binding after reset.
    #[inline]
    pub fn release_and_reset(self, rcc: &RCC) -> CORDIC {
        self.rb.csr().reset();

        rcc.ahb1enr().modify(|_, w| w.cordicen().clear_bit());

        self.rb
    }
}

// square root
impl<Arg, Res, Prec> Cordic<Arg, Res, Prec, op::Sqrt>
where
    Arg: types::arg::State,
    Res: types::res::State,
    Prec: prec::State,
{
    /// Start a square root at the scale of the type-state.
    ///
    /// The argument must already be multiplied by `2^-n`.
    #[inline]
    pub fn start<S: scale::State>(&mut self, arg: <Arg as types::sealed::Tag>::Repr) {
        self.start_scaled(arg, S::SCALE);
    }

    /// Start a square root at a runtime selected scale.
    ///
    /// The argument must already be multiplied by `2^-n`.
    #[inline]
    pub fn start_scaled(&mut self, arg: <Arg as types::sealed::Tag>::Repr, scale: Scale) {
        use types::Ext as _;

        // SAFETY: 0..=2 are valid square root scales
        self.rb
            .csr()
            .modify(|_, w| unsafe { w.scale().bits(scale.bits()) });

        // SAFETY: all bits are valid
        self.rb
            .wdata()
            .write(|w| unsafe { w.arg().bits(arg.to_register()) });
    }

    /// Get the result of the pending square root, multiplied by `2^-n`.
    ///
    /// The bus is stalled until the result is ready.
    #[inline]
    pub fn result(&mut self) -> <Res as types::sealed::Tag>::Repr {
        use types::Ext as _;

        <Res as types::sealed::Tag>::Repr::from_register(self.rb.rdata().read().res().bits())
    }
}

impl<Prec> SqrtAccelerator for Cordic<types::Q31, types::Q31, Prec, op::Sqrt>
where
    Prec: prec::State,
{
    type Error = AccelError;

    fn sqrt_q31(&mut self, x: i32) -> Result<i32, AccelError> {
        if x < 0 {
            return Err(AccelError::Domain);
        }
        if x == 0 {
            return Ok(0);
        }

        let reduction = Reduction::for_argument(x);
        self.start_scaled(
            I1F31::from_bits(reduction.argument(x)),
            reduction.scale(),
        );

        let root = self.try_when_ready(|cordic| cordic.result())?;
        log::trace!(
            "cordic: {:?} sqrt {:#010x} -> {:#010x}",
            reduction,
            x,
            root.to_bits()
        );

        Ok(reduction.result(root.to_bits()))
    }
}
