pub use fugit::{ExtU32, HertzU32 as Hertz, MicrosDurationU32 as MicroSecond, RateExtU32};

/// Baudrate
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Eq, PartialEq, PartialOrd, Clone, Copy)]
pub struct Bps(pub u32);

pub trait U32Ext {
    /// Wrap in `Bps`
    fn bps(self) -> Bps;
}

impl U32Ext for u32 {
    fn bps(self) -> Bps {
        assert!(self > 0);
        Bps(self)
    }
}

/// Number of `clk` cycles that fit in `timeout`, saturating at `u32::MAX`.
pub fn cycles(timeout: MicroSecond, clk: Hertz) -> u32 {
    let cycles = (clk.raw() as u64).saturating_mul(timeout.ticks() as u64) / 1_000_000;
    cycles.min(u32::MAX as u64) as u32
}
