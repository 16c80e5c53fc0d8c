//! Text output over a byte oriented serial transmitter.
use core::fmt;

use embedded_hal_nb::serial;
use nb::block;

use crate::time::{Bps, Hertz};

/// The baudrate cannot be derived from the kernel clock.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidConfig;

/// `BRR` value for a U(S)ART clocked at `clk` with 16x oversampling.
pub fn usart_divisor(clk: Hertz, baudrate: Bps) -> Result<u32, InvalidConfig> {
    let div = clk.raw() / baudrate.0;
    if div < 16 {
        // We need 16x oversampling.
        return Err(InvalidConfig);
    }
    Ok(div)
}

/// `fmt::Write` adapter for any blocking capable serial transmitter.
pub struct Console<TX> {
    tx: TX,
}

impl<TX> Console<TX>
where
    TX: serial::Write<u8>,
{
    pub fn new(tx: TX) -> Self {
        Console { tx }
    }

    /// Block until everything written so far has left the transmitter.
    pub fn flush(&mut self) -> Result<(), TX::Error> {
        block!(self.tx.flush())
    }

    pub fn release(self) -> TX {
        self.tx
    }
}

impl<TX> fmt::Write for Console<TX>
where
    TX: serial::Write<u8>,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            block!(self.tx.write(byte)).map_err(|_| fmt::Error)?;
        }
        Ok(())
    }
}
