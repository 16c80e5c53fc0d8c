//! NUCLEO-G474RE support.
//!
//! The board runs from HSI16, the clock source after reset. USART2 on PA2
//! (AF7) is connected to the ST-LINK virtual COM port and only transmits.

use embedded_hal_nb::serial::{self, ErrorKind, ErrorType};

use crate::{
    config::Config,
    console::{usart_divisor, Console},
    cordic::{op, prec::P60, types::Q31, Cordic, Ext as _},
    demo::Platform,
    stm32::{self, CORDIC, RCC, USART2},
    time::{cycles, Hertz},
};

/// System and APB clock.
pub const HSI_FREQ: Hertz = Hertz::MHz(16);

const ISR_TC: u32 = 1 << 6;
const ISR_TXE: u32 = 1 << 7;
const CR1_UE: u32 = 1 << 0;
const CR1_TE: u32 = 1 << 3;

/// Board error
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Device peripherals were taken before
    PeripheralsTaken,
    /// The console baudrate is not reachable from HSI16
    InvalidConfig,
    /// Used before `init` or handed out twice
    NotAvailable,
}

/// USART2 transmitter.
pub struct Tx {
    usart: USART2,
}

impl ErrorType for Tx {
    type Error = ErrorKind;
}

impl serial::Write<u8> for Tx {
    fn write(&mut self, word: u8) -> nb::Result<(), ErrorKind> {
        if self.usart.isr().read().bits() & ISR_TXE == 0 {
            return Err(nb::Error::WouldBlock);
        }

        // SAFETY: any 8 bit value is valid data
        self.usart.tdr().write(|w| unsafe { w.bits(word as u32) });
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), ErrorKind> {
        if self.usart.isr().read().bits() & ISR_TC == 0 {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }
}

pub type Accelerator = Cordic<Q31, Q31, P60, op::Sqrt>;

/// NUCLEO-G474RE as seen by the demo.
#[derive(Default)]
pub struct Nucleo {
    rcc: Option<RCC>,
    usart2: Option<USART2>,
    cordic: Option<CORDIC>,
}

impl Nucleo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Platform for Nucleo {
    type Error = Error;
    type Console = Console<Tx>;
    type Accelerator = Accelerator;

    fn init(&mut self, _config: &Config) -> Result<(), Error> {
        let dp = stm32::Peripherals::take().ok_or(Error::PeripheralsTaken)?;

        dp.RCC.ahb2enr().modify(|_, w| w.gpioaen().set_bit());
        dp.RCC.apb1enr1().modify(|_, w| w.usart2en().set_bit());

        // PA2: alternate function 7, USART2_TX
        // SAFETY: only the PA2 bits are changed
        dp.GPIOA
            .moder()
            .modify(|r, w| unsafe { w.bits((r.bits() & !(0b11 << 4)) | (0b10 << 4)) });
        dp.GPIOA
            .afrl()
            .modify(|r, w| unsafe { w.bits((r.bits() & !(0xf << 8)) | (7 << 8)) });

        self.rcc = Some(dp.RCC);
        self.usart2 = Some(dp.USART2);
        self.cordic = Some(dp.CORDIC);

        Ok(())
    }

    fn enable_interrupts(&mut self) {
        // SAFETY: no interrupt handlers share state with the demo
        unsafe { cortex_m::interrupt::enable() };
    }

    fn console(&mut self, config: &Config) -> Result<Console<Tx>, Error> {
        let div = usart_divisor(HSI_FREQ, config.get_baudrate())
            .map_err(|_| Error::InvalidConfig)?;
        let usart = self.usart2.take().ok_or(Error::NotAvailable)?;

        // SAFETY: div is at least 16, 8N1 and 16x oversampling are the reset values
        usart.brr().write(|w| unsafe { w.bits(div) });
        usart.cr1().write(|w| unsafe { w.bits(CR1_UE | CR1_TE) });

        Ok(Console::new(Tx { usart }))
    }

    fn accelerator(&mut self, config: &Config) -> Result<Accelerator, Error> {
        let rcc = self.rcc.as_ref().ok_or(Error::NotAvailable)?;
        let cordic = self.cordic.take().ok_or(Error::NotAvailable)?;

        // one ready poll takes at least one cycle
        let polls = cycles(config.get_ready_timeout(), HSI_FREQ);

        Ok(cordic
            .constrain(rcc)
            .freeze::<Q31, Q31, P60>()
            .with_ready_polls(polls))
    }
}
