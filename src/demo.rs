//! The square root demo.
//!
//! One run goes through three states and never comes back:
//!
//! 1. bring-up: platform init, interrupts, console,
//! 2. compute and report: CORDIC square root and software reference,
//! 3. idle.
//!
//! Output on the console, lines terminated by `\r\n`:
//!
//! ```text
//! ===============================================================
//! XMC MCU: MATH SQRT example
//! ===============================================================
//!
//! Sqr_root_CORDIC_Q31 = 1073741824
//! Sqr_root_CORDIC_float = 0.500
//! Sqr_root_Software_float = 0.500
//! ```

use core::fmt;

use crate::{
    accel::{software_sqrt, SqrtAccelerator},
    config::{Config, STRING_BUF_SIZE},
    decimal::float_to_string,
    q::{self, RangeError},
};

/// ANSI escape sequence clearing the terminal and homing the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[;H";
pub const RULE: &str = "===============================================================";
pub const TITLE: &str = "XMC MCU: MATH SQRT example";

/// Everything the demo needs from the hardware.
pub trait Platform {
    type Error: fmt::Debug;
    type Console: fmt::Write;
    type Accelerator: SqrtAccelerator;

    /// Device and board bring-up.
    fn init(&mut self, config: &Config) -> Result<(), Self::Error>;

    /// Enable interrupt delivery at the processor level.
    fn enable_interrupts(&mut self);

    /// Set up the text output.
    fn console(&mut self, config: &Config) -> Result<Self::Console, Self::Error>;

    /// Hand out the square root accelerator.
    fn accelerator(&mut self, config: &Config) -> Result<Self::Accelerator, Self::Error>;
}

/// Demo error
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error<E> {
    /// The input does not fit in Q1.31
    Range(RangeError),
    /// The accelerator failed
    Accelerator(E),
    /// Writing to the console failed
    Console,
}

impl<E> From<fmt::Error> for Error<E> {
    fn from(_: fmt::Error) -> Self {
        Error::Console
    }
}

impl<E> From<RangeError> for Error<E> {
    fn from(e: RangeError) -> Self {
        Error::Range(e)
    }
}

/// Values produced by one run.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    pub input: f32,
    pub input_q31: i32,
    pub cordic_q31: i32,
    pub cordic: f32,
    pub software: f32,
}

/// A brought up platform: console and accelerator ready to use.
pub struct Session<C, A> {
    console: C,
    accel: A,
    config: Config,
}

/// Initialize the platform, enable interrupts and open the console, in that
/// order.
pub fn bring_up<P>(
    platform: &mut P,
    config: Config,
) -> Result<Session<P::Console, P::Accelerator>, P::Error>
where
    P: Platform,
{
    platform.init(&config)?;
    log::debug!("platform up");

    platform.enable_interrupts();

    let console = platform.console(&config)?;
    let accel = platform.accelerator(&config)?;

    Ok(Session::new(console, accel, config))
}

impl<C, A> Session<C, A>
where
    C: fmt::Write,
    A: SqrtAccelerator,
{
    pub fn new(console: C, accel: A, config: Config) -> Self {
        Session {
            console,
            accel,
            config,
        }
    }

    /// Clear the terminal and print the header.
    pub fn banner(&mut self) -> fmt::Result {
        self.console.write_str(CLEAR_SCREEN)?;
        write!(self.console, "{}\r\n", RULE)?;
        write!(self.console, "{}\r\n", TITLE)?;
        write!(self.console, "{}\r\n\n", RULE)
    }

    /// Print the banner, then compute and print the accelerator result and
    /// the software reference.
    pub fn report(&mut self) -> Result<Report, Error<A::Error>> {
        self.banner()?;

        let input = self.config.input;
        let input_q31 = q::try_float_to_q31(input)?;
        log::debug!("sqrt of {:#010x}", input_q31);

        let cordic_q31 = self
            .accel
            .sqrt_q31(input_q31)
            .map_err(Error::Accelerator)?;
        write!(self.console, "Sqr_root_CORDIC_Q31 = {} \r\n", cordic_q31)?;

        let mut buf = [0u8; STRING_BUF_SIZE];
        let buf = &mut buf[..self.config.buffer_size];

        let cordic = q::q31_to_float(cordic_q31);
        write!(
            self.console,
            "Sqr_root_CORDIC_float = {}\r\n",
            float_to_string(buf, cordic)
        )?;

        let software = software_sqrt(input);
        write!(
            self.console,
            "Sqr_root_Software_float = {}\r\n",
            float_to_string(buf, software)
        )?;

        Ok(Report {
            input,
            input_q31,
            cordic_q31,
            cordic,
            software,
        })
    }

    /// Print a failed run on the console.
    pub fn error(&mut self, error: &Error<A::Error>) -> fmt::Result {
        write!(self.console, "Sqr_root_CORDIC failed: {:?}\r\n", error)
    }

    /// [`Session::report`], with a failure also printed on the console.
    pub fn execute(&mut self) -> Result<Report, Error<A::Error>> {
        match self.report() {
            Ok(report) => {
                log::info!(
                    "sqrt({}) = {} (software {})",
                    report.input,
                    report.cordic,
                    report.software
                );
                Ok(report)
            }
            Err(e) => {
                log::error!("sqrt demo failed: {:?}", e);
                // the console itself may be what failed
                let _ = self.error(&e);
                Err(e)
            }
        }
    }

    pub fn release(self) -> (C, A) {
        (self.console, self.accel)
    }
}

/// Run the demo and idle forever.
///
/// # Panics
///
/// When the platform cannot be brought up. There is no console to report to
/// at that point.
pub fn run<P: Platform>(mut platform: P, config: Config) -> ! {
    let mut session = match bring_up(&mut platform, config) {
        Ok(session) => session,
        Err(e) => panic!("platform init failed: {:?}", e),
    };

    let _ = session.execute();

    idle()
}

fn idle() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
