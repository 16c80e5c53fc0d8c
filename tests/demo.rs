//! Host run of the whole demo against the exact integer square root.

use core::fmt::Write;

use cordic_sqrt::{
    accel::{AccelError, IntegerSqrt},
    console::Console,
    demo::{self, Platform, Session, CLEAR_SCREEN, RULE},
    time::U32Ext,
    Config, SqrtAccelerator,
};
use embedded_hal_nb::serial::{self, ErrorKind, ErrorType};

fn expected_output() -> String {
    let mut out = String::new();
    out.push_str(CLEAR_SCREEN);
    write!(out, "{RULE}\r\nXMC MCU: MATH SQRT example\r\n{RULE}\r\n\n").unwrap();
    out.push_str("Sqr_root_CORDIC_Q31 = 1073741824 \r\n");
    out.push_str("Sqr_root_CORDIC_float = 0.500\r\n");
    out.push_str("Sqr_root_Software_float = 0.500\r\n");
    out
}

/// Serial transmitter capturing every byte.
#[derive(Default)]
struct Wire(Vec<u8>);

impl ErrorType for Wire {
    type Error = ErrorKind;
}

impl serial::Write<u8> for Wire {
    fn write(&mut self, word: u8) -> nb::Result<(), ErrorKind> {
        self.0.push(word);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), ErrorKind> {
        Ok(())
    }
}

/// Host platform: the console is a captured serial line.
#[derive(Default)]
struct Host {
    up: bool,
    irq: bool,
}

#[derive(Debug, PartialEq)]
enum HostError {
    NotInitialized,
}

impl Platform for Host {
    type Error = HostError;
    type Console = Console<Wire>;
    type Accelerator = IntegerSqrt;

    fn init(&mut self, _: &Config) -> Result<(), HostError> {
        self.up = true;
        Ok(())
    }

    fn enable_interrupts(&mut self) {
        self.irq = true;
    }

    fn console(&mut self, config: &Config) -> Result<Console<Wire>, HostError> {
        if !self.up || !self.irq {
            return Err(HostError::NotInitialized);
        }
        assert_eq!(config.get_baudrate(), 115_200.bps());
        Ok(Console::new(Wire::default()))
    }

    fn accelerator(&mut self, _: &Config) -> Result<IntegerSqrt, HostError> {
        Ok(IntegerSqrt)
    }
}

#[test]
fn default_run_prints_the_reference_output() {
    let mut session = Session::new(String::new(), IntegerSqrt, Config::default());
    session.report().unwrap();

    let (out, _) = session.release();
    assert_eq!(out, expected_output());
}

#[test]
fn bring_up_then_report_over_serial() {
    let mut host = Host::default();
    let mut session = demo::bring_up(&mut host, Config::default()).unwrap();
    let report = session.report().unwrap();

    assert_eq!(report.cordic_q31, 1 << 30);
    assert!((report.cordic - report.software).abs() <= 1.0 / (1u32 << 30) as f32);

    let (console, _) = session.release();
    let wire = console.release();
    assert_eq!(String::from_utf8(wire.0).unwrap(), expected_output());
}

#[test]
fn results_agree_with_software_reference() {
    let mut rng = fastrand::Rng::with_seed(0x5157);
    for _ in 0..200 {
        let input = rng.f32();
        let mut session = Session::new(String::new(), IntegerSqrt, Config::new().input(input));
        let report = session.report().unwrap();

        // Q1.31 quantization of the input and the root
        assert!(
            (report.cordic - report.software).abs() < 1e-4,
            "sqrt({}): {} vs {}",
            input,
            report.cordic,
            report.software
        );
    }
}

#[test]
fn timeout_stops_the_report() {
    struct Dead;

    impl SqrtAccelerator for Dead {
        type Error = AccelError;

        fn sqrt_q31(&mut self, _: i32) -> Result<i32, AccelError> {
            Err(AccelError::Timeout)
        }
    }

    let mut session = Session::new(String::new(), Dead, Config::default());
    assert_eq!(
        session.report(),
        Err(demo::Error::Accelerator(AccelError::Timeout))
    );
    let (out, _) = session.release();
    assert!(out.ends_with("\r\n\n"));

    // the firmware path prints the failure after the banner
    let mut session = Session::new(String::new(), Dead, Config::default());
    assert!(session.execute().is_err());
    let (out, _) = session.release();
    assert!(out.ends_with("\r\n\nSqr_root_CORDIC failed: Accelerator(Timeout)\r\n"));
}
