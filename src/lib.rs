#![no_std]

//! Square root on the STM32G4 CORDIC co-processor.
//!
//! The crate converts a value to Q1.31, hands it to a [`SqrtAccelerator`],
//! converts the result back and prints it next to a software `sqrtf`
//! reference. The codec, the formatter and the demo driver build on any
//! target; the hardware backend needs exactly one chip feature:
//!
//! ```text
//! stm32g431 stm32g441 stm32g473 stm32g474
//! stm32g483 stm32g484 stm32g491 stm32g4a1
//! ```

#[cfg(all(
    feature = "device-selected",
    not(any(
        feature = "stm32g431",
        feature = "stm32g441",
        feature = "stm32g473",
        feature = "stm32g474",
        feature = "stm32g483",
        feature = "stm32g484",
        feature = "stm32g491",
        feature = "stm32g4a1"
    ))
))]
compile_error!(
    "The hardware backend requires one of the following features enabled:
        stm32g431
        stm32g441
        stm32g473
        stm32g474
        stm32g483
        stm32g484
        stm32g491
        stm32g4a1"
);

#[cfg(feature = "device-selected")]
pub extern crate cortex_m;
pub extern crate nb;
#[cfg(feature = "device-selected")]
pub extern crate stm32g4;

pub use nb::block;

#[cfg(feature = "stm32g431")]
pub use stm32g4::stm32g431 as stm32;

#[cfg(feature = "stm32g441")]
pub use stm32g4::stm32g441 as stm32;

#[cfg(feature = "stm32g473")]
pub use stm32g4::stm32g473 as stm32;

#[cfg(feature = "stm32g474")]
pub use stm32g4::stm32g474 as stm32;

#[cfg(feature = "stm32g483")]
pub use stm32g4::stm32g483 as stm32;

#[cfg(feature = "stm32g484")]
pub use stm32g4::stm32g484 as stm32;

#[cfg(feature = "stm32g491")]
pub use stm32g4::stm32g491 as stm32;

#[cfg(feature = "stm32g4a1")]
pub use stm32g4::stm32g4a1 as stm32;

#[cfg(feature = "device-selected")]
pub use stm32 as pac;

pub mod accel;
#[cfg(feature = "device-selected")]
pub mod board;
pub mod config;
pub mod console;
pub mod cordic;
pub mod decimal;
pub mod demo;
pub mod q;
pub mod time;

pub use accel::{AccelError, SqrtAccelerator};
pub use config::Config;
