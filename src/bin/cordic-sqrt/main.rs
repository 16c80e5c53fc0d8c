//! Square root of 0.25 on the CORDIC co-processor, reported on the ST-LINK
//! virtual COM port at 115200 8N1.
#![deny(warnings)]
#![deny(unsafe_code)]
#![no_main]
#![no_std]

use cordic_sqrt::{board::Nucleo, demo, Config};
use cortex_m_rt::entry;

mod logger;

use logger::info;

#[entry]
fn main() -> ! {
    logger::init();

    info!("start");
    demo::run(Nucleo::new(), Config::default())
}
