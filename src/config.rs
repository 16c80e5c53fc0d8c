//! Demo configuration
use crate::time::{Bps, MicroSecond};

/// Value the demo takes the square root of.
pub const INPUT: f32 = 0.25;

/// Size of the buffer the results are rendered into.
pub const STRING_BUF_SIZE: usize = 32;

/// Demo configuration
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub(crate) input: f32,
    pub(crate) buffer_size: usize,
    pub(crate) ready_timeout: MicroSecond,
    pub(crate) baudrate: Bps,
}

impl Config {
    pub const fn new() -> Self {
        Config {
            input: INPUT,
            buffer_size: STRING_BUF_SIZE,
            ready_timeout: MicroSecond::from_ticks(100),
            baudrate: Bps(115_200),
        }
    }

    /// Argument of the square root.
    pub const fn input(mut self, input: f32) -> Self {
        self.input = input;
        self
    }

    /// Bytes available to each rendered result, capped at
    /// [`STRING_BUF_SIZE`].
    pub const fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = if size > STRING_BUF_SIZE {
            STRING_BUF_SIZE
        } else {
            size
        };
        self
    }

    /// How long to wait for the accelerator before giving up.
    pub const fn ready_timeout(mut self, timeout: MicroSecond) -> Self {
        self.ready_timeout = timeout;
        self
    }

    /// Console baudrate.
    pub const fn baudrate(mut self, baudrate: Bps) -> Self {
        self.baudrate = baudrate;
        self
    }

    pub fn get_input(&self) -> f32 {
        self.input
    }

    pub fn get_buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn get_ready_timeout(&self) -> MicroSecond {
        self.ready_timeout
    }

    pub fn get_baudrate(&self) -> Bps {
        self.baudrate
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}
