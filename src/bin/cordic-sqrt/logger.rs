cfg_if::cfg_if! {
    if #[cfg(feature = "log-rtt")] {
        use defmt_rtt as _; // global logger
        use panic_probe as _;

        #[allow(unused_imports)]
        pub use defmt::{info, debug, error};

        pub fn init() {}
    } else {
        use panic_halt as _;

        #[allow(unused_imports)]
        pub use log::{info, debug, error};

        pub fn init() {}
    }
}
