#![no_std]

pub mod config;
pub mod counter;
pub mod engine;
pub mod random;
pub mod tick;
pub mod waveform;

pub use config::{
    ACTIVE_MASK, ConfigError, DEFAULT_SEED, DEFAULT_TICK_PERIOD, EngineConfig, MAX_CHANNELS,
    PRNG_UPDATE_COUNT, PWM_RESOLUTION, Timings, WAVEFORM_LENGTH, WAVEFORM_UPDATE_COUNT,
};
pub use counter::WrapCounter;
pub use engine::BreathingEngine;
pub use random::XorShiftRng;
pub use tick::TickSignal;
pub use waveform::{ChannelState, WAVEFORM_VALUES};

pub use embassy_time::Duration;

/// Abstract LED output trait
///
/// Implement this trait to latch channel states into hardware, e.g. a
/// shift-register LED driver on a serial bus. Bit `i` of `value` is
/// channel `i`, set means lit.
pub trait OutputDriver {
    /// Error reported by the hardware
    type Error;

    /// Write the channel states
    fn write(&mut self, value: u8) -> Result<(), Self::Error>;
}
