//! Engine constants, runtime configuration and the derived timing hierarchy.
//!
//! ```text
//! tick              = 125us
//! PWM period        = 128 ticks           = 16ms
//! waveform step     = 2 PWM periods       = 32ms
//! waveform rollover = 64 waveform steps   = 2.048s
//! activation draw   = 64 PWM periods      = 1.024s
//! ```

use embassy_time::Duration;

use crate::counter::is_power_of_two;

/// Number of duty-cycle steps in one PWM period
pub const PWM_RESOLUTION: usize = 128;

/// Number of entries in the breathing waveform
pub const WAVEFORM_LENGTH: usize = 64;

/// PWM periods per waveform step
pub const WAVEFORM_UPDATE_COUNT: u8 = 2;

/// PWM periods per activation draw
pub const PRNG_UPDATE_COUNT: u8 = 64;

/// Mask applied to a random byte to pick a candidate channel
pub const ACTIVE_MASK: u8 = 0x1F;

/// Seed used when the host does not provide one
pub const DEFAULT_SEED: u64 = 1;

/// Width of the output byte
pub const MAX_CHANNELS: usize = 8;

/// Timer period of the reference board (1 MHz clock, /8 prescaler, compare 125)
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_micros(125);

/// Mask applied to the duty-cycle counter
pub(crate) const PWM_MASK: u8 = (PWM_RESOLUTION - 1) as u8;

const _: () = {
    assert!(PWM_RESOLUTION.is_power_of_two() && PWM_RESOLUTION <= 128);
    assert!(WAVEFORM_LENGTH.is_power_of_two() && WAVEFORM_LENGTH <= 128);
    assert!(is_power_of_two(WAVEFORM_UPDATE_COUNT));
    assert!(is_power_of_two(PRNG_UPDATE_COUNT));
};

/// Configuration error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A counter period is zero or not a power of two
    NotPowerOfTwo(u8),
    /// The activation mask cannot produce every channel index
    MaskTooNarrow { mask: u8, channels: usize },
}

/// Configuration for the breathing engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed of the activation random source
    pub seed: u64,
    /// PWM periods per waveform step, power of two
    pub waveform_update_count: u8,
    /// PWM periods per activation draw, power of two
    pub prng_update_count: u8,
    /// Mask turning a random byte into a candidate channel
    pub activation_mask: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            waveform_update_count: WAVEFORM_UPDATE_COUNT,
            prng_update_count: PRNG_UPDATE_COUNT,
            activation_mask: ACTIVE_MASK,
        }
    }
}

impl EngineConfig {
    /// Set the activation seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the PWM periods per waveform step
    #[must_use]
    pub const fn with_waveform_update_count(mut self, count: u8) -> Self {
        self.waveform_update_count = count;
        self
    }

    /// Set the PWM periods per activation draw
    #[must_use]
    pub const fn with_prng_update_count(mut self, count: u8) -> Self {
        self.prng_update_count = count;
        self
    }

    /// Set the candidate channel mask
    #[must_use]
    pub const fn with_activation_mask(mut self, mask: u8) -> Self {
        self.activation_mask = mask;
        self
    }

    /// Check the configuration for an engine driving `channels` LEDs
    pub const fn validate(&self, channels: usize) -> Result<(), ConfigError> {
        if !is_power_of_two(self.waveform_update_count) {
            return Err(ConfigError::NotPowerOfTwo(self.waveform_update_count));
        }
        if !is_power_of_two(self.prng_update_count) {
            return Err(ConfigError::NotPowerOfTwo(self.prng_update_count));
        }
        // Every index below `channels` must survive the mask unchanged
        #[allow(clippy::cast_possible_truncation)]
        let highest = channels.saturating_sub(1) as u8;
        if highest & self.activation_mask != highest {
            return Err(ConfigError::MaskTooNarrow {
                mask: self.activation_mask,
                channels,
            });
        }
        Ok(())
    }
}

/// Real-time durations of each layer of the timing hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// One duty-cycle step
    pub tick: Duration,
    /// One full duty-cycle sweep
    pub pwm_period: Duration,
    /// Time between two waveform index steps
    pub waveform_step: Duration,
    /// Length of a complete breathing cycle
    pub waveform_rollover: Duration,
    /// Time between two activation draws
    pub activation_interval: Duration,
}

impl Timings {
    /// Derive the hierarchy from the timer period and a configuration
    #[allow(clippy::cast_lossless)]
    pub const fn from_config(tick: Duration, config: &EngineConfig) -> Self {
        let pwm_period = scale(tick, PWM_RESOLUTION as u64);
        let waveform_step = scale(pwm_period, config.waveform_update_count as u64);
        Self {
            tick,
            pwm_period,
            waveform_step,
            waveform_rollover: scale(waveform_step, WAVEFORM_LENGTH as u64),
            activation_interval: scale(pwm_period, config.prng_update_count as u64),
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self::from_config(DEFAULT_TICK_PERIOD, &EngineConfig::default())
    }
}

const fn scale(duration: Duration, factor: u64) -> Duration {
    Duration::from_ticks(duration.as_ticks() * factor)
}
