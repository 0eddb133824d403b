//! Modular counters with power-of-two periods.
//!
//! Every timing layer of the engine (PWM period, waveform step, activation
//! draw) is a counter that wraps through a bitmask. The cascade only cares
//! about the moment a counter wraps back to zero.

use crate::config::ConfigError;

/// Check if `value` is a non-zero power of two
#[inline]
pub const fn is_power_of_two(value: u8) -> bool {
    value != 0 && value & (value - 1) == 0
}

/// Counter wrapping at a power-of-two period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapCounter {
    value: u8,
    mask: u8,
}

impl WrapCounter {
    /// Create a counter starting at zero
    ///
    /// `period` must be a power of two in `1..=128`.
    pub const fn new(period: u8) -> Result<Self, ConfigError> {
        if !is_power_of_two(period) {
            return Err(ConfigError::NotPowerOfTwo(period));
        }
        Ok(Self::with_period(period))
    }

    /// Create a counter for a period already checked to be a power of two
    pub(crate) const fn with_period(period: u8) -> Self {
        debug_assert!(is_power_of_two(period));
        Self {
            value: 0,
            mask: period.wrapping_sub(1),
        }
    }

    /// Increment the counter
    ///
    /// Returns `true` if the counter wrapped back to zero.
    #[inline]
    pub const fn advance(&mut self) -> bool {
        self.value = self.value.wrapping_add(1) & self.mask;
        self.value == 0
    }

    /// Current value, always in `0..period`
    #[inline]
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Number of steps in one wrap
    pub const fn period(&self) -> u8 {
        self.mask + 1
    }

    /// Check if the counter sits on the boundary
    pub const fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Reset the counter to zero
    pub const fn reset(&mut self) {
        self.value = 0;
    }
}
