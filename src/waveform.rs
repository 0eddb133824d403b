//! Breathing waveform table and per-channel animation state.

use crate::config::{PWM_RESOLUTION, WAVEFORM_LENGTH};

const WAVEFORM_MASK: u8 = (WAVEFORM_LENGTH - 1) as u8;

/// Brightness thresholds over one breathing cycle
///
/// Rises to full brightness, falls off slowly and ends in a flat dark tail,
/// so a channel that has finished its cycle is already off before it goes
/// idle. Values are duty-cycle thresholds in `0..=PWM_RESOLUTION`.
pub const WAVEFORM_VALUES: [u8; WAVEFORM_LENGTH] = [
    0, 2, 4, 8, 14, 22, 30, 40, //
    50, 60, 72, 82, 94, 102, 110, 118, //
    122, 126, 128, 126, 126, 122, 118, 114, //
    108, 102, 96, 88, 82, 74, 68, 60, //
    54, 48, 42, 38, 34, 28, 26, 22, //
    18, 16, 14, 12, 10, 8, 6, 5, //
    4, 3, 2, 2, 1, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, //
];

const _: () = {
    let mut i = 0;
    while i < WAVEFORM_LENGTH {
        assert!(WAVEFORM_VALUES[i] as usize <= PWM_RESOLUTION);
        i += 1;
    }
    assert!(WAVEFORM_VALUES[0] == 0, "idle channels must stay dark");
};

/// Threshold at `index`, wrapped into the table
#[inline]
pub const fn threshold(index: u8) -> u8 {
    WAVEFORM_VALUES[(index & WAVEFORM_MASK) as usize]
}

/// Animation state of a single LED channel
///
/// The waveform index only moves while the channel is active. When it wraps
/// past the end of the table the channel goes idle again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelState {
    waveform_index: u8,
    active: bool,
}

impl ChannelState {
    /// Idle channel at the start of the table
    pub const IDLE: Self = Self {
        waveform_index: 0,
        active: false,
    };

    /// Position in the waveform table
    pub const fn waveform_index(&self) -> u8 {
        self.waveform_index
    }

    /// Whether the waveform index is advancing
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Mark the channel as animating
    ///
    /// Activating an already active channel changes nothing.
    pub const fn activate(&mut self) {
        self.active = true;
    }

    /// Move one step along the waveform
    ///
    /// Does nothing for an idle channel. Returns `true` when the step wrapped
    /// the index to zero, i.e. the breathing cycle is complete and the
    /// channel has gone idle.
    pub const fn advance(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.waveform_index = (self.waveform_index + 1) & WAVEFORM_MASK;
        if self.waveform_index == 0 {
            self.active = false;
            return true;
        }
        false
    }

    /// Current brightness threshold
    #[inline]
    pub const fn threshold(&self) -> u8 {
        threshold(self.waveform_index)
    }

    /// Whether the channel is lit at duty-cycle position `duty`
    #[inline]
    pub const fn is_on(&self, duty: u8) -> bool {
        duty < self.threshold()
    }
}
