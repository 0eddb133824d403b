use core::convert::Infallible;

#[cfg(feature = "esp32-log")]
use esp_println::println;
use rand_core::{RngCore, SeedableRng};

use crate::OutputDriver;
use crate::config::{ConfigError, EngineConfig, MAX_CHANNELS};
use crate::counter::WrapCounter;
use crate::random::{XorShiftRng, draw_byte};
use crate::tick::TickSignal;
use crate::waveform::ChannelState;

/// Breathing engine - turns duty-cycle ticks into LED output bytes
///
/// Owns the per-channel animation state, the waveform and activation
/// counters, and the output driver. `CHANNELS` is 2, 4 or 8; bit `i` of every
/// output byte is channel `i`.
pub struct BreathingEngine<
    O: OutputDriver,
    R = XorShiftRng,
    const CHANNELS: usize = { MAX_CHANNELS },
> {
    // External dependencies
    driver: O,
    rng: R,
    activation_mask: u8,

    // Internal state
    channels: [ChannelState; CHANNELS],
    waveform_counter: WrapCounter,
    prng_counter: WrapCounter,
    output: u8,
}

impl<O, R, const CHANNELS: usize> BreathingEngine<O, R, CHANNELS>
where
    O: OutputDriver,
    R: RngCore + SeedableRng,
{
    const VALID_CHANNELS: () = assert!(
        CHANNELS == 2 || CHANNELS == 4 || CHANNELS == 8,
        "breathing engine drives 2, 4 or 8 channels"
    );

    /// Create an engine with the default cadences, seeding the random source
    /// with `seed`.
    ///
    /// All channels start idle and every counter at zero, so the first
    /// output is all LEDs off.
    pub fn init(driver: O, seed: u64) -> Self {
        let () = Self::VALID_CHANNELS;
        let config = EngineConfig::default().with_seed(seed);
        #[cfg(feature = "esp32-log")]
        println!("[BreathingEngine.init] {} channels, seed {}", CHANNELS, seed);

        Self::build(driver, R::seed_from_u64(seed), &config)
    }

    /// Create an engine from a custom configuration
    pub fn with_config(driver: O, config: &EngineConfig) -> Result<Self, ConfigError> {
        let () = Self::VALID_CHANNELS;
        config.validate(CHANNELS)?;
        #[cfg(feature = "esp32-log")]
        println!("[BreathingEngine.with_config] {} channels, {:?}", CHANNELS, config);

        Ok(Self::build(driver, R::seed_from_u64(config.seed), config))
    }

    fn build(driver: O, rng: R, config: &EngineConfig) -> Self {
        Self {
            driver,
            rng,
            activation_mask: config.activation_mask,
            channels: [ChannelState::IDLE; CHANNELS],
            waveform_counter: WrapCounter::with_period(config.waveform_update_count),
            prng_counter: WrapCounter::with_period(config.prng_update_count),
            output: 0,
        }
    }
}

impl<O, R, const CHANNELS: usize> BreathingEngine<O, R, CHANNELS>
where
    O: OutputDriver,
    R: RngCore,
{
    /// Process one tick
    ///
    /// `duty` is the duty-cycle snapshot taken from the tick signal. On the
    /// period boundary (`duty == 0`) the waveform and activation counters
    /// advance first. Then the output byte is composed and written.
    ///
    /// Returns the byte written, or the driver error. A failed write is not
    /// retried; the next tick writes a fresh byte anyway.
    pub fn step(&mut self, duty: u8) -> Result<u8, O::Error> {
        if duty == 0 {
            self.on_period_boundary();
        }

        let value = self.compose(duty);
        self.output = value;
        if let Err(err) = self.driver.write(value) {
            #[cfg(feature = "esp32-log")]
            println!("[BreathingEngine.step] output write failed at duty {}", duty);
            return Err(err);
        }
        Ok(value)
    }

    /// Process the pending tick, if any
    ///
    /// Non-blocking. Returns `Ok(None)` if no tick is pending.
    pub fn poll(&mut self, ticks: &TickSignal) -> Result<Option<u8>, O::Error> {
        match ticks.try_take() {
            Some(duty) => self.step(duty).map(Some),
            None => Ok(None),
        }
    }

    /// Run the animation forever, spinning between ticks
    ///
    /// Only returns if the output driver fails.
    pub fn run_loop(&mut self, ticks: &TickSignal) -> Result<Infallible, O::Error> {
        loop {
            let Some(duty) = ticks.try_take() else {
                core::hint::spin_loop();
                continue;
            };
            self.step(duty)?;
        }
    }

    /// Run the animation forever, suspending between ticks
    ///
    /// Only returns if the output driver fails.
    pub async fn run(&mut self, ticks: &TickSignal) -> Result<Infallible, O::Error> {
        loop {
            let duty = ticks.wait().await;
            self.step(duty)?;
        }
    }

    /// Compose the output byte for duty-cycle position `duty`
    pub fn compose(&self, duty: u8) -> u8 {
        self.channels
            .iter()
            .enumerate()
            .filter(|(_, channel)| channel.is_on(duty))
            .fold(0, |acc, (i, _)| acc | (1u8 << i))
    }

    /// Force a channel to start its breathing cycle
    ///
    /// Returns `false` if `index` is not a channel of this engine.
    pub fn activate(&mut self, index: usize) -> bool {
        let Some(channel) = self.channels.get_mut(index) else {
            return false;
        };
        channel.activate();
        true
    }

    /// Advance the counter cascade at the start of a PWM period
    ///
    /// Both counters count PWM periods. When both wrap in the same period the
    /// draw comes first, so a freshly activated channel steps right away.
    fn on_period_boundary(&mut self) {
        let waveform_wrapped = self.waveform_counter.advance();
        if self.prng_counter.advance() {
            self.draw_activation();
        }
        if waveform_wrapped {
            self.advance_waveforms();
        }
    }

    /// Activate the channel picked by one random draw, if any
    ///
    /// Only an exact index match activates, so with a mask wider than the
    /// channel range a draw may pick nothing.
    fn draw_activation(&mut self) {
        let candidate = usize::from(draw_byte(&mut self.rng) & self.activation_mask);
        if let Some(channel) = self.channels.get_mut(candidate) {
            #[cfg(feature = "esp32-log")]
            println!("[BreathingEngine.draw_activation] activating channel {}", candidate);
            channel.activate();
        }
    }

    #[cfg_attr(not(feature = "esp32-log"), allow(unused_variables))]
    fn advance_waveforms(&mut self) {
        for (index, channel) in self.channels.iter_mut().enumerate() {
            if channel.advance() {
                #[cfg(feature = "esp32-log")]
                println!("[BreathingEngine.advance_waveforms] channel {} finished", index);
            }
        }
    }
}

impl<O: OutputDriver, R, const CHANNELS: usize> BreathingEngine<O, R, CHANNELS> {
    /// State of channel `index`
    pub fn channel(&self, index: usize) -> Option<ChannelState> {
        self.channels.get(index).copied()
    }

    /// State of all channels
    pub fn channels(&self) -> [ChannelState; CHANNELS] {
        self.channels
    }

    /// Bitmask of the channels currently animating
    pub fn active_mask(&self) -> u8 {
        self.channels
            .iter()
            .enumerate()
            .filter(|(_, channel)| channel.is_active())
            .fold(0, |acc, (i, _)| acc | (1u8 << i))
    }

    /// Position of the waveform-update counter
    pub fn waveform_counter(&self) -> u8 {
        self.waveform_counter.value()
    }

    /// Position of the activation counter
    pub fn prng_counter(&self) -> u8 {
        self.prng_counter.value()
    }

    /// Last byte handed to the output driver
    pub fn output(&self) -> u8 {
        self.output
    }

    /// Get a reference to the output driver.
    pub fn driver(&self) -> &O {
        &self.driver
    }

    /// Get a mutable reference to the output driver.
    pub fn driver_mut(&mut self) -> &mut O {
        &mut self.driver
    }

    /// Tear the engine down and return the output driver
    pub fn into_driver(self) -> O {
        self.driver
    }
}
