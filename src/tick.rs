//! Tick handoff between the timer interrupt and the animation loop.
//!
//! The timer interrupt owns the duty-cycle counter and raises a single-slot
//! ready signal once per tick. The signal carries the counter snapshot, so the
//! foreground loop reads the counter and clears the flag in a single take. If
//! the loop falls behind, pending ticks collapse into the newest one and
//! nothing is queued.

use core::cell::Cell;

use critical_section::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::config::PWM_MASK;

/// Duty-cycle counter shared with the tick interrupt.
///
/// Both sides go through critical sections, so the counter and the ready
/// signal stay consistent on targets without atomic read-modify-write.
///
/// # Usage
///
/// ```ignore
/// static TICKS: TickSignal = TickSignal::new();
///
/// #[interrupt]
/// fn TIM1_COMPA() {
///     TICKS.on_tick();
/// }
/// ```
pub struct TickSignal {
    counter: Mutex<Cell<u8>>,
    ready: Signal<CriticalSectionRawMutex, u8>,
}

impl TickSignal {
    /// Create a signal with the counter at zero and no tick pending
    pub const fn new() -> Self {
        Self {
            counter: Mutex::new(Cell::new(0)),
            ready: Signal::new(),
        }
    }

    /// Advance the duty-cycle counter and mark a new tick as ready.
    ///
    /// Meant to be called from the timer interrupt. Never blocks; an
    /// unconsumed tick is overwritten.
    pub fn on_tick(&self) {
        let duty = critical_section::with(|cs| {
            let counter = self.counter.borrow(cs);
            let next = counter.get().wrapping_add(1) & PWM_MASK;
            counter.set(next);
            next
        });
        self.ready.signal(duty);
    }

    /// Take the pending tick, if any.
    ///
    /// Returns the duty-cycle snapshot and clears the ready flag.
    pub fn try_take(&self) -> Option<u8> {
        self.ready.try_take()
    }

    /// Wait for the next tick and take it
    pub async fn wait(&self) -> u8 {
        self.ready.wait().await
    }

    /// Check if a tick is waiting to be consumed
    pub fn is_pending(&self) -> bool {
        self.ready.signaled()
    }

    /// Current duty-cycle counter value
    pub fn duty_cycle(&self) -> u8 {
        critical_section::with(|cs| self.counter.borrow(cs).get())
    }

    /// Zero the counter and drop any pending tick
    pub fn reset(&self) {
        critical_section::with(|cs| self.counter.borrow(cs).set(0));
        self.ready.reset();
    }
}

impl Default for TickSignal {
    fn default() -> Self {
        Self::new()
    }
}
