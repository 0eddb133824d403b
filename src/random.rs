//! Random source for channel activation.
//!
//! The engine accepts any [`RngCore`] + [`SeedableRng`]. [`XorShiftRng`] is a
//! small deterministic default that fits microcontrollers without a hardware
//! generator.

use rand_core::{Error, RngCore, SeedableRng, impls};

/// State used in place of an all-zero seed, which xorshift can never leave
const ZERO_SEED_STATE: u32 = 0x2545_F491;

/// Marsaglia xorshift generator with 32 bits of state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorShiftRng {
    state: u32,
}

impl XorShiftRng {
    /// Create a generator from a raw state value
    pub const fn new(state: u32) -> Self {
        Self {
            state: if state == 0 { ZERO_SEED_STATE } else { state },
        }
    }
}

impl RngCore for XorShiftRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for XorShiftRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Draw one byte from `rng`
#[inline]
pub fn draw_byte<R: RngCore>(rng: &mut R) -> u8 {
    rng.next_u32().to_le_bytes()[0]
}
