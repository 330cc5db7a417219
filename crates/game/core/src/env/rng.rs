//! RNG oracle for deterministic random number generation.
//!
//! Combat rolls, critical checks and random movement all draw from an
//! [`RngOracle`]. Given the same seed an implementation must produce the same
//! sequence, which is what makes a recorded input sequence replayable.

/// Source of deterministic random values.
pub trait RngOracle {
    /// Next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform integer in `[0, 100)`.
    fn roll_percent(&mut self) -> u32 {
        self.next_u32() % 100
    }

    /// Uniform float in `[0, 1)`.
    fn unit(&mut self) -> f32 {
        // 24 bits is the full f32 mantissa, so the result never rounds up to 1.0.
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform integer in `[min, max]` inclusive. Returns `min` if the range is empty.
    fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = (max as i64 - min as i64 + 1) as u64;
        min + (self.next_u32() as u64 % span) as i32
    }

    /// Uniform index into a collection of length `len` (`len > 0`).
    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.next_u32() as usize % len
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
#[derive(Clone, Copy, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn seeded(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.state = Self::step(rng.state.wrapping_add(seed));
        rng
    }

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl Default for PcgRng {
    fn default() -> Self {
        Self::seeded(0)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::step(old);
        Self::output(old)
    }
}

/// Replays a fixed list of raw values, cycling when exhausted.
///
/// Useful for pinning combat rolls in tests and balance tooling.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
