//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic, fast, no-std compatible.

/// Source of randomness for atom placement, target selection and cosmetic state.
///
/// Physics and bonding never draw from it, so a fixed seed (or a scripted
/// source in tests) makes a whole run reproducible.
pub trait RandomSource {
    /// Uniform value in [0, 1).
    fn next_f32(&mut self) -> f32;

    /// Uniform integer in [0, upper_bound). Returns 0 when `upper_bound` is 0.
    fn next_int(&mut self, upper_bound: u32) -> u32;

    /// Uniform value in [min, max).
    fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }
}

/// Seedable pseudo-random number generator (xorshift64).
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl RandomSource for Rng {
    fn next_f32(&mut self) -> f32 {
        // Top 24 bits fill the f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    fn next_int(&mut self, upper_bound: u32) -> u32 {
        if upper_bound == 0 {
            return 0;
        }
        (self.next_u64() % upper_bound as u64) as u32
    }
}
