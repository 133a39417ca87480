//! Deterministic random source for tree growth
//!
//! A 32-bit linear congruential generator. The whole tree is a pure function
//! of the seed, so nothing in here may touch the clock or OS entropy.

const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;
const MODULUS: f64 = 4_294_967_296.0; // 2^32

/// Seeded pseudo-random source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the generator and return a value in [0, 1)
    pub fn next(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state as f64 / MODULUS
    }

    /// Integer in `0..n`. Returns 0 when `n` is 0.
    pub fn roll(&mut self, n: u32) -> i32 {
        (self.next() * n as f64).floor() as i32
    }

    /// Uniform pick from {-1, 0, 1}
    pub fn jitter(&mut self) -> i32 {
        self.roll(3) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRandom::new(1234);
        let mut b = SeededRandom::new(1234);
        for _ in 0..1000 {
            assert_eq!(a.next().to_bits(), b.next().to_bits());
        }
    }

    #[test]
    fn first_values_match_lcg() {
        let mut rng = SeededRandom::new(42);
        // 1664525 * 42 + 1013904223 = 1083814273
        assert_eq!(rng.next(), 1_083_814_273.0 / MODULUS);
        // (1664525 * 1083814273 + 1013904223) mod 2^32
        let expected = 1_083_814_273u64 * 1_664_525 + 1_013_904_223;
        assert_eq!(rng.next(), (expected % (1u64 << 32)) as f64 / MODULUS);
    }

    #[test]
    fn zero_seed_is_a_normal_seed() {
        let mut rng = SeededRandom::new(0);
        assert_eq!(rng.next(), INCREMENT as f64 / MODULUS);
    }

    #[test]
    fn output_stays_in_unit_interval() {
        let mut rng = SeededRandom::new(u32::MAX);
        for _ in 0..10_000 {
            let v = rng.next();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn roll_covers_range() {
        let mut rng = SeededRandom::new(7);
        let mut seen = [false; 10];
        for _ in 0..1000 {
            let r = rng.roll(10);
            assert!((0..10).contains(&r));
            seen[r as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn roll_zero_is_zero() {
        let mut rng = SeededRandom::new(99);
        assert_eq!(rng.roll(0), 0);
    }
}
