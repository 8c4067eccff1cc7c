use crate::domain::ports::PriceSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Uniform draws from a standard RNG. Entropy-seeded by default; an explicit
/// seed makes a whole run reproducible.
#[derive(Debug)]
pub struct UniformPriceSource {
    rng: Mutex<StdRng>,
}

impl UniformPriceSource {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for UniformPriceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceSource for UniformPriceSource {
    fn draw(&self, lo: u64, hi: u64) -> u64 {
        if lo >= hi {
            return lo;
        }
        // A poisoned lock still holds a usable RNG.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(lo..=hi)
    }
}

/// Always answers the same value, clamped into the requested range.
#[derive(Debug, Clone, Copy)]
pub struct FixedPriceSource {
    value: u64,
}

impl FixedPriceSource {
    pub fn new(value: u64) -> Self {
        Self { value }
    }
}

impl PriceSource for FixedPriceSource {
    fn draw(&self, lo: u64, hi: u64) -> u64 {
        clamp_into(self.value, lo, hi)
    }
}

/// Replays a fixed list of values in order, wrapping around at the end.
#[derive(Debug)]
pub struct SequencePriceSource {
    values: Vec<u64>,
    cursor: AtomicUsize,
}

impl SequencePriceSource {
    pub fn new(values: Vec<u64>) -> Self {
        Self {
            values,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn draws(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }
}

impl PriceSource for SequencePriceSource {
    fn draw(&self, lo: u64, hi: u64) -> u64 {
        if self.values.is_empty() {
            return lo;
        }
        let position = self.cursor.fetch_add(1, Ordering::Relaxed);
        clamp_into(self.values[position % self.values.len()], lo, hi)
    }
}

fn clamp_into(value: u64, lo: u64, hi: u64) -> u64 {
    if lo >= hi {
        lo
    } else {
        value.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_draws_stay_in_range() {
        let source = UniformPriceSource::new();
        for _ in 0..1_000 {
            let value = source.draw(400_000, 1_200_000);
            assert!((400_000..=1_200_000).contains(&value));
        }
    }

    #[test]
    fn test_uniform_degenerate_range() {
        let source = UniformPriceSource::new();
        assert_eq!(source.draw(7, 7), 7);
    }

    #[test]
    fn test_seeded_sources_agree() {
        let a = UniformPriceSource::seeded(42);
        let b = UniformPriceSource::seeded(42);
        let left: Vec<u64> = (0..10).map(|_| a.draw(0, 1_000_000)).collect();
        let right: Vec<u64> = (0..10).map(|_| b.draw(0, 1_000_000)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_fixed_source_clamps() {
        let source = FixedPriceSource::new(500_000);
        assert_eq!(source.draw(400_000, 1_200_000), 500_000);
        assert_eq!(source.draw(0, 100_000), 100_000);
        assert_eq!(source.draw(600_000, 800_000), 600_000);
    }

    #[test]
    fn test_sequence_source_cycles() {
        let source = SequencePriceSource::new(vec![1, 2, 3]);
        let drawn: Vec<u64> = (0..5).map(|_| source.draw(0, 10)).collect();
        assert_eq!(drawn, vec![1, 2, 3, 1, 2]);
        assert_eq!(source.draws(), 5);
    }

    #[test]
    fn test_empty_sequence_returns_lower_bound() {
        let source = SequencePriceSource::new(Vec::new());
        assert_eq!(source.draw(5, 10), 5);
    }
}
