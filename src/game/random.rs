//! Injectable randomness for board generation
//!
//! The board never reaches for a global generator. It owns a [`RandomSource`],
//! which is either entropy-backed for play or seeded for replays and tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::error::GameError;

/// Source of uniform random values
pub trait RandomSource {
    /// Uniform integer in the half-open range `[min, max)`
    fn int_in_range(&mut self, min: i32, max: i32) -> Result<i32, GameError>;

    /// Uniformly selected element of a non-empty slice
    fn choice<'a, T>(&mut self, options: &'a [T]) -> Result<&'a T, GameError>
    where
        Self: Sized,
    {
        if options.is_empty() {
            return Err(GameError::EmptyOptions);
        }

        let len = i32::try_from(options.len()).map_err(|_| GameError::InvalidRange {
            min: 0,
            max: i32::MAX,
        })?;
        let index = self.int_in_range(0, len)?;

        Ok(&options[index as usize])
    }
}

/// [`RandomSource`] backed by `rand`'s standard generator
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandom {
    fn int_in_range(&mut self, min: i32, max: i32) -> Result<i32, GameError> {
        if max <= min {
            return Err(GameError::InvalidRange { min, max });
        }

        Ok(self.rng.gen_range(min..max))
    }
}

/// Replays a fixed list of values, then falls back to a seeded generator
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct ScriptedRandom {
    values: std::collections::VecDeque<i32>,
    fallback: StdRandom,
}

#[cfg(test)]
impl ScriptedRandom {
    pub(crate) fn new(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback: StdRandom::seeded(0),
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn int_in_range(&mut self, min: i32, max: i32) -> Result<i32, GameError> {
        if max <= min {
            return Err(GameError::InvalidRange { min, max });
        }

        match self.values.pop_front() {
            Some(value) => {
                assert!(
                    (min..max).contains(&value),
                    "scripted value {value} outside [{min}, {max})"
                );
                Ok(value)
            }
            None => self.fallback.int_in_range(min, max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_in_range_bounds() {
        let mut rng = StdRandom::seeded(7);

        for _ in 0..1000 {
            let value = rng.int_in_range(-3, 4).unwrap();
            assert!((-3..4).contains(&value));
        }

        // Single-value range
        assert_eq!(rng.int_in_range(5, 6).unwrap(), 5);
    }

    #[test]
    fn test_int_in_range_covers_range() {
        let mut rng = StdRandom::seeded(11);
        let mut seen = [false; 5];

        for _ in 0..500 {
            seen[rng.int_in_range(0, 5).unwrap() as usize] = true;
        }

        assert!(seen.iter().all(|&hit| hit));
    }

    #[test]
    fn test_invalid_range() {
        let mut rng = StdRandom::seeded(1);

        assert_eq!(
            rng.int_in_range(3, 3),
            Err(GameError::InvalidRange { min: 3, max: 3 })
        );
        assert_eq!(
            rng.int_in_range(4, 2),
            Err(GameError::InvalidRange { min: 4, max: 2 })
        );
    }

    #[test]
    fn test_choice() {
        let mut rng = StdRandom::seeded(3);
        let options = ['a', 'b', 'c'];

        for _ in 0..100 {
            assert!(options.contains(rng.choice(&options).unwrap()));
        }

        let empty: [char; 0] = [];
        assert_eq!(rng.choice(&empty), Err(GameError::EmptyOptions));
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a = StdRandom::seeded(42);
        let mut b = StdRandom::seeded(42);

        let left: Vec<i32> = (0..20).map(|_| a.int_in_range(0, 100).unwrap()).collect();
        let right: Vec<i32> = (0..20).map(|_| b.int_in_range(0, 100).unwrap()).collect();

        assert_eq!(left, right);
    }

    #[test]
    fn test_scripted_source() {
        let mut rng = ScriptedRandom::new([2, 0]);
        let options = [10, 20, 30];

        assert_eq!(rng.choice(&options), Ok(&30));
        assert_eq!(rng.int_in_range(0, 5), Ok(0));
        // Exhausted script falls back to the seeded generator
        assert!((0..5).contains(&rng.int_in_range(0, 5).unwrap()));
    }
}
