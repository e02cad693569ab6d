//! Dataset generation under named input distributions.
//!
//! Every run starts from a freshly generated array; nothing is persisted.
//! Generation is deterministic under an explicit seed, which is what makes
//! measured times reproducible across algorithms: `compare` hands each
//! sampler an independent copy of one generated array.

use crate::error::Error;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::str::FromStr;

/// Default array size, matching the visualizer's bar count.
pub const DEFAULT_SIZE: usize = 50;

/// Upper bound (inclusive) for randomly drawn values.
pub const MAX_VALUE: i32 = 100;

/// Fraction of the array length used as the number of random pairwise
/// swaps applied to a nearly-sorted dataset. Empirically chosen in the
/// original visualizer; a configuration constant, not a contract.
const NEARLY_SORTED_SWAP_DIVISOR: usize = 10;

/// Divisor applied to [`MAX_VALUE`] for the duplicates-heavy distribution,
/// shrinking the value range enough to force repeats.
const DUPLICATES_RANGE_DIVISOR: i32 = 5;

/// Named input distributions for generated datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Distribution {
    /// Ascending `1..=n`.
    Sorted,
    /// Descending `n..=1`.
    ReverseSorted,
    /// Uniform draws in `[1, MAX_VALUE]`.
    Random,
    /// Ascending base with `n / 10` random pairwise swaps applied.
    NearlySorted,
    /// Uniform draws over a reduced range to force repeated values.
    Duplicates,
}

impl Distribution {
    /// All distributions, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Sorted,
        Self::ReverseSorted,
        Self::Random,
        Self::NearlySorted,
        Self::Duplicates,
    ];
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sorted => "sorted",
            Self::ReverseSorted => "reverse-sorted",
            Self::Random => "random",
            Self::NearlySorted => "nearly-sorted",
            Self::Duplicates => "duplicates",
        };
        f.write_str(name)
    }
}

impl FromStr for Distribution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sorted" => Ok(Self::Sorted),
            "reverse-sorted" | "reverse" => Ok(Self::ReverseSorted),
            "random" => Ok(Self::Random),
            "nearly-sorted" | "nearly" => Ok(Self::NearlySorted),
            "duplicates" => Ok(Self::Duplicates),
            other => Err(format!(
                "unknown distribution '{other}' (expected sorted, reverse-sorted, \
                 random, nearly-sorted or duplicates)"
            )),
        }
    }
}

/// Generates an array of `n` integers under the given distribution.
///
/// With `Some(seed)` the output is deterministic; with `None` the values
/// are drawn from a freshly entropy-seeded generator.
///
/// # Errors
///
/// Returns [`Error::InvalidSize`] when `n` is zero.
pub fn generate(n: usize, mode: Distribution, seed: Option<u64>) -> Result<Vec<i32>, Error> {
    if n == 0 {
        return Err(Error::InvalidSize { n });
    }

    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let data = match mode {
        Distribution::Sorted => (1..=n as i32).collect(),
        Distribution::ReverseSorted => (1..=n as i32).rev().collect(),
        Distribution::Random => (0..n).map(|_| rng.gen_range(1..=MAX_VALUE)).collect(),
        Distribution::NearlySorted => {
            let mut data: Vec<i32> = (1..=n as i32).collect();
            for _ in 0..n / NEARLY_SORTED_SWAP_DIVISOR {
                let a = rng.gen_range(0..n);
                let b = rng.gen_range(0..n);
                data.swap(a, b);
            }
            data
        }
        Distribution::Duplicates => (0..n)
            .map(|_| rng.gen_range(1..=MAX_VALUE / DUPLICATES_RANGE_DIVISOR))
            .collect(),
    };

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            generate(0, Distribution::Random, None),
            Err(Error::InvalidSize { n: 0 })
        ));
    }

    #[test]
    fn sorted_is_one_to_n_ascending() {
        let data = generate(5, Distribution::Sorted, None).unwrap();
        assert_eq!(data, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn reverse_sorted_is_n_to_one_descending() {
        let data = generate(5, Distribution::ReverseSorted, None).unwrap();
        assert_eq!(data, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn random_values_stay_in_range() {
        let data = generate(200, Distribution::Random, Some(7)).unwrap();
        assert_eq!(data.len(), 200);
        assert!(data.iter().all(|&v| (1..=MAX_VALUE).contains(&v)));
    }

    #[test]
    fn duplicates_use_the_reduced_range() {
        let data = generate(200, Distribution::Duplicates, Some(7)).unwrap();
        let bound = MAX_VALUE / DUPLICATES_RANGE_DIVISOR;
        assert!(data.iter().all(|&v| (1..=bound).contains(&v)));

        // 200 draws over 20 values must repeat.
        let mut unique = data.clone();
        unique.sort_unstable();
        unique.dedup();
        assert!(unique.len() < data.len());
    }

    #[test]
    fn nearly_sorted_is_a_permutation_of_one_to_n() {
        let mut data = generate(50, Distribution::NearlySorted, Some(7)).unwrap();
        data.sort_unstable();
        let expected: Vec<i32> = (1..=50).collect();
        assert_eq!(data, expected);
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        for mode in Distribution::ALL {
            let a = generate(50, mode, Some(99)).unwrap();
            let b = generate(50, mode, Some(99)).unwrap();
            assert_eq!(a, b, "{mode}");
        }
    }

    #[test]
    fn distribution_round_trips_through_strings() {
        for mode in Distribution::ALL {
            let parsed: Distribution = mode.to_string().parse().unwrap();
            assert_eq!(parsed, mode);
        }
        assert!("shuffled".parse::<Distribution>().is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every distribution produces exactly `n` values for any valid size.
        #[test]
        fn generated_length_matches_request(n in 1..300_usize, seed in any::<u64>()) {
            for mode in Distribution::ALL {
                let data = generate(n, mode, Some(seed)).unwrap();
                prop_assert_eq!(data.len(), n);
            }
        }

        /// Sorted and nearly-sorted datasets hold the same multiset `1..=n`.
        #[test]
        fn ordered_modes_are_permutations(n in 1..200_usize, seed in any::<u64>()) {
            for mode in [Distribution::Sorted, Distribution::ReverseSorted, Distribution::NearlySorted] {
                let mut data = generate(n, mode, Some(seed)).unwrap();
                data.sort_unstable();
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let expected: Vec<i32> = (1..=n as i32).collect();
                prop_assert_eq!(data, expected);
            }
        }
    }
}
