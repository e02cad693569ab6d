//! Unanimated wall-clock measurement of a single sort.
//!
//! The sampler runs an algorithm to completion on a private copy of the
//! input with no per-step callbacks and no pacing delay, so the measured
//! time reflects only the algorithm. It drives the same stepper as the
//! animated path, which keeps operation counts identical between the two
//! and makes the numbers comparable across algorithms and distributions.

use crate::algorithm::Algorithm;
use std::time::{Duration, Instant};

/// Measures the wall-clock time `algorithm` takes to sort a copy of `data`.
///
/// The caller's slice is never mutated. Sub-millisecond runs legitimately
/// report zero when converted to whole milliseconds.
#[must_use]
pub fn measure(data: &[i32], algorithm: Algorithm) -> Duration {
    let mut copy = data.to_vec();
    let start = Instant::now();
    algorithm.sort(&mut copy);
    start.elapsed()
}

/// [`measure`], converted to fractional milliseconds.
#[must_use]
pub fn measure_ms(data: &[i32], algorithm: Algorithm) -> f64 {
    measure(data, algorithm).as_secs_f64() * 1_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_never_mutates_the_input() {
        let data = vec![9, 3, 7, 1, 5];
        let before = data.clone();
        for algorithm in Algorithm::ALL {
            let _ = measure(&data, algorithm);
            assert_eq!(data, before, "{algorithm}");
        }
    }

    #[test]
    fn trivial_inputs_report_near_zero_time() {
        for algorithm in Algorithm::ALL {
            let empty: Vec<i32> = vec![];
            assert!(measure(&empty, algorithm) < Duration::from_secs(1));

            let single = vec![1];
            let elapsed = measure_ms(&single, algorithm);
            assert!(elapsed >= 0.0, "{algorithm}: {elapsed}");
        }
    }

    #[test]
    fn larger_inputs_take_measurable_work() {
        // Not a timing assertion, just that measurement completes and the
        // elapsed value is sane for a non-trivial input.
        let data: Vec<i32> = (1..=500).rev().collect();
        for algorithm in Algorithm::ALL {
            let elapsed = measure(&data, algorithm);
            assert!(elapsed < Duration::from_secs(30), "{algorithm}");
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The sampler leaves its input untouched for every algorithm.
        #[test]
        fn sampling_is_read_only(
            input in proptest::collection::vec(-1000..1000_i32, 0..64)
        ) {
            let before = input.clone();
            for algorithm in Algorithm::ALL {
                let _ = measure(&input, algorithm);
                prop_assert_eq!(&input, &before);
            }
        }
    }
}
