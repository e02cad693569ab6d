//! Three-way performance comparison over one generated dataset.
//!
//! One array is generated, each algorithm measures an independent copy,
//! and the results come back in a fixed order alongside precomputed
//! theoretical O(n²) curves for an external chart renderer.

use crate::algorithm::Algorithm;
use crate::dataset::{self, Distribution};
use crate::error::Error;
use crate::sampler;

/// Smallest swept size for the theoretical curves.
pub const CURVE_MIN_N: usize = 10;
/// Largest swept size for the theoretical curves.
pub const CURVE_MAX_N: usize = 100;
/// Step between swept sizes.
pub const CURVE_STEP: usize = 10;

/// Per-algorithm constant `c` in the predicted time `c * n²` milliseconds.
///
/// Empirical constants carried over from the original chart; they order
/// the three curves plausibly and are not calibrated to any machine.
fn curve_constant(algorithm: Algorithm) -> f64 {
    match algorithm {
        Algorithm::Bubble => 0.02,
        Algorithm::Selection => 0.017,
        Algorithm::Insertion => 0.015,
    }
}

/// One measured run of a single algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleResult {
    /// The algorithm that was measured.
    pub algorithm: Algorithm,
    /// Wall-clock elapsed time in milliseconds.
    pub elapsed_ms: f64,
}

/// One point of a theoretical curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    /// Input size.
    pub n: usize,
    /// Predicted time in milliseconds for that size.
    pub predicted_ms: f64,
}

/// A theoretical O(n²) curve for one algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// The algorithm the curve describes.
    pub algorithm: Algorithm,
    /// Predicted `(n, time)` points over the swept range.
    pub points: Vec<CurvePoint>,
}

/// Describes the dataset a comparison ran over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetInfo {
    /// Array size.
    pub n: usize,
    /// Input distribution.
    pub mode: Distribution,
    /// Seed, when generation was deterministic.
    pub seed: Option<u64>,
}

/// Measured samples for all three algorithms plus theoretical curves.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// The dataset all three samples shared.
    pub dataset: DatasetInfo,
    /// Results in fixed order: Bubble, Selection, Insertion.
    pub samples: Vec<SampleResult>,
    /// One theoretical curve per algorithm, same order.
    pub curves: Vec<Curve>,
}

impl Comparison {
    /// The sample with the smallest measured time.
    #[must_use]
    pub fn fastest(&self) -> Option<&SampleResult> {
        self.samples.iter().min_by(|a, b| {
            a.elapsed_ms
                .partial_cmp(&b.elapsed_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}

/// Computes the theoretical curve for one algorithm over the swept range.
#[must_use]
pub fn theoretical_curve(algorithm: Algorithm) -> Curve {
    let c = curve_constant(algorithm);
    let points = (CURVE_MIN_N..=CURVE_MAX_N)
        .step_by(CURVE_STEP)
        .map(|n| {
            #[allow(clippy::cast_precision_loss)]
            let predicted_ms = c * (n * n) as f64;
            CurvePoint { n, predicted_ms }
        })
        .collect();
    Curve { algorithm, points }
}

/// Generates one dataset and measures all three algorithms on independent
/// copies of it.
///
/// # Errors
///
/// Returns [`Error::InvalidSize`] when `n` is zero.
pub fn compare(n: usize, mode: Distribution, seed: Option<u64>) -> Result<Comparison, Error> {
    let base = dataset::generate(n, mode, seed)?;

    let samples = Algorithm::ALL
        .iter()
        .map(|&algorithm| SampleResult {
            algorithm,
            elapsed_ms: sampler::measure_ms(&base, algorithm),
        })
        .collect();

    let curves = Algorithm::ALL.iter().copied().map(theoretical_curve).collect();

    Ok(Comparison {
        dataset: DatasetInfo { n, mode, seed },
        samples,
        curves,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_come_back_in_fixed_order() {
        let comparison = compare(50, Distribution::Random, Some(3)).unwrap();
        let order: Vec<Algorithm> = comparison.samples.iter().map(|s| s.algorithm).collect();
        assert_eq!(order, Algorithm::ALL.to_vec());
        assert!(comparison.samples.iter().all(|s| s.elapsed_ms >= 0.0));
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(compare(0, Distribution::Sorted, None).is_err());
    }

    #[test]
    fn curves_sweep_ten_to_one_hundred() {
        let curve = theoretical_curve(Algorithm::Bubble);
        let ns: Vec<usize> = curve.points.iter().map(|p| p.n).collect();
        assert_eq!(ns, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
    }

    #[test]
    fn curve_values_are_quadratic() {
        let curve = theoretical_curve(Algorithm::Insertion);
        let first = curve.points.first().unwrap();
        let last = curve.points.last().unwrap();
        assert!((first.predicted_ms - 0.015 * 100.0).abs() < 1e-9);
        assert!((last.predicted_ms - 0.015 * 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn curves_preserve_the_constant_ordering() {
        // Bubble's constant is the largest, so at every swept size its
        // prediction dominates.
        let bubble = theoretical_curve(Algorithm::Bubble);
        let insertion = theoretical_curve(Algorithm::Insertion);
        for (b, i) in bubble.points.iter().zip(&insertion.points) {
            assert!(b.predicted_ms > i.predicted_ms);
        }
    }

    #[test]
    fn fastest_picks_the_smallest_sample() {
        let comparison = compare(30, Distribution::ReverseSorted, Some(1)).unwrap();
        let fastest = comparison.fastest().unwrap();
        assert!(comparison
            .samples
            .iter()
            .all(|s| fastest.elapsed_ms <= s.elapsed_ms));
    }

    #[test]
    fn seeded_comparisons_share_the_dataset_descriptor() {
        let comparison = compare(25, Distribution::Duplicates, Some(11)).unwrap();
        assert_eq!(comparison.dataset.n, 25);
        assert_eq!(comparison.dataset.mode, Distribution::Duplicates);
        assert_eq!(comparison.dataset.seed, Some(11));
    }
}
