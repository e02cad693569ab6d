//! Machine-readable comparison reports.
//!
//! Serializes a [`Comparison`] into a versioned JSON document so external
//! tooling can plot measured samples against the theoretical curves
//! without parsing console output. The schema version is bumped whenever
//! a field changes meaning, is removed, or is renamed; adding fields does
//! not require a bump.

use crate::comparison::Comparison;
use serde::{Deserialize, Serialize};

/// Current report schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Top-level report document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Schema version of this document.
    pub schema_version: u32,
    /// Tool that produced the report.
    pub tool: ToolInfo,
    /// Shape of the measured dataset.
    pub dataset: DatasetEntry,
    /// One measured sample per algorithm, in presentation order.
    pub samples: Vec<SampleEntry>,
    /// Predicted millisecond curves over the standard size sweep.
    pub curves: Vec<CurveEntry>,
    /// Derived summary values.
    pub metadata: Metadata,
}

/// Producer identification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Dataset descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetEntry {
    /// Number of elements.
    pub n: usize,
    /// Distribution name, as printed by the generator.
    pub mode: String,
    /// Seed the dataset was generated from, when one was supplied.
    pub seed: Option<u64>,
}

/// One measured run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleEntry {
    pub algorithm: String,
    pub elapsed_ms: f64,
}

/// One theoretical curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveEntry {
    pub algorithm: String,
    pub points: Vec<PointEntry>,
}

/// One point on a theoretical curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointEntry {
    pub n: usize,
    pub predicted_ms: f64,
}

/// Summary values derived from the samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Display name of the fastest sampled algorithm, if any samples ran.
    pub fastest: Option<String>,
    /// Sum of the sampled wall-clock times.
    pub total_elapsed_ms: f64,
}

/// Builds the report document for a finished comparison.
#[must_use]
pub fn generate_report(comparison: &Comparison) -> JsonReport {
    let samples = comparison
        .samples
        .iter()
        .map(|sample| SampleEntry {
            algorithm: sample.algorithm.name().to_string(),
            elapsed_ms: sample.elapsed_ms,
        })
        .collect();

    let curves = comparison
        .curves
        .iter()
        .map(|curve| CurveEntry {
            algorithm: curve.algorithm.name().to_string(),
            points: curve
                .points
                .iter()
                .map(|point| PointEntry {
                    n: point.n,
                    predicted_ms: point.predicted_ms,
                })
                .collect(),
        })
        .collect();

    JsonReport {
        schema_version: SCHEMA_VERSION,
        tool: ToolInfo {
            name: "sortlab".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        dataset: DatasetEntry {
            n: comparison.dataset.n,
            mode: comparison.dataset.mode.to_string(),
            seed: comparison.dataset.seed,
        },
        samples,
        curves,
        metadata: Metadata {
            fastest: comparison
                .fastest()
                .map(|sample| sample.algorithm.name().to_string()),
            total_elapsed_ms: comparison
                .samples
                .iter()
                .map(|sample| sample.elapsed_ms)
                .sum(),
        },
    }
}

/// Serializes a comparison to a JSON string.
///
/// # Errors
///
/// Returns the underlying serialization error; does not occur for
/// well-formed comparisons.
pub fn to_json_string(comparison: &Comparison, pretty: bool) -> Result<String, serde_json::Error> {
    let report = generate_report(comparison);
    if pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
}
