//! JSON summary of a verification run.

use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::analyzer::{Analysis, Consistency, MetricsRecord};

/// Serialized form of one run.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    /// RFC 3339 timestamp of when the summary was produced.
    pub generated_at: String,
    pub metrics: &'a MetricsRecord,
    pub efficiency: f64,
    pub consistency: Consistency,
    pub verdict: &'static str,
}

impl<'a> RunSummary<'a> {
    pub fn new(record: &'a MetricsRecord, analysis: &Analysis) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            metrics: record,
            efficiency: analysis.efficiency,
            consistency: analysis.consistency,
            verdict: analysis.consistency.message(),
        }
    }
}

/// Write `results_<TEST_TYPE>.json` under `output_dir`.
pub fn save_summary(summary: &RunSummary<'_>, output_dir: &Path) -> anyhow::Result<PathBuf> {
    let path = super::artifact_path(output_dir, &summary.metrics.test_type, "json");
    let json = serde_json::to_string_pretty(summary).context("Failed to serialize summary")?;
    std::fs::write(&path, json).with_context(|| format!("Failed to write summary to {}", path.display()))?;
    log::info!("Summary saved as: {}", path.display());
    Ok(path)
}
