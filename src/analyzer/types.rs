//! Type definitions specific to the analyzer module.

use serde::{Deserialize, Serialize};

/// Sentinel test type used when the log carries no `TEST_TYPE` line.
pub const UNKNOWN_TEST_TYPE: &str = "UNKNOWN";

/// Metrics scraped from a single simulation log.
///
/// Every field is populated after extraction. Fields the log did not mention
/// hold their type-appropriate default (`UNKNOWN`, `0`, `0.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Simulation scenario label, e.g. `HASHED_READS`.
    pub test_type: String,
    /// Operations dropped by the simulator.
    pub drops: u64,
    /// Global average latency in cycles.
    pub avg_latency: f64,
    /// Global maximum latency in cycles.
    pub max_latency: u64,
    pub switch_collisions: u64,
    pub memory_collisions: u64,
}

/// The six fields a simulation log can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricField {
    TestType,
    Drops,
    AvgLatency,
    MaxLatency,
    SwitchCollisions,
    MemoryCollisions,
}

impl std::fmt::Display for MetricField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricField::TestType => write!(f, "test_type"),
            MetricField::Drops => write!(f, "drops"),
            MetricField::AvgLatency => write!(f, "avg_latency"),
            MetricField::MaxLatency => write!(f, "max_latency"),
            MetricField::SwitchCollisions => write!(f, "switch_collisions"),
            MetricField::MemoryCollisions => write!(f, "memory_collisions"),
        }
    }
}

/// A scalar value extracted from the log (or a field default).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Uppercase-underscore token.
    Label(&'a str),
    /// Non-negative integer count.
    Count(u64),
    /// Decimal cycle count.
    Cycles(f64),
}

/// Outcome of the consistency check, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Consistency {
    /// More drops than switch collisions were reported.
    Inconsistent,
    /// Memory collisions were reported.
    MemoryBottleneck,
    Stable,
}

impl Consistency {
    /// Human-readable line used in the verification report.
    pub fn message(&self) -> &'static str {
        match self {
            Consistency::Inconsistent => "Warning: More drops than collisions - check simulation!",
            Consistency::MemoryBottleneck => "Memory conflicts detected - possible bottleneck.",
            Consistency::Stable => "Simulation results are consistent and stable.",
        }
    }
}

/// Result of analyzing one `MetricsRecord`.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Multi-line verification report.
    pub report: String,
    /// Percentage of switch collisions that did not end in a drop. Not clamped.
    pub efficiency: f64,
    pub consistency: Consistency,
}

impl Analysis {
    /// Split into the `(report, efficiency)` pair handed to presentation.
    pub fn into_parts(self) -> (String, f64) {
        (self.report, self.efficiency)
    }
}
