//! Derived statistics and the human-readable verification report.

use std::fmt::Write;

use super::types::{Analysis, Consistency, MetricsRecord};

/// Percentage of switch collisions that did not end in a drop.
///
/// Zero when no switch collisions were recorded. Drops exceeding collisions
/// yield a negative value, which is passed through unclamped.
pub fn efficiency(record: &MetricsRecord) -> f64 {
    if record.switch_collisions > 0 {
        (1.0 - record.drops as f64 / record.switch_collisions as f64) * 100.0
    } else {
        0.0
    }
}

/// Classify the run. The first matching rule wins.
pub fn classify(record: &MetricsRecord) -> Consistency {
    if record.drops > record.switch_collisions {
        Consistency::Inconsistent
    } else if record.memory_collisions > 0 {
        Consistency::MemoryBottleneck
    } else {
        Consistency::Stable
    }
}

/// Compute efficiency and consistency and render the report.
pub fn analyze(record: &MetricsRecord) -> Analysis {
    let efficiency = efficiency(record);
    let consistency = classify(record);
    let report = render_report(record, efficiency, consistency);

    log::debug!("{}: efficiency {:.2}%, {:?}", record.test_type, efficiency, consistency);

    Analysis {
        report,
        efficiency,
        consistency,
    }
}

fn render_report(record: &MetricsRecord, efficiency: f64, consistency: Consistency) -> String {
    let mut out = String::with_capacity(384);
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Simulation Verification Report ({})", record.test_type);
    let _ = writeln!(out, "Total Switch Collisions : {}", record.switch_collisions);
    let _ = writeln!(out, "Total Memory Collisions : {}", record.memory_collisions);
    let _ = writeln!(out, "Total Drops             : {}", record.drops);
    let _ = writeln!(out, "Average Latency (cycles): {:?}", record.avg_latency);
    let _ = writeln!(out, "Max Latency (cycles)    : {}", record.max_latency);
    let _ = writeln!(out, "Network Efficiency      : {:.2}%", efficiency);
    let _ = writeln!(out, "{}", consistency.message());
    out
}
