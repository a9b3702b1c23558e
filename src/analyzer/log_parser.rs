//! Extract a `MetricsRecord` from the free-form text of a simulation log.
//!
//! The simulator prints its totals as `<Label>: <value>` or
//! `<Label> = <value>` lines somewhere in its output:
//!
//! ```text
//! TEST_TYPE: HASHED_READS
//! Total dropp: 5
//! Global Average Latency = 12.5
//! Global Max Latency = 300
//! Total switch collisions: 20
//! Total memory collisions: 0
//! ```
//!
//! Each field is described by one entry of [`FIELD_TABLE`]. The first match in
//! document order wins, and a field without a match takes the table default.
//!
//! Either `:` or `=` is accepted as the separator on every line. Whitespace
//! before the separator is only allowed for the latency lines, which the
//! simulator prints as `<Label> = <value>`; `Total dropp : 5` is not a match.
//! Numeric values are matched as ASCII digits only.

use regex::Regex;
use std::sync::LazyLock;

use super::types::{FieldValue, MetricField, MetricsRecord, UNKNOWN_TEST_TYPE};

/// Syntactic shape of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// `[A-Z_]+`
    Token,
    /// `[0-9]+`
    Integer,
    /// `[0-9]+` with an optional fractional part.
    Decimal,
}

impl ValueShape {
    /// Regex sub-expression matching a syntactically valid value.
    fn pattern(&self) -> &'static str {
        match self {
            ValueShape::Token => r"[A-Z_]+",
            ValueShape::Integer => r"[0-9]+",
            ValueShape::Decimal => r"[0-9]+(?:\.[0-9]+)?",
        }
    }

    /// Convert a captured value. `None` only for integers that overflow `u64`.
    fn parse<'a>(&self, raw: &'a str) -> Option<FieldValue<'a>> {
        match self {
            ValueShape::Token => Some(FieldValue::Label(raw)),
            ValueShape::Integer => raw.parse().ok().map(FieldValue::Count),
            ValueShape::Decimal => raw.parse().ok().map(FieldValue::Cycles),
        }
    }
}

/// How the label is joined to its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `<Label>[:=]<value>`, whitespace only after the separator.
    Tight,
    /// `<Label> = <value>`, whitespace on both sides.
    Spaced,
}

impl Separator {
    fn pattern(&self) -> &'static str {
        match self {
            Separator::Tight => r"[:=]\s*",
            Separator::Spaced => r"\s*[:=]\s*",
        }
    }
}

/// One row of the extraction table.
#[derive(Debug)]
pub struct FieldSpec {
    pub field: MetricField,
    /// Literal label as printed by the simulator.
    pub label: &'static str,
    pub separator: Separator,
    pub shape: ValueShape,
    pub default: FieldValue<'static>,
}

impl FieldSpec {
    /// Build the `<Label><separator>(<value>)` pattern for this field.
    fn regex(&self) -> Regex {
        let pattern = format!(r"{}{}({})", regex::escape(self.label), self.separator.pattern(), self.shape.pattern());
        // Labels are escaped and shapes are fixed literals, so this always compiles.
        Regex::new(&pattern).unwrap_or_else(|e| panic!("invalid pattern for {}: {}", self.field, e))
    }
}

/// Fields in extraction order, with their defaults.
pub static FIELD_TABLE: [FieldSpec; 6] = [
    FieldSpec {
        field: MetricField::TestType,
        label: "TEST_TYPE",
        separator: Separator::Tight,
        shape: ValueShape::Token,
        default: FieldValue::Label(UNKNOWN_TEST_TYPE),
    },
    FieldSpec {
        field: MetricField::Drops,
        label: "Total dropp",
        separator: Separator::Tight,
        shape: ValueShape::Integer,
        default: FieldValue::Count(0),
    },
    FieldSpec {
        field: MetricField::AvgLatency,
        label: "Global Average Latency",
        separator: Separator::Spaced,
        shape: ValueShape::Decimal,
        default: FieldValue::Cycles(0.0),
    },
    FieldSpec {
        field: MetricField::MaxLatency,
        label: "Global Max Latency",
        separator: Separator::Spaced,
        shape: ValueShape::Integer,
        default: FieldValue::Count(0),
    },
    FieldSpec {
        field: MetricField::SwitchCollisions,
        label: "Total switch collisions",
        separator: Separator::Tight,
        shape: ValueShape::Integer,
        default: FieldValue::Count(0),
    },
    FieldSpec {
        field: MetricField::MemoryCollisions,
        label: "Total memory collisions",
        separator: Separator::Tight,
        shape: ValueShape::Integer,
        default: FieldValue::Count(0),
    },
];

/// Compiled patterns, index-aligned with `FIELD_TABLE`.
static FIELD_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| FIELD_TABLE.iter().map(FieldSpec::regex).collect());

/// Extract all metrics from the log text.
///
/// Never fails: absent or unparseable fields fall back to their defaults.
pub fn extract(text: &str) -> MetricsRecord {
    let mut record = default_record();

    for (spec, pattern) in FIELD_TABLE.iter().zip(FIELD_PATTERNS.iter()) {
        let value = extract_field(text, spec, pattern).unwrap_or(spec.default);
        assign(&mut record, spec.field, value);
    }

    record
}

/// Record with every field set to its table default.
pub fn default_record() -> MetricsRecord {
    let mut record = MetricsRecord {
        test_type: String::new(),
        drops: 0,
        avg_latency: 0.0,
        max_latency: 0,
        switch_collisions: 0,
        memory_collisions: 0,
    };
    for spec in &FIELD_TABLE {
        assign(&mut record, spec.field, spec.default);
    }
    record
}

/// Find the first occurrence of a field and parse its value.
fn extract_field<'a>(text: &'a str, spec: &FieldSpec, pattern: &Regex) -> Option<FieldValue<'a>> {
    let Some(captures) = pattern.captures(text) else {
        log::debug!("{} not found, using default {:?}", spec.field, spec.default);
        return None;
    };
    let raw = captures.get(1)?.as_str();

    let value = spec.shape.parse(raw);
    if value.is_none() {
        log::warn!("{} value '{}' out of range, using default {:?}", spec.field, raw, spec.default);
    }
    value
}

/// Store a value into the matching record field.
fn assign(record: &mut MetricsRecord, field: MetricField, value: FieldValue<'_>) {
    match (field, value) {
        (MetricField::TestType, FieldValue::Label(label)) => record.test_type = label.to_string(),
        (MetricField::Drops, FieldValue::Count(n)) => record.drops = n,
        (MetricField::AvgLatency, FieldValue::Cycles(c)) => record.avg_latency = c,
        (MetricField::MaxLatency, FieldValue::Count(n)) => record.max_latency = n,
        (MetricField::SwitchCollisions, FieldValue::Count(n)) => record.switch_collisions = n,
        (MetricField::MemoryCollisions, FieldValue::Count(n)) => record.memory_collisions = n,
        (field, value) => log::error!("{} cannot hold {:?}", field, value),
    }
}
