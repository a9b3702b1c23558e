//! Shared configuration used by the entry point and the output writers.

pub mod config;

pub use config::{ChartConfig, VerifierConfig};
