//! Analyzer module for simulation log verification.
//!
//! Provides functionality for:
//! - Reading a finished simulation log in one shot
//! - Extracting the reported totals into a `MetricsRecord`
//! - Deriving network efficiency and a consistency verdict
//!
//! Nothing in this module writes files; rendering is left to the caller.

pub mod log_loader;
pub mod log_parser;
pub mod report;
pub mod types;

pub use log_loader::load_log;
pub use log_parser::extract;
pub use report::analyze;
pub use types::{Analysis, Consistency, MetricsRecord};
