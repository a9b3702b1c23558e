//! Presentation of a verification run: bar chart and JSON summary files.

pub mod chart;
pub mod summary;

use std::path::{Path, PathBuf};

pub use chart::save_chart;
pub use summary::{RunSummary, save_summary};

/// `results_<TEST_TYPE>.<extension>` inside `output_dir`.
pub fn artifact_path(output_dir: &Path, test_type: &str, extension: &str) -> PathBuf {
    output_dir.join(format!("results_{}.{}", test_type, extension))
}
