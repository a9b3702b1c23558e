//! Configuration loading for the verifier.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Smallest chart edge, in pixels, that still leaves room for the bars.
pub const MIN_CHART_EDGE: u32 = 100;

/// Largest chart edge, in pixels.
pub const MAX_CHART_EDGE: u32 = 8192;

/// Output settings, read from an optional TOML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct VerifierConfig {
    /// Directory receiving `results_<TEST_TYPE>.*` artifacts.
    pub output_dir: PathBuf,
    pub chart: ChartConfig,
    /// Also write a JSON summary next to the chart.
    pub json_summary: bool,
}

/// Bar chart rendering options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ChartConfig {
    pub enabled: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            chart: ChartConfig::default(),
            json_summary: false,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 700,
            height: 500,
        }
    }
}

impl VerifierConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `config_path` - Path to the config file
    ///
    /// # Returns
    /// * `Ok(VerifierConfig)` if the file was successfully loaded, parsed and validated
    /// * `Err(String)` with a descriptive error message otherwise
    pub fn load(config_path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(config_path).map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| format!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        self.chart.validate()
    }
}

impl ChartConfig {
    /// Check that both edges are within `MIN_CHART_EDGE..=MAX_CHART_EDGE`.
    pub fn validate(&self) -> Result<(), String> {
        let edges = MIN_CHART_EDGE..=MAX_CHART_EDGE;
        if !edges.contains(&self.width) || !edges.contains(&self.height) {
            return Err(format!(
                "Invalid chart size {}x{}, both edges must be between {} and {} pixels",
                self.width, self.height, MIN_CHART_EDGE, MAX_CHART_EDGE
            ));
        }
        Ok(())
    }
}
