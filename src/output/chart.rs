//! Bar chart rendering for a verification run.
//!
//! Switch collisions, drops and memory collisions are drawn as three labelled
//! bars under a `<TEST_TYPE> — Efficiency = x%` title. The chart is drawn with
//! plotters into an RGB buffer and saved as PNG through `image`.

use anyhow::Context;
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontStyle, register_font};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::analyzer::MetricsRecord;
use crate::common::ChartConfig;

/// Embedded DejaVu Sans, registered as the `sans-serif` family.
static FONT_DATA: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Headroom above the tallest bar for its value label.
const Y_HEADROOM: f64 = 1.15;

/// The bars, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bar {
    SwitchCollisions,
    Drops,
    MemoryCollisions,
}

impl Bar {
    pub const ALL: [Bar; 3] = [Bar::SwitchCollisions, Bar::Drops, Bar::MemoryCollisions];

    fn value(&self, record: &MetricsRecord) -> u64 {
        match self {
            Bar::SwitchCollisions => record.switch_collisions,
            Bar::Drops => record.drops,
            Bar::MemoryCollisions => record.memory_collisions,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Bar::SwitchCollisions => "Switch Collisions",
            Bar::Drops => "Drops",
            Bar::MemoryCollisions => "Memory Collisions",
        }
    }

    fn color(&self) -> RGBColor {
        match self {
            Bar::SwitchCollisions => RGBColor(135, 206, 235), // Sky blue
            Bar::Drops => RGBColor(250, 128, 114),            // Salmon
            Bar::MemoryCollisions => RGBColor(128, 128, 128), // Gray
        }
    }
}

/// Chart caption, e.g. `HASHED_READS — Efficiency = 75.00%`.
pub fn chart_title(record: &MetricsRecord, efficiency: f64) -> String {
    format!("{} — Efficiency = {:.2}%", record.test_type, efficiency)
}

fn register_fonts() -> anyhow::Result<()> {
    static REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();
    REGISTERED
        .get_or_init(|| register_font("sans-serif", FontStyle::Normal, FONT_DATA).map_err(|_| "invalid font data".to_string()))
        .clone()
        .map_err(|e| anyhow::anyhow!("Failed to load chart font: {}", e))
}

/// Render the chart for a record.
pub fn render_chart(record: &MetricsRecord, efficiency: f64, config: &ChartConfig) -> anyhow::Result<RgbImage> {
    config.validate().map_err(anyhow::Error::msg)?;
    register_fonts()?;

    let (width, height) = (config.width, config.height);
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_chart(&root, record, efficiency).map_err(|e| anyhow::anyhow!("Failed to draw chart: {}", e))?;
        root.present().map_err(|e| anyhow::anyhow!("Failed to draw chart: {}", e))?;
    }

    RgbImage::from_raw(width, height, buffer).context("Chart buffer does not match its dimensions")
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    record: &MetricsRecord,
    efficiency: f64,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    let (width, height) = root.dim_in_pixel();

    let max = Bar::ALL.iter().map(|bar| bar.value(record)).max().unwrap_or(0);
    let y_max = max.max(1) as f64 * Y_HEADROOM;
    let last_index = Bar::ALL.len() as u32 - 1;

    let mut chart = ChartBuilder::on(root)
        .caption(chart_title(record, efficiency), ("sans-serif", (height / 25).max(10)))
        .margin(width.min(height) / 25)
        .x_label_area_size(height / 10)
        .y_label_area_size(width / 10)
        .build_cartesian_2d((0u32..last_index).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Metric Type")
        .y_desc("Count")
        .x_labels(Bar::ALL.len())
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(index) => Bar::ALL.get(*index as usize).map_or("", Bar::label).to_string(),
            _ => String::new(),
        })
        .y_label_formatter(&|count| format!("{:.0}", count))
        .draw()?;

    let bar_margin = chart.plotting_area().dim_in_pixel().0 / (Bar::ALL.len() as u32 * 5);
    chart.draw_series(Bar::ALL.iter().enumerate().filter(|(_, bar)| bar.value(record) > 0).map(|(index, bar)| {
        let index = index as u32;
        let mut rect = Rectangle::new(
            [(SegmentValue::Exact(index), 0.0), (SegmentValue::Exact(index + 1), bar.value(record) as f64)],
            bar.color().filled(),
        );
        rect.set_margin(0, 0, bar_margin, bar_margin);
        rect
    }))?;

    // Value labels sit on top of each bar
    let label_style = TextStyle::from(("sans-serif", (height / 40).max(8)).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(Bar::ALL.iter().enumerate().map(|(index, bar)| {
        let value = bar.value(record);
        Text::new(value.to_string(), (SegmentValue::CenterOf(index as u32), value as f64), label_style.clone())
    }))?;

    Ok(())
}

/// Render the chart and save it as `results_<TEST_TYPE>.png` under `output_dir`.
pub fn save_chart(record: &MetricsRecord, efficiency: f64, config: &ChartConfig, output_dir: &Path) -> anyhow::Result<PathBuf> {
    let path = super::artifact_path(output_dir, &record.test_type, "png");
    let img = render_chart(record, efficiency, config)?;
    img.save(&path).with_context(|| format!("Failed to save chart to {}", path.display()))?;
    log::info!("Graph saved as: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(switch_collisions: u64, drops: u64, memory_collisions: u64) -> MetricsRecord {
        MetricsRecord {
            test_type: "HASHED_READS".to_string(),
            drops,
            avg_latency: 12.5,
            max_latency: 300,
            switch_collisions,
            memory_collisions,
        }
    }

    fn count_pixels(img: &RgbImage, bar: Bar) -> usize {
        let RGBColor(r, g, b) = bar.color();
        img.pixels().filter(|p| p.0 == [r, g, b]).count()
    }

    #[test]
    fn test_chart_title() {
        assert_eq!(chart_title(&record(20, 5, 0), 75.0), "HASHED_READS — Efficiency = 75.00%");
        assert_eq!(chart_title(&record(20, 25, 0), -25.0), "HASHED_READS — Efficiency = -25.00%");
    }

    #[test]
    fn test_bar_labels_and_colors() {
        let labels: Vec<_> = Bar::ALL.iter().map(Bar::label).collect();
        assert_eq!(labels, ["Switch Collisions", "Drops", "Memory Collisions"]);
        assert_eq!(Bar::Drops.color(), RGBColor(250, 128, 114));
    }

    #[test]
    fn test_chart_dimensions() {
        let config = ChartConfig { enabled: true, width: 320, height: 240 };
        let img = render_chart(&record(20, 5, 0), 75.0, &config).unwrap();
        assert_eq!(img.dimensions(), (320, 240));
    }

    #[test]
    fn test_bar_areas_follow_values() {
        let img = render_chart(&record(20, 5, 0), 75.0, &ChartConfig::default()).unwrap();

        let switch = count_pixels(&img, Bar::SwitchCollisions);
        let drops = count_pixels(&img, Bar::Drops);
        assert!(drops > 0);
        let ratio = switch as f64 / drops as f64;
        assert!((3.5..4.5).contains(&ratio), "switch/drops area ratio {}", ratio);
    }

    #[test]
    fn test_zero_bar_not_drawn() {
        let without = render_chart(&record(20, 5, 0), 75.0, &ChartConfig::default()).unwrap();
        let with = render_chart(&record(20, 5, 20), 75.0, &ChartConfig::default()).unwrap();

        let switch = count_pixels(&with, Bar::SwitchCollisions);
        let memory = count_pixels(&with, Bar::MemoryCollisions);
        assert!(memory > switch / 2);
        // Anti-aliased text may land on the exact gray now and then
        assert!(count_pixels(&without, Bar::MemoryCollisions) < memory / 10);
    }

    #[test]
    fn test_all_zero_record_draws_no_bars() {
        let img = render_chart(&record(0, 0, 0), 0.0, &ChartConfig::default()).unwrap();
        assert_eq!(count_pixels(&img, Bar::SwitchCollisions), 0);
        assert_eq!(count_pixels(&img, Bar::Drops), 0);
    }

    #[test]
    fn test_render_rejects_out_of_range_size() {
        let config = ChartConfig { enabled: true, width: 700, height: 300_000_000 };
        let err = render_chart(&record(20, 5, 0), 75.0, &config).unwrap_err();
        assert!(err.to_string().contains("Invalid chart size"));
    }

    #[test]
    fn test_save_chart_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let config = ChartConfig { enabled: true, width: 400, height: 300 };

        let path = save_chart(&record(20, 5, 0), 75.0, &config, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("results_HASHED_READS.png"));

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (400, 300));
    }

    #[test]
    fn test_save_chart_missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(save_chart(&record(1, 1, 1), 0.0, &ChartConfig::default(), &missing).is_err());
    }
}
