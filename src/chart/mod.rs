//! Chart builders for the storage report.
//!
//! All variants share one contract: construct with a title, the group data
//! and an output path (plus variant-specific extras), then `create()` renders
//! a 1200x800 PNG via the [`plotters`] bitmap backend. Rendering errors are
//! not handled here, they propagate to the orchestrator.

use humansize::{format_size, DECIMAL};
use plotters::style::RGBColor;
use thiserror::Error;

pub(crate) mod quota_pct_bar;
pub(crate) mod trend;
pub(crate) mod usage_pie;
pub(crate) mod usage_quota_bar;

pub use quota_pct_bar::QuotaPctBarChart;
pub use trend::TrendChart;
pub use usage_pie::UsagePieChart;
pub use usage_quota_bar::UsageQuotaBarChart;

pub(crate) const CHART_WIDTH: u32 = 1200;
pub(crate) const CHART_HEIGHT: u32 = 800;

/// Series colors shared by all chart variants (matplotlib tab10).
pub(crate) const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Errors that can occur during chart generation.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// X axis label for bar charts: group name at integer ticks, nothing at
/// intermediate ones.
pub(crate) fn bar_label(names: &[String], x: f64) -> String {
    let index = x.floor();
    if x >= 0.0 && (x - index).abs() < 1e-9 {
        names.get(index as usize).cloned().unwrap_or_default()
    } else {
        String::new()
    }
}
