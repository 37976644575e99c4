use super::{format_bytes, ChartError, CHART_HEIGHT, CHART_WIDTH, PALETTE};
use crate::models::GroupUsageSeries;
use chrono::NaiveDate;
use plotters::prelude::*;
use std::path::Path;

/// Line chart of group usage over a date range, one series per group.
///
/// Not part of the weekly flow yet, kept as a capability for periodic trend
/// reports.
pub struct TrendChart<'a> {
    title: &'a str,
    group_series_list: &'a [GroupUsageSeries],
    file_path: &'a Path,
    x_label: &'a str,
    y_label: &'a str,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl<'a> TrendChart<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: &'a str,
        group_series_list: &'a [GroupUsageSeries],
        file_path: &'a Path,
        x_label: &'a str,
        y_label: &'a str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            title,
            group_series_list,
            file_path,
            x_label,
            y_label,
            start_date,
            end_date,
        }
    }

    pub fn create(&self) -> Result<(), ChartError> {
        if self.group_series_list.is_empty() {
            return Err(ChartError::InvalidData(
                "group series list cannot be empty".to_string(),
            ));
        }

        if self.start_date >= self.end_date {
            return Err(ChartError::InvalidData(format!(
                "invalid date range: {} to {}",
                self.start_date, self.end_date
            )));
        }

        let y_max = y_axis_max(self.group_series_list);

        let root = BitMapBackend::new(self.file_path, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(self.title, ("sans-serif", 40))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(110)
            .build_cartesian_2d(self.start_date..self.end_date, 0f64..y_max)
            .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .x_desc(self.x_label)
            .x_label_formatter(&|date| date.format("%Y-%m-%d").to_string())
            .y_desc(self.y_label)
            .y_label_formatter(&|y| format_bytes(*y as u64))
            .label_style(("sans-serif", 20))
            .draw()
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        for (i, series) in self.group_series_list.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];

            chart
                .draw_series(LineSeries::new(
                    series.points.iter().map(|p| (p.date, p.size as f64)),
                    &color,
                ))
                .map_err(|e| ChartError::Drawing(e.to_string()))?
                .label(series.name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.8))
            .label_font(("sans-serif", 20))
            .draw()
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        root.present()
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        Ok(())
    }
}

/// Upper y axis bound with 10% headroom above the biggest sample.
fn y_axis_max(series_list: &[GroupUsageSeries]) -> f64 {
    let max_size = series_list
        .iter()
        .flat_map(|s| s.points.iter())
        .map(|p| p.size)
        .max()
        .unwrap_or(0);

    (max_size.max(1) as f64) * 1.1
}
