use super::{bar_label, format_bytes, ChartError, CHART_HEIGHT, CHART_WIDTH};
use crate::models::GroupInfo;
use plotters::prelude::*;
use std::path::Path;

/// Grouped bar chart comparing quota limit and used space per group, both in
/// absolute bytes.
pub struct UsageQuotaBarChart<'a> {
    title: &'a str,
    group_info_list: &'a [GroupInfo],
    file_path: &'a Path,
}

impl<'a> UsageQuotaBarChart<'a> {
    pub fn new(title: &'a str, group_info_list: &'a [GroupInfo], file_path: &'a Path) -> Self {
        Self {
            title,
            group_info_list,
            file_path,
        }
    }

    pub fn create(&self) -> Result<(), ChartError> {
        if self.group_info_list.is_empty() {
            return Err(ChartError::InvalidData(
                "group info list cannot be empty".to_string(),
            ));
        }

        let groups = self.group_info_list;
        let names: Vec<String> = groups.iter().map(|g| g.name.clone()).collect();

        let y_max = groups
            .iter()
            .map(|g| g.size.max(g.quota))
            .max()
            .unwrap_or(1) as f64
            * 1.1;

        let root = BitMapBackend::new(self.file_path, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(self.title, ("sans-serif", 40))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(110)
            .build_cartesian_2d(0f64..groups.len() as f64, 0f64..y_max)
            .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(groups.len() + 1)
            .x_label_formatter(&|x| bar_label(&names, *x))
            .y_label_formatter(&|y| format_bytes(*y as u64))
            .y_desc("Disk space")
            .label_style(("sans-serif", 20))
            .draw()
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        chart
            .draw_series(groups.iter().enumerate().map(|(i, group)| {
                Rectangle::new(
                    [(i as f64 + 0.1, 0.0), (i as f64 + 0.5, group.quota as f64)],
                    BLUE.mix(0.4).filled(),
                )
            }))
            .map_err(|e| ChartError::Drawing(e.to_string()))?
            .label("Quota")
            .legend(|(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], BLUE.mix(0.4).filled()));

        chart
            .draw_series(groups.iter().enumerate().map(|(i, group)| {
                Rectangle::new(
                    [(i as f64 + 0.5, 0.0), (i as f64 + 0.9, group.size as f64)],
                    GREEN.filled(),
                )
            }))
            .map_err(|e| ChartError::Drawing(e.to_string()))?
            .label("Used")
            .legend(|(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], GREEN.filled()));

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
