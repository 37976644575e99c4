use super::{bar_label, ChartError, CHART_HEIGHT, CHART_WIDTH, PALETTE};
use crate::models::GroupInfo;
use plotters::prelude::*;
use std::path::Path;

/// Bar chart of each group's used space as a percentage of its quota limit,
/// with a reference line at 100%.
pub struct QuotaPctBarChart<'a> {
    title: &'a str,
    group_info_list: &'a [GroupInfo],
    file_path: &'a Path,
}

impl<'a> QuotaPctBarChart<'a> {
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
            .map(GroupInfo::quota_pct)
            .fold(100.0f64, f64::max)
            * 1.1;

        let root = BitMapBackend::new(self.file_path, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(self.title, ("sans-serif", 40))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(85)
            .build_cartesian_2d(0f64..groups.len() as f64, 0f64..y_max)
            .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(groups.len() + 1)
            .x_label_formatter(&|x| bar_label(&names, *x))
            .y_desc("Quota usage (%)")
            .label_style(("sans-serif", 20))
            .draw()
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        chart
            .draw_series(groups.iter().enumerate().map(|(i, group)| {
                let color = PALETTE[i % PALETTE.len()];
                Rectangle::new(
                    [(i as f64 + 0.15, 0.0), (i as f64 + 0.85, group.quota_pct())],
                    color.filled(),
                )
            }))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        // Quota limit reference line.
        chart
            .draw_series(LineSeries::new(
                [(0.0, 100.0), (groups.len() as f64, 100.0)],
                &RED,
            ))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        root.present()
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_group_list_is_rejected() {
        let path = std::env::temp_dir().join("quota_pct_empty.png");
        let chart = QuotaPctBarChart::new("Test", &[], &path);

        assert!(matches!(chart.create(), Err(ChartError::InvalidData(_))));
        assert!(!path.exists());
    }

    #[test]
    #[ignore = "font rendering not available in headless test environments"]
    fn test_create_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quota_pct.png");

        let groups = vec![
            GroupInfo::new("hades", 100, 200),
            GroupInfo::new("cbm", 300, 200),
        ];

        let chart = QuotaPctBarChart::new("Group Quota Usage on Test FS", &groups, &path);
        chart.create().unwrap();

        assert!(path.exists());
    }
}
