use super::{format_bytes, ChartError, CHART_HEIGHT, CHART_WIDTH, PALETTE};
use crate::models::GroupInfo;
use plotters::prelude::*;
use std::path::Path;

/// Pie chart of the storage usage split: the top N groups by used space get
/// their own slice, the remaining groups are lumped together and the unused
/// capacity shows up as a free slice.
pub struct UsagePieChart<'a> {
    title: &'a str,
    group_info_list: &'a [GroupInfo],
    file_path: &'a Path,
    storage_total_size: u64,
    num_top_groups: usize,
}

impl<'a> UsagePieChart<'a> {
    pub fn new(
        title: &'a str,
        group_info_list: &'a [GroupInfo],
        file_path: &'a Path,
        storage_total_size: u64,
        num_top_groups: usize,
    ) -> Self {
        Self {
            title,
            group_info_list,
            file_path,
            storage_total_size,
            num_top_groups,
        }
    }

    pub fn create(&self) -> Result<(), ChartError> {
        if self.group_info_list.is_empty() {
            return Err(ChartError::InvalidData(
                "group info list cannot be empty".to_string(),
            ));
        }

        let slices = pie_slices(
            self.group_info_list,
            self.storage_total_size,
            self.num_top_groups,
        );

        if slices.is_empty() {
            return Err(ChartError::InvalidData(
                "no pie slices to draw".to_string(),
            ));
        }

        let sizes: Vec<f64> = slices.iter().map(|(_, size)| *size as f64).collect();
        let labels: Vec<String> = slices
            .iter()
            .map(|(name, size)| format!("{} ({})", name, format_bytes(*size)))
            .collect();
        let colors: Vec<RGBColor> = (0..slices.len())
            .map(|i| PALETTE[i % PALETTE.len()])
            .collect();

        let root = BitMapBackend::new(self.file_path, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

        let pie_area = root
            .titled(self.title, ("sans-serif", 40))
            .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

        let center = ((CHART_WIDTH / 2) as i32, (CHART_HEIGHT / 2) as i32);
        let radius = 280.0;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(-90.0);
        pie.label_style(("sans-serif", 20).into_font());
        pie.percentages(("sans-serif", 16).into_font());

        pie_area
            .draw(&pie)
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        pie_area
            .present()
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        Ok(())
    }
}

/// Splits the group list into pie slices: the `num_top` biggest consumers by
/// name, the rest as "other groups", the unused capacity as "free".
pub(crate) fn pie_slices(
    groups: &[GroupInfo],
    total_size: u64,
    num_top: usize,
) -> Vec<(String, u64)> {
    let mut sorted: Vec<&GroupInfo> = groups.iter().filter(|g| g.size > 0).collect();
    sorted.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.name.cmp(&b.name)));

    let mut slices: Vec<(String, u64)> = sorted
        .iter()
        .take(num_top)
        .map(|g| (g.name.clone(), g.size))
        .collect();

    let rest: u64 = sorted.iter().skip(num_top).map(|g| g.size).sum();
    if rest > 0 {
        slices.push(("other groups".to_string(), rest));
    }

    let used: u64 = sorted.iter().map(|g| g.size).sum();
    let free = total_size.saturating_sub(used);
    if free > 0 {
        slices.push(("free".to_string(), free));
    }

    slices
}
