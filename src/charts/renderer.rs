//! Static Chart Renderer
//! Renders the three roster charts as PNG images via plotters.
//!
//! Layout:
//! 1. Gender distribution: bar chart, one pastel bar per gender
//! 2. Age categories: bar chart over the fixed age bands
//! 3. Gender by age: 2x2 grid of pie charts, one per age band

use crate::stats::{CategoryCount, GenderBreakdown};
use anyhow::{Context, Result};
use plotters::element::Pie;
use plotters::prelude::*;
use std::path::Path;

/// Pastel bar palette.
const BAR_PALETTE: [RGBColor; 6] = [
    RGBColor(161, 201, 244),
    RGBColor(255, 180, 130),
    RGBColor(141, 229, 161),
    RGBColor(255, 159, 155),
    RGBColor(208, 187, 255),
    RGBColor(222, 187, 155),
];

/// Pie palette, first two matching the gender-split design.
const PIE_PALETTE: [RGBColor; 4] = [
    RGBColor(255, 153, 153),
    RGBColor(102, 179, 255),
    RGBColor(153, 255, 178),
    RGBColor(255, 218, 121),
];

const BAR_CHART_SIZE: (u32, u32) = (800, 600);
const PIE_GRID_SIZE: (u32, u32) = (900, 900);
const PIE_START_ANGLE: f64 = 140.0;

pub struct ChartRenderer;

impl ChartRenderer {
    /// Bar chart of gender counts.
    pub fn render_gender_distribution(counts: &[CategoryCount], path: &Path) -> Result<()> {
        Self::render_bar_chart(counts, "Employees by gender", "Gender", "Count", path)
    }

    /// Bar chart of age-band counts.
    pub fn render_age_categories(counts: &[CategoryCount], path: &Path) -> Result<()> {
        Self::render_bar_chart(
            counts,
            "Employees by age category",
            "Age category",
            "Count",
            path,
        )
    }

    fn render_bar_chart(
        counts: &[CategoryCount],
        title: &str,
        x_desc: &str,
        y_desc: &str,
        path: &Path,
    ) -> Result<()> {
        let root = BitMapBackend::new(path, BAR_CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let max_count = counts.iter().map(|c| c.count).max().unwrap_or(0);
        let y_max = Self::with_headroom(max_count);

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(20)
            .set_label_area_size(LabelAreaPosition::Left, 55)
            .set_label_area_size(LabelAreaPosition::Bottom, 45)
            .build_cartesian_2d((0usize..counts.len().max(1)).into_segmented(), 0u32..y_max)?;

        let labels: Vec<String> = counts.iter().map(|c| c.label.clone()).collect();
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .x_label_formatter(&move |seg| match seg {
                SegmentValue::CenterOf(i) if *i < labels.len() => labels[*i].clone(),
                _ => String::new(),
            })
            .y_label_formatter(&|v| format!("{}", v))
            .label_style(("sans-serif", 16))
            .draw()?;

        chart.draw_series(counts.iter().enumerate().map(|(i, c)| {
            let color = BAR_PALETTE[i % BAR_PALETTE.len()];
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0u32),
                    (SegmentValue::Exact(i + 1), c.count),
                ],
                color.filled(),
            );
            bar.set_margin(0, 0, 18, 18);
            bar
        }))?;

        root.present()
            .with_context(|| format!("cannot write chart to {}", path.display()))?;
        Ok(())
    }

    /// 2x2 grid of pie charts, one per age band, showing the gender split.
    pub fn render_gender_pie_grid(breakdown: &GenderBreakdown, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, PIE_GRID_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let cells = root.split_evenly((2, 2));
        let colors = Self::pie_colors(breakdown.genders.len());

        for (cell, slice) in cells.iter().zip(&breakdown.bands) {
            let cell = cell.titled(
                &format!("Age category: {}", slice.band),
                ("sans-serif", 22),
            )?;

            let (w, h) = cell.dim_in_pixel();
            if slice.total() == 0 {
                cell.draw(&Text::new(
                    "no data",
                    (w as i32 / 2 - 30, h as i32 / 2),
                    ("sans-serif", 20).into_font().color(&BLACK),
                ))?;
                continue;
            }

            let center = (w as i32 / 2, h as i32 / 2);
            let radius = f64::from(w.min(h)) * 0.32;
            let sizes: Vec<f64> = slice.counts.iter().map(|&c| f64::from(c)).collect();

            let mut pie = Pie::new(&center, &radius, &sizes, &colors, &breakdown.genders);
            pie.start_angle(PIE_START_ANGLE);
            pie.label_style(("sans-serif", 18).into_font());
            pie.percentages(("sans-serif", 16).into_font().color(&BLACK));
            cell.draw(&pie)?;
        }

        root.present()
            .with_context(|| format!("cannot write chart to {}", path.display()))?;
        Ok(())
    }

    /// Y-axis upper bound with ~10% headroom, never zero.
    fn with_headroom(max_count: u32) -> u32 {
        let max_count = max_count.max(1);
        max_count + (max_count + 9) / 10
    }

    fn pie_colors(n: usize) -> Vec<RGBColor> {
        (0..n.max(1))
            .map(|i| PIE_PALETTE[i % PIE_PALETTE.len()])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headroom_scales_with_count() {
        assert_eq!(ChartRenderer::with_headroom(0), 2);
        assert_eq!(ChartRenderer::with_headroom(1), 2);
        assert_eq!(ChartRenderer::with_headroom(10), 11);
        assert_eq!(ChartRenderer::with_headroom(100), 110);
    }

    #[test]
    fn pie_colors_cycle_from_the_gender_palette() {
        let colors = ChartRenderer::pie_colors(2);
        assert_eq!(colors, vec![RGBColor(255, 153, 153), RGBColor(102, 179, 255)]);

        let many = ChartRenderer::pie_colors(6);
        assert_eq!(many.len(), 6);
        assert_eq!(many[4], many[0]);
    }
}
