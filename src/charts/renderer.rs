//! Static Chart Renderer
//! Draws the histogram figure to a PNG file with plotters.
//!
//! Layout:
//! 1. Left: distance difference, false and true sibling overlaid, legend upper right
//! 2. Right: number of links

use crate::charts::plotter::{
    DISTANCE_TITLE, DISTANCE_X_LABEL, LINKS_TITLE, LINKS_X_LABEL, Y_LABEL,
};
use crate::charts::{ChartData, HistogramSeries};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
}

fn drawing_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render both panels side by side and write them to `path` as PNG.
    pub fn render_png(
        data: &ChartData,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_err)?;

        let (left, right) = root.split_horizontally((size.0 / 2) as i32);

        Self::draw_panel(&left, DISTANCE_TITLE, DISTANCE_X_LABEL, &data.distance, true)?;
        Self::draw_panel(
            &right,
            LINKS_TITLE,
            LINKS_X_LABEL,
            std::slice::from_ref(&data.links),
            false,
        )?;

        root.present().map_err(drawing_err)?;
        info!(path = %path.display(), width = size.0, height = size.1, "exported figure");
        Ok(())
    }

    fn draw_panel(
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
        title: &str,
        x_label: &str,
        series: &[HistogramSeries],
        with_legend: bool,
    ) -> Result<(), RenderError> {
        let (x_min, x_max) = Self::x_range(series);
        let y_max = Self::y_ceiling(series);

        let mut chart = ChartBuilder::on(area)
            .caption(title, ("sans-serif", 18))
            .margin(12)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)
            .map_err(drawing_err)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(x_label)
            .y_desc(Y_LABEL)
            .draw()
            .map_err(drawing_err)?;

        for s in series {
            let [r, g, b] = s.rgb;
            let color = RGBColor(r, g, b);
            let alpha = f64::from(s.alpha);
            let bars = s
                .histogram
                .edges
                .windows(2)
                .zip(s.histogram.counts.iter())
                .map(move |(edge, &count)| {
                    Rectangle::new(
                        [(edge[0], 0.0), (edge[1], count as f64)],
                        color.mix(alpha).filled(),
                    )
                });

            let drawn = chart.draw_series(bars).map_err(drawing_err)?;
            if with_legend {
                drawn.label(s.label.as_str()).legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.mix(alpha).filled())
                });
            }
        }

        if with_legend {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(drawing_err)?;
        }

        Ok(())
    }

    /// Union of the bin ranges of all series.
    fn x_range(series: &[HistogramSeries]) -> (f64, f64) {
        let lo = series
            .iter()
            .filter_map(|s| s.histogram.edges.first().copied())
            .fold(f64::INFINITY, f64::min);
        let hi = series
            .iter()
            .filter_map(|s| s.histogram.edges.last().copied())
            .fold(f64::NEG_INFINITY, f64::max);

        if lo.is_finite() && hi.is_finite() && lo < hi {
            (lo, hi)
        } else {
            (0.0, 1.0)
        }
    }

    /// Tallest bar plus 5% headroom.
    fn y_ceiling(series: &[HistogramSeries]) -> f64 {
        let max_count = series
            .iter()
            .map(|s| s.histogram.max_count())
            .max()
            .unwrap_or(0);
        (max_count as f64 * 1.05).max(1.0)
    }
}
