//! Chart Plotter Module
//! Draws the two histogram panels interactively using egui_plot.

use crate::charts::Histogram;
use crate::config::AnalysisConfig;
use crate::data::DistanceAnalysis;
use crate::stats::{AnalysisSummary, SeriesStats, SIGNIFICANCE_THRESHOLD};
use egui::{Color32, RichText, Stroke};
use egui_plot::{Bar, BarChart, Corner, Legend, Plot};

pub const FALSE_SIBLING_RGB: [u8; 3] = [255, 165, 0]; // Orange
pub const TRUE_SIBLING_RGB: [u8; 3] = [0, 0, 255]; // Blue
pub const LINKS_RGB: [u8; 3] = [0, 128, 0]; // Green

pub const DISTANCE_TITLE: &str = "Histogram of Distance Difference by Sibling Status";
pub const DISTANCE_X_LABEL: &str = "Distance Difference (max - avg)";
pub const LINKS_TITLE: &str = "Histogram for number of links";
pub const LINKS_X_LABEL: &str = "Number of links";
pub const Y_LABEL: &str = "Frequency";

/// One binned series with its styling.
#[derive(Clone)]
pub struct HistogramSeries {
    pub label: String,
    pub rgb: [u8; 3],
    pub alpha: f32,
    pub histogram: Histogram,
}

impl HistogramSeries {
    pub fn color32(&self) -> Color32 {
        let [r, g, b] = self.rgb;
        Color32::from_rgb(r, g, b).gamma_multiply(self.alpha)
    }
}

/// Everything needed to draw the figure, interactively or to a file.
#[derive(Clone)]
pub struct ChartData {
    /// False subset first so the true subset is drawn on top
    pub distance: Vec<HistogramSeries>,
    pub links: HistogramSeries,
    pub stats: AnalysisSummary,
}

impl ChartData {
    /// Bin each series independently.
    pub fn from_analysis(
        analysis: &DistanceAnalysis,
        stats: AnalysisSummary,
        config: &AnalysisConfig,
    ) -> Self {
        let series = |label: &str, rgb: [u8; 3], alpha: f32, values: &[f64]| HistogramSeries {
            label: label.to_string(),
            rgb,
            alpha,
            histogram: Histogram::compute(values, config.bins),
        };

        Self {
            distance: vec![
                series(
                    "False Sibling",
                    FALSE_SIBLING_RGB,
                    config.sibling_alpha,
                    &analysis.false_sibling,
                ),
                series(
                    "True Sibling",
                    TRUE_SIBLING_RGB,
                    config.sibling_alpha,
                    &analysis.true_sibling,
                ),
            ],
            links: series("", LINKS_RGB, config.links_alpha, &analysis.link_num),
            stats,
        }
    }
}

/// Creates the histogram panels using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    fn bar_chart(series: &HistogramSeries) -> BarChart {
        let width = series.histogram.bin_width();
        let fill = series.color32();

        let bars: Vec<Bar> = series
            .histogram
            .bars()
            .map(|(center, count)| {
                Bar::new(center, count as f64)
                    .width(width)
                    .fill(fill)
                    .stroke(Stroke::new(0.5, fill))
            })
            .collect();

        BarChart::new(bars).color(fill).name(&series.label)
    }

    /// Panel A: overlaid false/true sibling histograms.
    pub fn draw_distance_chart(ui: &mut egui::Ui, chart_data: &ChartData, height: f32) {
        ui.label(RichText::new(DISTANCE_TITLE).size(14.0).strong());

        Plot::new("distance_diff_histogram")
            .height(height)
            .legend(Legend::default().position(Corner::RightTop))
            .x_axis_label(DISTANCE_X_LABEL)
            .y_axis_label(Y_LABEL)
            .include_y(0.0)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for series in &chart_data.distance {
                    plot_ui.bar_chart(Self::bar_chart(series));
                }
            });
    }

    /// Panel B: link count histogram.
    pub fn draw_links_chart(ui: &mut egui::Ui, chart_data: &ChartData, height: f32) {
        ui.label(RichText::new(LINKS_TITLE).size(14.0).strong());

        Plot::new("link_num_histogram")
            .height(height)
            .x_axis_label(LINKS_X_LABEL)
            .y_axis_label(Y_LABEL)
            .include_y(0.0)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(Self::bar_chart(&chart_data.links));
            });
    }

    fn stat_label(ui: &mut egui::Ui, value: f64) {
        let text = if value.is_nan() {
            "-".to_string()
        } else {
            format!("{:.3}", value)
        };
        ui.label(RichText::new(text).size(11.0));
    }

    fn stats_row(ui: &mut egui::Ui, stats: &SeriesStats) {
        ui.label(RichText::new(&stats.name).size(11.0));
        ui.label(RichText::new(stats.count.to_string()).size(11.0));
        Self::stat_label(ui, stats.mean);
        Self::stat_label(ui, stats.median);
        Self::stat_label(ui, stats.std);
        Self::stat_label(ui, stats.min);
        Self::stat_label(ui, stats.p05);
        Self::stat_label(ui, stats.p95);
        Self::stat_label(ui, stats.max);
        ui.end_row();
    }

    /// Draw statistics table
    pub fn draw_stats_table(ui: &mut egui::Ui, stats: &AnalysisSummary) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("series_stats_table")
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in [
                            "Series", "N", "Mean", "Median", "Std", "Min", "P05", "P95", "Max",
                        ] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for row in stats.rows() {
                            Self::stats_row(ui, row);
                        }
                    });

                ui.add_space(6.0);

                let ttest = stats.sibling_ttest;
                let p_text = if ttest.p_value.is_nan() {
                    "Welch t-test (true vs false): not enough data".to_string()
                } else {
                    format!(
                        "Welch t-test (true vs false): p = {:.4} ({} at {})",
                        ttest.p_value,
                        if ttest.is_significant {
                            "significant"
                        } else {
                            "not significant"
                        },
                        SIGNIFICANCE_THRESHOLD
                    )
                };
                let p_color = if ttest.is_significant {
                    Color32::from_rgb(220, 53, 69)
                } else {
                    ui.visuals().text_color()
                };
                ui.label(RichText::new(p_text).size(11.0).color(p_color));

                if stats.unrecognized_flags > 0 {
                    ui.label(
                        RichText::new(format!(
                            "{} rows excluded: has_GT_SIBLING was neither true nor false",
                            stats.unrecognized_flags
                        ))
                        .size(11.0)
                        .color(Color32::from_rgb(243, 156, 18)),
                    );
                }
            });
    }
}
