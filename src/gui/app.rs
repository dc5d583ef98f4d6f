//! Linkage Distribution Main Application
//! Window hosting the histogram figure with a PNG export action.

use crate::charts::{ChartData, StaticChartRenderer};
use crate::gui::ChartViewer;
use egui::{Color32, RichText, TopBottomPanel};
use std::path::PathBuf;
use tracing::error;

/// The bitmap encoder picks the format from the extension.
fn with_png_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension("png");
    }
    path
}

/// Main application window.
pub struct DistributionApp {
    chart_viewer: ChartViewer,
    figure_size: (u32, u32),
    status: String,
    source_name: String,
}

impl DistributionApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        chart_data: ChartData,
        figure_size: (u32, u32),
        source_name: String,
    ) -> Self {
        Self {
            chart_viewer: ChartViewer::new(chart_data),
            figure_size,
            status: "Ready".to_string(),
            source_name,
        }
    }

    /// Ask for a destination and write the figure there.
    fn handle_export_png(&mut self) {
        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("linkage_distribution.png")
            .save_file()
        {
            Some(path) => with_png_extension(path),
            None => return, // User cancelled
        };

        match StaticChartRenderer::render_png(
            &self.chart_viewer.chart_data,
            &output_path,
            self.figure_size,
        ) {
            Ok(()) => {
                self.status = format!("Exported {}", output_path.display());
            }
            Err(e) => {
                error!(error = %e, path = %output_path.display(), "export failed");
                self.status = format!("Export error: {}", e);
            }
        }
    }
}

impl eframe::App for DistributionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("📊 Linkage Distribution")
                        .size(18.0)
                        .color(Color32::from_rgb(100, 149, 237)),
                );
                ui.label(RichText::new(&self.source_name).size(12.0).color(Color32::GRAY));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("💾 Export PNG").clicked() {
                        self.handle_export_png();
                    }
                });
            });
        });

        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(RichText::new(&self.status).size(11.0));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_path_gets_png_extension() {
        let dir = tempfile::tempdir().unwrap();

        let bare = with_png_extension(dir.path().join("noext"));
        assert_eq!(bare, dir.path().join("noext.png"));

        let named = with_png_extension(dir.path().join("figure.png"));
        assert_eq!(named, dir.path().join("figure.png"));
    }

    #[test]
    fn test_export_without_extension_renders() {
        use crate::config::AnalysisConfig;
        use crate::data::{DistanceAnalysis, SiblingFlag};
        use crate::stats::StatsCalculator;

        let analysis = DistanceAnalysis::partition(
            vec![0.2, 0.4],
            &[SiblingFlag::True, SiblingFlag::False],
            vec![1.0, 2.0],
        );
        let config = AnalysisConfig::default();
        let stats = StatsCalculator::summarize(&analysis);
        let data = ChartData::from_analysis(&analysis, stats, &config);

        let dir = tempfile::tempdir().unwrap();
        let path = with_png_extension(dir.path().join("noext"));

        StaticChartRenderer::render_png(&data, &path, config.figure_size).unwrap();
        assert!(path.is_file());
    }
}
