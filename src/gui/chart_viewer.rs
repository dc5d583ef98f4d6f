//! Chart Viewer Widget
//! Central panel showing the two histograms side by side above the statistics table.

use crate::charts::{ChartData, ChartPlotter};
use egui::{RichText, ScrollArea};

/// Space between the two panels
const CHART_SPACING: f32 = 15.0;
/// Space reserved below the plots for the statistics table
const TABLE_RESERVE: f32 = 190.0;
const MIN_CHART_HEIGHT: f32 = 240.0;

/// Displays the histogram figure.
pub struct ChartViewer {
    pub chart_data: ChartData,
}

impl ChartViewer {
    pub fn new(chart_data: ChartData) -> Self {
        Self { chart_data }
    }

    /// Draw both panels; plot height follows the window so labels keep their room.
    pub fn show(&self, ui: &mut egui::Ui) {
        let chart_height = (ui.available_height() - TABLE_RESERVE).max(MIN_CHART_HEIGHT);

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.columns(2, |columns| {
                    columns[0].vertical(|ui| {
                        ChartPlotter::draw_distance_chart(ui, &self.chart_data, chart_height);
                    });
                    columns[1].vertical(|ui| {
                        ChartPlotter::draw_links_chart(ui, &self.chart_data, chart_height);
                    });
                });

                ui.add_space(CHART_SPACING);
                ui.label(RichText::new("Summary").size(14.0).strong());
                ui.add_space(4.0);
                ChartPlotter::draw_stats_table(ui, &self.chart_data.stats);
            });
    }
}
