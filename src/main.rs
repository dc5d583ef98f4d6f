//! Linkage Distribution - Histograms of record-linkage comparison results
//!
//! Loads the linkage results CSV, derives the spread between maximum and
//! average distance, and shows it split by ground-truth sibling status next
//! to the distribution of link counts.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use anyhow::{anyhow, Context, Result};
use charts::ChartData;
use config::AnalysisConfig;
use data::{DataLoader, DataProcessor};
use eframe::egui;
use gui::DistributionApp;
use stats::StatsCalculator;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AnalysisConfig::default();

    let df = DataLoader::load_csv(&config.csv_path)
        .with_context(|| format!("loading {}", config.csv_path.display()))?;
    let analysis = DataProcessor::analyze(&df).context("deriving distance difference")?;
    let summary = StatsCalculator::summarize(&analysis);

    info!(
        rows = analysis.distance_diff.len(),
        recognized = analysis.recognized_count(),
        true_sibling = summary.true_sibling.count,
        false_sibling = summary.false_sibling.count,
        p_value = summary.sibling_ttest.p_value,
        "analysis ready"
    );

    let chart_data = ChartData::from_analysis(&analysis, summary, &config);
    let source_name = config.csv_path.display().to_string();
    let figure_size = config.figure_size;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([figure_size.0 as f32, figure_size.1 as f32 + 260.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Linkage Distribution"),
        ..Default::default()
    };

    // Blocks until the window is closed
    eframe::run_native(
        "Linkage Distribution",
        options,
        Box::new(move |cc| {
            Ok(Box::new(DistributionApp::new(
                cc,
                chart_data,
                figure_size,
                source_name,
            )))
        }),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))?;

    info!("viewer closed");
    Ok(())
}
