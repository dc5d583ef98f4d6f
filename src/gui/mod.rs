//! GUI module - Viewer window

mod app;
mod chart_viewer;

pub use app::DistributionApp;
pub use chart_viewer::ChartViewer;
