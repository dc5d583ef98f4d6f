//! Charts module - Histogram binning and chart rendering

mod histogram;
mod plotter;
mod renderer;

pub use histogram::Histogram;
pub use plotter::{ChartData, ChartPlotter, HistogramSeries};
pub use renderer::StaticChartRenderer;
