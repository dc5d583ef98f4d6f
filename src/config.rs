//! Analysis Configuration
//! Fixed defaults for the input file, binning and figure layout.

use std::path::PathBuf;

/// Input file, relative to the working directory.
pub const DEFAULT_CSV_PATH: &str = "birthbirthtri2.csv";

/// Equal-width bins per histogram series.
pub const DEFAULT_BINS: usize = 20;

/// Column names the loader requires.
pub const MAX_DISTANCE_COL: &str = "max_distance";
pub const AVERAGE_DISTANCE_COL: &str = "average_distance";
pub const SIBLING_COL: &str = "has_GT_SIBLING";
pub const LINK_NUM_COL: &str = "link_num";
pub const DISTANCE_DIFF_COL: &str = "distance_diff";

pub const REQUIRED_COLUMNS: [&str; 4] = [
    MAX_DISTANCE_COL,
    AVERAGE_DISTANCE_COL,
    SIBLING_COL,
    LINK_NUM_COL,
];

/// Settings for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub csv_path: PathBuf,
    pub bins: usize,
    /// Opacity of the overlaid sibling histograms
    pub sibling_alpha: f32,
    /// Opacity of the link-count histogram
    pub links_alpha: f32,
    /// Figure size in pixels (12x6 inches at 100 dpi)
    pub figure_size: (u32, u32),
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            bins: DEFAULT_BINS,
            sibling_alpha: 0.5,
            links_alpha: 0.7,
            figure_size: (1200, 600),
        }
    }
}
