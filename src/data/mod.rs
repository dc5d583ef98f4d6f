//! Data module - CSV loading and the distance transformation

mod loader;
mod processor;

pub use loader::DataLoader;
pub use processor::{DataProcessor, DistanceAnalysis};
#[cfg(test)]
pub use processor::SiblingFlag;
