//! Stats module - Region aggregation

mod aggregator;

pub use aggregator::{RegionAggregator, RegionMeans};
