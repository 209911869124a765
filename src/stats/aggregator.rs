//! Region Aggregator Module
//! Per-region means of one indicator in one year, plus value extents.

use crate::data::{CountryRecord, Indicator};
use rayon::prelude::*;
use statrs::statistics::Statistics;
use std::collections::HashMap;

/// Region name → mean value of one indicator in one year.
pub type RegionMeans = HashMap<String, f64>;

/// Handles region aggregation over the joined dataset.
pub struct RegionAggregator;

impl RegionAggregator {
    /// Arithmetic mean of `indicator` in `year`, grouped by region.
    ///
    /// Every member counts, with missing or non-numeric cells read as `0.0`,
    /// so sparse data pulls a region's mean toward zero. Filter the records
    /// first if that bias matters.
    pub fn mean_by_region(
        records: &[CountryRecord],
        indicator: Indicator,
        year: &str,
    ) -> RegionMeans {
        let mut groups: HashMap<&str, Vec<f64>> = HashMap::new();
        for record in records {
            groups
                .entry(record.region())
                .or_default()
                .push(record.value(indicator, year));
        }

        groups
            .into_iter()
            .map(|(region, values)| (region.to_string(), Self::mean(&values)))
            .collect()
    }

    /// Region means for every indicator in one year, computed in parallel.
    pub fn mean_by_region_all(
        records: &[CountryRecord],
        year: &str,
    ) -> HashMap<Indicator, RegionMeans> {
        Indicator::ALL
            .par_iter()
            .map(|&indicator| (indicator, Self::mean_by_region(records, indicator, year)))
            .collect()
    }

    /// `(min, max)` of a value set, `None` when empty.
    pub fn extent(values: &[f64]) -> Option<(f64, f64)> {
        if values.is_empty() {
            return None;
        }
        Some((Statistics::min(values), Statistics::max(values)))
    }

    fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
