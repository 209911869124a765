//! Data module - CSV loading and joining

mod dataset;
mod indicator;
mod loader;

pub use dataset::{join, CountryRecord, Dataset, SourceTables};
pub use indicator::{
    parse_number, Indicator, IndicatorRow, IndicatorTable, ParseIndicatorError, COUNTRY_COL,
    GEO_COL, REGION_COL,
};
pub use loader::{DataSources, DatasetLoader, LoaderError, SourceError};

#[cfg(test)]
pub(crate) use dataset::tests as fixtures;
