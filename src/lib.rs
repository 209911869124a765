//! Worldview - Country Indicator Dashboard Core
//!
//! Loads population, GDP, child mortality, life expectancy and fertility rate
//! tables, joins them per country, aggregates by region and derives the data
//! behind the dashboard's bar, scatter and line views.

pub mod charts;
pub mod config;
pub mod data;
pub mod stats;
pub mod view;

pub use config::{ConfigError, DashboardConfig};
pub use data::{CountryRecord, DataSources, Dataset, DatasetLoader, Indicator, LoaderError};
pub use stats::{RegionAggregator, RegionMeans};
pub use view::{Dashboard, Redraw, Renderer, ViewCommand, ViewState};
