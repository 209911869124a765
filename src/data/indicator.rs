//! Indicator Tables
//! Indicator keys, per-country indicator rows and the numeric cell policy.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifying column: join key shared by every table.
pub const GEO_COL: &str = "geo";
/// Identifying column: country display name.
pub const COUNTRY_COL: &str = "country";
/// Identifying column: continent grouping (population table only).
pub const REGION_COL: &str = "region";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown indicator `{0}` (expected one of population, gdp, child-mortality, life-expectancy, fertility-rate)")]
pub struct ParseIndicatorError(pub String);

/// One of the five indicator series carried per country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Indicator {
    Population,
    Gdp,
    ChildMortality,
    LifeExpectancy,
    FertilityRate,
}

impl Indicator {
    pub const ALL: [Indicator; 5] = [
        Indicator::Population,
        Indicator::Gdp,
        Indicator::ChildMortality,
        Indicator::LifeExpectancy,
        Indicator::FertilityRate,
    ];

    /// Canonical key, as emitted by the dashboard selectors.
    pub fn key(self) -> &'static str {
        match self {
            Indicator::Population => "population",
            Indicator::Gdp => "gdp",
            Indicator::ChildMortality => "child-mortality",
            Indicator::LifeExpectancy => "life-expectancy",
            Indicator::FertilityRate => "fertility-rate",
        }
    }

    /// File name used for this indicator inside a data directory.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Indicator::Population => "population.csv",
            Indicator::Gdp => "gdp.csv",
            Indicator::ChildMortality => "cmu5.csv",
            Indicator::LifeExpectancy => "life_expectancy.csv",
            Indicator::FertilityRate => "fertility-rate.csv",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Indicator {
    type Err = ParseIndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Indicator::ALL
            .into_iter()
            .find(|indicator| indicator.key() == s)
            .ok_or_else(|| ParseIndicatorError(s.to_string()))
    }
}

/// Parse a cell into a number, substituting `0.0` for anything that is not one.
///
/// Missing cells, empty strings and non-numeric content all read as `0.0`.
/// Non-finite spellings (`NaN`, `inf`) are treated as non-numeric.
pub fn parse_number(cell: Option<&str>) -> f64 {
    cell.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// A single row of an indicator table: identifying fields plus year → value cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorRow {
    geo: String,
    country: Option<String>,
    region: Option<String>,
    values: BTreeMap<String, String>,
}

impl IndicatorRow {
    pub fn new(geo: impl Into<String>) -> Self {
        Self {
            geo: geo.into(),
            country: None,
            region: None,
            values: BTreeMap::new(),
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_value(mut self, year: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(year.into(), value.into());
        self
    }

    pub fn geo(&self) -> &str {
        &self.geo
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Raw cell for a year column, if the column exists.
    pub fn get(&self, year: &str) -> Option<&str> {
        self.values.get(year).map(String::as_str)
    }

    /// Numeric value for a year column (see [`parse_number`]).
    pub fn value(&self, year: &str) -> f64 {
        parse_number(self.get(year))
    }

    /// Value column headers, in header-sorted order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Year-indexed series: every column whose header is an integer year, ascending.
    pub fn series(&self) -> Vec<(i32, f64)> {
        let mut series: Vec<(i32, f64)> = self
            .values
            .iter()
            .filter_map(|(header, cell)| {
                let year = header.trim().parse::<i32>().ok()?;
                Some((year, parse_number(Some(cell))))
            })
            .collect();
        series.sort_by_key(|(year, _)| *year);
        series
    }
}

/// An ordered, immutable indicator table as loaded from one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorTable {
    indicator: Indicator,
    rows: Vec<IndicatorRow>,
}

impl IndicatorTable {
    pub fn new(indicator: Indicator, rows: Vec<IndicatorRow>) -> Self {
        Self { indicator, rows }
    }

    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row whose `geo` equals `geo`.
    pub fn find_by_geo(&self, geo: &str) -> Option<&IndicatorRow> {
        self.rows.iter().find(|row| row.geo == geo)
    }

    /// `geo` → index of its first row. Later duplicates are ignored.
    pub(crate) fn first_match_index(&self) -> HashMap<&str, usize> {
        let mut index = HashMap::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            index.entry(row.geo.as_str()).or_insert(i);
        }
        index
    }

    pub(crate) fn into_rows(self) -> Vec<IndicatorRow> {
        self.rows
    }
}
