//! Joined Dataset
//! One record per population row, with every indicator matched by `geo`.

use crate::data::indicator::{parse_number, Indicator, IndicatorRow, IndicatorTable};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// The five source tables, as handed to [`join`].
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub population: IndicatorTable,
    pub gdp: IndicatorTable,
    pub child_mortality: IndicatorTable,
    pub life_expectancy: IndicatorTable,
    pub fertility_rate: IndicatorTable,
}

/// A country with its five indicator sub-records.
///
/// `population` is always present; the other four are `None` when the
/// corresponding table had no row for this `geo`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRecord {
    country: String,
    geo: String,
    region: String,
    population: IndicatorRow,
    gdp: Option<IndicatorRow>,
    child_mortality: Option<IndicatorRow>,
    life_expectancy: Option<IndicatorRow>,
    fertility_rate: Option<IndicatorRow>,
}

impl CountryRecord {
    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn geo(&self) -> &str {
        &self.geo
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Sub-record for an indicator, `None` when the join found no match.
    pub fn indicator(&self, indicator: Indicator) -> Option<&IndicatorRow> {
        match indicator {
            Indicator::Population => Some(&self.population),
            Indicator::Gdp => self.gdp.as_ref(),
            Indicator::ChildMortality => self.child_mortality.as_ref(),
            Indicator::LifeExpectancy => self.life_expectancy.as_ref(),
            Indicator::FertilityRate => self.fertility_rate.as_ref(),
        }
    }

    /// Numeric value of `indicator` in `year`; absent data reads as `0.0`.
    pub fn value(&self, indicator: Indicator, year: &str) -> f64 {
        parse_number(self.indicator(indicator).and_then(|row| row.get(year)))
    }
}

/// The joined, read-only dataset, in population-table order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    records: Vec<CountryRecord>,
}

impl Dataset {
    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose display name is `country`.
    pub fn find_country(&self, country: &str) -> Option<&CountryRecord> {
        self.records.iter().find(|r| r.country == country)
    }

    /// First record with join key `geo`.
    pub fn find_geo(&self, geo: &str) -> Option<&CountryRecord> {
        self.records.iter().find(|r| r.geo == geo)
    }

    /// Distinct regions in first-seen order.
    pub fn regions(&self) -> Vec<&str> {
        let mut regions: Vec<&str> = Vec::new();
        for record in &self.records {
            if !regions.contains(&record.region()) {
                regions.push(record.region());
            }
        }
        regions
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a CountryRecord;
    type IntoIter = std::slice::Iter<'a, CountryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Join the secondary tables onto the population table by first `geo` match.
///
/// Output length and order equal the population table's.
pub fn join(tables: SourceTables) -> Dataset {
    let SourceTables {
        population,
        gdp,
        child_mortality,
        life_expectancy,
        fertility_rate,
    } = tables;

    let gdp_index = gdp.first_match_index();
    let cm_index = child_mortality.first_match_index();
    let le_index = life_expectancy.first_match_index();
    let fr_index = fertility_rate.first_match_index();

    let records: Vec<CountryRecord> = population
        .into_rows()
        .into_iter()
        .map(|row| {
            let geo = row.geo().to_string();
            CountryRecord {
                country: row.country().unwrap_or_default().to_string(),
                region: row.region().unwrap_or_default().to_string(),
                gdp: matched_row(&gdp, &gdp_index, &geo),
                child_mortality: matched_row(&child_mortality, &cm_index, &geo),
                life_expectancy: matched_row(&life_expectancy, &le_index, &geo),
                fertility_rate: matched_row(&fertility_rate, &fr_index, &geo),
                population: row,
                geo,
            }
        })
        .collect();

    info!(countries = records.len(), "joined indicator tables");
    Dataset { records }
}

fn matched_row(
    table: &IndicatorTable,
    index: &HashMap<&str, usize>,
    geo: &str,
) -> Option<IndicatorRow> {
    let row = index.get(geo).map(|&i| table.rows()[i].clone());
    if row.is_none() {
        debug!(geo, indicator = %table.indicator(), "no matching row");
    }
    row
}
