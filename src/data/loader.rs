//! CSV Dataset Loader Module
//! Reads the five indicator CSV files using Polars and joins them into a dataset.

use crate::data::dataset::{join, Dataset, SourceTables};
use crate::data::indicator::{
    Indicator, IndicatorRow, IndicatorTable, COUNTRY_COL, GEO_COL, REGION_COL,
};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Why a single source could not be turned into a table.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
}

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("{indicator} data unavailable at {}: {source}", .path.display())]
    DataUnavailable {
        indicator: Indicator,
        path: PathBuf,
        #[source]
        source: SourceError,
    },
}

/// Paths of the five indicator CSV files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSources {
    pub population: PathBuf,
    pub gdp: PathBuf,
    pub child_mortality: PathBuf,
    pub life_expectancy: PathBuf,
    pub fertility_rate: PathBuf,
}

impl DataSources {
    /// Default file names inside a data directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let path = |indicator: Indicator| dir.join(indicator.default_file_name());
        Self {
            population: path(Indicator::Population),
            gdp: path(Indicator::Gdp),
            child_mortality: path(Indicator::ChildMortality),
            life_expectancy: path(Indicator::LifeExpectancy),
            fertility_rate: path(Indicator::FertilityRate),
        }
    }

    pub fn path(&self, indicator: Indicator) -> &Path {
        match indicator {
            Indicator::Population => &self.population,
            Indicator::Gdp => &self.gdp,
            Indicator::ChildMortality => &self.child_mortality,
            Indicator::LifeExpectancy => &self.life_expectancy,
            Indicator::FertilityRate => &self.fertility_rate,
        }
    }
}

/// Loads indicator tables with Polars and joins them by `geo`.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Read all five sources concurrently, then join.
    ///
    /// The join only starts once every read has finished; any failed read
    /// fails the whole load.
    pub fn load(sources: &DataSources) -> Result<Dataset, LoaderError> {
        let read = |indicator: Indicator| Self::load_table(indicator, sources.path(indicator));

        let ((population, gdp), ((child_mortality, life_expectancy), fertility_rate)) =
            rayon::join(
                || rayon::join(|| read(Indicator::Population), || read(Indicator::Gdp)),
                || {
                    rayon::join(
                        || {
                            rayon::join(
                                || read(Indicator::ChildMortality),
                                || read(Indicator::LifeExpectancy),
                            )
                        },
                        || read(Indicator::FertilityRate),
                    )
                },
            );

        let tables = SourceTables {
            population: population?,
            gdp: gdp?,
            child_mortality: child_mortality?,
            life_expectancy: life_expectancy?,
            fertility_rate: fertility_rate?,
        };
        info!(
            population = tables.population.len(),
            gdp = tables.gdp.len(),
            child_mortality = tables.child_mortality.len(),
            life_expectancy = tables.life_expectancy.len(),
            fertility_rate = tables.fertility_rate.len(),
            "loaded indicator tables"
        );

        Ok(join(tables))
    }

    /// Load one indicator CSV file.
    pub fn load_table(indicator: Indicator, path: &Path) -> Result<IndicatorTable, LoaderError> {
        debug!(%indicator, path = %path.display(), "reading CSV");
        Self::read_csv(path)
            .and_then(|df| Self::table_from_dataframe(indicator, &df))
            .map_err(|source| LoaderError::DataUnavailable {
                indicator,
                path: path.to_path_buf(),
                source,
            })
    }

    fn read_csv(path: &Path) -> Result<DataFrame, SourceError> {
        // Schema inference disabled: every column is read as a string so
        // numeric cells reach consumers verbatim.
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;
        Ok(df)
    }

    /// Convert a DataFrame into an indicator table.
    ///
    /// `geo` is required in every table; the population table also needs
    /// `country` and `region`. All other columns are value columns. Null
    /// cells become empty strings.
    pub fn table_from_dataframe(
        indicator: Indicator,
        df: &DataFrame,
    ) -> Result<IndicatorTable, SourceError> {
        let mut required = vec![GEO_COL];
        if indicator == Indicator::Population {
            required.extend([COUNTRY_COL, REGION_COL]);
        }
        for name in required {
            if df.column(name).is_err() {
                return Err(SourceError::MissingColumn(name));
            }
        }

        let height = df.height();
        let mut geo: Vec<String> = vec![String::new(); height];
        let mut country: Option<Vec<String>> = None;
        let mut region: Option<Vec<String>> = None;
        let mut values: Vec<(String, Vec<String>)> = Vec::new();

        for column in df.get_columns() {
            let as_string = column.cast(&DataType::String)?;
            let cells: Vec<String> = as_string
                .str()?
                .into_iter()
                .map(|cell| cell.unwrap_or_default().to_string())
                .collect();

            match column.name().as_str() {
                GEO_COL => geo = cells,
                COUNTRY_COL => country = Some(cells),
                REGION_COL => region = Some(cells),
                other => values.push((other.to_string(), cells)),
            }
        }

        let rows = (0..height)
            .map(|i| {
                let mut row = IndicatorRow::new(std::mem::take(&mut geo[i]));
                if let Some(country) = country.as_mut() {
                    row = row.with_country(std::mem::take(&mut country[i]));
                }
                if let Some(region) = region.as_mut() {
                    row = row.with_region(std::mem::take(&mut region[i]));
                }
                for (header, cells) in values.iter_mut() {
                    row = row.with_value(header.clone(), std::mem::take(&mut cells[i]));
                }
                row
            })
            .collect();

        Ok(IndicatorTable::new(indicator, rows))
    }
}
