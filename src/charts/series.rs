//! Chart Series Module
//! Builds the numeric inputs for the bar, scatter and line views.

use crate::data::{CountryRecord, Dataset, Indicator};
use crate::stats::RegionAggregator;
use crate::view::ViewState;
use serde::Serialize;

/// Band order of the bar chart. Regions not listed follow in name order.
pub const REGION_ORDER: [&str; 4] = ["asia", "europe", "africa", "americas"];

/// Region color palette, assigned by first-seen region order.
pub const PALETTE: [&str; 4] = ["#DD4949", "#39CDA1", "#FD710C", "#A14BE5"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarDatum {
    pub region: String,
    pub value: f64,
    pub color: &'static str,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartData {
    pub indicator: Indicator,
    pub year: String,
    pub bars: Vec<BarDatum>,
    /// `[0, max]` of the bar values.
    pub y_domain: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub country: String,
    pub geo: String,
    pub region: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: &'static str,
    /// False when another region is selected.
    pub visible: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterView {
    pub year: String,
    pub x_indicator: Indicator,
    pub y_indicator: Indicator,
    pub radius_indicator: Indicator,
    pub points: Vec<ScatterPoint>,
    pub x_extent: Option<(f64, f64)>,
    pub y_extent: Option<(f64, f64)>,
    pub radius_extent: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinePoint {
    pub year: i32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineView {
    pub country: String,
    pub indicator: Indicator,
    pub points: Vec<LinePoint>,
    pub year_extent: Option<(i32, i32)>,
    pub value_extent: Option<(f64, f64)>,
}

/// Derives chart data from the dataset and the current view state.
pub struct ChartBuilder;

impl ChartBuilder {
    /// Color for a region, by its position among the dataset's regions.
    pub fn region_color(dataset: &Dataset, region: &str) -> &'static str {
        let index = dataset
            .regions()
            .iter()
            .position(|r| *r == region)
            .unwrap_or(0);
        PALETTE[index % PALETTE.len()]
    }

    /// Region means of the bar indicator, in band order.
    pub fn bar_data(dataset: &Dataset, state: &ViewState) -> BarChartData {
        let means =
            RegionAggregator::mean_by_region(dataset.records(), state.bar_indicator, &state.year);

        let mut bars: Vec<BarDatum> = means
            .into_iter()
            .map(|(region, value)| BarDatum {
                color: Self::region_color(dataset, &region),
                highlighted: state
                    .selected_region
                    .as_ref()
                    .is_none_or(|selected| *selected == region),
                region,
                value,
            })
            .collect();
        bars.sort_by(|a, b| {
            Self::band_rank(&a.region)
                .cmp(&Self::band_rank(&b.region))
                .then_with(|| a.region.cmp(&b.region))
        });

        let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);

        BarChartData {
            indicator: state.bar_indicator,
            year: state.year.clone(),
            bars,
            y_domain: (0.0, max),
        }
    }

    /// One point per country for the selected x/y/radius indicators.
    pub fn scatter_view(dataset: &Dataset, state: &ViewState) -> ScatterView {
        let year = state.year.as_str();
        let value = |record: &CountryRecord, indicator: Indicator| record.value(indicator, year);

        let points: Vec<ScatterPoint> = dataset
            .records()
            .iter()
            .map(|record| ScatterPoint {
                country: record.country().to_string(),
                geo: record.geo().to_string(),
                region: record.region().to_string(),
                x: value(record, state.x_indicator),
                y: value(record, state.y_indicator),
                radius: value(record, state.radius_indicator),
                color: Self::region_color(dataset, record.region()),
                visible: state
                    .selected_region
                    .as_deref()
                    .is_none_or(|selected| selected == record.region()),
                selected: record.country() == state.selected_country,
            })
            .collect();

        let extent = |f: fn(&ScatterPoint) -> f64| {
            let values: Vec<f64> = points.iter().map(f).collect();
            RegionAggregator::extent(&values)
        };

        ScatterView {
            year: state.year.clone(),
            x_indicator: state.x_indicator,
            y_indicator: state.y_indicator,
            radius_indicator: state.radius_indicator,
            x_extent: extent(|p| p.x),
            y_extent: extent(|p| p.y),
            radius_extent: extent(|p| p.radius),
            points,
        }
    }

    /// Time series of the line indicator for the selected country.
    ///
    /// `None` when the country is not in the dataset. An absent sub-record
    /// gives an empty series.
    pub fn line_view(dataset: &Dataset, state: &ViewState) -> Option<LineView> {
        let record = dataset.find_country(&state.selected_country)?;

        let points: Vec<LinePoint> = record
            .indicator(state.line_indicator)
            .map(|row| row.series())
            .unwrap_or_default()
            .into_iter()
            .map(|(year, value)| LinePoint { year, value })
            .collect();

        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        let year_extent = match (points.first(), points.last()) {
            (Some(first), Some(last)) => Some((first.year, last.year)),
            _ => None,
        };

        Some(LineView {
            country: record.country().to_string(),
            indicator: state.line_indicator,
            value_extent: RegionAggregator::extent(&values),
            year_extent,
            points,
        })
    }

    fn band_rank(region: &str) -> usize {
        REGION_ORDER
            .iter()
            .position(|r| *r == region)
            .unwrap_or(REGION_ORDER.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{country, table, tables};
    use crate::data::{join, IndicatorRow};

    fn dataset() -> Dataset {
        let mut sources = tables(vec![
            country("rus", "Russia", "europe")
                .with_value("2000", "146")
                .with_value("2001", "145"),
            country("chn", "China", "asia").with_value("2000", "1260"),
            country("nga", "Nigeria", "africa").with_value("2000", "122"),
            country("fra", "France", "europe").with_value("2000", "60"),
            country("atl", "Atlantis", "oceania").with_value("2000", "1"),
        ]);
        sources.child_mortality = table(
            Indicator::ChildMortality,
            vec![
                IndicatorRow::new("rus")
                    .with_value("1999", "24")
                    .with_value("2000", "23")
                    .with_value("1998", "")
                    .with_value("2001", "21.5"),
                IndicatorRow::new("chn").with_value("2000", "37"),
                IndicatorRow::new("nga").with_value("2000", "187"),
                IndicatorRow::new("fra").with_value("2000", "5"),
            ],
        );
        sources.gdp = table(
            Indicator::Gdp,
            vec![IndicatorRow::new("rus").with_value("2000", "10000")],
        );
        join(sources)
    }

    #[test]
    fn bars_follow_band_order() {
        let data = ChartBuilder::bar_data(&dataset(), &ViewState::default());

        let regions: Vec<&str> = data.bars.iter().map(|b| b.region.as_str()).collect();
        assert_eq!(regions, vec!["asia", "europe", "africa", "oceania"]);
        assert_eq!(data.bars[1].value, 14.0);
        assert_eq!(data.y_domain, (0.0, 187.0));
        assert!(data.bars.iter().all(|b| b.highlighted));
    }

    #[test]
    fn selected_region_highlights_one_bar() {
        let state = ViewState {
            selected_region: Some("asia".to_string()),
            ..ViewState::default()
        };

        let data = ChartBuilder::bar_data(&dataset(), &state);

        let highlighted: Vec<&str> = data
            .bars
            .iter()
            .filter(|b| b.highlighted)
            .map(|b| b.region.as_str())
            .collect();
        assert_eq!(highlighted, vec!["asia"]);
    }

    #[test]
    fn scatter_reads_each_axis_indicator() {
        let state = ViewState {
            x_indicator: Indicator::Population,
            y_indicator: Indicator::ChildMortality,
            radius_indicator: Indicator::Gdp,
            selected_region: Some("europe".to_string()),
            ..ViewState::default()
        };

        let view = ChartBuilder::scatter_view(&dataset(), &state);

        assert_eq!(view.points.len(), 5);
        let rus = &view.points[0];
        assert_eq!((rus.x, rus.y, rus.radius), (146.0, 23.0, 10000.0));
        assert!(rus.selected);
        assert!(rus.visible);
        assert!(!view.points[1].visible);
        assert_eq!(view.x_extent, Some((1.0, 1260.0)));
        assert_eq!(view.radius_extent, Some((0.0, 10000.0)));
    }

    #[test]
    fn region_colors_follow_first_seen_order() {
        let data = dataset();

        assert_eq!(ChartBuilder::region_color(&data, "europe"), PALETTE[0]);
        assert_eq!(ChartBuilder::region_color(&data, "asia"), PALETTE[1]);
        assert_eq!(ChartBuilder::region_color(&data, "oceania"), PALETTE[3]);
    }

    #[test]
    fn line_is_sorted_by_year() {
        let view = ChartBuilder::line_view(&dataset(), &ViewState::default()).unwrap();

        let years: Vec<i32> = view.points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![1998, 1999, 2000, 2001]);
        assert_eq!(view.points[0].value, 0.0);
        assert_eq!(view.year_extent, Some((1998, 2001)));
        assert_eq!(view.value_extent, Some((0.0, 24.0)));
    }

    #[test]
    fn line_for_absent_sub_record_is_empty() {
        let state = ViewState {
            selected_country: "Atlantis".to_string(),
            ..ViewState::default()
        };

        let view = ChartBuilder::line_view(&dataset(), &state).unwrap();

        assert!(view.points.is_empty());
        assert_eq!(view.year_extent, None);
    }

    #[test]
    fn line_for_unknown_country_is_none() {
        let state = ViewState {
            selected_country: "Nowhere".to_string(),
            ..ViewState::default()
        };

        assert!(ChartBuilder::line_view(&dataset(), &state).is_none());
    }
}
