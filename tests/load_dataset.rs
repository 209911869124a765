use std::fs;
use std::path::Path;
use tempfile::tempdir;
use worldview::charts::ChartBuilder;
use worldview::data::SourceError;
use worldview::{
    DataSources, DatasetLoader, Indicator, LoaderError, RegionAggregator, ViewCommand, ViewState,
};

const POPULATION: &str = "\
geo,country,region,1999,2000
rus,Russia,europe,147000000,146000000
chn,China,asia,1250000000,1260000000
nga,Nigeria,africa,119000000,122000000
fra,France,europe,60000000,60500000
";

const GDP: &str = "\
geo,country,1999,2000
fra,France,21000,22000
rus,Russia,1300,1800
rus,Russia,9999,9999
chn,China,850,
";

const CHILD_MORTALITY: &str = "\
geo,country,1999,2000
nga,Nigeria,190,187
chn,China,39,N/A
rus,Russia,24,23
fra,France,5,5
";

const LIFE_EXPECTANCY: &str = "\
geo,country,1999,2000
rus,Russia,65.1,65.3
";

const FERTILITY_RATE: &str = "\
geo,country,1999,2000
fra,France,1.8,1.9
";

fn write_sources(dir: &Path) -> DataSources {
    fs::write(dir.join("population.csv"), POPULATION).unwrap();
    fs::write(dir.join("gdp.csv"), GDP).unwrap();
    fs::write(dir.join("cmu5.csv"), CHILD_MORTALITY).unwrap();
    fs::write(dir.join("life_expectancy.csv"), LIFE_EXPECTANCY).unwrap();
    fs::write(dir.join("fertility-rate.csv"), FERTILITY_RATE).unwrap();
    DataSources::from_dir(dir)
}

#[test]
fn load_joins_in_population_order() {
    let dir = tempdir().unwrap();
    let sources = write_sources(dir.path());

    let dataset = DatasetLoader::load(&sources).unwrap();

    let ids: Vec<(&str, &str, &str)> = dataset
        .records()
        .iter()
        .map(|r| (r.geo(), r.country(), r.region()))
        .collect();
    assert_eq!(
        ids,
        vec![
            ("rus", "Russia", "europe"),
            ("chn", "China", "asia"),
            ("nga", "Nigeria", "africa"),
            ("fra", "France", "europe"),
        ]
    );

    let rus = dataset.find_geo("rus").unwrap();
    assert_eq!(rus.indicator(Indicator::Population).unwrap().get("2000"), Some("146000000"));
    // first of the duplicated gdp rows
    assert_eq!(rus.value(Indicator::Gdp, "2000"), 1800.0);
    assert_eq!(rus.value(Indicator::LifeExpectancy, "1999"), 65.1);

    let nga = dataset.find_geo("nga").unwrap();
    assert!(nga.indicator(Indicator::Gdp).is_none());
    assert_eq!(nga.value(Indicator::Gdp, "2000"), 0.0);
}

#[test]
fn region_means_from_files() {
    let dir = tempdir().unwrap();
    let dataset = DatasetLoader::load(&write_sources(dir.path())).unwrap();

    let gdp = RegionAggregator::mean_by_region(dataset.records(), Indicator::Gdp, "2000");
    assert_eq!(gdp.len(), 3);
    assert_eq!(gdp["europe"], 11900.0);
    // empty cell for China
    assert_eq!(gdp["asia"], 0.0);
    // no gdp row for Nigeria
    assert_eq!(gdp["africa"], 0.0);

    let cm = RegionAggregator::mean_by_region(dataset.records(), Indicator::ChildMortality, "2000");
    assert_eq!(cm["asia"], 0.0);
    assert_eq!(cm["europe"], 14.0);

    let missing = RegionAggregator::mean_by_region(dataset.records(), Indicator::Gdp, "1850");
    assert!(missing.values().all(|&v| v == 0.0));
}

#[test]
fn chart_data_follows_commands() {
    let dir = tempdir().unwrap();
    let dataset = DatasetLoader::load(&write_sources(dir.path())).unwrap();

    let (state, _) = ViewState::default().apply(ViewCommand::SelectCountry("France".into()));
    let (state, _) = state.apply(ViewCommand::SetLineIndicator(Indicator::FertilityRate));

    let line = ChartBuilder::line_view(&dataset, &state).unwrap();
    let points: Vec<(i32, f64)> = line.points.iter().map(|p| (p.year, p.value)).collect();
    assert_eq!(points, vec![(1999, 1.8), (2000, 1.9)]);

    let scatter = ChartBuilder::scatter_view(&dataset, &state);
    let selected: Vec<&str> = scatter
        .points
        .iter()
        .filter(|p| p.selected)
        .map(|p| p.country.as_str())
        .collect();
    assert_eq!(selected, vec!["France"]);
}

#[test]
fn missing_source_fails_the_whole_load() {
    let dir = tempdir().unwrap();
    let sources = write_sources(dir.path());
    fs::remove_file(dir.path().join("cmu5.csv")).unwrap();

    let err = DatasetLoader::load(&sources).unwrap_err();

    let LoaderError::DataUnavailable {
        indicator, path, ..
    } = &err;
    assert_eq!(*indicator, Indicator::ChildMortality);
    assert!(path.ends_with("cmu5.csv"));
    assert!(err.to_string().contains("child-mortality"));
}

#[test]
fn population_without_region_column_is_unavailable() {
    let dir = tempdir().unwrap();
    let sources = write_sources(dir.path());
    fs::write(
        dir.path().join("population.csv"),
        "geo,country,2000\nrus,Russia,146000000\n",
    )
    .unwrap();

    let err = DatasetLoader::load(&sources).unwrap_err();

    let LoaderError::DataUnavailable {
        indicator, source, ..
    } = err;
    assert_eq!(indicator, Indicator::Population);
    assert!(matches!(source, SourceError::MissingColumn("region")));
}
