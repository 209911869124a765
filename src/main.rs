//! Worldview - Country Indicator Dashboard CLI
//!
//! Loads the indicator tables and prints region means or chart data as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use worldview::charts::{BarChartData, ChartBuilder, LineView, ScatterView};
use worldview::{
    Dashboard, DashboardConfig, DatasetLoader, Indicator, RegionAggregator, Renderer,
    ViewCommand, ViewState,
};

#[derive(Parser)]
#[command(author, version, about = "Country indicator dashboard data")]
struct Args {
    /// Directory holding population.csv, gdp.csv, cmu5.csv, life_expectancy.csv, fertility-rate.csv
    #[arg(long, default_value = "data", conflicts_with = "config")]
    data_dir: PathBuf,
    /// JSON config with source paths and an initial view
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mean of an indicator per region (all indicators when none is given)
    Means {
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        indicator: Option<Indicator>,
    },
    /// Bar chart data
    Bars {
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        indicator: Option<Indicator>,
        #[arg(long)]
        region: Option<String>,
    },
    /// Scatter plot data
    Scatter {
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        x: Option<Indicator>,
        #[arg(long)]
        y: Option<Indicator>,
        #[arg(long)]
        radius: Option<Indicator>,
        #[arg(long)]
        region: Option<String>,
    },
    /// Time series for one country
    Line {
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        indicator: Option<Indicator>,
    },
    /// Apply a JSON array of view commands and print the final chart data
    Replay { commands: PathBuf },
}

/// Keeps the latest frame of each view.
#[derive(Default)]
struct FrameLog {
    bars: Option<BarChartData>,
    scatter: Option<ScatterView>,
    line: Option<LineView>,
}

impl Renderer for FrameLog {
    fn draw_bars(&mut self, bars: &BarChartData) {
        info!(indicator = %bars.indicator, year = %bars.year, bars = bars.bars.len(), "draw bars");
        self.bars = Some(bars.clone());
    }

    fn draw_scatter(&mut self, scatter: &ScatterView) {
        info!(year = %scatter.year, points = scatter.points.len(), "draw scatter");
        self.scatter = Some(scatter.clone());
    }

    fn draw_line(&mut self, line: Option<&LineView>) {
        match line {
            Some(line) => info!(country = %line.country, points = line.points.len(), "draw line"),
            None => info!("draw line: selected country not in dataset"),
        }
        self.line = line.cloned();
    }
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DashboardConfig::from_dir(&args.data_dir),
    };

    let dataset = DatasetLoader::load(&config.sources).context("Failed to load dataset")?;
    info!(countries = dataset.len(), regions = ?dataset.regions(), "dataset ready");

    let mut state = config.view;
    let output = match args.command {
        Command::Means { year, indicator } => {
            let year = year.unwrap_or(state.year);
            match indicator {
                Some(indicator) => serde_json::to_value(RegionAggregator::mean_by_region(
                    dataset.records(),
                    indicator,
                    &year,
                ))?,
                None => {
                    let all: BTreeMap<String, _> =
                        RegionAggregator::mean_by_region_all(dataset.records(), &year)
                            .into_iter()
                            .map(|(indicator, means)| (indicator.to_string(), means))
                            .collect();
                    serde_json::to_value(all)?
                }
            }
        }
        Command::Bars {
            year,
            indicator,
            region,
        } => {
            let commands = year
                .map(ViewCommand::SetYear)
                .into_iter()
                .chain(indicator.map(ViewCommand::SetBarIndicator))
                .chain(region.map(ViewCommand::SelectRegion));
            state = apply_all(state, commands);
            serde_json::to_value(ChartBuilder::bar_data(&dataset, &state))?
        }
        Command::Scatter {
            year,
            x,
            y,
            radius,
            region,
        } => {
            let commands = year
                .map(ViewCommand::SetYear)
                .into_iter()
                .chain(x.map(ViewCommand::SetXIndicator))
                .chain(y.map(ViewCommand::SetYIndicator))
                .chain(radius.map(ViewCommand::SetRadiusIndicator))
                .chain(region.map(ViewCommand::SelectRegion));
            state = apply_all(state, commands);
            serde_json::to_value(ChartBuilder::scatter_view(&dataset, &state))?
        }
        Command::Line { country, indicator } => {
            let commands = country
                .map(ViewCommand::SelectCountry)
                .into_iter()
                .chain(indicator.map(ViewCommand::SetLineIndicator));
            state = apply_all(state, commands);
            let line = ChartBuilder::line_view(&dataset, &state).with_context(|| {
                format!("Country {:?} not found in dataset", state.selected_country)
            })?;
            serde_json::to_value(line)?
        }
        Command::Replay { commands } => {
            let text = fs::read_to_string(&commands)
                .with_context(|| format!("Failed to read {}", commands.display()))?;
            let commands: Vec<ViewCommand> =
                serde_json::from_str(&text).context("Failed to parse view commands")?;

            let mut dashboard = Dashboard::new(dataset, state, FrameLog::default());
            dashboard.render_all();
            for command in commands {
                let redraw = dashboard.dispatch(command);
                info!(?redraw, "applied");
            }
            let final_state = dashboard.state().clone();
            let frames = dashboard.into_renderer();
            serde_json::json!({
                "state": final_state,
                "bars": frames.bars,
                "scatter": frames.scatter,
                "line": frames.line,
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn apply_all(state: ViewState, commands: impl IntoIterator<Item = ViewCommand>) -> ViewState {
    commands
        .into_iter()
        .fold(state, |state, command| state.apply(command).0)
}
