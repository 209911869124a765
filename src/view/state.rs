//! View State
//! Dashboard selections and the reducer that updates them.

use crate::data::Indicator;
use serde::{Deserialize, Serialize};

/// Current dashboard selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub x_indicator: Indicator,
    pub y_indicator: Indicator,
    pub radius_indicator: Indicator,
    pub bar_indicator: Indicator,
    pub line_indicator: Indicator,
    pub year: String,
    pub selected_country: String,
    pub selected_region: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            x_indicator: Indicator::FertilityRate,
            y_indicator: Indicator::ChildMortality,
            radius_indicator: Indicator::Gdp,
            bar_indicator: Indicator::ChildMortality,
            line_indicator: Indicator::ChildMortality,
            year: "2000".to_string(),
            selected_country: "Russia".to_string(),
            selected_region: None,
        }
    }
}

/// User interactions, one per dashboard control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewCommand {
    SetYear(String),
    SetXIndicator(Indicator),
    SetYIndicator(Indicator),
    SetRadiusIndicator(Indicator),
    SetBarIndicator(Indicator),
    SetLineIndicator(Indicator),
    /// Bar click.
    SelectRegion(String),
    ClearRegion,
    /// Scatter point click.
    SelectCountry(String),
}

/// Views that need redrawing after a command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Redraw {
    pub scatter: bool,
    pub bar: bool,
    pub line: bool,
}

impl Redraw {
    pub const NONE: Redraw = Redraw {
        scatter: false,
        bar: false,
        line: false,
    };

    pub const ALL: Redraw = Redraw {
        scatter: true,
        bar: true,
        line: true,
    };

    pub fn is_empty(self) -> bool {
        self == Redraw::NONE
    }
}

impl ViewState {
    /// Apply a command, returning the new state and the views to redraw.
    ///
    /// A command that leaves the state unchanged redraws nothing.
    pub fn apply(mut self, command: ViewCommand) -> (ViewState, Redraw) {
        let (changed, redraw) = match command {
            ViewCommand::SetYear(year) => (
                replace(&mut self.year, year),
                Redraw {
                    scatter: true,
                    bar: true,
                    ..Redraw::NONE
                },
            ),
            ViewCommand::SetXIndicator(indicator) => (
                replace(&mut self.x_indicator, indicator),
                Redraw {
                    scatter: true,
                    ..Redraw::NONE
                },
            ),
            ViewCommand::SetYIndicator(indicator) => (
                replace(&mut self.y_indicator, indicator),
                Redraw {
                    scatter: true,
                    ..Redraw::NONE
                },
            ),
            ViewCommand::SetRadiusIndicator(indicator) => (
                replace(&mut self.radius_indicator, indicator),
                Redraw {
                    scatter: true,
                    ..Redraw::NONE
                },
            ),
            ViewCommand::SetBarIndicator(indicator) => (
                replace(&mut self.bar_indicator, indicator),
                Redraw {
                    bar: true,
                    ..Redraw::NONE
                },
            ),
            ViewCommand::SetLineIndicator(indicator) => (
                replace(&mut self.line_indicator, indicator),
                Redraw {
                    line: true,
                    ..Redraw::NONE
                },
            ),
            ViewCommand::SelectRegion(region) => (
                replace(&mut self.selected_region, Some(region)),
                Redraw {
                    scatter: true,
                    bar: true,
                    ..Redraw::NONE
                },
            ),
            ViewCommand::ClearRegion => (
                replace(&mut self.selected_region, None),
                Redraw {
                    scatter: true,
                    bar: true,
                    ..Redraw::NONE
                },
            ),
            ViewCommand::SelectCountry(country) => (
                replace(&mut self.selected_country, country),
                Redraw {
                    scatter: true,
                    line: true,
                    ..Redraw::NONE
                },
            ),
        };

        (self, if changed { redraw } else { Redraw::NONE })
    }
}

/// Store `value` in `slot`, reporting whether it differed.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
