//! Dashboard
//! Owns the dataset and view state, and tells a renderer what to redraw.

use crate::charts::{BarChartData, ChartBuilder, LineView, ScatterView};
use crate::data::Dataset;
use crate::view::state::{Redraw, ViewCommand, ViewState};
use tracing::debug;

/// Rendering collaborator notified after state changes.
pub trait Renderer {
    fn draw_bars(&mut self, bars: &BarChartData);
    fn draw_scatter(&mut self, scatter: &ScatterView);
    /// `None` when the selected country is not in the dataset.
    fn draw_line(&mut self, line: Option<&LineView>);
}

/// Dataset, current selections and the renderer they feed.
pub struct Dashboard<R: Renderer> {
    dataset: Dataset,
    state: ViewState,
    renderer: R,
}

impl<R: Renderer> Dashboard<R> {
    pub fn new(dataset: Dataset, state: ViewState, renderer: R) -> Self {
        Self {
            dataset,
            state,
            renderer,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Draw every view once.
    pub fn render_all(&mut self) {
        self.render(Redraw::ALL);
    }

    /// Apply a command and redraw the views it affects.
    pub fn dispatch(&mut self, command: ViewCommand) -> Redraw {
        debug!(?command, "dispatch");
        let (state, redraw) = self.state.clone().apply(command);
        self.state = state;
        self.render(redraw);
        redraw
    }

    fn render(&mut self, redraw: Redraw) {
        if redraw.bar {
            let bars = ChartBuilder::bar_data(&self.dataset, &self.state);
            self.renderer.draw_bars(&bars);
        }
        if redraw.scatter {
            let scatter = ChartBuilder::scatter_view(&self.dataset, &self.state);
            self.renderer.draw_scatter(&scatter);
        }
        if redraw.line {
            let line = ChartBuilder::line_view(&self.dataset, &self.state);
            self.renderer.draw_line(line.as_ref());
        }
    }
}
