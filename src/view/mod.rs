//! View module - Dashboard state and rendering hand-off

mod dashboard;
mod state;

pub use dashboard::{Dashboard, Renderer};
pub use state::{Redraw, ViewCommand, ViewState};
