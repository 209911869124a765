//! Charts module - Chart data for the rendering layer

mod series;

pub use series::{
    BarChartData, BarDatum, ChartBuilder, LinePoint, LineView, ScatterPoint, ScatterView, PALETTE,
    REGION_ORDER,
};
