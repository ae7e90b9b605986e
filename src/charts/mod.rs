//! Charts module - declarative chart specs and their builders

mod builder;
mod spec;

pub use builder::{ChartError, ChartParameters, ChartSpecBuilder, TOP_N_MAX, TOP_N_MIN};
pub use spec::{BoxSpec, BoxTrace, ChartKind, ChartSpec, HeatmapSpec, ScatterPoint, ScatterSpec};
