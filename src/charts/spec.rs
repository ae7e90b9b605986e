//! Chart Spec Module
//! Renderer-agnostic chart descriptions handed to the presentation layer.

use serde::Serialize;

/// Diverging color scale used by the correlation heatmap.
pub const HEATMAP_COLOR_SCALE: &str = "RdBu";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Scatter,
    Box,
    Heatmap,
}

/// One point of a scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Marker size source value (24h volume); NaN serializes as null.
    pub size: f64,
    /// Color group and hover label (the `name` column).
    pub label: String,
}

/// Scatter chart over the top-N prefix, log-scaled on both axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSpec {
    pub title: String,
    pub x_col: String,
    pub y_col: String,
    pub log_x: bool,
    pub log_y: bool,
    pub points: Vec<ScatterPoint>,
}

/// One box-plot trace: all values of the chosen column for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxTrace {
    pub group: String,
    pub values: Vec<f64>,
}

/// Box chart over the full dataset, one trace per `name` group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSpec {
    pub title: String,
    pub column: String,
    pub traces: Vec<BoxTrace>,
}

/// Pairwise Pearson correlation matrix with a diverging scale centered at 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapSpec {
    pub title: String,
    pub columns: Vec<String>,
    /// Row-major, symmetric, 1.0 on the diagonal.
    pub matrix: Vec<Vec<f64>>,
    pub color_scale: String,
    pub midpoint: f64,
}

/// A complete chart description. Produced fresh on every parameter change,
/// never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Scatter(ScatterSpec),
    Box(BoxSpec),
    Heatmap(HeatmapSpec),
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSpec::Scatter(_) => ChartKind::Scatter,
            ChartSpec::Box(_) => ChartKind::Box,
            ChartSpec::Heatmap(_) => ChartKind::Heatmap,
        }
    }

    /// An empty spec is valid and renders as a blank chart.
    pub fn is_empty(&self) -> bool {
        match self {
            ChartSpec::Scatter(s) => s.points.is_empty(),
            ChartSpec::Box(s) => s.traces.is_empty(),
            ChartSpec::Heatmap(s) => s.columns.is_empty(),
        }
    }
}
