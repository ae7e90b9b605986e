//! Coinscope - Session-Gated Crypto Analytics Core
//!
//! Authenticates a user, loads or accepts an uploaded crypto dataset,
//! derives the volume-to-market-cap metric, and builds declarative chart
//! specs (scatter, box, correlation heatmap) plus table and CSV-download
//! views. Widget drawing and chart rasterization are left to the consumer.

pub mod auth;
pub mod charts;
pub mod dashboard;
pub mod data;
pub mod export;

pub use auth::{AuthError, CredentialStore, Session};
pub use charts::{
    BoxSpec, BoxTrace, ChartError, ChartKind, ChartParameters, ChartSpec, ChartSpecBuilder,
    HeatmapSpec, ScatterPoint, ScatterSpec, TOP_N_MAX, TOP_N_MIN,
};
pub use dashboard::{Dashboard, DashboardError, DashboardView, TablePreview};
pub use data::{DatasetLoader, LoadError, MetricDeriver, SchemaError};
pub use export::{Download, ExportBuilder, ExportError};
