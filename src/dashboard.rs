//! Dashboard Module
//! Session-gated orchestrator: login, dataset lifecycle, and the
//! parameter-to-view pipeline.

use crate::auth::{AuthError, CredentialStore, Session};
use crate::charts::{ChartError, ChartParameters, ChartSpec, ChartSpecBuilder};
use crate::data::{
    numeric_column_names, DatasetLoader, LoadError, MetricDeriver, SchemaError,
};
use crate::export::{Download, ExportBuilder, ExportError};
use log::warn;
use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("No dataset loaded")]
    NoDataset,
}

/// Stringified top-N rows for the raw-data table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Everything one render pass hands to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub scatter: ChartSpec,
    pub box_plot: ChartSpec,
    /// Present only when requested and buildable.
    pub heatmap: Option<ChartSpec>,
    /// User-visible reason the heatmap is missing; other views still render.
    pub heatmap_error: Option<String>,
    pub table: TablePreview,
    /// Full dataset and top-N prefix, both as labeled CSV blobs.
    pub downloads: [Download; 2],
}

/// One user's analytics context: credential store, session, and the
/// currently loaded augmented frame.
///
/// Single logical thread of control; every call runs to completion.
/// Independent dashboards share no mutable state.
pub struct Dashboard {
    store: CredentialStore,
    session: Session,
    loader: DatasetLoader,
    frame: Option<DataFrame>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(CredentialStore::demo())
    }
}

impl Dashboard {
    pub fn new(store: CredentialStore) -> Self {
        Self {
            store,
            session: Session::new(),
            loader: DatasetLoader::new(),
            frame: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn username(&self) -> Option<&str> {
        self.session.username()
    }

    /// Attempt a login; on failure the session stays anonymous and the
    /// error kind (unknown user vs wrong password) reaches the caller.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        self.session.login(&self.store, username, password)
    }

    /// Clear the session and drop the loaded dataset.
    pub fn logout(&mut self) {
        self.session.logout();
        self.frame = None;
    }

    /// Load and augment the built-in dataset.
    pub fn load_builtin(&mut self) -> Result<(), DashboardError> {
        self.session.require_authenticated()?;
        let df = self.loader.load_builtin()?.clone();
        self.frame = Some(MetricDeriver::augment(&df)?);
        Ok(())
    }

    /// Load and augment an uploaded CSV.
    pub fn load_upload(&mut self, bytes: &[u8]) -> Result<(), DashboardError> {
        self.session.require_authenticated()?;
        let df = self.loader.load_bytes(bytes)?.clone();
        self.frame = Some(MetricDeriver::augment(&df)?);
        Ok(())
    }

    /// Column names of the augmented frame, for the control widgets.
    pub fn columns(&self) -> Vec<String> {
        self.frame
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Numeric column names of the augmented frame.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.frame
            .as_ref()
            .map(numeric_column_names)
            .unwrap_or_default()
    }

    pub fn row_count(&self) -> usize {
        self.frame.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Initial parameter selection: first numeric column on x and the box
    /// plot, second on y. None until a dataset with two numeric columns
    /// is loaded.
    pub fn default_parameters(&self) -> Option<ChartParameters> {
        let numeric = self.numeric_columns();
        if numeric.len() < 2 {
            return None;
        }
        Some(ChartParameters {
            x_axis: numeric[0].clone(),
            y_axis: numeric[1].clone(),
            box_column: numeric[0].clone(),
            ..ChartParameters::default()
        })
    }

    /// Produce the full output surface for one set of parameters.
    ///
    /// Gated on authentication and a loaded dataset. A heatmap that fails
    /// with insufficient data is reported in the view instead of aborting;
    /// every other failure aborts the render.
    pub fn render(&self, params: &ChartParameters) -> Result<DashboardView, DashboardError> {
        self.session.require_authenticated()?;
        let frame = self.frame.as_ref().ok_or(DashboardError::NoDataset)?;
        params.validate(&numeric_column_names(frame))?;

        // Top-N is a prefix of arrival order, never a ranking
        let slice = frame.head(Some(params.top_n));

        let scatter = ChartSpecBuilder::scatter(&slice, &params.x_axis, &params.y_axis)?;
        let box_plot = ChartSpecBuilder::box_plot(frame, &params.box_column)?;

        let (heatmap, heatmap_error) = if params.show_correlation {
            match ChartSpecBuilder::heatmap(frame) {
                Ok(spec) => (Some(spec), None),
                Err(err @ ChartError::InsufficientData { .. }) => {
                    warn!("correlation heatmap unavailable: {}", err);
                    (None, Some(err.to_string()))
                }
                Err(err) => return Err(err.into()),
            }
        } else {
            (None, None)
        };

        Ok(DashboardView {
            scatter,
            box_plot,
            heatmap,
            heatmap_error,
            table: table_preview(&slice),
            downloads: [
                ExportBuilder::full_download(frame)?,
                ExportBuilder::filtered_download(frame, params.top_n)?,
            ],
        })
    }
}

/// Stringify a frame slice for the raw-data table.
fn table_preview(df: &DataFrame) -> TablePreview {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let series: Vec<&Column> = df.get_columns().iter().collect();
    let rows = (0..df.height())
        .map(|i| {
            series
                .iter()
                .map(|col| {
                    col.as_materialized_series()
                        .get(i)
                        .map(|v| v.to_string().trim_matches('"').to_string())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    TablePreview { columns, rows }
}
