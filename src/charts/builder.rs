//! Chart Spec Builder Module
//! Pure builders turning a frame plus user parameters into chart specs.

use crate::charts::spec::{
    BoxSpec, BoxTrace, ChartSpec, HeatmapSpec, ScatterPoint, ScatterSpec, HEATMAP_COLOR_SCALE,
};
use crate::data::{COL_NAME, COL_VOLUME};
use log::debug;
use polars::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bounds of the top-N slider.
pub const TOP_N_MIN: usize = 5;
pub const TOP_N_MAX: usize = 50;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Column '{0}' is not a numeric column of the current dataset")]
    UnknownColumn(String),
    #[error("top_n must be between {TOP_N_MIN} and {TOP_N_MAX}, got {0}")]
    TopNOutOfRange(usize),
    #[error("Correlation needs at least 2 numeric columns and 2 rows (have {columns} and {rows})")]
    InsufficientData { columns: usize, rows: usize },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// User-selected chart parameters, as captured by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartParameters {
    pub x_axis: String,
    pub y_axis: String,
    pub box_column: String,
    pub top_n: usize,
    pub show_correlation: bool,
}

impl Default for ChartParameters {
    fn default() -> Self {
        Self {
            x_axis: String::new(),
            y_axis: String::new(),
            box_column: String::new(),
            top_n: 20,
            show_correlation: false,
        }
    }
}

impl ChartParameters {
    /// Check every column choice against the numeric-column subset and
    /// the top-N bounds.
    pub fn validate(&self, numeric_columns: &[String]) -> Result<(), ChartError> {
        for col in [&self.x_axis, &self.y_axis, &self.box_column] {
            if !numeric_columns.iter().any(|c| c == col) {
                return Err(ChartError::UnknownColumn(col.clone()));
            }
        }
        if self.top_n < TOP_N_MIN || self.top_n > TOP_N_MAX {
            return Err(ChartError::TopNOutOfRange(self.top_n));
        }
        Ok(())
    }
}

/// Stateless chart-spec builders: identical inputs produce identical specs.
pub struct ChartSpecBuilder;

impl ChartSpecBuilder {
    /// Scatter over a frame slice, log-scaled on both axes.
    ///
    /// The slice is expected to be the first top-N rows in arrival order;
    /// no ranking is applied here or anywhere upstream. Rows whose x or y
    /// is non-finite or not positive are left off the log axes. An empty
    /// slice yields a valid, blank spec.
    pub fn scatter(df_slice: &DataFrame, x_col: &str, y_col: &str) -> Result<ChartSpec, ChartError> {
        let xs = numeric_values(df_slice, x_col)?;
        let ys = numeric_values(df_slice, y_col)?;
        let sizes = numeric_values(df_slice, COL_VOLUME)?;
        let labels = string_values(df_slice, COL_NAME)?;

        let points: Vec<ScatterPoint> = xs
            .iter()
            .zip(ys.iter())
            .enumerate()
            .filter(|&(_, (&x, &y))| x.is_finite() && x > 0.0 && y.is_finite() && y > 0.0)
            .map(|(i, (&x, &y))| ScatterPoint {
                x,
                y,
                size: sizes[i],
                label: labels[i].clone(),
            })
            .collect();

        debug!(
            "scatter {} vs {}: {} of {} rows on log axes",
            y_col,
            x_col,
            points.len(),
            df_slice.height()
        );

        Ok(ChartSpec::Scatter(ScatterSpec {
            title: format!("{} vs {} Scatter Plot", y_col, x_col),
            x_col: x_col.to_string(),
            y_col: y_col.to_string(),
            log_x: true,
            log_y: true,
            points,
        }))
    }

    /// Box plot of `column` over the full frame, one trace per `name`
    /// group in first-appearance order. Null cells are carried as NaN so
    /// the total value count always equals the frame height.
    pub fn box_plot(df: &DataFrame, column: &str) -> Result<ChartSpec, ChartError> {
        let values = numeric_values(df, column)?;
        let groups = string_values(df, COL_NAME)?;

        let mut traces: Vec<BoxTrace> = Vec::new();
        for (group, value) in groups.iter().zip(values.iter()) {
            match traces.iter_mut().find(|t| t.group == *group) {
                Some(trace) => trace.values.push(*value),
                None => traces.push(BoxTrace {
                    group: group.clone(),
                    values: vec![*value],
                }),
            }
        }

        Ok(ChartSpec::Box(BoxSpec {
            title: format!("Distribution of {}", column),
            column: column.to_string(),
            traces,
        }))
    }

    /// Pairwise Pearson correlation over the numeric columns.
    ///
    /// Fails when fewer than two numeric columns or fewer than two rows
    /// exist. Row pairs where either value is non-finite are skipped; a
    /// pair left with fewer than two usable rows, or with zero variance,
    /// correlates as NaN.
    pub fn heatmap(df: &DataFrame) -> Result<ChartSpec, ChartError> {
        let columns = crate::data::numeric_column_names(df);
        if columns.len() < 2 || df.height() < 2 {
            return Err(ChartError::InsufficientData {
                columns: columns.len(),
                rows: df.height(),
            });
        }

        let series: Vec<Vec<f64>> = columns
            .iter()
            .map(|col| numeric_values(df, col))
            .collect::<Result<_, _>>()?;

        // Pairwise correlation in parallel, one matrix row per task
        let matrix: Vec<Vec<f64>> = (0..series.len())
            .into_par_iter()
            .map(|i| {
                (0..series.len())
                    .map(|j| {
                        if i == j {
                            1.0
                        } else {
                            pearson(&series[i], &series[j])
                        }
                    })
                    .collect()
            })
            .collect();

        debug!("correlation matrix over {} columns", columns.len());

        Ok(ChartSpec::Heatmap(HeatmapSpec {
            title: "Correlation Heatmap".to_string(),
            columns,
            matrix,
            color_scale: HEATMAP_COLOR_SCALE.to_string(),
            midpoint: 0.0,
        }))
    }
}

/// Pearson correlation coefficient with pairwise exclusion of
/// non-finite values.
fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();

    let n = pairs.len() as f64;
    if n < 2.0 {
        return f64::NAN;
    }

    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}

/// Extract a column as f64 values, null or unparseable cells as NaN.
fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<f64>, ChartError> {
    let col = df
        .column(column)
        .map_err(|_| ChartError::UnknownColumn(column.to_string()))?;
    let col_f64 = col.cast(&DataType::Float64)?;
    let ca = col_f64.f64()?;
    Ok((0..df.height())
        .map(|i| ca.get(i).unwrap_or(f64::NAN))
        .collect())
}

/// Extract a column as display strings.
fn string_values(df: &DataFrame, column: &str) -> Result<Vec<String>, ChartError> {
    let col = df
        .column(column)
        .map_err(|_| ChartError::UnknownColumn(column.to_string()))?;
    let series = col.as_materialized_series();
    Ok((0..series.len())
        .map(|i| {
            series
                .get(i)
                .map(|v| v.to_string().trim_matches('"').to_string())
                .unwrap_or_default()
        })
        .collect())
}
