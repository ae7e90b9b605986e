//! Metric Deriver Module
//! Appends the volume-to-market-cap ratio to a loaded frame.

use crate::data::{COL_MARKET_CAP, COL_VOLUME, COL_VOLUME_TO_MARKET_CAP};
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Required column '{0}' is missing from the dataset")]
    MissingColumn(&'static str),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Computes derived columns from the required base columns.
pub struct MetricDeriver;

impl MetricDeriver {
    /// Append `volume_to_market_cap = 24h_volume_usd / market_cap_usd`.
    ///
    /// Fails if either base column is absent. A zero market cap, a null
    /// cell, or an unparseable cell yields `f64::NAN` for that row, the
    /// marker value downstream charts exclude from log axes.
    pub fn augment(df: &DataFrame) -> Result<DataFrame, SchemaError> {
        let volume = df
            .column(COL_VOLUME)
            .map_err(|_| SchemaError::MissingColumn(COL_VOLUME))?;
        let market_cap = df
            .column(COL_MARKET_CAP)
            .map_err(|_| SchemaError::MissingColumn(COL_MARKET_CAP))?;

        let volume_f64 = volume.cast(&DataType::Float64)?;
        let volume_ca = volume_f64.f64()?;
        let cap_f64 = market_cap.cast(&DataType::Float64)?;
        let cap_ca = cap_f64.f64()?;

        let ratios: Vec<f64> = (0..df.height())
            .map(|i| match (volume_ca.get(i), cap_ca.get(i)) {
                (Some(v), Some(c)) if c != 0.0 => {
                    let ratio = v / c;
                    if ratio.is_finite() {
                        ratio
                    } else {
                        f64::NAN
                    }
                }
                _ => f64::NAN,
            })
            .collect();

        let mut augmented = df.clone();
        augmented.with_column(Column::new(COL_VOLUME_TO_MARKET_CAP.into(), ratios))?;
        Ok(augmented)
    }
}
