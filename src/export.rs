//! Export Module
//! Serializes frames back to CSV bytes for the download surface.

use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// Content-type tag attached to every CSV download.
pub const CONTENT_TYPE_CSV: &str = "text/csv";
/// Download label for the full dataset.
pub const FULL_DATASET_FILENAME: &str = "crypto_dataset.csv";
/// Download label for the top-N prefix.
pub const FILTERED_DATASET_FILENAME: &str = "top_cryptos.csv";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// A labeled byte blob ready for the presentation layer's download widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Download {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Serializes dataset views to the same CSV dialect the loader accepts.
pub struct ExportBuilder;

impl ExportBuilder {
    /// Encode a frame as CSV bytes with a header row.
    ///
    /// Round-trips through the loader losslessly for row count, column set
    /// and numeric values. A string column whose every value parses as a
    /// number re-loads as numeric; that inference ambiguity is accepted.
    pub fn serialize(df: &DataFrame) -> Result<Vec<u8>, ExportError> {
        let mut buf = Vec::new();
        let mut df = df.clone();
        CsvWriter::new(&mut buf)
            .include_header(true)
            .finish(&mut df)?;
        Ok(buf)
    }

    /// The full dataset as a labeled download.
    pub fn full_download(df: &DataFrame) -> Result<Download, ExportError> {
        Ok(Download {
            filename: FULL_DATASET_FILENAME.to_string(),
            content_type: CONTENT_TYPE_CSV,
            bytes: Self::serialize(df)?,
        })
    }

    /// The first `top_n` rows as a labeled download.
    pub fn filtered_download(df: &DataFrame, top_n: usize) -> Result<Download, ExportError> {
        Ok(Download {
            filename: FILTERED_DATASET_FILENAME.to_string(),
            content_type: CONTENT_TYPE_CSV,
            bytes: Self::serialize(&df.head(Some(top_n)))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DatasetLoader, COL_MARKET_CAP, COL_NAME, COL_VOLUME};

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new(COL_NAME.into(), ["bitcoin", "ethereum", "ripple"]),
            Column::new(COL_VOLUME.into(), [100.5, 90.25, 80.0]),
            Column::new(COL_MARKET_CAP.into(), [50.0, 30.0, 10.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_round_trip_preserves_shape_and_values() {
        let df = sample_frame();
        let bytes = ExportBuilder::serialize(&df).unwrap();

        let mut loader = DatasetLoader::new();
        let reloaded = loader.load_bytes(&bytes).unwrap();

        assert_eq!(reloaded.height(), df.height());
        assert_eq!(reloaded.get_column_names(), df.get_column_names());

        let original = df.column(COL_VOLUME).unwrap().f64().unwrap();
        let round_tripped = reloaded.column(COL_VOLUME).unwrap().f64().unwrap();
        for i in 0..df.height() {
            assert_eq!(original.get(i), round_tripped.get(i));
        }
    }

    #[test]
    fn test_downloads_are_labeled() {
        let df = sample_frame();
        let full = ExportBuilder::full_download(&df).unwrap();
        assert_eq!(full.filename, "crypto_dataset.csv");
        assert_eq!(full.content_type, "text/csv");
        assert!(!full.bytes.is_empty());

        let filtered = ExportBuilder::filtered_download(&df, 2).unwrap();
        assert_eq!(filtered.filename, "top_cryptos.csv");

        let mut loader = DatasetLoader::new();
        let reloaded = loader.load_bytes(&filtered.bytes).unwrap();
        assert_eq!(reloaded.height(), 2);
    }
}
