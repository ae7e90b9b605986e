//! CSV Dataset Loader Module
//! Loads the built-in dataset or user-uploaded CSV bytes into a Polars frame.

use log::info;
use polars::prelude::*;
use std::io::Cursor;
use std::path::PathBuf;
use thiserror::Error;

/// Path of the built-in dataset shipped alongside the application.
pub const BUILTIN_DATASET_PATH: &str = "cleaned_sorted_output_cleaned.csv";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("No data loaded")]
    NoData,
}

/// Handles CSV loading with Polars, from a file path or raw bytes.
///
/// Holds at most one frame at a time; a failed load leaves the previously
/// held frame untouched.
pub struct DatasetLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Load a CSV file from disk using Polars.
    pub fn load_path(&mut self, file_path: &str) -> Result<&DataFrame, LoadError> {
        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        info!(
            "loaded {} rows x {} columns from {}",
            df.height(),
            df.width(),
            file_path
        );
        self.file_path = Some(PathBuf::from(file_path));
        self.df = Some(df);
        self.df.as_ref().ok_or(LoadError::NoData)
    }

    /// Load the built-in dataset.
    pub fn load_builtin(&mut self) -> Result<&DataFrame, LoadError> {
        self.load_path(BUILTIN_DATASET_PATH)
    }

    /// Parse uploaded CSV bytes in memory, with the same schema inference
    /// and leniency as the path route so both sources yield identically
    /// shaped frames for identical content.
    ///
    /// Malformed structure fails with the underlying Polars cause; the
    /// previously held frame (if any) is not replaced on failure.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<&DataFrame, LoadError> {
        let df = CsvReadOptions::default()
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        info!(
            "parsed upload: {} rows x {} columns",
            df.height(),
            df.width()
        );
        self.file_path = None;
        self.df = Some(df);
        self.df.as_ref().ok_or(LoadError::NoData)
    }

    /// Get list of column names from the loaded frame.
    pub fn columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get list of numeric column names.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(numeric_column_names)
            .unwrap_or_default()
    }

    /// Get the number of rows in the loaded frame.
    pub fn row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded frame.
    pub fn dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Get the source path, if the frame came from disk.
    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Replace the held frame directly.
    pub fn set_dataframe(&mut self, df: DataFrame) {
        self.df = Some(df);
    }
}

/// Columns whose dtype is numeric across the whole frame.
pub fn numeric_column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| {
            matches!(
                col.dtype(),
                DataType::Float32
                    | DataType::Float64
                    | DataType::Int8
                    | DataType::Int16
                    | DataType::Int32
                    | DataType::Int64
                    | DataType::UInt8
                    | DataType::UInt16
                    | DataType::UInt32
                    | DataType::UInt64
            )
        })
        .map(|col| col.name().to_string())
        .collect()
}
