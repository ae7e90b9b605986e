//! Data module - CSV loading and metric derivation

mod deriver;
mod loader;

pub use deriver::{MetricDeriver, SchemaError};
pub use loader::{numeric_column_names, DatasetLoader, LoadError, BUILTIN_DATASET_PATH};

/// String identifier column every dataset must carry.
pub const COL_NAME: &str = "name";
/// 24-hour traded volume in USD.
pub const COL_VOLUME: &str = "24h_volume_usd";
/// Market capitalization in USD.
pub const COL_MARKET_CAP: &str = "market_cap_usd";
/// Derived ratio column appended by [`MetricDeriver`].
pub const COL_VOLUME_TO_MARKET_CAP: &str = "volume_to_market_cap";
