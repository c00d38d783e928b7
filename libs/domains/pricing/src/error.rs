use thiserror::Error;

/// Result type for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors that can occur while loading pricing data.
///
/// Cost arithmetic itself never fails; these only surface at startup when a
/// rate table is read from disk.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Rate table file could not be read
    #[error("Failed to read rate table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Rate table file is not valid JSON of the expected shape
    #[error("Invalid rate table: {0}")]
    InvalidRateTable(#[from] serde_json::Error),

    /// Rate table parsed but contains unusable values
    #[error("Invalid rate: {0}")]
    InvalidRate(String),
}
