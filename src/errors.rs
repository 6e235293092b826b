//! Error types for timeline layout computation

use thiserror::Error;

/// Result type alias for layout operations
pub type Result<T> = std::result::Result<T, TimelineError>;

/// Errors that can occur while assembling a timeline layout
#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("Invalid data format: {message}")]
    InvalidData { message: String },

    #[error("No color assigned for year {year}; window construction is inconsistent")]
    YearColorMissing { year: i32 },

    #[error("Layout calculation error: {message}")]
    LayoutError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}
