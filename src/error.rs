//! Error types for trend-viz operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trend-viz operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for framebuffer or chart.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// A named column is absent from the input table.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Data length mismatch between x and y columns.
    #[error("Data length mismatch: x has {x_len} elements, y has {y_len} elements")]
    DataLengthMismatch {
        /// Length of x data.
        x_len: usize,
        /// Length of y data.
        y_len: usize,
    },

    /// A category series came out shorter or longer than the group set.
    ///
    /// Complete-group filtering guarantees one value per (group, category);
    /// hitting this means the filter and the extractor disagree.
    #[error("Series for category {category:?} has {actual} values, expected {expected}")]
    SeriesMisaligned {
        /// Category whose series is off.
        category: String,
        /// Expected length (number of surviving groups).
        expected: usize,
        /// Actual extracted length.
        actual: usize,
    },

    /// The paired-marker column does not hold exactly two distinct values.
    #[error("Column {column:?} has {count} distinct values, paired charts need exactly 2")]
    MarkerCardinality {
        /// Grouping column that was inspected.
        column: String,
        /// Number of distinct non-null values found.
        count: usize,
    },

    /// Fewer than two category axis values.
    #[error("Need at least 2 category values, got {count}")]
    TooFewCategories {
        /// Number of categories supplied or derived.
        count: usize,
    },

    /// Highlight labels cannot match the hue column's value type.
    #[error("Highlight labels cannot match column {column:?}: no text values present")]
    HighlightType {
        /// Hue column the labels were matched against.
        column: String,
    },

    /// Scale domain error (e.g., log of non-positive value).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(err.to_string().contains("Invalid dimensions"));
    }

    #[test]
    fn test_marker_cardinality_display() {
        let err = Error::MarkerCardinality {
            column: "period".to_string(),
            count: 3,
        };
        assert!(err.to_string().contains("period"));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_series_misaligned_display() {
        let err = Error::SeriesMisaligned {
            category: "2021".to_string(),
            expected: 4,
            actual: 3,
        };
        assert!(err.to_string().contains("2021"));
        assert!(err.to_string().contains('4'));
        assert!(err.to_string().contains('3'));
    }
}
