//! Error types for editing operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Column not found: order {0}")]
    ColumnNotFound(usize),

    #[error("Row not found: column {column}, row {row}")]
    RowNotFound { column: usize, row: usize },

    #[error("Element is not a table: {0}")]
    NotATable(String),

    #[error("Table column not found: {0}")]
    TableColumnNotFound(String),

    #[error("Table row not found: {0}")]
    TableRowNotFound(String),

    #[error("No element selected")]
    NoElementSelected,

    #[error("Invalid template format")]
    InvalidFormat(#[source] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EditError>;
