// ==========================================
// Seal Inventory - importer error types
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    // ===== file =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (expected .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("failed to read file: {0}")]
    FileReadError(String),

    #[error("failed to parse Excel file: {0}")]
    ExcelParseError(String),

    #[error("failed to parse CSV file: {0}")]
    CsvParseError(String),

    // ===== row mapping =====
    #[error("row {row}: {message}")]
    FieldMappingError { row: usize, message: String },

    #[error("row {row}, field {field}: {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("unknown catalog kind: {0} (expected materials/parts/products)")]
    UnknownCatalogKind(String),

    // ===== storage =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

pub type ImportResult<T> = Result<T, ImportError>;
