// ==========================================
// Seal Inventory - import layer
// ==========================================
// Catalog import from CSV / Excel files
// ==========================================

pub mod catalog_importer;
pub mod error;
pub mod file_parser;

pub use catalog_importer::{CatalogImportReport, CatalogImporter, CatalogKind, RowIssue};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRecord, UniversalFileParser};
