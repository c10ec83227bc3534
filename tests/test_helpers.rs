// ==========================================
// Test helpers: temporary databases
// ==========================================

use std::error::Error;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tempfile::NamedTempFile;

use seal_inventory::db::{init_schema, open_sqlite_connection};

/// Temporary database file with the schema applied
///
/// # Returns
/// - NamedTempFile: keep it alive for the duration of the test
/// - String: database path
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("temporary path is not UTF-8")?
        .to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// Shared connection on a schema-initialised database
#[allow(dead_code)]
pub fn open_shared(db_path: &str) -> Result<Arc<Mutex<Connection>>, Box<dyn Error>> {
    let conn = open_sqlite_connection(db_path)?;
    Ok(Arc::new(Mutex::new(conn)))
}
