// ==========================================
// Seal Inventory - repository error types
// ==========================================
// thiserror derive, one enum for all repositories
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== database =====
    #[error("record not found: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    #[error("failed to acquire database lock: {0}")]
    LockError(String),

    #[error("database transaction failed: {0}")]
    DatabaseTransactionError(String),

    #[error("database query failed: {0}")]
    DatabaseQueryError(String),

    #[error("unique constraint violated: {0}")]
    UniqueConstraintViolation(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("record is append-only: {0}")]
    AppendOnlyViolation(String),

    // ===== business rules =====
    #[error("insufficient stock for {item_id}: available {available}, requested {requested}")]
    InsufficientStock {
        item_id: String,
        available: f64,
        requested: f64,
    },

    #[error("business rule violated: {0}")]
    BusinessRuleViolation(String),

    // ===== data quality =====
    #[error("validation failed: {0}")]
    ValidationError(String),

    #[error("invalid value for field {field}: {message}")]
    FieldValueError { field: String, message: String },

    // ===== generic =====
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("append-only") {
                    RepositoryError::AppendOnlyViolation(msg)
                } else if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_trigger_abort_maps_to_append_only() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE t (id INTEGER);
            CREATE TRIGGER t_no_delete BEFORE DELETE ON t
            BEGIN SELECT RAISE(ABORT, 'append-only: t'); END;
            INSERT INTO t VALUES (1);
            "#,
        )
        .unwrap();

        let err: RepositoryError = conn.execute("DELETE FROM t", []).unwrap_err().into();
        assert!(matches!(err, RepositoryError::AppendOnlyViolation(_)));
    }

    #[test]
    fn test_unique_violation_mapping() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY); INSERT INTO t VALUES (1);")
            .unwrap();
        let err: RepositoryError = conn
            .execute("INSERT INTO t VALUES (1)", [])
            .unwrap_err()
            .into();
        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
    }
}
