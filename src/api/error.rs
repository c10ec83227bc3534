// ==========================================
// Seal Inventory - API error types
// ==========================================
// Converts repository / engine / importer errors into
// caller-facing errors. Every error carries an explicit reason.
// ==========================================

use crate::engine::assembly_costing::AssemblyError;
use crate::engine::cost_allocation::AllocationError;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // input / business rules
    // ==========================================
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    InvalidAllocation(String),

    #[error("{0}")]
    InvalidAssembly(String),

    #[error("missing tenant context: {0}")]
    MissingTenant(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("business rule violated: {0}")]
    BusinessRuleViolation(String),

    #[error("insufficient stock for {item_id}: available {available}, requested {requested}")]
    InsufficientStock {
        item_id: String,
        available: f64,
        requested: f64,
    },

    // ==========================================
    // data access
    // ==========================================
    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // import
    // ==========================================
    #[error("import failed: {0}")]
    ImportError(String),

    // ==========================================
    // generic
    // ==========================================
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::InvalidAllocation(_) => "INVALID_ALLOCATION",
            ApiError::InvalidAssembly(_) => "INVALID_ASSEMBLY",
            ApiError::MissingTenant(_) => "MISSING_TENANT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BusinessRuleViolation(_) => "BUSINESS_RULE_VIOLATION",
            ApiError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::DatabaseConnectionError(_) => "DATABASE_CONNECTION_ERROR",
            ApiError::ImportError(_) => "IMPORT_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::Other(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={}) does not exist", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("failed to acquire database lock: {}", msg))
            }
            RepositoryError::DatabaseTransactionError(msg)
            | RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("unique constraint violated: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("foreign key constraint violated: {}", msg))
            }
            RepositoryError::AppendOnlyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("records are immutable: {}", msg))
            }
            RepositoryError::InsufficientStock {
                item_id,
                available,
                requested,
            } => ApiError::InsufficientStock {
                item_id,
                available,
                requested,
            },
            RepositoryError::BusinessRuleViolation(msg) => ApiError::BusinessRuleViolation(msg),
            RepositoryError::ValidationError(msg) => ApiError::InvalidInput(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("{}: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(e) => ApiError::Other(e),
        }
    }
}

impl From<AllocationError> for ApiError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::InvalidAllocation(_) => ApiError::InvalidAllocation(err.to_string()),
        }
    }
}

impl From<AssemblyError> for ApiError {
    fn from(err: AssemblyError) -> Self {
        match err {
            AssemblyError::InvalidAssembly(_) => ApiError::InvalidAssembly(err.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Repository(e) => e.into(),
            ImportError::FileNotFound(path) => ApiError::NotFound(format!("file {}", path)),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_mapping() {
        let err: ApiError = RepositoryError::NotFound {
            entity: "Part".to_string(),
            id: "p1".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.code(), "NOT_FOUND");

        let err: ApiError = RepositoryError::AppendOnlyViolation("append-only: production_runs".to_string()).into();
        assert_eq!(err.code(), "BUSINESS_RULE_VIOLATION");

        let err: ApiError = RepositoryError::InsufficientStock {
            item_id: "m1".to_string(),
            available: 1.0,
            requested: 2.0,
        }
        .into();
        assert_eq!(err.code(), "INSUFFICIENT_STOCK");
    }

    #[test]
    fn test_allocation_error_mapping() {
        let err: ApiError = AllocationError::InvalidAllocation("no valid outputs".to_string()).into();
        assert_eq!(err.code(), "INVALID_ALLOCATION");
        assert!(err.to_string().contains("no valid outputs"));
    }
}
