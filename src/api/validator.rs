// ==========================================
// Seal Inventory - request field validation
// ==========================================
// Boundary checks shared by the API facades. Requests that fail
// here never reach the engines or repositories.
// ==========================================

use crate::api::error::{ApiError, ApiResult};

/// Trimmed, non-empty text
pub fn require_text(field: &str, value: &str) -> ApiResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Blank optional text becomes None
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn require_non_negative(field: &str, value: f64) -> ApiResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(ApiError::InvalidInput(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )));
    }
    Ok(value)
}

pub fn require_positive(field: &str, value: f64) -> ApiResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ApiError::InvalidInput(format!(
            "{} must be greater than 0, got {}",
            field, value
        )));
    }
    Ok(value)
}

pub fn require_non_negative_count(field: &str, value: i64) -> ApiResult<i64> {
    if value < 0 {
        return Err(ApiError::InvalidInput(format!(
            "{} must not be negative, got {}",
            field, value
        )));
    }
    Ok(value)
}
