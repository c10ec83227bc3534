// ==========================================
// Seal Inventory - shared HTTP plumbing
// ==========================================
// - ApiError -> HTTP status + {code, message, details}
// - tenant headers -> TenantContext
// - blocking API calls off the async workers
// ==========================================

use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::json;

use crate::api::error::{ApiError, ApiResult};
use crate::app::state::AppState;
use crate::domain::tenant::TenantContext;

pub const COMPANY_HEADER: &str = "X-Company-Id";
pub const USER_HEADER: &str = "X-User-Id";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
}

/// Body of successful create calls
#[derive(Debug, Serialize)]
pub struct CreatedResponse<T: Serialize> {
    pub success: bool,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl CreatedResponse<()> {
    pub fn id_only(id: String) -> Self {
        Self {
            success: true,
            id,
            data: None,
        }
    }
}

impl<T: Serialize> CreatedResponse<T> {
    pub fn with_data(id: String, data: T) -> Self {
        Self {
            success: true,
            id,
            data: Some(data),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_)
            | ApiError::InvalidAllocation(_)
            | ApiError::InvalidAssembly(_)
            | ApiError::MissingTenant(_)
            | ApiError::ImportError(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BusinessRuleViolation(_) | ApiError::InsufficientStock { .. } => {
                StatusCode::CONFLICT
            }
            ApiError::DatabaseError(_)
            | ApiError::DatabaseConnectionError(_)
            | ApiError::InternalError(_)
            | ApiError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let details = match self {
            ApiError::InsufficientStock {
                item_id,
                available,
                requested,
            } => json!({
                "item_id": item_id,
                "available": available,
                "requested": requested,
            }),
            _ => serde_json::Value::Null,
        };

        HttpResponse::build(status).json(ErrorBody {
            code: self.code().to_string(),
            message,
            details,
        })
    }
}

fn header_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// (company_id, user_id) from the tenant headers
pub fn tenant_headers(req: &HttpRequest) -> ApiResult<(String, String)> {
    let company_id = header_value(req, COMPANY_HEADER)
        .ok_or_else(|| ApiError::MissingTenant(format!("{} header is required", COMPANY_HEADER)))?;
    let user_id = header_value(req, USER_HEADER)
        .ok_or_else(|| ApiError::MissingTenant(format!("{} header is required", USER_HEADER)))?;
    Ok((company_id, user_id))
}

/// Run a blocking API call on the tokio blocking pool
pub async fn run_blocking<F, T>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::InternalError(format!("blocking task failed: {}", e)))?
}

/// Resolve the tenant, then run `f` on the blocking pool
pub async fn with_tenant<F, T>(state: web::Data<AppState>, req: &HttpRequest, f: F) -> ApiResult<T>
where
    F: FnOnce(&AppState, &TenantContext) -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    let (company_id, user_id) = tenant_headers(req)?;
    let state = state.into_inner();
    run_blocking(move || {
        let ctx = state.company_api.resolve_tenant(&company_id, &user_id)?;
        f(&state, &ctx)
    })
    .await
}

/// Malformed JSON bodies answer with the standard error body
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::InvalidInput(format!("invalid JSON body: {}", err)).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::InvalidInput(format!("invalid query string: {}", err)).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::test::TestRequest;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::InvalidAllocation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::MissingTenant("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::InsufficientStock {
                item_id: "m".into(),
                available: 0.0,
                requested: 1.0
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::DatabaseError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_error_body_shape() {
        let resp = ApiError::InsufficientStock {
            item_id: "m1".into(),
            available: 2.0,
            requested: 5.0,
        }
        .error_response();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["code"], "INSUFFICIENT_STOCK");
        assert_eq!(body["details"]["item_id"], "m1");
        assert_eq!(body["details"]["requested"], 5.0);
    }

    #[actix_web::test]
    async fn test_internal_errors_are_masked() {
        let resp = ApiError::DatabaseError("disk I/O error at /var/db".into()).error_response();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "An internal error occurred");
    }

    #[test]
    fn test_tenant_headers() {
        let req = TestRequest::default()
            .insert_header((COMPANY_HEADER, " c1 "))
            .insert_header((USER_HEADER, "u1"))
            .to_http_request();
        assert_eq!(tenant_headers(&req).unwrap(), ("c1".to_string(), "u1".to_string()));

        let req = TestRequest::default()
            .insert_header((USER_HEADER, "u1"))
            .to_http_request();
        assert!(matches!(tenant_headers(&req), Err(ApiError::MissingTenant(_))));
    }
}
