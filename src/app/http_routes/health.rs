// ==========================================
// Seal Inventory - health endpoint
// ==========================================

use actix_web::{web, HttpResponse};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health_check));
}

/// Liveness probe, no tenant required
pub async fn health_check() -> HttpResponse {
    tracing::debug!("health check requested");
    HttpResponse::Ok().json(HealthStatus {
        status: "healthy",
        service: crate::SERVICE_NAME,
        version: crate::VERSION,
        timestamp: chrono::Utc::now(),
    })
}
