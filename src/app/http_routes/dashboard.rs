// ==========================================
// Seal Inventory - dashboard endpoint
// ==========================================

use actix_web::{web, HttpRequest, HttpResponse};

use crate::api::ApiError;
use crate::app::http_routes::common::with_tenant;
use crate::app::state::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/dashboard", web::get().to(dashboard));
}

async fn dashboard(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let summary = with_tenant(state, &req, |s, ctx| s.dashboard_api.get_summary(ctx)).await?;
    Ok(HttpResponse::Ok().json(summary))
}
