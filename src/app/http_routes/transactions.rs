// ==========================================
// Seal Inventory - transaction log endpoint
// ==========================================
// GET /api/transactions?reference_type=part&limit=50
// ==========================================

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::api::ApiError;
use crate::app::http_routes::common::with_tenant;
use crate::app::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    pub reference_type: Option<String>,
    pub limit: Option<usize>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/transactions", web::get().to(list_transactions));
}

async fn list_transactions(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<TransactionQuery>,
) -> Result<HttpResponse, ApiError> {
    let TransactionQuery {
        reference_type,
        limit,
    } = query.into_inner();
    let rows = with_tenant(state, &req, move |s, ctx| {
        s.transaction_api
            .list_transactions(ctx, reference_type.as_deref(), limit)
    })
    .await?;
    Ok(HttpResponse::Ok().json(rows))
}
