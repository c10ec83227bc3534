// ==========================================
// Seal Inventory - production endpoints
// ==========================================
// POST /api/production/allocate     preview, nothing stored
// POST /api/production/run          record a run
// GET  /api/production/runs         list runs
// GET  /api/production/runs/{id}    run detail
// ==========================================

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::api::{AllocationPreviewRequest, ApiError, RecordRunRequest};
use crate::app::http_routes::common::{with_tenant, CreatedResponse};
use crate::app::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListRunsQuery {
    pub limit: Option<usize>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/production")
            .route("/allocate", web::post().to(preview_allocation))
            .route("/run", web::post().to(record_run))
            .route("/runs", web::get().to(list_runs))
            .route("/runs/{run_id}", web::get().to(get_run)),
    );
}

async fn preview_allocation(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<AllocationPreviewRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let result =
        with_tenant(state, &req, move |s, _ctx| s.production_api.preview_allocation(&body)).await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn record_run(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<RecordRunRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let detail = with_tenant(state, &req, move |s, ctx| s.production_api.record_run(ctx, body)).await?;
    let id = detail.run.run_id.clone();
    Ok(HttpResponse::Created().json(CreatedResponse::with_data(id, detail)))
}

async fn list_runs(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ListRunsQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = query.limit;
    let runs = with_tenant(state, &req, move |s, ctx| s.production_api.list_runs(ctx, limit)).await?;
    Ok(HttpResponse::Ok().json(runs))
}

async fn get_run(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let run_id = path.into_inner();
    let detail = with_tenant(state, &req, move |s, ctx| s.production_api.get_run(ctx, &run_id)).await?;
    Ok(HttpResponse::Ok().json(detail))
}
