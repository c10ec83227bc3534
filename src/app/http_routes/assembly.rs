// ==========================================
// Seal Inventory - assembly endpoints
// ==========================================

use actix_web::{web, HttpRequest, HttpResponse};

use crate::api::{ApiError, RecordAssemblyRequest};
use crate::app::http_routes::common::{with_tenant, CreatedResponse};
use crate::app::state::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/assembly")
            .route("/run", web::post().to(record_assembly))
            .route("/runs/{assembly_id}", web::get().to(get_assembly)),
    );
}

async fn record_assembly(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<RecordAssemblyRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let detail =
        with_tenant(state, &req, move |s, ctx| s.assembly_api.record_assembly(ctx, body)).await?;
    let id = detail.assembly.assembly_id.clone();
    Ok(HttpResponse::Created().json(CreatedResponse::with_data(id, detail)))
}

async fn get_assembly(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let assembly_id = path.into_inner();
    let detail =
        with_tenant(state, &req, move |s, ctx| s.assembly_api.get_assembly(ctx, &assembly_id)).await?;
    Ok(HttpResponse::Ok().json(detail))
}
