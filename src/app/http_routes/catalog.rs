// ==========================================
// Seal Inventory - catalog endpoints
// ==========================================
// /api/materials, /api/parts, /api/products
// ==========================================

use actix_web::{web, HttpRequest, HttpResponse};

use crate::api::{ApiError, CreateMaterialRequest, CreatePartRequest, CreateProductRequest};
use crate::app::http_routes::common::{with_tenant, CreatedResponse};
use crate::app::state::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/materials")
            .route(web::get().to(list_materials))
            .route(web::post().to(create_material)),
    )
    .route("/api/materials/{material_id}", web::get().to(get_material))
    .service(
        web::resource("/api/parts")
            .route(web::get().to(list_parts))
            .route(web::post().to(create_part)),
    )
    .route("/api/parts/{part_id}", web::get().to(get_part))
    .service(
        web::resource("/api/products")
            .route(web::get().to(list_products))
            .route(web::post().to(create_product)),
    )
    .route("/api/products/{product_id}", web::get().to(get_product));
}

// ===== materials =====

async fn list_materials(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let materials = with_tenant(state, &req, |s, ctx| s.catalog_api.list_materials(ctx)).await?;
    Ok(HttpResponse::Ok().json(materials))
}

async fn create_material(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateMaterialRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let id = with_tenant(state, &req, move |s, ctx| s.catalog_api.create_material(ctx, body)).await?;
    Ok(HttpResponse::Created().json(CreatedResponse::id_only(id)))
}

async fn get_material(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let material_id = path.into_inner();
    let material =
        with_tenant(state, &req, move |s, ctx| s.catalog_api.get_material(ctx, &material_id)).await?;
    Ok(HttpResponse::Ok().json(material))
}

// ===== parts =====

async fn list_parts(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let parts = with_tenant(state, &req, |s, ctx| s.catalog_api.list_parts(ctx)).await?;
    Ok(HttpResponse::Ok().json(parts))
}

async fn create_part(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreatePartRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let id = with_tenant(state, &req, move |s, ctx| s.catalog_api.create_part(ctx, body)).await?;
    Ok(HttpResponse::Created().json(CreatedResponse::id_only(id)))
}

async fn get_part(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let part_id = path.into_inner();
    let part = with_tenant(state, &req, move |s, ctx| s.catalog_api.get_part(ctx, &part_id)).await?;
    Ok(HttpResponse::Ok().json(part))
}

// ===== products =====

async fn list_products(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let products = with_tenant(state, &req, |s, ctx| s.catalog_api.list_products(ctx)).await?;
    Ok(HttpResponse::Ok().json(products))
}

async fn create_product(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let id = with_tenant(state, &req, move |s, ctx| s.catalog_api.create_product(ctx, body)).await?;
    Ok(HttpResponse::Created().json(CreatedResponse::id_only(id)))
}

async fn get_product(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let product_id = path.into_inner();
    let product =
        with_tenant(state, &req, move |s, ctx| s.catalog_api.get_product(ctx, &product_id)).await?;
    Ok(HttpResponse::Ok().json(product))
}
