// ==========================================
// HTTP surface tests (actix-web test service)
// ==========================================

mod helpers;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use serde_json::{json, Value};

use helpers::api_test_helper::*;
use helpers::test_data_builder::{MaterialBuilder, PartBuilder};
use seal_inventory::app::create_app;
use seal_inventory::app::http_routes::{COMPANY_HEADER, USER_HEADER};

fn tenant() -> [(&'static str, &'static str); 2] {
    [(COMPANY_HEADER, TEST_COMPANY_ID), (USER_HEADER, TEST_USER_ID)]
}

#[actix_web::test]
async fn test_health_needs_no_tenant() {
    let env = ApiTestEnv::new().unwrap();
    let app = test::init_service(create_app(web::Data::new(env.state))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "seal-inventory");
}

#[actix_web::test]
async fn test_missing_tenant_headers() {
    let env = ApiTestEnv::new().unwrap();
    let app = test::init_service(create_app(web::Data::new(env.state))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/materials").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "MISSING_TENANT");

    let req = test::TestRequest::get()
        .uri("/api/materials")
        .insert_header((COMPANY_HEADER, "NOBODY"))
        .insert_header((USER_HEADER, TEST_USER_ID))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_allocation_preview() {
    let env = ApiTestEnv::new().unwrap();
    let app = test::init_service(create_app(web::Data::new(env.state))).await;

    let mut req = test::TestRequest::post().uri("/api/production/allocate").set_json(json!({
        "input_cost": 1000.0,
        "outputs": [
            {"part_name": "Wati", "weight": 0.5, "quantity": 800},
            {"part_name": "Bellow", "weight": 0.8, "quantity": 400}
        ]
    }));
    for h in tenant() {
        req = req.insert_header(h);
    }
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["cost_per_kg"], 1.3889);
    assert_eq!(body["outputs"][0]["allocated_cost"], 555.56);
    assert_eq!(body["outputs"][1]["cost_per_unit"], 1.11);
}

#[actix_web::test]
async fn test_allocation_preview_rejects_empty_outputs() {
    let env = ApiTestEnv::new().unwrap();
    let app = test::init_service(create_app(web::Data::new(env.state))).await;

    let mut req = test::TestRequest::post()
        .uri("/api/production/allocate")
        .set_json(json!({"input_cost": 1000.0, "outputs": []}));
    for h in tenant() {
        req = req.insert_header(h);
    }
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "INVALID_ALLOCATION");
}

#[actix_web::test]
async fn test_malformed_json_is_invalid_input() {
    let env = ApiTestEnv::new().unwrap();
    let app = test::init_service(create_app(web::Data::new(env.state))).await;

    let mut req = test::TestRequest::post()
        .uri("/api/materials")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json");
    for h in tenant() {
        req = req.insert_header(h);
    }
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[actix_web::test]
async fn test_record_run_over_http() {
    let env = ApiTestEnv::new().unwrap();
    let material_id = env.create_material(MaterialBuilder::new("Rubber Sheet - NBR").stock(10.0).avg_cost(180.0).build());
    let part_id = env.create_part(PartBuilder::new("Bellow", 0.8).build());
    let app = test::init_service(create_app(web::Data::new(env.state))).await;

    let mut req = test::TestRequest::post().uri("/api/production/run").set_json(json!({
        "input_material_id": material_id,
        "input_quantity": 2.0,
        "input_cost": 360.0,
        "outputs": [{"part_id": part_id, "quantity": 100}]
    }));
    for h in tenant() {
        req = req.insert_header(h);
    }
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    let run_id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["outputs"][0]["allocated_cost"], 360.0);

    let mut req = test::TestRequest::get().uri(&format!("/api/production/runs/{}", run_id));
    for h in tenant() {
        req = req.insert_header(h);
    }
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let mut req = test::TestRequest::get().uri("/api/transactions?reference_type=part&limit=10");
    for h in tenant() {
        req = req.insert_header(h);
    }
    let rows: Value = test::call_and_read_body_json(&app, req.to_request()).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);

    // over-consumption answers 409 with the stock figures
    let mut req = test::TestRequest::post().uri("/api/production/run").set_json(json!({
        "input_material_id": material_id,
        "input_quantity": 50.0,
        "input_cost": 360.0,
        "outputs": [{"part_id": part_id, "quantity": 100}]
    }));
    for h in tenant() {
        req = req.insert_header(h);
    }
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");
    assert_eq!(body["details"]["available"], 8.0);
}

#[actix_web::test]
async fn test_catalog_create_and_dashboard() {
    let env = ApiTestEnv::new().unwrap();
    let app = test::init_service(create_app(web::Data::new(env.state))).await;

    let mut req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(json!({"name": "Stork", "size": "Standard", "current_stock": 50}));
    for h in tenant() {
        req = req.insert_header(h);
    }
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let product_id = body["id"].as_str().unwrap().to_string();
    assert!(body.get("data").is_none());

    let mut req = test::TestRequest::get().uri(&format!("/api/products/{}", product_id));
    for h in tenant() {
        req = req.insert_header(h);
    }
    let product: Value = test::call_and_read_body_json(&app, req.to_request()).await;
    assert_eq!(product["name"], "Stork");

    let mut req = test::TestRequest::get().uri("/api/dashboard");
    for h in tenant() {
        req = req.insert_header(h);
    }
    let summary: Value = test::call_and_read_body_json(&app, req.to_request()).await;
    assert_eq!(summary["products_count"], 1);
    assert_eq!(summary["production_runs_count"], 0);
}
