// ==========================================
// Seal Inventory - demo data
// ==========================================
// Demo company with a seal manufacturer's starting catalog.
// Seeding is skipped once the company has raw materials.
// ==========================================

use serde::Serialize;

use crate::api::{ApiError, ApiResult, CreateMaterialRequest, CreatePartRequest, CreateProductRequest};
use crate::app::state::AppState;
use crate::domain::tenant::TenantContext;

pub const DEMO_COMPANY_ID: &str = "DEMO";
pub const DEMO_COMPANY_NAME: &str = "Tanvir's Seal Manufacturing";
pub const DEMO_USER_ID: &str = "admin@example.com";

const PRODUCT_STARTING_STOCK: i64 = 50;

// name, grade, unit, stock, avg cost
const RAW_MATERIALS: &[(&str, &str, &str, f64, f64)] = &[
    ("Rubber Sheet - NBR", "NBR", "kg", 500.0, 180.0),
    ("Rubber Sheet - Viton", "Viton", "kg", 300.0, 220.0),
    ("Steel Coin", "Carbon Steel", "pieces", 1000.0, 85.0),
    ("Steel Sheet", "SS304", "sheets", 200.0, 1200.0),
    ("Steel Wire", "Spring Steel", "meters", 500.0, 45.0),
    ("SSROD", "SS316", "meters", 150.0, 350.0),
];

// name, material_type, specific_type, weight_per_unit, stock
const PARTS: &[(&str, &str, &str, f64, i64)] = &[
    ("Wati", "Steel", "Wire/Coin/Sheet", 0.5, 800),
    ("Washer", "Steel", "Wire/Coin/Sheet", 0.3, 600),
    ("Bellow", "Rubber", "NBR/Viton", 0.8, 400),
    ("Buch", "Rubber", "NBR/Viton", 0.6, 300),
    ("Cap", "Rubber", "NBR/Viton", 0.4, 500),
    ("Oring", "Rubber", "NBR/Viton", 0.1, 1000),
    ("Spring", "Steel", "Wire", 0.2, 700),
    ("Rotary face", "Carbon/Ceramic/Tungsten", "Ceramic HW, LW, Pink", 0.7, 200),
    ("Stationary face", "Carbon/Ceramic/Tungsten", "Ceramic HW, LW, Pink", 0.7, 200),
];

// name, size
const PRODUCTS: &[(&str, &str)] = &[
    ("Open", "50mm"),
    ("Open", "75mm"),
    ("Open", "100mm"),
    ("Close", "50mm"),
    ("Close", "75mm"),
    ("Close", "100mm"),
    ("J2", "25mm"),
    ("J2", "50mm"),
    ("J2", "75mm"),
    ("JC", "50mm"),
    ("JC", "100mm"),
    ("Single Robin", "Standard"),
    ("Double Robin", "Standard"),
    ("Stork", "Standard"),
    ("MG", "Standard"),
    ("Honda", "Standard"),
    ("Type2100", "Standard"),
];

#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub company_id: String,
    pub seeded: bool,
    pub materials: usize,
    pub parts: usize,
    pub products: usize,
}

/// Create the demo company and its catalog
///
/// Calling it again leaves the database unchanged and reports `seeded: false`.
pub fn seed_demo_data(state: &AppState) -> ApiResult<SeedReport> {
    match state.company_api.get_company(DEMO_COMPANY_ID) {
        Ok(_) => {}
        Err(ApiError::NotFound(_)) => {
            state
                .company_api
                .create_company(DEMO_COMPANY_ID, DEMO_COMPANY_NAME)?;
        }
        Err(e) => return Err(e),
    }
    let ctx = state
        .company_api
        .resolve_tenant(DEMO_COMPANY_ID, DEMO_USER_ID)?;

    if !state.catalog_api.list_materials(&ctx)?.is_empty() {
        tracing::info!(company_id = DEMO_COMPANY_ID, "demo data already present, skipping");
        return Ok(SeedReport {
            company_id: DEMO_COMPANY_ID.to_string(),
            seeded: false,
            materials: 0,
            parts: 0,
            products: 0,
        });
    }

    let materials = seed_materials(state, &ctx)?;
    let parts = seed_parts(state, &ctx)?;
    let products = seed_products(state, &ctx)?;

    tracing::info!(
        company_id = DEMO_COMPANY_ID,
        materials,
        parts,
        products,
        "demo data seeded"
    );

    Ok(SeedReport {
        company_id: DEMO_COMPANY_ID.to_string(),
        seeded: true,
        materials,
        parts,
        products,
    })
}

fn seed_materials(state: &AppState, ctx: &TenantContext) -> ApiResult<usize> {
    for &(name, grade, unit, stock, cost) in RAW_MATERIALS {
        state.catalog_api.create_material(
            ctx,
            CreateMaterialRequest {
                name: name.to_string(),
                grade: Some(grade.to_string()),
                unit: Some(unit.to_string()),
                current_stock: stock,
                min_stock: 0.0,
                avg_cost: cost,
            },
        )?;
    }
    Ok(RAW_MATERIALS.len())
}

fn seed_parts(state: &AppState, ctx: &TenantContext) -> ApiResult<usize> {
    for &(name, material_type, specific_type, weight, stock) in PARTS {
        state.catalog_api.create_part(
            ctx,
            CreatePartRequest {
                name: name.to_string(),
                material_type: Some(material_type.to_string()),
                specific_type: Some(specific_type.to_string()),
                weight_per_unit: weight,
                current_stock: stock,
                avg_cost: 0.0,
            },
        )?;
    }
    Ok(PARTS.len())
}

fn seed_products(state: &AppState, ctx: &TenantContext) -> ApiResult<usize> {
    for &(name, size) in PRODUCTS {
        state.catalog_api.create_product(
            ctx,
            CreateProductRequest {
                name: name.to_string(),
                size: Some(size.to_string()),
                variant: None,
                current_stock: PRODUCT_STARTING_STOCK,
                selling_price: 0.0,
                avg_cost: 0.0,
            },
        )?;
    }
    Ok(PRODUCTS.len())
}
