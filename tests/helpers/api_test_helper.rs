// ==========================================
// API test environment
// ==========================================
// One AppState on a temporary database, one registered company.
// ==========================================

#![allow(dead_code)]

#[path = "../test_helpers.rs"]
mod test_helpers;

use tempfile::NamedTempFile;

use seal_inventory::api::{CreateMaterialRequest, CreatePartRequest, CreateProductRequest};
use seal_inventory::app::AppState;
use seal_inventory::domain::tenant::TenantContext;

pub const TEST_COMPANY_ID: &str = "ACME";
pub const TEST_USER_ID: &str = "tester@acme.test";

pub struct ApiTestEnv {
    pub db_path: String,
    pub state: AppState,
    pub ctx: TenantContext,

    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    pub fn new() -> Result<Self, String> {
        let (temp_file, db_path) =
            test_helpers::create_test_db().map_err(|e| format!("cannot create test db: {}", e))?;

        let state = AppState::new(db_path.clone())?;
        state
            .company_api
            .create_company(TEST_COMPANY_ID, "Acme Seals")
            .map_err(|e| format!("cannot create company: {}", e))?;
        let ctx = state
            .company_api
            .resolve_tenant(TEST_COMPANY_ID, TEST_USER_ID)
            .map_err(|e| format!("cannot resolve tenant: {}", e))?;

        Ok(Self {
            db_path,
            state,
            ctx,
            _temp_file: temp_file,
        })
    }

    /// Register another company and return its context
    pub fn add_company(&self, company_id: &str) -> TenantContext {
        self.state
            .company_api
            .create_company(company_id, &format!("{} Ltd", company_id))
            .expect("create company");
        self.state
            .company_api
            .resolve_tenant(company_id, TEST_USER_ID)
            .expect("resolve tenant")
    }

    pub fn create_material(&self, req: CreateMaterialRequest) -> String {
        self.state
            .catalog_api
            .create_material(&self.ctx, req)
            .expect("create material")
    }

    pub fn create_part(&self, req: CreatePartRequest) -> String {
        self.state
            .catalog_api
            .create_part(&self.ctx, req)
            .expect("create part")
    }

    pub fn create_product(&self, req: CreateProductRequest) -> String {
        self.state
            .catalog_api
            .create_product(&self.ctx, req)
            .expect("create product")
    }
}
