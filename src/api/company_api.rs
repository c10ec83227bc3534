// ==========================================
// Seal Inventory - company (tenant) API
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::require_text;
use crate::domain::tenant::{Company, TenantContext};
use crate::repository::CompanyRepository;

pub struct CompanyApi {
    company_repo: Arc<CompanyRepository>,
}

impl CompanyApi {
    pub fn new(company_repo: Arc<CompanyRepository>) -> Self {
        Self { company_repo }
    }

    /// Register a company under a caller-chosen id
    pub fn create_company(&self, company_id: &str, name: &str) -> ApiResult<Company> {
        let company = Company {
            company_id: require_text("company_id", company_id)?,
            name: require_text("name", name)?,
            created_at: chrono::Utc::now().naive_utc(),
        };
        self.company_repo.insert(&company)?;
        tracing::info!(company_id = %company.company_id, name = %company.name, "company created");
        Ok(company)
    }

    pub fn get_company(&self, company_id: &str) -> ApiResult<Company> {
        self.company_repo
            .find_by_id(company_id)?
            .ok_or_else(|| ApiError::NotFound(format!("company {}", company_id)))
    }

    pub fn list_companies(&self) -> ApiResult<Vec<Company>> {
        Ok(self.company_repo.list_all()?)
    }

    /// Build a TenantContext for a known company
    ///
    /// # Errors
    /// - `MissingTenant`: blank company or user id
    /// - `NotFound`: company is not registered
    pub fn resolve_tenant(&self, company_id: &str, user_id: &str) -> ApiResult<TenantContext> {
        let company_id = company_id.trim();
        let user_id = user_id.trim();
        if company_id.is_empty() {
            return Err(ApiError::MissingTenant("company id is required".to_string()));
        }
        if user_id.is_empty() {
            return Err(ApiError::MissingTenant("user id is required".to_string()));
        }
        if !self.company_repo.exists(company_id)? {
            return Err(ApiError::NotFound(format!("company {}", company_id)));
        }
        Ok(TenantContext::new(company_id, user_id))
    }
}
