// ==========================================
// Seal Inventory - tenant context
// ==========================================
// Every API operation receives the acting company and user explicitly.
// There is no ambient "current user".
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Acting tenant (company) and user for one operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    pub company_id: String,
    pub user_id: String,
}

impl TenantContext {
    pub fn new(company_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            company_id: company_id.into(),
            user_id: user_id.into(),
        }
    }
}

// ==========================================
// Company - tenant record
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub company_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}
