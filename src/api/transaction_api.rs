// ==========================================
// Seal Inventory - transaction log API (read only)
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::tenant::TenantContext;
use crate::domain::transaction::InventoryTransaction;
use crate::domain::types::ReferenceType;
use crate::repository::InventoryTransactionRepository;

pub const DEFAULT_TRANSACTION_LIMIT: usize = 200;
pub const MAX_TRANSACTION_LIMIT: usize = 5000;

pub struct TransactionApi {
    transaction_repo: Arc<InventoryTransactionRepository>,
}

impl TransactionApi {
    pub fn new(transaction_repo: Arc<InventoryTransactionRepository>) -> Self {
        Self { transaction_repo }
    }

    /// # Arguments
    /// - `reference_type`: "material" / "part" / "product", blank means all
    pub fn list_transactions(
        &self,
        ctx: &TenantContext,
        reference_type: Option<&str>,
        limit: Option<usize>,
    ) -> ApiResult<Vec<InventoryTransaction>> {
        let filter = match reference_type.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(ReferenceType::from_db_str(raw).ok_or_else(|| {
                ApiError::InvalidInput(format!(
                    "reference_type must be material, part or product, got '{}'",
                    raw
                ))
            })?),
            None => None,
        };
        let limit = limit
            .unwrap_or(DEFAULT_TRANSACTION_LIMIT)
            .clamp(1, MAX_TRANSACTION_LIMIT);

        Ok(self
            .transaction_repo
            .list_by_company(&ctx.company_id, filter, limit)?)
    }

    /// Movements written by one run / assembly
    pub fn list_for_source(
        &self,
        ctx: &TenantContext,
        source_id: &str,
    ) -> ApiResult<Vec<InventoryTransaction>> {
        Ok(self
            .transaction_repo
            .list_by_source(&ctx.company_id, source_id)?)
    }
}
