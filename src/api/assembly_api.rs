// ==========================================
// Seal Inventory - assembly API
// ==========================================
// Parts -> products. Components are costed at the part's current
// avg_cost; the product receives stock at the rolled-up cost.
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{optional_text, require_text};
use crate::config::ConfigManager;
use crate::domain::assembly::{AssemblyComponent, AssemblyRun, AssemblyRunDetail};
use crate::domain::stock::{StockIssue, StockReceipt};
use crate::domain::tenant::TenantContext;
use crate::domain::transaction::InventoryTransaction;
use crate::domain::types::{ReferenceType, TransactionType};
use crate::engine::assembly_costing::{AssemblyCostCalculator, ComponentLine};
use crate::perf::PerfGuard;
use crate::repository::{AssemblyRunRecord, AssemblyRunRepository, PartRepository, ProductRepository};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyComponentRequest {
    pub part_id: String,
    pub quantity_used: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordAssemblyRequest {
    pub product_id: String,
    pub quantity_assembled: i64,
    #[serde(default)]
    pub components: Vec<AssemblyComponentRequest>,
    #[serde(default)]
    pub notes: Option<String>,
}

pub struct AssemblyApi {
    part_repo: Arc<PartRepository>,
    product_repo: Arc<ProductRepository>,
    assembly_repo: Arc<AssemblyRunRepository>,
    config: Arc<ConfigManager>,
    calculator: AssemblyCostCalculator,
}

impl AssemblyApi {
    pub fn new(
        part_repo: Arc<PartRepository>,
        product_repo: Arc<ProductRepository>,
        assembly_repo: Arc<AssemblyRunRepository>,
        config: Arc<ConfigManager>,
    ) -> Self {
        Self {
            part_repo,
            product_repo,
            assembly_repo,
            config,
            calculator: AssemblyCostCalculator::new(),
        }
    }

    pub fn record_assembly(
        &self,
        ctx: &TenantContext,
        req: RecordAssemblyRequest,
    ) -> ApiResult<AssemblyRunDetail> {
        let _perf = PerfGuard::new("record_assembly", &ctx.company_id);

        let product_id = require_text("product_id", &req.product_id)?;
        let part_ids = req
            .components
            .iter()
            .enumerate()
            .map(|(i, c)| require_text(&format!("components[{}].part_id", i), &c.part_id))
            .collect::<ApiResult<Vec<_>>>()?;

        let product = self
            .product_repo
            .find_by_id(&ctx.company_id, &product_id)?
            .ok_or_else(|| ApiError::NotFound(format!("product {}", product_id)))?;

        let parts: HashMap<String, _> = self
            .part_repo
            .find_by_ids(&ctx.company_id, &part_ids)?
            .into_iter()
            .map(|p| (p.part_id.clone(), p))
            .collect();

        let mut lines = Vec::with_capacity(part_ids.len());
        for (part_id, c) in part_ids.iter().zip(&req.components) {
            let part = parts
                .get(part_id)
                .ok_or_else(|| ApiError::NotFound(format!("part {}", part_id)))?;
            lines.push(ComponentLine {
                part_name: part.name.clone(),
                quantity_used: c.quantity_used,
                unit_cost: part.avg_cost,
            });
        }

        let costing = self.calculator.cost(req.quantity_assembled, &lines)?;

        let assembly_id = uuid::Uuid::new_v4().to_string();
        let assembly = AssemblyRun {
            assembly_id: assembly_id.clone(),
            company_id: ctx.company_id.clone(),
            product_id: product.product_id.clone(),
            quantity_assembled: costing.quantity_assembled,
            total_cost: costing.total_cost,
            cost_per_unit: costing.cost_per_unit,
            notes: optional_text(req.notes),
            assembly_date: chrono::Utc::now().naive_utc(),
            created_by: ctx.user_id.clone(),
        };

        let mut components = Vec::with_capacity(lines.len());
        let mut issues = Vec::with_capacity(lines.len());
        let mut transactions = Vec::with_capacity(lines.len() + 1);

        for (idx, (part_id, costed)) in part_ids.iter().zip(&costing.components).enumerate() {
            components.push(AssemblyComponent {
                component_id: uuid::Uuid::new_v4().to_string(),
                assembly_id: assembly_id.clone(),
                line_no: idx as i64 + 1,
                part_id: part_id.clone(),
                part_name: costed.part_name.clone(),
                quantity_used: costed.quantity_used,
                unit_cost: costed.unit_cost,
                total_cost: costed.total_cost,
            });
            issues.push(StockIssue {
                item_id: part_id.clone(),
                quantity: costed.quantity_used as f64,
            });
            transactions.push(
                InventoryTransaction::new(
                    &ctx.company_id,
                    &ctx.user_id,
                    TransactionType::Assembly,
                    ReferenceType::Part,
                    part_id,
                    -(costed.quantity_used as f64),
                    costed.unit_cost,
                    -costed.total_cost,
                )
                .with_source(&assembly_id),
            );
        }

        transactions.push(
            InventoryTransaction::new(
                &ctx.company_id,
                &ctx.user_id,
                TransactionType::Assembly,
                ReferenceType::Product,
                &product.product_id,
                costing.quantity_assembled as f64,
                costing.cost_per_unit,
                costing.total_cost,
            )
            .with_source(&assembly_id),
        );

        let record = AssemblyRunRecord {
            assembly,
            components,
            part_issues: issues,
            product_receipt: StockReceipt {
                item_id: product.product_id.clone(),
                quantity: costing.quantity_assembled as f64,
                total_cost: costing.total_cost_exact(),
            },
            transactions,
        };

        let allow_negative = self.config.allow_negative_stock(&ctx.company_id)?;
        self.assembly_repo.record_assembly(&record, allow_negative)?;

        tracing::info!(
            company_id = %ctx.company_id,
            assembly_id = %assembly_id,
            product_id = %product.product_id,
            quantity = costing.quantity_assembled,
            total_cost = costing.total_cost,
            "assembly recorded"
        );

        Ok(AssemblyRunDetail {
            assembly: record.assembly,
            components: record.components,
        })
    }

    pub fn get_assembly(&self, ctx: &TenantContext, assembly_id: &str) -> ApiResult<AssemblyRunDetail> {
        self.assembly_repo
            .find_detail(&ctx.company_id, assembly_id)?
            .ok_or_else(|| ApiError::NotFound(format!("assembly run {}", assembly_id)))
    }
}
