// ==========================================
// Seal Inventory - production API
// ==========================================
// record_run: validate -> look up catalog -> CostAllocator
//             -> one atomic ProductionRunRecord
// preview_allocation: CostAllocator only, nothing persisted
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{
    optional_text, require_non_negative, require_non_negative_count, require_positive,
    require_text,
};
use crate::config::ConfigManager;
use crate::domain::production::{ProductionOutput, ProductionRun, ProductionRunDetail};
use crate::domain::stock::{StockIssue, StockReceipt};
use crate::domain::tenant::TenantContext;
use crate::domain::transaction::InventoryTransaction;
use crate::domain::types::{ReferenceType, TransactionType};
use crate::engine::cost_allocation::{AllocationLine, AllocationResult, CostAllocator};
use crate::perf::PerfGuard;
use crate::repository::{
    PartRepository, ProductionRunRecord, ProductionRunRepository, RawMaterialRepository,
};

pub const DEFAULT_RUN_LIST_LIMIT: usize = 100;
pub const MAX_RUN_LIST_LIMIT: usize = 1000;

// ==========================================
// Requests
// ==========================================

/// Ad-hoc allocation: weights given inline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationPreviewRequest {
    pub input_cost: f64,
    #[serde(default)]
    pub outputs: Vec<AllocationLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutputRequest {
    pub part_id: String,
    pub quantity: i64,
}

/// Production run: weights come from the part catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordRunRequest {
    pub input_material_id: String,
    pub input_quantity: f64,
    pub input_cost: f64,
    #[serde(default)]
    pub outputs: Vec<RunOutputRequest>,
    /// Run this one compensates
    #[serde(default)]
    pub corrects_run_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

// ==========================================
// ProductionApi
// ==========================================
pub struct ProductionApi {
    material_repo: Arc<RawMaterialRepository>,
    part_repo: Arc<PartRepository>,
    run_repo: Arc<ProductionRunRepository>,
    config: Arc<ConfigManager>,
    allocator: CostAllocator,
}

impl ProductionApi {
    pub fn new(
        material_repo: Arc<RawMaterialRepository>,
        part_repo: Arc<PartRepository>,
        run_repo: Arc<ProductionRunRepository>,
        config: Arc<ConfigManager>,
    ) -> Self {
        Self {
            material_repo,
            part_repo,
            run_repo,
            config,
            allocator: CostAllocator::new(),
        }
    }

    pub fn preview_allocation(&self, req: &AllocationPreviewRequest) -> ApiResult<AllocationResult> {
        Ok(self.allocator.allocate(req.input_cost, &req.outputs)?)
    }

    /// Record a production run
    ///
    /// # Returns
    /// - Ok(ProductionRunDetail): the stored run with its outputs
    /// - Err(InvalidAllocation): no outputs or zero total weight
    /// - Err(NotFound): material / part / corrected run not in this company
    /// - Err(InsufficientStock): material stock would go negative
    pub fn record_run(
        &self,
        ctx: &TenantContext,
        req: RecordRunRequest,
    ) -> ApiResult<ProductionRunDetail> {
        let _perf = PerfGuard::new("record_production_run", &ctx.company_id);

        // ===== boundary validation =====
        let material_id = require_text("input_material_id", &req.input_material_id)?;
        let input_quantity = require_positive("input_quantity", req.input_quantity)?;
        let input_cost = require_non_negative("input_cost", req.input_cost)?;
        for (i, out) in req.outputs.iter().enumerate() {
            require_text(&format!("outputs[{}].part_id", i), &out.part_id)?;
            require_non_negative_count(&format!("outputs[{}].quantity", i), out.quantity)?;
        }
        let corrects_run_id = optional_text(req.corrects_run_id);

        // ===== catalog lookups =====
        let material = self
            .material_repo
            .find_by_id(&ctx.company_id, &material_id)?
            .ok_or_else(|| ApiError::NotFound(format!("material {}", material_id)))?;

        if let Some(ref corrected) = corrects_run_id {
            if self.run_repo.find_run(&ctx.company_id, corrected)?.is_none() {
                return Err(ApiError::NotFound(format!("production run {}", corrected)));
            }
        }

        let part_ids: Vec<String> = req.outputs.iter().map(|o| o.part_id.trim().to_string()).collect();
        let parts: HashMap<String, _> = self
            .part_repo
            .find_by_ids(&ctx.company_id, &part_ids)?
            .into_iter()
            .map(|p| (p.part_id.clone(), p))
            .collect();

        let mut lines = Vec::with_capacity(part_ids.len());
        for (part_id, out) in part_ids.iter().zip(&req.outputs) {
            let part = parts
                .get(part_id)
                .ok_or_else(|| ApiError::NotFound(format!("part {}", part_id)))?;
            lines.push(AllocationLine::new(part.name.clone(), part.weight_per_unit, out.quantity));
        }

        // ===== allocation =====
        let allocation = self.allocator.allocate(input_cost, &lines)?;

        // ===== event rows =====
        let run_id = uuid::Uuid::new_v4().to_string();
        let now = chrono::Utc::now().naive_utc();

        let run = ProductionRun {
            run_id: run_id.clone(),
            company_id: ctx.company_id.clone(),
            input_material_id: material.material_id.clone(),
            input_quantity,
            input_cost,
            total_output_weight: allocation.total_weight,
            cost_per_kg: allocation.cost_per_kg,
            corrects_run_id,
            notes: optional_text(req.notes),
            production_date: now,
            created_by: ctx.user_id.clone(),
        };

        let mut outputs = Vec::with_capacity(lines.len());
        let mut receipts = Vec::new();
        let mut transactions = Vec::with_capacity(lines.len() + 1);

        transactions.push(
            InventoryTransaction::new(
                &ctx.company_id,
                &ctx.user_id,
                TransactionType::Production,
                ReferenceType::Material,
                &material.material_id,
                -input_quantity,
                input_cost / input_quantity,
                -input_cost,
            )
            .with_source(&run_id)
            .with_notes(Some("consumed by production run".to_string())),
        );

        for (idx, (part_id, allocated)) in part_ids.iter().zip(&allocation.outputs).enumerate() {
            let weight_per_unit = lines[idx].weight;
            outputs.push(ProductionOutput {
                output_id: uuid::Uuid::new_v4().to_string(),
                run_id: run_id.clone(),
                line_no: idx as i64 + 1,
                part_id: part_id.clone(),
                part_name: allocated.part_name.clone(),
                quantity_produced: allocated.quantity,
                weight_per_unit,
                output_weight: allocated.output_weight,
                allocated_cost: allocated.allocated_cost,
                cost_per_unit: allocated.cost_per_unit,
            });

            if allocated.quantity > 0 {
                receipts.push(StockReceipt {
                    item_id: part_id.clone(),
                    quantity: allocated.quantity as f64,
                    total_cost: allocated.allocated_cost_exact(),
                });
                transactions.push(
                    InventoryTransaction::new(
                        &ctx.company_id,
                        &ctx.user_id,
                        TransactionType::Production,
                        ReferenceType::Part,
                        part_id,
                        allocated.quantity as f64,
                        allocated.cost_per_unit,
                        allocated.allocated_cost,
                    )
                    .with_source(&run_id),
                );
            }
        }

        let record = ProductionRunRecord {
            run,
            outputs,
            material_issue: StockIssue {
                item_id: material.material_id.clone(),
                quantity: input_quantity,
            },
            part_receipts: receipts,
            transactions,
        };

        let allow_negative = self.config.allow_negative_stock(&ctx.company_id)?;
        self.run_repo.record_run(&record, allow_negative)?;

        tracing::info!(
            company_id = %ctx.company_id,
            run_id = %run_id,
            material_id = %material.material_id,
            total_weight = allocation.total_weight,
            cost_per_kg = allocation.cost_per_kg,
            outputs = record.outputs.len(),
            corrects_run_id = ?record.run.corrects_run_id,
            "production run recorded"
        );

        Ok(ProductionRunDetail {
            run: record.run,
            outputs: record.outputs,
        })
    }

    pub fn get_run(&self, ctx: &TenantContext, run_id: &str) -> ApiResult<ProductionRunDetail> {
        self.run_repo
            .find_detail(&ctx.company_id, run_id)?
            .ok_or_else(|| ApiError::NotFound(format!("production run {}", run_id)))
    }

    /// Newest first
    pub fn list_runs(&self, ctx: &TenantContext, limit: Option<usize>) -> ApiResult<Vec<ProductionRun>> {
        let _perf = PerfGuard::new("list_production_runs", &ctx.company_id);
        let limit = limit
            .unwrap_or(DEFAULT_RUN_LIST_LIMIT)
            .clamp(1, MAX_RUN_LIST_LIMIT);
        Ok(self.run_repo.list_by_company(&ctx.company_id, limit)?)
    }
}
