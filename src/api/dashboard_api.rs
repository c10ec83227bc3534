// ==========================================
// Seal Inventory - dashboard API
// ==========================================
// Catalog counts and low-stock materials for one company
// ==========================================

use serde::Serialize;
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::config::ConfigManager;
use crate::domain::catalog::RawMaterial;
use crate::domain::tenant::TenantContext;
use crate::perf::PerfGuard;
use crate::repository::{
    PartRepository, ProductRepository, ProductionRunRepository, RawMaterialRepository,
};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub materials_count: i64,
    pub parts_count: i64,
    pub products_count: i64,
    pub production_runs_count: i64,
    pub low_stock_materials: Vec<RawMaterial>,
}

pub struct DashboardApi {
    material_repo: Arc<RawMaterialRepository>,
    part_repo: Arc<PartRepository>,
    product_repo: Arc<ProductRepository>,
    run_repo: Arc<ProductionRunRepository>,
    config: Arc<ConfigManager>,
}

impl DashboardApi {
    pub fn new(
        material_repo: Arc<RawMaterialRepository>,
        part_repo: Arc<PartRepository>,
        product_repo: Arc<ProductRepository>,
        run_repo: Arc<ProductionRunRepository>,
        config: Arc<ConfigManager>,
    ) -> Self {
        Self {
            material_repo,
            part_repo,
            product_repo,
            run_repo,
            config,
        }
    }

    pub fn get_summary(&self, ctx: &TenantContext) -> ApiResult<DashboardSummary> {
        let _perf = PerfGuard::new("dashboard_summary", &ctx.company_id);

        let threshold = self.config.low_stock_threshold(&ctx.company_id)?;
        let materials = self.material_repo.list_by_company(&ctx.company_id)?;
        let materials_count = materials.len() as i64;
        let low_stock_materials = materials
            .into_iter()
            .filter(|m| m.is_low_stock(threshold))
            .collect();

        Ok(DashboardSummary {
            materials_count,
            parts_count: self.part_repo.count_by_company(&ctx.company_id)?,
            products_count: self.product_repo.count_by_company(&ctx.company_id)?,
            production_runs_count: self.run_repo.count_by_company(&ctx.company_id)?,
            low_stock_materials,
        })
    }
}
