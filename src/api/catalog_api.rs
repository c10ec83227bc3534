// ==========================================
// Seal Inventory - catalog API
// ==========================================
// Raw materials, parts and products: create and list.
// Opening stock is written to the transaction log as ADJUSTMENT.
// ==========================================

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{
    optional_text, require_non_negative, require_non_negative_count, require_text,
};
use crate::config::ConfigManager;
use crate::domain::catalog::{Part, Product, RawMaterial};
use crate::domain::tenant::TenantContext;
use crate::domain::transaction::InventoryTransaction;
use crate::domain::types::ReferenceType;
use crate::perf::PerfGuard;
use crate::repository::{PartRepository, ProductRepository, RawMaterialRepository};

// ==========================================
// Requests
// ==========================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMaterialRequest {
    pub name: String,
    #[serde(default)]
    pub grade: Option<String>,
    /// Falls back to inventory.default_material_unit
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub current_stock: f64,
    #[serde(default)]
    pub min_stock: f64,
    #[serde(default)]
    pub avg_cost: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePartRequest {
    pub name: String,
    #[serde(default)]
    pub material_type: Option<String>,
    #[serde(default)]
    pub specific_type: Option<String>,
    #[serde(default)]
    pub weight_per_unit: f64,
    #[serde(default)]
    pub current_stock: i64,
    #[serde(default)]
    pub avg_cost: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub current_stock: i64,
    #[serde(default)]
    pub selling_price: f64,
    #[serde(default)]
    pub avg_cost: f64,
}

// ==========================================
// CatalogApi
// ==========================================
pub struct CatalogApi {
    material_repo: Arc<RawMaterialRepository>,
    part_repo: Arc<PartRepository>,
    product_repo: Arc<ProductRepository>,
    config: Arc<ConfigManager>,
}

impl CatalogApi {
    pub fn new(
        material_repo: Arc<RawMaterialRepository>,
        part_repo: Arc<PartRepository>,
        product_repo: Arc<ProductRepository>,
        config: Arc<ConfigManager>,
    ) -> Self {
        Self {
            material_repo,
            part_repo,
            product_repo,
            config,
        }
    }

    // ==========================================
    // Raw materials
    // ==========================================

    /// Create a raw material
    ///
    /// # Returns
    /// - Ok(material_id)
    /// - Err(InvalidInput): blank name or negative numbers
    pub fn create_material(
        &self,
        ctx: &TenantContext,
        req: CreateMaterialRequest,
    ) -> ApiResult<String> {
        let _perf = PerfGuard::new("create_material", &ctx.company_id);

        let name = require_text("name", &req.name)?;
        let current_stock = require_non_negative("current_stock", req.current_stock)?;
        let min_stock = require_non_negative("min_stock", req.min_stock)?;
        let avg_cost = require_non_negative("avg_cost", req.avg_cost)?;
        let unit = match optional_text(req.unit) {
            Some(u) => u,
            None => self.config.default_material_unit(&ctx.company_id)?,
        };

        let material = RawMaterial {
            material_id: uuid::Uuid::new_v4().to_string(),
            company_id: ctx.company_id.clone(),
            name,
            grade: optional_text(req.grade),
            unit,
            opening_stock: current_stock,
            current_stock,
            min_stock,
            avg_cost,
            last_purchase_rate: avg_cost,
            created_at: chrono::Utc::now().naive_utc(),
        };

        let opening = (current_stock > 0.0).then(|| {
            InventoryTransaction::opening_stock(
                &ctx.company_id,
                &ctx.user_id,
                ReferenceType::Material,
                &material.material_id,
                current_stock,
                avg_cost,
            )
        });

        self.material_repo.insert(&material, opening.as_ref())?;
        tracing::info!(
            company_id = %ctx.company_id,
            material_id = %material.material_id,
            name = %material.name,
            "material created"
        );
        Ok(material.material_id)
    }

    pub fn list_materials(&self, ctx: &TenantContext) -> ApiResult<Vec<RawMaterial>> {
        let _perf = PerfGuard::new("list_materials", &ctx.company_id);
        Ok(self.material_repo.list_by_company(&ctx.company_id)?)
    }

    pub fn get_material(&self, ctx: &TenantContext, material_id: &str) -> ApiResult<RawMaterial> {
        self.material_repo
            .find_by_id(&ctx.company_id, material_id)?
            .ok_or_else(|| ApiError::NotFound(format!("material {}", material_id)))
    }

    // ==========================================
    // Parts
    // ==========================================

    pub fn create_part(&self, ctx: &TenantContext, req: CreatePartRequest) -> ApiResult<String> {
        let _perf = PerfGuard::new("create_part", &ctx.company_id);

        let name = require_text("name", &req.name)?;
        let weight_per_unit = require_non_negative("weight_per_unit", req.weight_per_unit)?;
        let current_stock = require_non_negative_count("current_stock", req.current_stock)?;
        let avg_cost = require_non_negative("avg_cost", req.avg_cost)?;

        let part = Part {
            part_id: uuid::Uuid::new_v4().to_string(),
            company_id: ctx.company_id.clone(),
            name,
            material_type: optional_text(req.material_type),
            specific_type: optional_text(req.specific_type),
            weight_per_unit,
            current_stock,
            avg_cost,
            created_at: chrono::Utc::now().naive_utc(),
        };

        let opening = (current_stock > 0).then(|| {
            InventoryTransaction::opening_stock(
                &ctx.company_id,
                &ctx.user_id,
                ReferenceType::Part,
                &part.part_id,
                current_stock as f64,
                avg_cost,
            )
        });

        self.part_repo.insert(&part, opening.as_ref())?;
        tracing::info!(company_id = %ctx.company_id, part_id = %part.part_id, name = %part.name, "part created");
        Ok(part.part_id)
    }

    pub fn list_parts(&self, ctx: &TenantContext) -> ApiResult<Vec<Part>> {
        let _perf = PerfGuard::new("list_parts", &ctx.company_id);
        Ok(self.part_repo.list_by_company(&ctx.company_id)?)
    }

    pub fn get_part(&self, ctx: &TenantContext, part_id: &str) -> ApiResult<Part> {
        self.part_repo
            .find_by_id(&ctx.company_id, part_id)?
            .ok_or_else(|| ApiError::NotFound(format!("part {}", part_id)))
    }

    // ==========================================
    // Products
    // ==========================================

    pub fn create_product(
        &self,
        ctx: &TenantContext,
        req: CreateProductRequest,
    ) -> ApiResult<String> {
        let _perf = PerfGuard::new("create_product", &ctx.company_id);

        let name = require_text("name", &req.name)?;
        let current_stock = require_non_negative_count("current_stock", req.current_stock)?;
        let selling_price = require_non_negative("selling_price", req.selling_price)?;
        let avg_cost = require_non_negative("avg_cost", req.avg_cost)?;

        let product = Product {
            product_id: uuid::Uuid::new_v4().to_string(),
            company_id: ctx.company_id.clone(),
            name,
            size: optional_text(req.size),
            variant: optional_text(req.variant),
            current_stock,
            selling_price,
            avg_cost,
            created_at: chrono::Utc::now().naive_utc(),
        };

        let opening = (current_stock > 0).then(|| {
            InventoryTransaction::opening_stock(
                &ctx.company_id,
                &ctx.user_id,
                ReferenceType::Product,
                &product.product_id,
                current_stock as f64,
                avg_cost,
            )
        });

        self.product_repo.insert(&product, opening.as_ref())?;
        tracing::info!(
            company_id = %ctx.company_id,
            product_id = %product.product_id,
            name = %product.name,
            "product created"
        );
        Ok(product.product_id)
    }

    pub fn list_products(&self, ctx: &TenantContext) -> ApiResult<Vec<Product>> {
        let _perf = PerfGuard::new("list_products", &ctx.company_id);
        Ok(self.product_repo.list_by_company(&ctx.company_id)?)
    }

    pub fn get_product(&self, ctx: &TenantContext, product_id: &str) -> ApiResult<Product> {
        self.product_repo
            .find_by_id(&ctx.company_id, product_id)?
            .ok_or_else(|| ApiError::NotFound(format!("product {}", product_id)))
    }
}
