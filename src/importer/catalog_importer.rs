// ==========================================
// Seal Inventory - catalog importer
// ==========================================
// File -> raw records -> catalog rows -> one batch insert
// Invalid rows are reported and skipped; valid rows are
// inserted together with their opening-stock transactions.
// ==========================================

use crate::config::ConfigManager;
use crate::domain::catalog::{Part, Product, RawMaterial};
use crate::domain::tenant::TenantContext;
use crate::domain::transaction::InventoryTransaction;
use crate::domain::types::ReferenceType;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRecord, UniversalFileParser};
use crate::repository::{PartRepository, ProductRepository, RawMaterialRepository};
use serde::Serialize;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Materials,
    Parts,
    Products,
}

impl FromStr for CatalogKind {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "materials" | "material" | "raw_materials" => Ok(CatalogKind::Materials),
            "parts" | "part" => Ok(CatalogKind::Parts),
            "products" | "product" => Ok(CatalogKind::Products),
            other => Err(ImportError::UnknownCatalogKind(other.to_string())),
        }
    }
}

/// One rejected row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowIssue {
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogImportReport {
    pub kind: CatalogKind,
    pub total_rows: usize,
    pub imported: usize,
    pub skipped: Vec<RowIssue>,
}

pub struct CatalogImporter {
    material_repo: Arc<RawMaterialRepository>,
    part_repo: Arc<PartRepository>,
    product_repo: Arc<ProductRepository>,
    config: Arc<ConfigManager>,
}

impl CatalogImporter {
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

    pub fn import_file<P: AsRef<Path>>(
        &self,
        ctx: &TenantContext,
        kind: CatalogKind,
        path: P,
    ) -> ImportResult<CatalogImportReport> {
        let path = path.as_ref();
        tracing::info!(company_id = %ctx.company_id, ?kind, file = %path.display(), "catalog import started");

        let records = UniversalFileParser.parse(path)?;
        let report = self.import_records(ctx, kind, &records)?;

        tracing::info!(
            company_id = %ctx.company_id,
            ?kind,
            total = report.total_rows,
            imported = report.imported,
            skipped = report.skipped.len(),
            "catalog import finished"
        );
        Ok(report)
    }

    pub fn import_records(
        &self,
        ctx: &TenantContext,
        kind: CatalogKind,
        records: &[RawRecord],
    ) -> ImportResult<CatalogImportReport> {
        let mut skipped = Vec::new();
        let mut openings = Vec::new();

        // header is file row 1
        let rows = records.iter().enumerate().map(|(i, r)| (i + 2, r));

        let imported = match kind {
            CatalogKind::Materials => {
                let default_unit = self.config.default_material_unit(&ctx.company_id)?;
                let mut materials = Vec::new();
                for (row_no, record) in rows {
                    match map_material(ctx, row_no, record, &default_unit) {
                        Ok(m) => {
                            if m.current_stock > 0.0 {
                                openings.push(InventoryTransaction::opening_stock(
                                    &ctx.company_id,
                                    &ctx.user_id,
                                    ReferenceType::Material,
                                    &m.material_id,
                                    m.current_stock,
                                    m.avg_cost,
                                ));
                            }
                            materials.push(m);
                        }
                        Err(e) => skipped.push(row_issue(row_no, e)),
                    }
                }
                self.material_repo.batch_insert(&materials, &openings)?
            }
            CatalogKind::Parts => {
                let mut parts = Vec::new();
                for (row_no, record) in rows {
                    match map_part(ctx, row_no, record) {
                        Ok(p) => {
                            if p.current_stock > 0 {
                                openings.push(InventoryTransaction::opening_stock(
                                    &ctx.company_id,
                                    &ctx.user_id,
                                    ReferenceType::Part,
                                    &p.part_id,
                                    p.current_stock as f64,
                                    p.avg_cost,
                                ));
                            }
                            parts.push(p);
                        }
                        Err(e) => skipped.push(row_issue(row_no, e)),
                    }
                }
                self.part_repo.batch_insert(&parts, &openings)?
            }
            CatalogKind::Products => {
                let mut products = Vec::new();
                for (row_no, record) in rows {
                    match map_product(ctx, row_no, record) {
                        Ok(p) => {
                            if p.current_stock > 0 {
                                openings.push(InventoryTransaction::opening_stock(
                                    &ctx.company_id,
                                    &ctx.user_id,
                                    ReferenceType::Product,
                                    &p.product_id,
                                    p.current_stock as f64,
                                    p.avg_cost,
                                ));
                            }
                            products.push(p);
                        }
                        Err(e) => skipped.push(row_issue(row_no, e)),
                    }
                }
                self.product_repo.batch_insert(&products, &openings)?
            }
        };

        for issue in &skipped {
            tracing::warn!(row = issue.row, message = %issue.message, "import row skipped");
        }

        Ok(CatalogImportReport {
            kind,
            total_rows: records.len(),
            imported,
            skipped,
        })
    }
}

fn row_issue(row: usize, err: ImportError) -> RowIssue {
    RowIssue {
        row,
        message: err.to_string(),
    }
}

// ==========================================
// Row mapping
// ==========================================

fn text(record: &RawRecord, field: &str) -> Option<String> {
    record
        .get(field)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

fn required_name(record: &RawRecord, row: usize) -> ImportResult<String> {
    text(record, "name").ok_or(ImportError::FieldMappingError {
        row,
        message: "name is required".to_string(),
    })
}

/// Non-negative number; blank means 0
fn number(record: &RawRecord, row: usize, field: &str) -> ImportResult<f64> {
    let raw = match text(record, field) {
        Some(v) => v,
        None => return Ok(0.0),
    };
    let value = raw
        .parse::<f64>()
        .map_err(|_| ImportError::TypeConversionError {
            row,
            field: field.to_string(),
            message: format!("'{}' is not a number", raw),
        })?;
    if !value.is_finite() || value < 0.0 {
        return Err(ImportError::TypeConversionError {
            row,
            field: field.to_string(),
            message: format!("{} must be a non-negative number", value),
        });
    }
    Ok(value)
}

/// Non-negative whole count; "50" and "50.0" are both accepted
fn count(record: &RawRecord, row: usize, field: &str) -> ImportResult<i64> {
    let value = number(record, row, field)?;
    if value.fract() != 0.0 {
        return Err(ImportError::TypeConversionError {
            row,
            field: field.to_string(),
            message: format!("{} is not a whole number", value),
        });
    }
    Ok(value as i64)
}

fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

fn map_material(
    ctx: &TenantContext,
    row: usize,
    record: &RawRecord,
    default_unit: &str,
) -> ImportResult<RawMaterial> {
    let name = required_name(record, row)?;
    let current_stock = number(record, row, "current_stock")?;
    let avg_cost = number(record, row, "avg_cost")?;

    Ok(RawMaterial {
        material_id: uuid::Uuid::new_v4().to_string(),
        company_id: ctx.company_id.clone(),
        name,
        grade: text(record, "grade"),
        unit: text(record, "unit").unwrap_or_else(|| default_unit.to_string()),
        opening_stock: current_stock,
        current_stock,
        min_stock: number(record, row, "min_stock")?,
        avg_cost,
        last_purchase_rate: avg_cost,
        created_at: now(),
    })
}

fn map_part(ctx: &TenantContext, row: usize, record: &RawRecord) -> ImportResult<Part> {
    Ok(Part {
        part_id: uuid::Uuid::new_v4().to_string(),
        company_id: ctx.company_id.clone(),
        name: required_name(record, row)?,
        material_type: text(record, "material_type"),
        specific_type: text(record, "specific_type"),
        weight_per_unit: number(record, row, "weight_per_unit")?,
        current_stock: count(record, row, "current_stock")?,
        avg_cost: number(record, row, "avg_cost")?,
        created_at: now(),
    })
}

fn map_product(ctx: &TenantContext, row: usize, record: &RawRecord) -> ImportResult<Product> {
    Ok(Product {
        product_id: uuid::Uuid::new_v4().to_string(),
        company_id: ctx.company_id.clone(),
        name: required_name(record, row)?,
        size: text(record, "size"),
        variant: text(record, "variant"),
        current_stock: count(record, row, "current_stock")?,
        selling_price: number(record, row, "selling_price")?,
        avg_cost: number(record, row, "avg_cost")?,
        created_at: now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>()
    }

    fn ctx() -> TenantContext {
        TenantContext::new("c1", "importer")
    }

    #[test]
    fn test_catalog_kind_parse() {
        assert_eq!("Materials".parse::<CatalogKind>().unwrap(), CatalogKind::Materials);
        assert_eq!("part".parse::<CatalogKind>().unwrap(), CatalogKind::Parts);
        assert!("widgets".parse::<CatalogKind>().is_err());
    }

    #[test]
    fn test_map_material_defaults() {
        let m = map_material(&ctx(), 2, &record(&[("name", "Steel Coin")]), "kg").unwrap();
        assert_eq!(m.company_id, "c1");
        assert_eq!(m.unit, "kg");
        assert_eq!(m.current_stock, 0.0);
        assert_eq!(m.grade, None);
    }

    #[test]
    fn test_map_material_values() {
        let m = map_material(
            &ctx(),
            2,
            &record(&[
                ("name", "Steel Sheet"),
                ("grade", "SS304"),
                ("unit", "sheets"),
                ("current_stock", "200"),
                ("avg_cost", "1200"),
            ]),
            "kg",
        )
        .unwrap();
        assert_eq!(m.unit, "sheets");
        assert_eq!(m.opening_stock, 200.0);
        assert_eq!(m.last_purchase_rate, 1200.0);
    }

    #[test]
    fn test_missing_name_rejected() {
        let err = map_part(&ctx(), 5, &record(&[("weight_per_unit", "0.5")])).unwrap_err();
        assert!(matches!(err, ImportError::FieldMappingError { row: 5, .. }));
    }

    #[test]
    fn test_bad_numbers_rejected() {
        let err = map_part(&ctx(), 3, &record(&[("name", "Wati"), ("weight_per_unit", "heavy")]))
            .unwrap_err();
        assert!(matches!(err, ImportError::TypeConversionError { row: 3, .. }));

        assert!(map_product(&ctx(), 4, &record(&[("name", "Open"), ("current_stock", "2.5")])).is_err());
        assert!(map_product(&ctx(), 4, &record(&[("name", "Open"), ("current_stock", "-1")])).is_err());
    }

    #[test]
    fn test_whole_count_accepts_excel_floats() {
        let p = map_product(&ctx(), 2, &record(&[("name", "J2"), ("current_stock", "50.0")])).unwrap();
        assert_eq!(p.current_stock, 50);
    }
}
