// ==========================================
// Seal Inventory - catalog domain model
// ==========================================
// raw_materials / parts / products tables.
// Catalog rows are tenant-scoped through company_id.
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// RawMaterial - purchased input stock
// ==========================================
// e.g. "Rubber Sheet - NBR", grade "NBR", unit "kg"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMaterial {
    pub material_id: String,
    pub company_id: String,

    pub name: String,
    pub grade: Option<String>,
    pub unit: String, // "kg", "pieces", "meters", "sheets"

    // ===== stock =====
    pub opening_stock: f64,
    pub current_stock: f64,
    pub min_stock: f64,

    // ===== cost =====
    pub avg_cost: f64,
    pub last_purchase_rate: f64,

    pub created_at: NaiveDateTime,
}

// ==========================================
// Part - intermediate component produced from raw material
// ==========================================
// e.g. "Wati", "Washer", "Bellow"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub part_id: String,
    pub company_id: String,

    pub name: String,
    pub material_type: Option<String>, // "Steel", "Rubber"
    pub specific_type: Option<String>, // "Wire/Coin/Sheet", "NBR/Viton"

    /// Weight in kg per piece. Fixed catalog value used by cost allocation.
    pub weight_per_unit: f64,
    pub current_stock: i64,
    /// Moving average unit cost, maintained by production runs
    pub avg_cost: f64,

    pub created_at: NaiveDateTime,
}

// ==========================================
// Product - finished seal assembled from parts
// ==========================================
// e.g. "Open" 50mm, "J2" 25mm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub company_id: String,

    pub name: String,
    pub size: Option<String>,
    pub variant: Option<String>,

    pub current_stock: i64,
    pub selling_price: f64,
    /// Moving average unit cost, maintained by assembly runs
    pub avg_cost: f64,

    pub created_at: NaiveDateTime,
}

impl RawMaterial {
    /// Below minimum stock. `fallback_threshold` applies when `min_stock` is unset (0).
    pub fn is_low_stock(&self, fallback_threshold: f64) -> bool {
        let threshold = if self.min_stock > 0.0 {
            self.min_stock
        } else {
            fallback_threshold
        };
        self.current_stock <= threshold
    }
}
