// ==========================================
// Seal Inventory - assembly domain model
// ==========================================
// assembly_runs / assembly_components tables (append-only)
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Parts assembled into a batch of finished products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyRun {
    pub assembly_id: String,
    pub company_id: String,
    pub product_id: String,

    pub quantity_assembled: i64,
    pub total_cost: f64,
    pub cost_per_unit: f64,

    pub notes: Option<String>,
    pub assembly_date: NaiveDateTime,
    pub created_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyComponent {
    pub component_id: String,
    pub assembly_id: String,
    pub line_no: i64,

    pub part_id: String,
    pub part_name: String,

    pub quantity_used: i64,
    pub unit_cost: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyRunDetail {
    pub assembly: AssemblyRun,
    pub components: Vec<AssemblyComponent>,
}
