// ==========================================
// Seal Inventory - production domain model
// ==========================================
// production_runs / production_outputs tables.
// Append-only: a run and its outputs are written once, atomically.
// Corrections are new runs carrying corrects_run_id.
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// ProductionRun - one material batch converted into parts
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRun {
    pub run_id: String,
    pub company_id: String,

    // ===== input (consumed raw material) =====
    pub input_material_id: String,
    pub input_quantity: f64,
    pub input_cost: f64,

    // ===== allocation audit =====
    pub total_output_weight: f64,
    pub cost_per_kg: f64,

    pub corrects_run_id: Option<String>,
    pub notes: Option<String>,

    pub production_date: NaiveDateTime,
    pub created_by: String,
}

// ==========================================
// ProductionOutput - one produced part batch within a run
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionOutput {
    pub output_id: String,
    pub run_id: String,
    pub line_no: i64,

    pub part_id: String,
    pub part_name: String,

    pub quantity_produced: i64,
    pub weight_per_unit: f64, // copied from the part catalog at run time
    pub output_weight: f64,   // quantity_produced * weight_per_unit

    pub allocated_cost: f64, // output_weight * cost_per_kg
    pub cost_per_unit: f64,  // allocated_cost / quantity_produced
}

/// Run with its outputs, ordered by line_no
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRunDetail {
    pub run: ProductionRun,
    pub outputs: Vec<ProductionOutput>,
}
