// ==========================================
// Seal Inventory - production cost allocation
// ==========================================
// Input:  total cost of the consumed material + produced outputs
//         (weight per unit, quantity)
// Output: cost per kg, allocated cost and cost per unit for each output
// ==========================================
// Rule: cost is split proportionally to output weight
//       (weight_per_unit * quantity). Total output weight must be > 0.
// Full precision is kept internally; rounding happens on the way out.
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Decimal places for monetary values returned / stored
pub const MONEY_SCALE: u32 = 2;

/// Decimal places for cost_per_kg (a rate, not an amount)
pub const RATE_SCALE: u32 = 4;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    #[error("invalid allocation: {0}")]
    InvalidAllocation(String),
}

pub type AllocationOutcome<T> = Result<T, AllocationError>;

// ==========================================
// Input / output types
// ==========================================

/// One produced output to allocate cost to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationLine {
    pub part_name: String,
    /// kg per unit
    pub weight: f64,
    pub quantity: i64,
}

impl AllocationLine {
    pub fn new(part_name: impl Into<String>, weight: f64, quantity: i64) -> Self {
        Self {
            part_name: part_name.into(),
            weight,
            quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocatedLine {
    pub part_name: String,
    pub quantity: i64,
    pub output_weight: f64,
    pub allocated_cost: f64,
    pub cost_per_unit: f64,

    #[serde(skip)]
    allocated_cost_exact: f64,
    #[serde(skip)]
    cost_per_unit_exact: f64,
}

impl AllocatedLine {
    pub fn allocated_cost_exact(&self) -> f64 {
        self.allocated_cost_exact
    }

    pub fn cost_per_unit_exact(&self) -> f64 {
        self.cost_per_unit_exact
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationResult {
    pub input_cost: f64,
    pub total_weight: f64,
    pub cost_per_kg: f64,
    pub outputs: Vec<AllocatedLine>,

    #[serde(skip)]
    cost_per_kg_exact: f64,
}

impl AllocationResult {
    /// input_cost / total_weight before rounding
    pub fn cost_per_kg_exact(&self) -> f64 {
        self.cost_per_kg_exact
    }

    /// Sum of rounded allocated costs
    pub fn allocated_total(&self) -> f64 {
        self.outputs.iter().map(|o| o.allocated_cost).sum()
    }
}

// ==========================================
// CostAllocator
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct CostAllocator;

impl CostAllocator {
    pub fn new() -> Self {
        Self
    }

    /// Split `input_cost` across `outputs` proportionally to weight * quantity
    ///
    /// # Errors
    /// `InvalidAllocation` when the outputs are empty, total weight is zero,
    /// or a cost / weight / quantity is negative or not finite.
    pub fn allocate(
        &self,
        input_cost: f64,
        outputs: &[AllocationLine],
    ) -> AllocationOutcome<AllocationResult> {
        if !input_cost.is_finite() || input_cost < 0.0 {
            return Err(AllocationError::InvalidAllocation(format!(
                "input cost must be a non-negative number, got {}",
                input_cost
            )));
        }
        if outputs.is_empty() {
            return Err(AllocationError::InvalidAllocation(
                "no valid outputs: output list is empty".to_string(),
            ));
        }

        for line in outputs {
            if !line.weight.is_finite() || line.weight < 0.0 {
                return Err(AllocationError::InvalidAllocation(format!(
                    "output '{}' has invalid weight {}",
                    line.part_name, line.weight
                )));
            }
            if line.quantity < 0 {
                return Err(AllocationError::InvalidAllocation(format!(
                    "output '{}' has negative quantity {}",
                    line.part_name, line.quantity
                )));
            }
        }

        let total_weight: f64 = outputs.iter().map(output_weight).sum();
        if total_weight <= 0.0 {
            return Err(AllocationError::InvalidAllocation(
                "no valid outputs: total output weight is zero".to_string(),
            ));
        }

        if !total_weight.is_finite() {
            return Err(AllocationError::InvalidAllocation(format!(
                "total output weight overflows: {}",
                total_weight
            )));
        }

        let cost_per_kg = input_cost / total_weight;
        if !cost_per_kg.is_finite() {
            return Err(AllocationError::InvalidAllocation(format!(
                "cost per kg is not a finite number for total weight {}",
                total_weight
            )));
        }

        let lines = outputs
            .iter()
            .map(|line| {
                let weight = output_weight(line);
                let allocated = weight * cost_per_kg;
                let per_unit = if line.quantity > 0 {
                    allocated / line.quantity as f64
                } else {
                    0.0
                };
                AllocatedLine {
                    part_name: line.part_name.clone(),
                    quantity: line.quantity,
                    output_weight: weight,
                    allocated_cost: round_to(allocated, MONEY_SCALE),
                    cost_per_unit: round_to(per_unit, MONEY_SCALE),
                    allocated_cost_exact: allocated,
                    cost_per_unit_exact: per_unit,
                }
            })
            .collect();

        tracing::debug!(
            input_cost,
            total_weight,
            cost_per_kg,
            outputs = outputs.len(),
            "cost allocated"
        );

        Ok(AllocationResult {
            input_cost,
            total_weight,
            cost_per_kg: round_to(cost_per_kg, RATE_SCALE),
            outputs: lines,
            cost_per_kg_exact: cost_per_kg,
        })
    }
}

fn output_weight(line: &AllocationLine) -> f64 {
    line.weight * line.quantity as f64
}

/// Round half away from zero to `scale` decimal places
pub fn round_to(value: f64, scale: u32) -> f64 {
    let factor = 10f64.powi(scale as i32);
    (value * factor).round() / factor
}

/// Round a monetary amount for display / storage
pub fn round_money(value: f64) -> f64 {
    round_to(value, MONEY_SCALE)
}
