// ==========================================
// Seal Inventory - assembly costing
// ==========================================
// Parts consumed at their current average cost roll up into the
// cost of the assembled products.
// total_cost    = sum(quantity_used * unit_cost)
// cost_per_unit = total_cost / quantity_assembled
// ==========================================

use crate::engine::cost_allocation::round_money;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    #[error("invalid assembly: {0}")]
    InvalidAssembly(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentLine {
    pub part_name: String,
    pub quantity_used: i64,
    /// part avg_cost at the time of assembly
    pub unit_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostedComponent {
    pub part_name: String,
    pub quantity_used: i64,
    pub unit_cost: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssemblyCosting {
    pub quantity_assembled: i64,
    pub total_cost: f64,
    pub cost_per_unit: f64,
    pub components: Vec<CostedComponent>,

    #[serde(skip)]
    total_cost_exact: f64,
}

impl AssemblyCosting {
    pub fn total_cost_exact(&self) -> f64 {
        self.total_cost_exact
    }

    pub fn cost_per_unit_exact(&self) -> f64 {
        self.total_cost_exact / self.quantity_assembled as f64
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AssemblyCostCalculator;

impl AssemblyCostCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn cost(
        &self,
        quantity_assembled: i64,
        components: &[ComponentLine],
    ) -> Result<AssemblyCosting, AssemblyError> {
        if quantity_assembled <= 0 {
            return Err(AssemblyError::InvalidAssembly(format!(
                "quantity_assembled must be positive, got {}",
                quantity_assembled
            )));
        }
        if components.is_empty() {
            return Err(AssemblyError::InvalidAssembly(
                "assembly has no components".to_string(),
            ));
        }

        let mut total = 0.0;
        let mut costed = Vec::with_capacity(components.len());
        for c in components {
            if c.quantity_used <= 0 {
                return Err(AssemblyError::InvalidAssembly(format!(
                    "component '{}' has non-positive quantity {}",
                    c.part_name, c.quantity_used
                )));
            }
            if !c.unit_cost.is_finite() || c.unit_cost < 0.0 {
                return Err(AssemblyError::InvalidAssembly(format!(
                    "component '{}' has invalid unit cost {}",
                    c.part_name, c.unit_cost
                )));
            }
            let line_total = c.quantity_used as f64 * c.unit_cost;
            total += line_total;
            costed.push(CostedComponent {
                part_name: c.part_name.clone(),
                quantity_used: c.quantity_used,
                unit_cost: c.unit_cost,
                total_cost: round_money(line_total),
            });
        }

        Ok(AssemblyCosting {
            quantity_assembled,
            total_cost: round_money(total),
            cost_per_unit: round_money(total / quantity_assembled as f64),
            components: costed,
            total_cost_exact: total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, qty: i64, unit_cost: f64) -> ComponentLine {
        ComponentLine {
            part_name: name.to_string(),
            quantity_used: qty,
            unit_cost,
        }
    }

    #[test]
    fn test_rolls_up_component_costs() {
        let calc = AssemblyCostCalculator::new();
        let result = calc
            .cost(
                10,
                &[line("Washer", 20, 0.5), line("Spring", 10, 1.25), line("Oring", 10, 0.1)],
            )
            .unwrap();

        assert_eq!(result.total_cost, 23.5);
        assert_eq!(result.cost_per_unit, 2.35);
        assert_eq!(result.components[1].total_cost, 12.5);
        assert!((result.cost_per_unit_exact() - 2.35).abs() < 1e-9);
    }

    #[test]
    fn test_zero_cost_parts_are_allowed() {
        let result = AssemblyCostCalculator::new()
            .cost(3, &[line("Cap", 3, 0.0)])
            .unwrap();
        assert_eq!(result.total_cost, 0.0);
        assert_eq!(result.cost_per_unit, 0.0);
    }

    #[test]
    fn test_invalid_assemblies_rejected() {
        let calc = AssemblyCostCalculator::new();
        assert!(matches!(
            calc.cost(0, &[line("Cap", 1, 1.0)]),
            Err(AssemblyError::InvalidAssembly(_))
        ));
        assert!(calc.cost(5, &[]).is_err());
        assert!(calc.cost(5, &[line("Cap", 0, 1.0)]).is_err());
        assert!(calc.cost(5, &[line("Cap", 1, -1.0)]).is_err());
    }
}
