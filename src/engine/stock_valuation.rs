// ==========================================
// Seal Inventory - stock valuation (moving weighted average)
// ==========================================
// receive: new_avg = (qty * avg + recv_qty * recv_unit_cost) / (qty + recv_qty)
//          resulting stock <= 0 -> avg = recv_unit_cost
// consume: qty -= issued, avg unchanged
// ==========================================

use crate::domain::stock::StockPosition;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StockError {
    #[error("insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { available: f64, requested: f64 },

    #[error("invalid stock movement: {0}")]
    InvalidMovement(String),
}

/// Value a receipt of `quantity` units costing `total_cost` into `position`
pub fn receive(
    position: StockPosition,
    quantity: f64,
    total_cost: f64,
) -> Result<StockPosition, StockError> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(StockError::InvalidMovement(format!(
            "received quantity must be non-negative, got {}",
            quantity
        )));
    }
    if !total_cost.is_finite() || total_cost < 0.0 {
        return Err(StockError::InvalidMovement(format!(
            "received cost must be non-negative, got {}",
            total_cost
        )));
    }
    if quantity == 0.0 {
        return Ok(position);
    }

    let unit_cost = total_cost / quantity;
    let new_qty = position.quantity + quantity;
    let new_avg = if new_qty <= 0.0 || position.quantity <= 0.0 {
        // negative or empty stock carries no meaningful value
        unit_cost
    } else {
        (position.quantity * position.avg_cost + total_cost) / new_qty
    };

    Ok(StockPosition::new(new_qty, new_avg))
}

/// Issue `quantity` units out of `position`
pub fn consume(
    position: StockPosition,
    quantity: f64,
    allow_negative: bool,
) -> Result<StockPosition, StockError> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(StockError::InvalidMovement(format!(
            "issued quantity must be non-negative, got {}",
            quantity
        )));
    }
    if !allow_negative && quantity > position.quantity + f64::EPSILON {
        return Err(StockError::InsufficientStock {
            available: position.quantity,
            requested: quantity,
        });
    }
    Ok(StockPosition::new(position.quantity - quantity, position.avg_cost))
}
