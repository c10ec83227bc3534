// ==========================================
// Seal Inventory - stock movements
// ==========================================
// Intent objects handed to repositories together with an append-only
// event (production run / assembly). The repository applies them inside
// the same SQLite transaction as the event rows.
// ==========================================

use serde::{Deserialize, Serialize};

/// Stock received at a known total cost (valued into the moving average)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockReceipt {
    pub item_id: String,
    pub quantity: f64,
    pub total_cost: f64,
}

/// Stock issued / consumed (average cost unchanged)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockIssue {
    pub item_id: String,
    pub quantity: f64,
}

/// Quantity on hand plus moving average unit cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockPosition {
    pub quantity: f64,
    pub avg_cost: f64,
}

impl StockPosition {
    pub fn new(quantity: f64, avg_cost: f64) -> Self {
        Self { quantity, avg_cost }
    }
}
