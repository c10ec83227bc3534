// ==========================================
// Seal Inventory - inventory transaction log
// ==========================================
// Every stock movement writes one row. Rows are never updated or deleted.
// quantity and total_value are signed: negative = consumed / issued.
// ==========================================

use crate::domain::types::{ReferenceType, TransactionType};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryTransaction {
    pub transaction_id: String,
    pub company_id: String,

    pub transaction_type: TransactionType,
    pub reference_type: ReferenceType,
    pub reference_id: String, // material_id / part_id / product_id

    /// id of the run / assembly that caused the movement
    pub source_id: Option<String>,

    pub quantity: f64,
    pub unit_price: f64,
    pub total_value: f64,

    pub notes: Option<String>,
    pub transaction_date: NaiveDateTime,
    pub created_by: String,
}

impl InventoryTransaction {
    /// New transaction stamped with the current UTC time and a fresh id
    pub fn new(
        company_id: &str,
        created_by: &str,
        transaction_type: TransactionType,
        reference_type: ReferenceType,
        reference_id: &str,
        quantity: f64,
        unit_price: f64,
        total_value: f64,
    ) -> Self {
        Self {
            transaction_id: uuid::Uuid::new_v4().to_string(),
            company_id: company_id.to_string(),
            transaction_type,
            reference_type,
            reference_id: reference_id.to_string(),
            source_id: None,
            quantity,
            unit_price,
            total_value,
            notes: None,
            transaction_date: chrono::Utc::now().naive_utc(),
            created_by: created_by.to_string(),
        }
    }

    /// ADJUSTMENT row recording the stock a catalog item starts with
    pub fn opening_stock(
        company_id: &str,
        created_by: &str,
        reference_type: ReferenceType,
        reference_id: &str,
        quantity: f64,
        unit_cost: f64,
    ) -> Self {
        Self::new(
            company_id,
            created_by,
            TransactionType::Adjustment,
            reference_type,
            reference_id,
            quantity,
            unit_cost,
            quantity * unit_cost,
        )
        .with_notes(Some("opening stock".to_string()))
    }

    pub fn with_source(mut self, source_id: &str) -> Self {
        self.source_id = Some(source_id.to_string());
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }
}
