// ==========================================
// Seal Inventory - in-transaction stock updates
// ==========================================
// Reads the current position of a catalog row, applies the
// valuation rule and writes the new position back. Always called
// on an open SQLite transaction owned by the event repository.
// ==========================================

use crate::domain::stock::{StockIssue, StockPosition, StockReceipt};
use crate::engine::cost_allocation::round_to;
use crate::engine::stock_valuation::{self, StockError};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Decimal places kept for stored average costs
const AVG_COST_SCALE: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StockTable {
    RawMaterials,
    Parts,
    Products,
}

impl StockTable {
    fn table(&self) -> &'static str {
        match self {
            StockTable::RawMaterials => "raw_materials",
            StockTable::Parts => "parts",
            StockTable::Products => "products",
        }
    }

    fn id_column(&self) -> &'static str {
        match self {
            StockTable::RawMaterials => "material_id",
            StockTable::Parts => "part_id",
            StockTable::Products => "product_id",
        }
    }

    fn entity(&self) -> &'static str {
        match self {
            StockTable::RawMaterials => "RawMaterial",
            StockTable::Parts => "Part",
            StockTable::Products => "Product",
        }
    }

    /// parts / products count whole pieces
    fn whole_units(&self) -> bool {
        !matches!(self, StockTable::RawMaterials)
    }
}

pub(crate) fn read_position(
    conn: &Connection,
    table: StockTable,
    company_id: &str,
    item_id: &str,
) -> RepositoryResult<StockPosition> {
    let sql = format!(
        "SELECT current_stock, avg_cost FROM {} WHERE company_id = ?1 AND {} = ?2",
        table.table(),
        table.id_column()
    );
    conn.query_row(&sql, params![company_id, item_id], |row| {
        Ok(StockPosition::new(row.get(0)?, row.get(1)?))
    })
    .optional()?
    .ok_or_else(|| RepositoryError::NotFound {
        entity: table.entity().to_string(),
        id: item_id.to_string(),
    })
}

fn write_position(
    conn: &Connection,
    table: StockTable,
    company_id: &str,
    item_id: &str,
    position: StockPosition,
) -> RepositoryResult<()> {
    let sql = format!(
        "UPDATE {} SET current_stock = ?1, avg_cost = ?2 WHERE company_id = ?3 AND {} = ?4",
        table.table(),
        table.id_column()
    );
    let avg_cost = round_to(position.avg_cost, AVG_COST_SCALE);
    let updated = if table.whole_units() {
        conn.execute(
            &sql,
            params![position.quantity.round() as i64, avg_cost, company_id, item_id],
        )?
    } else {
        conn.execute(&sql, params![position.quantity, avg_cost, company_id, item_id])?
    };

    if updated == 0 {
        return Err(RepositoryError::NotFound {
            entity: table.entity().to_string(),
            id: item_id.to_string(),
        });
    }
    Ok(())
}

/// Receive stock at a known cost (moving average)
pub(crate) fn apply_receipt(
    conn: &Connection,
    table: StockTable,
    company_id: &str,
    receipt: &StockReceipt,
) -> RepositoryResult<StockPosition> {
    let current = read_position(conn, table, company_id, &receipt.item_id)?;
    let next = stock_valuation::receive(current, receipt.quantity, receipt.total_cost)
        .map_err(|e| map_stock_error(e, &receipt.item_id))?;
    write_position(conn, table, company_id, &receipt.item_id, next)?;
    Ok(next)
}

/// Issue stock (average unchanged)
pub(crate) fn apply_issue(
    conn: &Connection,
    table: StockTable,
    company_id: &str,
    issue: &StockIssue,
    allow_negative: bool,
) -> RepositoryResult<StockPosition> {
    let current = read_position(conn, table, company_id, &issue.item_id)?;
    let next = stock_valuation::consume(current, issue.quantity, allow_negative)
        .map_err(|e| map_stock_error(e, &issue.item_id))?;
    write_position(conn, table, company_id, &issue.item_id, next)?;
    Ok(next)
}

fn map_stock_error(err: StockError, item_id: &str) -> RepositoryError {
    match err {
        StockError::InsufficientStock {
            available,
            requested,
        } => RepositoryError::InsufficientStock {
            item_id: item_id.to_string(),
            available,
            requested,
        },
        StockError::InvalidMovement(msg) => RepositoryError::ValidationError(msg),
    }
}
