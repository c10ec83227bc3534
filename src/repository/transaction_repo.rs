// ==========================================
// Seal Inventory - inventory transaction repository
// ==========================================
// inventory_transactions is append-only: insert and read, nothing else.
// Other repositories write their movement rows through
// `insert_transaction` inside their own SQLite transaction.
// ==========================================

use crate::domain::transaction::InventoryTransaction;
use crate::domain::types::{ReferenceType, TransactionType};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

const TRANSACTION_COLUMNS: &str = r#"
    transaction_id, company_id, transaction_type, reference_type, reference_id,
    source_id, quantity, unit_price, total_value, notes, transaction_date, created_by
"#;

pub struct InventoryTransactionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl InventoryTransactionRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn insert(&self, transaction: &InventoryTransaction) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        insert_transaction(&conn, transaction)
    }

    /// Transaction log of a company, newest first
    ///
    /// # Arguments
    /// - `reference_type`: only rows touching this catalog when set
    /// - `limit`: maximum number of rows
    pub fn list_by_company(
        &self,
        company_id: &str,
        reference_type: Option<ReferenceType>,
        limit: usize,
    ) -> RepositoryResult<Vec<InventoryTransaction>> {
        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            SELECT {} FROM inventory_transactions
            WHERE company_id = ?1 AND (?2 IS NULL OR reference_type = ?2)
            ORDER BY transaction_date DESC, rowid DESC
            LIMIT ?3
            "#,
            TRANSACTION_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(
                params![company_id, reference_type.map(|r| r.as_db_str()), limit as i64],
                map_transaction_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Rows written by one run / assembly, in insertion order
    pub fn list_by_source(
        &self,
        company_id: &str,
        source_id: &str,
    ) -> RepositoryResult<Vec<InventoryTransaction>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM inventory_transactions WHERE company_id = ?1 AND source_id = ?2 ORDER BY rowid ASC",
            TRANSACTION_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![company_id, source_id], map_transaction_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

pub(crate) fn insert_transaction(
    conn: &Connection,
    t: &InventoryTransaction,
) -> RepositoryResult<()> {
    conn.execute(
        r#"
        INSERT INTO inventory_transactions (
            transaction_id, company_id, transaction_type, reference_type, reference_id,
            source_id, quantity, unit_price, total_value, notes, transaction_date, created_by
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
        "#,
        params![
            t.transaction_id,
            t.company_id,
            t.transaction_type.as_db_str(),
            t.reference_type.as_db_str(),
            t.reference_id,
            t.source_id,
            t.quantity,
            t.unit_price,
            t.total_value,
            t.notes,
            t.transaction_date,
            t.created_by,
        ],
    )?;
    Ok(())
}

fn map_transaction_row(row: &Row<'_>) -> rusqlite::Result<InventoryTransaction> {
    let type_str: String = row.get(2)?;
    let transaction_type = TransactionType::from_db_str(&type_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Text,
            format!("unknown transaction_type '{}'", type_str).into(),
        )
    })?;

    let ref_str: String = row.get(3)?;
    let reference_type = ReferenceType::from_db_str(&ref_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            Type::Text,
            format!("unknown reference_type '{}'", ref_str).into(),
        )
    })?;

    Ok(InventoryTransaction {
        transaction_id: row.get(0)?,
        company_id: row.get(1)?,
        transaction_type,
        reference_type,
        reference_id: row.get(4)?,
        source_id: row.get(5)?,
        quantity: row.get(6)?,
        unit_price: row.get(7)?,
        total_value: row.get(8)?,
        notes: row.get(9)?,
        transaction_date: row.get(10)?,
        created_by: row.get(11)?,
    })
}
