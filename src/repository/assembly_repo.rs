// ==========================================
// Seal Inventory - assembly run repository
// ==========================================
// assembly_runs / assembly_components are append-only.
// One SQLite transaction per assembly:
//   part stock issues + product stock receipt
//   + assembly row + component rows + transaction log rows
// ==========================================

use crate::domain::assembly::{AssemblyComponent, AssemblyRun, AssemblyRunDetail};
use crate::domain::stock::{StockIssue, StockReceipt};
use crate::domain::transaction::InventoryTransaction;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::stock_ledger::{apply_issue, apply_receipt, StockTable};
use crate::repository::transaction_repo::insert_transaction;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct AssemblyRunRecord {
    pub assembly: AssemblyRun,
    pub components: Vec<AssemblyComponent>,
    pub part_issues: Vec<StockIssue>,
    pub product_receipt: StockReceipt,
    pub transactions: Vec<InventoryTransaction>,
}

pub struct AssemblyRunRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AssemblyRunRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn record_assembly(
        &self,
        record: &AssemblyRunRecord,
        allow_negative_stock: bool,
    ) -> RepositoryResult<()> {
        let company_id = record.assembly.company_id.as_str();

        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        for issue in &record.part_issues {
            apply_issue(&tx, StockTable::Parts, company_id, issue, allow_negative_stock)?;
        }
        apply_receipt(&tx, StockTable::Products, company_id, &record.product_receipt)?;

        let a = &record.assembly;
        tx.execute(
            r#"
            INSERT INTO assembly_runs (
                assembly_id, company_id, product_id, quantity_assembled,
                total_cost, cost_per_unit, notes, assembly_date, created_by
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                a.assembly_id,
                a.company_id,
                a.product_id,
                a.quantity_assembled,
                a.total_cost,
                a.cost_per_unit,
                a.notes,
                a.assembly_date,
                a.created_by,
            ],
        )?;

        for c in &record.components {
            tx.execute(
                r#"
                INSERT INTO assembly_components (
                    component_id, assembly_id, line_no, part_id, part_name,
                    quantity_used, unit_cost, total_cost
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                params![
                    c.component_id,
                    c.assembly_id,
                    c.line_no,
                    c.part_id,
                    c.part_name,
                    c.quantity_used,
                    c.unit_cost,
                    c.total_cost,
                ],
            )?;
        }

        for t in &record.transactions {
            insert_transaction(&tx, t)?;
        }

        tx.commit()?;
        Ok(())
    }

    pub fn find_detail(
        &self,
        company_id: &str,
        assembly_id: &str,
    ) -> RepositoryResult<Option<AssemblyRunDetail>> {
        let conn = self.get_conn()?;
        let assembly = conn
            .query_row(
                r#"
                SELECT
                    assembly_id, company_id, product_id, quantity_assembled,
                    total_cost, cost_per_unit, notes, assembly_date, created_by
                FROM assembly_runs
                WHERE company_id = ?1 AND assembly_id = ?2
                "#,
                params![company_id, assembly_id],
                |row| {
                    Ok(AssemblyRun {
                        assembly_id: row.get(0)?,
                        company_id: row.get(1)?,
                        product_id: row.get(2)?,
                        quantity_assembled: row.get(3)?,
                        total_cost: row.get(4)?,
                        cost_per_unit: row.get(5)?,
                        notes: row.get(6)?,
                        assembly_date: row.get(7)?,
                        created_by: row.get(8)?,
                    })
                },
            )
            .optional()?;

        let assembly = match assembly {
            Some(a) => a,
            None => return Ok(None),
        };

        let mut stmt = conn.prepare(
            r#"
            SELECT
                component_id, assembly_id, line_no, part_id, part_name,
                quantity_used, unit_cost, total_cost
            FROM assembly_components
            WHERE assembly_id = ?1
            ORDER BY line_no ASC
            "#,
        )?;
        let components = stmt
            .query_map(params![assembly_id], |row| {
                Ok(AssemblyComponent {
                    component_id: row.get(0)?,
                    assembly_id: row.get(1)?,
                    line_no: row.get(2)?,
                    part_id: row.get(3)?,
                    part_name: row.get(4)?,
                    quantity_used: row.get(5)?,
                    unit_cost: row.get(6)?,
                    total_cost: row.get(7)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some(AssemblyRunDetail {
            assembly,
            components,
        }))
    }
}
