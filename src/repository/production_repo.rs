// ==========================================
// Seal Inventory - production run repository
// ==========================================
// production_runs / production_outputs are append-only.
// A run is recorded as one SQLite transaction:
//   material stock issue + part stock receipts
//   + run row + output rows + transaction log rows
// ==========================================

use crate::domain::production::{ProductionOutput, ProductionRun, ProductionRunDetail};
use crate::domain::stock::{StockIssue, StockReceipt};
use crate::domain::transaction::InventoryTransaction;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::stock_ledger::{apply_issue, apply_receipt, StockTable};
use crate::repository::transaction_repo::insert_transaction;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const RUN_COLUMNS: &str = r#"
    run_id, company_id, input_material_id, input_quantity, input_cost,
    total_output_weight, cost_per_kg, corrects_run_id, notes,
    production_date, created_by
"#;

/// Everything written for one production event
#[derive(Debug, Clone)]
pub struct ProductionRunRecord {
    pub run: ProductionRun,
    pub outputs: Vec<ProductionOutput>,
    pub material_issue: StockIssue,
    pub part_receipts: Vec<StockReceipt>,
    pub transactions: Vec<InventoryTransaction>,
}

pub struct ProductionRunRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductionRunRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Record a production run atomically
    ///
    /// # Errors
    /// - `InsufficientStock`: the issue would drive material stock negative
    ///   and `allow_negative_stock` is off
    /// - `NotFound`: material or a part does not belong to the company
    ///
    /// Nothing is written when any step fails.
    pub fn record_run(
        &self,
        record: &ProductionRunRecord,
        allow_negative_stock: bool,
    ) -> RepositoryResult<()> {
        let company_id = record.run.company_id.as_str();

        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        apply_issue(
            &tx,
            StockTable::RawMaterials,
            company_id,
            &record.material_issue,
            allow_negative_stock,
        )?;
        for receipt in &record.part_receipts {
            apply_receipt(&tx, StockTable::Parts, company_id, receipt)?;
        }

        insert_run(&tx, &record.run)?;
        for output in &record.outputs {
            insert_output(&tx, output)?;
        }
        for t in &record.transactions {
            insert_transaction(&tx, t)?;
        }

        tx.commit()?;
        Ok(())
    }

    pub fn find_run(&self, company_id: &str, run_id: &str) -> RepositoryResult<Option<ProductionRun>> {
        let conn = self.get_conn()?;
        find_run_with(&conn, company_id, run_id)
    }

    /// Run with its outputs (line_no order)
    pub fn find_detail(
        &self,
        company_id: &str,
        run_id: &str,
    ) -> RepositoryResult<Option<ProductionRunDetail>> {
        let conn = self.get_conn()?;
        let run = match find_run_with(&conn, company_id, run_id)? {
            Some(run) => run,
            None => return Ok(None),
        };

        let mut stmt = conn.prepare(
            r#"
            SELECT
                output_id, run_id, line_no, part_id, part_name,
                quantity_produced, weight_per_unit, output_weight,
                allocated_cost, cost_per_unit
            FROM production_outputs
            WHERE run_id = ?1
            ORDER BY line_no ASC
            "#,
        )?;
        let outputs = stmt
            .query_map(params![run_id], |row| {
                Ok(ProductionOutput {
                    output_id: row.get(0)?,
                    run_id: row.get(1)?,
                    line_no: row.get(2)?,
                    part_id: row.get(3)?,
                    part_name: row.get(4)?,
                    quantity_produced: row.get(5)?,
                    weight_per_unit: row.get(6)?,
                    output_weight: row.get(7)?,
                    allocated_cost: row.get(8)?,
                    cost_per_unit: row.get(9)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some(ProductionRunDetail { run, outputs }))
    }

    /// Newest first
    pub fn list_by_company(&self, company_id: &str, limit: usize) -> RepositoryResult<Vec<ProductionRun>> {
        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            SELECT {} FROM production_runs
            WHERE company_id = ?1
            ORDER BY production_date DESC, rowid DESC
            LIMIT ?2
            "#,
            RUN_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let runs = stmt
            .query_map(params![company_id, limit as i64], map_run_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(runs)
    }

    pub fn count_by_company(&self, company_id: &str) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM production_runs WHERE company_id = ?1",
            params![company_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn find_run_with(
    conn: &Connection,
    company_id: &str,
    run_id: &str,
) -> RepositoryResult<Option<ProductionRun>> {
    let sql = format!(
        "SELECT {} FROM production_runs WHERE company_id = ?1 AND run_id = ?2",
        RUN_COLUMNS
    );
    let run = conn
        .query_row(&sql, params![company_id, run_id], map_run_row)
        .optional()?;
    Ok(run)
}

fn insert_run(conn: &Connection, run: &ProductionRun) -> RepositoryResult<()> {
    conn.execute(
        r#"
        INSERT INTO production_runs (
            run_id, company_id, input_material_id, input_quantity, input_cost,
            total_output_weight, cost_per_kg, corrects_run_id, notes,
            production_date, created_by
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        "#,
        params![
            run.run_id,
            run.company_id,
            run.input_material_id,
            run.input_quantity,
            run.input_cost,
            run.total_output_weight,
            run.cost_per_kg,
            run.corrects_run_id,
            run.notes,
            run.production_date,
            run.created_by,
        ],
    )?;
    Ok(())
}

fn insert_output(conn: &Connection, o: &ProductionOutput) -> RepositoryResult<()> {
    conn.execute(
        r#"
        INSERT INTO production_outputs (
            output_id, run_id, line_no, part_id, part_name,
            quantity_produced, weight_per_unit, output_weight,
            allocated_cost, cost_per_unit
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
        params![
            o.output_id,
            o.run_id,
            o.line_no,
            o.part_id,
            o.part_name,
            o.quantity_produced,
            o.weight_per_unit,
            o.output_weight,
            o.allocated_cost,
            o.cost_per_unit,
        ],
    )?;
    Ok(())
}

fn map_run_row(row: &Row<'_>) -> rusqlite::Result<ProductionRun> {
    Ok(ProductionRun {
        run_id: row.get(0)?,
        company_id: row.get(1)?,
        input_material_id: row.get(2)?,
        input_quantity: row.get(3)?,
        input_cost: row.get(4)?,
        total_output_weight: row.get(5)?,
        cost_per_kg: row.get(6)?,
        corrects_run_id: row.get(7)?,
        notes: row.get(8)?,
        production_date: row.get(9)?,
        created_by: row.get(10)?,
    })
}
