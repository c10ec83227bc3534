// ==========================================
// Seal Inventory - part repository
// ==========================================
// parts table, scoped by company_id
// ==========================================

use crate::domain::catalog::Part;
use crate::domain::transaction::InventoryTransaction;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::transaction_repo::insert_transaction;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const PART_COLUMNS: &str = r#"
    part_id, company_id, name, material_type, specific_type,
    weight_per_unit, current_stock, avg_cost, created_at
"#;

pub struct PartRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PartRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn insert(&self, part: &Part, opening: Option<&InventoryTransaction>) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        insert_part(&tx, part)?;
        if let Some(t) = opening {
            insert_transaction(&tx, t)?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn batch_insert(
        &self,
        parts: &[Part],
        openings: &[InventoryTransaction],
    ) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        for part in parts {
            insert_part(&tx, part)?;
            count += 1;
        }
        for t in openings {
            insert_transaction(&tx, t)?;
        }

        tx.commit()?;
        Ok(count)
    }

    pub fn find_by_id(&self, company_id: &str, part_id: &str) -> RepositoryResult<Option<Part>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM parts WHERE company_id = ?1 AND part_id = ?2",
            PART_COLUMNS
        );
        let part = conn
            .query_row(&sql, params![company_id, part_id], map_part_row)
            .optional()?;
        Ok(part)
    }

    /// Look up several parts at once
    ///
    /// Ids that do not exist (or belong to another company) are absent
    /// from the result; the caller decides whether that is an error.
    pub fn find_by_ids(&self, company_id: &str, part_ids: &[String]) -> RepositoryResult<Vec<Part>> {
        if part_ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.get_conn()?;
        let placeholders = (0..part_ids.len())
            .map(|i| format!("?{}", i + 2))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {} FROM parts WHERE company_id = ?1 AND part_id IN ({})",
            PART_COLUMNS, placeholders
        );

        let mut values: Vec<&str> = Vec::with_capacity(part_ids.len() + 1);
        values.push(company_id);
        values.extend(part_ids.iter().map(|s| s.as_str()));

        let mut stmt = conn.prepare(&sql)?;
        let parts = stmt
            .query_map(params_from_iter(values), map_part_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(parts)
    }

    pub fn list_by_company(&self, company_id: &str) -> RepositoryResult<Vec<Part>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM parts WHERE company_id = ?1 ORDER BY name ASC, created_at ASC",
            PART_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let parts = stmt
            .query_map(params![company_id], map_part_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(parts)
    }

    pub fn count_by_company(&self, company_id: &str) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM parts WHERE company_id = ?1",
            params![company_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn insert_part(conn: &Connection, p: &Part) -> RepositoryResult<()> {
    conn.execute(
        r#"
        INSERT INTO parts (
            part_id, company_id, name, material_type, specific_type,
            weight_per_unit, current_stock, avg_cost, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
        params![
            p.part_id,
            p.company_id,
            p.name,
            p.material_type,
            p.specific_type,
            p.weight_per_unit,
            p.current_stock,
            p.avg_cost,
            p.created_at,
        ],
    )?;
    Ok(())
}

fn map_part_row(row: &Row<'_>) -> rusqlite::Result<Part> {
    Ok(Part {
        part_id: row.get(0)?,
        company_id: row.get(1)?,
        name: row.get(2)?,
        material_type: row.get(3)?,
        specific_type: row.get(4)?,
        weight_per_unit: row.get(5)?,
        current_stock: row.get(6)?,
        avg_cost: row.get(7)?,
        created_at: row.get(8)?,
    })
}
