// ==========================================
// Seal Inventory - raw material repository
// ==========================================
// raw_materials table. Every query is scoped by company_id.
// Stock changes caused by production runs are written by
// ProductionRunRepository inside the run's transaction.
// ==========================================

use crate::domain::catalog::RawMaterial;
use crate::domain::transaction::InventoryTransaction;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::transaction_repo::insert_transaction;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const MATERIAL_COLUMNS: &str = r#"
    material_id, company_id, name, grade, unit,
    opening_stock, current_stock, min_stock,
    avg_cost, last_purchase_rate, created_at
"#;

pub struct RawMaterialRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RawMaterialRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Insert one material, optionally with its opening-stock transaction
    pub fn insert(
        &self,
        material: &RawMaterial,
        opening: Option<&InventoryTransaction>,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        insert_material(&tx, material)?;
        if let Some(t) = opening {
            insert_transaction(&tx, t)?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Insert many materials and their opening transactions in one transaction
    ///
    /// # Returns
    /// Number of materials inserted
    pub fn batch_insert(
        &self,
        materials: &[RawMaterial],
        openings: &[InventoryTransaction],
    ) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        for material in materials {
            insert_material(&tx, material)?;
            count += 1;
        }
        for t in openings {
            insert_transaction(&tx, t)?;
        }

        tx.commit()?;
        Ok(count)
    }

    pub fn find_by_id(
        &self,
        company_id: &str,
        material_id: &str,
    ) -> RepositoryResult<Option<RawMaterial>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM raw_materials WHERE company_id = ?1 AND material_id = ?2",
            MATERIAL_COLUMNS
        );
        let material = conn
            .query_row(&sql, params![company_id, material_id], map_material_row)
            .optional()?;
        Ok(material)
    }

    /// All materials of a company, ordered by name
    pub fn list_by_company(&self, company_id: &str) -> RepositoryResult<Vec<RawMaterial>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM raw_materials WHERE company_id = ?1 ORDER BY name ASC, created_at ASC",
            MATERIAL_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let materials = stmt
            .query_map(params![company_id], map_material_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(materials)
    }

    pub fn count_by_company(&self, company_id: &str) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM raw_materials WHERE company_id = ?1",
            params![company_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn insert_material(conn: &Connection, m: &RawMaterial) -> RepositoryResult<()> {
    conn.execute(
        r#"
        INSERT INTO raw_materials (
            material_id, company_id, name, grade, unit,
            opening_stock, current_stock, min_stock,
            avg_cost, last_purchase_rate, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        "#,
        params![
            m.material_id,
            m.company_id,
            m.name,
            m.grade,
            m.unit,
            m.opening_stock,
            m.current_stock,
            m.min_stock,
            m.avg_cost,
            m.last_purchase_rate,
            m.created_at,
        ],
    )?;
    Ok(())
}

fn map_material_row(row: &Row<'_>) -> rusqlite::Result<RawMaterial> {
    Ok(RawMaterial {
        material_id: row.get(0)?,
        company_id: row.get(1)?,
        name: row.get(2)?,
        grade: row.get(3)?,
        unit: row.get(4)?,
        opening_stock: row.get(5)?,
        current_stock: row.get(6)?,
        min_stock: row.get(7)?,
        avg_cost: row.get(8)?,
        last_purchase_rate: row.get(9)?,
        created_at: row.get(10)?,
    })
}
