// ==========================================
// Seal Inventory - product repository
// ==========================================
// products table, scoped by company_id
// ==========================================

use crate::domain::catalog::Product;
use crate::domain::transaction::InventoryTransaction;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::transaction_repo::insert_transaction;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const PRODUCT_COLUMNS: &str = r#"
    product_id, company_id, name, size, variant,
    current_stock, selling_price, avg_cost, created_at
"#;

pub struct ProductRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn insert(
        &self,
        product: &Product,
        opening: Option<&InventoryTransaction>,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        insert_product(&tx, product)?;
        if let Some(t) = opening {
            insert_transaction(&tx, t)?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn batch_insert(
        &self,
        products: &[Product],
        openings: &[InventoryTransaction],
    ) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        for product in products {
            insert_product(&tx, product)?;
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
        product_id: &str,
    ) -> RepositoryResult<Option<Product>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM products WHERE company_id = ?1 AND product_id = ?2",
            PRODUCT_COLUMNS
        );
        let product = conn
            .query_row(&sql, params![company_id, product_id], map_product_row)
            .optional()?;
        Ok(product)
    }

    /// Ordered by name, then size
    pub fn list_by_company(&self, company_id: &str) -> RepositoryResult<Vec<Product>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM products WHERE company_id = ?1 ORDER BY name ASC, size ASC, created_at ASC",
            PRODUCT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let products = stmt
            .query_map(params![company_id], map_product_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(products)
    }

    pub fn count_by_company(&self, company_id: &str) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM products WHERE company_id = ?1",
            params![company_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn insert_product(conn: &Connection, p: &Product) -> RepositoryResult<()> {
    conn.execute(
        r#"
        INSERT INTO products (
            product_id, company_id, name, size, variant,
            current_stock, selling_price, avg_cost, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
        params![
            p.product_id,
            p.company_id,
            p.name,
            p.size,
            p.variant,
            p.current_stock,
            p.selling_price,
            p.avg_cost,
            p.created_at,
        ],
    )?;
    Ok(())
}

fn map_product_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        product_id: row.get(0)?,
        company_id: row.get(1)?,
        name: row.get(2)?,
        size: row.get(3)?,
        variant: row.get(4)?,
        current_stock: row.get(5)?,
        selling_price: row.get(6)?,
        avg_cost: row.get(7)?,
        created_at: row.get(8)?,
    })
}
