// ==========================================
// Seal Inventory - company (tenant) repository
// ==========================================

use crate::domain::tenant::Company;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

pub struct CompanyRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CompanyRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn insert(&self, company: &Company) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO companies (company_id, name, created_at) VALUES (?1, ?2, ?3)",
            params![company.company_id, company.name, company.created_at],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, company_id: &str) -> RepositoryResult<Option<Company>> {
        let conn = self.get_conn()?;
        let company = conn
            .query_row(
                "SELECT company_id, name, created_at FROM companies WHERE company_id = ?1",
                params![company_id],
                |row| {
                    Ok(Company {
                        company_id: row.get(0)?,
                        name: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(company)
    }

    pub fn exists(&self, company_id: &str) -> RepositoryResult<bool> {
        Ok(self.find_by_id(company_id)?.is_some())
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<Company>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT company_id, name, created_at FROM companies ORDER BY name ASC")?;
        let companies = stmt
            .query_map([], |row| {
                Ok(Company {
                    company_id: row.get(0)?,
                    name: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(companies)
    }
}
