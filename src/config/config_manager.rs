// ==========================================
// Seal Inventory - tenant settings
// ==========================================
// Storage: config_kv table (scope_id + key -> value)
// Lookup order: company scope -> 'global' -> built-in default
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigScope
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigScope {
    Global,
    Company { company_id: String },
}

impl ConfigScope {
    pub fn company(company_id: impl Into<String>) -> Self {
        ConfigScope::Company {
            company_id: company_id.into(),
        }
    }

    fn scope_id(&self) -> &str {
        match self {
            ConfigScope::Global => GLOBAL_SCOPE,
            ConfigScope::Company { company_id } => company_id,
        }
    }
}

pub mod config_keys {
    // catalog defaults
    pub const DEFAULT_MATERIAL_UNIT: &str = "inventory.default_material_unit";
    pub const LOW_STOCK_THRESHOLD: &str = "inventory.low_stock_threshold";

    // production
    pub const ALLOW_NEGATIVE_STOCK: &str = "production.allow_negative_stock";
}

pub mod config_defaults {
    pub const DEFAULT_MATERIAL_UNIT: &str = "kg";
    pub const LOW_STOCK_THRESHOLD: f64 = 0.0;
    pub const ALLOW_NEGATIVE_STOCK: bool = false;
}

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Raw value stored exactly at `scope` (no fallback)
    pub fn get_value(&self, scope: &ConfigScope, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![scope.scope_id(), key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Company value, else the global value
    pub fn resolve_value(&self, company_id: &str, key: &str) -> RepositoryResult<Option<String>> {
        if let Some(v) = self.get_value(&ConfigScope::company(company_id), key)? {
            return Ok(Some(v));
        }
        self.get_value(&ConfigScope::Global, key)
    }

    pub fn set_value(&self, scope: &ConfigScope, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES (?1, ?2, ?3, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![scope.scope_id(), key, value],
        )?;
        tracing::info!(scope = scope.scope_id(), key, value, "config updated");
        Ok(())
    }

    /// All keys visible to a company, company values overriding global ones
    pub fn snapshot(&self, company_id: &str) -> RepositoryResult<BTreeMap<String, String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT key, value FROM config_kv
            WHERE scope_id IN ('global', ?1)
            ORDER BY CASE WHEN scope_id = 'global' THEN 0 ELSE 1 END
            "#,
        )?;
        let rows = stmt.query_map(params![company_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut map = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            map.insert(key, value);
        }
        Ok(map)
    }

    // ===== typed settings =====

    pub fn default_material_unit(&self, company_id: &str) -> RepositoryResult<String> {
        Ok(self
            .resolve_value(company_id, config_keys::DEFAULT_MATERIAL_UNIT)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| config_defaults::DEFAULT_MATERIAL_UNIT.to_string()))
    }

    /// Fallback low-stock threshold for materials without min_stock
    pub fn low_stock_threshold(&self, company_id: &str) -> RepositoryResult<f64> {
        let raw = self.resolve_value(company_id, config_keys::LOW_STOCK_THRESHOLD)?;
        Ok(parse_f64(raw.as_deref(), config_keys::LOW_STOCK_THRESHOLD)
            .unwrap_or(config_defaults::LOW_STOCK_THRESHOLD))
    }

    pub fn allow_negative_stock(&self, company_id: &str) -> RepositoryResult<bool> {
        let raw = self.resolve_value(company_id, config_keys::ALLOW_NEGATIVE_STOCK)?;
        Ok(raw
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or(config_defaults::ALLOW_NEGATIVE_STOCK))
    }
}

fn parse_f64(raw: Option<&str>, key: &str) -> Option<f64> {
    let raw = raw?;
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            tracing::warn!(key, value = raw, "config value is not a number, using default");
            None
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
