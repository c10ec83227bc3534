// ==========================================
// Seal Inventory - process-level configuration
// ==========================================
// Environment:
// - SEAL_INVENTORY_DB_PATH  database file
// - DATABASE_URL            sqlite://<path> (used when DB_PATH is unset)
// - SEAL_INVENTORY_HOST     bind address (default 0.0.0.0)
// - PORT                    bind port (default 5000)
// ==========================================

use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "SEAL_INVENTORY_DB_PATH";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_HOST: &str = "SEAL_INVENTORY_HOST";
pub const ENV_PORT: &str = "PORT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

const DB_FILE_NAME: &str = "seal_inventory.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let db_path = non_empty(ENV_DB_PATH)
            .or_else(|| non_empty(ENV_DATABASE_URL).and_then(|url| sqlite_path_from_url(&url)))
            .unwrap_or_else(get_default_db_path);

        let host = non_empty(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match non_empty(ENV_PORT) {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid PORT, using {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            db_path,
            host,
            port,
        }
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

/// Path part of a `sqlite://` / `sqlite:` url
///
/// Non-sqlite urls are ignored.
pub fn sqlite_path_from_url(url: &str) -> Option<String> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default().trim();
    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

/// Default database path
///
/// `<data_dir>/seal-inventory/seal_inventory.db`, or `./seal_inventory.db`
/// when the platform has no data directory.
pub fn get_default_db_path() -> String {
    let mut path = PathBuf::from(format!("./{}", DB_FILE_NAME));

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("seal-inventory");
        match std::fs::create_dir_all(&dir) {
            Ok(()) => path = dir.join(DB_FILE_NAME),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "cannot create data dir, using ./");
            }
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_explicit_values() {
        let cfg = config_from(&[
            (ENV_DB_PATH, "/tmp/inv.db"),
            (ENV_HOST, "127.0.0.1"),
            (ENV_PORT, "8080"),
        ]);
        assert_eq!(cfg.db_path, "/tmp/inv.db");
        assert_eq!(cfg.bind_address(), ("127.0.0.1".to_string(), 8080));
    }

    #[test]
    fn test_database_url_fallback() {
        let cfg = config_from(&[(ENV_DATABASE_URL, "sqlite:///var/lib/inv.db")]);
        assert_eq!(cfg.db_path, "/var/lib/inv.db");

        // DB_PATH wins over DATABASE_URL
        let cfg = config_from(&[(ENV_DB_PATH, "a.db"), (ENV_DATABASE_URL, "sqlite://b.db")]);
        assert_eq!(cfg.db_path, "a.db");
    }

    #[test]
    fn test_defaults_and_bad_port() {
        let cfg = config_from(&[(ENV_DB_PATH, "x.db"), (ENV_PORT, "not-a-port")]);
        assert_eq!(cfg.host, DEFAULT_HOST);
        assert_eq!(cfg.port, DEFAULT_PORT);
    }

    #[test]
    fn test_sqlite_url_parsing() {
        assert_eq!(sqlite_path_from_url("sqlite://inv.db"), Some("inv.db".to_string()));
        assert_eq!(sqlite_path_from_url("sqlite:inv.db?mode=rwc"), Some("inv.db".to_string()));
        assert_eq!(sqlite_path_from_url("postgres://host/db"), None);
        assert_eq!(sqlite_path_from_url("sqlite://"), None);
    }

    #[test]
    fn test_default_path_file_name() {
        assert!(get_default_db_path().ends_with(DB_FILE_NAME));
    }
}
