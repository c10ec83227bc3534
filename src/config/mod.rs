// ==========================================
// Seal Inventory - configuration layer
// ==========================================
// AppConfig: process environment (db path, bind address)
// ConfigManager: per-company settings in config_kv
// ==========================================

pub mod app_config;
pub mod config_manager;

pub use app_config::{get_default_db_path, AppConfig};
pub use config_manager::{config_keys, ConfigManager, ConfigScope};
