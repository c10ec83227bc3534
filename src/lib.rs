// ==========================================
// Seal Inventory - core library
// ==========================================
// Multi-company inventory and production costing for a seal manufacturer:
// raw materials -> parts (production runs) -> products (assembly).
// Stack: Rust + SQLite (rusqlite) + actix-web
// ==========================================

// ==========================================
// Modules
// ==========================================

// domain - entities and value types
pub mod domain;

// repository - SQLite access
pub mod repository;

// engine - costing rules, no I/O
pub mod engine;

// importer - CSV / Excel catalog files
pub mod importer;

// config - environment and per-company settings
pub mod config;

// database bootstrap (PRAGMAs, schema)
pub mod db;

// logging
pub mod logging;

// timing and SQL counters
pub mod perf;

// API - use cases
pub mod api;

// app - wiring and HTTP surface
pub mod app;

// ==========================================
// Re-exports
// ==========================================

pub use domain::{
    AssemblyRun, Company, InventoryTransaction, Part, Product, ProductionOutput, ProductionRun,
    RawMaterial, TenantContext,
};

pub use engine::{AllocationLine, AllocationResult, AssemblyCostCalculator, CostAllocator};

pub use api::{ApiError, ApiResult};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Seal Inventory";

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "seal-inventory";
