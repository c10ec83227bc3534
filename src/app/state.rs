// ==========================================
// Seal Inventory - application state
// ==========================================
// Wires one shared SQLite connection into every repository,
// and the repositories into the API facades.
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::api::{
    AssemblyApi, CatalogApi, CompanyApi, DashboardApi, ProductionApi, TransactionApi,
};
use crate::config::ConfigManager;
use crate::db::{init_schema, open_sqlite_connection};
use crate::importer::CatalogImporter;
use crate::repository::{
    AssemblyRunRepository, CompanyRepository, InventoryTransactionRepository, PartRepository,
    ProductRepository, ProductionRunRepository, RawMaterialRepository,
};

/// Shared state handed to HTTP handlers and binaries
pub struct AppState {
    pub db_path: String,

    pub company_api: Arc<CompanyApi>,
    pub catalog_api: Arc<CatalogApi>,
    pub production_api: Arc<ProductionApi>,
    pub assembly_api: Arc<AssemblyApi>,
    pub dashboard_api: Arc<DashboardApi>,
    pub transaction_api: Arc<TransactionApi>,

    pub config_manager: Arc<ConfigManager>,
    pub catalog_importer: Arc<CatalogImporter>,
}

impl AppState {
    /// Open (or create) the database and build all APIs
    ///
    /// # Arguments
    /// - db_path: database file, `:memory:` for a throwaway database
    ///
    /// # Returns
    /// - Err(String): the database could not be opened or initialised
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!(db_path = %db_path, "initialising AppState");

        let mut conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("cannot open database {}: {}", db_path, e))?;
        crate::perf::install_sqlite_tracing(&mut conn);
        init_schema(&conn).map_err(|e| format!("cannot initialise schema: {}", e))?;

        Ok(Self::from_connection(db_path, conn))
    }

    /// Build on an already configured connection with the schema applied
    pub fn from_connection(db_path: String, conn: Connection) -> Self {
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // repositories
        // ==========================================
        let company_repo = Arc::new(CompanyRepository::from_connection(conn.clone()));
        let material_repo = Arc::new(RawMaterialRepository::from_connection(conn.clone()));
        let part_repo = Arc::new(PartRepository::from_connection(conn.clone()));
        let product_repo = Arc::new(ProductRepository::from_connection(conn.clone()));
        let run_repo = Arc::new(ProductionRunRepository::from_connection(conn.clone()));
        let assembly_repo = Arc::new(AssemblyRunRepository::from_connection(conn.clone()));
        let transaction_repo = Arc::new(InventoryTransactionRepository::from_connection(conn.clone()));
        let config_manager = Arc::new(ConfigManager::from_connection(conn));

        // ==========================================
        // APIs
        // ==========================================
        let company_api = Arc::new(CompanyApi::new(company_repo));
        let catalog_api = Arc::new(CatalogApi::new(
            material_repo.clone(),
            part_repo.clone(),
            product_repo.clone(),
            config_manager.clone(),
        ));
        let production_api = Arc::new(ProductionApi::new(
            material_repo.clone(),
            part_repo.clone(),
            run_repo.clone(),
            config_manager.clone(),
        ));
        let assembly_api = Arc::new(AssemblyApi::new(
            part_repo.clone(),
            product_repo.clone(),
            assembly_repo,
            config_manager.clone(),
        ));
        let dashboard_api = Arc::new(DashboardApi::new(
            material_repo.clone(),
            part_repo.clone(),
            product_repo.clone(),
            run_repo,
            config_manager.clone(),
        ));
        let transaction_api = Arc::new(TransactionApi::new(transaction_repo));
        let catalog_importer = Arc::new(CatalogImporter::new(
            material_repo,
            part_repo,
            product_repo,
            config_manager.clone(),
        ));

        tracing::info!("AppState ready");

        Self {
            db_path,
            company_api,
            catalog_api,
            production_api,
            assembly_api,
            dashboard_api,
            transaction_api,
            config_manager,
            catalog_importer,
        }
    }
}
