// ==========================================
// Seal Inventory - repository layer
// ==========================================
// Data access only. All queries are parameterised and scoped by
// company_id. Repositories share one Arc<Mutex<Connection>>.
// ==========================================

pub mod assembly_repo;
pub mod company_repo;
pub mod error;
pub mod material_repo;
pub mod part_repo;
pub mod product_repo;
pub mod production_repo;
mod stock_ledger;
pub mod transaction_repo;

pub use assembly_repo::{AssemblyRunRecord, AssemblyRunRepository};
pub use company_repo::CompanyRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use material_repo::RawMaterialRepository;
pub use part_repo::PartRepository;
pub use product_repo::ProductRepository;
pub use production_repo::{ProductionRunRecord, ProductionRunRepository};
pub use transaction_repo::InventoryTransactionRepository;
