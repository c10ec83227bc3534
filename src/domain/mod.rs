// ==========================================
// Seal Inventory - domain layer
// ==========================================
// Entities, value types and enumerations.
// No data access, no business rules.
// ==========================================

pub mod assembly;
pub mod catalog;
pub mod production;
pub mod stock;
pub mod tenant;
pub mod transaction;
pub mod types;

pub use assembly::{AssemblyComponent, AssemblyRun, AssemblyRunDetail};
pub use catalog::{Part, Product, RawMaterial};
pub use production::{ProductionOutput, ProductionRun, ProductionRunDetail};
pub use stock::{StockIssue, StockPosition, StockReceipt};
pub use tenant::{Company, TenantContext};
pub use transaction::InventoryTransaction;
pub use types::{ReferenceType, TransactionType};
