// ==========================================
// Seal Inventory - API layer
// ==========================================
// Use-case facades called by the HTTP routes and binaries.
// Validation happens here, rules live in engine/, SQL in repository/.
// ==========================================

pub mod assembly_api;
pub mod catalog_api;
pub mod company_api;
pub mod dashboard_api;
pub mod error;
pub mod production_api;
pub mod transaction_api;
pub mod validator;

pub use assembly_api::{AssemblyApi, AssemblyComponentRequest, RecordAssemblyRequest};
pub use catalog_api::{CatalogApi, CreateMaterialRequest, CreatePartRequest, CreateProductRequest};
pub use company_api::CompanyApi;
pub use dashboard_api::{DashboardApi, DashboardSummary};
pub use error::{ApiError, ApiResult};
pub use production_api::{AllocationPreviewRequest, ProductionApi, RecordRunRequest, RunOutputRequest};
pub use transaction_api::TransactionApi;
