// ==========================================
// Seal Inventory - application layer
// ==========================================
// Wiring (AppState), HTTP surface and demo data
// ==========================================

pub mod demo_seed;
pub mod http_routes;
pub mod server;
pub mod state;

pub use demo_seed::{seed_demo_data, SeedReport, DEMO_COMPANY_ID, DEMO_USER_ID};
pub use server::{create_app, run_server};
pub use state::AppState;
