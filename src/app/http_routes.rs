// ==========================================
// Seal Inventory - HTTP routes (actix-web)
// ==========================================
// Tenant context comes from X-Company-Id / X-User-Id headers.
// Errors answer with {code, message, details}.
// ==========================================

use actix_web::web;

pub mod assembly;
pub mod catalog;
pub mod common;
pub mod dashboard;
pub mod health;
pub mod production;
pub mod transactions;

pub use common::{COMPANY_HEADER, USER_HEADER};

/// Register every route plus the JSON / query error handlers
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(common::json_config())
        .app_data(common::query_config())
        .configure(health::configure_routes)
        .configure(dashboard::configure_routes)
        .configure(catalog::configure_routes)
        .configure(production::configure_routes)
        .configure(assembly::configure_routes)
        .configure(transactions::configure_routes);
}
