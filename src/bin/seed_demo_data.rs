// Seed the demo company and catalog.
// usage: seal-inventory-seed [db_path]

use anyhow::Context;

use seal_inventory::app::{seed_demo_data, AppState};
use seal_inventory::config::get_default_db_path;
use seal_inventory::logging;

fn main() -> anyhow::Result<()> {
    logging::init();

    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);

    let state = AppState::new(db_path.clone()).map_err(anyhow::Error::msg)?;
    let report = seed_demo_data(&state).context("seeding demo data failed")?;

    if report.seeded {
        eprintln!(
            "Seeded {} into {}: {} materials, {} parts, {} products",
            report.company_id, db_path, report.materials, report.parts, report.products
        );
    } else {
        eprintln!("{} already has catalog data in {}, nothing to do", report.company_id, db_path);
    }
    Ok(())
}
