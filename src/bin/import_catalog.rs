// Import a CSV / Excel catalog file for one company.
// usage: seal-inventory-import <company_id> <materials|parts|products> <file> [user_id] [db_path]

use std::path::Path;

use anyhow::{bail, Context};

use seal_inventory::app::AppState;
use seal_inventory::config::get_default_db_path;
use seal_inventory::importer::CatalogKind;
use seal_inventory::logging;

const USAGE: &str =
    "usage: seal-inventory-import <company_id> <materials|parts|products> <file> [user_id] [db_path]";

fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let (company_id, kind, file) = match (args.next(), args.next(), args.next()) {
        (Some(c), Some(k), Some(f)) => (c, k, f),
        _ => bail!(USAGE),
    };
    let user_id = args.next().unwrap_or_else(|| "importer".to_string());
    let db_path = args.next().unwrap_or_else(get_default_db_path);

    let kind: CatalogKind = kind.parse().context(USAGE)?;

    let state = AppState::new(db_path).map_err(anyhow::Error::msg)?;
    let ctx = state
        .company_api
        .resolve_tenant(&company_id, &user_id)
        .with_context(|| format!("unknown company {}", company_id))?;

    let report = state
        .catalog_importer
        .import_file(&ctx, kind, Path::new(&file))
        .with_context(|| format!("import of {} failed", file))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
