// ==========================================
// Seal Inventory - HTTP service entry point
// ==========================================

use clap::Parser;

use seal_inventory::app::run_server;
use seal_inventory::config::AppConfig;
use seal_inventory::logging;

/// Seal manufacturing inventory and production costing service
#[derive(Parser)]
#[command(name = "seal-inventory", version)]
struct Cli {
    /// SQLite database file (overrides SEAL_INVENTORY_DB_PATH / DATABASE_URL)
    #[arg(long)]
    db_path: Option<String>,

    /// Bind address
    #[arg(long, env = "SEAL_INVENTORY_HOST")]
    host: Option<String>,

    /// Bind port
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

impl Cli {
    fn into_config(self, mut config: AppConfig) -> AppConfig {
        if let Some(db_path) = self.db_path {
            config.db_path = db_path;
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = Cli::parse().into_config(AppConfig::from_env());

    tracing::info!("==================================================");
    tracing::info!("{} v{}", seal_inventory::APP_NAME, seal_inventory::VERSION);
    tracing::info!("database: {}", config.db_path);
    tracing::info!("==================================================");

    run_server(config).await
}
