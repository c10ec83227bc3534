// ==========================================
// Seal Inventory - HTTP server
// ==========================================

use actix_web::middleware::DefaultHeaders;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::app::http_routes;
use crate::app::state::AppState;
use crate::config::AppConfig;

/// Actix application with middleware and every route registered
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(TracingLogger::default())
        .wrap(DefaultHeaders::new().add(("Server", "seal-inventory")))
        .configure(http_routes::configure)
}

/// Open the database and serve until shutdown
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let (host, port) = config.bind_address();

    let db_path = config.db_path.clone();
    let state = tokio::task::spawn_blocking(move || AppState::new(db_path))
        .await
        .context("database initialisation task failed")?
        .map_err(anyhow::Error::msg)?;
    let state = web::Data::new(state);

    tracing::info!(host = %host, port, db_path = %config.db_path, "starting HTTP server");

    HttpServer::new(move || create_app(state.clone()))
        .bind((host.as_str(), port))
        .with_context(|| format!("cannot bind {}:{}", host, port))?
        .run()
        .await
        .context("HTTP server error")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
