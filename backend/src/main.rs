mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod routes;
mod schema;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::services::{ServeDir, ServeFile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::auth::types::AuthConfig;
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::routes::app_routes;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub auth_config: AuthConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let auth_config = AuthConfig::from_env()?;

    tracing::info!("Starting calendar backend server");

    // Initialize database pool
    let pool = db::establish_connection_pool(&config.database_url)?;
    tracing::info!("Database connection pool initialized");

    let state = AppState { pool, auth_config };
    let app = app_routes(state);

    // Serve the static client shell if the directory exists
    let app = if std::path::Path::new(&config.frontend_dir).exists() {
        tracing::info!("Serving frontend from {}", config.frontend_dir);
        let index_path = format!("{}/index.html", config.frontend_dir);
        let serve_dir =
            ServeDir::new(&config.frontend_dir).not_found_service(ServeFile::new(&index_path));
        app.fallback_service(serve_dir)
    } else {
        tracing::info!(
            "Frontend directory not found at {}, serving API only",
            config.frontend_dir
        );
        app
    };

    // Run server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
