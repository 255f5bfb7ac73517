mod auth;
mod catalog;
mod config;
mod db;
mod errors;
mod models;
mod profile;
mod recommendation;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::{FirebaseIdentity, IdentityProvider};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::recommendation::rules::{RuleSet, DEFAULT_RULES};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{DocumentStore, MemoryDocumentStore, PgDocumentStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pathway API v{}", env!("CARGO_PKG_VERSION"));

    // Document store: Postgres when configured, otherwise process memory
    let store: Arc<dyn DocumentStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            Arc::new(PgDocumentStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; profiles are kept in memory and lost on restart");
            Arc::new(MemoryDocumentStore::new())
        }
    };

    // Identity provider
    if config.firebase_web_api_key.is_none() {
        warn!("FIREBASE_WEB_API_KEY not set; signup and login will fail until it is configured");
    }
    let identity: Arc<dyn IdentityProvider> = Arc::new(FirebaseIdentity::new(
        config.identity_toolkit_url.clone(),
        config.firebase_web_api_key.clone(),
    )?);
    info!("Identity provider client initialized ({})", config.identity_toolkit_url);

    // Reference catalogs, read-only from here on
    let catalog = Arc::new(Catalog::load(&config.catalog_dir)?);

    if config.enable_test_login {
        warn!("ENABLE_TEST_LOGIN is set; GET /login-test bypasses authentication");
    }

    // Build app state
    let state = AppState {
        store,
        identity,
        catalog,
        rules: Arc::new(RuleSet::new(DEFAULT_RULES)),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
