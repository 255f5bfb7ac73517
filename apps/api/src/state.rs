use std::sync::Arc;

use crate::auth::IdentityProvider;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::recommendation::rules::RuleSet;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Profile persistence. Postgres when DATABASE_URL is set, in-memory otherwise.
    pub store: Arc<dyn DocumentStore>,
    pub identity: Arc<dyn IdentityProvider>,
    /// Read-only after startup.
    pub catalog: Arc<Catalog>,
    pub rules: Arc<RuleSet>,
    pub config: Config,
}
