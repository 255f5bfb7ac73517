pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::profile::handlers as profile;
use crate::recommendation::handlers as recommendation;
use crate::state::AppState;

/// Paths are unprefixed; the web client calls them at the root.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/signup", post(auth::handle_signup))
        .route("/login", post(auth::handle_login))
        // Profile
        .route("/profile", get(profile::handle_get_profile))
        .route("/update-profile", post(profile::handle_update_profile))
        // Timeline
        .route(
            "/career-timeline",
            post(recommendation::handle_career_timeline),
        );

    if state.config.enable_test_login {
        router = router.route("/login-test", get(auth::handle_login_test));
    }

    router.with_state(state)
}
