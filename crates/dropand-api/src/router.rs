//! Route definitions for the DropAnd HTTP surface.
//!
//! Directory endpoints live under `/api`; the login pages, the landing
//! redirect, and the static front end sit at the top level. The login gate
//! wraps everything.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the routed application with the login gate applied.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(directory_routes())
        .merge(health_routes());

    let mut router = Router::new()
        .nest("/api", api_routes)
        .merge(auth_routes(&state.config.auth.login_path));

    let static_files = &state.config.static_files;
    if static_files.enabled {
        router = router.nest_service(
            &static_files.mount_path,
            ServeDir::new(&static_files.root_dir),
        );
    }

    router
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_login,
        ))
        .with_state(state)
}

/// Directory tree endpoints
fn directory_routes() -> Router<AppState> {
    use handlers::directory;

    Router::new()
        .route(
            "/directories",
            get(directory::list_roots).post(directory::create_directory),
        )
        .route("/directories/tree", get(directory::list_roots))
        .route("/directories/order", put(directory::reorder))
        .route(
            "/directories/{id}",
            put(directory::rename_directory).delete(directory::delete_directory),
        )
        .route("/directories/{id}/children", get(directory::list_children))
        .route("/directories/{id}/tree", get(directory::subtree))
        .route(
            "/directories/{id}/move",
            post(directory::move_directory).put(directory::reorder_one),
        )
}

/// Health probe
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Login page, form submit, logout, landing redirect
fn auth_routes(login_path: &str) -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route(login_path, get(auth::login_page).post(auth::login))
        .route(middleware::auth::LOGOUT_PATH, post(auth::logout))
        .route("/", get(auth::root))
}
