//! API routes module

use axum::Router;

pub mod health;
pub mod products;

/// Routes nested under `/api` by `create_router`
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().merge(products::router(state))
}

pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
