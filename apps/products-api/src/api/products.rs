use axum::Router;
use axum_helpers::{AdminAuthConfig, admin_auth_middleware};
use domain_products::{PgProductRepository, ProductService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgProductRepository::new(state.db.clone());
    let service = ProductService::new(repository);
    protected(handlers::router(service), state.config.admin.clone())
}

/// Put `routes` behind the admin bearer token.
pub fn protected(routes: Router, auth: AdminAuthConfig) -> Router {
    routes.layer(axum::middleware::from_fn_with_state(
        auth,
        admin_auth_middleware,
    ))
}
