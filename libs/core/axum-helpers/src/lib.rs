//! # Axum Helpers
//!
//! Shared HTTP plumbing for the products service.
//!
//! - **[`errors`]**: `AppError` and the standard JSON error body
//! - **[`extractors`]**: `IdPath` and `JsonBody`
//! - **[`auth`]**: admin bearer-token middleware
//! - **[`http`]**: CORS and security headers
//! - **[`server`]**: router assembly with OpenAPI docs, health checks, graceful shutdown
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//!
//! let config = ServerConfig::default();
//! let router = create_router::<ApiDoc>(api_routes, &config).merge(health_router(app_info!()));
//! create_production_app(router, &config, Duration::from_secs(30), async {}).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{AdminAuthConfig, admin_auth_middleware};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, JsonBody};
