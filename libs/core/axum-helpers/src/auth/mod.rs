//! Admin bearer-token authentication.
//!
//! A single privileged credential guards the API. Routes wrapped in
//! [`admin_auth_middleware`] require `Authorization: Bearer <token>`.
//!
//! ```ignore
//! use axum_helpers::auth::{AdminAuthConfig, admin_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = AdminAuthConfig::from_env()?;
//!
//! let protected = Router::new()
//!     .route("/products", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, admin_auth_middleware));
//! ```

pub mod config;
pub mod middleware;

pub use config::AdminAuthConfig;
pub use middleware::admin_auth_middleware;
