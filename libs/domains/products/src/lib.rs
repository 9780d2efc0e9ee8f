//! Products Domain
//!
//! CRUD over a single `Product` entity (name, description, two-decimal value).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (axum + utoipa)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← validate-then-persist, not-found handling
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐   ┌────────────┐
//! │ Repository  │ ← │ Validation │  raw JSON → NewProduct / ProductPatch
//! └──────┬──────┘   └────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, sea-orm entity
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers,
//!     repository::InMemoryProductRepository,
//!     service::ProductService,
//! };
//!
//! let repository = InMemoryProductRepository::new();
//! let service = ProductService::new(repository);
//!
//! // Routes: /products/ and /products/{id}/
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

pub use error::{ProductError, ProductResult};
pub use models::{NewProduct, Product, ProductInput, ProductPatch};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
