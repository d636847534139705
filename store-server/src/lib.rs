//! storefront API server
//!
//! REST CRUD API for a small e-commerce domain: products, orders, and user
//! accounts with JWT-based authentication, backed by an embedded document
//! store.
//!
//! # Module structure
//!
//! ```text
//! store-server/src/
//! ├── core/     # configuration, state, server lifecycle
//! ├── auth/     # JWT issue/verify, middleware, extractor
//! ├── api/      # HTTP routes and handlers
//! ├── db/       # embedded SurrealDB: models and repositories
//! ├── pricing/  # order pricing against the live catalog
//! ├── catalog/  # product deletion guard (referential check)
//! ├── audit/    # field-level change diff for partial updates
//! ├── orders/   # order number generation
//! └── utils/    # errors, logging, validation glue
//! ```

pub mod api;
pub mod audit;
pub mod auth;
pub mod catalog;
pub mod core;
pub mod db;
pub mod orders;
pub mod pricing;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
