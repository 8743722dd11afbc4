//! # acacia-admin
//!
//! Admin panel resource API: a generic CRUD layer exposing menus,
//! relationships, and schematics over HTTP with a uniform JSON response
//! envelope.
//!
//! ## Features
//!
//! - **Response envelope**: every operation answers
//!   `{"status":"success",...}` or `{"status":"failed",...}` via a
//!   chainable builder
//! - **Request sanitizers**: per-operation authorization predicates plus
//!   declarative field rules (`required` / `sometimes` / `nullable`)
//! - **Repository seam**: one async trait over CRUD and paginated
//!   data-table listings, backed in-memory
//! - **Generic controller**: a single controller serves every resource
//!   type through a small per-resource descriptor
//!
//! ## Example
//!
//! ```rust,no_run
//! use acacia_admin::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Load configuration
//!     let config = Config::load()?;
//!
//!     // Initialize tracing
//!     init_tracing(&config)?;
//!
//!     // Build application state and router
//!     let state = AppState::new(config.clone());
//!     let app = panel_router(&state);
//!
//!     // Run server
//!     Server::new(config).serve(app).await
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod repository;
pub mod resources;
pub mod server;
pub mod state;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::auth::Principal;

    pub use crate::config::{Config, PanelConfig, ServiceConfig};

    pub use crate::error::{Error, Result};

    pub use crate::handlers::{
        failure_envelope, sanitize, ApiError, ApiResponse, DtQuery, FieldKind, FieldRule,
        Operation, Patch, SanitizedInput, SortOrder,
    };

    pub use crate::observability::init_tracing;

    pub use crate::repository::{
        MemoryRepository, OrderDirection, Page, PageMeta, Pagination, RepositoryError,
        RepositoryErrorKind, RepositoryOperation, RepositoryResult, ResourceRepository,
    };

    pub use crate::resources::{
        AdminResource, CreateMenu, CreateRelationship, CreateSchematic, Menu, Menus, Relationship,
        Relationships, Schematic, Schematics, UpdateMenu, UpdateRelationship, UpdateSchematic,
    };

    pub use crate::server::{panel_router, Server};

    pub use crate::state::AppState;
}
