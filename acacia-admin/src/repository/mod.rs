//! Repository abstractions for admin resources
//!
//! This module provides the repository seam between the resource controller
//! and persisted storage:
//!
//! - [`ResourceRepository`]: the uniform operation set (index, dt,
//!   find_by_id, show, store, update, destroy)
//! - [`MemoryRepository`]: the bundled process-local backend
//! - [`Pagination`] / [`Page`]: listing parameters and results
//! - [`RepositoryError`]: structured failures with operation context

mod error;
mod memory;
mod pagination;
mod traits;

// Re-export all public types
pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use memory::MemoryRepository;
pub use pagination::{OrderDirection, Page, PageMeta, Pagination};
pub use traits::{RepositoryResult, ResourceRepository};
