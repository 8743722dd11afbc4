//! Admin request pipeline
//!
//! The pieces every resource request flows through, in order:
//!
//! - [`sanitize`]: authorization + field validation producing
//!   [`SanitizedInput`]
//! - [`resource_routes`]: the generic controller wiring one resource's six
//!   operations
//! - [`ApiResponse`]: the uniform success/failure envelope
//! - [`ApiError`] / [`failure_envelope`]: the error taxonomy and the single
//!   error-to-envelope mapping

mod envelope;
mod error;
mod query;
mod resource;
mod sanitize;

// Re-export all public types
pub use envelope::ApiResponse;
pub use error::{failure_envelope, ApiError};
pub use query::{DtQuery, SortOrder, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use resource::{resource_routes, ResourceState};
pub use sanitize::{sanitize, FieldKind, FieldRule, Operation, Patch, SanitizedInput};
