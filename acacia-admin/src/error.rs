//! Error types for configuration and server startup
//!
//! Request-path errors live in [`crate::handlers::ApiError`] and
//! [`crate::repository::RepositoryError`]; this module only covers the
//! setup paths (loading configuration, binding the listener).

use thiserror::Error;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for setup-phase failures
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Boxed to keep the enum small; figment::Error is large.
impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}
