//! Request-path error taxonomy
//!
//! Four kinds of failure can surface during an admin operation:
//! authorization (the principal may not perform it), validation (field
//! rules were violated), not-found (the target record could not be bound),
//! and persistence (the storage layer faulted). The controller funnels all
//! of them through [`failure_envelope`], the single error-to-envelope
//! mapping: each kind gets a distinct status code while the envelope shape
//! stays uniform.

use std::collections::BTreeMap;
use std::fmt;

use axum::http::StatusCode;
use axum::response::Response;

use crate::repository::{RepositoryError, RepositoryErrorKind};

use super::envelope::ApiResponse;

/// Failure raised while handling an admin operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The principal may not perform this operation
    Authorization(String),
    /// Field validation failed; messages are keyed by field name
    Validation {
        /// Per-field validation messages
        fields: BTreeMap<String, Vec<String>>,
    },
    /// The target record could not be bound
    NotFound {
        /// Record type, e.g. "Menu"
        entity: String,
        /// Identifier that failed to resolve
        id: String,
    },
    /// The storage layer faulted
    Persistence(String),
}

impl ApiError {
    /// Authorization failure with the standard message
    pub fn unauthorized() -> Self {
        Self::Authorization("This action is unauthorized.".to_string())
    }

    /// Validation failure from collected per-field messages
    pub fn validation(fields: BTreeMap<String, Vec<String>>) -> Self {
        Self::Validation { fields }
    }

    /// Validation failure for a single field
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), vec![message.into()]);
        Self::Validation { fields }
    }

    /// Not-found failure for a record lookup
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Short kind label used in structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authorization(_) => "authorization",
            Self::Validation { .. } => "validation",
            Self::NotFound { .. } => "not_found",
            Self::Persistence(_) => "persistence",
        }
    }

    /// HTTP status code reported in the failure envelope
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Authorization(_) => StatusCode::FORBIDDEN,
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authorization(message) => write!(f, "{message}"),
            Self::Validation { fields } => {
                write!(f, "The given data was invalid.")?;
                let details: Vec<String> = fields
                    .iter()
                    .flat_map(|(field, messages)| {
                        messages.iter().map(move |m| format!("{field} {m}"))
                    })
                    .collect();
                if !details.is_empty() {
                    write!(f, " {}", details.join("; "))?;
                }
                Ok(())
            }
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Persistence(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err.kind {
            RepositoryErrorKind::NotFound => Self::NotFound {
                entity: err.entity_type.unwrap_or_else(|| "Record".to_string()),
                id: err.entity_id.unwrap_or_default(),
            },
            _ => Self::Persistence(err.to_string()),
        }
    }
}

/// The single error-to-envelope mapping applied after the execution phase
///
/// Logs the failure (fire-and-forget, not part of the response) and builds
/// a failure envelope carrying the error's status code and message.
pub fn failure_envelope(error: ApiError) -> Response {
    tracing::error!(
        kind = error.kind(),
        status = error.status_code().as_u16(),
        "{error}"
    );
    ApiResponse::failed()
        .code(error.status_code())
        .message(error.to_string())
        .send()
}
