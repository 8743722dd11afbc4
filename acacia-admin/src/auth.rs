//! Acting principal for admin requests
//!
//! Authentication itself is delegated to an outer middleware (bearer token,
//! session, or whatever the host application uses). That middleware is
//! expected to insert a [`Principal`] into the request extensions; requests
//! without one are treated as anonymous and fail the authorization checks
//! of every resource.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};

/// The authenticated caller of an admin operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable subject identifier (empty for anonymous callers)
    pub subject: String,

    /// Role names granted to this principal
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Principal {
    /// Create an authenticated principal with no roles
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            roles: Vec::new(),
        }
    }

    /// The principal used when no auth middleware populated the request
    pub fn anonymous() -> Self {
        Self {
            subject: String::new(),
            roles: Vec::new(),
        }
    }

    /// Attach a role
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    /// Whether the request carried a resolved identity
    pub fn is_authenticated(&self) -> bool {
        !self.subject.is_empty()
    }

    /// Whether the principal holds the given role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<Principal>()
            .cloned()
            .unwrap_or_else(Principal::anonymous))
    }
}
