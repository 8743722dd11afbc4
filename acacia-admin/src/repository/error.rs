//! Repository error types
//!
//! Structured errors for repository operations, carrying the operation that
//! failed, the error category, and the entity involved when known.

use std::fmt;

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Listing the full collection
    Index,
    /// Building a paginated data-table listing
    Dt,
    /// Finding a single record by ID
    FindById,
    /// Fetching a bound record
    Show,
    /// Creating a new record
    Store,
    /// Updating a bound record
    Update,
    /// Removing a bound record
    Destroy,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index => write!(f, "index"),
            Self::Dt => write!(f, "dt"),
            Self::FindById => write!(f, "find_by_id"),
            Self::Show => write!(f, "show"),
            Self::Store => write!(f, "store"),
            Self::Update => write!(f, "update"),
            Self::Destroy => write!(f, "destroy"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// Record was not found
    NotFound,
    /// Storage constraint violation
    ConstraintViolation,
    /// Underlying store fault
    StorageFailed,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::ConstraintViolation => write!(f, "constraint_violation"),
            Self::StorageFailed => write!(f, "storage_failed"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The type of record involved (e.g. "Menu", "Schematic")
    pub entity_type: Option<String>,
    /// The ID of the record involved
    pub entity_id: Option<String>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Create a "not found" error with entity context
    pub fn not_found(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            operation: RepositoryOperation::FindById,
            kind: RepositoryErrorKind::NotFound,
            message: "Record not found".to_string(),
            entity_type: Some(entity_type.into()),
            entity_id: Some(entity_id.into()),
        }
    }

    /// Create a constraint violation error
    pub fn constraint_violation(
        operation: RepositoryOperation,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind: RepositoryErrorKind::ConstraintViolation,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Create a storage failure error
    pub fn storage_failed(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind: RepositoryErrorKind::StorageFailed,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Add entity context to an existing error
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: RepositoryOperation) -> Self {
        self.operation = operation;
        self
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(ref entity_type), Some(ref entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(format!("{}", RepositoryOperation::Index), "index");
        assert_eq!(format!("{}", RepositoryOperation::Dt), "dt");
        assert_eq!(format!("{}", RepositoryOperation::FindById), "find_by_id");
        assert_eq!(format!("{}", RepositoryOperation::Show), "show");
        assert_eq!(format!("{}", RepositoryOperation::Store), "store");
        assert_eq!(format!("{}", RepositoryOperation::Update), "update");
        assert_eq!(format!("{}", RepositoryOperation::Destroy), "destroy");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(format!("{}", RepositoryErrorKind::NotFound), "not_found");
        assert_eq!(
            format!("{}", RepositoryErrorKind::ConstraintViolation),
            "constraint_violation"
        );
        assert_eq!(
            format!("{}", RepositoryErrorKind::StorageFailed),
            "storage_failed"
        );
    }

    #[test]
    fn test_not_found_convenience() {
        let error = RepositoryError::not_found("Menu", "7");
        assert_eq!(error.operation, RepositoryOperation::FindById);
        assert_eq!(error.kind, RepositoryErrorKind::NotFound);
        assert_eq!(error.entity_type, Some("Menu".to_string()));
        assert_eq!(error.entity_id, Some("7".to_string()));
    }

    #[test]
    fn test_with_operation() {
        let error =
            RepositoryError::not_found("Menu", "7").with_operation(RepositoryOperation::Destroy);
        assert_eq!(error.operation, RepositoryOperation::Destroy);
    }

    #[test]
    fn test_with_entity() {
        let error = RepositoryError::storage_failed(RepositoryOperation::Dt, "projection failed")
            .with_entity("Schematic", "3");
        assert_eq!(error.entity_type, Some("Schematic".to_string()));
        assert_eq!(error.entity_id, Some("3".to_string()));
    }

    #[test]
    fn test_display_with_entity() {
        let error = RepositoryError::not_found("Menu", "7");
        let display = format!("{}", error);
        assert!(display.contains("not_found"));
        assert!(display.contains("find_by_id"));
        assert!(display.contains("[Menu: 7]"));
    }

    #[test]
    fn test_display_without_entity() {
        let error = RepositoryError::storage_failed(RepositoryOperation::Store, "disk full");
        let display = format!("{}", error);
        assert!(display.contains("storage_failed"));
        assert!(display.contains("store"));
        assert!(!display.contains("["));
    }

    #[test]
    fn test_error_equality_and_clone() {
        let err = RepositoryError::not_found("Menu", "7");
        assert_eq!(err, err.clone());
    }
}
