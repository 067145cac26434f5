//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// empty orders, invariants). Rendering and file IO failures belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty description, non-positive cost).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The operation needs at least one line item.
    #[error("purchase order has no items")]
    EmptyOrder,

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn empty_order() -> Self {
        Self::EmptyOrder
    }

    /// Whether the failure is a user-facing warning rather than a defect.
    ///
    /// Validation and empty-order failures leave state unchanged and are shown
    /// to the user; everything else indicates a bug.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::EmptyOrder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_and_empty_order_are_user_facing() {
        assert!(DomainError::validation("description is required").is_user_facing());
        assert!(DomainError::empty_order().is_user_facing());
        assert!(!DomainError::invariant("sequence overflow").is_user_facing());
    }

    #[test]
    fn messages_are_readable() {
        assert_eq!(
            DomainError::validation("cost must be positive").to_string(),
            "validation failed: cost must be positive"
        );
        assert_eq!(DomainError::EmptyOrder.to_string(), "purchase order has no items");
    }
}
