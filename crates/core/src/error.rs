//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, conflicts). None of these are transient, so callers never retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. empty string).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced user or profile does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Uniqueness conflict (duplicate email, duplicate profile name) or a
    /// delete blocked by existing references.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A foreign key (e.g. `profileId` on a user) does not resolve.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// A domain invariant was violated (e.g. removing the last active administrator).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// Login rejected. Unknown and inactive accounts share this variant.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid_reference(msg: impl Into<String>) -> Self {
        Self::InvalidReference(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Stable machine-readable code, used by transport layers.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "validation_error",
            DomainError::InvalidId(_) => "invalid_id",
            DomainError::NotFound(_) => "not_found",
            DomainError::Conflict(_) => "conflict",
            DomainError::InvalidReference(_) => "invalid_reference",
            DomainError::InvariantViolation(_) => "invariant_violation",
            DomainError::Unauthorized(_) => "unauthorized",
        }
    }
}
