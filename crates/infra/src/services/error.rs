use rosterdesk_auth::AuthzError;
use rosterdesk_core::DomainError;
use thiserror::Error;

/// Failure of a gated user mutation: a domain rule or a row gate said no.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Denied(#[from] AuthzError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
