//! Form definitions backing the dashboard routes.

use thiserror::Error;
use validator::ValidationErrors;

use crate::services::ServiceError;

pub mod accounts;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid customer id")]
    InvalidCustomerId,

    #[error("invalid parent customer id")]
    InvalidParentCustomerId,

    #[error("invalid account name")]
    InvalidName,
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}
