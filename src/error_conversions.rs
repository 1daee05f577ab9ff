//! Error conversion glue for `data` feature consumers.
//!
//! The domain layer must not depend on the repository error type, but the
//! persistence layer needs to surface domain rule violations as validation
//! failures.

use crate::domain::product::StockError;
use crate::domain::returns::ReturnValidationError;
use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<StockError> for RepositoryError {
    fn from(val: StockError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<ReturnValidationError> for RepositoryError {
    fn from(val: ReturnValidationError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}
