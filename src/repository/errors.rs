//! Failure taxonomy for the persistence layer.
//!
//! Services translate these into API errors, so the variants mirror what a
//! caller can act on: missing rows, rejected data, broken constraints and
//! everything else.

use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,

    #[error("database failure: {0}")]
    DatabaseError(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("database unavailable: {0}")]
    ConnectionError(String),

    #[error("{0}")]
    ConstraintViolation(String),

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

fn constraint_label(kind: &DatabaseErrorKind) -> Option<&'static str> {
    match kind {
        DatabaseErrorKind::UniqueViolation => Some("duplicate value"),
        DatabaseErrorKind::ForeignKeyViolation => Some("referenced record is missing"),
        DatabaseErrorKind::NotNullViolation => Some("required value is missing"),
        DatabaseErrorKind::CheckViolation => Some("value out of range"),
        _ => None,
    }
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(kind, info) => match constraint_label(&kind) {
                Some(label) => RepositoryError::ConstraintViolation(format!(
                    "{label}: {}",
                    info.message()
                )),
                None => RepositoryError::DatabaseError(info.message().to_string()),
            },
            DieselError::SerializationError(e) => RepositoryError::ValidationError(e.to_string()),
            DieselError::DeserializationError(e) => {
                RepositoryError::ValidationError(e.to_string())
            }
            DieselError::QueryBuilderError(e) => RepositoryError::ValidationError(e.to_string()),
            DieselError::RollbackTransaction
            | DieselError::AlreadyInTransaction
            | DieselError::NotInTransaction
            | DieselError::BrokenTransactionManager => {
                RepositoryError::DatabaseError(format!("transaction failure: {err}"))
            }
            other => RepositoryError::Unexpected(other.to_string()),
        }
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_its_own_variant() {
        assert!(matches!(
            RepositoryError::from(DieselError::NotFound),
            RepositoryError::NotFound
        ));
    }

    #[test]
    fn rollback_is_a_database_failure_not_unexpected() {
        assert!(matches!(
            RepositoryError::from(DieselError::RollbackTransaction),
            RepositoryError::DatabaseError(_)
        ));
    }
}
