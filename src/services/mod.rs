//! Business rules layered over the repository traits.
//!
//! Every service function takes the repository as a generic `R: Trait +
//! ?Sized` bound and the authenticated caller, enforces role and module
//! permissions, and maps repository failures into [`ServiceError`]. Routes
//! stay thin: extract, call the service, serialize the result.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use chrono::Utc;
use rand::RngExt;
use serde_json::json;
use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

pub mod auth;
pub mod booking;
pub mod coupon;
pub mod customer;
pub mod delivery;
pub mod expense;
pub mod franchise;
pub mod laundry;
pub mod notification;
pub mod payment;
pub mod payroll;
pub mod pricing;
pub mod product;
pub mod returns;
pub mod sale;
pub mod settings;
pub mod staff;
pub mod woocommerce;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// One error taxonomy for the whole API surface.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Upstream service error: {0}")]
    Integration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ValidationError(msg) => ServiceError::Validation(msg),
            RepositoryError::ConstraintViolation(msg) => ServiceError::Conflict(msg),
            RepositoryError::DatabaseError(msg)
            | RepositoryError::ConnectionError(msg)
            | RepositoryError::Unexpected(msg) => ServiceError::Internal(msg),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl actix_web::ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden => StatusCode::FORBIDDEN,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Integration(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("request failed: {self}");
        }
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

/// Renders an order-style document number: prefix, creation second and a
/// random three-digit tail to keep concurrent desks apart.
pub(crate) fn document_number(prefix: &str) -> String {
    let suffix = rand::rng().random_range(100..1000);
    format!("{prefix}{}-{suffix}", Utc::now().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_errors_map_to_service_errors() {
        assert!(matches!(
            ServiceError::from(RepositoryError::NotFound),
            ServiceError::NotFound
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::ValidationError("bad".into())),
            ServiceError::Validation(_)
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::ConstraintViolation("dup".into())),
            ServiceError::Conflict(_)
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::DatabaseError("boom".into())),
            ServiceError::Internal(_)
        ));
    }

    #[test]
    fn document_numbers_carry_prefix_and_random_tail() {
        let number = document_number("BO-");
        assert!(number.starts_with("BO-"));
        let tail = number.rsplit('-').next().unwrap();
        assert_eq!(tail.len(), 3);
        assert!(tail.chars().all(|c| c.is_ascii_digit()));
    }
}
