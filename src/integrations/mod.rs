//! Outbound REST clients for third-party services.

use thiserror::Error;

pub mod whatsapp;
pub mod woocommerce;

#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response ({status}): {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<IntegrationError> for crate::services::ServiceError {
    fn from(err: IntegrationError) -> Self {
        crate::services::ServiceError::Integration(err.to_string())
    }
}
