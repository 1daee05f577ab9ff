//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub secret: String,
    /// Origins allowed by CORS, comma separated. Empty permits any origin.
    #[serde(default)]
    pub allowed_origins: String,
}
