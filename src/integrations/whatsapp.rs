//! WATI WhatsApp client.
//!
//! Messages go out as session messages: `POST
//! {base_url}/api/v1/sendSessionMessage/{phone}` with the rendered text as a
//! query parameter and the API key as a bearer token. The phone is reduced
//! to digits only before it lands in the path.

use std::time::Duration;

use crate::domain::settings::WhatsappSettings;
use crate::integrations::IntegrationError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct WatiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WatiClient {
    pub fn new(settings: &WhatsappSettings) -> Result<Self, IntegrationError> {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() || settings.api_key.trim().is_empty() {
            return Err(IntegrationError::Config(
                "WhatsApp base URL and API key are required".into(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url,
            api_key: settings.api_key.clone(),
        })
    }

    /// Sends one text message to a phone number.
    pub async fn send_message(&self, phone: &str, message: &str) -> Result<(), IntegrationError> {
        let digits = digits_only(phone);
        if digits.is_empty() {
            return Err(IntegrationError::Config(format!(
                "phone number has no digits: {phone}"
            )));
        }
        let url = format!("{}/api/v1/sendSessionMessage/{digits}", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .query(&[("messageText", message)])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntegrationError::Status { status, body });
        }
        Ok(())
    }

    /// Cheap connectivity probe used by the settings screen.
    pub async fn test_connection(&self) -> Result<(), IntegrationError> {
        let url = format!("{}/api/v1/getMessageTemplates", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntegrationError::Status { status, body });
        }
        Ok(())
    }
}

pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_everything_but_digits() {
        assert_eq!(digits_only("+91 98765-43210"), "919876543210");
        assert_eq!(digits_only("(079) 2657 0000"), "07926570000");
        assert_eq!(digits_only("no digits"), "");
    }
}
