use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct WhatsappSettingsForm {
    #[validate(length(min = 1))]
    pub api_key: String,
    #[validate(url)]
    pub base_url: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct WoocommerceSettingsForm {
    #[validate(url)]
    pub store_url: String,
    #[validate(length(min = 1))]
    pub consumer_key: String,
    #[validate(length(min = 1))]
    pub consumer_secret: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}
