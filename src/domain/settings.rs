//! Per-franchise settings: company profile, banking, WATI and WooCommerce.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CompanySettings {
    pub id: i32,
    pub franchise_id: i32,
    pub company_name: String,
    pub gst_number: Option<String>,
    /// Percentage applied when computing booking totals.
    pub gst_percentage: f64,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub invoice_prefix: String,
    pub terms: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateCompanySettings {
    pub company_name: Option<String>,
    pub gst_number: Option<String>,
    pub gst_percentage: Option<f64>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub invoice_prefix: Option<String>,
    pub terms: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BankingDetails {
    pub id: i32,
    pub franchise_id: i32,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub branch: Option<String>,
    pub upi_id: Option<String>,
    pub is_default: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewBankingDetails {
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub branch: Option<String>,
    pub upi_id: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WhatsappSettings {
    pub id: i32,
    pub franchise_id: i32,
    pub api_key: String,
    pub base_url: String,
    pub enabled: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WoocommerceSettings {
    pub id: i32,
    pub franchise_id: i32,
    pub store_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
    pub enabled: bool,
    pub last_sync_at: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}
