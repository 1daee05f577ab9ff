//! Diesel models for per-franchise settings.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::settings::{
    BankingDetails as DomainBankingDetails, CompanySettings as DomainCompanySettings,
    NewBankingDetails as DomainNewBankingDetails,
    UpdateCompanySettings as DomainUpdateCompanySettings,
    WhatsappSettings as DomainWhatsappSettings, WoocommerceSettings as DomainWoocommerceSettings,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::company_settings)]
pub struct CompanySettings {
    pub id: i32,
    pub franchise_id: i32,
    pub company_name: String,
    pub gst_number: Option<String>,
    pub gst_percentage: f64,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub invoice_prefix: String,
    pub terms: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::company_settings)]
pub struct NewCompanySettings<'a> {
    pub franchise_id: i32,
    pub company_name: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::company_settings)]
pub struct UpdateCompanySettings<'a> {
    pub company_name: Option<&'a str>,
    pub gst_number: Option<&'a str>,
    pub gst_percentage: Option<f64>,
    pub address: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub invoice_prefix: Option<&'a str>,
    pub terms: Option<&'a str>,
}

impl From<CompanySettings> for DomainCompanySettings {
    fn from(settings: CompanySettings) -> Self {
        Self {
            id: settings.id,
            franchise_id: settings.franchise_id,
            company_name: settings.company_name,
            gst_number: settings.gst_number,
            gst_percentage: settings.gst_percentage,
            address: settings.address,
            phone: settings.phone,
            email: settings.email,
            invoice_prefix: settings.invoice_prefix,
            terms: settings.terms,
            updated_at: settings.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateCompanySettings> for UpdateCompanySettings<'a> {
    fn from(update: &'a DomainUpdateCompanySettings) -> Self {
        Self {
            company_name: update.company_name.as_deref(),
            gst_number: update.gst_number.as_deref(),
            gst_percentage: update.gst_percentage,
            address: update.address.as_deref(),
            phone: update.phone.as_deref(),
            email: update.email.as_deref(),
            invoice_prefix: update.invoice_prefix.as_deref(),
            terms: update.terms.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::banking_details)]
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

#[derive(Insertable)]
#[diesel(table_name = crate::schema::banking_details)]
pub struct NewBankingDetails<'a> {
    pub franchise_id: i32,
    pub bank_name: &'a str,
    pub account_name: &'a str,
    pub account_number: &'a str,
    pub ifsc_code: &'a str,
    pub branch: Option<&'a str>,
    pub upi_id: Option<&'a str>,
    pub is_default: bool,
}

impl From<BankingDetails> for DomainBankingDetails {
    fn from(details: BankingDetails) -> Self {
        Self {
            id: details.id,
            franchise_id: details.franchise_id,
            bank_name: details.bank_name,
            account_name: details.account_name,
            account_number: details.account_number,
            ifsc_code: details.ifsc_code,
            branch: details.branch,
            upi_id: details.upi_id,
            is_default: details.is_default,
            created_at: details.created_at,
        }
    }
}

impl<'a> NewBankingDetails<'a> {
    pub fn from_domain(franchise_id: i32, details: &'a DomainNewBankingDetails) -> Self {
        Self {
            franchise_id,
            bank_name: details.bank_name.as_str(),
            account_name: details.account_name.as_str(),
            account_number: details.account_number.as_str(),
            ifsc_code: details.ifsc_code.as_str(),
            branch: details.branch.as_deref(),
            upi_id: details.upi_id.as_deref(),
            is_default: details.is_default,
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::whatsapp_settings)]
pub struct WhatsappSettings {
    pub id: i32,
    pub franchise_id: i32,
    pub api_key: String,
    pub base_url: String,
    pub enabled: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::whatsapp_settings)]
pub struct NewWhatsappSettings<'a> {
    pub franchise_id: i32,
    pub api_key: &'a str,
    pub base_url: &'a str,
    pub enabled: bool,
}

impl From<WhatsappSettings> for DomainWhatsappSettings {
    fn from(settings: WhatsappSettings) -> Self {
        Self {
            id: settings.id,
            franchise_id: settings.franchise_id,
            api_key: settings.api_key,
            base_url: settings.base_url,
            enabled: settings.enabled,
            updated_at: settings.updated_at,
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::woocommerce_settings)]
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

#[derive(Insertable)]
#[diesel(table_name = crate::schema::woocommerce_settings)]
pub struct NewWoocommerceSettings<'a> {
    pub franchise_id: i32,
    pub store_url: &'a str,
    pub consumer_key: &'a str,
    pub consumer_secret: &'a str,
    pub enabled: bool,
}

impl From<WoocommerceSettings> for DomainWoocommerceSettings {
    fn from(settings: WoocommerceSettings) -> Self {
        Self {
            id: settings.id,
            franchise_id: settings.franchise_id,
            store_url: settings.store_url,
            consumer_key: settings.consumer_key,
            consumer_secret: settings.consumer_secret,
            enabled: settings.enabled,
            last_sync_at: settings.last_sync_at,
            updated_at: settings.updated_at,
        }
    }
}
