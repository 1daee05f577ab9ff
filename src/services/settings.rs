//! Company profile, banking details and integration credentials.

use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::settings::{
    BankingDetails, CompanySettings, NewBankingDetails, UpdateCompanySettings, WhatsappSettings,
    WoocommerceSettings,
};
use crate::domain::user::{Module, Role};
use crate::forms::settings::{WhatsappSettingsForm, WoocommerceSettingsForm};
use crate::repository::{SettingsReader, SettingsWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn get_company_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<Option<CompanySettings>>
where
    R: SettingsReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Settings)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.get_company_settings(franchise_id)?)
}

pub fn save_company_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    updates: UpdateCompanySettings,
    franchise_id: Option<i32>,
) -> ServiceResult<CompanySettings>
where
    R: SettingsWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Settings)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    if let Some(pct) = updates.gst_percentage {
        if !(0.0..=100.0).contains(&pct) {
            return Err(ServiceError::Validation(
                "GST percentage must be between 0 and 100".to_string(),
            ));
        }
    }
    Ok(repo.save_company_settings(franchise_id, &updates)?)
}

pub fn list_banking_details<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<Vec<BankingDetails>>
where
    R: SettingsReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Settings)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.list_banking_details(franchise_id)?)
}

pub fn create_banking_details<R>(
    repo: &R,
    user: &AuthenticatedUser,
    details: NewBankingDetails,
    franchise_id: Option<i32>,
) -> ServiceResult<BankingDetails>
where
    R: SettingsWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Settings)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    if details.bank_name.trim().is_empty()
        || details.account_name.trim().is_empty()
        || details.account_number.trim().is_empty()
        || details.ifsc_code.trim().is_empty()
    {
        return Err(ServiceError::Validation(
            "bank name, account name, account number and IFSC are required".to_string(),
        ));
    }
    Ok(repo.create_banking_details(franchise_id, &details)?)
}

pub fn set_default_banking_details<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<BankingDetails>
where
    R: SettingsWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Settings)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.set_default_banking_details(id, franchise_id)?)
}

pub fn delete_banking_details<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<()>
where
    R: SettingsWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Settings)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.delete_banking_details(id, franchise_id)?)
}

pub fn get_whatsapp_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<Option<WhatsappSettings>>
where
    R: SettingsReader + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Settings)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.get_whatsapp_settings(franchise_id)?)
}

pub fn save_whatsapp_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: WhatsappSettingsForm,
    franchise_id: Option<i32>,
) -> ServiceResult<WhatsappSettings>
where
    R: SettingsWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Settings)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.save_whatsapp_settings(
        franchise_id,
        form.api_key.trim(),
        form.base_url.trim().trim_end_matches('/'),
        form.enabled,
    )?)
}

pub fn get_woocommerce_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<Option<WoocommerceSettings>>
where
    R: SettingsReader + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Settings)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.get_woocommerce_settings(franchise_id)?)
}

pub fn save_woocommerce_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: WoocommerceSettingsForm,
    franchise_id: Option<i32>,
) -> ServiceResult<WoocommerceSettings>
where
    R: SettingsWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Settings)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.save_woocommerce_settings(
        franchise_id,
        form.store_url.trim().trim_end_matches('/'),
        form.consumer_key.trim(),
        form.consumer_secret.trim(),
        form.enabled,
    )?)
}
