//! Repository implementation for per-franchise settings.

use diesel::prelude::*;

use crate::{
    domain::settings::{
        BankingDetails, CompanySettings, NewBankingDetails, UpdateCompanySettings,
        WhatsappSettings, WoocommerceSettings,
    },
    models::settings::{
        BankingDetails as DbBankingDetails, CompanySettings as DbCompanySettings,
        NewBankingDetails as DbNewBankingDetails, NewCompanySettings as DbNewCompanySettings,
        NewWhatsappSettings as DbNewWhatsappSettings,
        NewWoocommerceSettings as DbNewWoocommerceSettings,
        UpdateCompanySettings as DbUpdateCompanySettings, WhatsappSettings as DbWhatsappSettings,
        WoocommerceSettings as DbWoocommerceSettings,
    },
    repository::{
        DieselRepository, SettingsReader, SettingsWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl SettingsReader for DieselRepository {
    fn get_company_settings(
        &self,
        franchise_id: i32,
    ) -> RepositoryResult<Option<CompanySettings>> {
        use crate::schema::company_settings;

        let mut conn = self.conn()?;
        let settings = company_settings::table
            .filter(company_settings::franchise_id.eq(franchise_id))
            .first::<DbCompanySettings>(&mut conn)
            .optional()?;

        Ok(settings.map(Into::into))
    }

    fn list_banking_details(&self, franchise_id: i32) -> RepositoryResult<Vec<BankingDetails>> {
        use crate::schema::banking_details;

        let mut conn = self.conn()?;
        let details = banking_details::table
            .filter(banking_details::franchise_id.eq(franchise_id))
            .order((
                banking_details::is_default.desc(),
                banking_details::created_at.asc(),
            ))
            .load::<DbBankingDetails>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(details)
    }

    fn get_whatsapp_settings(
        &self,
        franchise_id: i32,
    ) -> RepositoryResult<Option<WhatsappSettings>> {
        use crate::schema::whatsapp_settings;

        let mut conn = self.conn()?;
        let settings = whatsapp_settings::table
            .filter(whatsapp_settings::franchise_id.eq(franchise_id))
            .first::<DbWhatsappSettings>(&mut conn)
            .optional()?;

        Ok(settings.map(Into::into))
    }

    fn get_woocommerce_settings(
        &self,
        franchise_id: i32,
    ) -> RepositoryResult<Option<WoocommerceSettings>> {
        use crate::schema::woocommerce_settings;

        let mut conn = self.conn()?;
        let settings = woocommerce_settings::table
            .filter(woocommerce_settings::franchise_id.eq(franchise_id))
            .first::<DbWoocommerceSettings>(&mut conn)
            .optional()?;

        Ok(settings.map(Into::into))
    }
}

impl SettingsWriter for DieselRepository {
    fn save_company_settings(
        &self,
        franchise_id: i32,
        updates: &UpdateCompanySettings,
    ) -> RepositoryResult<CompanySettings> {
        use crate::schema::company_settings;

        let mut conn = self.conn()?;

        let settings = conn
            .immediate_transaction::<DbCompanySettings, diesel::result::Error, _>(|conn| {
                let existing = company_settings::table
                    .filter(company_settings::franchise_id.eq(franchise_id))
                    .first::<DbCompanySettings>(conn)
                    .optional()?;

                let id = match existing {
                    Some(settings) => settings.id,
                    None => {
                        diesel::insert_into(company_settings::table)
                            .values(&DbNewCompanySettings {
                                franchise_id,
                                company_name: updates.company_name.as_deref().unwrap_or(""),
                            })
                            .execute(conn)?;
                        company_settings::table
                            .filter(company_settings::franchise_id.eq(franchise_id))
                            .first::<DbCompanySettings>(conn)?
                            .id
                    }
                };

                diesel::update(company_settings::table.find(id))
                    .set((
                        DbUpdateCompanySettings::from(updates),
                        company_settings::updated_at.eq(diesel::dsl::now),
                    ))
                    .get_result::<DbCompanySettings>(conn)
            })
            .map_err(RepositoryError::from)?;

        Ok(settings.into())
    }

    fn create_banking_details(
        &self,
        franchise_id: i32,
        details: &NewBankingDetails,
    ) -> RepositoryResult<BankingDetails> {
        use crate::schema::banking_details;

        let mut conn = self.conn()?;

        let created = conn
            .immediate_transaction::<DbBankingDetails, diesel::result::Error, _>(|conn| {
                if details.is_default {
                    diesel::update(
                        banking_details::table
                            .filter(banking_details::franchise_id.eq(franchise_id)),
                    )
                    .set(banking_details::is_default.eq(false))
                    .execute(conn)?;
                }

                diesel::insert_into(banking_details::table)
                    .values(&DbNewBankingDetails::from_domain(franchise_id, details))
                    .get_result::<DbBankingDetails>(conn)
            })
            .map_err(RepositoryError::from)?;

        Ok(created.into())
    }

    fn set_default_banking_details(
        &self,
        id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<BankingDetails> {
        use crate::schema::banking_details;

        let mut conn = self.conn()?;

        let details = conn
            .immediate_transaction::<DbBankingDetails, diesel::result::Error, _>(|conn| {
                diesel::update(
                    banking_details::table
                        .filter(banking_details::franchise_id.eq(franchise_id)),
                )
                .set(banking_details::is_default.eq(false))
                .execute(conn)?;

                diesel::update(
                    banking_details::table
                        .filter(banking_details::id.eq(id))
                        .filter(banking_details::franchise_id.eq(franchise_id)),
                )
                .set(banking_details::is_default.eq(true))
                .get_result::<DbBankingDetails>(conn)
            })
            .map_err(RepositoryError::from)?;

        Ok(details.into())
    }

    fn delete_banking_details(&self, id: i32, franchise_id: i32) -> RepositoryResult<()> {
        use crate::schema::banking_details;

        let mut conn = self.conn()?;
        let affected = diesel::delete(
            banking_details::table
                .filter(banking_details::id.eq(id))
                .filter(banking_details::franchise_id.eq(franchise_id)),
        )
        .execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn save_whatsapp_settings(
        &self,
        franchise_id: i32,
        api_key: &str,
        base_url: &str,
        enabled: bool,
    ) -> RepositoryResult<WhatsappSettings> {
        use crate::schema::whatsapp_settings;

        let mut conn = self.conn()?;
        let settings = diesel::insert_into(whatsapp_settings::table)
            .values(&DbNewWhatsappSettings {
                franchise_id,
                api_key,
                base_url,
                enabled,
            })
            .on_conflict(whatsapp_settings::franchise_id)
            .do_update()
            .set((
                whatsapp_settings::api_key.eq(api_key),
                whatsapp_settings::base_url.eq(base_url),
                whatsapp_settings::enabled.eq(enabled),
                whatsapp_settings::updated_at.eq(diesel::dsl::now),
            ))
            .get_result::<DbWhatsappSettings>(&mut conn)?;

        Ok(settings.into())
    }

    fn save_woocommerce_settings(
        &self,
        franchise_id: i32,
        store_url: &str,
        consumer_key: &str,
        consumer_secret: &str,
        enabled: bool,
    ) -> RepositoryResult<WoocommerceSettings> {
        use crate::schema::woocommerce_settings;

        let mut conn = self.conn()?;
        let settings = diesel::insert_into(woocommerce_settings::table)
            .values(&DbNewWoocommerceSettings {
                franchise_id,
                store_url,
                consumer_key,
                consumer_secret,
                enabled,
            })
            .on_conflict(woocommerce_settings::franchise_id)
            .do_update()
            .set((
                woocommerce_settings::store_url.eq(store_url),
                woocommerce_settings::consumer_key.eq(consumer_key),
                woocommerce_settings::consumer_secret.eq(consumer_secret),
                woocommerce_settings::enabled.eq(enabled),
                woocommerce_settings::updated_at.eq(diesel::dsl::now),
            ))
            .get_result::<DbWoocommerceSettings>(&mut conn)?;

        Ok(settings.into())
    }

    fn touch_woocommerce_sync(&self, franchise_id: i32) -> RepositoryResult<()> {
        use crate::schema::woocommerce_settings;

        let mut conn = self.conn()?;
        diesel::update(
            woocommerce_settings::table
                .filter(woocommerce_settings::franchise_id.eq(franchise_id)),
        )
        .set(woocommerce_settings::last_sync_at.eq(diesel::dsl::now))
        .execute(&mut conn)?;

        Ok(())
    }
}
