use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::customer::{
    Customer as DomainCustomer, NewCustomer as DomainNewCustomer,
    UpdateCustomer as DomainUpdateCustomer,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::customers)]
/// Diesel model for [`crate::domain::customer::Customer`].
pub struct Customer {
    pub id: i32,
    pub franchise_id: i32,
    pub customer_code: String,
    pub name: String,
    pub phone: String,
    pub whatsapp_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
/// Insertable form of [`Customer`].
pub struct NewCustomer<'a> {
    pub franchise_id: i32,
    pub customer_code: String,
    pub name: &'a str,
    pub phone: &'a str,
    pub whatsapp_number: Option<&'a str>,
    pub email: Option<&'a str>,
    pub address: Option<&'a str>,
    pub city: Option<&'a str>,
    pub status: String,
    pub notes: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
/// Data used when updating a [`Customer`] record.
pub struct UpdateCustomer<'a> {
    pub name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub whatsapp_number: Option<&'a str>,
    pub email: Option<&'a str>,
    pub address: Option<&'a str>,
    pub city: Option<&'a str>,
    pub status: Option<String>,
    pub notes: Option<&'a str>,
}

impl<'a> From<&'a DomainUpdateCustomer> for UpdateCustomer<'a> {
    fn from(updates: &'a DomainUpdateCustomer) -> Self {
        Self {
            name: updates.name.as_deref(),
            phone: updates.phone.as_deref(),
            whatsapp_number: updates.whatsapp_number.as_deref(),
            email: updates.email.as_deref(),
            address: updates.address.as_deref(),
            city: updates.city.as_deref(),
            status: updates.status.map(|status| status.to_string()),
            notes: updates.notes.as_deref(),
        }
    }
}

impl TryFrom<Customer> for DomainCustomer {
    type Error = TypeConstraintError;

    fn try_from(customer: Customer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: customer.id,
            franchise_id: customer.franchise_id,
            customer_code: customer.customer_code,
            name: customer.name,
            phone: customer.phone,
            whatsapp_number: customer.whatsapp_number,
            email: customer.email,
            address: customer.address,
            city: customer.city,
            status: customer.status.parse()?,
            notes: customer.notes,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        })
    }
}

impl<'a> NewCustomer<'a> {
    /// Pairs the normalized domain data with a freshly allocated code.
    pub fn from_domain(customer: &'a DomainNewCustomer, customer_code: String) -> Self {
        Self {
            franchise_id: customer.franchise_id,
            customer_code,
            name: customer.name.as_str(),
            phone: customer.phone.as_str(),
            whatsapp_number: customer.whatsapp_number.as_deref(),
            email: customer.email.as_deref(),
            address: customer.address.as_deref(),
            city: customer.city.as_deref(),
            status: customer.status.to_string(),
            notes: customer.notes.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::CustomerStatus;
    use chrono::Utc;

    #[test]
    fn customer_into_domain_parses_status() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let row = Customer {
            id: 1,
            franchise_id: 2,
            customer_code: "CUST-00001".to_string(),
            name: "Asha".to_string(),
            phone: "+919812345678".to_string(),
            whatsapp_number: Some("+919812345678".to_string()),
            email: None,
            address: None,
            city: Some("Pune".to_string()),
            status: "lead".to_string(),
            notes: None,
            created_at: now,
            updated_at: now,
        };
        let domain: DomainCustomer = row.try_into().unwrap();
        assert_eq!(domain.status, CustomerStatus::Lead);
        assert_eq!(domain.customer_code, "CUST-00001");
    }

    #[test]
    fn bad_status_is_rejected() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let row = Customer {
            id: 1,
            franchise_id: 2,
            customer_code: "CUST-00001".to_string(),
            name: "Asha".to_string(),
            phone: "+919812345678".to_string(),
            whatsapp_number: None,
            email: None,
            address: None,
            city: None,
            status: "vip".to_string(),
            notes: None,
            created_at: now,
            updated_at: now,
        };
        assert!(DomainCustomer::try_from(row).is_err());
    }
}
