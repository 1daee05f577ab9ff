use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{TypeConstraintError, normalize_email, normalize_phone_to_e164};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    Active,
    Inactive,
    Lead,
    Prospect,
}

impl Display for CustomerStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CustomerStatus::Active => "active",
            CustomerStatus::Inactive => "inactive",
            CustomerStatus::Lead => "lead",
            CustomerStatus::Prospect => "prospect",
        };
        write!(f, "{s}")
    }
}

impl FromStr for CustomerStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CustomerStatus::Active),
            "inactive" => Ok(CustomerStatus::Inactive),
            "lead" => Ok(CustomerStatus::Lead),
            "prospect" => Ok(CustomerStatus::Prospect),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown customer status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
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
    pub status: CustomerStatus,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCustomer {
    pub franchise_id: i32,
    pub name: String,
    pub phone: String,
    pub whatsapp_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub status: CustomerStatus,
    pub notes: Option<String>,
}

impl NewCustomer {
    /// Normalizes contact details. Phone numbers fall back to the raw input
    /// when they cannot be parsed so imports of legacy records still land.
    #[must_use]
    pub fn new(
        franchise_id: i32,
        name: String,
        phone: String,
        whatsapp_number: Option<String>,
        email: Option<String>,
        address: Option<String>,
        city: Option<String>,
        status: CustomerStatus,
        notes: Option<String>,
    ) -> Self {
        let phone = normalize_phone_to_e164(&phone).unwrap_or_else(|_| phone.trim().to_string());
        let whatsapp_number = whatsapp_number
            .map(|s| normalize_phone_to_e164(&s).unwrap_or_else(|_| s.trim().to_string()))
            .filter(|s| !s.is_empty())
            .or_else(|| Some(phone.clone()));
        Self {
            franchise_id,
            name: name.trim().to_string(),
            phone,
            whatsapp_number,
            email: email.and_then(|e| normalize_email(e).ok()),
            address: address.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            city: city.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            status,
            notes: notes.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateCustomer {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub whatsapp_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub status: Option<CustomerStatus>,
    pub notes: Option<String>,
}

/// Renders a per-franchise customer code from a running sequence.
pub fn customer_code(sequence: i64) -> String {
    format!("CUST-{sequence:05}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_customer_defaults_whatsapp_to_phone() {
        let customer = NewCustomer::new(
            1,
            "Asha".into(),
            "9725295692".into(),
            None,
            None,
            None,
            None,
            CustomerStatus::Active,
            None,
        );
        assert_eq!(customer.phone, "+919725295692");
        assert_eq!(customer.whatsapp_number.as_deref(), Some("+919725295692"));
    }

    #[test]
    fn unparseable_phone_is_kept_verbatim() {
        let customer = NewCustomer::new(
            1,
            "Walk-in".into(),
            "ext-451".into(),
            None,
            None,
            None,
            None,
            CustomerStatus::Lead,
            None,
        );
        assert_eq!(customer.phone, "ext-451");
    }

    #[test]
    fn customer_code_pads_to_five() {
        assert_eq!(customer_code(7), "CUST-00007");
        assert_eq!(customer_code(12045), "CUST-12045");
    }
}
