use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Franchise {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewFranchise {
    pub name: String,
    pub code: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl NewFranchise {
    #[must_use]
    pub fn new(
        name: String,
        code: String,
        address: Option<String>,
        city: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            code: code.trim().to_uppercase(),
            address: address.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            city: city.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            phone: phone.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateFranchise {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}
