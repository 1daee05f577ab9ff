use serde::Deserialize;
use validator::Validate;

use crate::domain::customer::CustomerStatus;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerForm {
    #[validate(length(min = 2))]
    pub name: String,
    #[validate(length(min = 5))]
    pub phone: String,
    pub whatsapp_number: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub status: Option<CustomerStatus>,
    pub notes: Option<String>,
}
