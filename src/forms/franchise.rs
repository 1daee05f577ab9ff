use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFranchiseForm {
    #[validate(length(min = 2))]
    pub name: String,
    /// Short unique code used as the tenant handle, stored uppercase.
    #[validate(length(min = 2, max = 10))]
    pub code: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}
