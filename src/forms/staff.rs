use serde::Deserialize;
use validator::Validate;

use crate::domain::user::{PermissionOverrides, Role};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStaffForm {
    #[validate(length(min = 2))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub role: Role,
    pub permissions: Option<PermissionOverrides>,
    /// Only honored for super admins; franchise admins create staff in
    /// their own franchise.
    pub franchise_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateStaffForm {
    #[validate(length(min = 2))]
    pub name: Option<String>,
    pub role: Option<Role>,
    pub permissions: Option<PermissionOverrides>,
}
