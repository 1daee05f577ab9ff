use serde::Serialize;

use crate::domain::franchise::Franchise;
use crate::domain::user::{Role, User, UserPermissions};

#[derive(Debug, Serialize)]
pub struct FranchiseSummary {
    pub id: i32,
    pub name: String,
    pub code: String,
}

/// The profile returned on login and `/me`.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub permissions: UserPermissions,
    pub franchise: Option<FranchiseSummary>,
}

impl UserProfile {
    pub fn new(user: &User, franchise: Option<&Franchise>) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            permissions: user.permissions,
            franchise: franchise.map(|f| FranchiseSummary {
                id: f.id,
                name: f.name.clone(),
                code: f.code.clone(),
            }),
        }
    }
}
