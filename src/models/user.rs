use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::TypeConstraintError;
use crate::domain::user::{
    NewUser as DomainNewUser, PermissionOverrides, UpdateUser as DomainUpdateUser,
    User as DomainUser, UserPermissions,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub franchise_id: Option<i32>,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub permissions: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub franchise_id: Option<i32>,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: String,
    pub permissions: Option<String>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
/// Data used when updating a [`User`] record.
pub struct UpdateUser<'a> {
    pub name: Option<&'a str>,
    pub role: Option<String>,
    pub permissions: Option<String>,
    pub is_active: Option<bool>,
    pub password_hash: Option<&'a str>,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        let role = user.role.parse()?;
        let overrides: PermissionOverrides = user
            .permissions
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default();
        Ok(Self {
            id: user.id,
            franchise_id: user.franchise_id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role,
            permissions: UserPermissions::for_role(role).with_overrides(&overrides),
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }
}

impl<'a> From<&'a DomainUpdateUser> for UpdateUser<'a> {
    fn from(updates: &'a DomainUpdateUser) -> Self {
        Self {
            name: updates.name.as_deref(),
            role: updates.role.map(|role| role.to_string()),
            permissions: updates
                .permissions
                .as_ref()
                .and_then(|p| serde_json::to_string(p).ok()),
            is_active: updates.is_active,
            password_hash: updates.password_hash.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            franchise_id: user.franchise_id,
            name: user.name.as_str(),
            email: user.email.as_str(),
            password_hash: user.password_hash.as_str(),
            role: user.role.to_string(),
            permissions: user
                .permissions
                .as_ref()
                .and_then(|p| serde_json::to_string(p).ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Role;
    use chrono::Utc;

    fn row(role: &str, permissions: Option<&str>) -> User {
        let now: NaiveDateTime = Utc::now().naive_utc();
        User {
            id: 1,
            franchise_id: Some(2),
            name: "Asha".to_string(),
            email: "asha@safawala.example".to_string(),
            password_hash: "$2b$12$hash".to_string(),
            role: role.to_string(),
            permissions: permissions.map(ToString::to_string),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn user_into_domain_applies_overrides() {
        let domain: DomainUser = row("staff", Some(r#"{"expenses": true}"#))
            .try_into()
            .unwrap();
        assert_eq!(domain.role, Role::Staff);
        assert!(domain.permissions.expenses);
        assert!(domain.permissions.bookings);
        assert!(!domain.permissions.settings);
    }

    #[test]
    fn garbage_permissions_fall_back_to_role_defaults() {
        let domain: DomainUser = row("readonly", Some("not json")).try_into().unwrap();
        assert!(domain.permissions.dashboard);
        assert!(!domain.permissions.sales);
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(DomainUser::try_from(row("owner", None)).is_err());
    }

    #[test]
    fn from_domain_new_serializes_permissions() {
        let domain = DomainNewUser::new(
            Some(2),
            "Asha".to_string(),
            "Asha@Safawala.example".to_string(),
            "$2b$12$hash".to_string(),
            Role::Staff,
            Some(PermissionOverrides {
                reports: Some(true),
                ..Default::default()
            }),
        )
        .unwrap();
        let new: NewUser = (&domain).into();
        assert_eq!(new.email, "asha@safawala.example");
        assert_eq!(new.role, "staff");
        assert!(new.permissions.as_deref().unwrap().contains("\"reports\":true"));
    }
}
