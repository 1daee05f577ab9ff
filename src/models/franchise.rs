use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::franchise::{
    Franchise as DomainFranchise, NewFranchise as DomainNewFranchise,
    UpdateFranchise as DomainUpdateFranchise,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::franchises)]
/// Diesel model for [`crate::domain::franchise::Franchise`].
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

#[derive(Insertable)]
#[diesel(table_name = crate::schema::franchises)]
/// Insertable form of [`Franchise`].
pub struct NewFranchise<'a> {
    pub name: &'a str,
    pub code: &'a str,
    pub address: Option<&'a str>,
    pub city: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::franchises)]
/// Data used when updating a [`Franchise`] record.
pub struct UpdateFranchise<'a> {
    pub name: Option<&'a str>,
    pub address: Option<&'a str>,
    pub city: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub is_active: Option<bool>,
}

impl<'a> From<&'a DomainUpdateFranchise> for UpdateFranchise<'a> {
    fn from(updates: &'a DomainUpdateFranchise) -> Self {
        Self {
            name: updates.name.as_deref(),
            address: updates.address.as_deref(),
            city: updates.city.as_deref(),
            phone: updates.phone.as_deref(),
            email: updates.email.as_deref(),
            is_active: updates.is_active,
        }
    }
}

impl From<Franchise> for DomainFranchise {
    fn from(franchise: Franchise) -> Self {
        Self {
            id: franchise.id,
            name: franchise.name,
            code: franchise.code,
            address: franchise.address,
            city: franchise.city,
            phone: franchise.phone,
            email: franchise.email,
            is_active: franchise.is_active,
            created_at: franchise.created_at,
            updated_at: franchise.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewFranchise> for NewFranchise<'a> {
    fn from(franchise: &'a DomainNewFranchise) -> Self {
        Self {
            name: franchise.name.as_str(),
            code: franchise.code.as_str(),
            address: franchise.address.as_deref(),
            city: franchise.city.as_deref(),
            phone: franchise.phone.as_deref(),
            email: franchise.email.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn franchise_into_domain() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let row = Franchise {
            id: 1,
            name: "Safawala Pune".to_string(),
            code: "PUN".to_string(),
            address: None,
            city: Some("Pune".to_string()),
            phone: None,
            email: Some("pune@safawala.example".to_string()),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let domain: DomainFranchise = row.into();
        assert_eq!(domain.id, 1);
        assert_eq!(domain.code, "PUN");
        assert_eq!(domain.city.as_deref(), Some("Pune"));
    }

    #[test]
    fn from_domain_new_borrows_fields() {
        let domain = DomainNewFranchise::new(
            "Safawala Pune".to_string(),
            "pun".to_string(),
            None,
            Some("Pune".to_string()),
            None,
            None,
        );
        let new: NewFranchise = (&domain).into();
        assert_eq!(new.name, "Safawala Pune");
        // Codes normalize to uppercase.
        assert_eq!(new.code, "PUN");
        assert_eq!(new.city, Some("Pune"));
    }
}
