//! Users, roles and per-module permissions.
//!
//! Access control is two-layered: a role hierarchy gates sensitive actions
//! by minimum rank, and a per-module permission set gates which areas of the
//! product a user can touch. Stored permission overrides are merged over the
//! role defaults.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{TypeConstraintError, normalize_email};

/// User rank, ordered from weakest to strongest.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Readonly,
    Staff,
    FranchiseAdmin,
    SuperAdmin,
}

impl Role {
    /// Numeric rank used for minimum-role comparisons.
    pub fn level(self) -> u8 {
        match self {
            Role::Readonly => 1,
            Role::Staff => 2,
            Role::FranchiseAdmin => 3,
            Role::SuperAdmin => 4,
        }
    }

    pub fn at_least(self, min: Role) -> bool {
        self.level() >= min.level()
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Readonly => "readonly",
            Role::Staff => "staff",
            Role::FranchiseAdmin => "franchise_admin",
            Role::SuperAdmin => "super_admin",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Role {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "readonly" => Ok(Role::Readonly),
            "staff" => Ok(Role::Staff),
            "franchise_admin" => Ok(Role::FranchiseAdmin),
            "super_admin" => Ok(Role::SuperAdmin),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown role: {other}"
            ))),
        }
    }
}

/// Product areas a permission can be granted for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Module {
    Dashboard,
    Bookings,
    Customers,
    Inventory,
    Sales,
    Laundry,
    Purchases,
    Expenses,
    Deliveries,
    Reports,
    Financials,
    Invoices,
    Franchises,
    Staff,
    Settings,
}

/// Effective per-module permissions for a user.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPermissions {
    pub dashboard: bool,
    pub bookings: bool,
    pub customers: bool,
    pub inventory: bool,
    pub sales: bool,
    pub laundry: bool,
    pub purchases: bool,
    pub expenses: bool,
    pub deliveries: bool,
    pub reports: bool,
    pub financials: bool,
    pub invoices: bool,
    pub franchises: bool,
    pub staff: bool,
    pub settings: bool,
}

/// Stored permission overrides. Absent fields fall back to the role default.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PermissionOverrides {
    pub dashboard: Option<bool>,
    pub bookings: Option<bool>,
    pub customers: Option<bool>,
    pub inventory: Option<bool>,
    pub sales: Option<bool>,
    pub laundry: Option<bool>,
    pub purchases: Option<bool>,
    pub expenses: Option<bool>,
    pub deliveries: Option<bool>,
    pub reports: Option<bool>,
    pub financials: Option<bool>,
    pub invoices: Option<bool>,
    pub franchises: Option<bool>,
    pub staff: Option<bool>,
    pub settings: Option<bool>,
}

impl UserPermissions {
    fn all(value: bool) -> Self {
        Self {
            dashboard: value,
            bookings: value,
            customers: value,
            inventory: value,
            sales: value,
            laundry: value,
            purchases: value,
            expenses: value,
            deliveries: value,
            reports: value,
            financials: value,
            invoices: value,
            franchises: value,
            staff: value,
            settings: value,
        }
    }

    /// Default permission set for a role.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::SuperAdmin => Self::all(true),
            Role::FranchiseAdmin => Self {
                franchises: false,
                ..Self::all(true)
            },
            Role::Staff => Self {
                dashboard: true,
                bookings: true,
                customers: true,
                inventory: true,
                sales: true,
                laundry: true,
                deliveries: true,
                invoices: true,
                ..Self::all(false)
            },
            Role::Readonly => Self {
                dashboard: true,
                bookings: true,
                customers: true,
                inventory: true,
                ..Self::all(false)
            },
        }
    }

    /// Applies stored overrides on top of the role defaults.
    pub fn with_overrides(mut self, overrides: &PermissionOverrides) -> Self {
        macro_rules! apply {
            ($($field:ident),*) => {
                $(if let Some(value) = overrides.$field { self.$field = value; })*
            };
        }
        apply!(
            dashboard, bookings, customers, inventory, sales, laundry, purchases, expenses,
            deliveries, reports, financials, invoices, franchises, staff, settings
        );
        self
    }

    pub fn allows(&self, module: Module) -> bool {
        match module {
            Module::Dashboard => self.dashboard,
            Module::Bookings => self.bookings,
            Module::Customers => self.customers,
            Module::Inventory => self.inventory,
            Module::Sales => self.sales,
            Module::Laundry => self.laundry,
            Module::Purchases => self.purchases,
            Module::Expenses => self.expenses,
            Module::Deliveries => self.deliveries,
            Module::Reports => self.reports,
            Module::Financials => self.financials,
            Module::Invoices => self.invoices,
            Module::Franchises => self.franchises,
            Module::Staff => self.staff,
            Module::Settings => self.settings,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i32,
    /// Super admins have no home franchise.
    pub franchise_id: Option<i32>,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub role: Role,
    /// Effective permissions with stored overrides already applied.
    pub permissions: UserPermissions,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub franchise_id: Option<i32>,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub permissions: Option<PermissionOverrides>,
}

impl NewUser {
    pub fn new(
        franchise_id: Option<i32>,
        name: String,
        email: String,
        password_hash: String,
        role: Role,
        permissions: Option<PermissionOverrides>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            franchise_id,
            name: name.trim().to_string(),
            email: normalize_email(email)?,
            password_hash,
            role,
            permissions,
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub permissions: Option<PermissionOverrides>,
    pub is_active: Option<bool>,
    pub password_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_hierarchy_is_ordered() {
        assert!(Role::SuperAdmin.at_least(Role::FranchiseAdmin));
        assert!(Role::FranchiseAdmin.at_least(Role::Staff));
        assert!(Role::Staff.at_least(Role::Readonly));
        assert!(!Role::Readonly.at_least(Role::Staff));
        assert!(Role::Staff.at_least(Role::Staff));
    }

    #[test]
    fn role_parses_and_displays() {
        for role in [
            Role::Readonly,
            Role::Staff,
            Role::FranchiseAdmin,
            Role::SuperAdmin,
        ] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert!("manager".parse::<Role>().is_err());
    }

    #[test]
    fn super_admin_gets_everything() {
        let perms = UserPermissions::for_role(Role::SuperAdmin);
        assert!(perms.franchises);
        assert!(perms.settings);
    }

    #[test]
    fn franchise_admin_cannot_manage_franchises() {
        let perms = UserPermissions::for_role(Role::FranchiseAdmin);
        assert!(!perms.franchises);
        assert!(perms.staff);
        assert!(perms.financials);
    }

    #[test]
    fn staff_defaults_exclude_financials() {
        let perms = UserPermissions::for_role(Role::Staff);
        assert!(perms.bookings);
        assert!(perms.laundry);
        assert!(perms.invoices);
        assert!(!perms.expenses);
        assert!(!perms.reports);
        assert!(!perms.financials);
        assert!(!perms.staff);
        assert!(!perms.settings);
    }

    #[test]
    fn readonly_defaults_are_view_only_areas() {
        let perms = UserPermissions::for_role(Role::Readonly);
        assert!(perms.dashboard);
        assert!(perms.bookings);
        assert!(perms.customers);
        assert!(perms.inventory);
        assert!(!perms.sales);
        assert!(!perms.deliveries);
    }

    #[test]
    fn overrides_merge_over_defaults() {
        let overrides = PermissionOverrides {
            expenses: Some(true),
            bookings: Some(false),
            ..Default::default()
        };
        let perms = UserPermissions::for_role(Role::Staff).with_overrides(&overrides);
        assert!(perms.expenses);
        assert!(!perms.bookings);
        assert!(perms.customers);
    }

    #[test]
    fn overrides_deserialize_from_partial_json() {
        let overrides: PermissionOverrides =
            serde_json::from_str(r#"{"reports": true}"#).unwrap();
        assert_eq!(overrides.reports, Some(true));
        assert_eq!(overrides.dashboard, None);
    }
}
