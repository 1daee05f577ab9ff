//! Diesel models for packages, variants and distance pricing tiers.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::pricing::{
    DistanceTier as DomainDistanceTier, NewDistanceTier as DomainNewDistanceTier,
    NewPackage as DomainNewPackage, NewPackageVariant as DomainNewPackageVariant,
    Package as DomainPackage, PackageVariant as DomainPackageVariant,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::packages)]
pub struct Package {
    pub id: i32,
    pub franchise_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::packages)]
pub struct NewPackage<'a> {
    pub franchise_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl From<Package> for DomainPackage {
    fn from(package: Package) -> Self {
        Self {
            id: package.id,
            franchise_id: package.franchise_id,
            name: package.name,
            description: package.description,
            is_active: package.is_active,
            created_at: package.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewPackage> for NewPackage<'a> {
    fn from(package: &'a DomainNewPackage) -> Self {
        Self {
            franchise_id: package.franchise_id,
            name: package.name.as_str(),
            description: package.description.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Package, foreign_key = package_id))]
#[diesel(table_name = crate::schema::package_variants)]
pub struct PackageVariant {
    pub id: i32,
    pub package_id: i32,
    pub name: String,
    pub base_price: f64,
    pub security_deposit: f64,
    pub is_active: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::package_variants)]
pub struct NewPackageVariant<'a> {
    pub package_id: i32,
    pub name: &'a str,
    pub base_price: f64,
    pub security_deposit: f64,
}

impl From<PackageVariant> for DomainPackageVariant {
    fn from(variant: PackageVariant) -> Self {
        Self {
            id: variant.id,
            package_id: variant.package_id,
            name: variant.name,
            base_price: variant.base_price,
            security_deposit: variant.security_deposit,
            is_active: variant.is_active,
        }
    }
}

impl<'a> From<&'a DomainNewPackageVariant> for NewPackageVariant<'a> {
    fn from(variant: &'a DomainNewPackageVariant) -> Self {
        Self {
            package_id: variant.package_id,
            name: variant.name.as_str(),
            base_price: variant.base_price,
            security_deposit: variant.security_deposit,
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::distance_pricing_tiers)]
pub struct DistancePricingTier {
    pub id: i32,
    pub franchise_id: i32,
    pub variant_id: Option<i32>,
    pub min_km: f64,
    pub max_km: f64,
    pub base_price_addition: f64,
    pub is_active: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::distance_pricing_tiers)]
pub struct NewDistancePricingTier {
    pub franchise_id: i32,
    pub variant_id: Option<i32>,
    pub min_km: f64,
    pub max_km: f64,
    pub base_price_addition: f64,
    pub is_active: bool,
}

impl From<DistancePricingTier> for DomainDistanceTier {
    fn from(tier: DistancePricingTier) -> Self {
        Self {
            id: tier.id,
            franchise_id: tier.franchise_id,
            variant_id: tier.variant_id,
            min_km: tier.min_km,
            max_km: tier.max_km,
            base_price_addition: tier.base_price_addition,
            is_active: tier.is_active,
        }
    }
}

impl NewDistancePricingTier {
    pub fn from_domain(franchise_id: i32, tier: &DomainNewDistanceTier) -> Self {
        Self {
            franchise_id,
            variant_id: tier.variant_id,
            min_km: tier.min_km,
            max_km: tier.max_km,
            base_price_addition: tier.base_price_addition,
            is_active: tier.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_into_domain_keeps_band() {
        let row = DistancePricingTier {
            id: 1,
            franchise_id: 2,
            variant_id: Some(9),
            min_km: 10.0,
            max_km: 25.0,
            base_price_addition: 300.0,
            is_active: true,
        };
        let domain: DomainDistanceTier = row.into();
        assert!(domain.covers(10.0));
        assert!(!domain.covers(25.5));
    }
}
