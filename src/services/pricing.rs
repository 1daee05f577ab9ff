//! Packages, variants and distance pricing.

use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::pricing::{
    NewPackage, NewPackageVariant, PackageVariant, resolve_distance_addon,
};
use crate::domain::types::round2;
use crate::domain::user::{Module, Role};
use crate::dto::pricing::{DistanceQuote, PackageWithVariants};
use crate::forms::pricing::{DistanceTiersForm, PackageForm, PackageVariantForm};
use crate::repository::{PricingReader, PricingWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn list_packages<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<Vec<PackageWithVariants>>
where
    R: PricingReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Bookings)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo
        .list_packages_with_variants(franchise_id)?
        .into_iter()
        .map(PackageWithVariants::from)
        .collect())
}

pub fn get_package<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<PackageWithVariants>
where
    R: PricingReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Bookings)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    repo.get_package_by_id(id, franchise_id)?
        .map(PackageWithVariants::from)
        .ok_or(ServiceError::NotFound)
}

pub fn create_package<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: PackageForm,
    franchise_id: Option<i32>,
) -> ServiceResult<crate::domain::pricing::Package>
where
    R: PricingWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Bookings)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;
    let new_package = NewPackage::new(franchise_id, &form.name, form.description.as_deref())?;
    Ok(repo.create_package(&new_package)?)
}

pub fn update_package<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: PackageForm,
    franchise_id: Option<i32>,
) -> ServiceResult<crate::domain::pricing::Package>
where
    R: PricingWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Bookings)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.update_package(
        id,
        franchise_id,
        form.name.trim(),
        form.description.as_deref(),
        form.is_active,
    )?)
}

pub fn create_variant<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: PackageVariantForm,
    franchise_id: Option<i32>,
) -> ServiceResult<PackageVariant>
where
    R: PricingWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Bookings)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.create_package_variant(
        franchise_id,
        &NewPackageVariant {
            package_id: form.package_id,
            name: form.name.trim().to_string(),
            base_price: form.base_price,
            security_deposit: form.security_deposit,
        },
    )?)
}

pub fn update_variant<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: PackageVariantForm,
    franchise_id: Option<i32>,
) -> ServiceResult<PackageVariant>
where
    R: PricingWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Bookings)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.update_package_variant(
        id,
        franchise_id,
        form.name.trim(),
        form.base_price,
        form.security_deposit,
        form.is_active,
    )?)
}

pub fn list_distance_tiers<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<Vec<crate::domain::pricing::DistanceTier>>
where
    R: PricingReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Bookings)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.list_distance_tiers(franchise_id)?)
}

/// Replaces the franchise's whole distance-tier table.
pub fn save_distance_tiers<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: DistanceTiersForm,
    franchise_id: Option<i32>,
) -> ServiceResult<usize>
where
    R: PricingWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Bookings)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    for tier in &form.tiers {
        if tier.min_km < 0.0 || tier.max_km < tier.min_km || tier.base_price_addition < 0.0 {
            return Err(ServiceError::Validation(format!(
                "invalid distance tier {}..{}",
                tier.min_km, tier.max_km
            )));
        }
    }
    Ok(repo.replace_distance_tiers(franchise_id, &form.tiers)?)
}

/// Resolves the distance addon for a quoted trip.
pub fn compute_distance_addon<R>(
    repo: &R,
    user: &AuthenticatedUser,
    variant_id: Option<i32>,
    km: f64,
    franchise_id: Option<i32>,
) -> ServiceResult<DistanceQuote>
where
    R: PricingReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Bookings)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    let tiers = repo.list_distance_tiers(franchise_id)?;
    let (addon, source) = resolve_distance_addon(&tiers, variant_id, km);
    Ok(DistanceQuote {
        distance_km: km,
        addon: round2(addon),
        source,
    })
}
