//! Repository implementation for packages, variants and distance tiers.

use diesel::prelude::*;

use crate::{
    domain::pricing::{
        DistanceTier, NewDistanceTier, NewPackage, NewPackageVariant, Package, PackageVariant,
    },
    models::pricing::{
        DistancePricingTier as DbDistanceTier, NewDistancePricingTier as DbNewDistanceTier,
        NewPackage as DbNewPackage, NewPackageVariant as DbNewPackageVariant,
        Package as DbPackage, PackageVariant as DbPackageVariant,
    },
    repository::{
        DieselRepository, PricingReader, PricingWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl PricingReader for DieselRepository {
    fn list_packages_with_variants(
        &self,
        franchise_id: i32,
    ) -> RepositoryResult<Vec<(Package, Vec<PackageVariant>)>> {
        use crate::schema::{package_variants, packages};

        let mut conn = self.conn()?;

        let db_packages = packages::table
            .filter(packages::franchise_id.eq(franchise_id))
            .order(packages::name.asc())
            .load::<DbPackage>(&mut conn)?;

        let grouped = DbPackageVariant::belonging_to(&db_packages)
            .order(package_variants::base_price.asc())
            .load::<DbPackageVariant>(&mut conn)?
            .grouped_by(&db_packages);

        Ok(db_packages
            .into_iter()
            .zip(grouped)
            .map(|(db_package, db_variants)| {
                (
                    db_package.into(),
                    db_variants.into_iter().map(Into::into).collect(),
                )
            })
            .collect())
    }

    fn get_package_by_id(
        &self,
        id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Option<(Package, Vec<PackageVariant>)>> {
        use crate::schema::{package_variants, packages};

        let mut conn = self.conn()?;

        let db_package = packages::table
            .filter(packages::id.eq(id))
            .filter(packages::franchise_id.eq(franchise_id))
            .first::<DbPackage>(&mut conn)
            .optional()?;

        match db_package {
            Some(db_package) => {
                let variants = package_variants::table
                    .filter(package_variants::package_id.eq(db_package.id))
                    .order(package_variants::base_price.asc())
                    .load::<DbPackageVariant>(&mut conn)?
                    .into_iter()
                    .map(Into::into)
                    .collect();
                Ok(Some((db_package.into(), variants)))
            }
            None => Ok(None),
        }
    }

    fn get_variant_by_id(
        &self,
        id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Option<PackageVariant>> {
        use crate::schema::{package_variants, packages};

        let mut conn = self.conn()?;
        let db_variant = package_variants::table
            .inner_join(packages::table)
            .filter(package_variants::id.eq(id))
            .filter(packages::franchise_id.eq(franchise_id))
            .select(package_variants::all_columns)
            .first::<DbPackageVariant>(&mut conn)
            .optional()?;

        Ok(db_variant.map(Into::into))
    }

    fn list_distance_tiers(&self, franchise_id: i32) -> RepositoryResult<Vec<DistanceTier>> {
        use crate::schema::distance_pricing_tiers;

        let mut conn = self.conn()?;
        let db_tiers = distance_pricing_tiers::table
            .filter(distance_pricing_tiers::franchise_id.eq(franchise_id))
            .order(distance_pricing_tiers::min_km.asc())
            .load::<DbDistanceTier>(&mut conn)?;

        Ok(db_tiers.into_iter().map(Into::into).collect())
    }
}

impl PricingWriter for DieselRepository {
    fn create_package(&self, new_package: &NewPackage) -> RepositoryResult<Package> {
        use crate::schema::packages;

        let mut conn = self.conn()?;
        let db_new_package: DbNewPackage = new_package.into();

        let db_package = diesel::insert_into(packages::table)
            .values(&db_new_package)
            .get_result::<DbPackage>(&mut conn)?;

        Ok(db_package.into())
    }

    fn update_package(
        &self,
        id: i32,
        franchise_id: i32,
        name: &str,
        description: Option<&str>,
        is_active: bool,
    ) -> RepositoryResult<Package> {
        use crate::schema::packages;

        let mut conn = self.conn()?;
        let db_package = diesel::update(
            packages::table
                .filter(packages::id.eq(id))
                .filter(packages::franchise_id.eq(franchise_id)),
        )
        .set((
            packages::name.eq(name),
            packages::description.eq(description),
            packages::is_active.eq(is_active),
        ))
        .get_result::<DbPackage>(&mut conn)?;

        Ok(db_package.into())
    }

    fn create_package_variant(
        &self,
        franchise_id: i32,
        variant: &NewPackageVariant,
    ) -> RepositoryResult<PackageVariant> {
        use crate::schema::{package_variants, packages};

        let mut conn = self.conn()?;

        let package: Option<i32> = packages::table
            .filter(packages::id.eq(variant.package_id))
            .filter(packages::franchise_id.eq(franchise_id))
            .select(packages::id)
            .first(&mut conn)
            .optional()?;
        if package.is_none() {
            return Err(RepositoryError::NotFound);
        }

        let db_new_variant: DbNewPackageVariant = variant.into();
        let db_variant = diesel::insert_into(package_variants::table)
            .values(&db_new_variant)
            .get_result::<DbPackageVariant>(&mut conn)?;

        Ok(db_variant.into())
    }

    fn update_package_variant(
        &self,
        id: i32,
        franchise_id: i32,
        name: &str,
        base_price: f64,
        security_deposit: f64,
        is_active: bool,
    ) -> RepositoryResult<PackageVariant> {
        use crate::schema::{package_variants, packages};

        let mut conn = self.conn()?;

        let variant_id: i32 = package_variants::table
            .inner_join(packages::table)
            .filter(package_variants::id.eq(id))
            .filter(packages::franchise_id.eq(franchise_id))
            .select(package_variants::id)
            .first(&mut conn)?;

        let db_variant = diesel::update(package_variants::table.find(variant_id))
            .set((
                package_variants::name.eq(name),
                package_variants::base_price.eq(base_price),
                package_variants::security_deposit.eq(security_deposit),
                package_variants::is_active.eq(is_active),
            ))
            .get_result::<DbPackageVariant>(&mut conn)?;

        Ok(db_variant.into())
    }

    fn replace_distance_tiers(
        &self,
        franchise_id: i32,
        tiers: &[NewDistanceTier],
    ) -> RepositoryResult<usize> {
        use crate::schema::distance_pricing_tiers;

        let mut conn = self.conn()?;

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            diesel::delete(
                distance_pricing_tiers::table
                    .filter(distance_pricing_tiers::franchise_id.eq(franchise_id)),
            )
            .execute(conn)?;

            let rows: Vec<DbNewDistanceTier> = tiers
                .iter()
                .map(|tier| DbNewDistanceTier::from_domain(franchise_id, tier))
                .collect();

            diesel::insert_into(distance_pricing_tiers::table)
                .values(&rows)
                .execute(conn)
        })
        .map_err(RepositoryError::from)
    }
}
