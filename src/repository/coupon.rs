//! Repository implementation for coupons and redemption history.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::coupon::{Coupon, NewCoupon, UpdateCoupon},
    models::coupon::{
        Coupon as DbCoupon, NewCoupon as DbNewCoupon, NewCouponUsage as DbNewCouponUsage,
        UpdateCoupon as DbUpdateCoupon,
    },
    repository::{
        CouponReader, CouponWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

/// Inserts a redemption row and bumps the coupon's counter. Runs inside the
/// caller's transaction.
pub(super) fn record_usage(
    conn: &mut SqliteConnection,
    coupon_id: i32,
    customer_id: i32,
    booking_id: Option<i32>,
) -> Result<(), diesel::result::Error> {
    use crate::schema::{coupon_usage, coupons};

    diesel::insert_into(coupon_usage::table)
        .values(&DbNewCouponUsage {
            coupon_id,
            customer_id,
            booking_id,
        })
        .execute(conn)?;

    diesel::update(coupons::table.find(coupon_id))
        .set(coupons::usage_count.eq(coupons::usage_count + 1))
        .execute(conn)?;

    Ok(())
}

impl CouponReader for DieselRepository {
    fn get_coupon_by_id(&self, id: i32, franchise_id: i32) -> RepositoryResult<Option<Coupon>> {
        use crate::schema::coupons;

        let mut conn = self.conn()?;
        let db_coupon = coupons::table
            .filter(coupons::id.eq(id))
            .filter(coupons::franchise_id.eq(franchise_id))
            .first::<DbCoupon>(&mut conn)
            .optional()?;

        match db_coupon {
            Some(db_coupon) => Ok(Some(
                Coupon::try_from(db_coupon).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn get_coupon_by_code(
        &self,
        code: &str,
        franchise_id: i32,
    ) -> RepositoryResult<Option<Coupon>> {
        use crate::schema::coupons;

        let mut conn = self.conn()?;
        let db_coupon = coupons::table
            .filter(coupons::code.eq(code.trim().to_uppercase()))
            .filter(coupons::franchise_id.eq(franchise_id))
            .first::<DbCoupon>(&mut conn)
            .optional()?;

        match db_coupon {
            Some(db_coupon) => Ok(Some(
                Coupon::try_from(db_coupon).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_coupons(&self, franchise_id: i32) -> RepositoryResult<Vec<Coupon>> {
        use crate::schema::coupons;

        let mut conn = self.conn()?;
        let db_coupons = coupons::table
            .filter(coupons::franchise_id.eq(franchise_id))
            .order(coupons::created_at.desc())
            .load::<DbCoupon>(&mut conn)?;

        db_coupons
            .into_iter()
            .map(|db_coupon| Coupon::try_from(db_coupon).map_err(RepositoryError::from))
            .collect()
    }

    fn count_coupon_uses_by_customer(
        &self,
        coupon_id: i32,
        customer_id: i32,
    ) -> RepositoryResult<i64> {
        use crate::schema::coupon_usage;

        let mut conn = self.conn()?;
        let uses: i64 = coupon_usage::table
            .filter(coupon_usage::coupon_id.eq(coupon_id))
            .filter(coupon_usage::customer_id.eq(customer_id))
            .count()
            .get_result(&mut conn)?;

        Ok(uses)
    }
}

impl CouponWriter for DieselRepository {
    fn create_coupon(&self, new_coupon: &NewCoupon) -> RepositoryResult<Coupon> {
        use crate::schema::coupons;

        let mut conn = self.conn()?;
        let db_new_coupon: DbNewCoupon = new_coupon.into();

        let db_coupon = diesel::insert_into(coupons::table)
            .values(&db_new_coupon)
            .get_result::<DbCoupon>(&mut conn)?;

        Coupon::try_from(db_coupon).map_err(RepositoryError::from)
    }

    fn update_coupon(
        &self,
        id: i32,
        franchise_id: i32,
        updates: &UpdateCoupon,
    ) -> RepositoryResult<Coupon> {
        use crate::schema::coupons;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateCoupon::from(updates);

        let db_coupon = diesel::update(
            coupons::table
                .filter(coupons::id.eq(id))
                .filter(coupons::franchise_id.eq(franchise_id)),
        )
        .set(&db_updates)
        .get_result::<DbCoupon>(&mut conn)?;

        Coupon::try_from(db_coupon).map_err(RepositoryError::from)
    }

    fn delete_coupon(&self, id: i32, franchise_id: i32) -> RepositoryResult<()> {
        use crate::schema::coupons;

        let mut conn = self.conn()?;
        let affected = diesel::delete(
            coupons::table
                .filter(coupons::id.eq(id))
                .filter(coupons::franchise_id.eq(franchise_id)),
        )
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn record_coupon_use(
        &self,
        coupon_id: i32,
        franchise_id: i32,
        customer_id: i32,
        booking_id: Option<i32>,
    ) -> RepositoryResult<()> {
        use crate::schema::coupons;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<(), RepositoryError, _>(|conn| {
            let owned: Option<i32> = coupons::table
                .filter(coupons::id.eq(coupon_id))
                .filter(coupons::franchise_id.eq(franchise_id))
                .select(coupons::id)
                .first(conn)
                .optional()?;
            if owned.is_none() {
                return Err(RepositoryError::NotFound);
            }

            record_usage(conn, coupon_id, customer_id, booking_id)?;
            Ok(())
        })
    }
}
