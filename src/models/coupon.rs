//! Diesel models for coupons and their redemption history.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::coupon::{
    Coupon as DomainCoupon, NewCoupon as DomainNewCoupon, UpdateCoupon as DomainUpdateCoupon,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::coupons)]
/// Diesel model for [`crate::domain::coupon::Coupon`].
pub struct Coupon {
    pub id: i32,
    pub franchise_id: i32,
    pub code: String,
    pub description: Option<String>,
    pub discount_type: String,
    pub discount_value: f64,
    pub max_discount: Option<f64>,
    pub min_order_value: f64,
    pub valid_from: Option<NaiveDateTime>,
    pub valid_until: Option<NaiveDateTime>,
    pub usage_limit: Option<i32>,
    pub usage_count: i32,
    pub per_user_limit: Option<i32>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::coupons)]
pub struct NewCoupon<'a> {
    pub franchise_id: i32,
    pub code: &'a str,
    pub description: Option<&'a str>,
    pub discount_type: String,
    pub discount_value: f64,
    pub max_discount: Option<f64>,
    pub min_order_value: f64,
    pub valid_from: Option<NaiveDateTime>,
    pub valid_until: Option<NaiveDateTime>,
    pub usage_limit: Option<i32>,
    pub per_user_limit: Option<i32>,
    pub is_active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::coupons)]
/// Data used when updating a [`Coupon`] record. Double options clear the
/// nullable columns.
pub struct UpdateCoupon<'a> {
    pub description: Option<&'a str>,
    pub discount_value: Option<f64>,
    pub max_discount: Option<Option<f64>>,
    pub min_order_value: Option<f64>,
    pub valid_from: Option<Option<NaiveDateTime>>,
    pub valid_until: Option<Option<NaiveDateTime>>,
    pub usage_limit: Option<Option<i32>>,
    pub per_user_limit: Option<Option<i32>>,
    pub is_active: Option<bool>,
}

impl<'a> From<&'a DomainUpdateCoupon> for UpdateCoupon<'a> {
    fn from(updates: &'a DomainUpdateCoupon) -> Self {
        Self {
            description: updates.description.as_deref(),
            discount_value: updates.discount_value,
            max_discount: updates.max_discount,
            min_order_value: updates.min_order_value,
            valid_from: updates.valid_from,
            valid_until: updates.valid_until,
            usage_limit: updates.usage_limit,
            per_user_limit: updates.per_user_limit,
            is_active: updates.is_active,
        }
    }
}

impl TryFrom<Coupon> for DomainCoupon {
    type Error = TypeConstraintError;

    fn try_from(coupon: Coupon) -> Result<Self, Self::Error> {
        Ok(Self {
            id: coupon.id,
            franchise_id: coupon.franchise_id,
            code: coupon.code,
            description: coupon.description,
            discount_type: coupon.discount_type.parse()?,
            discount_value: coupon.discount_value,
            max_discount: coupon.max_discount,
            min_order_value: coupon.min_order_value,
            valid_from: coupon.valid_from,
            valid_until: coupon.valid_until,
            usage_limit: coupon.usage_limit,
            usage_count: coupon.usage_count,
            per_user_limit: coupon.per_user_limit,
            is_active: coupon.is_active,
            created_at: coupon.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewCoupon> for NewCoupon<'a> {
    fn from(coupon: &'a DomainNewCoupon) -> Self {
        Self {
            franchise_id: coupon.franchise_id,
            code: coupon.code.as_str(),
            description: coupon.description.as_deref(),
            discount_type: coupon.discount_type.to_string(),
            discount_value: coupon.discount_value,
            max_discount: coupon.max_discount,
            min_order_value: coupon.min_order_value,
            valid_from: coupon.valid_from,
            valid_until: coupon.valid_until,
            usage_limit: coupon.usage_limit,
            per_user_limit: coupon.per_user_limit,
            is_active: coupon.is_active,
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Coupon, foreign_key = coupon_id))]
#[diesel(table_name = crate::schema::coupon_usage)]
pub struct CouponUsage {
    pub id: i32,
    pub coupon_id: i32,
    pub customer_id: i32,
    pub booking_id: Option<i32>,
    pub used_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::coupon_usage)]
pub struct NewCouponUsage {
    pub coupon_id: i32,
    pub customer_id: i32,
    pub booking_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coupon::DiscountType;

    #[test]
    fn new_coupon_renders_discount_type() {
        let domain = DomainNewCoupon::new(1, " wed20 ", DiscountType::Percentage, 20.0).unwrap();
        let new: NewCoupon = (&domain).into();
        assert_eq!(new.code, "WED20");
        assert_eq!(new.discount_type, "percentage");
        assert!(new.is_active);
    }

    #[test]
    fn unknown_discount_type_is_rejected() {
        let now = chrono::Utc::now().naive_utc();
        let row = Coupon {
            id: 1,
            franchise_id: 1,
            code: "WED20".to_string(),
            description: None,
            discount_type: "bogof".to_string(),
            discount_value: 20.0,
            max_discount: None,
            min_order_value: 0.0,
            valid_from: None,
            valid_until: None,
            usage_limit: None,
            usage_count: 0,
            per_user_limit: None,
            is_active: true,
            created_at: now,
        };
        assert!(DomainCoupon::try_from(row).is_err());
    }
}
