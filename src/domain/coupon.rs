//! Coupons and the discount rules applied at checkout.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{TypeConstraintError, round2};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Percentage,
    Flat,
    FreeShipping,
}

impl Display for DiscountType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Flat => "flat",
            DiscountType::FreeShipping => "free_shipping",
        };
        write!(f, "{s}")
    }
}

impl FromStr for DiscountType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(DiscountType::Percentage),
            "flat" => Ok(DiscountType::Flat),
            "free_shipping" => Ok(DiscountType::FreeShipping),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown discount type: {other}"
            ))),
        }
    }
}

/// Why a coupon was refused. Carries the customer-facing wording so every
/// caller reports the same thing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CouponRejection {
    pub error: String,
    pub message: String,
}

impl CouponRejection {
    pub fn unknown_code() -> Self {
        Self {
            error: "Invalid coupon code".into(),
            message: "This coupon code does not exist or is no longer active".into(),
        }
    }

    fn not_yet_active(from: NaiveDateTime) -> Self {
        Self {
            error: "Coupon not yet active".into(),
            message: format!("This coupon will be active from {}", from.format("%d/%m/%Y")),
        }
    }

    fn expired(until: NaiveDateTime) -> Self {
        Self {
            error: "Coupon expired".into(),
            message: format!("This coupon expired on {}", until.format("%d/%m/%Y")),
        }
    }

    fn below_minimum(min_order_value: f64) -> Self {
        Self {
            error: "Minimum order value not met".into(),
            message: format!("Minimum order value of ₹{min_order_value:.2} required"),
        }
    }

    fn usage_limit_reached() -> Self {
        Self {
            error: "Coupon usage limit reached".into(),
            message: "This coupon has reached its maximum usage limit".into(),
        }
    }

    fn customer_limit_reached(prior_uses: i64) -> Self {
        Self {
            error: "Customer usage limit reached".into(),
            message: format!("You have already used this coupon {prior_uses} time(s)"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Coupon {
    pub id: i32,
    pub franchise_id: i32,
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
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

impl Coupon {
    /// Full eligibility check; `prior_uses` is how many times the customer
    /// already redeemed this coupon (None when no customer was given).
    pub fn check(
        &self,
        now: NaiveDateTime,
        order_value: f64,
        prior_uses: Option<i64>,
    ) -> Result<f64, CouponRejection> {
        if !self.is_active {
            return Err(CouponRejection::unknown_code());
        }
        if let Some(from) = self.valid_from {
            if now < from {
                return Err(CouponRejection::not_yet_active(from));
            }
        }
        if let Some(until) = self.valid_until {
            if now > until {
                return Err(CouponRejection::expired(until));
            }
        }
        if order_value < self.min_order_value {
            return Err(CouponRejection::below_minimum(self.min_order_value));
        }
        if let Some(limit) = self.usage_limit {
            if self.usage_count >= limit {
                return Err(CouponRejection::usage_limit_reached());
            }
        }
        if let (Some(uses), Some(limit)) = (prior_uses, self.per_user_limit) {
            if uses >= i64::from(limit) {
                return Err(CouponRejection::customer_limit_reached(uses));
            }
        }
        Ok(self.discount_for(order_value))
    }

    /// Discount amount for an eligible order, clamped to the order value.
    pub fn discount_for(&self, order_value: f64) -> f64 {
        let raw = match self.discount_type {
            DiscountType::Percentage => {
                let pct = order_value * self.discount_value / 100.0;
                match self.max_discount {
                    Some(cap) if pct > cap => cap,
                    _ => pct,
                }
            }
            DiscountType::Flat => self.discount_value,
            DiscountType::FreeShipping => 0.0,
        };
        round2(raw.min(order_value))
    }
}

#[derive(Clone, Debug)]
pub struct NewCoupon {
    pub franchise_id: i32,
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub max_discount: Option<f64>,
    pub min_order_value: f64,
    pub valid_from: Option<NaiveDateTime>,
    pub valid_until: Option<NaiveDateTime>,
    pub usage_limit: Option<i32>,
    pub per_user_limit: Option<i32>,
    pub is_active: bool,
}

impl NewCoupon {
    /// Codes are stored uppercase so lookups are case-insensitive.
    pub fn new(
        franchise_id: i32,
        code: &str,
        discount_type: DiscountType,
        discount_value: f64,
    ) -> Result<Self, TypeConstraintError> {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        if discount_value < 0.0 {
            return Err(TypeConstraintError::InvalidValue(
                "discount value cannot be negative".into(),
            ));
        }
        Ok(Self {
            franchise_id,
            code,
            description: None,
            discount_type,
            discount_value,
            max_discount: None,
            min_order_value: 0.0,
            valid_from: None,
            valid_until: None,
            usage_limit: None,
            per_user_limit: None,
            is_active: true,
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct UpdateCoupon {
    pub description: Option<String>,
    pub discount_value: Option<f64>,
    pub max_discount: Option<Option<f64>>,
    pub min_order_value: Option<f64>,
    pub valid_from: Option<Option<NaiveDateTime>>,
    pub valid_until: Option<Option<NaiveDateTime>>,
    pub usage_limit: Option<Option<i32>>,
    pub per_user_limit: Option<Option<i32>>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn coupon() -> Coupon {
        Coupon {
            id: 1,
            franchise_id: 1,
            code: "WED20".into(),
            description: None,
            discount_type: DiscountType::Percentage,
            discount_value: 20.0,
            max_discount: Some(1_500.0),
            min_order_value: 5_000.0,
            valid_from: Some(ts(2025, 1, 1)),
            valid_until: Some(ts(2025, 12, 31)),
            usage_limit: Some(100),
            usage_count: 0,
            per_user_limit: Some(1),
            is_active: true,
            created_at: ts(2025, 1, 1),
        }
    }

    #[test]
    fn percentage_discount_capped() {
        let c = coupon();
        // 20% of 10000 is 2000, capped at 1500.
        assert_eq!(c.discount_for(10_000.0), 1_500.0);
        assert_eq!(c.discount_for(6_000.0), 1_200.0);
    }

    #[test]
    fn flat_discount_clamped_to_order() {
        let mut c = coupon();
        c.discount_type = DiscountType::Flat;
        c.discount_value = 700.0;
        c.min_order_value = 0.0;
        assert_eq!(c.discount_for(500.0), 500.0);
        assert_eq!(c.discount_for(5_000.0), 700.0);
    }

    #[test]
    fn free_shipping_gives_zero() {
        let mut c = coupon();
        c.discount_type = DiscountType::FreeShipping;
        assert_eq!(c.discount_for(9_000.0), 0.0);
    }

    #[test]
    fn rejects_below_minimum_order() {
        let c = coupon();
        let err = c.check(ts(2025, 6, 1), 4_000.0, None).unwrap_err();
        assert_eq!(err.error, "Minimum order value not met");
        assert!(err.message.contains("₹5000.00"));
    }

    #[test]
    fn rejects_outside_validity_window() {
        let c = coupon();
        assert_eq!(
            c.check(ts(2024, 12, 1), 8_000.0, None).unwrap_err().error,
            "Coupon not yet active"
        );
        assert_eq!(
            c.check(ts(2026, 1, 2), 8_000.0, None).unwrap_err().error,
            "Coupon expired"
        );
    }

    #[test]
    fn rejects_when_usage_exhausted() {
        let mut c = coupon();
        c.usage_count = 100;
        assert_eq!(
            c.check(ts(2025, 6, 1), 8_000.0, None).unwrap_err().error,
            "Coupon usage limit reached"
        );
    }

    #[test]
    fn rejects_repeat_customer_over_limit() {
        let c = coupon();
        let err = c.check(ts(2025, 6, 1), 8_000.0, Some(1)).unwrap_err();
        assert_eq!(err.error, "Customer usage limit reached");
        assert_eq!(err.message, "You have already used this coupon 1 time(s)");
    }

    #[test]
    fn valid_coupon_returns_discount() {
        let c = coupon();
        assert_eq!(c.check(ts(2025, 6, 1), 8_000.0, Some(0)).unwrap(), 1_500.0);
    }

    #[test]
    fn inactive_coupon_looks_unknown() {
        let mut c = coupon();
        c.is_active = false;
        assert_eq!(
            c.check(ts(2025, 6, 1), 8_000.0, None).unwrap_err(),
            CouponRejection::unknown_code()
        );
    }
}
