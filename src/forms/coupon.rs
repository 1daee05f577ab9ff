use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::coupon::DiscountType;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCouponForm {
    #[validate(length(min = 2, max = 30))]
    pub code: String,
    pub discount_type: DiscountType,
    #[validate(range(min = 0.0))]
    pub discount_value: f64,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub min_order_value: f64,
    pub max_discount: Option<f64>,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub usage_limit: Option<i32>,
    pub per_customer_limit: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCouponForm {
    pub discount_value: Option<f64>,
    pub min_order_value: Option<f64>,
    pub max_discount: Option<f64>,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub usage_limit: Option<i32>,
    pub per_customer_limit: Option<i32>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ValidateCouponForm {
    #[validate(length(min = 1))]
    pub code: String,
    #[validate(range(min = 0.0))]
    pub order_value: f64,
    pub customer_id: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ApplyCouponForm {
    #[validate(length(min = 1))]
    pub code: String,
    #[validate(range(min = 0.0))]
    pub order_value: f64,
    pub customer_id: i32,
    pub booking_id: Option<i32>,
}
