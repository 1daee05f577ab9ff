use serde::Serialize;

use crate::domain::coupon::CouponRejection;

/// Result of a coupon eligibility check. Rejections are a 200 with
/// `valid: false` so the checkout flow can surface the wording inline.
#[derive(Debug, Serialize)]
pub struct CouponValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CouponValidation {
    pub fn eligible(discount: f64) -> Self {
        Self {
            valid: true,
            discount: Some(discount),
            error: None,
            message: None,
        }
    }
}

impl From<CouponRejection> for CouponValidation {
    fn from(rejection: CouponRejection) -> Self {
        Self {
            valid: false,
            discount: None,
            error: Some(rejection.error),
            message: Some(rejection.message),
        }
    }
}
