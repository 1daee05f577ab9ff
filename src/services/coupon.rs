//! Coupon management and the checkout eligibility check.

use chrono::Utc;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::coupon::{Coupon, CouponRejection, NewCoupon, UpdateCoupon};
use crate::domain::user::{Module, Role};
use crate::dto::coupon::CouponValidation;
use crate::forms::coupon::{ApplyCouponForm, CreateCouponForm, UpdateCouponForm, ValidateCouponForm};
use crate::repository::{CouponReader, CouponWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn list_coupons<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<Vec<Coupon>>
where
    R: CouponReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Sales)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.list_coupons(franchise_id)?)
}

pub fn create_coupon<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateCouponForm,
    franchise_id: Option<i32>,
) -> ServiceResult<Coupon>
where
    R: CouponReader + CouponWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Sales)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let mut new_coupon = NewCoupon::new(
        franchise_id,
        &form.code,
        form.discount_type,
        form.discount_value,
    )?;
    new_coupon.description = form.description;
    new_coupon.min_order_value = form.min_order_value;
    new_coupon.max_discount = form.max_discount;
    new_coupon.valid_from = form.valid_from.and_then(|d| d.and_hms_opt(0, 0, 0));
    new_coupon.valid_until = form.valid_until.and_then(|d| d.and_hms_opt(23, 59, 59));
    new_coupon.usage_limit = form.usage_limit;
    new_coupon.per_user_limit = form.per_customer_limit;

    if repo
        .get_coupon_by_code(&new_coupon.code, franchise_id)?
        .is_some()
    {
        return Err(ServiceError::Conflict(format!(
            "coupon code {} already exists",
            new_coupon.code
        )));
    }
    Ok(repo.create_coupon(&new_coupon)?)
}

pub fn update_coupon<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: UpdateCouponForm,
    franchise_id: Option<i32>,
) -> ServiceResult<Coupon>
where
    R: CouponWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Sales)?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let updates = UpdateCoupon {
        description: form.description,
        discount_value: form.discount_value,
        max_discount: form.max_discount.map(Some),
        min_order_value: form.min_order_value,
        valid_from: form
            .valid_from
            .map(|d| d.and_hms_opt(0, 0, 0)),
        valid_until: form
            .valid_until
            .map(|d| d.and_hms_opt(23, 59, 59)),
        usage_limit: form.usage_limit.map(Some),
        per_user_limit: form.per_customer_limit.map(Some),
        is_active: form.is_active,
    };
    Ok(repo.update_coupon(id, franchise_id, &updates)?)
}

pub fn delete_coupon<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<()>
where
    R: CouponWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Sales)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.delete_coupon(id, franchise_id)?)
}

/// Eligibility check for the checkout screen. Rejections come back as a
/// `valid: false` payload, not an error status.
pub fn validate_coupon<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ValidateCouponForm,
    franchise_id: Option<i32>,
) -> ServiceResult<CouponValidation>
where
    R: CouponReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Sales)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;

    match check_coupon(repo, franchise_id, &form.code, form.order_value, form.customer_id)? {
        Ok((_, discount)) => Ok(CouponValidation::eligible(discount)),
        Err(rejection) => Ok(CouponValidation::from(rejection)),
    }
}

/// Validate and record the redemption in one go.
pub fn apply_coupon<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ApplyCouponForm,
    franchise_id: Option<i32>,
) -> ServiceResult<CouponValidation>
where
    R: CouponReader + CouponWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Sales)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;

    match check_coupon(
        repo,
        franchise_id,
        &form.code,
        form.order_value,
        Some(form.customer_id),
    )? {
        Ok((coupon, discount)) => {
            repo.record_coupon_use(coupon.id, franchise_id, form.customer_id, form.booking_id)?;
            Ok(CouponValidation::eligible(discount))
        }
        Err(rejection) => Ok(CouponValidation::from(rejection)),
    }
}

/// Shared lookup + eligibility check. The caller decides whether a rejection
/// is an error (booking creation) or a payload (validate endpoint).
pub(crate) fn check_coupon<R>(
    repo: &R,
    franchise_id: i32,
    code: &str,
    order_value: f64,
    customer_id: Option<i32>,
) -> ServiceResult<Result<(Coupon, f64), CouponRejection>>
where
    R: CouponReader + ?Sized,
{
    let code = code.trim().to_uppercase();
    let Some(coupon) = repo.get_coupon_by_code(&code, franchise_id)? else {
        return Ok(Err(CouponRejection::unknown_code()));
    };

    let prior_uses = match customer_id {
        Some(customer_id) => Some(repo.count_coupon_uses_by_customer(coupon.id, customer_id)?),
        None => None,
    };

    match coupon.check(Utc::now().naive_utc(), order_value, prior_uses) {
        Ok(discount) => Ok(Ok((coupon, discount))),
        Err(rejection) => Ok(Err(rejection)),
    }
}
