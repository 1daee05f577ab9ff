use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::forms::coupon::{
    ApplyCouponForm, CreateCouponForm, UpdateCouponForm, ValidateCouponForm,
};
use crate::repository::DieselRepository;
use crate::routes::ScopeQuery;
use crate::services::{self, ServiceError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_coupons)
        .service(create_coupon)
        .service(validate_coupon)
        .service(apply_coupon)
        .service(update_coupon)
        .service(delete_coupon);
}

#[get("/coupons")]
async fn list_coupons(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let coupons = services::coupon::list_coupons(repo.get_ref(), &user, query.franchise_id)?;
    Ok(HttpResponse::Ok().json(coupons))
}

#[post("/coupons")]
async fn create_coupon(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<CreateCouponForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let coupon = services::coupon::create_coupon(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Created().json(coupon))
}

#[put("/coupons/{id}")]
async fn update_coupon(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    form: web::Json<UpdateCouponForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let coupon = services::coupon::update_coupon(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(coupon))
}

#[delete("/coupons/{id}")]
async fn delete_coupon(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    services::coupon::delete_coupon(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

#[post("/coupons/validate")]
async fn validate_coupon(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<ValidateCouponForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let validation = services::coupon::validate_coupon(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(validation))
}

#[post("/coupons/apply")]
async fn apply_coupon(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<ApplyCouponForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let validation = services::coupon::apply_coupon(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(validation))
}
