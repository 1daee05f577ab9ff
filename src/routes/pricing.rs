use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::forms::pricing::{DistanceTiersForm, PackageForm, PackageVariantForm};
use crate::repository::DieselRepository;
use crate::routes::ScopeQuery;
use crate::services::{self, ServiceError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_packages)
        .service(get_package)
        .service(create_package)
        .service(update_package)
        .service(create_variant)
        .service(update_variant)
        .service(list_distance_tiers)
        .service(save_distance_tiers)
        .service(compute_distance_addon);
}

#[get("/packages")]
async fn list_packages(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let packages = services::pricing::list_packages(repo.get_ref(), &user, query.franchise_id)?;
    Ok(HttpResponse::Ok().json(packages))
}

#[get("/packages/{id}")]
async fn get_package(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let package = services::pricing::get_package(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(package))
}

#[post("/packages")]
async fn create_package(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<PackageForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let package = services::pricing::create_package(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Created().json(package))
}

#[put("/packages/{id}")]
async fn update_package(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    form: web::Json<PackageForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let package = services::pricing::update_package(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(package))
}

#[post("/package-variants")]
async fn create_variant(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<PackageVariantForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let variant = services::pricing::create_variant(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Created().json(variant))
}

#[put("/package-variants/{id}")]
async fn update_variant(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    form: web::Json<PackageVariantForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let variant = services::pricing::update_variant(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(variant))
}

#[get("/distance-pricing")]
async fn list_distance_tiers(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let tiers =
        services::pricing::list_distance_tiers(repo.get_ref(), &user, query.franchise_id)?;
    Ok(HttpResponse::Ok().json(tiers))
}

#[post("/distance-pricing")]
async fn save_distance_tiers(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<DistanceTiersForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let saved = services::pricing::save_distance_tiers(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "saved": saved })))
}

#[derive(Debug, Deserialize)]
struct DistanceComputeParams {
    franchise_id: Option<i32>,
    variant_id: Option<i32>,
    km: f64,
}

#[get("/distance-pricing/compute")]
async fn compute_distance_addon(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<DistanceComputeParams>,
) -> Result<HttpResponse, ServiceError> {
    let query = query.into_inner();
    let quote = services::pricing::compute_distance_addon(
        repo.get_ref(),
        &user,
        query.variant_id,
        query.km,
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(quote))
}
