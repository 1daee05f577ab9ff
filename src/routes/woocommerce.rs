use actix_web::{HttpResponse, get, post, web};

use crate::auth::AuthenticatedUser;
use crate::forms::settings::WoocommerceSettingsForm;
use crate::repository::DieselRepository;
use crate::routes::ScopeQuery;
use crate::services::{self, ServiceError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_config)
        .service(save_config)
        .service(sync_products)
        .service(sync_stock)
        .service(sync_from_store);
}

#[get("/woocommerce/config")]
async fn get_config(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let settings =
        services::settings::get_woocommerce_settings(repo.get_ref(), &user, query.franchise_id)?;
    Ok(HttpResponse::Ok().json(settings))
}

#[post("/woocommerce/config")]
async fn save_config(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<WoocommerceSettingsForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let settings = services::settings::save_woocommerce_settings(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(settings))
}

#[post("/woocommerce/sync-products")]
async fn sync_products(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let report =
        services::woocommerce::sync_products(repo.get_ref(), &user, query.franchise_id).await?;
    Ok(HttpResponse::Ok().json(report))
}

#[post("/woocommerce/sync-stock")]
async fn sync_stock(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let report =
        services::woocommerce::sync_stock(repo.get_ref(), &user, query.franchise_id).await?;
    Ok(HttpResponse::Ok().json(report))
}

#[post("/woocommerce/sync-from-woocommerce")]
async fn sync_from_store(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let report =
        services::woocommerce::sync_from_store(repo.get_ref(), &user, query.franchise_id).await?;
    Ok(HttpResponse::Ok().json(report))
}
