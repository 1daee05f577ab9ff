use actix_web::{HttpResponse, delete, get, post, web};
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::domain::settings::{NewBankingDetails, UpdateCompanySettings};
use crate::forms::settings::WhatsappSettingsForm;
use crate::repository::DieselRepository;
use crate::routes::ScopeQuery;
use crate::services::{self, ServiceError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_company_settings)
        .service(save_company_settings)
        .service(list_banking_details)
        .service(create_banking_details)
        .service(set_default_banking_details)
        .service(delete_banking_details)
        .service(get_whatsapp_settings)
        .service(save_whatsapp_settings);
}

#[get("/settings/company")]
async fn get_company_settings(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let settings =
        services::settings::get_company_settings(repo.get_ref(), &user, query.franchise_id)?;
    Ok(HttpResponse::Ok().json(settings))
}

#[post("/settings/company")]
async fn save_company_settings(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    updates: web::Json<UpdateCompanySettings>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let settings = services::settings::save_company_settings(
        repo.get_ref(),
        &user,
        updates.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(settings))
}

#[get("/settings/banking")]
async fn list_banking_details(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let details =
        services::settings::list_banking_details(repo.get_ref(), &user, query.franchise_id)?;
    Ok(HttpResponse::Ok().json(details))
}

#[post("/settings/banking")]
async fn create_banking_details(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    details: web::Json<NewBankingDetails>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let created = services::settings::create_banking_details(
        repo.get_ref(),
        &user,
        details.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Created().json(created))
}

#[post("/settings/banking/{id}/default")]
async fn set_default_banking_details(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let details = services::settings::set_default_banking_details(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(details))
}

#[delete("/settings/banking/{id}")]
async fn delete_banking_details(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    services::settings::delete_banking_details(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

#[get("/settings/whatsapp")]
async fn get_whatsapp_settings(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let settings =
        services::settings::get_whatsapp_settings(repo.get_ref(), &user, query.franchise_id)?;
    Ok(HttpResponse::Ok().json(settings))
}

#[post("/settings/whatsapp")]
async fn save_whatsapp_settings(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<WhatsappSettingsForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let settings = services::settings::save_whatsapp_settings(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(settings))
}
