use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::domain::franchise::UpdateFranchise;
use crate::forms::franchise::CreateFranchiseForm;
use crate::repository::DieselRepository;
use crate::services::{self, ServiceError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_franchises)
        .service(get_franchise)
        .service(create_franchise)
        .service(update_franchise)
        .service(delete_franchise);
}

#[get("/franchises")]
async fn list_franchises(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ServiceError> {
    let franchises = services::franchise::list_franchises(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(franchises))
}

#[get("/franchises/{id}")]
async fn get_franchise(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, ServiceError> {
    let franchise = services::franchise::get_franchise(repo.get_ref(), &user, path.into_inner())?;
    Ok(HttpResponse::Ok().json(franchise))
}

#[post("/franchises")]
async fn create_franchise(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<CreateFranchiseForm>,
) -> Result<HttpResponse, ServiceError> {
    let franchise =
        services::franchise::create_franchise(repo.get_ref(), &user, form.into_inner())?;
    Ok(HttpResponse::Created().json(franchise))
}

#[put("/franchises/{id}")]
async fn update_franchise(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    updates: web::Json<UpdateFranchise>,
) -> Result<HttpResponse, ServiceError> {
    let franchise = services::franchise::update_franchise(
        repo.get_ref(),
        &user,
        path.into_inner(),
        updates.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(franchise))
}

#[delete("/franchises/{id}")]
async fn delete_franchise(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, ServiceError> {
    services::franchise::delete_franchise(repo.get_ref(), &user, path.into_inner())?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}
