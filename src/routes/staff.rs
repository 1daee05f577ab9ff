use actix_web::{HttpResponse, get, patch, post, web};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::forms::staff::{CreateStaffForm, UpdateStaffForm};
use crate::repository::DieselRepository;
use crate::routes::ScopeQuery;
use crate::services::{self, ServiceError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_staff)
        .service(create_staff)
        .service(update_staff)
        .service(set_staff_status);
}

#[get("/staff")]
async fn list_staff(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let staff = services::staff::list_staff(repo.get_ref(), &user, query.franchise_id)?;
    Ok(HttpResponse::Ok().json(staff))
}

#[post("/staff")]
async fn create_staff(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<CreateStaffForm>,
) -> Result<HttpResponse, ServiceError> {
    let created = services::staff::create_staff(repo.get_ref(), &user, form.into_inner())?;
    Ok(HttpResponse::Created().json(created))
}

#[patch("/staff/{id}")]
async fn update_staff(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    form: web::Json<UpdateStaffForm>,
) -> Result<HttpResponse, ServiceError> {
    let updated = services::staff::update_staff(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(updated))
}

#[derive(Debug, Deserialize)]
struct StaffStatusForm {
    is_active: bool,
}

#[post("/staff/{id}/status")]
async fn set_staff_status(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    form: web::Json<StaffStatusForm>,
) -> Result<HttpResponse, ServiceError> {
    let updated =
        services::staff::set_staff_active(repo.get_ref(), &user, path.into_inner(), form.is_active)?;
    Ok(HttpResponse::Ok().json(updated))
}
