use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::domain::returns::ReturnStatus;
use crate::forms::returns::{ProcessReturnForm, ScheduleReturnForm};
use crate::repository::DieselRepository;
use crate::routes::ScopeQuery;
use crate::services::returns::ReturnListParams;
use crate::services::{self, ServiceError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_returns)
        .service(get_return)
        .service(get_return_preview)
        .service(process_return)
        .service(schedule_return)
        .service(cancel_return);
}

#[derive(Debug, Deserialize)]
struct ReturnListQueryParams {
    franchise_id: Option<i32>,
    status: Option<ReturnStatus>,
    booking_id: Option<i32>,
    page: Option<usize>,
}

#[get("/returns")]
async fn list_returns(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ReturnListQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let query = query.into_inner();
    let returns = services::returns::list_returns(
        repo.get_ref(),
        &user,
        ReturnListParams {
            franchise_id: query.franchise_id,
            status: query.status,
            booking_id: query.booking_id,
            page: query.page.unwrap_or(1),
        },
    )?;
    Ok(HttpResponse::Ok().json(returns))
}

#[get("/returns/{id}")]
async fn get_return(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let (record, items) = services::returns::get_return(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(json!({ "return": record, "items": items })))
}

#[get("/returns/{id}/preview")]
async fn get_return_preview(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let lines = services::returns::get_return_preview(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(lines))
}

#[post("/returns/{id}/process")]
async fn process_return(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    form: web::Json<ProcessReturnForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let record = services::returns::process_return(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(record))
}

#[post("/returns/{id}/schedule")]
async fn schedule_return(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    form: web::Json<ScheduleReturnForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let record = services::returns::schedule_return(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(record))
}

#[post("/returns/{id}/cancel")]
async fn cancel_return(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let record = services::returns::cancel_return(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(record))
}
