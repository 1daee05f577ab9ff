use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::domain::laundry::LaundryStatus;
use crate::forms::laundry::{
    CreateLaundryBatchForm, ReceiveLaundryBatchForm, SendLaundryBatchForm,
};
use crate::repository::DieselRepository;
use crate::routes::ScopeQuery;
use crate::services::laundry::LaundryListParams;
use crate::services::{self, ServiceError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_batches)
        .service(get_batch)
        .service(create_batch)
        .service(send_batch)
        .service(receive_batch)
        .service(cancel_batch);
}

#[derive(Debug, Deserialize)]
struct LaundryListQueryParams {
    franchise_id: Option<i32>,
    status: Option<LaundryStatus>,
    page: Option<usize>,
}

#[get("/laundry")]
async fn list_batches(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<LaundryListQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let query = query.into_inner();
    let batches = services::laundry::list_laundry_batches(
        repo.get_ref(),
        &user,
        LaundryListParams {
            franchise_id: query.franchise_id,
            status: query.status,
            page: query.page.unwrap_or(1),
        },
    )?;
    Ok(HttpResponse::Ok().json(batches))
}

#[get("/laundry/{id}")]
async fn get_batch(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let batch = services::laundry::get_laundry_batch(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(batch))
}

#[post("/laundry")]
async fn create_batch(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<CreateLaundryBatchForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let batch = services::laundry::create_laundry_batch(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Created().json(batch))
}

#[post("/laundry/{id}/send")]
async fn send_batch(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    form: web::Json<SendLaundryBatchForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let batch = services::laundry::send_laundry_batch(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(batch))
}

#[post("/laundry/{id}/receive")]
async fn receive_batch(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    form: web::Json<ReceiveLaundryBatchForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let batch = services::laundry::receive_laundry_batch(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(batch))
}

#[post("/laundry/{id}/cancel")]
async fn cancel_batch(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let batch = services::laundry::cancel_laundry_batch(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(batch))
}
