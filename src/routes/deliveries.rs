use actix_web::{HttpResponse, get, patch, post, put, web};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::domain::delivery::DeliveryStatus;
use crate::forms::delivery::{
    AssignDeliveryForm, CreateDeliveryForm, DeliveryStatusForm, UpdateDeliveryForm,
};
use crate::repository::DieselRepository;
use crate::routes::ScopeQuery;
use crate::services::delivery::DeliveryListParams;
use crate::services::{self, ServiceError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_deliveries)
        .service(get_delivery)
        .service(create_delivery)
        .service(update_delivery)
        .service(assign_delivery)
        .service(transition_delivery);
}

#[derive(Debug, Deserialize)]
struct DeliveryListQueryParams {
    franchise_id: Option<i32>,
    status: Option<DeliveryStatus>,
    booking_id: Option<i32>,
    assigned_to: Option<i32>,
    page: Option<usize>,
}

#[get("/deliveries")]
async fn list_deliveries(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<DeliveryListQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let query = query.into_inner();
    let deliveries = services::delivery::list_deliveries(
        repo.get_ref(),
        &user,
        DeliveryListParams {
            franchise_id: query.franchise_id,
            status: query.status,
            booking_id: query.booking_id,
            assigned_to: query.assigned_to,
            page: query.page.unwrap_or(1),
        },
    )?;
    Ok(HttpResponse::Ok().json(deliveries))
}

#[get("/deliveries/{id}")]
async fn get_delivery(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let delivery = services::delivery::get_delivery(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(delivery))
}

#[post("/deliveries")]
async fn create_delivery(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<CreateDeliveryForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let delivery = services::delivery::create_delivery(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Created().json(delivery))
}

#[put("/deliveries/{id}")]
async fn update_delivery(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    form: web::Json<UpdateDeliveryForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let delivery = services::delivery::update_delivery(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(delivery))
}

#[post("/deliveries/{id}/assign")]
async fn assign_delivery(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    form: web::Json<AssignDeliveryForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let delivery = services::delivery::assign_delivery(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(delivery))
}

#[patch("/deliveries/{id}/status")]
async fn transition_delivery(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    form: web::Json<DeliveryStatusForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let delivery = services::delivery::transition_delivery(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(delivery))
}
