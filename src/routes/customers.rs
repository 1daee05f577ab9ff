use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::domain::customer::{CustomerStatus, UpdateCustomer};
use crate::forms::customer::CreateCustomerForm;
use crate::repository::DieselRepository;
use crate::routes::ScopeQuery;
use crate::services::customer::CustomerListParams;
use crate::services::{self, ServiceError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_customers)
        .service(get_customer)
        .service(create_customer)
        .service(update_customer)
        .service(delete_customer);
}

#[derive(Debug, Deserialize)]
struct CustomerListQueryParams {
    franchise_id: Option<i32>,
    search: Option<String>,
    status: Option<CustomerStatus>,
    page: Option<usize>,
}

#[get("/customers")]
async fn list_customers(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<CustomerListQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let query = query.into_inner();
    let customers = services::customer::list_customers(
        repo.get_ref(),
        &user,
        CustomerListParams {
            franchise_id: query.franchise_id,
            search: query.search,
            status: query.status,
            page: query.page.unwrap_or(1),
        },
    )?;
    Ok(HttpResponse::Ok().json(customers))
}

#[get("/customers/{id}")]
async fn get_customer(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let customer = services::customer::get_customer(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(customer))
}

#[post("/customers")]
async fn create_customer(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<CreateCustomerForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let customer = services::customer::create_customer(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Created().json(customer))
}

#[patch("/customers/{id}")]
async fn update_customer(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    updates: web::Json<UpdateCustomer>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let customer = services::customer::update_customer(
        repo.get_ref(),
        &user,
        path.into_inner(),
        updates.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(customer))
}

#[delete("/customers/{id}")]
async fn delete_customer(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    services::customer::delete_customer(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}
