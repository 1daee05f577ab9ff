use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::forms::sale::CreateSaleForm;
use crate::repository::DieselRepository;
use crate::routes::ScopeQuery;
use crate::services::sale::SaleListParams;
use crate::services::{self, ServiceError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_sales).service(get_sale).service(create_sale);
}

#[derive(Debug, Deserialize)]
struct SaleListQueryParams {
    franchise_id: Option<i32>,
    customer_id: Option<i32>,
    page: Option<usize>,
}

#[get("/sales")]
async fn list_sales(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<SaleListQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let query = query.into_inner();
    let sales = services::sale::list_sales(
        repo.get_ref(),
        &user,
        SaleListParams {
            franchise_id: query.franchise_id,
            customer_id: query.customer_id,
            page: query.page.unwrap_or(1),
        },
    )?;
    Ok(HttpResponse::Ok().json(sales))
}

#[get("/sales/{id}")]
async fn get_sale(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let sale =
        services::sale::get_sale(repo.get_ref(), &user, path.into_inner(), query.franchise_id)?;
    Ok(HttpResponse::Ok().json(sale))
}

#[post("/sales")]
async fn create_sale(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<CreateSaleForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let sale = services::sale::create_sale(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Created().json(sale))
}
