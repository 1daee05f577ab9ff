use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::forms::inventory::InventoryMovementForm;
use crate::forms::product::StockAdjustmentForm;
use crate::repository::DieselRepository;
use crate::routes::ScopeQuery;
use crate::services::{self, ServiceError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(reserve)
        .service(list_transactions)
        .service(adjust_stock)
        .service(export_stock)
        .service(import_products);
}

#[post("/inventory/reserve")]
async fn reserve(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<InventoryMovementForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    services::product::apply_inventory_operation(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "ok": true })))
}

#[derive(Debug, Deserialize)]
struct TransactionQueryParams {
    franchise_id: Option<i32>,
    product_id: Option<i32>,
    transaction_type: Option<String>,
}

#[get("/inventory/transactions")]
async fn list_transactions(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<TransactionQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let query = query.into_inner();
    let transactions = services::product::list_transactions(
        repo.get_ref(),
        &user,
        query.franchise_id,
        query.product_id,
        query.transaction_type,
    )?;
    Ok(HttpResponse::Ok().json(transactions))
}

#[post("/inventory/adjust")]
async fn adjust_stock(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<StockAdjustmentForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let product = services::product::adjust_stock(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(product))
}

#[get("/inventory/export")]
async fn export_stock(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let csv = services::product::export_stock_csv(repo.get_ref(), &user, query.franchise_id)?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .body(csv))
}

#[post("/inventory/import")]
async fn import_products(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    body: web::Bytes,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let report =
        services::product::import_products_csv(repo.get_ref(), &user, &body, query.franchise_id)?;
    Ok(HttpResponse::Ok().json(report))
}
