use actix_web::{HttpResponse, delete, get, post, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::forms::expense::{ExpenseCategoryForm, ExpenseForm};
use crate::repository::DieselRepository;
use crate::routes::ScopeQuery;
use crate::services::expense::ExpenseListParams;
use crate::services::{self, ServiceError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_expenses)
        .service(create_expense)
        .service(delete_expense)
        .service(list_categories)
        .service(create_category)
        .service(delete_category)
        .service(dashboard_stats);
}

#[derive(Debug, Deserialize)]
struct ExpenseListQueryParams {
    franchise_id: Option<i32>,
    category_id: Option<i32>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    page: Option<usize>,
}

#[get("/expenses")]
async fn list_expenses(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ExpenseListQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let query = query.into_inner();
    let expenses = services::expense::list_expenses(
        repo.get_ref(),
        &user,
        ExpenseListParams {
            franchise_id: query.franchise_id,
            category_id: query.category_id,
            from: query.from,
            to: query.to,
            page: query.page.unwrap_or(1),
        },
    )?;
    Ok(HttpResponse::Ok().json(expenses))
}

#[post("/expenses")]
async fn create_expense(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<ExpenseForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let expense = services::expense::create_expense(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Created().json(expense))
}

#[delete("/expenses/{id}")]
async fn delete_expense(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    services::expense::delete_expense(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

#[get("/expense-categories")]
async fn list_categories(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let categories =
        services::expense::list_categories(repo.get_ref(), &user, query.franchise_id)?;
    Ok(HttpResponse::Ok().json(categories))
}

#[post("/expense-categories")]
async fn create_category(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<ExpenseCategoryForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let category = services::expense::create_category(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Created().json(category))
}

#[delete("/expense-categories/{id}")]
async fn delete_category(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    services::expense::delete_category(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

#[get("/dashboard/stats")]
async fn dashboard_stats(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let stats = services::expense::dashboard_stats(repo.get_ref(), &user, query.franchise_id)?;
    Ok(HttpResponse::Ok().json(stats))
}
