use actix_web::{HttpResponse, delete, get, post, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::forms::payroll::{AttendanceForm, SalaryAdjustmentForm, SalaryConfigForm};
use crate::repository::DieselRepository;
use crate::routes::ScopeQuery;
use crate::services::payroll::AttendanceListParams;
use crate::services::{self, ServiceError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(monthly_report)
        .service(list_attendance)
        .service(record_attendance)
        .service(list_salary_configs)
        .service(save_salary_config)
        .service(list_salary_adjustments)
        .service(create_salary_adjustment)
        .service(delete_salary_adjustment);
}

#[derive(Debug, Deserialize)]
struct PayrollMonthParams {
    franchise_id: Option<i32>,
    month: String,
}

#[get("/payroll")]
async fn monthly_report(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<PayrollMonthParams>,
) -> Result<HttpResponse, ServiceError> {
    let report = services::payroll::monthly_report(
        repo.get_ref(),
        &user,
        &query.month,
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(report))
}

#[derive(Debug, Deserialize)]
struct AttendanceQueryParams {
    franchise_id: Option<i32>,
    user_id: Option<i32>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

#[get("/payroll/attendance")]
async fn list_attendance(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<AttendanceQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let query = query.into_inner();
    let records = services::payroll::list_attendance(
        repo.get_ref(),
        &user,
        AttendanceListParams {
            franchise_id: query.franchise_id,
            user_id: query.user_id,
            from: query.from,
            to: query.to,
        },
    )?;
    Ok(HttpResponse::Ok().json(records))
}

#[post("/payroll/attendance")]
async fn record_attendance(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<AttendanceForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let record = services::payroll::record_attendance(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Created().json(record))
}

#[get("/payroll/salary-configs")]
async fn list_salary_configs(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let configs =
        services::payroll::list_salary_configs(repo.get_ref(), &user, query.franchise_id)?;
    Ok(HttpResponse::Ok().json(configs))
}

#[post("/payroll/salary-configs")]
async fn save_salary_config(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<SalaryConfigForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let config = services::payroll::save_salary_config(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Created().json(config))
}

#[get("/payroll/adjustments")]
async fn list_salary_adjustments(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<PayrollMonthParams>,
) -> Result<HttpResponse, ServiceError> {
    let adjustments = services::payroll::list_salary_adjustments(
        repo.get_ref(),
        &user,
        &query.month,
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(adjustments))
}

#[post("/payroll/adjustments")]
async fn create_salary_adjustment(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<SalaryAdjustmentForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let adjustment = services::payroll::create_salary_adjustment(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Created().json(adjustment))
}

#[delete("/payroll/adjustments/{id}")]
async fn delete_salary_adjustment(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    services::payroll::delete_salary_adjustment(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}
