use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::domain::notification::NotificationStatus;
use crate::forms::notification::NotifyForm;
use crate::repository::DieselRepository;
use crate::routes::ScopeQuery;
use crate::services::notification::NotificationListParams;
use crate::services::{self, ServiceError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(notify)
        .service(test_connection)
        .service(list_notifications);
}

#[post("/whatsapp/notify")]
async fn notify(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<NotifyForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let log = services::notification::send_notification(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )
    .await?;
    Ok(HttpResponse::Ok().json(log))
}

#[post("/whatsapp/test-connection")]
async fn test_connection(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    services::notification::test_connection(repo.get_ref(), &user, query.franchise_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

#[derive(Debug, Deserialize)]
struct NotificationQueryParams {
    franchise_id: Option<i32>,
    booking_id: Option<i32>,
    status: Option<NotificationStatus>,
    page: Option<usize>,
}

#[get("/notifications")]
async fn list_notifications(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<NotificationQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let query = query.into_inner();
    let logs = services::notification::list_notifications(
        repo.get_ref(),
        &user,
        NotificationListParams {
            franchise_id: query.franchise_id,
            booking_id: query.booking_id,
            status: query.status,
            page: query.page.unwrap_or(1),
        },
    )?;
    Ok(HttpResponse::Ok().json(logs))
}
