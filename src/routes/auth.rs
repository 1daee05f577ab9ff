use actix_web::{HttpResponse, get, post, web};
use serde_json::json;

use crate::auth::{AuthenticatedUser, expired_session_cookie, issue_session_token, session_cookie};
use crate::forms::auth::{ChangePasswordForm, LoginForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::{self, ServiceError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login)
        .service(logout)
        .service(change_password)
        .service(me);
}

#[post("/auth/login")]
async fn login(
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    form: web::Json<LoginForm>,
) -> Result<HttpResponse, ServiceError> {
    let (user, profile) = services::auth::login(repo.get_ref(), form.into_inner())?;
    let token = issue_session_token(&user, &config.secret)?;
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token))
        .json(profile))
}

#[post("/auth/logout")]
async fn logout() -> HttpResponse {
    HttpResponse::Ok()
        .cookie(expired_session_cookie())
        .json(json!({ "ok": true }))
}

#[post("/auth/change-password")]
async fn change_password(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<ChangePasswordForm>,
) -> Result<HttpResponse, ServiceError> {
    services::auth::change_password(repo.get_ref(), &user, form.into_inner())?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

#[get("/auth/me")]
async fn me(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ServiceError> {
    let profile = services::auth::me(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(profile))
}
