use actix_web::{HttpResponse, get, patch, post, web};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::domain::booking::{BookingKind, BookingStatus};
use crate::forms::booking::{CreateBookingForm, QuoteStatusForm, UpdateBookingForm};
use crate::repository::DieselRepository;
use crate::routes::ScopeQuery;
use crate::services::booking::BookingListParams;
use crate::services::{self, ServiceError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_bookings)
        .service(list_quotes)
        .service(create_booking)
        .service(create_quote)
        .service(get_booking)
        .service(update_booking)
        .service(cancel_booking)
        .service(set_booking_archived)
        .service(update_quote_status)
        .service(convert_quote);
}

#[derive(Debug, Deserialize)]
struct BookingListQueryParams {
    franchise_id: Option<i32>,
    status: Option<BookingStatus>,
    kind: Option<BookingKind>,
    customer_id: Option<i32>,
    #[serde(default)]
    include_archived: bool,
    page: Option<usize>,
}

impl BookingListQueryParams {
    fn into_params(self, quotes: bool) -> BookingListParams {
        BookingListParams {
            franchise_id: self.franchise_id,
            quotes,
            status: self.status,
            kind: self.kind,
            customer_id: self.customer_id,
            include_archived: self.include_archived,
            page: self.page.unwrap_or(1),
        }
    }
}

#[get("/bookings")]
async fn list_bookings(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<BookingListQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let bookings =
        services::booking::list_bookings(repo.get_ref(), &user, query.into_inner().into_params(false))?;
    Ok(HttpResponse::Ok().json(bookings))
}

#[get("/quotes")]
async fn list_quotes(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<BookingListQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let quotes =
        services::booking::list_bookings(repo.get_ref(), &user, query.into_inner().into_params(true))?;
    Ok(HttpResponse::Ok().json(quotes))
}

#[post("/bookings")]
async fn create_booking(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<CreateBookingForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let booking = services::booking::create_booking(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Created().json(booking))
}

#[post("/quotes")]
async fn create_quote(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<CreateBookingForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let mut form = form.into_inner();
    form.is_quote = true;
    let quote =
        services::booking::create_booking(repo.get_ref(), &user, form, query.franchise_id)?;
    Ok(HttpResponse::Created().json(quote))
}

#[get("/bookings/{id}")]
async fn get_booking(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let booking = services::booking::get_booking(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(booking))
}

#[patch("/bookings/{id}")]
async fn update_booking(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    form: web::Json<UpdateBookingForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let booking = services::booking::update_booking(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(booking))
}

#[post("/bookings/{id}/cancel")]
async fn cancel_booking(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let booking = services::booking::cancel_booking(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(booking))
}

#[derive(Debug, Deserialize)]
struct ArchiveFlagForm {
    archived: bool,
}

#[post("/bookings/{id}/archive")]
async fn set_booking_archived(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    form: web::Json<ArchiveFlagForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let booking = services::booking::set_booking_archived(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.archived,
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(booking))
}

#[patch("/quotes/{id}/status")]
async fn update_quote_status(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    form: web::Json<QuoteStatusForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let quote = services::booking::update_quote_status(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(quote))
}

#[post("/quotes/{id}/convert")]
async fn convert_quote(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let booking = services::booking::convert_quote(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Created().json(booking))
}
