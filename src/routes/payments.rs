use actix_web::{HttpResponse, get, post, web};

use crate::auth::AuthenticatedUser;
use crate::forms::notification::NotifyForm;
use crate::forms::payment::{InvoiceSequenceForm, RecordPaymentForm};
use crate::repository::DieselRepository;
use crate::routes::ScopeQuery;
use crate::services::{self, ServiceError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(record_payment)
        .service(get_settlement)
        .service(issue_invoice)
        .service(get_invoice_sequence)
        .service(set_invoice_sequence);
}

#[post("/bookings/{id}/payments")]
async fn record_payment(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    form: web::Json<RecordPaymentForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let mut form = form.into_inner();
    form.booking_id = path.into_inner();
    let payment =
        services::payment::record_payment(repo.get_ref(), &user, form, query.franchise_id)?;

    // Best effort: tell the customer over WhatsApp. A failure here never
    // fails the payment itself.
    if let Err(err) =
        notify_payment_received(repo.get_ref(), &user, payment.booking_id, query.franchise_id)
            .await
    {
        log::warn!(
            "payment recorded for booking {} but the WhatsApp notification was skipped: {err}",
            payment.booking_id
        );
    }

    Ok(HttpResponse::Created().json(payment))
}

async fn notify_payment_received(
    repo: &DieselRepository,
    user: &AuthenticatedUser,
    booking_id: i32,
    franchise_id: Option<i32>,
) -> Result<(), ServiceError> {
    let settlement = services::payment::get_settlement(repo, user, booking_id, franchise_id)?;
    let detail = services::booking::get_booking(repo, user, booking_id, franchise_id)?;
    let customer =
        services::customer::get_customer(repo, user, detail.booking.customer_id, franchise_id)?;
    let Some(phone) = customer.whatsapp_number.filter(|p| !p.is_empty()) else {
        return Ok(());
    };

    let amount_paid = settlement
        .payments
        .last()
        .map(|p| p.amount)
        .unwrap_or_default();
    services::notification::send_notification(
        repo,
        user,
        NotifyForm::PaymentReceived {
            phone,
            customer_name: customer.name,
            booking_number: settlement.booking_number,
            amount_paid,
            remaining_balance: settlement.balance_due,
            booking_id: Some(booking_id),
        },
        franchise_id,
    )
    .await?;
    Ok(())
}

#[get("/bookings/{id}/payments")]
async fn get_settlement(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let settlement = services::payment::get_settlement(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(settlement))
}

#[post("/bookings/{id}/invoice")]
async fn issue_invoice(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let invoice = services::payment::issue_invoice(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Created().json(invoice))
}

#[get("/invoice-sequences")]
async fn get_invoice_sequence(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let sequence =
        services::payment::get_invoice_sequence(repo.get_ref(), &user, query.franchise_id)?;
    Ok(HttpResponse::Ok().json(sequence))
}

#[post("/invoice-sequences")]
async fn set_invoice_sequence(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<InvoiceSequenceForm>,
) -> Result<HttpResponse, ServiceError> {
    let sequence =
        services::payment::set_invoice_sequence(repo.get_ref(), &user, form.into_inner())?;
    Ok(HttpResponse::Ok().json(sequence))
}
