//! Delivery scheduling and the delivered/cancelled status machine.

use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::booking::{BookingStatus, BookingType};
use crate::domain::delivery::{Delivery, DeliveryStatus, NewDelivery, UpdateDelivery};
use crate::domain::user::{Module, Role};
use crate::dto::Paginated;
use crate::dto::delivery::DeliveryRow;
use crate::forms::delivery::{
    AssignDeliveryForm, CreateDeliveryForm, DeliveryStatusForm, UpdateDeliveryForm,
};
use crate::repository::{BookingReader, DeliveryListQuery, DeliveryReader, DeliveryWriter};
use crate::services::{DEFAULT_ITEMS_PER_PAGE, ServiceError, ServiceResult, document_number};

pub struct DeliveryListParams {
    pub franchise_id: Option<i32>,
    pub status: Option<DeliveryStatus>,
    pub booking_id: Option<i32>,
    pub assigned_to: Option<i32>,
    pub page: usize,
}

pub fn create_delivery<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateDeliveryForm,
    franchise_id: Option<i32>,
) -> ServiceResult<Delivery>
where
    R: DeliveryWriter + BookingReader + ?Sized,
{
    user.ensure(Role::Staff, Module::Deliveries)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let booking = repo
        .get_booking_by_id(form.booking_id, franchise_id)?
        .ok_or_else(|| ServiceError::Validation("booking not found".to_string()))?;
    if booking.is_quote {
        return Err(ServiceError::Validation(
            "quotes cannot be scheduled for delivery".to_string(),
        ));
    }
    if booking.status.is_terminal() || booking.status == BookingStatus::Returned {
        return Err(ServiceError::Validation(format!(
            "booking in status {} cannot be delivered",
            booking.status
        )));
    }

    Ok(repo.create_delivery(&NewDelivery {
        franchise_id,
        booking_id: booking.id,
        delivery_number: document_number("DEL-"),
        booking_type: booking.booking_type,
        scheduled_date: form.scheduled_date,
        scheduled_time: form.scheduled_time,
        delivery_address: form.delivery_address,
        assigned_to: form.assigned_to,
        special_instructions: form.special_instructions,
    })?)
}

pub fn list_deliveries<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: DeliveryListParams,
) -> ServiceResult<Paginated<DeliveryRow>>
where
    R: DeliveryReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Deliveries)?;
    let franchise_id = user.franchise_for(params.franchise_id)?;

    let page = params.page.max(1);
    let mut query = DeliveryListQuery::new(franchise_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(status) = params.status {
        query = query.status(status);
    }
    if let Some(booking_id) = params.booking_id {
        query = query.booking(booking_id);
    }
    if let Some(assigned_to) = params.assigned_to {
        query = query.assigned_to(assigned_to);
    }

    let (total, rows) = repo.list_deliveries(query)?;
    Ok(Paginated::new(
        total,
        page,
        DEFAULT_ITEMS_PER_PAGE,
        rows.into_iter().map(DeliveryRow::from).collect(),
    ))
}

pub fn get_delivery<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<Delivery>
where
    R: DeliveryReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Deliveries)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    repo.get_delivery_by_id(id, franchise_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn update_delivery<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: UpdateDeliveryForm,
    franchise_id: Option<i32>,
) -> ServiceResult<Delivery>
where
    R: DeliveryReader + DeliveryWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Deliveries)?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let delivery = repo
        .get_delivery_by_id(id, franchise_id)?
        .ok_or(ServiceError::NotFound)?;
    if delivery.status.is_terminal() {
        return Err(ServiceError::Validation(format!(
            "delivery is already {}",
            delivery.status
        )));
    }

    Ok(repo.update_delivery(
        id,
        franchise_id,
        &UpdateDelivery {
            scheduled_date: form.scheduled_date,
            scheduled_time: form.scheduled_time,
            delivery_address: form.delivery_address,
            assigned_to: None,
            special_instructions: form.special_instructions,
        },
    )?)
}

pub fn assign_delivery<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: AssignDeliveryForm,
    franchise_id: Option<i32>,
) -> ServiceResult<Delivery>
where
    R: DeliveryReader + DeliveryWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Deliveries)?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let delivery = repo
        .get_delivery_by_id(id, franchise_id)?
        .ok_or(ServiceError::NotFound)?;
    if delivery.status.is_terminal() {
        return Err(ServiceError::Validation(format!(
            "delivery is already {}",
            delivery.status
        )));
    }

    Ok(repo.update_delivery(
        id,
        franchise_id,
        &UpdateDelivery {
            assigned_to: Some(form.assigned_to),
            ..UpdateDelivery::default()
        },
    )?)
}

/// Moves the delivery along its status machine. Delivering a rental confirms
/// the reserved stock as out with the customer and opens a return; delivering
/// a sale booking completes the order.
pub fn transition_delivery<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: DeliveryStatusForm,
    franchise_id: Option<i32>,
) -> ServiceResult<Delivery>
where
    R: DeliveryReader + DeliveryWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Deliveries)?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let delivery = repo
        .get_delivery_by_id(id, franchise_id)?
        .ok_or(ServiceError::NotFound)?;
    if !delivery.status.can_transition_to(form.status) {
        return Err(ServiceError::Validation(format!(
            "cannot move delivery from {} to {}",
            delivery.status, form.status
        )));
    }

    let return_number = (form.status == DeliveryStatus::Delivered
        && delivery.booking_type == BookingType::Rental)
        .then(|| document_number("RET-"));

    Ok(repo.transition_delivery(
        id,
        franchise_id,
        form.status,
        form.notes.as_deref(),
        return_number.as_deref(),
        user.id(),
    )?)
}
