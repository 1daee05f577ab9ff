//! Laundry batches: manual send-outs plus receipt handling for batches
//! opened automatically by return processing.

use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::laundry::{LaundryBatch, LaundryStatus, NewLaundryBatch};
use crate::domain::user::{Module, Role};
use crate::dto::Paginated;
use crate::dto::laundry::LaundryBatchDetail;
use crate::forms::laundry::{CreateLaundryBatchForm, ReceiveLaundryBatchForm, SendLaundryBatchForm};
use crate::repository::{LaundryListQuery, LaundryReader, LaundryWriter, ProductReader};
use crate::services::{DEFAULT_ITEMS_PER_PAGE, ServiceError, ServiceResult, document_number};

pub struct LaundryListParams {
    pub franchise_id: Option<i32>,
    pub status: Option<LaundryStatus>,
    pub page: usize,
}

/// Opens a manual batch. Items move from available stock to the laundry
/// bucket, so each product needs that many units on hand.
pub fn create_laundry_batch<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateLaundryBatchForm,
    franchise_id: Option<i32>,
) -> ServiceResult<LaundryBatch>
where
    R: LaundryWriter + ProductReader + ?Sized,
{
    user.ensure(Role::Staff, Module::Laundry)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;

    for item in &form.items {
        if item.quantity <= 0 {
            return Err(ServiceError::Validation(
                "laundry quantity must be greater than zero".to_string(),
            ));
        }
        let product = repo
            .get_product_by_id(item.product_id, franchise_id)?
            .ok_or_else(|| {
                ServiceError::Validation(format!("product {} not found", item.product_id))
            })?;
        if product.stock.available < item.quantity {
            return Err(ServiceError::Validation(format!(
                "only {} of {} available to send to laundry",
                product.stock.available, product.product_code
            )));
        }
    }

    Ok(repo.create_laundry_batch(
        &NewLaundryBatch {
            franchise_id,
            batch_number: document_number("LB-"),
            auto_created: false,
            return_id: None,
            expected_date: form.expected_date,
            notes: form.notes,
        },
        &form.items,
    )?)
}

pub fn list_laundry_batches<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: LaundryListParams,
) -> ServiceResult<Paginated<LaundryBatch>>
where
    R: LaundryReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Laundry)?;
    let franchise_id = user.franchise_for(params.franchise_id)?;

    let page = params.page.max(1);
    let mut query = LaundryListQuery::new(franchise_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(status) = params.status {
        query = query.status(status);
    }

    let (total, batches) = repo.list_laundry_batches(query)?;
    Ok(Paginated::new(total, page, DEFAULT_ITEMS_PER_PAGE, batches))
}

pub fn get_laundry_batch<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<LaundryBatchDetail>
where
    R: LaundryReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Laundry)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    repo.get_laundry_batch_by_id(id, franchise_id)?
        .map(LaundryBatchDetail::from)
        .ok_or(ServiceError::NotFound)
}

pub fn send_laundry_batch<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: SendLaundryBatchForm,
    franchise_id: Option<i32>,
) -> ServiceResult<LaundryBatch>
where
    R: LaundryReader + LaundryWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Laundry)?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let (batch, _) = repo
        .get_laundry_batch_by_id(id, franchise_id)?
        .ok_or(ServiceError::NotFound)?;
    if !batch.status.can_transition_to(LaundryStatus::InLaundry) {
        return Err(ServiceError::Validation(format!(
            "cannot send a batch that is {}",
            batch.status
        )));
    }

    Ok(repo.send_laundry_batch(id, franchise_id, form.expected_date)?)
}

/// Books the batch back in. Receipt lines are matched by product; items
/// without a line come back undamaged.
pub fn receive_laundry_batch<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: ReceiveLaundryBatchForm,
    franchise_id: Option<i32>,
) -> ServiceResult<LaundryBatch>
where
    R: LaundryReader + LaundryWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Laundry)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let (batch, items) = repo
        .get_laundry_batch_by_id(id, franchise_id)?
        .ok_or(ServiceError::NotFound)?;
    if !batch.status.can_transition_to(LaundryStatus::Received) {
        return Err(ServiceError::Validation(format!(
            "cannot receive a batch that is {}",
            batch.status
        )));
    }

    for receipt in &form.receipts {
        let Some(item) = items.iter().find(|i| i.product_id == receipt.product_id) else {
            return Err(ServiceError::Validation(format!(
                "product {} is not part of this batch",
                receipt.product_id
            )));
        };
        if receipt.qty_damaged < 0 || receipt.qty_damaged > item.quantity {
            return Err(ServiceError::Validation(format!(
                "damaged quantity for product {} must be between 0 and {}",
                receipt.product_id, item.quantity
            )));
        }
    }

    Ok(repo.receive_laundry_batch(id, franchise_id, &form.receipts)?)
}

pub fn cancel_laundry_batch<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<LaundryBatch>
where
    R: LaundryReader + LaundryWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Laundry)?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let (batch, _) = repo
        .get_laundry_batch_by_id(id, franchise_id)?
        .ok_or(ServiceError::NotFound)?;
    if !batch.status.can_transition_to(LaundryStatus::Cancelled) {
        return Err(ServiceError::Validation(format!(
            "cannot cancel a batch that is {}",
            batch.status
        )));
    }

    Ok(repo.cancel_laundry_batch(id, franchise_id)?)
}
