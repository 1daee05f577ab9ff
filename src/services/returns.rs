//! Return processing: every delivered unit must be reconciled before stock
//! moves back into the fleet.

use std::collections::HashMap;

use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::returns::{Return, ReturnItem, ReturnStatus};
use crate::domain::user::{Module, Role};
use crate::dto::Paginated;
use crate::dto::returns::{ReturnPreviewLine, ReturnRow};
use crate::forms::returns::{ProcessReturnForm, ScheduleReturnForm};
use crate::repository::{ReturnListQuery, ReturnReader, ReturnWriter};
use crate::services::{DEFAULT_ITEMS_PER_PAGE, ServiceError, ServiceResult, document_number};

pub struct ReturnListParams {
    pub franchise_id: Option<i32>,
    pub status: Option<ReturnStatus>,
    pub booking_id: Option<i32>,
    pub page: usize,
}

pub fn list_returns<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: ReturnListParams,
) -> ServiceResult<Paginated<ReturnRow>>
where
    R: ReturnReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Deliveries)?;
    let franchise_id = user.franchise_for(params.franchise_id)?;

    let page = params.page.max(1);
    let mut query = ReturnListQuery::new(franchise_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(status) = params.status {
        query = query.status(status);
    }
    if let Some(booking_id) = params.booking_id {
        query = query.booking(booking_id);
    }

    let (total, rows) = repo.list_returns(query)?;
    Ok(Paginated::new(
        total,
        page,
        DEFAULT_ITEMS_PER_PAGE,
        rows.into_iter().map(ReturnRow::from).collect(),
    ))
}

pub fn get_return<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<(Return, Vec<ReturnItem>)>
where
    R: ReturnReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Deliveries)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    let ret = repo
        .get_return_by_id(id, franchise_id)?
        .ok_or(ServiceError::NotFound)?;
    let items = repo.list_return_items(id, franchise_id)?;
    Ok((ret, items))
}

/// Delivered quantities the reconciliation form must account for.
pub fn get_return_preview<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<Vec<ReturnPreviewLine>>
where
    R: ReturnReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Deliveries)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    repo.get_return_by_id(id, franchise_id)?
        .ok_or(ServiceError::NotFound)?;
    Ok(repo
        .get_return_preview(id, franchise_id)?
        .into_iter()
        .map(ReturnPreviewLine::from)
        .collect())
}

pub fn process_return<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: ProcessReturnForm,
    franchise_id: Option<i32>,
) -> ServiceResult<Return>
where
    R: ReturnReader + ReturnWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Deliveries)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let ret = repo
        .get_return_by_id(id, franchise_id)?
        .ok_or(ServiceError::NotFound)?;
    if ret.status != ReturnStatus::Pending {
        return Err(ServiceError::Validation(format!(
            "return is already {}",
            ret.status
        )));
    }

    // The form must cover exactly the delivered lines, with matching
    // delivered quantities.
    let delivered: HashMap<i32, i32> = repo
        .get_return_preview(id, franchise_id)?
        .into_iter()
        .map(|(item, _)| (item.product_id, item.quantity))
        .collect();
    if form.lines.len() != delivered.len() {
        return Err(ServiceError::Validation(
            "every delivered product needs exactly one reconciliation line".to_string(),
        ));
    }
    for line in &form.lines {
        let expected = delivered.get(&line.product_id).copied().ok_or_else(|| {
            ServiceError::Validation(format!(
                "product {} was not part of this delivery",
                line.product_id
            ))
        })?;
        if line.qty_delivered != expected {
            return Err(ServiceError::Validation(format!(
                "product {}: delivered quantity is {}, not {}",
                line.product_id, expected, line.qty_delivered
            )));
        }
        line.validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;
    }

    let sends_anything = form.lines.iter().any(|l| l.qty_returned > 0);
    let laundry_batch_number =
        (form.send_to_laundry && sends_anything).then(|| document_number("LB-RET-"));

    Ok(repo.process_return(
        id,
        franchise_id,
        &form.lines,
        form.send_to_laundry && sends_anything,
        laundry_batch_number.as_deref(),
        user.id(),
    )?)
}

pub fn schedule_return<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: ScheduleReturnForm,
    franchise_id: Option<i32>,
) -> ServiceResult<Return>
where
    R: ReturnReader + ReturnWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Deliveries)?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let ret = repo
        .get_return_by_id(id, franchise_id)?
        .ok_or(ServiceError::NotFound)?;
    if ret.status != ReturnStatus::Pending {
        return Err(ServiceError::Validation(format!(
            "return is already {}",
            ret.status
        )));
    }

    Ok(repo.update_return_schedule(id, franchise_id, form.scheduled_date, form.notes.as_deref())?)
}

pub fn cancel_return<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<Return>
where
    R: ReturnReader + ReturnWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Deliveries)?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let ret = repo
        .get_return_by_id(id, franchise_id)?
        .ok_or(ServiceError::NotFound)?;
    if ret.status != ReturnStatus::Pending {
        return Err(ServiceError::Validation(format!(
            "only pending returns can be cancelled, this one is {}",
            ret.status
        )));
    }

    Ok(repo.cancel_return(id, franchise_id)?)
}
