//! Booking and quote orchestration: server-side totals, coupon handling and
//! the quote conversion flow.

use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::booking::{
    Booking, BookingKind, BookingStatus, BookingTotals, NewBooking, NewBookingItem,
    UpdateBooking,
};
use crate::domain::pricing::resolve_distance_addon;
use crate::domain::user::{Module, Role};
use crate::dto::Paginated;
use crate::dto::booking::{BookingDetail, BookingSummary};
use crate::forms::booking::{CreateBookingForm, QuoteStatusForm, UpdateBookingForm};
use crate::repository::{
    BookingListQuery, BookingReader, BookingWriter, CouponReader, CouponWriter, CustomerReader,
    PricingReader, ProductReader, SettingsReader,
};
use crate::services::{DEFAULT_ITEMS_PER_PAGE, ServiceError, ServiceResult, document_number};

pub struct BookingListParams {
    pub franchise_id: Option<i32>,
    pub quotes: bool,
    pub status: Option<BookingStatus>,
    pub kind: Option<BookingKind>,
    pub customer_id: Option<i32>,
    pub include_archived: bool,
    pub page: usize,
}

/// The priced skeleton of a booking before it is stored.
struct PricedBooking {
    subtotal: f64,
    distance_addon: f64,
    security_deposit: f64,
    items: Vec<NewBookingItem>,
}

pub fn create_booking<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateBookingForm,
    franchise_id: Option<i32>,
) -> ServiceResult<Booking>
where
    R: BookingWriter
        + CustomerReader
        + ProductReader
        + PricingReader
        + CouponReader
        + CouponWriter
        + SettingsReader
        + ?Sized,
{
    user.ensure(Role::Staff, Module::Bookings)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let customer = repo
        .get_customer_by_id(form.customer_id, franchise_id)?
        .ok_or_else(|| ServiceError::Validation("customer not found".to_string()))?;

    let priced = price_booking(repo, franchise_id, &form)?;

    // A coupon and a manual discount are mutually exclusive.
    let (coupon_id, discount_amount) = match form.coupon_code.as_deref() {
        Some(code) => {
            if form.discount_amount > 0.0 {
                return Err(ServiceError::Validation(
                    "Use either a coupon or a manual discount, not both".to_string(),
                ));
            }
            let order_value = priced.subtotal;
            match crate::services::coupon::check_coupon(
                repo,
                franchise_id,
                code,
                order_value,
                Some(customer.id),
            )? {
                Ok((coupon, discount)) => (Some(coupon.id), discount),
                Err(rejection) => return Err(ServiceError::Validation(rejection.message)),
            }
        }
        None => (None, form.discount_amount),
    };

    let gst_percentage = repo
        .get_company_settings(franchise_id)?
        .map(|s| s.gst_percentage)
        .unwrap_or(0.0);
    let totals = BookingTotals::compute(
        priced.subtotal,
        discount_amount,
        priced.distance_addon,
        gst_percentage,
        priced.security_deposit,
    );

    let prefix = if form.is_quote {
        "QTE-"
    } else {
        match form.kind {
            BookingKind::Product => "BO-",
            BookingKind::Package => "PKG-",
        }
    };
    let status = if form.is_quote {
        BookingStatus::Generated
    } else {
        BookingStatus::PendingPayment
    };

    let new_booking = NewBooking {
        franchise_id,
        customer_id: customer.id,
        booking_number: document_number(prefix),
        kind: form.kind,
        booking_type: form.booking_type,
        is_quote: form.is_quote,
        status,
        event_date: form.event_date,
        delivery_date: form.delivery_date,
        return_date: form.return_date,
        venue_address: form.venue_address,
        package_id: form.package_id,
        variant_id: form.variant_id,
        distance_km: form.distance_km,
        subtotal: totals.subtotal,
        discount_amount: totals.discount_amount,
        coupon_id,
        distance_addon: totals.distance_addon,
        gst_amount: totals.gst_amount,
        total_amount: totals.total_amount,
        security_deposit: totals.security_deposit,
        notes: form.notes,
        created_by: user.id(),
    };

    let booking = repo.create_booking(&new_booking, &priced.items)?;
    if let Some(coupon_id) = coupon_id {
        repo.record_coupon_use(coupon_id, franchise_id, customer.id, Some(booking.id))?;
    }
    Ok(booking)
}

/// Validates the commercial side of the form and prices it: line items for
/// product bookings, variant base price plus distance addon for packages.
fn price_booking<R>(
    repo: &R,
    franchise_id: i32,
    form: &CreateBookingForm,
) -> ServiceResult<PricedBooking>
where
    R: ProductReader + PricingReader + ?Sized,
{
    match form.kind {
        BookingKind::Product => {
            if form.items.is_empty() {
                return Err(ServiceError::Validation(
                    "a product booking needs at least one item".to_string(),
                ));
            }
            let mut subtotal = 0.0;
            let mut deposit = 0.0;
            for item in &form.items {
                if item.quantity <= 0 {
                    return Err(ServiceError::Validation(
                        "item quantity must be greater than zero".to_string(),
                    ));
                }
                if item.unit_price < 0.0 {
                    return Err(ServiceError::Validation(
                        "item unit price cannot be negative".to_string(),
                    ));
                }
                let product = repo
                    .get_product_by_id(item.product_id, franchise_id)?
                    .ok_or_else(|| {
                        ServiceError::Validation(format!("product {} not found", item.product_id))
                    })?;
                subtotal += item.line_total();
                deposit += product.security_deposit * f64::from(item.quantity);
            }
            Ok(PricedBooking {
                subtotal,
                distance_addon: 0.0,
                security_deposit: form.security_deposit.unwrap_or(deposit),
                items: form.items.clone(),
            })
        }
        BookingKind::Package => {
            let variant_id = form.variant_id.ok_or_else(|| {
                ServiceError::Validation("a package booking needs a variant".to_string())
            })?;
            let variant = repo
                .get_variant_by_id(variant_id, franchise_id)?
                .ok_or_else(|| ServiceError::Validation("package variant not found".to_string()))?;
            if form.package_id.is_some_and(|p| p != variant.package_id) {
                return Err(ServiceError::Validation(
                    "variant does not belong to the selected package".to_string(),
                ));
            }

            let distance_addon = match form.distance_km {
                Some(km) if km > 0.0 => {
                    let tiers = repo.list_distance_tiers(franchise_id)?;
                    resolve_distance_addon(&tiers, Some(variant_id), km).0
                }
                _ => 0.0,
            };
            Ok(PricedBooking {
                subtotal: variant.base_price,
                distance_addon,
                security_deposit: form.security_deposit.unwrap_or(variant.security_deposit),
                items: Vec::new(),
            })
        }
    }
}

pub fn list_bookings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: BookingListParams,
) -> ServiceResult<Paginated<BookingSummary>>
where
    R: BookingReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Bookings)?;
    let franchise_id = user.franchise_for(params.franchise_id)?;

    let page = params.page.max(1);
    let mut query = BookingListQuery::new(franchise_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if params.quotes {
        query = query.quotes();
    }
    if let Some(status) = params.status {
        query = query.status(status);
    }
    if let Some(kind) = params.kind {
        query = query.kind(kind);
    }
    if let Some(customer_id) = params.customer_id {
        query = query.customer(customer_id);
    }
    if params.include_archived {
        query = query.include_archived();
    }

    let (total, rows) = repo.list_bookings(query)?;
    Ok(Paginated::new(
        total,
        page,
        DEFAULT_ITEMS_PER_PAGE,
        rows.into_iter().map(BookingSummary::from).collect(),
    ))
}

pub fn get_booking<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<BookingDetail>
where
    R: BookingReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Bookings)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    repo.get_booking_with_items(id, franchise_id)?
        .map(BookingDetail::from)
        .ok_or(ServiceError::NotFound)
}

/// Commercial fields stay editable only while nothing has shipped.
pub fn update_booking<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: UpdateBookingForm,
    franchise_id: Option<i32>,
) -> ServiceResult<Booking>
where
    R: BookingReader + BookingWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Bookings)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let booking = repo
        .get_booking_by_id(id, franchise_id)?
        .ok_or(ServiceError::NotFound)?;
    if !booking.is_quote && !booking.status.booking_editable() {
        return Err(ServiceError::Validation(format!(
            "booking can no longer be edited in status {}",
            booking.status
        )));
    }

    Ok(repo.update_booking(
        id,
        franchise_id,
        &UpdateBooking {
            event_date: form.event_date,
            delivery_date: form.delivery_date,
            return_date: form.return_date,
            venue_address: form.venue_address,
            notes: form.notes,
        },
    )?)
}

/// Moves a quote along its lifecycle (sent/accepted/expired/cancelled).
pub fn update_quote_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: QuoteStatusForm,
    franchise_id: Option<i32>,
) -> ServiceResult<Booking>
where
    R: BookingReader + BookingWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Bookings)?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let quote = repo
        .get_booking_by_id(id, franchise_id)?
        .ok_or(ServiceError::NotFound)?;
    if !quote.is_quote {
        return Err(ServiceError::Validation("booking is not a quote".to_string()));
    }
    if quote.status.is_terminal() {
        return Err(ServiceError::Validation(format!(
            "quote is already {}",
            quote.status
        )));
    }
    let allowed = matches!(
        form.status,
        BookingStatus::Sent
            | BookingStatus::Accepted
            | BookingStatus::Expired
            | BookingStatus::Cancelled
    );
    if !allowed {
        return Err(ServiceError::Validation(format!(
            "cannot move a quote to {}",
            form.status
        )));
    }

    Ok(repo.update_booking_status(id, franchise_id, form.status)?)
}

/// Converts a quote into a confirmed booking with a fresh number. Allowed
/// only from generated/sent/accepted; rental product quotes reserve stock
/// as part of the conversion.
pub fn convert_quote<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<Booking>
where
    R: BookingReader + BookingWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Bookings)?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let quote = repo
        .get_booking_by_id(id, franchise_id)?
        .ok_or(ServiceError::NotFound)?;
    if !quote.is_quote {
        return Err(ServiceError::Validation("booking is not a quote".to_string()));
    }
    if !quote.status.quote_convertible() {
        return Err(ServiceError::Validation(format!(
            "quote cannot be converted from status {}",
            quote.status
        )));
    }

    let prefix = match quote.kind {
        BookingKind::Product => "BO-",
        BookingKind::Package => "PKG-",
    };
    Ok(repo.convert_quote(id, franchise_id, &document_number(prefix), user.id())?)
}

/// Cancels a booking; undelivered rentals get their reserved stock back.
pub fn cancel_booking<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<Booking>
where
    R: BookingReader + BookingWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Bookings)?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let booking = repo
        .get_booking_by_id(id, franchise_id)?
        .ok_or(ServiceError::NotFound)?;
    if booking.status.is_terminal() {
        return Err(ServiceError::Validation(format!(
            "booking is already {}",
            booking.status
        )));
    }

    Ok(repo.cancel_booking(id, franchise_id, user.id())?)
}

pub fn set_booking_archived<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    archived: bool,
    franchise_id: Option<i32>,
) -> ServiceResult<Booking>
where
    R: BookingWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Bookings)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.set_booking_archived(id, franchise_id, archived)?)
}
