//! Diesel models for bookings, quotes and their line items.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::booking::{
    Booking as DomainBooking, BookingItem as DomainBookingItem, NewBooking as DomainNewBooking,
    NewBookingItem as DomainNewBookingItem, UpdateBooking as DomainUpdateBooking,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::bookings)]
/// Diesel model for [`crate::domain::booking::Booking`].
pub struct Booking {
    pub id: i32,
    pub franchise_id: i32,
    pub customer_id: i32,
    pub booking_number: String,
    pub kind: String,
    pub booking_type: String,
    pub is_quote: bool,
    pub status: String,
    pub event_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub venue_address: Option<String>,
    pub package_id: Option<i32>,
    pub variant_id: Option<i32>,
    pub distance_km: Option<f64>,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub coupon_id: Option<i32>,
    pub distance_addon: f64,
    pub gst_amount: f64,
    pub total_amount: f64,
    pub security_deposit: f64,
    pub amount_paid: f64,
    pub notes: Option<String>,
    pub is_archived: bool,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::bookings)]
/// Insertable form of [`Booking`].
pub struct NewBooking<'a> {
    pub franchise_id: i32,
    pub customer_id: i32,
    pub booking_number: &'a str,
    pub kind: String,
    pub booking_type: String,
    pub is_quote: bool,
    pub status: String,
    pub event_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub venue_address: Option<&'a str>,
    pub package_id: Option<i32>,
    pub variant_id: Option<i32>,
    pub distance_km: Option<f64>,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub coupon_id: Option<i32>,
    pub distance_addon: f64,
    pub gst_amount: f64,
    pub total_amount: f64,
    pub security_deposit: f64,
    pub notes: Option<&'a str>,
    pub created_by: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::bookings)]
/// Data used when updating editable [`Booking`] fields.
pub struct UpdateBooking<'a> {
    pub event_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub venue_address: Option<&'a str>,
    pub notes: Option<&'a str>,
}

impl TryFrom<Booking> for DomainBooking {
    type Error = TypeConstraintError;

    fn try_from(booking: Booking) -> Result<Self, Self::Error> {
        Ok(Self {
            id: booking.id,
            franchise_id: booking.franchise_id,
            customer_id: booking.customer_id,
            booking_number: booking.booking_number,
            kind: booking.kind.parse()?,
            booking_type: booking.booking_type.parse()?,
            is_quote: booking.is_quote,
            status: booking.status.parse()?,
            event_date: booking.event_date,
            delivery_date: booking.delivery_date,
            return_date: booking.return_date,
            venue_address: booking.venue_address,
            package_id: booking.package_id,
            variant_id: booking.variant_id,
            distance_km: booking.distance_km,
            subtotal: booking.subtotal,
            discount_amount: booking.discount_amount,
            coupon_id: booking.coupon_id,
            distance_addon: booking.distance_addon,
            gst_amount: booking.gst_amount,
            total_amount: booking.total_amount,
            security_deposit: booking.security_deposit,
            amount_paid: booking.amount_paid,
            notes: booking.notes,
            is_archived: booking.is_archived,
            created_by: booking.created_by,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewBooking> for NewBooking<'a> {
    fn from(booking: &'a DomainNewBooking) -> Self {
        Self {
            franchise_id: booking.franchise_id,
            customer_id: booking.customer_id,
            booking_number: booking.booking_number.as_str(),
            kind: booking.kind.to_string(),
            booking_type: booking.booking_type.to_string(),
            is_quote: booking.is_quote,
            status: booking.status.to_string(),
            event_date: booking.event_date,
            delivery_date: booking.delivery_date,
            return_date: booking.return_date,
            venue_address: booking.venue_address.as_deref(),
            package_id: booking.package_id,
            variant_id: booking.variant_id,
            distance_km: booking.distance_km,
            subtotal: booking.subtotal,
            discount_amount: booking.discount_amount,
            coupon_id: booking.coupon_id,
            distance_addon: booking.distance_addon,
            gst_amount: booking.gst_amount,
            total_amount: booking.total_amount,
            security_deposit: booking.security_deposit,
            notes: booking.notes.as_deref(),
            created_by: booking.created_by,
        }
    }
}

impl<'a> From<&'a DomainUpdateBooking> for UpdateBooking<'a> {
    fn from(update: &'a DomainUpdateBooking) -> Self {
        Self {
            event_date: update.event_date,
            delivery_date: update.delivery_date,
            return_date: update.return_date,
            venue_address: update.venue_address.as_deref(),
            notes: update.notes.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Booking, foreign_key = booking_id))]
#[diesel(table_name = crate::schema::booking_items)]
pub struct BookingItem {
    pub id: i32,
    pub booking_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
    pub line_total: f64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::booking_items)]
pub struct NewBookingItem {
    pub booking_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
    pub line_total: f64,
}

impl NewBookingItem {
    /// Line totals are recomputed here, never taken from the caller.
    pub fn from_domain(booking_id: i32, item: &DomainNewBookingItem) -> Self {
        Self {
            booking_id,
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total(),
        }
    }
}

impl From<BookingItem> for DomainBookingItem {
    fn from(item: BookingItem) -> Self {
        Self {
            id: item.id,
            booking_id: item.booking_id,
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{BookingKind, BookingStatus, BookingType};

    #[test]
    fn new_booking_renders_enums_as_text() {
        let domain = DomainNewBooking {
            franchise_id: 1,
            customer_id: 7,
            booking_number: "BO-123".to_string(),
            kind: BookingKind::Package,
            booking_type: BookingType::Rental,
            is_quote: false,
            status: BookingStatus::PendingPayment,
            event_date: None,
            delivery_date: None,
            return_date: None,
            venue_address: Some("12 MG Road".to_string()),
            package_id: Some(3),
            variant_id: Some(9),
            distance_km: Some(12.0),
            subtotal: 10_000.0,
            discount_amount: 0.0,
            coupon_id: None,
            distance_addon: 500.0,
            gst_amount: 1_890.0,
            total_amount: 12_390.0,
            security_deposit: 0.0,
            notes: None,
            created_by: 1,
        };
        let new: NewBooking = (&domain).into();
        assert_eq!(new.kind, "package");
        assert_eq!(new.booking_type, "rental");
        assert_eq!(new.status, "pending_payment");
        assert_eq!(new.venue_address, Some("12 MG Road"));
    }

    #[test]
    fn item_line_total_is_recomputed() {
        let item = DomainNewBookingItem {
            product_id: 4,
            quantity: 3,
            unit_price: 250.0,
        };
        let new = NewBookingItem::from_domain(11, &item);
        assert_eq!(new.booking_id, 11);
        assert_eq!(new.line_total, 750.0);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let row = Booking {
            id: 1,
            franchise_id: 1,
            customer_id: 1,
            booking_number: "BO-1".to_string(),
            kind: "product".to_string(),
            booking_type: "rental".to_string(),
            is_quote: false,
            status: "paid".to_string(),
            event_date: None,
            delivery_date: None,
            return_date: None,
            venue_address: None,
            package_id: None,
            variant_id: None,
            distance_km: None,
            subtotal: 0.0,
            discount_amount: 0.0,
            coupon_id: None,
            distance_addon: 0.0,
            gst_amount: 0.0,
            total_amount: 0.0,
            security_deposit: 0.0,
            amount_paid: 0.0,
            notes: None,
            is_archived: false,
            created_by: 1,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: chrono::Utc::now().naive_utc(),
        };
        assert!(DomainBooking::try_from(row).is_err());
    }
}
