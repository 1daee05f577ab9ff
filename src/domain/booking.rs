//! Bookings, quotes and their money math.
//!
//! A single entity covers product orders and package bookings; quotes are
//! bookings flagged `is_quote` with their own status vocabulary. Totals are
//! always computed here, never trusted from the client.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{TypeConstraintError, round2};

/// What is being booked.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingKind {
    /// Individual products with line items.
    Product,
    /// A package variant priced as a unit.
    Package,
}

impl Display for BookingKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BookingKind::Product => "product",
            BookingKind::Package => "package",
        };
        write!(f, "{s}")
    }
}

impl FromStr for BookingKind {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product" => Ok(BookingKind::Product),
            "package" => Ok(BookingKind::Package),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown booking kind: {other}"
            ))),
        }
    }
}

/// Whether goods come back.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingType {
    Rental,
    Sale,
}

impl Display for BookingType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BookingType::Rental => "rental",
            BookingType::Sale => "sale",
        };
        write!(f, "{s}")
    }
}

impl FromStr for BookingType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rental" => Ok(BookingType::Rental),
            "sale" => Ok(BookingType::Sale),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown booking type: {other}"
            ))),
        }
    }
}

/// Combined status vocabulary for bookings and quotes.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    // Booking lifecycle.
    PendingPayment,
    Confirmed,
    Delivered,
    Returned,
    OrderComplete,
    Cancelled,
    // Quote lifecycle.
    Generated,
    Sent,
    Accepted,
    Converted,
    Expired,
}

impl BookingStatus {
    /// Quotes may only convert from these states.
    pub fn quote_convertible(self) -> bool {
        matches!(
            self,
            BookingStatus::Generated | BookingStatus::Sent | BookingStatus::Accepted
        )
    }

    /// Commercial fields stay editable until goods move.
    pub fn booking_editable(self) -> bool {
        matches!(self, BookingStatus::PendingPayment | BookingStatus::Confirmed)
    }

    /// Terminal states never change again.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BookingStatus::OrderComplete
                | BookingStatus::Cancelled
                | BookingStatus::Converted
                | BookingStatus::Expired
        )
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BookingStatus::PendingPayment => "pending_payment",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Delivered => "delivered",
            BookingStatus::Returned => "returned",
            BookingStatus::OrderComplete => "order_complete",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Generated => "generated",
            BookingStatus::Sent => "sent",
            BookingStatus::Accepted => "accepted",
            BookingStatus::Converted => "converted",
            BookingStatus::Expired => "expired",
        };
        write!(f, "{s}")
    }
}

impl FromStr for BookingStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_payment" => Ok(BookingStatus::PendingPayment),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "delivered" => Ok(BookingStatus::Delivered),
            "returned" => Ok(BookingStatus::Returned),
            "order_complete" => Ok(BookingStatus::OrderComplete),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "generated" => Ok(BookingStatus::Generated),
            "sent" => Ok(BookingStatus::Sent),
            "accepted" => Ok(BookingStatus::Accepted),
            "converted" => Ok(BookingStatus::Converted),
            "expired" => Ok(BookingStatus::Expired),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown booking status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: i32,
    pub franchise_id: i32,
    pub customer_id: i32,
    pub booking_number: String,
    pub kind: BookingKind,
    pub booking_type: BookingType,
    pub is_quote: bool,
    pub status: BookingStatus,
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

impl Booking {
    pub fn balance_due(&self) -> f64 {
        round2(self.total_amount - self.amount_paid)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BookingItem {
    pub id: i32,
    pub booking_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
    pub line_total: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewBookingItem {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
}

impl NewBookingItem {
    pub fn line_total(&self) -> f64 {
        round2(self.unit_price * self.quantity as f64)
    }
}

#[derive(Clone, Debug)]
pub struct NewBooking {
    pub franchise_id: i32,
    pub customer_id: i32,
    pub booking_number: String,
    pub kind: BookingKind,
    pub booking_type: BookingType,
    pub is_quote: bool,
    pub status: BookingStatus,
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
    pub notes: Option<String>,
    pub created_by: i32,
}

/// Server-side money math for a booking.
///
/// GST applies to the discounted subtotal plus the distance addon; the
/// security deposit rides on top untaxed and is refundable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct BookingTotals {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub distance_addon: f64,
    pub gst_amount: f64,
    pub total_amount: f64,
    pub security_deposit: f64,
}

impl BookingTotals {
    pub fn compute(
        subtotal: f64,
        discount_amount: f64,
        distance_addon: f64,
        gst_percentage: f64,
        security_deposit: f64,
    ) -> Self {
        let subtotal = round2(subtotal);
        let discount_amount = round2(discount_amount.clamp(0.0, subtotal));
        let distance_addon = round2(distance_addon.max(0.0));
        let taxable = subtotal - discount_amount + distance_addon;
        let gst_amount = round2(taxable * gst_percentage / 100.0);
        let security_deposit = round2(security_deposit.max(0.0));
        let total_amount = round2(taxable + gst_amount + security_deposit);
        Self {
            subtotal,
            discount_amount,
            distance_addon,
            gst_amount,
            total_amount,
            security_deposit,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct UpdateBooking {
    pub event_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub venue_address: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_apply_gst_after_discount_and_distance() {
        let totals = BookingTotals::compute(10_000.0, 1_000.0, 500.0, 18.0, 2_000.0);
        assert_eq!(totals.subtotal, 10_000.0);
        assert_eq!(totals.discount_amount, 1_000.0);
        assert_eq!(totals.distance_addon, 500.0);
        assert_eq!(totals.gst_amount, 1_710.0);
        assert_eq!(totals.total_amount, 13_210.0);
    }

    #[test]
    fn discount_cannot_exceed_subtotal() {
        let totals = BookingTotals::compute(500.0, 900.0, 0.0, 0.0, 0.0);
        assert_eq!(totals.discount_amount, 500.0);
        assert_eq!(totals.total_amount, 0.0);
    }

    #[test]
    fn quote_statuses_convertible() {
        assert!(BookingStatus::Generated.quote_convertible());
        assert!(BookingStatus::Sent.quote_convertible());
        assert!(BookingStatus::Accepted.quote_convertible());
        assert!(!BookingStatus::Converted.quote_convertible());
        assert!(!BookingStatus::Expired.quote_convertible());
        assert!(!BookingStatus::Confirmed.quote_convertible());
    }

    #[test]
    fn editable_only_before_goods_move() {
        assert!(BookingStatus::PendingPayment.booking_editable());
        assert!(BookingStatus::Confirmed.booking_editable());
        assert!(!BookingStatus::Delivered.booking_editable());
        assert!(!BookingStatus::Cancelled.booking_editable());
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in [
            BookingStatus::PendingPayment,
            BookingStatus::Confirmed,
            BookingStatus::Delivered,
            BookingStatus::Returned,
            BookingStatus::OrderComplete,
            BookingStatus::Cancelled,
            BookingStatus::Generated,
            BookingStatus::Sent,
            BookingStatus::Accepted,
            BookingStatus::Converted,
            BookingStatus::Expired,
        ] {
            assert_eq!(status.to_string().parse::<BookingStatus>().unwrap(), status);
        }
    }

    #[test]
    fn line_total_rounds() {
        let item = NewBookingItem {
            product_id: 1,
            quantity: 3,
            unit_price: 33.335,
        };
        assert_eq!(item.line_total(), 100.01);
    }
}
