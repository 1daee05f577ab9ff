use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::booking::{BookingKind, BookingStatus, BookingType, NewBookingItem};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingForm {
    pub customer_id: i32,
    pub kind: BookingKind,
    pub booking_type: BookingType,
    /// `true` creates a quote instead of a live booking.
    #[serde(default)]
    pub is_quote: bool,
    pub event_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub venue_address: Option<String>,
    /// Product bookings: the line items.
    #[serde(default)]
    pub items: Vec<NewBookingItem>,
    /// Package bookings: which variant and how far the venue is.
    pub package_id: Option<i32>,
    pub variant_id: Option<i32>,
    pub distance_km: Option<f64>,
    /// Either a coupon or a manual discount, never both.
    pub coupon_code: Option<String>,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub discount_amount: f64,
    #[validate(range(min = 0.0))]
    pub security_deposit: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateBookingForm {
    pub event_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub venue_address: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteStatusForm {
    pub status: BookingStatus,
}
