use serde::Serialize;

use crate::domain::booking::{Booking, BookingItem};
use crate::domain::customer::Customer;

/// A booking row joined with the customer it belongs to.
#[derive(Debug, Serialize)]
pub struct BookingSummary {
    #[serde(flatten)]
    pub booking: Booking,
    pub customer_name: String,
    pub customer_phone: String,
    pub balance_due: f64,
}

impl From<(Booking, Customer)> for BookingSummary {
    fn from((booking, customer): (Booking, Customer)) -> Self {
        let balance_due = booking.balance_due();
        Self {
            booking,
            customer_name: customer.name,
            customer_phone: customer.phone,
            balance_due,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingDetail {
    #[serde(flatten)]
    pub booking: Booking,
    pub items: Vec<BookingItem>,
    pub balance_due: f64,
}

impl From<(Booking, Vec<BookingItem>)> for BookingDetail {
    fn from((booking, items): (Booking, Vec<BookingItem>)) -> Self {
        let balance_due = booking.balance_due();
        Self {
            booking,
            items,
            balance_due,
        }
    }
}
