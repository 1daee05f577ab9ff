use serde::Serialize;

use crate::domain::booking::Booking;
use crate::domain::customer::Customer;
use crate::domain::delivery::Delivery;

/// A delivery row with booking and customer context for the dispatch list.
#[derive(Debug, Serialize)]
pub struct DeliveryRow {
    #[serde(flatten)]
    pub delivery: Delivery,
    pub booking_number: String,
    pub customer_name: String,
    pub customer_phone: String,
}

impl From<(Delivery, Booking, Customer)> for DeliveryRow {
    fn from((delivery, booking, customer): (Delivery, Booking, Customer)) -> Self {
        Self {
            delivery,
            booking_number: booking.booking_number,
            customer_name: customer.name,
            customer_phone: customer.phone,
        }
    }
}
