use serde::Serialize;

use crate::domain::booking::Booking;
use crate::domain::payment::Payment;

/// Settlement state of one booking: the money totals plus every payment
/// received against it.
#[derive(Debug, Serialize)]
pub struct BookingSettlement {
    pub booking_id: i32,
    pub booking_number: String,
    pub total_amount: f64,
    pub security_deposit: f64,
    pub amount_paid: f64,
    pub balance_due: f64,
    pub payments: Vec<Payment>,
}

impl BookingSettlement {
    pub fn new(booking: &Booking, payments: Vec<Payment>) -> Self {
        Self {
            booking_id: booking.id,
            booking_number: booking.booking_number.clone(),
            total_amount: booking.total_amount,
            security_deposit: booking.security_deposit,
            amount_paid: booking.amount_paid,
            balance_due: booking.balance_due(),
            payments,
        }
    }
}

/// A freshly issued invoice number for a booking.
#[derive(Debug, Serialize)]
pub struct IssuedInvoice {
    pub booking_id: i32,
    pub booking_number: String,
    pub invoice_number: String,
}
