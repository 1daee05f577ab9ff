use serde::Deserialize;

/// Manual WhatsApp send requests. Tagged by message type so a missing
/// template field is rejected during deserialization.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotifyForm {
    BookingConfirmation {
        phone: String,
        customer_name: String,
        booking_number: String,
        booking_date: String,
        total_amount: f64,
        booking_id: Option<i32>,
    },
    PaymentReceived {
        phone: String,
        customer_name: String,
        booking_number: String,
        amount_paid: f64,
        remaining_balance: f64,
        booking_id: Option<i32>,
    },
    DeliveryReminder {
        phone: String,
        customer_name: String,
        booking_number: String,
        delivery_date: String,
        delivery_time: String,
        booking_id: Option<i32>,
    },
    ReturnReminder {
        phone: String,
        customer_name: String,
        booking_number: String,
        return_date: String,
        booking_id: Option<i32>,
    },
    Invoice {
        phone: String,
        customer_name: String,
        booking_number: String,
        invoice_url: String,
        booking_id: Option<i32>,
    },
}
