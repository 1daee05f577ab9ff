use serde::Serialize;

use crate::domain::booking::{Booking, BookingItem};
use crate::domain::customer::Customer;
use crate::domain::product::Product;
use crate::domain::returns::Return;

#[derive(Debug, Serialize)]
pub struct ReturnRow {
    #[serde(flatten)]
    pub ret: Return,
    pub booking_number: String,
    pub customer_name: String,
    pub customer_phone: String,
}

impl From<(Return, Booking, Customer)> for ReturnRow {
    fn from((ret, booking, customer): (Return, Booking, Customer)) -> Self {
        Self {
            ret,
            booking_number: booking.booking_number,
            customer_name: customer.name,
            customer_phone: customer.phone,
        }
    }
}

/// What the return screen must account for: each delivered line with the
/// product named.
#[derive(Debug, Serialize)]
pub struct ReturnPreviewLine {
    pub product_id: i32,
    pub product_code: String,
    pub product_name: String,
    pub qty_delivered: i32,
}

impl From<(BookingItem, Product)> for ReturnPreviewLine {
    fn from((item, product): (BookingItem, Product)) -> Self {
        Self {
            product_id: product.id,
            product_code: product.product_code,
            product_name: product.name,
            qty_delivered: item.quantity,
        }
    }
}
