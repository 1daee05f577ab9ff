use serde::Deserialize;
use validator::Validate;

use crate::domain::payment::PaymentMethod;

#[derive(Debug, Deserialize, Validate)]
pub struct RecordPaymentForm {
    pub booking_id: i32,
    #[validate(range(min = 0.01))]
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

/// Records the last invoice number written by hand; the counter continues
/// from it.
#[derive(Debug, Deserialize, Validate)]
pub struct InvoiceSequenceForm {
    pub franchise_id: Option<i32>,
    #[validate(length(min = 2))]
    pub invoice_number: String,
}
