use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::laundry::{LaundryReceiptLine, NewLaundryItem};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLaundryBatchForm {
    #[validate(length(min = 1))]
    pub items: Vec<NewLaundryItem>,
    pub expected_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SendLaundryBatchForm {
    pub expected_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReceiveLaundryBatchForm {
    #[serde(default)]
    pub receipts: Vec<LaundryReceiptLine>,
}
