use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::delivery::DeliveryStatus;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDeliveryForm {
    pub booking_id: i32,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<String>,
    #[validate(length(min = 1))]
    pub delivery_address: String,
    pub assigned_to: Option<i32>,
    pub special_instructions: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateDeliveryForm {
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<String>,
    pub delivery_address: Option<String>,
    pub special_instructions: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeliveryStatusForm {
    pub status: DeliveryStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssignDeliveryForm {
    /// `null` unassigns.
    pub assigned_to: Option<i32>,
}
