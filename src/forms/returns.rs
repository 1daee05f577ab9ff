use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::returns::ReturnLine;

#[derive(Debug, Deserialize, Validate)]
pub struct ProcessReturnForm {
    #[validate(length(min = 1))]
    pub lines: Vec<ReturnLine>,
    #[serde(default)]
    pub send_to_laundry: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScheduleReturnForm {
    pub scheduled_date: Option<NaiveDate>,
    pub notes: Option<String>,
}
