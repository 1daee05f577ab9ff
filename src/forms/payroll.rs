use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::payroll::{AdjustmentType, AttendanceStatus};

#[derive(Debug, Deserialize, Validate)]
pub struct AttendanceForm {
    pub user_id: i32,
    pub work_date: NaiveDate,
    pub status: AttendanceStatus,
    #[validate(range(min = 0.0, max = 24.0))]
    #[serde(default)]
    pub total_hours: f64,
    #[validate(range(min = 0.0, max = 24.0))]
    #[serde(default)]
    pub overtime_hours: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SalaryConfigForm {
    pub user_id: i32,
    pub effective_from: NaiveDate,
    #[validate(range(min = 0.0))]
    pub basic_salary: f64,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub hra: f64,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub transport_allowance: f64,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub medical_allowance: f64,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub other_allowances: f64,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub overtime_rate: f64,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub bonus_rate: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default)]
    pub pf_rate: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default)]
    pub esi_rate: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default)]
    pub tax_rate: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SalaryAdjustmentForm {
    pub user_id: i32,
    /// Payroll month in `YYYY-MM` form.
    #[validate(length(min = 7, max = 7))]
    pub month: String,
    pub adjustment_type: AdjustmentType,
    #[validate(range(min = 0.01))]
    pub amount: f64,
    pub reason: Option<String>,
}
