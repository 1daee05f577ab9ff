use serde::Serialize;

use crate::domain::payroll::{PayrollLine, PayrollTotals};

/// One month's payroll for a franchise. Employees without a salary
/// configuration still appear, zeroed, with a warning listed.
#[derive(Debug, Serialize)]
pub struct PayrollReport {
    pub month: String,
    pub lines: Vec<PayrollLine>,
    pub totals: PayrollTotals,
    pub warnings: Vec<String>,
}
