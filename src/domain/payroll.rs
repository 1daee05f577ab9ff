//! Attendance, salary configuration and the monthly payroll computation.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{TypeConstraintError, round2};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    HalfDay,
    OnLeave,
}

impl Display for AttendanceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::HalfDay => "half_day",
            AttendanceStatus::OnLeave => "on_leave",
        };
        write!(f, "{s}")
    }
}

impl FromStr for AttendanceStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "half_day" => Ok(AttendanceStatus::HalfDay),
            "on_leave" => Ok(AttendanceStatus::OnLeave),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown attendance status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AttendanceRecord {
    pub id: i32,
    pub franchise_id: i32,
    pub user_id: i32,
    pub work_date: NaiveDate,
    pub status: AttendanceStatus,
    pub total_hours: f64,
    pub overtime_hours: f64,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewAttendanceRecord {
    pub franchise_id: i32,
    pub user_id: i32,
    pub work_date: NaiveDate,
    pub status: AttendanceStatus,
    pub total_hours: f64,
    pub overtime_hours: f64,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SalaryConfig {
    pub id: i32,
    pub franchise_id: i32,
    pub user_id: i32,
    pub basic_salary: f64,
    pub hra: f64,
    pub transport_allowance: f64,
    pub medical_allowance: f64,
    pub other_allowances: f64,
    pub overtime_rate: f64,
    pub bonus_rate: f64,
    pub pf_rate: f64,
    pub esi_rate: f64,
    pub tax_rate: f64,
    pub effective_from: NaiveDate,
    pub is_active: bool,
}

#[derive(Clone, Debug)]
pub struct NewSalaryConfig {
    pub franchise_id: i32,
    pub user_id: i32,
    pub effective_from: NaiveDate,
    pub basic_salary: f64,
    pub hra: f64,
    pub transport_allowance: f64,
    pub medical_allowance: f64,
    pub other_allowances: f64,
    pub overtime_rate: f64,
    pub bonus_rate: f64,
    pub pf_rate: f64,
    pub esi_rate: f64,
    pub tax_rate: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentType {
    Bonus,
    Allowance,
    OvertimeManual,
    Deduction,
    AdvanceRecovery,
}

impl AdjustmentType {
    /// Additions are positive, recoveries and deductions negative.
    pub fn signed(self, amount: f64) -> f64 {
        match self {
            AdjustmentType::Bonus | AdjustmentType::Allowance | AdjustmentType::OvertimeManual => {
                amount
            }
            AdjustmentType::Deduction | AdjustmentType::AdvanceRecovery => -amount,
        }
    }
}

impl Display for AdjustmentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AdjustmentType::Bonus => "bonus",
            AdjustmentType::Allowance => "allowance",
            AdjustmentType::OvertimeManual => "overtime_manual",
            AdjustmentType::Deduction => "deduction",
            AdjustmentType::AdvanceRecovery => "advance_recovery",
        };
        write!(f, "{s}")
    }
}

impl FromStr for AdjustmentType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bonus" => Ok(AdjustmentType::Bonus),
            "allowance" => Ok(AdjustmentType::Allowance),
            "overtime_manual" => Ok(AdjustmentType::OvertimeManual),
            "deduction" => Ok(AdjustmentType::Deduction),
            "advance_recovery" => Ok(AdjustmentType::AdvanceRecovery),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown adjustment type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SalaryAdjustment {
    pub id: i32,
    pub franchise_id: i32,
    pub user_id: i32,
    /// `YYYY-MM` month the adjustment applies to.
    pub month: String,
    pub adjustment_type: AdjustmentType,
    pub amount: f64,
    pub reason: Option<String>,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewSalaryAdjustment {
    pub franchise_id: i32,
    pub user_id: i32,
    pub month: String,
    pub adjustment_type: AdjustmentType,
    pub amount: f64,
    pub reason: Option<String>,
    pub created_by: i32,
}

/// First day, last day and day count for a `YYYY-MM` month string.
pub fn month_bounds(month: &str) -> Result<(NaiveDate, NaiveDate, u32), TypeConstraintError> {
    let invalid = || TypeConstraintError::InvalidValue(format!("invalid month: {month}"));
    let (year, month_num) = month.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month_num: u32 = month_num.parse().map_err(|_| invalid())?;
    let start = NaiveDate::from_ymd_opt(year, month_num, 1).ok_or_else(invalid)?;
    let next_month = if month_num == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month_num + 1, 1)
    }
    .ok_or_else(invalid)?;
    let end = next_month.pred_opt().ok_or_else(invalid)?;
    Ok((start, end, end.day()))
}

/// Attendance rolled up over one month for one employee.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AttendanceSummary {
    pub working_days: u32,
    /// Days with any presence, half days included.
    pub present_days: u32,
    pub half_days: u32,
    pub leave_days: u32,
    pub total_hours: f64,
    pub overtime_hours: f64,
}

impl AttendanceSummary {
    pub fn from_records(records: &[AttendanceRecord], working_days: u32) -> Self {
        let mut summary = AttendanceSummary {
            working_days,
            ..Default::default()
        };
        for record in records {
            match record.status {
                AttendanceStatus::Present => summary.present_days += 1,
                AttendanceStatus::HalfDay => {
                    summary.present_days += 1;
                    summary.half_days += 1;
                }
                AttendanceStatus::OnLeave => summary.leave_days += 1,
                AttendanceStatus::Absent => {}
            }
            summary.total_hours += record.total_hours;
            summary.overtime_hours += record.overtime_hours;
        }
        summary
    }

    /// Full present days plus half credit for half days plus paid leave.
    pub fn payable_days(&self) -> f64 {
        f64::from(self.present_days - self.half_days)
            + f64::from(self.half_days) * 0.5
            + f64::from(self.leave_days)
    }

    pub fn absent_days(&self) -> i32 {
        self.working_days as i32 - (self.present_days + self.leave_days) as i32
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PayrollLine {
    pub user_id: i32,
    pub employee_name: String,
    pub working_days: u32,
    pub present_days: u32,
    pub absent_days: i32,
    pub leave_days: u32,
    pub payable_days: f64,
    pub total_hours: f64,
    pub overtime_hours: f64,
    pub basic_salary: f64,
    pub hra: f64,
    pub transport_allowance: f64,
    pub medical_allowance: f64,
    pub other_allowances: f64,
    pub overtime_amount: f64,
    pub bonus: f64,
    pub gross_salary: f64,
    pub pf_deduction: f64,
    pub esi_deduction: f64,
    pub tax_deduction: f64,
    pub net_salary: f64,
    pub missing_config: bool,
}

/// One employee's payroll for the month. Returns the line and a warning when
/// no salary configuration was found (the employee is still listed, zeroed).
pub fn compute_payroll_line(
    user_id: i32,
    employee_name: &str,
    summary: &AttendanceSummary,
    config: Option<&SalaryConfig>,
    adjustments: &[SalaryAdjustment],
) -> (PayrollLine, Option<String>) {
    let missing_config = config.is_none();
    let warning = missing_config.then(|| format!("No salary configuration for user {user_id}"));

    let (basic, hra, transport, medical, other, overtime_rate, bonus, pf_rate, esi_rate, tax_rate) =
        match config {
            Some(c) => (
                c.basic_salary,
                c.hra,
                c.transport_allowance,
                c.medical_allowance,
                c.other_allowances,
                c.overtime_rate,
                c.bonus_rate,
                c.pf_rate,
                c.esi_rate,
                c.tax_rate,
            ),
            None => (0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
        };

    let payable_days = summary.payable_days();
    let per_day_basic = if summary.working_days > 0 {
        basic / f64::from(summary.working_days)
    } else {
        0.0
    };
    let earned_basic = per_day_basic * payable_days;

    let allowances = hra + transport + medical + other;
    let overtime_amount = summary.overtime_hours * overtime_rate;

    let adjustment_total: f64 = adjustments
        .iter()
        .map(|adj| adj.adjustment_type.signed(adj.amount))
        .sum();

    // Adjustments land in gross before the statutory deductions.
    let gross = earned_basic + allowances + overtime_amount + bonus + adjustment_total;

    let pf = earned_basic * (pf_rate / 100.0);
    let esi = gross * (esi_rate / 100.0);
    let tax = gross * (tax_rate / 100.0);
    let net = gross - (pf + esi + tax);

    let line = PayrollLine {
        user_id,
        employee_name: employee_name.to_string(),
        working_days: summary.working_days,
        present_days: summary.present_days,
        absent_days: summary.absent_days(),
        leave_days: summary.leave_days,
        payable_days: round2(payable_days),
        total_hours: round2(summary.total_hours),
        overtime_hours: round2(summary.overtime_hours),
        basic_salary: round2(earned_basic),
        hra,
        transport_allowance: transport,
        medical_allowance: medical,
        other_allowances: other,
        overtime_amount: round2(overtime_amount),
        bonus,
        gross_salary: round2(gross),
        pf_deduction: round2(pf),
        esi_deduction: round2(esi),
        tax_deduction: round2(tax),
        net_salary: round2(net),
        missing_config,
    };
    (line, warning)
}

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq)]
pub struct PayrollTotals {
    pub gross: f64,
    pub net: f64,
    pub overtime_hours: f64,
    pub overtime_amount: f64,
}

impl PayrollTotals {
    pub fn from_lines(lines: &[PayrollLine]) -> Self {
        let mut totals = PayrollTotals::default();
        for line in lines {
            totals.gross += line.gross_salary;
            totals.net += line.net_salary;
            totals.overtime_hours += line.overtime_hours;
            totals.overtime_amount += line.overtime_amount;
        }
        PayrollTotals {
            gross: round2(totals.gross),
            net: round2(totals.net),
            overtime_hours: round2(totals.overtime_hours),
            overtime_amount: round2(totals.overtime_amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SalaryConfig {
        SalaryConfig {
            id: 1,
            franchise_id: 1,
            user_id: 3,
            basic_salary: 30_000.0,
            hra: 5_000.0,
            transport_allowance: 1_000.0,
            medical_allowance: 500.0,
            other_allowances: 500.0,
            overtime_rate: 100.0,
            bonus_rate: 2_000.0,
            pf_rate: 12.0,
            esi_rate: 0.75,
            tax_rate: 10.0,
            effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            is_active: true,
        }
    }

    fn summary() -> AttendanceSummary {
        AttendanceSummary {
            working_days: 30,
            present_days: 24,
            half_days: 4,
            leave_days: 2,
            total_hours: 200.0,
            overtime_hours: 10.0,
        }
    }

    fn adjustment(kind: AdjustmentType, amount: f64) -> SalaryAdjustment {
        SalaryAdjustment {
            id: 1,
            franchise_id: 1,
            user_id: 3,
            month: "2025-06".to_string(),
            adjustment_type: kind,
            amount,
            reason: None,
            created_by: 1,
            created_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn month_bounds_handles_lengths_and_rollover() {
        let (start, end, days) = month_bounds("2025-06").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
        assert_eq!(days, 30);

        let (_, end, days) = month_bounds("2025-12").unwrap();
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert_eq!(days, 31);

        let (_, _, days) = month_bounds("2024-02").unwrap();
        assert_eq!(days, 29);

        assert!(month_bounds("2025-13").is_err());
        assert!(month_bounds("junk").is_err());
    }

    #[test]
    fn payable_days_credit_half_days_and_leave() {
        let s = summary();
        assert_eq!(s.payable_days(), 24.0);
        assert_eq!(s.absent_days(), 4);
    }

    #[test]
    fn full_line_computation() {
        let adjustments = vec![
            adjustment(AdjustmentType::Bonus, 1_000.0),
            adjustment(AdjustmentType::Deduction, 500.0),
        ];
        let (line, warning) =
            compute_payroll_line(3, "Asha", &summary(), Some(&config()), &adjustments);
        assert!(warning.is_none());
        assert_eq!(line.basic_salary, 24_000.0);
        assert_eq!(line.overtime_amount, 1_000.0);
        assert_eq!(line.gross_salary, 34_500.0);
        assert_eq!(line.pf_deduction, 2_880.0);
        assert_eq!(line.esi_deduction, 258.75);
        assert_eq!(line.tax_deduction, 3_450.0);
        assert_eq!(line.net_salary, 27_911.25);
    }

    #[test]
    fn missing_config_zeroes_and_warns() {
        let (line, warning) = compute_payroll_line(9, "Ravi", &summary(), None, &[]);
        assert_eq!(warning.as_deref(), Some("No salary configuration for user 9"));
        assert!(line.missing_config);
        assert_eq!(line.gross_salary, 0.0);
        assert_eq!(line.net_salary, 0.0);
        // Attendance still reported for the listing.
        assert_eq!(line.present_days, 24);
    }

    #[test]
    fn adjustment_signs() {
        assert_eq!(AdjustmentType::Bonus.signed(100.0), 100.0);
        assert_eq!(AdjustmentType::Allowance.signed(100.0), 100.0);
        assert_eq!(AdjustmentType::OvertimeManual.signed(100.0), 100.0);
        assert_eq!(AdjustmentType::Deduction.signed(100.0), -100.0);
        assert_eq!(AdjustmentType::AdvanceRecovery.signed(100.0), -100.0);
    }

    #[test]
    fn totals_sum_rounded_lines() {
        let (line, _) = compute_payroll_line(3, "Asha", &summary(), Some(&config()), &[]);
        let totals = PayrollTotals::from_lines(&[line.clone(), line]);
        assert_eq!(totals.overtime_hours, 20.0);
        assert_eq!(totals.overtime_amount, 2_000.0);
        assert_eq!(totals.gross, 2.0 * 34_000.0);
    }
}
