//! Diesel models for attendance, salary configuration and adjustments.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::payroll::{
    AttendanceRecord as DomainAttendanceRecord, NewAttendanceRecord as DomainNewAttendanceRecord,
    NewSalaryAdjustment as DomainNewSalaryAdjustment, NewSalaryConfig as DomainNewSalaryConfig,
    SalaryAdjustment as DomainSalaryAdjustment, SalaryConfig as DomainSalaryConfig,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::attendance_records)]
pub struct AttendanceRecord {
    pub id: i32,
    pub franchise_id: i32,
    pub user_id: i32,
    pub work_date: NaiveDate,
    pub status: String,
    pub total_hours: f64,
    pub overtime_hours: f64,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::attendance_records)]
pub struct NewAttendanceRecord<'a> {
    pub franchise_id: i32,
    pub user_id: i32,
    pub work_date: NaiveDate,
    pub status: String,
    pub total_hours: f64,
    pub overtime_hours: f64,
    pub notes: Option<&'a str>,
}

impl TryFrom<AttendanceRecord> for DomainAttendanceRecord {
    type Error = TypeConstraintError;

    fn try_from(record: AttendanceRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            franchise_id: record.franchise_id,
            user_id: record.user_id,
            work_date: record.work_date,
            status: record.status.parse()?,
            total_hours: record.total_hours,
            overtime_hours: record.overtime_hours,
            notes: record.notes,
            created_at: record.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewAttendanceRecord> for NewAttendanceRecord<'a> {
    fn from(record: &'a DomainNewAttendanceRecord) -> Self {
        Self {
            franchise_id: record.franchise_id,
            user_id: record.user_id,
            work_date: record.work_date,
            status: record.status.to_string(),
            total_hours: record.total_hours,
            overtime_hours: record.overtime_hours,
            notes: record.notes.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::salary_configurations)]
pub struct SalaryConfiguration {
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

#[derive(Insertable)]
#[diesel(table_name = crate::schema::salary_configurations)]
pub struct NewSalaryConfiguration {
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
}

impl From<SalaryConfiguration> for DomainSalaryConfig {
    fn from(config: SalaryConfiguration) -> Self {
        Self {
            id: config.id,
            franchise_id: config.franchise_id,
            user_id: config.user_id,
            basic_salary: config.basic_salary,
            hra: config.hra,
            transport_allowance: config.transport_allowance,
            medical_allowance: config.medical_allowance,
            other_allowances: config.other_allowances,
            overtime_rate: config.overtime_rate,
            bonus_rate: config.bonus_rate,
            pf_rate: config.pf_rate,
            esi_rate: config.esi_rate,
            tax_rate: config.tax_rate,
            effective_from: config.effective_from,
            is_active: config.is_active,
        }
    }
}

impl From<&DomainNewSalaryConfig> for NewSalaryConfiguration {
    fn from(config: &DomainNewSalaryConfig) -> Self {
        Self {
            franchise_id: config.franchise_id,
            user_id: config.user_id,
            basic_salary: config.basic_salary,
            hra: config.hra,
            transport_allowance: config.transport_allowance,
            medical_allowance: config.medical_allowance,
            other_allowances: config.other_allowances,
            overtime_rate: config.overtime_rate,
            bonus_rate: config.bonus_rate,
            pf_rate: config.pf_rate,
            esi_rate: config.esi_rate,
            tax_rate: config.tax_rate,
            effective_from: config.effective_from,
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::salary_adjustments)]
pub struct SalaryAdjustment {
    pub id: i32,
    pub franchise_id: i32,
    pub user_id: i32,
    pub month: String,
    pub adjustment_type: String,
    pub amount: f64,
    pub reason: Option<String>,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::salary_adjustments)]
pub struct NewSalaryAdjustment<'a> {
    pub franchise_id: i32,
    pub user_id: i32,
    pub month: &'a str,
    pub adjustment_type: String,
    pub amount: f64,
    pub reason: Option<&'a str>,
    pub created_by: i32,
}

impl TryFrom<SalaryAdjustment> for DomainSalaryAdjustment {
    type Error = TypeConstraintError;

    fn try_from(adjustment: SalaryAdjustment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: adjustment.id,
            franchise_id: adjustment.franchise_id,
            user_id: adjustment.user_id,
            month: adjustment.month,
            adjustment_type: adjustment.adjustment_type.parse()?,
            amount: adjustment.amount,
            reason: adjustment.reason,
            created_by: adjustment.created_by,
            created_at: adjustment.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewSalaryAdjustment> for NewSalaryAdjustment<'a> {
    fn from(adjustment: &'a DomainNewSalaryAdjustment) -> Self {
        Self {
            franchise_id: adjustment.franchise_id,
            user_id: adjustment.user_id,
            month: adjustment.month.as_str(),
            adjustment_type: adjustment.adjustment_type.to_string(),
            amount: adjustment.amount,
            reason: adjustment.reason.as_deref(),
            created_by: adjustment.created_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payroll::{AdjustmentType, AttendanceStatus};

    #[test]
    fn attendance_status_parses_into_domain() {
        let row = AttendanceRecord {
            id: 1,
            franchise_id: 1,
            user_id: 3,
            work_date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            status: "half_day".to_string(),
            total_hours: 4.0,
            overtime_hours: 0.0,
            notes: None,
            created_at: chrono::Utc::now().naive_utc(),
        };
        let domain = DomainAttendanceRecord::try_from(row).unwrap();
        assert_eq!(domain.status, AttendanceStatus::HalfDay);
    }

    #[test]
    fn new_adjustment_renders_type_as_text() {
        let domain = DomainNewSalaryAdjustment {
            franchise_id: 1,
            user_id: 3,
            month: "2025-06".to_string(),
            adjustment_type: AdjustmentType::AdvanceRecovery,
            amount: 1_500.0,
            reason: Some("advance from May".to_string()),
            created_by: 1,
        };
        let new: NewSalaryAdjustment = (&domain).into();
        assert_eq!(new.adjustment_type, "advance_recovery");
        assert_eq!(new.month, "2025-06");
    }
}
