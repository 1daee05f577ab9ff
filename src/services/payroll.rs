//! Attendance, salary configuration and the monthly payroll report.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::payroll::{
    AttendanceRecord, AttendanceSummary, NewAttendanceRecord, NewSalaryAdjustment,
    NewSalaryConfig, PayrollTotals, SalaryAdjustment, SalaryConfig, compute_payroll_line,
    month_bounds,
};
use crate::domain::user::{Module, Role};
use crate::dto::payroll::PayrollReport;
use crate::forms::payroll::{AttendanceForm, SalaryAdjustmentForm, SalaryConfigForm};
use crate::repository::{AttendanceListQuery, PayrollReader, PayrollWriter, UserReader};
use crate::services::{ServiceError, ServiceResult};

pub struct AttendanceListParams {
    pub franchise_id: Option<i32>,
    pub user_id: Option<i32>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub fn record_attendance<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AttendanceForm,
    franchise_id: Option<i32>,
) -> ServiceResult<AttendanceRecord>
where
    R: PayrollWriter + UserReader + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Financials)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let employee = repo
        .get_user_by_id(form.user_id)?
        .filter(|u| u.franchise_id == Some(franchise_id))
        .ok_or_else(|| ServiceError::Validation("employee not found".to_string()))?;

    Ok(repo.record_attendance(&NewAttendanceRecord {
        franchise_id,
        user_id: employee.id,
        work_date: form.work_date,
        status: form.status,
        total_hours: form.total_hours,
        overtime_hours: form.overtime_hours,
        notes: form.notes,
    })?)
}

pub fn list_attendance<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: AttendanceListParams,
) -> ServiceResult<Vec<AttendanceRecord>>
where
    R: PayrollReader + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Financials)?;
    let franchise_id = user.franchise_for(params.franchise_id)?;

    let mut query = AttendanceListQuery::new(franchise_id);
    if let Some(user_id) = params.user_id {
        query = query.user(user_id);
    }
    if let (Some(from), Some(to)) = (params.from, params.to) {
        query = query.between(from, to);
    }
    Ok(repo.list_attendance(query)?)
}

pub fn save_salary_config<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SalaryConfigForm,
    franchise_id: Option<i32>,
) -> ServiceResult<SalaryConfig>
where
    R: PayrollWriter + UserReader + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Financials)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let employee = repo
        .get_user_by_id(form.user_id)?
        .filter(|u| u.franchise_id == Some(franchise_id))
        .ok_or_else(|| ServiceError::Validation("employee not found".to_string()))?;

    Ok(repo.save_salary_config(&NewSalaryConfig {
        franchise_id,
        user_id: employee.id,
        effective_from: form.effective_from,
        basic_salary: form.basic_salary,
        hra: form.hra,
        transport_allowance: form.transport_allowance,
        medical_allowance: form.medical_allowance,
        other_allowances: form.other_allowances,
        overtime_rate: form.overtime_rate,
        bonus_rate: form.bonus_rate,
        pf_rate: form.pf_rate,
        esi_rate: form.esi_rate,
        tax_rate: form.tax_rate,
    })?)
}

pub fn list_salary_configs<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<Vec<SalaryConfig>>
where
    R: PayrollReader + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Financials)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.list_salary_configs(franchise_id)?)
}

pub fn create_salary_adjustment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SalaryAdjustmentForm,
    franchise_id: Option<i32>,
) -> ServiceResult<SalaryAdjustment>
where
    R: PayrollWriter + UserReader + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Financials)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;
    month_bounds(&form.month).map_err(|e| ServiceError::Validation(e.to_string()))?;

    let employee = repo
        .get_user_by_id(form.user_id)?
        .filter(|u| u.franchise_id == Some(franchise_id))
        .ok_or_else(|| ServiceError::Validation("employee not found".to_string()))?;

    Ok(repo.create_salary_adjustment(&NewSalaryAdjustment {
        franchise_id,
        user_id: employee.id,
        month: form.month,
        adjustment_type: form.adjustment_type,
        amount: form.amount,
        reason: form.reason,
        created_by: user.id(),
    })?)
}

pub fn list_salary_adjustments<R>(
    repo: &R,
    user: &AuthenticatedUser,
    month: &str,
    franchise_id: Option<i32>,
) -> ServiceResult<Vec<SalaryAdjustment>>
where
    R: PayrollReader + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Financials)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    month_bounds(month).map_err(|e| ServiceError::Validation(e.to_string()))?;
    Ok(repo.list_salary_adjustments(franchise_id, month)?)
}

pub fn delete_salary_adjustment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<()>
where
    R: PayrollWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Financials)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.delete_salary_adjustment(id, franchise_id)?)
}

/// The month's payroll for every employee with attendance in it. Employees
/// without a salary configuration are listed zeroed with a warning.
pub fn monthly_report<R>(
    repo: &R,
    user: &AuthenticatedUser,
    month: &str,
    franchise_id: Option<i32>,
) -> ServiceResult<PayrollReport>
where
    R: PayrollReader + UserReader + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Financials)?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let (start, end, working_days) =
        month_bounds(month).map_err(|e| ServiceError::Validation(e.to_string()))?;

    let records = repo.list_attendance(
        AttendanceListQuery::new(franchise_id).between(start, end),
    )?;
    let mut by_user: BTreeMap<i32, Vec<AttendanceRecord>> = BTreeMap::new();
    for record in records {
        by_user.entry(record.user_id).or_default().push(record);
    }

    let names: BTreeMap<i32, String> = repo
        .list_users(franchise_id)?
        .into_iter()
        .map(|u| (u.id, u.name))
        .collect();
    let adjustments = repo.list_salary_adjustments(franchise_id, month)?;

    let mut lines = Vec::with_capacity(by_user.len());
    let mut warnings = Vec::new();
    for (user_id, records) in &by_user {
        let summary = AttendanceSummary::from_records(records, working_days);
        let config = repo.get_salary_config_for_user(*user_id, franchise_id)?;
        let user_adjustments: Vec<SalaryAdjustment> = adjustments
            .iter()
            .filter(|adj| adj.user_id == *user_id)
            .cloned()
            .collect();
        let name = names
            .get(user_id)
            .map(String::as_str)
            .unwrap_or("Unknown employee");
        let (line, warning) =
            compute_payroll_line(*user_id, name, &summary, config.as_ref(), &user_adjustments);
        lines.push(line);
        if let Some(warning) = warning {
            warnings.push(warning);
        }
    }

    let totals = PayrollTotals::from_lines(&lines);
    Ok(PayrollReport {
        month: month.to_string(),
        lines,
        totals,
        warnings,
    })
}
