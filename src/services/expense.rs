//! Operating expenses, their categories and the dashboard roll-up.

use chrono::{NaiveDate, Utc};
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::expense::{Expense, ExpenseCategory, NewExpense, NewExpenseCategory};
use crate::domain::user::{Module, Role};
use crate::dto::Paginated;
use crate::dto::expense::ExpenseRow;
use crate::forms::expense::{ExpenseCategoryForm, ExpenseForm};
use crate::repository::{DashboardStats, ExpenseListQuery, ExpenseReader, ExpenseWriter};
use crate::services::{DEFAULT_ITEMS_PER_PAGE, ServiceResult};

pub struct ExpenseListParams {
    pub franchise_id: Option<i32>,
    pub category_id: Option<i32>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub page: usize,
}

pub fn create_expense<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ExpenseForm,
    franchise_id: Option<i32>,
) -> ServiceResult<Expense>
where
    R: ExpenseWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Expenses)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let expense_date = form
        .expense_date
        .unwrap_or_else(|| Utc::now().date_naive());
    let new_expense = NewExpense::new(
        franchise_id,
        form.category_id,
        form.amount,
        expense_date,
        &form.description,
        form.receipt_url.as_deref(),
        user.id(),
    )?;
    Ok(repo.create_expense(&new_expense)?)
}

pub fn list_expenses<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: ExpenseListParams,
) -> ServiceResult<Paginated<ExpenseRow>>
where
    R: ExpenseReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Expenses)?;
    let franchise_id = user.franchise_for(params.franchise_id)?;

    let page = params.page.max(1);
    let mut query = ExpenseListQuery::new(franchise_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(category_id) = params.category_id {
        query = query.category(category_id);
    }
    if let (Some(from), Some(to)) = (params.from, params.to) {
        query = query.between(from, to);
    }

    let (total, rows) = repo.list_expenses(query)?;
    Ok(Paginated::new(
        total,
        page,
        DEFAULT_ITEMS_PER_PAGE,
        rows.into_iter().map(ExpenseRow::from).collect(),
    ))
}

pub fn delete_expense<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<()>
where
    R: ExpenseWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Expenses)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.delete_expense(id, franchise_id)?)
}

pub fn list_categories<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<Vec<ExpenseCategory>>
where
    R: ExpenseReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Expenses)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.list_expense_categories(franchise_id)?)
}

pub fn create_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ExpenseCategoryForm,
    franchise_id: Option<i32>,
) -> ServiceResult<ExpenseCategory>
where
    R: ExpenseWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Expenses)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;
    let category = NewExpenseCategory::new(franchise_id, &form.name)?;
    Ok(repo.create_expense_category(&category)?)
}

pub fn delete_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<()>
where
    R: ExpenseWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Expenses)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.delete_expense_category(id, franchise_id)?)
}

pub fn dashboard_stats<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<DashboardStats>
where
    R: ExpenseReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Dashboard)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.get_dashboard_stats(franchise_id, Utc::now().date_naive())?)
}
