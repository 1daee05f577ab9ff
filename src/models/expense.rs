//! Diesel models for expenses and their categories.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::expense::{
    Expense as DomainExpense, ExpenseCategory as DomainExpenseCategory,
    NewExpense as DomainNewExpense, NewExpenseCategory as DomainNewExpenseCategory,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::expense_categories)]
pub struct ExpenseCategory {
    pub id: i32,
    pub franchise_id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::expense_categories)]
pub struct NewExpenseCategory<'a> {
    pub franchise_id: i32,
    pub name: &'a str,
}

impl From<ExpenseCategory> for DomainExpenseCategory {
    fn from(category: ExpenseCategory) -> Self {
        Self {
            id: category.id,
            franchise_id: category.franchise_id,
            name: category.name,
        }
    }
}

impl<'a> From<&'a DomainNewExpenseCategory> for NewExpenseCategory<'a> {
    fn from(category: &'a DomainNewExpenseCategory) -> Self {
        Self {
            franchise_id: category.franchise_id,
            name: category.name.as_str(),
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::expenses)]
pub struct Expense {
    pub id: i32,
    pub franchise_id: i32,
    pub category_id: Option<i32>,
    pub amount: f64,
    pub expense_date: NaiveDate,
    pub description: String,
    pub receipt_url: Option<String>,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::expenses)]
pub struct NewExpense<'a> {
    pub franchise_id: i32,
    pub category_id: Option<i32>,
    pub amount: f64,
    pub expense_date: NaiveDate,
    pub description: &'a str,
    pub receipt_url: Option<&'a str>,
    pub created_by: i32,
}

impl From<Expense> for DomainExpense {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            franchise_id: expense.franchise_id,
            category_id: expense.category_id,
            amount: expense.amount,
            expense_date: expense.expense_date,
            description: expense.description,
            receipt_url: expense.receipt_url,
            created_by: expense.created_by,
            created_at: expense.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewExpense> for NewExpense<'a> {
    fn from(expense: &'a DomainNewExpense) -> Self {
        Self {
            franchise_id: expense.franchise_id,
            category_id: expense.category_id,
            amount: expense.amount,
            expense_date: expense.expense_date,
            description: expense.description.as_str(),
            receipt_url: expense.receipt_url.as_deref(),
            created_by: expense.created_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_expense_borrows_trimmed_fields() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let domain = DomainNewExpense::new(1, Some(2), 120.0, date, " tea ", None, 3).unwrap();
        let new: NewExpense = (&domain).into();
        assert_eq!(new.description, "tea");
        assert_eq!(new.category_id, Some(2));
    }
}
