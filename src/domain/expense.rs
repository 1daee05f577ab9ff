//! Operating expenses and their categories.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExpenseCategory {
    pub id: i32,
    pub franchise_id: i32,
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct NewExpenseCategory {
    pub franchise_id: i32,
    pub name: String,
}

impl NewExpenseCategory {
    pub fn new(franchise_id: i32, name: &str) -> Result<Self, TypeConstraintError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self { franchise_id, name })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
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

#[derive(Clone, Debug)]
pub struct NewExpense {
    pub franchise_id: i32,
    pub category_id: Option<i32>,
    pub amount: f64,
    pub expense_date: NaiveDate,
    pub description: String,
    pub receipt_url: Option<String>,
    pub created_by: i32,
}

impl NewExpense {
    pub fn new(
        franchise_id: i32,
        category_id: Option<i32>,
        amount: f64,
        expense_date: NaiveDate,
        description: &str,
        receipt_url: Option<&str>,
        created_by: i32,
    ) -> Result<Self, TypeConstraintError> {
        if amount <= 0.0 {
            return Err(TypeConstraintError::InvalidValue(
                "expense amount must be positive".into(),
            ));
        }
        let description = description.trim().to_string();
        if description.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self {
            franchise_id,
            category_id,
            amount,
            expense_date,
            description,
            receipt_url: receipt_url
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(ToString::to_string),
            created_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_requires_positive_amount() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(NewExpense::new(1, None, 0.0, date, "tea", None, 1).is_err());
        assert!(NewExpense::new(1, None, -5.0, date, "tea", None, 1).is_err());
        assert!(NewExpense::new(1, None, 120.0, date, "tea", None, 1).is_ok());
    }

    #[test]
    fn expense_requires_description() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(NewExpense::new(1, None, 10.0, date, "   ", None, 1).is_err());
    }
}
