use serde::Serialize;

use crate::domain::expense::{Expense, ExpenseCategory};

#[derive(Debug, Serialize)]
pub struct ExpenseRow {
    #[serde(flatten)]
    pub expense: Expense,
    pub category_name: Option<String>,
}

impl From<(Expense, Option<ExpenseCategory>)> for ExpenseRow {
    fn from((expense, category): (Expense, Option<ExpenseCategory>)) -> Self {
        Self {
            expense,
            category_name: category.map(|c| c.name),
        }
    }
}
