use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ExpenseForm {
    pub category_id: Option<i32>,
    #[validate(range(min = 0.01))]
    pub amount: f64,
    #[validate(length(min = 1))]
    pub description: String,
    pub expense_date: Option<NaiveDate>,
    pub receipt_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ExpenseCategoryForm {
    #[validate(length(min = 1))]
    pub name: String,
}
