//! Repository implementation for expenses and the dashboard counters.

use chrono::{Datelike, NaiveDate};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::expense::{Expense, ExpenseCategory, NewExpense, NewExpenseCategory},
    models::expense::{
        Expense as DbExpense, ExpenseCategory as DbExpenseCategory,
        NewExpense as DbNewExpense, NewExpenseCategory as DbNewExpenseCategory,
    },
    repository::{
        DashboardStats, DieselRepository, ExpenseListQuery, ExpenseReader, ExpenseWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

fn base_query(query: &ExpenseListQuery) -> crate::schema::expenses::BoxedQuery<'static, Sqlite> {
    use crate::schema::expenses;

    let mut sql = expenses::table
        .filter(expenses::franchise_id.eq(query.franchise_id))
        .into_boxed();

    if let Some(category_id) = query.category_id {
        sql = sql.filter(expenses::category_id.eq(category_id));
    }
    if let (Some(from), Some(to)) = (query.from, query.to) {
        sql = sql.filter(expenses::expense_date.between(from, to));
    }

    sql
}

fn month_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today.with_day(1).unwrap_or(today);
    let end = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    }
    .unwrap_or(start);
    (start, end)
}

impl ExpenseReader for DieselRepository {
    fn list_expenses(
        &self,
        query: ExpenseListQuery,
    ) -> RepositoryResult<(usize, Vec<(Expense, Option<ExpenseCategory>)>)> {
        use crate::schema::{expense_categories, expenses};

        let mut conn = self.conn()?;

        let total: i64 = base_query(&query).count().get_result(&mut conn)?;

        let mut sql = base_query(&query).order(expenses::expense_date.desc());
        if let Some(pagination) = &query.pagination {
            let page = if pagination.page == 0 { 1 } else { pagination.page } as i64;
            let per_page = pagination.per_page as i64;
            sql = sql.limit(per_page).offset((page - 1) * per_page);
        }

        let rows = sql.load::<DbExpense>(&mut conn)?;

        let categories: Vec<DbExpenseCategory> = expense_categories::table
            .filter(expense_categories::franchise_id.eq(query.franchise_id))
            .load(&mut conn)?;

        let expenses = rows
            .into_iter()
            .map(|db_expense| {
                let category = db_expense
                    .category_id
                    .and_then(|id| categories.iter().find(|c| c.id == id))
                    .cloned()
                    .map(ExpenseCategory::from);
                (Expense::from(db_expense), category)
            })
            .collect();

        Ok((total as usize, expenses))
    }

    fn list_expense_categories(
        &self,
        franchise_id: i32,
    ) -> RepositoryResult<Vec<ExpenseCategory>> {
        use crate::schema::expense_categories;

        let mut conn = self.conn()?;
        let categories = expense_categories::table
            .filter(expense_categories::franchise_id.eq(franchise_id))
            .order(expense_categories::name.asc())
            .load::<DbExpenseCategory>(&mut conn)?
            .into_iter()
            .map(ExpenseCategory::from)
            .collect();

        Ok(categories)
    }

    fn get_dashboard_stats(
        &self,
        franchise_id: i32,
        today: NaiveDate,
    ) -> RepositoryResult<DashboardStats> {
        use crate::schema::{bookings, customers, deliveries, products, returns};

        let mut conn = self.conn()?;

        let day_start = today.and_hms_opt(0, 0, 0).ok_or_else(|| {
            RepositoryError::ValidationError("invalid date".to_string())
        })?;
        let day_end = day_start + chrono::Duration::days(1);
        let (month_from, month_to) = month_range(today);
        let month_start = month_from.and_hms_opt(0, 0, 0).unwrap_or(day_start);
        let month_end = month_to.and_hms_opt(0, 0, 0).unwrap_or(day_end);

        let live_bookings = || {
            bookings::table
                .filter(bookings::franchise_id.eq(franchise_id))
                .filter(bookings::is_quote.eq(false))
        };

        let bookings_today: i64 = live_bookings()
            .filter(bookings::created_at.ge(day_start))
            .filter(bookings::created_at.lt(day_end))
            .count()
            .get_result(&mut conn)?;

        let bookings_this_month: i64 = live_bookings()
            .filter(bookings::created_at.ge(month_start))
            .filter(bookings::created_at.lt(month_end))
            .count()
            .get_result(&mut conn)?;

        let revenue_this_month: Option<f64> = live_bookings()
            .filter(bookings::created_at.ge(month_start))
            .filter(bookings::created_at.lt(month_end))
            .select(diesel::dsl::sum(bookings::amount_paid))
            .get_result(&mut conn)?;

        let pending_deliveries: i64 = deliveries::table
            .filter(deliveries::franchise_id.eq(franchise_id))
            .filter(deliveries::status.eq("pending"))
            .count()
            .get_result(&mut conn)?;

        let pending_returns: i64 = returns::table
            .filter(returns::franchise_id.eq(franchise_id))
            .filter(returns::status.eq("pending"))
            .count()
            .get_result(&mut conn)?;

        let low_stock_products: i64 = products::table
            .filter(products::franchise_id.eq(franchise_id))
            .filter(products::is_archived.eq(false))
            .filter(products::stock_available.lt(products::low_stock_threshold))
            .count()
            .get_result(&mut conn)?;

        let customer_count: i64 = customers::table
            .filter(customers::franchise_id.eq(franchise_id))
            .count()
            .get_result(&mut conn)?;

        Ok(DashboardStats {
            bookings_today,
            bookings_this_month,
            revenue_this_month: revenue_this_month.unwrap_or_default(),
            pending_deliveries,
            pending_returns,
            low_stock_products,
            customers: customer_count,
        })
    }
}

impl ExpenseWriter for DieselRepository {
    fn create_expense(&self, new_expense: &NewExpense) -> RepositoryResult<Expense> {
        use crate::schema::expenses;

        let mut conn = self.conn()?;
        let db_expense = diesel::insert_into(expenses::table)
            .values(&DbNewExpense::from(new_expense))
            .get_result::<DbExpense>(&mut conn)?;

        Ok(db_expense.into())
    }

    fn delete_expense(&self, id: i32, franchise_id: i32) -> RepositoryResult<()> {
        use crate::schema::expenses;

        let mut conn = self.conn()?;
        let affected = diesel::delete(
            expenses::table
                .filter(expenses::id.eq(id))
                .filter(expenses::franchise_id.eq(franchise_id)),
        )
        .execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn create_expense_category(
        &self,
        category: &NewExpenseCategory,
    ) -> RepositoryResult<ExpenseCategory> {
        use crate::schema::expense_categories;

        let mut conn = self.conn()?;
        let db_category = diesel::insert_into(expense_categories::table)
            .values(&DbNewExpenseCategory::from(category))
            .get_result::<DbExpenseCategory>(&mut conn)?;

        Ok(db_category.into())
    }

    fn delete_expense_category(&self, id: i32, franchise_id: i32) -> RepositoryResult<()> {
        use crate::schema::{expense_categories, expenses};

        let mut conn = self.conn()?;

        let references: i64 = expenses::table
            .filter(expenses::category_id.eq(id))
            .count()
            .get_result(&mut conn)?;
        if references > 0 {
            return Err(RepositoryError::ConstraintViolation(
                "Category has expenses and cannot be deleted".to_string(),
            ));
        }

        let affected = diesel::delete(
            expense_categories::table
                .filter(expense_categories::id.eq(id))
                .filter(expense_categories::franchise_id.eq(franchise_id)),
        )
        .execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
