//! Repository implementation for customers.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::customer::{Customer, NewCustomer, UpdateCustomer, customer_code},
    models::customer::{
        Customer as DbCustomer, NewCustomer as DbNewCustomer, UpdateCustomer as DbUpdateCustomer,
    },
    repository::{
        CustomerListQuery, CustomerReader, CustomerWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

fn base_query(query: &CustomerListQuery) -> crate::schema::customers::BoxedQuery<'static, Sqlite> {
    use crate::schema::customers;

    let mut sql = customers::table
        .filter(customers::franchise_id.eq(query.franchise_id))
        .into_boxed();

    if let Some(search) = &query.search {
        let pattern = format!("%{search}%");
        sql = sql.filter(
            customers::name
                .like(pattern.clone())
                .or(customers::phone.like(pattern.clone()))
                .or(customers::email.like(pattern.clone()))
                .or(customers::city.like(pattern.clone()))
                .or(customers::customer_code.like(pattern)),
        );
    }
    if let Some(status) = query.status {
        sql = sql.filter(customers::status.eq(status.to_string()));
    }

    sql
}

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(
        &self,
        id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Option<Customer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let db_customer = customers::table
            .filter(customers::id.eq(id))
            .filter(customers::franchise_id.eq(franchise_id))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        match db_customer {
            Some(db_customer) => Ok(Some(
                Customer::try_from(db_customer).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_customers(
        &self,
        query: CustomerListQuery,
    ) -> RepositoryResult<(usize, Vec<Customer>)> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        let total: i64 = base_query(&query).count().get_result(&mut conn)?;

        let mut sql = base_query(&query).order(customers::created_at.desc());
        if let Some(pagination) = &query.pagination {
            let page = if pagination.page == 0 { 1 } else { pagination.page } as i64;
            let per_page = pagination.per_page as i64;
            sql = sql.limit(per_page).offset((page - 1) * per_page);
        }

        let customers = sql
            .load::<DbCustomer>(&mut conn)?
            .into_iter()
            .map(|db_customer| Customer::try_from(db_customer).map_err(RepositoryError::from))
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok((total as usize, customers))
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        let db_customer = conn
            .immediate_transaction::<DbCustomer, diesel::result::Error, _>(|conn| {
                // Codes are minted from the highest suffix ever issued, not the
                // row count, so a deleted customer never frees its code for
                // reuse under the (franchise_id, customer_code) constraint.
                let last_code: Option<String> = customers::table
                    .filter(customers::franchise_id.eq(new_customer.franchise_id))
                    .select(diesel::dsl::max(customers::customer_code))
                    .first(conn)?;
                let next = last_code
                    .as_deref()
                    .and_then(|code| code.rsplit('-').next())
                    .and_then(|suffix| suffix.parse::<i64>().ok())
                    .unwrap_or(0)
                    + 1;

                let db_new_customer =
                    DbNewCustomer::from_domain(new_customer, customer_code(next));

                diesel::insert_into(customers::table)
                    .values(&db_new_customer)
                    .get_result::<DbCustomer>(conn)
            })
            .map_err(RepositoryError::from)?;

        Customer::try_from(db_customer).map_err(RepositoryError::from)
    }

    fn update_customer(
        &self,
        id: i32,
        franchise_id: i32,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateCustomer = updates.into();

        let db_customer = diesel::update(
            customers::table
                .filter(customers::id.eq(id))
                .filter(customers::franchise_id.eq(franchise_id)),
        )
        .set((&db_updates, customers::updated_at.eq(diesel::dsl::now)))
        .get_result::<DbCustomer>(&mut conn)?;

        Customer::try_from(db_customer).map_err(RepositoryError::from)
    }

    fn delete_customer(&self, id: i32, franchise_id: i32) -> RepositoryResult<()> {
        use crate::schema::{bookings, customers};

        let mut conn = self.conn()?;

        let references: i64 = bookings::table
            .filter(bookings::customer_id.eq(id))
            .count()
            .get_result(&mut conn)?;
        if references > 0 {
            return Err(RepositoryError::ConstraintViolation(
                "Customer has bookings and cannot be deleted".to_string(),
            ));
        }

        let affected = diesel::delete(
            customers::table
                .filter(customers::id.eq(id))
                .filter(customers::franchise_id.eq(franchise_id)),
        )
        .execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
