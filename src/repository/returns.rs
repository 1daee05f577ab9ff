//! Repository implementation for rental returns.

use std::collections::HashMap;

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::booking::{Booking, BookingItem, BookingStatus},
    domain::customer::Customer,
    domain::product::{ArchiveReason, NewInventoryTransaction, Product},
    domain::returns::{Return, ReturnItem, ReturnLine, ReturnStatus},
    models::booking::{Booking as DbBooking, BookingItem as DbBookingItem},
    models::customer::Customer as DbCustomer,
    models::laundry::{
        LaundryBatch as DbLaundryBatch, NewLaundryBatch as DbNewLaundryBatch,
        NewLaundryItem as DbNewLaundryItem,
    },
    models::product::{NewProductArchiveEntry as DbNewArchiveEntry, Product as DbProduct},
    models::returns::{
        NewReturnItem as DbNewReturnItem, Return as DbReturn, ReturnItem as DbReturnItem,
    },
    repository::{
        DieselRepository, ReturnListQuery, ReturnReader, ReturnWriter,
        errors::{RepositoryError, RepositoryResult},
        product::{load_product, log_movement, save_stock},
    },
};

fn base_query(query: &ReturnListQuery) -> crate::schema::returns::BoxedQuery<'static, Sqlite> {
    use crate::schema::returns;

    let mut sql = returns::table
        .filter(returns::franchise_id.eq(query.franchise_id))
        .into_boxed();

    if let Some(status) = query.status {
        sql = sql.filter(returns::status.eq(status.to_string()));
    }
    if let Some(booking_id) = query.booking_id {
        sql = sql.filter(returns::booking_id.eq(booking_id));
    }

    sql
}

impl ReturnReader for DieselRepository {
    fn get_return_by_id(&self, id: i32, franchise_id: i32) -> RepositoryResult<Option<Return>> {
        use crate::schema::returns;

        let mut conn = self.conn()?;
        let db_return = returns::table
            .filter(returns::id.eq(id))
            .filter(returns::franchise_id.eq(franchise_id))
            .first::<DbReturn>(&mut conn)
            .optional()?;

        match db_return {
            Some(db_return) => Ok(Some(
                Return::try_from(db_return).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_returns(
        &self,
        query: ReturnListQuery,
    ) -> RepositoryResult<(usize, Vec<(Return, Booking, Customer)>)> {
        use crate::schema::{bookings, customers, returns};

        let mut conn = self.conn()?;

        let total: i64 = base_query(&query).count().get_result(&mut conn)?;

        let mut sql = base_query(&query).order((
            returns::scheduled_date.asc(),
            returns::created_at.desc(),
        ));
        if let Some(pagination) = &query.pagination {
            let page = if pagination.page == 0 { 1 } else { pagination.page } as i64;
            let per_page = pagination.per_page as i64;
            sql = sql.limit(per_page).offset((page - 1) * per_page);
        }
        let db_returns = sql.load::<DbReturn>(&mut conn)?;

        let booking_ids: Vec<i32> = db_returns.iter().map(|r| r.booking_id).collect();
        let db_bookings = bookings::table
            .filter(bookings::id.eq_any(&booking_ids))
            .load::<DbBooking>(&mut conn)?;

        let customer_ids: Vec<i32> = db_bookings.iter().map(|b| b.customer_id).collect();
        let customers: HashMap<i32, Customer> = customers::table
            .filter(customers::id.eq_any(&customer_ids))
            .load::<DbCustomer>(&mut conn)?
            .into_iter()
            .map(|db_customer| {
                let customer = Customer::try_from(db_customer).map_err(RepositoryError::from)?;
                Ok((customer.id, customer))
            })
            .collect::<Result<_, RepositoryError>>()?;

        let bookings: HashMap<i32, Booking> = db_bookings
            .into_iter()
            .map(|db_booking| {
                let booking = Booking::try_from(db_booking).map_err(RepositoryError::from)?;
                Ok((booking.id, booking))
            })
            .collect::<Result<_, RepositoryError>>()?;

        let mut rows = Vec::with_capacity(db_returns.len());
        for db_return in db_returns {
            let booking = bookings
                .get(&db_return.booking_id)
                .cloned()
                .ok_or(RepositoryError::NotFound)?;
            let customer = customers
                .get(&booking.customer_id)
                .cloned()
                .ok_or(RepositoryError::NotFound)?;
            let ret = Return::try_from(db_return).map_err(RepositoryError::from)?;
            rows.push((ret, booking, customer));
        }

        Ok((total as usize, rows))
    }

    fn list_return_items(
        &self,
        return_id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Vec<ReturnItem>> {
        use crate::schema::{return_items, returns};

        let mut conn = self.conn()?;
        let db_items = return_items::table
            .inner_join(returns::table)
            .filter(return_items::return_id.eq(return_id))
            .filter(returns::franchise_id.eq(franchise_id))
            .select(return_items::all_columns)
            .order(return_items::id.asc())
            .load::<DbReturnItem>(&mut conn)?;

        Ok(db_items.into_iter().map(Into::into).collect())
    }

    fn get_return_preview(
        &self,
        id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Vec<(BookingItem, Product)>> {
        use crate::schema::{booking_items, products, returns};

        let mut conn = self.conn()?;

        let db_return = returns::table
            .filter(returns::id.eq(id))
            .filter(returns::franchise_id.eq(franchise_id))
            .first::<DbReturn>(&mut conn)?;

        let db_items = booking_items::table
            .filter(booking_items::booking_id.eq(db_return.booking_id))
            .order(booking_items::id.asc())
            .load::<DbBookingItem>(&mut conn)?;

        let product_ids: Vec<i32> = db_items.iter().map(|i| i.product_id).collect();
        let products: HashMap<i32, Product> = products::table
            .filter(products::id.eq_any(&product_ids))
            .filter(products::franchise_id.eq(franchise_id))
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(|db_product| {
                let product = Product::from(db_product);
                (product.id, product)
            })
            .collect();

        let mut rows = Vec::with_capacity(db_items.len());
        for db_item in db_items {
            let product = products
                .get(&db_item.product_id)
                .cloned()
                .ok_or(RepositoryError::NotFound)?;
            rows.push((db_item.into(), product));
        }

        Ok(rows)
    }
}

impl ReturnWriter for DieselRepository {
    fn process_return(
        &self,
        id: i32,
        franchise_id: i32,
        lines: &[ReturnLine],
        send_to_laundry: bool,
        laundry_batch_number: Option<&str>,
        processed_by: i32,
    ) -> RepositoryResult<Return> {
        use crate::schema::{
            bookings, laundry_batches, laundry_items, product_archive, return_items, returns,
        };

        let mut conn = self.conn()?;

        let db_return = conn.immediate_transaction::<DbReturn, RepositoryError, _>(|conn| {
            let db_return = returns::table
                .filter(returns::id.eq(id))
                .filter(returns::franchise_id.eq(franchise_id))
                .first::<DbReturn>(conn)?;

            let status: ReturnStatus = db_return.status.parse().map_err(RepositoryError::from)?;
            if status != ReturnStatus::Pending {
                return Err(RepositoryError::ValidationError(
                    "Return has already been processed or cancelled".to_string(),
                ));
            }

            for line in lines {
                line.validate()?;
            }

            let rows: Vec<DbNewReturnItem> = lines
                .iter()
                .map(|line| DbNewReturnItem::from_line(db_return.id, line))
                .collect();
            diesel::insert_into(return_items::table)
                .values(&rows)
                .execute(conn)?;

            for line in lines {
                let db_product = load_product(conn, line.product_id, franchise_id)?;
                let stock = line
                    .stock_delta(send_to_laundry)
                    .apply_to(Product::from(db_product).stock);
                save_stock(conn, line.product_id, stock)?;

                log_movement(
                    conn,
                    &NewInventoryTransaction {
                        franchise_id,
                        product_id: line.product_id,
                        transaction_type: "return".to_string(),
                        quantity: -line.qty_delivered,
                        unit_price: None,
                        total_value: None,
                        reference_type: Some("return".to_string()),
                        reference_id: Some(db_return.id),
                        notes: None,
                        created_by: processed_by,
                    },
                )?;

                if line.qty_damaged > 0 {
                    diesel::insert_into(product_archive::table)
                        .values(&DbNewArchiveEntry {
                            franchise_id,
                            product_id: line.product_id,
                            quantity: line.qty_damaged,
                            reason: ArchiveReason::Damaged.to_string(),
                            notes: line.damage_reason.as_deref(),
                            archived_by: processed_by,
                        })
                        .execute(conn)?;
                }
                if line.qty_lost > 0 {
                    diesel::insert_into(product_archive::table)
                        .values(&DbNewArchiveEntry {
                            franchise_id,
                            product_id: line.product_id,
                            quantity: line.qty_lost,
                            reason: ArchiveReason::Lost.to_string(),
                            notes: line.lost_reason.as_deref(),
                            archived_by: processed_by,
                        })
                        .execute(conn)?;
                }
            }

            if send_to_laundry {
                let laundry_lines: Vec<&ReturnLine> =
                    lines.iter().filter(|line| line.qty_returned > 0).collect();
                if !laundry_lines.is_empty() {
                    let batch_number = laundry_batch_number.ok_or_else(|| {
                        RepositoryError::ValidationError(
                            "A batch number is required to send returned items to laundry"
                                .to_string(),
                        )
                    })?;

                    // Stock already sits in the laundry bucket via the line
                    // deltas; dispatching this batch must not move it again.
                    let db_batch = diesel::insert_into(laundry_batches::table)
                        .values(&DbNewLaundryBatch {
                            franchise_id,
                            batch_number,
                            auto_created: true,
                            return_id: Some(db_return.id),
                            expected_date: None,
                            notes: Some("Created while processing the return"),
                        })
                        .get_result::<DbLaundryBatch>(conn)?;

                    let item_rows: Vec<DbNewLaundryItem> = laundry_lines
                        .iter()
                        .map(|line| DbNewLaundryItem {
                            batch_id: db_batch.id,
                            product_id: line.product_id,
                            quantity: line.qty_returned,
                            condition_before: None,
                        })
                        .collect();
                    diesel::insert_into(laundry_items::table)
                        .values(&item_rows)
                        .execute(conn)?;
                }
            }

            diesel::update(bookings::table.find(db_return.booking_id))
                .set((
                    bookings::status.eq(BookingStatus::Returned.to_string()),
                    bookings::updated_at.eq(diesel::dsl::now),
                ))
                .execute(conn)?;

            let db_return = diesel::update(returns::table.find(db_return.id))
                .set((
                    returns::status.eq(ReturnStatus::Completed.to_string()),
                    returns::processed_at.eq(diesel::dsl::now),
                    returns::processed_by.eq(Some(processed_by)),
                    returns::updated_at.eq(diesel::dsl::now),
                ))
                .get_result::<DbReturn>(conn)?;

            Ok(db_return)
        })?;

        Return::try_from(db_return).map_err(RepositoryError::from)
    }

    fn update_return_schedule(
        &self,
        id: i32,
        franchise_id: i32,
        scheduled_date: Option<NaiveDate>,
        notes: Option<&str>,
    ) -> RepositoryResult<Return> {
        use crate::schema::returns;

        let mut conn = self.conn()?;

        let return_id: i32 = returns::table
            .filter(returns::id.eq(id))
            .filter(returns::franchise_id.eq(franchise_id))
            .select(returns::id)
            .first(&mut conn)?;

        if let Some(date) = scheduled_date {
            diesel::update(returns::table.find(return_id))
                .set(returns::scheduled_date.eq(date))
                .execute(&mut conn)?;
        }
        if let Some(notes) = notes {
            diesel::update(returns::table.find(return_id))
                .set(returns::notes.eq(notes))
                .execute(&mut conn)?;
        }

        let db_return = diesel::update(returns::table.find(return_id))
            .set(returns::updated_at.eq(diesel::dsl::now))
            .get_result::<DbReturn>(&mut conn)?;

        Return::try_from(db_return).map_err(RepositoryError::from)
    }

    fn cancel_return(&self, id: i32, franchise_id: i32) -> RepositoryResult<Return> {
        use crate::schema::returns;

        let mut conn = self.conn()?;

        let db_return = conn.immediate_transaction::<DbReturn, RepositoryError, _>(|conn| {
            let db_return = returns::table
                .filter(returns::id.eq(id))
                .filter(returns::franchise_id.eq(franchise_id))
                .first::<DbReturn>(conn)?;

            let status: ReturnStatus = db_return.status.parse().map_err(RepositoryError::from)?;
            if status != ReturnStatus::Pending {
                return Err(RepositoryError::ValidationError(
                    "Only pending returns can be cancelled".to_string(),
                ));
            }

            let db_return = diesel::update(returns::table.find(db_return.id))
                .set((
                    returns::status.eq(ReturnStatus::Cancelled.to_string()),
                    returns::updated_at.eq(diesel::dsl::now),
                ))
                .get_result::<DbReturn>(conn)?;

            Ok(db_return)
        })?;

        Return::try_from(db_return).map_err(RepositoryError::from)
    }
}
