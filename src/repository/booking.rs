//! Repository implementation for bookings and quotes.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::{
    domain::booking::{
        Booking, BookingItem, BookingKind, BookingStatus, BookingType, NewBooking,
        NewBookingItem, UpdateBooking,
    },
    domain::customer::Customer,
    domain::product::{InventoryOperation, NewInventoryTransaction, Product},
    models::booking::{
        Booking as DbBooking, BookingItem as DbBookingItem, NewBooking as DbNewBooking,
        NewBookingItem as DbNewBookingItem, UpdateBooking as DbUpdateBooking,
    },
    models::customer::Customer as DbCustomer,
    repository::{
        BookingListQuery, BookingReader, BookingWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
        product::{load_product, log_movement, save_stock, signed_quantity},
    },
};

fn base_query(query: &BookingListQuery) -> crate::schema::bookings::BoxedQuery<'static, Sqlite> {
    use crate::schema::bookings;

    let mut sql = bookings::table
        .filter(bookings::franchise_id.eq(query.franchise_id))
        .filter(bookings::is_quote.eq(query.quotes))
        .into_boxed();

    if !query.include_archived {
        sql = sql.filter(bookings::is_archived.eq(false));
    }
    if let Some(status) = query.status {
        sql = sql.filter(bookings::status.eq(status.to_string()));
    }
    if let Some(kind) = query.kind {
        sql = sql.filter(bookings::kind.eq(kind.to_string()));
    }
    if let Some(customer_id) = query.customer_id {
        sql = sql.filter(bookings::customer_id.eq(customer_id));
    }

    sql
}

/// Moves every line of a booking through one stock operation and leaves an
/// audit row per product.
pub(super) fn move_booking_stock(
    conn: &mut SqliteConnection,
    franchise_id: i32,
    booking_id: i32,
    operation: InventoryOperation,
    lines: &[(i32, i32)],
    acting_user: i32,
) -> Result<(), RepositoryError> {
    for &(product_id, quantity) in lines {
        let db_product = load_product(conn, product_id, franchise_id)?;
        let stock = Product::from(db_product).stock.apply(operation, quantity)?;
        save_stock(conn, product_id, stock)?;

        log_movement(
            conn,
            &NewInventoryTransaction {
                franchise_id,
                product_id,
                transaction_type: operation.to_string(),
                quantity: signed_quantity(operation, quantity),
                unit_price: None,
                total_value: None,
                reference_type: Some("booking".to_string()),
                reference_id: Some(booking_id),
                notes: None,
                created_by: acting_user,
            },
        )?;
    }
    Ok(())
}

fn booking_reserves_stock(kind: BookingKind, booking_type: BookingType) -> bool {
    kind == BookingKind::Product && booking_type == BookingType::Rental
}

impl BookingReader for DieselRepository {
    fn get_booking_by_id(&self, id: i32, franchise_id: i32) -> RepositoryResult<Option<Booking>> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;
        let db_booking = bookings::table
            .filter(bookings::id.eq(id))
            .filter(bookings::franchise_id.eq(franchise_id))
            .first::<DbBooking>(&mut conn)
            .optional()?;

        match db_booking {
            Some(db_booking) => Ok(Some(
                Booking::try_from(db_booking).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn get_booking_with_items(
        &self,
        id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Option<(Booking, Vec<BookingItem>)>> {
        use crate::schema::{booking_items, bookings};

        let mut conn = self.conn()?;
        let db_booking = bookings::table
            .filter(bookings::id.eq(id))
            .filter(bookings::franchise_id.eq(franchise_id))
            .first::<DbBooking>(&mut conn)
            .optional()?;

        match db_booking {
            Some(db_booking) => {
                let items = booking_items::table
                    .filter(booking_items::booking_id.eq(db_booking.id))
                    .order(booking_items::id.asc())
                    .load::<DbBookingItem>(&mut conn)?
                    .into_iter()
                    .map(Into::into)
                    .collect();
                let booking = Booking::try_from(db_booking).map_err(RepositoryError::from)?;
                Ok(Some((booking, items)))
            }
            None => Ok(None),
        }
    }

    fn list_bookings(
        &self,
        query: BookingListQuery,
    ) -> RepositoryResult<(usize, Vec<(Booking, Customer)>)> {
        use crate::schema::{bookings, customers};

        let mut conn = self.conn()?;

        let total: i64 = base_query(&query).count().get_result(&mut conn)?;

        let mut sql = base_query(&query).order(bookings::created_at.desc());
        if let Some(pagination) = &query.pagination {
            let page = if pagination.page == 0 { 1 } else { pagination.page } as i64;
            let per_page = pagination.per_page as i64;
            sql = sql.limit(per_page).offset((page - 1) * per_page);
        }
        let db_bookings = sql.load::<DbBooking>(&mut conn)?;

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

        let mut rows = Vec::with_capacity(db_bookings.len());
        for db_booking in db_bookings {
            let customer = customers
                .get(&db_booking.customer_id)
                .cloned()
                .ok_or(RepositoryError::NotFound)?;
            let booking = Booking::try_from(db_booking).map_err(RepositoryError::from)?;
            rows.push((booking, customer));
        }

        Ok((total as usize, rows))
    }

    fn list_booking_items(&self, booking_id: i32) -> RepositoryResult<Vec<BookingItem>> {
        use crate::schema::booking_items;

        let mut conn = self.conn()?;
        let db_items = booking_items::table
            .filter(booking_items::booking_id.eq(booking_id))
            .order(booking_items::id.asc())
            .load::<DbBookingItem>(&mut conn)?;

        Ok(db_items.into_iter().map(Into::into).collect())
    }
}

impl BookingWriter for DieselRepository {
    fn create_booking(
        &self,
        new_booking: &NewBooking,
        items: &[NewBookingItem],
    ) -> RepositoryResult<Booking> {
        use crate::schema::{booking_items, bookings};

        let mut conn = self.conn()?;

        let db_booking = conn.immediate_transaction::<DbBooking, RepositoryError, _>(|conn| {
            let db_new_booking: DbNewBooking = new_booking.into();
            let db_booking = diesel::insert_into(bookings::table)
                .values(&db_new_booking)
                .get_result::<DbBooking>(conn)?;

            let rows: Vec<DbNewBookingItem> = items
                .iter()
                .map(|item| DbNewBookingItem::from_domain(db_booking.id, item))
                .collect();
            diesel::insert_into(booking_items::table)
                .values(&rows)
                .execute(conn)?;

            // Quotes hold no stock; sale bookings take units only at
            // delivery.
            if !new_booking.is_quote
                && booking_reserves_stock(new_booking.kind, new_booking.booking_type)
            {
                let lines: Vec<(i32, i32)> = items
                    .iter()
                    .map(|item| (item.product_id, item.quantity))
                    .collect();
                move_booking_stock(
                    conn,
                    new_booking.franchise_id,
                    db_booking.id,
                    InventoryOperation::Reserve,
                    &lines,
                    new_booking.created_by,
                )?;
            }

            Ok(db_booking)
        })?;

        Booking::try_from(db_booking).map_err(RepositoryError::from)
    }

    fn update_booking(
        &self,
        id: i32,
        franchise_id: i32,
        updates: &UpdateBooking,
    ) -> RepositoryResult<Booking> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateBooking::from(updates);

        let db_booking = diesel::update(
            bookings::table
                .filter(bookings::id.eq(id))
                .filter(bookings::franchise_id.eq(franchise_id)),
        )
        .set((&db_updates, bookings::updated_at.eq(diesel::dsl::now)))
        .get_result::<DbBooking>(&mut conn)?;

        Booking::try_from(db_booking).map_err(RepositoryError::from)
    }

    fn update_booking_status(
        &self,
        id: i32,
        franchise_id: i32,
        status: BookingStatus,
    ) -> RepositoryResult<Booking> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;
        let db_booking = diesel::update(
            bookings::table
                .filter(bookings::id.eq(id))
                .filter(bookings::franchise_id.eq(franchise_id)),
        )
        .set((
            bookings::status.eq(status.to_string()),
            bookings::updated_at.eq(diesel::dsl::now),
        ))
        .get_result::<DbBooking>(&mut conn)?;

        Booking::try_from(db_booking).map_err(RepositoryError::from)
    }

    fn cancel_booking(
        &self,
        id: i32,
        franchise_id: i32,
        acting_user: i32,
    ) -> RepositoryResult<Booking> {
        use crate::schema::{booking_items, bookings};

        let mut conn = self.conn()?;

        let db_booking = conn.immediate_transaction::<DbBooking, RepositoryError, _>(|conn| {
            let db_booking = bookings::table
                .filter(bookings::id.eq(id))
                .filter(bookings::franchise_id.eq(franchise_id))
                .first::<DbBooking>(conn)?;

            let status: BookingStatus =
                db_booking.status.parse().map_err(RepositoryError::from)?;
            if !status.booking_editable() {
                return Err(RepositoryError::ValidationError(
                    "Only pending or confirmed bookings can be cancelled".to_string(),
                ));
            }

            let kind: BookingKind = db_booking.kind.parse().map_err(RepositoryError::from)?;
            let booking_type: BookingType = db_booking
                .booking_type
                .parse()
                .map_err(RepositoryError::from)?;

            if !db_booking.is_quote && booking_reserves_stock(kind, booking_type) {
                let lines: Vec<(i32, i32)> = booking_items::table
                    .filter(booking_items::booking_id.eq(db_booking.id))
                    .load::<DbBookingItem>(conn)?
                    .into_iter()
                    .map(|item| (item.product_id, item.quantity))
                    .collect();
                move_booking_stock(
                    conn,
                    franchise_id,
                    db_booking.id,
                    InventoryOperation::Release,
                    &lines,
                    acting_user,
                )?;
            }

            let db_booking = diesel::update(bookings::table.find(db_booking.id))
                .set((
                    bookings::status.eq(BookingStatus::Cancelled.to_string()),
                    bookings::updated_at.eq(diesel::dsl::now),
                ))
                .get_result::<DbBooking>(conn)?;

            Ok(db_booking)
        })?;

        Booking::try_from(db_booking).map_err(RepositoryError::from)
    }

    fn set_booking_archived(
        &self,
        id: i32,
        franchise_id: i32,
        archived: bool,
    ) -> RepositoryResult<Booking> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;
        let db_booking = diesel::update(
            bookings::table
                .filter(bookings::id.eq(id))
                .filter(bookings::franchise_id.eq(franchise_id)),
        )
        .set((
            bookings::is_archived.eq(archived),
            bookings::updated_at.eq(diesel::dsl::now),
        ))
        .get_result::<DbBooking>(&mut conn)?;

        Booking::try_from(db_booking).map_err(RepositoryError::from)
    }

    fn convert_quote(
        &self,
        quote_id: i32,
        franchise_id: i32,
        booking_number: &str,
        acting_user: i32,
    ) -> RepositoryResult<Booking> {
        use crate::schema::{booking_items, bookings};

        let mut conn = self.conn()?;

        let db_booking = conn.immediate_transaction::<DbBooking, RepositoryError, _>(|conn| {
            let quote = bookings::table
                .filter(bookings::id.eq(quote_id))
                .filter(bookings::franchise_id.eq(franchise_id))
                .first::<DbBooking>(conn)?;

            if !quote.is_quote {
                return Err(RepositoryError::ValidationError(
                    "Booking is not a quote".to_string(),
                ));
            }
            let status: BookingStatus = quote.status.parse().map_err(RepositoryError::from)?;
            if !status.quote_convertible() {
                return Err(RepositoryError::ValidationError(
                    "Quote has already been converted or has invalid status".to_string(),
                ));
            }

            diesel::update(bookings::table.find(quote.id))
                .set((
                    bookings::status.eq(BookingStatus::Converted.to_string()),
                    bookings::updated_at.eq(diesel::dsl::now),
                ))
                .execute(conn)?;

            let db_new_booking = DbNewBooking {
                franchise_id: quote.franchise_id,
                customer_id: quote.customer_id,
                booking_number,
                kind: quote.kind.clone(),
                booking_type: quote.booking_type.clone(),
                is_quote: false,
                status: BookingStatus::Confirmed.to_string(),
                event_date: quote.event_date,
                delivery_date: quote.delivery_date,
                return_date: quote.return_date,
                venue_address: quote.venue_address.as_deref(),
                package_id: quote.package_id,
                variant_id: quote.variant_id,
                distance_km: quote.distance_km,
                subtotal: quote.subtotal,
                discount_amount: quote.discount_amount,
                coupon_id: quote.coupon_id,
                distance_addon: quote.distance_addon,
                gst_amount: quote.gst_amount,
                total_amount: quote.total_amount,
                security_deposit: quote.security_deposit,
                notes: quote.notes.as_deref(),
                created_by: acting_user,
            };
            let db_booking = diesel::insert_into(bookings::table)
                .values(&db_new_booking)
                .get_result::<DbBooking>(conn)?;

            let quote_items = booking_items::table
                .filter(booking_items::booking_id.eq(quote.id))
                .load::<DbBookingItem>(conn)?;
            let rows: Vec<DbNewBookingItem> = quote_items
                .iter()
                .map(|item| DbNewBookingItem {
                    booking_id: db_booking.id,
                    product_id: item.product_id,
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                    line_total: item.line_total,
                })
                .collect();
            diesel::insert_into(booking_items::table)
                .values(&rows)
                .execute(conn)?;

            let kind: BookingKind = quote.kind.parse().map_err(RepositoryError::from)?;
            let booking_type: BookingType =
                quote.booking_type.parse().map_err(RepositoryError::from)?;
            if booking_reserves_stock(kind, booking_type) {
                let lines: Vec<(i32, i32)> = quote_items
                    .iter()
                    .map(|item| (item.product_id, item.quantity))
                    .collect();
                move_booking_stock(
                    conn,
                    franchise_id,
                    db_booking.id,
                    InventoryOperation::Reserve,
                    &lines,
                    acting_user,
                )?;
            }

            Ok(db_booking)
        })?;

        Booking::try_from(db_booking).map_err(RepositoryError::from)
    }
}
