//! Repository implementation for deliveries and their status machine.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::booking::{Booking, BookingKind, BookingStatus, BookingType},
    domain::customer::Customer,
    domain::delivery::{Delivery, DeliveryStatus, NewDelivery, UpdateDelivery},
    domain::product::{InventoryOperation, NewInventoryTransaction, Product},
    models::booking::{Booking as DbBooking, BookingItem as DbBookingItem},
    models::customer::Customer as DbCustomer,
    models::delivery::{
        Delivery as DbDelivery, NewDelivery as DbNewDelivery, UpdateDelivery as DbUpdateDelivery,
    },
    models::returns::NewReturn as DbNewReturn,
    repository::{
        DeliveryListQuery, DeliveryReader, DeliveryWriter, DieselRepository,
        booking::move_booking_stock,
        errors::{RepositoryError, RepositoryResult},
        product::{load_product, log_movement, save_stock},
    },
};

fn base_query(query: &DeliveryListQuery) -> crate::schema::deliveries::BoxedQuery<'static, Sqlite> {
    use crate::schema::deliveries;

    let mut sql = deliveries::table
        .filter(deliveries::franchise_id.eq(query.franchise_id))
        .into_boxed();

    if let Some(status) = query.status {
        sql = sql.filter(deliveries::status.eq(status.to_string()));
    }
    if let Some(booking_id) = query.booking_id {
        sql = sql.filter(deliveries::booking_id.eq(booking_id));
    }
    if let Some(assigned_to) = query.assigned_to {
        sql = sql.filter(deliveries::assigned_to.eq(assigned_to));
    }

    sql
}

impl DeliveryReader for DieselRepository {
    fn get_delivery_by_id(
        &self,
        id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Option<Delivery>> {
        use crate::schema::deliveries;

        let mut conn = self.conn()?;
        let db_delivery = deliveries::table
            .filter(deliveries::id.eq(id))
            .filter(deliveries::franchise_id.eq(franchise_id))
            .first::<DbDelivery>(&mut conn)
            .optional()?;

        match db_delivery {
            Some(db_delivery) => Ok(Some(
                Delivery::try_from(db_delivery).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_deliveries(
        &self,
        query: DeliveryListQuery,
    ) -> RepositoryResult<(usize, Vec<(Delivery, Booking, Customer)>)> {
        use crate::schema::{bookings, customers, deliveries};

        let mut conn = self.conn()?;

        let total: i64 = base_query(&query).count().get_result(&mut conn)?;

        let mut sql = base_query(&query).order((
            deliveries::scheduled_date.asc(),
            deliveries::created_at.desc(),
        ));
        if let Some(pagination) = &query.pagination {
            let page = if pagination.page == 0 { 1 } else { pagination.page } as i64;
            let per_page = pagination.per_page as i64;
            sql = sql.limit(per_page).offset((page - 1) * per_page);
        }
        let db_deliveries = sql.load::<DbDelivery>(&mut conn)?;

        let booking_ids: Vec<i32> = db_deliveries.iter().map(|d| d.booking_id).collect();
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

        let mut rows = Vec::with_capacity(db_deliveries.len());
        for db_delivery in db_deliveries {
            let booking = bookings
                .get(&db_delivery.booking_id)
                .cloned()
                .ok_or(RepositoryError::NotFound)?;
            let customer = customers
                .get(&booking.customer_id)
                .cloned()
                .ok_or(RepositoryError::NotFound)?;
            let delivery = Delivery::try_from(db_delivery).map_err(RepositoryError::from)?;
            rows.push((delivery, booking, customer));
        }

        Ok((total as usize, rows))
    }
}

impl DeliveryWriter for DieselRepository {
    fn create_delivery(&self, new_delivery: &NewDelivery) -> RepositoryResult<Delivery> {
        use crate::schema::{bookings, deliveries};

        let mut conn = self.conn()?;

        let booking: Option<i32> = bookings::table
            .filter(bookings::id.eq(new_delivery.booking_id))
            .filter(bookings::franchise_id.eq(new_delivery.franchise_id))
            .filter(bookings::is_quote.eq(false))
            .select(bookings::id)
            .first(&mut conn)
            .optional()?;
        if booking.is_none() {
            return Err(RepositoryError::NotFound);
        }

        let db_new_delivery: DbNewDelivery = new_delivery.into();
        let db_delivery = diesel::insert_into(deliveries::table)
            .values(&db_new_delivery)
            .get_result::<DbDelivery>(&mut conn)?;

        Delivery::try_from(db_delivery).map_err(RepositoryError::from)
    }

    fn update_delivery(
        &self,
        id: i32,
        franchise_id: i32,
        updates: &UpdateDelivery,
    ) -> RepositoryResult<Delivery> {
        use crate::schema::deliveries;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateDelivery::from(updates);

        let db_delivery = diesel::update(
            deliveries::table
                .filter(deliveries::id.eq(id))
                .filter(deliveries::franchise_id.eq(franchise_id)),
        )
        .set((&db_updates, deliveries::updated_at.eq(diesel::dsl::now)))
        .get_result::<DbDelivery>(&mut conn)?;

        Delivery::try_from(db_delivery).map_err(RepositoryError::from)
    }

    fn transition_delivery(
        &self,
        id: i32,
        franchise_id: i32,
        status: DeliveryStatus,
        notes: Option<&str>,
        return_number: Option<&str>,
        acting_user: i32,
    ) -> RepositoryResult<Delivery> {
        use crate::schema::{booking_items, bookings, deliveries, returns};

        let mut conn = self.conn()?;

        let db_delivery = conn.immediate_transaction::<DbDelivery, RepositoryError, _>(|conn| {
            let db_delivery = deliveries::table
                .filter(deliveries::id.eq(id))
                .filter(deliveries::franchise_id.eq(franchise_id))
                .first::<DbDelivery>(conn)?;

            let current: DeliveryStatus =
                db_delivery.status.parse().map_err(RepositoryError::from)?;
            if !current.can_transition_to(status) {
                return Err(RepositoryError::ValidationError(format!(
                    "Cannot change delivery status from {current} to {status}"
                )));
            }

            if let Some(notes) = notes {
                diesel::update(deliveries::table.find(db_delivery.id))
                    .set(deliveries::special_instructions.eq(notes))
                    .execute(conn)?;
            }

            if status != DeliveryStatus::Delivered {
                let db_delivery = diesel::update(deliveries::table.find(db_delivery.id))
                    .set((
                        deliveries::status.eq(status.to_string()),
                        deliveries::updated_at.eq(diesel::dsl::now),
                    ))
                    .get_result::<DbDelivery>(conn)?;
                return Ok(db_delivery);
            }

            let db_delivery = diesel::update(deliveries::table.find(db_delivery.id))
                .set((
                    deliveries::status.eq(status.to_string()),
                    deliveries::delivered_at.eq(diesel::dsl::now),
                    deliveries::updated_at.eq(diesel::dsl::now),
                ))
                .get_result::<DbDelivery>(conn)?;

            let booking = bookings::table
                .filter(bookings::id.eq(db_delivery.booking_id))
                .filter(bookings::franchise_id.eq(franchise_id))
                .first::<DbBooking>(conn)?;
            let kind: BookingKind = booking.kind.parse().map_err(RepositoryError::from)?;
            let booking_type: BookingType = booking
                .booking_type
                .parse()
                .map_err(RepositoryError::from)?;

            let items = booking_items::table
                .filter(booking_items::booking_id.eq(booking.id))
                .load::<DbBookingItem>(conn)?;

            match booking_type {
                BookingType::Rental => {
                    if kind == BookingKind::Product {
                        let lines: Vec<(i32, i32)> = items
                            .iter()
                            .map(|item| (item.product_id, item.quantity))
                            .collect();
                        move_booking_stock(
                            conn,
                            franchise_id,
                            booking.id,
                            InventoryOperation::Confirm,
                            &lines,
                            acting_user,
                        )?;
                    }

                    diesel::update(bookings::table.find(booking.id))
                        .set((
                            bookings::status.eq(BookingStatus::Delivered.to_string()),
                            bookings::updated_at.eq(diesel::dsl::now),
                        ))
                        .execute(conn)?;

                    // Rentals come back; open the paperwork for that now.
                    let return_number = return_number.ok_or_else(|| {
                        RepositoryError::ValidationError(
                            "A return number is required when delivering a rental".to_string(),
                        )
                    })?;
                    diesel::insert_into(returns::table)
                        .values(&DbNewReturn {
                            franchise_id,
                            booking_id: booking.id,
                            delivery_id: db_delivery.id,
                            return_number,
                            scheduled_date: booking.return_date,
                            notes: Some("Auto-created on delivery"),
                        })
                        .execute(conn)?;
                }
                BookingType::Sale => {
                    if kind == BookingKind::Product {
                        for item in &items {
                            let db_product = load_product(conn, item.product_id, franchise_id)?;
                            let stock = Product::from(db_product).stock.sell(item.quantity)?;
                            save_stock(conn, item.product_id, stock)?;

                            log_movement(
                                conn,
                                &NewInventoryTransaction {
                                    franchise_id,
                                    product_id: item.product_id,
                                    transaction_type: "sale".to_string(),
                                    quantity: -item.quantity,
                                    unit_price: Some(item.unit_price),
                                    total_value: Some(item.line_total),
                                    reference_type: Some("booking".to_string()),
                                    reference_id: Some(booking.id),
                                    notes: None,
                                    created_by: acting_user,
                                },
                            )?;
                        }
                    }

                    diesel::update(bookings::table.find(booking.id))
                        .set((
                            bookings::status.eq(BookingStatus::OrderComplete.to_string()),
                            bookings::updated_at.eq(diesel::dsl::now),
                        ))
                        .execute(conn)?;
                }
            }

            Ok(db_delivery)
        })?;

        Delivery::try_from(db_delivery).map_err(RepositoryError::from)
    }
}
