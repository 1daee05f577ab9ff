//! Repository implementation for laundry batches.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::laundry::{
        LaundryBatch, LaundryItem, LaundryReceiptLine, LaundryStatus, NewLaundryBatch,
        NewLaundryItem,
    },
    domain::product::Product,
    models::laundry::{
        LaundryBatch as DbLaundryBatch, LaundryItem as DbLaundryItem,
        NewLaundryBatch as DbNewLaundryBatch, NewLaundryItem as DbNewLaundryItem,
    },
    repository::{
        DieselRepository, LaundryListQuery, LaundryReader, LaundryWriter,
        errors::{RepositoryError, RepositoryResult},
        product::{load_product, save_stock},
    },
};

fn base_query(
    query: &LaundryListQuery,
) -> crate::schema::laundry_batches::BoxedQuery<'static, Sqlite> {
    use crate::schema::laundry_batches;

    let mut sql = laundry_batches::table
        .filter(laundry_batches::franchise_id.eq(query.franchise_id))
        .into_boxed();

    if let Some(status) = query.status {
        sql = sql.filter(laundry_batches::status.eq(status.to_string()));
    }

    sql
}

impl LaundryReader for DieselRepository {
    fn get_laundry_batch_by_id(
        &self,
        id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Option<(LaundryBatch, Vec<LaundryItem>)>> {
        use crate::schema::{laundry_batches, laundry_items};

        let mut conn = self.conn()?;
        let db_batch = laundry_batches::table
            .filter(laundry_batches::id.eq(id))
            .filter(laundry_batches::franchise_id.eq(franchise_id))
            .first::<DbLaundryBatch>(&mut conn)
            .optional()?;

        let Some(db_batch) = db_batch else {
            return Ok(None);
        };

        let items = laundry_items::table
            .filter(laundry_items::batch_id.eq(db_batch.id))
            .order(laundry_items::id.asc())
            .load::<DbLaundryItem>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        let batch = LaundryBatch::try_from(db_batch).map_err(RepositoryError::from)?;
        Ok(Some((batch, items)))
    }

    fn list_laundry_batches(
        &self,
        query: LaundryListQuery,
    ) -> RepositoryResult<(usize, Vec<LaundryBatch>)> {
        use crate::schema::laundry_batches;

        let mut conn = self.conn()?;

        let total: i64 = base_query(&query).count().get_result(&mut conn)?;

        let mut sql = base_query(&query).order(laundry_batches::created_at.desc());
        if let Some(pagination) = &query.pagination {
            let page = if pagination.page == 0 { 1 } else { pagination.page } as i64;
            let per_page = pagination.per_page as i64;
            sql = sql.limit(per_page).offset((page - 1) * per_page);
        }

        let batches = sql
            .load::<DbLaundryBatch>(&mut conn)?
            .into_iter()
            .map(|db_batch| LaundryBatch::try_from(db_batch).map_err(RepositoryError::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total as usize, batches))
    }
}

impl LaundryWriter for DieselRepository {
    fn create_laundry_batch(
        &self,
        new_batch: &NewLaundryBatch,
        items: &[NewLaundryItem],
    ) -> RepositoryResult<LaundryBatch> {
        use crate::schema::{laundry_batches, laundry_items};

        let mut conn = self.conn()?;

        let db_batch = conn
            .transaction::<DbLaundryBatch, diesel::result::Error, _>(|conn| {
                let db_batch = diesel::insert_into(laundry_batches::table)
                    .values(&DbNewLaundryBatch::from(new_batch))
                    .get_result::<DbLaundryBatch>(conn)?;

                let rows: Vec<DbNewLaundryItem> = items
                    .iter()
                    .map(|item| DbNewLaundryItem::from_domain(db_batch.id, item))
                    .collect();
                diesel::insert_into(laundry_items::table)
                    .values(&rows)
                    .execute(conn)?;

                Ok(db_batch)
            })
            .map_err(RepositoryError::from)?;

        LaundryBatch::try_from(db_batch).map_err(RepositoryError::from)
    }

    fn send_laundry_batch(
        &self,
        id: i32,
        franchise_id: i32,
        expected_date: Option<NaiveDate>,
    ) -> RepositoryResult<LaundryBatch> {
        use crate::schema::{laundry_batches, laundry_items};

        let mut conn = self.conn()?;

        let db_batch = conn.immediate_transaction::<DbLaundryBatch, RepositoryError, _>(|conn| {
            let db_batch = laundry_batches::table
                .filter(laundry_batches::id.eq(id))
                .filter(laundry_batches::franchise_id.eq(franchise_id))
                .first::<DbLaundryBatch>(conn)?;

            let status: LaundryStatus = db_batch.status.parse().map_err(RepositoryError::from)?;
            if !status.can_transition_to(LaundryStatus::InLaundry) {
                return Err(RepositoryError::ValidationError(
                    "Only pending batches can be sent to laundry".to_string(),
                ));
            }

            // Units of an auto-created batch moved into the laundry bucket
            // when the return was processed.
            if !db_batch.auto_created {
                let items = laundry_items::table
                    .filter(laundry_items::batch_id.eq(db_batch.id))
                    .load::<DbLaundryItem>(conn)?;

                for item in items {
                    let db_product = load_product(conn, item.product_id, franchise_id)?;
                    let stock = Product::from(db_product)
                        .stock
                        .send_to_laundry(item.quantity)?;
                    save_stock(conn, item.product_id, stock)?;
                }
            }

            if let Some(date) = expected_date {
                diesel::update(laundry_batches::table.find(db_batch.id))
                    .set(laundry_batches::expected_date.eq(date))
                    .execute(conn)?;
            }

            let db_batch = diesel::update(laundry_batches::table.find(db_batch.id))
                .set((
                    laundry_batches::status.eq(LaundryStatus::InLaundry.to_string()),
                    laundry_batches::sent_at.eq(diesel::dsl::now),
                ))
                .get_result::<DbLaundryBatch>(conn)?;

            Ok(db_batch)
        })?;

        LaundryBatch::try_from(db_batch).map_err(RepositoryError::from)
    }

    fn receive_laundry_batch(
        &self,
        id: i32,
        franchise_id: i32,
        receipts: &[LaundryReceiptLine],
    ) -> RepositoryResult<LaundryBatch> {
        use crate::schema::{laundry_batches, laundry_items};

        let mut conn = self.conn()?;

        let db_batch = conn.immediate_transaction::<DbLaundryBatch, RepositoryError, _>(|conn| {
            let db_batch = laundry_batches::table
                .filter(laundry_batches::id.eq(id))
                .filter(laundry_batches::franchise_id.eq(franchise_id))
                .first::<DbLaundryBatch>(conn)?;

            let status: LaundryStatus = db_batch.status.parse().map_err(RepositoryError::from)?;
            if !status.can_transition_to(LaundryStatus::Received) {
                return Err(RepositoryError::ValidationError(
                    "Only batches out at laundry can be received".to_string(),
                ));
            }

            let items = laundry_items::table
                .filter(laundry_items::batch_id.eq(db_batch.id))
                .load::<DbLaundryItem>(conn)?;

            for item in items {
                let receipt = receipts.iter().find(|r| r.product_id == item.product_id);
                let qty_damaged = receipt.map_or(0, |r| r.qty_damaged);
                let condition_after = receipt.and_then(|r| r.condition_after.as_deref());

                let db_product = load_product(conn, item.product_id, franchise_id)?;
                let stock = Product::from(db_product)
                    .stock
                    .receive_from_laundry(item.quantity, qty_damaged)?;
                save_stock(conn, item.product_id, stock)?;

                diesel::update(laundry_items::table.find(item.id))
                    .set((
                        laundry_items::condition_after.eq(condition_after),
                        laundry_items::qty_damaged.eq(qty_damaged),
                    ))
                    .execute(conn)?;
            }

            let db_batch = diesel::update(laundry_batches::table.find(db_batch.id))
                .set((
                    laundry_batches::status.eq(LaundryStatus::Received.to_string()),
                    laundry_batches::received_at.eq(diesel::dsl::now),
                ))
                .get_result::<DbLaundryBatch>(conn)?;

            Ok(db_batch)
        })?;

        LaundryBatch::try_from(db_batch).map_err(RepositoryError::from)
    }

    fn cancel_laundry_batch(&self, id: i32, franchise_id: i32) -> RepositoryResult<LaundryBatch> {
        use crate::schema::laundry_batches;

        let mut conn = self.conn()?;

        let db_batch = conn.immediate_transaction::<DbLaundryBatch, RepositoryError, _>(|conn| {
            let db_batch = laundry_batches::table
                .filter(laundry_batches::id.eq(id))
                .filter(laundry_batches::franchise_id.eq(franchise_id))
                .first::<DbLaundryBatch>(conn)?;

            let status: LaundryStatus = db_batch.status.parse().map_err(RepositoryError::from)?;
            if status != LaundryStatus::Pending {
                return Err(RepositoryError::ValidationError(
                    "Only pending batches can be cancelled".to_string(),
                ));
            }
            if db_batch.auto_created {
                return Err(RepositoryError::ValidationError(
                    "Batches created by a return cannot be cancelled".to_string(),
                ));
            }

            let db_batch = diesel::update(laundry_batches::table.find(db_batch.id))
                .set(laundry_batches::status.eq(LaundryStatus::Cancelled.to_string()))
                .get_result::<DbLaundryBatch>(conn)?;

            Ok(db_batch)
        })?;

        LaundryBatch::try_from(db_batch).map_err(RepositoryError::from)
    }
}
