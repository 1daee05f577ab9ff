//! Repository implementation for the product catalog, stock buckets,
//! barcodes and the archive.

use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::{
    domain::product::{
        Barcode, BarcodeStatus, InventoryOperation, InventoryTransaction,
        NewInventoryTransaction, NewProduct, NewProductArchiveEntry, Product,
        ProductArchiveEntry, ProductCategory, StockLevels, UpdateProduct, barcode_number,
    },
    models::product::{
        InventoryTransaction as DbInventoryTransaction,
        NewInventoryTransaction as DbNewInventoryTransaction, NewProduct as DbNewProduct,
        NewProductArchiveEntry as DbNewArchiveEntry, NewProductBarcode as DbNewProductBarcode,
        NewProductCategory as DbNewProductCategory, Product as DbProduct,
        ProductArchiveEntry as DbArchiveEntry, ProductBarcode as DbProductBarcode,
        ProductCategory as DbProductCategory, StockChangeset, UpdateProduct as DbUpdateProduct,
    },
    repository::{
        DieselRepository, InventoryTransactionQuery, ProductListQuery, ProductReader,
        ProductWriter, StockMovement,
        errors::{RepositoryError, RepositoryResult},
    },
};

fn base_query(query: &ProductListQuery) -> crate::schema::products::BoxedQuery<'static, Sqlite> {
    use crate::schema::products;

    let mut sql = products::table
        .filter(products::franchise_id.eq(query.franchise_id))
        .into_boxed();

    if !query.include_archived {
        sql = sql.filter(products::is_archived.eq(false));
    }
    if let Some(category_id) = query.category_id {
        sql = sql.filter(products::category_id.eq(category_id));
    }
    if let Some(search) = &query.search {
        let pattern = format!("%{search}%");
        sql = sql.filter(
            products::name
                .like(pattern.clone())
                .or(products::product_code.like(pattern)),
        );
    }

    sql
}

pub(super) fn load_product(
    conn: &mut SqliteConnection,
    id: i32,
    franchise_id: i32,
) -> Result<DbProduct, diesel::result::Error> {
    use crate::schema::products;

    products::table
        .filter(products::id.eq(id))
        .filter(products::franchise_id.eq(franchise_id))
        .first::<DbProduct>(conn)
}

pub(super) fn save_stock(
    conn: &mut SqliteConnection,
    product_id: i32,
    stock: StockLevels,
) -> Result<DbProduct, diesel::result::Error> {
    use crate::schema::products;

    diesel::update(products::table.find(product_id))
        .set((
            StockChangeset::from(stock),
            products::updated_at.eq(diesel::dsl::now),
        ))
        .get_result::<DbProduct>(conn)
}

pub(super) fn log_movement(
    conn: &mut SqliteConnection,
    entry: &NewInventoryTransaction,
) -> Result<usize, diesel::result::Error> {
    use crate::schema::inventory_transactions;

    let db_entry: DbNewInventoryTransaction = entry.into();
    diesel::insert_into(inventory_transactions::table)
        .values(&db_entry)
        .execute(conn)
}

/// Positive into the bucket the operation names, negative out of it.
pub(super) fn signed_quantity(operation: InventoryOperation, quantity: i32) -> i32 {
    match operation {
        InventoryOperation::Reserve | InventoryOperation::Confirm => quantity,
        InventoryOperation::Release | InventoryOperation::Return => -quantity,
    }
}

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32, franchise_id: i32) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_product = products::table
            .filter(products::id.eq(id))
            .filter(products::franchise_id.eq(franchise_id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(db_product.map(Into::into))
    }

    fn get_product_by_code(
        &self,
        code: &str,
        franchise_id: i32,
    ) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_product = products::table
            .filter(products::product_code.eq(code.trim().to_uppercase()))
            .filter(products::franchise_id.eq(franchise_id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(db_product.map(Into::into))
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let total: i64 = base_query(&query).count().get_result(&mut conn)?;

        let mut sql = base_query(&query).order(products::name.asc());
        if let Some(pagination) = &query.pagination {
            let page = if pagination.page == 0 { 1 } else { pagination.page } as i64;
            let per_page = pagination.per_page as i64;
            sql = sql.limit(per_page).offset((page - 1) * per_page);
        }

        let products = sql
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total as usize, products))
    }

    fn list_low_stock_products(&self, franchise_id: i32) -> RepositoryResult<Vec<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_products = products::table
            .filter(products::franchise_id.eq(franchise_id))
            .filter(products::is_archived.eq(false))
            .filter(products::stock_available.lt(products::low_stock_threshold))
            .order(products::stock_available.asc())
            .load::<DbProduct>(&mut conn)?;

        Ok(db_products.into_iter().map(Into::into).collect())
    }

    fn list_product_categories(
        &self,
        franchise_id: i32,
    ) -> RepositoryResult<Vec<ProductCategory>> {
        use crate::schema::product_categories;

        let mut conn = self.conn()?;
        let db_categories = product_categories::table
            .filter(product_categories::franchise_id.eq(franchise_id))
            .order(product_categories::name.asc())
            .load::<DbProductCategory>(&mut conn)?;

        Ok(db_categories.into_iter().map(Into::into).collect())
    }

    fn list_inventory_transactions(
        &self,
        query: InventoryTransactionQuery,
    ) -> RepositoryResult<Vec<InventoryTransaction>> {
        use crate::schema::inventory_transactions;

        let mut conn = self.conn()?;

        let mut sql = inventory_transactions::table
            .filter(inventory_transactions::franchise_id.eq(query.franchise_id))
            .into_boxed();
        if let Some(product_id) = query.product_id {
            sql = sql.filter(inventory_transactions::product_id.eq(product_id));
        }
        if let Some(transaction_type) = &query.transaction_type {
            sql = sql.filter(inventory_transactions::transaction_type.eq(transaction_type.clone()));
        }

        let db_entries = sql
            .order(inventory_transactions::created_at.desc())
            .limit(query.limit)
            .load::<DbInventoryTransaction>(&mut conn)?;

        Ok(db_entries.into_iter().map(Into::into).collect())
    }

    fn get_barcode_by_number(
        &self,
        barcode_number: &str,
        franchise_id: i32,
    ) -> RepositoryResult<Option<Barcode>> {
        use crate::schema::{product_barcodes, products};

        let mut conn = self.conn()?;
        let db_barcode = product_barcodes::table
            .inner_join(products::table)
            .filter(product_barcodes::barcode_number.eq(barcode_number))
            .filter(products::franchise_id.eq(franchise_id))
            .select(product_barcodes::all_columns)
            .first::<DbProductBarcode>(&mut conn)
            .optional()?;

        match db_barcode {
            Some(db_barcode) => Ok(Some(
                Barcode::try_from(db_barcode).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_barcodes_for_product(
        &self,
        product_id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Vec<Barcode>> {
        use crate::schema::{product_barcodes, products};

        let mut conn = self.conn()?;
        let db_barcodes = product_barcodes::table
            .inner_join(products::table)
            .filter(product_barcodes::product_id.eq(product_id))
            .filter(products::franchise_id.eq(franchise_id))
            .select(product_barcodes::all_columns)
            .order(product_barcodes::sequence.asc())
            .load::<DbProductBarcode>(&mut conn)?;

        db_barcodes
            .into_iter()
            .map(|db_barcode| Barcode::try_from(db_barcode).map_err(RepositoryError::from))
            .collect()
    }

    fn list_archive_entries(
        &self,
        franchise_id: i32,
    ) -> RepositoryResult<Vec<(ProductArchiveEntry, Product)>> {
        use crate::schema::{product_archive, products};

        let mut conn = self.conn()?;
        let rows = product_archive::table
            .inner_join(products::table)
            .filter(product_archive::franchise_id.eq(franchise_id))
            .select((product_archive::all_columns, products::all_columns))
            .order(product_archive::created_at.desc())
            .load::<(DbArchiveEntry, DbProduct)>(&mut conn)?;

        rows.into_iter()
            .map(|(db_entry, db_product)| {
                let entry =
                    ProductArchiveEntry::try_from(db_entry).map_err(RepositoryError::from)?;
                Ok((entry, db_product.into()))
            })
            .collect()
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_new_product: DbNewProduct = new_product.into();

        let db_product = diesel::insert_into(products::table)
            .values(&db_new_product)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(db_product.into())
    }

    fn update_product(
        &self,
        id: i32,
        franchise_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        let db_product = diesel::update(
            products::table
                .filter(products::id.eq(id))
                .filter(products::franchise_id.eq(franchise_id)),
        )
        .set((&db_updates, products::updated_at.eq(diesel::dsl::now)))
        .get_result::<DbProduct>(&mut conn)?;

        Ok(db_product.into())
    }

    fn set_product_archived(
        &self,
        id: i32,
        franchise_id: i32,
        archived: bool,
    ) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_product = diesel::update(
            products::table
                .filter(products::id.eq(id))
                .filter(products::franchise_id.eq(franchise_id)),
        )
        .set((
            products::is_archived.eq(archived),
            products::updated_at.eq(diesel::dsl::now),
        ))
        .get_result::<DbProduct>(&mut conn)?;

        Ok(db_product.into())
    }

    fn create_product_category(
        &self,
        franchise_id: i32,
        name: &str,
        description: Option<&str>,
    ) -> RepositoryResult<ProductCategory> {
        use crate::schema::product_categories;

        let mut conn = self.conn()?;
        let db_new_category = DbNewProductCategory {
            franchise_id,
            name,
            description,
        };

        let db_category = diesel::insert_into(product_categories::table)
            .values(&db_new_category)
            .get_result::<DbProductCategory>(&mut conn)?;

        Ok(db_category.into())
    }

    fn delete_product_category(&self, id: i32, franchise_id: i32) -> RepositoryResult<()> {
        use crate::schema::{product_categories, products};

        let mut conn = self.conn()?;

        let affected = conn
            .transaction::<usize, diesel::result::Error, _>(|conn| {
                diesel::update(products::table.filter(products::category_id.eq(id)))
                    .set(products::category_id.eq(None::<i32>))
                    .execute(conn)?;

                diesel::delete(
                    product_categories::table
                        .filter(product_categories::id.eq(id))
                        .filter(product_categories::franchise_id.eq(franchise_id)),
                )
                .execute(conn)
            })
            .map_err(RepositoryError::from)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn move_stock(
        &self,
        franchise_id: i32,
        operation: InventoryOperation,
        movements: &[StockMovement],
        booking_id: Option<i32>,
        acting_user: i32,
    ) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        conn.immediate_transaction::<(), RepositoryError, _>(|conn| {
            for movement in movements {
                let db_product = load_product(conn, movement.product_id, franchise_id)?;
                let stock = Product::from(db_product).stock.apply(operation, movement.quantity)?;
                save_stock(conn, movement.product_id, stock)?;

                log_movement(
                    conn,
                    &NewInventoryTransaction {
                        franchise_id,
                        product_id: movement.product_id,
                        transaction_type: operation.to_string(),
                        quantity: signed_quantity(operation, movement.quantity),
                        unit_price: None,
                        total_value: None,
                        reference_type: booking_id.map(|_| "booking".to_string()),
                        reference_id: booking_id,
                        notes: None,
                        created_by: acting_user,
                    },
                )?;
            }
            Ok(())
        })
    }

    fn adjust_product_stock(
        &self,
        product_id: i32,
        franchise_id: i32,
        quantity_delta: i32,
        notes: Option<&str>,
        acting_user: i32,
    ) -> RepositoryResult<Product> {
        let mut conn = self.conn()?;

        let db_product = conn.immediate_transaction::<DbProduct, RepositoryError, _>(|conn| {
            let db_product = load_product(conn, product_id, franchise_id)?;
            let stock = Product::from(db_product).stock;
            let stock = if quantity_delta >= 0 {
                stock.restock(quantity_delta)?
            } else {
                stock.write_off(-quantity_delta)?
            };
            let db_product = save_stock(conn, product_id, stock)?;

            log_movement(
                conn,
                &NewInventoryTransaction {
                    franchise_id,
                    product_id,
                    transaction_type: "adjustment".to_string(),
                    quantity: quantity_delta,
                    unit_price: None,
                    total_value: None,
                    reference_type: None,
                    reference_id: None,
                    notes: notes.map(ToString::to_string),
                    created_by: acting_user,
                },
            )?;

            Ok(db_product)
        })?;

        Ok(db_product.into())
    }

    fn import_products(
        &self,
        franchise_id: i32,
        rows: &[NewProduct],
    ) -> RepositoryResult<(usize, usize)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<(usize, usize), RepositoryError, _>(|conn| {
            let mut created = 0;
            let mut updated = 0;

            for row in rows {
                let existing = products::table
                    .filter(products::franchise_id.eq(franchise_id))
                    .filter(products::product_code.eq(&row.product_code))
                    .first::<DbProduct>(conn)
                    .optional()?;

                match existing {
                    // Imports refresh catalog fields but never touch live
                    // stock buckets.
                    Some(db_product) => {
                        diesel::update(products::table.find(db_product.id))
                            .set((
                                products::name.eq(&row.name),
                                products::description.eq(row.description.as_deref()),
                                products::category_id.eq(row.category_id),
                                products::rental_price.eq(row.rental_price),
                                products::sale_price.eq(row.sale_price),
                                products::security_deposit.eq(row.security_deposit),
                                products::low_stock_threshold.eq(row.low_stock_threshold),
                                products::updated_at.eq(diesel::dsl::now),
                            ))
                            .execute(conn)?;
                        updated += 1;
                    }
                    None => {
                        let db_new_product: DbNewProduct = row.into();
                        diesel::insert_into(products::table)
                            .values(&db_new_product)
                            .execute(conn)?;
                        created += 1;
                    }
                }
            }

            Ok((created, updated))
        })
    }

    fn generate_barcodes(
        &self,
        product_id: i32,
        franchise_id: i32,
        count: i32,
        acting_user: i32,
    ) -> RepositoryResult<Vec<Barcode>> {
        use crate::schema::product_barcodes;

        if count <= 0 {
            return Err(RepositoryError::ValidationError(
                "Barcode count must be positive".to_string(),
            ));
        }

        let mut conn = self.conn()?;

        let db_barcodes = conn.immediate_transaction::<Vec<DbProductBarcode>, RepositoryError, _>(|conn| {
            let db_product = load_product(conn, product_id, franchise_id)?;

            let last_sequence: Option<i32> = product_barcodes::table
                .filter(product_barcodes::product_id.eq(product_id))
                .select(diesel::dsl::max(product_barcodes::sequence))
                .first(conn)?;
            let start = last_sequence.unwrap_or(0) + 1;

            let mut minted = Vec::with_capacity(count as usize);
            for sequence in start..start + count {
                let db_new_barcode = DbNewProductBarcode {
                    product_id,
                    barcode_number: barcode_number(&db_product.product_code, sequence),
                    sequence,
                    status: BarcodeStatus::Available.to_string(),
                };
                let db_barcode = diesel::insert_into(product_barcodes::table)
                    .values(&db_new_barcode)
                    .get_result::<DbProductBarcode>(conn)?;
                minted.push(db_barcode);
            }

            // Every minted barcode is a physical unit entering the fleet.
            let stock = Product::from(db_product).stock.restock(count)?;
            save_stock(conn, product_id, stock)?;

            log_movement(
                conn,
                &NewInventoryTransaction {
                    franchise_id,
                    product_id,
                    transaction_type: "restock".to_string(),
                    quantity: count,
                    unit_price: None,
                    total_value: None,
                    reference_type: None,
                    reference_id: None,
                    notes: Some("Barcode generation".to_string()),
                    created_by: acting_user,
                },
            )?;

            Ok(minted)
        })?;

        db_barcodes
            .into_iter()
            .map(|db_barcode| Barcode::try_from(db_barcode).map_err(RepositoryError::from))
            .collect()
    }

    fn scan_barcode(
        &self,
        barcode_number: &str,
        franchise_id: i32,
        booking_id: Option<i32>,
    ) -> RepositoryResult<Barcode> {
        use crate::schema::{product_barcodes, products};

        let mut conn = self.conn()?;

        let db_barcode = conn.immediate_transaction::<DbProductBarcode, RepositoryError, _>(|conn| {
            let db_barcode = product_barcodes::table
                .inner_join(products::table)
                .filter(product_barcodes::barcode_number.eq(barcode_number))
                .filter(products::franchise_id.eq(franchise_id))
                .select(product_barcodes::all_columns)
                .first::<DbProductBarcode>(conn)?;

            let status: BarcodeStatus = db_barcode
                .status
                .parse()
                .map_err(RepositoryError::from)?;

            let db_barcode = match status {
                BarcodeStatus::Available => {
                    let booking_id = booking_id.ok_or_else(|| {
                        RepositoryError::ValidationError(
                            "Scanning a unit out requires a booking".to_string(),
                        )
                    })?;
                    diesel::update(product_barcodes::table.find(db_barcode.id))
                        .set((
                            product_barcodes::status.eq(BarcodeStatus::InUse.to_string()),
                            product_barcodes::booking_id.eq(Some(booking_id)),
                        ))
                        .get_result::<DbProductBarcode>(conn)?
                }
                BarcodeStatus::InUse => diesel::update(product_barcodes::table.find(db_barcode.id))
                    .set((
                        product_barcodes::status.eq(BarcodeStatus::Available.to_string()),
                        product_barcodes::booking_id.eq(None::<i32>),
                    ))
                    .get_result::<DbProductBarcode>(conn)?,
                BarcodeStatus::Damaged | BarcodeStatus::Retired => {
                    return Err(RepositoryError::ValidationError(format!(
                        "Barcode {barcode_number} is {status} and cannot be scanned"
                    )));
                }
            };

            Ok(db_barcode)
        })?;

        Barcode::try_from(db_barcode).map_err(RepositoryError::from)
    }

    fn retire_barcode(
        &self,
        barcode_number: &str,
        franchise_id: i32,
        damaged: bool,
    ) -> RepositoryResult<Barcode> {
        use crate::schema::{product_barcodes, products};

        let mut conn = self.conn()?;

        let barcode_id: i32 = product_barcodes::table
            .inner_join(products::table)
            .filter(product_barcodes::barcode_number.eq(barcode_number))
            .filter(products::franchise_id.eq(franchise_id))
            .select(product_barcodes::id)
            .first(&mut conn)?;

        let status = if damaged {
            BarcodeStatus::Damaged
        } else {
            BarcodeStatus::Retired
        };

        let db_barcode = diesel::update(product_barcodes::table.find(barcode_id))
            .set((
                product_barcodes::status.eq(status.to_string()),
                product_barcodes::booking_id.eq(None::<i32>),
            ))
            .get_result::<DbProductBarcode>(&mut conn)?;

        Barcode::try_from(db_barcode).map_err(RepositoryError::from)
    }

    fn archive_product_units(
        &self,
        entry: &NewProductArchiveEntry,
    ) -> RepositoryResult<ProductArchiveEntry> {
        use crate::schema::product_archive;

        let mut conn = self.conn()?;

        let db_entry = conn.immediate_transaction::<DbArchiveEntry, RepositoryError, _>(|conn| {
            let db_product = load_product(conn, entry.product_id, entry.franchise_id)?;
            let stock = Product::from(db_product).stock.write_off(entry.quantity)?;
            save_stock(conn, entry.product_id, stock)?;

            let db_new_entry: DbNewArchiveEntry = entry.into();
            let db_entry = diesel::insert_into(product_archive::table)
                .values(&db_new_entry)
                .get_result::<DbArchiveEntry>(conn)?;

            log_movement(
                conn,
                &NewInventoryTransaction {
                    franchise_id: entry.franchise_id,
                    product_id: entry.product_id,
                    transaction_type: "write_off".to_string(),
                    quantity: -entry.quantity,
                    unit_price: None,
                    total_value: None,
                    reference_type: Some("product_archive".to_string()),
                    reference_id: Some(db_entry.id),
                    notes: entry.notes.clone(),
                    created_by: entry.archived_by,
                },
            )?;

            Ok(db_entry)
        })?;

        ProductArchiveEntry::try_from(db_entry).map_err(RepositoryError::from)
    }

    fn restore_archived_units(
        &self,
        entry_id: i32,
        franchise_id: i32,
        acting_user: i32,
    ) -> RepositoryResult<()> {
        use crate::schema::product_archive;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<(), RepositoryError, _>(|conn| {
            let db_entry = product_archive::table
                .filter(product_archive::id.eq(entry_id))
                .filter(product_archive::franchise_id.eq(franchise_id))
                .first::<DbArchiveEntry>(conn)?;

            let db_product = load_product(conn, db_entry.product_id, franchise_id)?;
            let stock = Product::from(db_product).stock.restock(db_entry.quantity)?;
            save_stock(conn, db_entry.product_id, stock)?;

            diesel::delete(product_archive::table.find(entry_id)).execute(conn)?;

            log_movement(
                conn,
                &NewInventoryTransaction {
                    franchise_id,
                    product_id: db_entry.product_id,
                    transaction_type: "restock".to_string(),
                    quantity: db_entry.quantity,
                    unit_price: None,
                    total_value: None,
                    reference_type: Some("product_archive".to_string()),
                    reference_id: Some(entry_id),
                    notes: Some("Restored from archive".to_string()),
                    created_by: acting_user,
                },
            )?;

            Ok(())
        })
    }
}
