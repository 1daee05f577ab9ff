//! Repository implementation for direct counter sales.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::customer::Customer,
    domain::product::{NewInventoryTransaction, Product},
    domain::sale::{DirectSale, DirectSaleItem, NewDirectSale, NewDirectSaleItem},
    models::customer::Customer as DbCustomer,
    models::sale::{
        DirectSale as DbDirectSale, DirectSaleItem as DbDirectSaleItem,
        NewDirectSale as DbNewDirectSale, NewDirectSaleItem as DbNewDirectSaleItem,
    },
    repository::{
        DieselRepository, SaleListQuery, SaleReader, SaleWriter,
        coupon::record_usage,
        errors::{RepositoryError, RepositoryResult},
        product::{load_product, log_movement, save_stock},
    },
};

fn base_query(query: &SaleListQuery) -> crate::schema::direct_sales::BoxedQuery<'static, Sqlite> {
    use crate::schema::direct_sales;

    let mut sql = direct_sales::table
        .filter(direct_sales::franchise_id.eq(query.franchise_id))
        .into_boxed();

    if let Some(customer_id) = query.customer_id {
        sql = sql.filter(direct_sales::customer_id.eq(customer_id));
    }

    sql
}

impl SaleReader for DieselRepository {
    fn get_sale_by_id(
        &self,
        id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Option<(DirectSale, Vec<DirectSaleItem>)>> {
        use crate::schema::{direct_sale_items, direct_sales};

        let mut conn = self.conn()?;
        let db_sale = direct_sales::table
            .filter(direct_sales::id.eq(id))
            .filter(direct_sales::franchise_id.eq(franchise_id))
            .first::<DbDirectSale>(&mut conn)
            .optional()?;

        match db_sale {
            Some(db_sale) => {
                let items = direct_sale_items::table
                    .filter(direct_sale_items::sale_id.eq(db_sale.id))
                    .order(direct_sale_items::id.asc())
                    .load::<DbDirectSaleItem>(&mut conn)?
                    .into_iter()
                    .map(Into::into)
                    .collect();
                let sale = DirectSale::try_from(db_sale).map_err(RepositoryError::from)?;
                Ok(Some((sale, items)))
            }
            None => Ok(None),
        }
    }

    fn list_sales(
        &self,
        query: SaleListQuery,
    ) -> RepositoryResult<(usize, Vec<(DirectSale, Customer)>)> {
        use crate::schema::{customers, direct_sales};

        let mut conn = self.conn()?;

        let total: i64 = base_query(&query).count().get_result(&mut conn)?;

        let mut sql = base_query(&query).order(direct_sales::created_at.desc());
        if let Some(pagination) = &query.pagination {
            let page = if pagination.page == 0 { 1 } else { pagination.page } as i64;
            let per_page = pagination.per_page as i64;
            sql = sql.limit(per_page).offset((page - 1) * per_page);
        }
        let db_sales = sql.load::<DbDirectSale>(&mut conn)?;

        let customer_ids: Vec<i32> = db_sales.iter().map(|s| s.customer_id).collect();
        let customers: HashMap<i32, Customer> = customers::table
            .filter(customers::id.eq_any(&customer_ids))
            .load::<DbCustomer>(&mut conn)?
            .into_iter()
            .map(|db_customer| {
                let customer = Customer::try_from(db_customer).map_err(RepositoryError::from)?;
                Ok((customer.id, customer))
            })
            .collect::<Result<_, RepositoryError>>()?;

        let mut rows = Vec::with_capacity(db_sales.len());
        for db_sale in db_sales {
            let customer = customers
                .get(&db_sale.customer_id)
                .cloned()
                .ok_or(RepositoryError::NotFound)?;
            let sale = DirectSale::try_from(db_sale).map_err(RepositoryError::from)?;
            rows.push((sale, customer));
        }

        Ok((total as usize, rows))
    }
}

impl SaleWriter for DieselRepository {
    fn create_sale(
        &self,
        new_sale: &NewDirectSale,
        items: &[NewDirectSaleItem],
    ) -> RepositoryResult<DirectSale> {
        use crate::schema::{direct_sale_items, direct_sales};

        let mut conn = self.conn()?;

        let db_sale = conn.immediate_transaction::<DbDirectSale, RepositoryError, _>(|conn| {
            let db_new_sale: DbNewDirectSale = new_sale.into();
            let db_sale = diesel::insert_into(direct_sales::table)
                .values(&db_new_sale)
                .get_result::<DbDirectSale>(conn)?;

            let rows: Vec<DbNewDirectSaleItem> = items
                .iter()
                .map(|item| DbNewDirectSaleItem::from_domain(db_sale.id, item))
                .collect();
            diesel::insert_into(direct_sale_items::table)
                .values(&rows)
                .execute(conn)?;

            for item in items {
                let db_product = load_product(conn, item.product_id, new_sale.franchise_id)?;
                let stock = Product::from(db_product).stock.sell(item.quantity)?;
                save_stock(conn, item.product_id, stock)?;

                log_movement(
                    conn,
                    &NewInventoryTransaction {
                        franchise_id: new_sale.franchise_id,
                        product_id: item.product_id,
                        transaction_type: "sale".to_string(),
                        quantity: -item.quantity,
                        unit_price: Some(item.unit_price),
                        total_value: Some(item.line_total()),
                        reference_type: Some("direct_sale".to_string()),
                        reference_id: Some(db_sale.id),
                        notes: None,
                        created_by: new_sale.created_by,
                    },
                )?;
            }

            if let Some(coupon_id) = new_sale.coupon_id {
                record_usage(conn, coupon_id, new_sale.customer_id, None)?;
            }

            Ok(db_sale)
        })?;

        DirectSale::try_from(db_sale).map_err(RepositoryError::from)
    }
}
