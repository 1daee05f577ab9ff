//! Diesel models for the product catalog and stock ledger.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    Barcode as DomainBarcode, InventoryTransaction as DomainInventoryTransaction,
    NewInventoryTransaction as DomainNewInventoryTransaction, NewProduct as DomainNewProduct,
    NewProductArchiveEntry as DomainNewArchiveEntry, Product as DomainProduct,
    ProductArchiveEntry as DomainArchiveEntry, ProductCategory as DomainProductCategory,
    StockLevels, UpdateProduct as DomainUpdateProduct,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::products)]
/// Diesel model for [`crate::domain::product::Product`].
pub struct Product {
    pub id: i32,
    pub franchise_id: i32,
    pub category_id: Option<i32>,
    pub product_code: String,
    pub name: String,
    pub description: Option<String>,
    pub rental_price: f64,
    pub sale_price: f64,
    pub security_deposit: f64,
    pub stock_total: i32,
    pub stock_available: i32,
    pub stock_reserved: i32,
    pub stock_in_use: i32,
    pub stock_in_laundry: i32,
    pub stock_damaged: i32,
    pub low_stock_threshold: i32,
    pub is_archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
/// Insertable form of [`Product`]. New stock starts fully available.
pub struct NewProduct<'a> {
    pub franchise_id: i32,
    pub category_id: Option<i32>,
    pub product_code: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub rental_price: f64,
    pub sale_price: f64,
    pub security_deposit: f64,
    pub stock_total: i32,
    pub stock_available: i32,
    pub low_stock_threshold: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
/// Data used when updating a [`Product`] record.
pub struct UpdateProduct<'a> {
    pub category_id: Option<i32>,
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub rental_price: Option<f64>,
    pub sale_price: Option<f64>,
    pub security_deposit: Option<f64>,
    pub low_stock_threshold: Option<i32>,
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(updates: &'a DomainUpdateProduct) -> Self {
        Self {
            category_id: updates.category_id,
            name: updates.name.as_deref(),
            description: updates.description.as_deref(),
            rental_price: updates.rental_price,
            sale_price: updates.sale_price,
            security_deposit: updates.security_deposit,
            low_stock_threshold: updates.low_stock_threshold,
        }
    }
}

/// Changeset writing all stock buckets at once.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct StockChangeset {
    pub stock_total: i32,
    pub stock_available: i32,
    pub stock_reserved: i32,
    pub stock_in_use: i32,
    pub stock_in_laundry: i32,
    pub stock_damaged: i32,
}

impl From<StockLevels> for StockChangeset {
    fn from(stock: StockLevels) -> Self {
        Self {
            stock_total: stock.total,
            stock_available: stock.available,
            stock_reserved: stock.reserved,
            stock_in_use: stock.in_use,
            stock_in_laundry: stock.in_laundry,
            stock_damaged: stock.damaged,
        }
    }
}

impl From<Product> for DomainProduct {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            franchise_id: product.franchise_id,
            category_id: product.category_id,
            product_code: product.product_code,
            name: product.name,
            description: product.description,
            rental_price: product.rental_price,
            sale_price: product.sale_price,
            security_deposit: product.security_deposit,
            stock: StockLevels {
                total: product.stock_total,
                available: product.stock_available,
                reserved: product.stock_reserved,
                in_use: product.stock_in_use,
                in_laundry: product.stock_in_laundry,
                damaged: product.stock_damaged,
            },
            low_stock_threshold: product.low_stock_threshold,
            is_archived: product.is_archived,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(product: &'a DomainNewProduct) -> Self {
        Self {
            franchise_id: product.franchise_id,
            category_id: product.category_id,
            product_code: product.product_code.as_str(),
            name: product.name.as_str(),
            description: product.description.as_deref(),
            rental_price: product.rental_price,
            sale_price: product.sale_price,
            security_deposit: product.security_deposit,
            stock_total: product.stock_total,
            stock_available: product.stock_total,
            low_stock_threshold: product.low_stock_threshold,
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::product_categories)]
pub struct ProductCategory {
    pub id: i32,
    pub franchise_id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_categories)]
pub struct NewProductCategory<'a> {
    pub franchise_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl From<ProductCategory> for DomainProductCategory {
    fn from(category: ProductCategory) -> Self {
        Self {
            id: category.id,
            franchise_id: category.franchise_id,
            name: category.name,
            description: category.description,
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Product, foreign_key = product_id))]
#[diesel(table_name = crate::schema::product_barcodes)]
pub struct ProductBarcode {
    pub id: i32,
    pub product_id: i32,
    pub barcode_number: String,
    pub sequence: i32,
    pub status: String,
    pub booking_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_barcodes)]
pub struct NewProductBarcode {
    pub product_id: i32,
    pub barcode_number: String,
    pub sequence: i32,
    pub status: String,
}

impl TryFrom<ProductBarcode> for DomainBarcode {
    type Error = TypeConstraintError;

    fn try_from(barcode: ProductBarcode) -> Result<Self, Self::Error> {
        Ok(Self {
            id: barcode.id,
            product_id: barcode.product_id,
            barcode_number: barcode.barcode_number,
            sequence: barcode.sequence,
            status: barcode.status.parse()?,
            booking_id: barcode.booking_id,
            created_at: barcode.created_at,
        })
    }
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::inventory_transactions)]
pub struct InventoryTransaction {
    pub id: i32,
    pub franchise_id: i32,
    pub product_id: i32,
    pub transaction_type: String,
    pub quantity: i32,
    pub unit_price: Option<f64>,
    pub total_value: Option<f64>,
    pub reference_type: Option<String>,
    pub reference_id: Option<i32>,
    pub notes: Option<String>,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::inventory_transactions)]
pub struct NewInventoryTransaction<'a> {
    pub franchise_id: i32,
    pub product_id: i32,
    pub transaction_type: &'a str,
    pub quantity: i32,
    pub unit_price: Option<f64>,
    pub total_value: Option<f64>,
    pub reference_type: Option<&'a str>,
    pub reference_id: Option<i32>,
    pub notes: Option<&'a str>,
    pub created_by: i32,
}

impl From<InventoryTransaction> for DomainInventoryTransaction {
    fn from(tx: InventoryTransaction) -> Self {
        Self {
            id: tx.id,
            franchise_id: tx.franchise_id,
            product_id: tx.product_id,
            transaction_type: tx.transaction_type,
            quantity: tx.quantity,
            unit_price: tx.unit_price,
            total_value: tx.total_value,
            reference_type: tx.reference_type,
            reference_id: tx.reference_id,
            notes: tx.notes,
            created_by: tx.created_by,
            created_at: tx.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewInventoryTransaction> for NewInventoryTransaction<'a> {
    fn from(tx: &'a DomainNewInventoryTransaction) -> Self {
        Self {
            franchise_id: tx.franchise_id,
            product_id: tx.product_id,
            transaction_type: tx.transaction_type.as_str(),
            quantity: tx.quantity,
            unit_price: tx.unit_price,
            total_value: tx.total_value,
            reference_type: tx.reference_type.as_deref(),
            reference_id: tx.reference_id,
            notes: tx.notes.as_deref(),
            created_by: tx.created_by,
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::product_archive)]
pub struct ProductArchiveEntry {
    pub id: i32,
    pub franchise_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub reason: String,
    pub notes: Option<String>,
    pub archived_by: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_archive)]
pub struct NewProductArchiveEntry<'a> {
    pub franchise_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub reason: String,
    pub notes: Option<&'a str>,
    pub archived_by: i32,
}

impl TryFrom<ProductArchiveEntry> for DomainArchiveEntry {
    type Error = TypeConstraintError;

    fn try_from(entry: ProductArchiveEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entry.id,
            franchise_id: entry.franchise_id,
            product_id: entry.product_id,
            quantity: entry.quantity,
            reason: entry.reason.parse()?,
            notes: entry.notes,
            archived_by: entry.archived_by,
            created_at: entry.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewArchiveEntry> for NewProductArchiveEntry<'a> {
    fn from(entry: &'a DomainNewArchiveEntry) -> Self {
        Self {
            franchise_id: entry.franchise_id,
            product_id: entry.product_id,
            quantity: entry.quantity,
            reason: entry.reason.to_string(),
            notes: entry.notes.as_deref(),
            archived_by: entry.archived_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn product_into_domain_gathers_stock_buckets() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let row = Product {
            id: 1,
            franchise_id: 2,
            category_id: None,
            product_code: "TRB-RED".to_string(),
            name: "Red turban".to_string(),
            description: None,
            rental_price: 500.0,
            sale_price: 2_000.0,
            security_deposit: 1_000.0,
            stock_total: 20,
            stock_available: 10,
            stock_reserved: 4,
            stock_in_use: 3,
            stock_in_laundry: 2,
            stock_damaged: 1,
            low_stock_threshold: 5,
            is_archived: false,
            created_at: now,
            updated_at: now,
        };
        let domain: DomainProduct = row.into();
        assert_eq!(domain.stock.available, 10);
        assert_eq!(domain.stock.damaged, 1);
        assert!(!domain.is_low_stock());
    }

    #[test]
    fn new_product_starts_fully_available() {
        let domain = DomainNewProduct::new(
            2,
            None,
            "trb-red".to_string(),
            "Red turban".to_string(),
            None,
            500.0,
            2_000.0,
            1_000.0,
            15,
            5,
        );
        let new: NewProduct = (&domain).into();
        assert_eq!(new.product_code, "TRB-RED");
        assert_eq!(new.stock_total, 15);
        assert_eq!(new.stock_available, 15);
    }

    #[test]
    fn bad_barcode_status_is_rejected() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let row = ProductBarcode {
            id: 1,
            product_id: 1,
            barcode_number: "TRB-RED-001".to_string(),
            sequence: 1,
            status: "lost".to_string(),
            booking_id: None,
            created_at: now,
        };
        assert!(DomainBarcode::try_from(row).is_err());
    }
}
