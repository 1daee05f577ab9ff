use serde::Serialize;

use crate::domain::product::{Product, ProductArchiveEntry};

/// Outcome of a bulk product import.
#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub created: usize,
    pub updated: usize,
}

#[derive(Debug, Serialize)]
pub struct ArchiveRow {
    #[serde(flatten)]
    pub entry: ProductArchiveEntry,
    pub product_code: String,
    pub product_name: String,
}

impl From<(ProductArchiveEntry, Product)> for ArchiveRow {
    fn from((entry, product): (ProductArchiveEntry, Product)) -> Self {
        Self {
            entry,
            product_code: product.product_code,
            product_name: product.name,
        }
    }
}
