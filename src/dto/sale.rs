use serde::Serialize;

use crate::domain::customer::Customer;
use crate::domain::sale::{DirectSale, DirectSaleItem};

#[derive(Debug, Serialize)]
pub struct SaleSummary {
    #[serde(flatten)]
    pub sale: DirectSale,
    pub customer_name: String,
    pub customer_phone: String,
}

impl From<(DirectSale, Customer)> for SaleSummary {
    fn from((sale, customer): (DirectSale, Customer)) -> Self {
        Self {
            sale,
            customer_name: customer.name,
            customer_phone: customer.phone,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaleDetail {
    #[serde(flatten)]
    pub sale: DirectSale,
    pub items: Vec<DirectSaleItem>,
}

impl From<(DirectSale, Vec<DirectSaleItem>)> for SaleDetail {
    fn from((sale, items): (DirectSale, Vec<DirectSaleItem>)) -> Self {
        Self { sale, items }
    }
}
