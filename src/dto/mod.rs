//! Response shapes the routes serialize. Joined rows from the repository
//! flatten into these so clients never see raw tuples.

use serde::Serialize;

pub mod auth;
pub mod booking;
pub mod coupon;
pub mod delivery;
pub mod expense;
pub mod laundry;
pub mod payment;
pub mod payroll;
pub mod pricing;
pub mod product;
pub mod returns;
pub mod sale;
pub mod woocommerce;

/// A page of results with the total count for the whole filter.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub items: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(total: usize, page: usize, per_page: usize, items: Vec<T>) -> Self {
        Self {
            total,
            page,
            per_page,
            items,
        }
    }
}
