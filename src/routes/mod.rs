//! HTTP surface. Handlers stay thin: extract, call the service, serialize.

use actix_web::web;

pub mod auth;
pub mod bookings;
pub mod coupons;
pub mod customers;
pub mod deliveries;
pub mod expenses;
pub mod franchises;
pub mod inventory;
pub mod laundry;
pub mod notifications;
pub mod payments;
pub mod payroll;
pub mod pricing;
pub mod products;
pub mod returns;
pub mod sales;
pub mod settings;
pub mod staff;
pub mod woocommerce;

/// Scope filter super admins pass explicitly; franchise users are pinned to
/// their own franchise regardless.
#[derive(Debug, serde::Deserialize)]
pub struct ScopeQuery {
    pub franchise_id: Option<i32>,
}

/// Registers every API handler under the caller's scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    auth::configure(cfg);
    franchises::configure(cfg);
    staff::configure(cfg);
    customers::configure(cfg);
    products::configure(cfg);
    inventory::configure(cfg);
    pricing::configure(cfg);
    bookings::configure(cfg);
    sales::configure(cfg);
    deliveries::configure(cfg);
    returns::configure(cfg);
    laundry::configure(cfg);
    coupons::configure(cfg);
    payments::configure(cfg);
    payroll::configure(cfg);
    expenses::configure(cfg);
    settings::configure(cfg);
    notifications::configure(cfg);
    woocommerce::configure(cfg);
}
