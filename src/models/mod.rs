//! Database models shared across the CRM repository.

pub mod booking;
pub mod config;
pub mod coupon;
pub mod customer;
pub mod delivery;
pub mod expense;
pub mod franchise;
pub mod laundry;
pub mod notification;
pub mod payment;
pub mod payroll;
pub mod pricing;
pub mod product;
pub mod returns;
pub mod sale;
pub mod settings;
pub mod user;
