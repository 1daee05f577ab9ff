//! Request payloads for the HTTP API, validated with `validator` derives
//! before they reach the services.

pub mod auth;
pub mod booking;
pub mod coupon;
pub mod customer;
pub mod delivery;
pub mod expense;
pub mod franchise;
pub mod inventory;
pub mod laundry;
pub mod notification;
pub mod payment;
pub mod payroll;
pub mod pricing;
pub mod product;
pub mod returns;
pub mod sale;
pub mod settings;
pub mod staff;
