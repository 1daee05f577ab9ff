//! Diesel models for direct counter sales.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::sale::{
    DirectSale as DomainDirectSale, DirectSaleItem as DomainDirectSaleItem,
    NewDirectSale as DomainNewDirectSale, NewDirectSaleItem as DomainNewDirectSaleItem,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::direct_sales)]
pub struct DirectSale {
    pub id: i32,
    pub franchise_id: i32,
    pub customer_id: i32,
    pub sale_number: String,
    pub payment_method: String,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub coupon_id: Option<i32>,
    pub gst_amount: f64,
    pub total_amount: f64,
    pub notes: Option<String>,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::direct_sales)]
pub struct NewDirectSale<'a> {
    pub franchise_id: i32,
    pub customer_id: i32,
    pub sale_number: &'a str,
    pub payment_method: String,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub coupon_id: Option<i32>,
    pub gst_amount: f64,
    pub total_amount: f64,
    pub notes: Option<&'a str>,
    pub created_by: i32,
}

impl TryFrom<DirectSale> for DomainDirectSale {
    type Error = TypeConstraintError;

    fn try_from(sale: DirectSale) -> Result<Self, Self::Error> {
        Ok(Self {
            id: sale.id,
            franchise_id: sale.franchise_id,
            customer_id: sale.customer_id,
            sale_number: sale.sale_number,
            payment_method: sale.payment_method.parse()?,
            subtotal: sale.subtotal,
            discount_amount: sale.discount_amount,
            coupon_id: sale.coupon_id,
            gst_amount: sale.gst_amount,
            total_amount: sale.total_amount,
            notes: sale.notes,
            created_by: sale.created_by,
            created_at: sale.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewDirectSale> for NewDirectSale<'a> {
    fn from(sale: &'a DomainNewDirectSale) -> Self {
        Self {
            franchise_id: sale.franchise_id,
            customer_id: sale.customer_id,
            sale_number: sale.sale_number.as_str(),
            payment_method: sale.payment_method.to_string(),
            subtotal: sale.subtotal,
            discount_amount: sale.discount_amount,
            coupon_id: sale.coupon_id,
            gst_amount: sale.gst_amount,
            total_amount: sale.total_amount,
            notes: sale.notes.as_deref(),
            created_by: sale.created_by,
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(DirectSale, foreign_key = sale_id))]
#[diesel(table_name = crate::schema::direct_sale_items)]
pub struct DirectSaleItem {
    pub id: i32,
    pub sale_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
    pub line_total: f64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::direct_sale_items)]
pub struct NewDirectSaleItem {
    pub sale_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
    pub line_total: f64,
}

impl NewDirectSaleItem {
    pub fn from_domain(sale_id: i32, item: &DomainNewDirectSaleItem) -> Self {
        Self {
            sale_id,
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total(),
        }
    }
}

impl From<DirectSaleItem> for DomainDirectSaleItem {
    fn from(item: DirectSaleItem) -> Self {
        Self {
            id: item.id,
            sale_id: item.sale_id,
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentMethod;

    #[test]
    fn new_sale_renders_payment_method() {
        let domain = DomainNewDirectSale {
            franchise_id: 1,
            customer_id: 2,
            sale_number: "DS-55".to_string(),
            payment_method: PaymentMethod::Upi,
            subtotal: 900.0,
            discount_amount: 0.0,
            coupon_id: None,
            gst_amount: 162.0,
            total_amount: 1_062.0,
            notes: None,
            created_by: 3,
        };
        let new: NewDirectSale = (&domain).into();
        assert_eq!(new.payment_method, "upi");
        assert_eq!(new.sale_number, "DS-55");
    }
}
