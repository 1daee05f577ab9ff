//! Walk-in counter sales. Sold units leave the rental fleet outright.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::payment::PaymentMethod;
use crate::domain::types::round2;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DirectSale {
    pub id: i32,
    pub franchise_id: i32,
    pub customer_id: i32,
    pub sale_number: String,
    pub payment_method: PaymentMethod,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub coupon_id: Option<i32>,
    pub gst_amount: f64,
    pub total_amount: f64,
    pub notes: Option<String>,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewDirectSale {
    pub franchise_id: i32,
    pub customer_id: i32,
    pub sale_number: String,
    pub payment_method: PaymentMethod,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub coupon_id: Option<i32>,
    pub gst_amount: f64,
    pub total_amount: f64,
    pub notes: Option<String>,
    pub created_by: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DirectSaleItem {
    pub id: i32,
    pub sale_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
    pub line_total: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewDirectSaleItem {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
}

impl NewDirectSaleItem {
    pub fn line_total(&self) -> f64 {
        round2(self.unit_price * self.quantity as f64)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SaleTotals {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub gst_amount: f64,
    pub total_amount: f64,
}

/// Totals for a counter sale: line sum, minus an already-validated discount,
/// plus GST on the discounted amount.
pub fn sale_totals(
    items: &[NewDirectSaleItem],
    discount_amount: f64,
    gst_percentage: f64,
) -> SaleTotals {
    let subtotal = round2(items.iter().map(NewDirectSaleItem::line_total).sum());
    let discount_amount = round2(discount_amount.clamp(0.0, subtotal));
    let taxable = subtotal - discount_amount;
    let gst_amount = round2(taxable * gst_percentage / 100.0);
    SaleTotals {
        subtotal,
        discount_amount,
        gst_amount,
        total_amount: round2(taxable + gst_amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_subtract_discount_then_tax() {
        let items = vec![
            NewDirectSaleItem {
                product_id: 1,
                quantity: 2,
                unit_price: 1_200.0,
            },
            NewDirectSaleItem {
                product_id: 2,
                quantity: 1,
                unit_price: 350.5,
            },
        ];
        let totals = sale_totals(&items, 200.0, 0.0);
        assert_eq!(totals.subtotal, 2_750.5);
        assert_eq!(totals.discount_amount, 200.0);
        assert_eq!(totals.total_amount, 2_550.5);

        let taxed = sale_totals(&items, 200.0, 18.0);
        assert_eq!(taxed.gst_amount, 459.09);
        assert_eq!(taxed.total_amount, 3_009.59);
    }

    #[test]
    fn discount_clamped_to_subtotal() {
        let items = vec![NewDirectSaleItem {
            product_id: 1,
            quantity: 1,
            unit_price: 100.0,
        }];
        let totals = sale_totals(&items, 500.0, 18.0);
        assert_eq!(totals.discount_amount, 100.0);
        assert_eq!(totals.total_amount, 0.0);
    }
}
