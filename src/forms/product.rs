use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductForm {
    #[validate(length(min = 2, max = 20))]
    pub product_code: String,
    #[validate(length(min = 2))]
    pub name: String,
    pub category_id: Option<i32>,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub rental_price: f64,
    #[validate(range(min = 0.0))]
    pub sale_price: f64,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub security_deposit: f64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock_total: i32,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub low_stock_threshold: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct StockAdjustmentForm {
    pub product_id: i32,
    /// Positive deltas add units to the fleet, negative write them off.
    pub quantity_delta: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateBarcodesForm {
    pub product_id: i32,
    #[validate(range(min = 1, max = 500))]
    pub count: i32,
}

#[derive(Debug, Deserialize)]
pub struct ScanBarcodeForm {
    pub barcode_number: String,
    pub booking_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct RetireBarcodeForm {
    pub barcode_number: String,
    /// `true` when the unit is being retired because it is damaged.
    #[serde(default)]
    pub damaged: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProductCategoryForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
}
