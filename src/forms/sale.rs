use serde::Deserialize;
use validator::Validate;

use crate::domain::payment::PaymentMethod;
use crate::domain::sale::NewDirectSaleItem;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSaleForm {
    pub customer_id: i32,
    pub payment_method: PaymentMethod,
    #[validate(length(min = 1))]
    pub items: Vec<NewDirectSaleItem>,
    pub coupon_code: Option<String>,
    pub notes: Option<String>,
}
