use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::product::InventoryOperation;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct MovementLine {
    pub product_id: i32,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// One reserve/release/confirm/return request covering a booking's lines.
#[derive(Debug, Deserialize, Validate)]
pub struct InventoryMovementForm {
    pub operation: InventoryOperation,
    pub booking_id: Option<i32>,
    #[validate(length(min = 1), nested)]
    pub items: Vec<MovementLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_quantity_lines_fail_validation() {
        let form = InventoryMovementForm {
            operation: InventoryOperation::Reserve,
            booking_id: None,
            items: vec![MovementLine {
                product_id: 1,
                quantity: 0,
            }],
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn empty_item_lists_fail_validation() {
        let form = InventoryMovementForm {
            operation: InventoryOperation::Release,
            booking_id: None,
            items: Vec::new(),
        };
        assert!(form.validate().is_err());
    }
}
