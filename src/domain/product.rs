//! Products and the stock ledger.
//!
//! Every unit of a product is in exactly one bucket: available, reserved,
//! in use, in laundry, or damaged. `stock_total` counts units still owned
//! (lost units leave it). The quantity operations below are the only way
//! bookings move units between buckets.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i32,
    pub franchise_id: i32,
    pub category_id: Option<i32>,
    pub product_code: String,
    pub name: String,
    pub description: Option<String>,
    pub rental_price: f64,
    pub sale_price: f64,
    pub security_deposit: f64,
    pub stock: StockLevels,
    pub low_stock_threshold: i32,
    pub is_archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.stock.available < self.low_stock_threshold
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewProduct {
    pub franchise_id: i32,
    pub category_id: Option<i32>,
    pub product_code: String,
    pub name: String,
    pub description: Option<String>,
    pub rental_price: f64,
    pub sale_price: f64,
    pub security_deposit: f64,
    pub stock_total: i32,
    pub low_stock_threshold: i32,
}

impl NewProduct {
    #[must_use]
    pub fn new(
        franchise_id: i32,
        category_id: Option<i32>,
        product_code: String,
        name: String,
        description: Option<String>,
        rental_price: f64,
        sale_price: f64,
        security_deposit: f64,
        stock_total: i32,
        low_stock_threshold: i32,
    ) -> Self {
        Self {
            franchise_id,
            category_id,
            product_code: product_code.trim().to_uppercase(),
            name: name.trim().to_string(),
            description: description
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            rental_price,
            sale_price,
            security_deposit,
            stock_total: stock_total.max(0),
            low_stock_threshold: low_stock_threshold.max(0),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateProduct {
    pub category_id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub rental_price: Option<f64>,
    pub sale_price: Option<f64>,
    pub security_deposit: Option<f64>,
    pub low_stock_threshold: Option<i32>,
}

/// Snapshot of all stock buckets for one product.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockLevels {
    pub total: i32,
    pub available: i32,
    pub reserved: i32,
    pub in_use: i32,
    pub in_laundry: i32,
    pub damaged: i32,
}

/// Quantity movements a booking can request against stock.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InventoryOperation {
    /// Hold units for a booking: available -> reserved.
    Reserve,
    /// Cancel a hold: reserved -> available.
    Release,
    /// Hand units out on delivery: reserved -> in use.
    Confirm,
    /// Take units back: in use -> available.
    Return,
}

impl Display for InventoryOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            InventoryOperation::Reserve => "reserve",
            InventoryOperation::Release => "release",
            InventoryOperation::Confirm => "confirm",
            InventoryOperation::Return => "return",
        };
        write!(f, "{s}")
    }
}

impl FromStr for InventoryOperation {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reserve" => Ok(InventoryOperation::Reserve),
            "release" => Ok(InventoryOperation::Release),
            "confirm" => Ok(InventoryOperation::Confirm),
            "return" => Ok(InventoryOperation::Return),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown inventory operation: {other}"
            ))),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StockError {
    #[error("insufficient stock available: requested {requested}, available {available}")]
    InsufficientAvailable { requested: i32, available: i32 },

    #[error("insufficient reserved stock: requested {requested}, reserved {reserved}")]
    InsufficientReserved { requested: i32, reserved: i32 },

    #[error("insufficient stock in use: requested {requested}, in use {in_use}")]
    InsufficientInUse { requested: i32, in_use: i32 },

    #[error("insufficient stock in laundry: requested {requested}, in laundry {in_laundry}")]
    InsufficientInLaundry { requested: i32, in_laundry: i32 },

    #[error("quantity must be greater than zero")]
    NonPositiveQuantity,
}

impl StockLevels {
    /// Applies one quantity operation, returning the new bucket snapshot.
    ///
    /// Release saturates at zero reserved so double releases of the same
    /// booking cannot drive the counter negative.
    pub fn apply(self, op: InventoryOperation, quantity: i32) -> Result<StockLevels, StockError> {
        if quantity <= 0 {
            return Err(StockError::NonPositiveQuantity);
        }
        let mut next = self;
        match op {
            InventoryOperation::Reserve => {
                if self.available < quantity {
                    return Err(StockError::InsufficientAvailable {
                        requested: quantity,
                        available: self.available,
                    });
                }
                next.available -= quantity;
                next.reserved += quantity;
            }
            InventoryOperation::Release => {
                next.available += quantity;
                next.reserved = (self.reserved - quantity).max(0);
            }
            InventoryOperation::Confirm => {
                if self.reserved < quantity {
                    return Err(StockError::InsufficientReserved {
                        requested: quantity,
                        reserved: self.reserved,
                    });
                }
                next.reserved -= quantity;
                next.in_use += quantity;
            }
            InventoryOperation::Return => {
                if self.in_use < quantity {
                    return Err(StockError::InsufficientInUse {
                        requested: quantity,
                        in_use: self.in_use,
                    });
                }
                next.in_use -= quantity;
                next.available += quantity;
            }
        }
        Ok(next)
    }

    /// Removes sold units from the fleet: available and total both drop.
    pub fn sell(self, quantity: i32) -> Result<StockLevels, StockError> {
        if quantity <= 0 {
            return Err(StockError::NonPositiveQuantity);
        }
        if self.available < quantity {
            return Err(StockError::InsufficientAvailable {
                requested: quantity,
                available: self.available,
            });
        }
        Ok(StockLevels {
            total: self.total - quantity,
            available: self.available - quantity,
            ..self
        })
    }

    /// Adds purchased units to the fleet.
    pub fn restock(self, quantity: i32) -> Result<StockLevels, StockError> {
        if quantity <= 0 {
            return Err(StockError::NonPositiveQuantity);
        }
        Ok(StockLevels {
            total: self.total + quantity,
            available: self.available + quantity,
            ..self
        })
    }

    /// Writes units off the fleet from available stock (the archive flow).
    pub fn write_off(self, quantity: i32) -> Result<StockLevels, StockError> {
        if quantity <= 0 {
            return Err(StockError::NonPositiveQuantity);
        }
        if self.available < quantity {
            return Err(StockError::InsufficientAvailable {
                requested: quantity,
                available: self.available,
            });
        }
        Ok(StockLevels {
            total: self.total - quantity,
            available: self.available - quantity,
            ..self
        })
    }

    /// Moves available units into a manually created laundry batch.
    pub fn send_to_laundry(self, quantity: i32) -> Result<StockLevels, StockError> {
        if quantity <= 0 {
            return Err(StockError::NonPositiveQuantity);
        }
        if self.available < quantity {
            return Err(StockError::InsufficientAvailable {
                requested: quantity,
                available: self.available,
            });
        }
        Ok(StockLevels {
            available: self.available - quantity,
            in_laundry: self.in_laundry + quantity,
            ..self
        })
    }

    /// Takes units back from laundry. Damaged units land in the damaged
    /// bucket instead of available stock.
    pub fn receive_from_laundry(
        self,
        quantity: i32,
        qty_damaged: i32,
    ) -> Result<StockLevels, StockError> {
        if quantity <= 0 || qty_damaged < 0 || qty_damaged > quantity {
            return Err(StockError::NonPositiveQuantity);
        }
        if self.in_laundry < quantity {
            return Err(StockError::InsufficientInLaundry {
                requested: quantity,
                in_laundry: self.in_laundry,
            });
        }
        Ok(StockLevels {
            in_laundry: self.in_laundry - quantity,
            available: self.available + quantity - qty_damaged,
            damaged: self.damaged + qty_damaged,
            ..self
        })
    }
}

/// Lifecycle of a tracked per-unit barcode.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BarcodeStatus {
    Available,
    InUse,
    Damaged,
    Retired,
}

impl Display for BarcodeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BarcodeStatus::Available => "available",
            BarcodeStatus::InUse => "in_use",
            BarcodeStatus::Damaged => "damaged",
            BarcodeStatus::Retired => "retired",
        };
        write!(f, "{s}")
    }
}

impl FromStr for BarcodeStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(BarcodeStatus::Available),
            "in_use" => Ok(BarcodeStatus::InUse),
            "damaged" => Ok(BarcodeStatus::Damaged),
            "retired" => Ok(BarcodeStatus::Retired),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown barcode status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Barcode {
    pub id: i32,
    pub product_id: i32,
    pub barcode_number: String,
    pub sequence: i32,
    pub status: BarcodeStatus,
    pub booking_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

/// Renders a per-unit barcode: product code plus a three-digit sequence.
pub fn barcode_number(product_code: &str, sequence: i32) -> String {
    format!("{product_code}-{sequence:03}")
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProductCategory {
    pub id: i32,
    pub franchise_id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// Why units left the active fleet.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveReason {
    Damaged,
    Lost,
    Stolen,
    Retired,
}

impl Display for ArchiveReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ArchiveReason::Damaged => "damaged",
            ArchiveReason::Lost => "lost",
            ArchiveReason::Stolen => "stolen",
            ArchiveReason::Retired => "retired",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ArchiveReason {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "damaged" => Ok(ArchiveReason::Damaged),
            "lost" => Ok(ArchiveReason::Lost),
            "stolen" => Ok(ArchiveReason::Stolen),
            "retired" => Ok(ArchiveReason::Retired),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown archive reason: {other}"
            ))),
        }
    }
}

/// Audit row written alongside every stock movement.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InventoryTransaction {
    pub id: i32,
    pub franchise_id: i32,
    pub product_id: i32,
    pub transaction_type: String,
    /// Signed: positive into the bucket the type names, negative out of it.
    pub quantity: i32,
    pub unit_price: Option<f64>,
    pub total_value: Option<f64>,
    pub reference_type: Option<String>,
    pub reference_id: Option<i32>,
    pub notes: Option<String>,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewInventoryTransaction {
    pub franchise_id: i32,
    pub product_id: i32,
    pub transaction_type: String,
    pub quantity: i32,
    pub unit_price: Option<f64>,
    pub total_value: Option<f64>,
    pub reference_type: Option<String>,
    pub reference_id: Option<i32>,
    pub notes: Option<String>,
    pub created_by: i32,
}

/// Units written off the active fleet, with the reason kept for audit.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProductArchiveEntry {
    pub id: i32,
    pub franchise_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub reason: ArchiveReason,
    pub notes: Option<String>,
    pub archived_by: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewProductArchiveEntry {
    pub franchise_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub reason: ArchiveReason,
    pub notes: Option<String>,
    pub archived_by: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock() -> StockLevels {
        StockLevels {
            total: 20,
            available: 10,
            reserved: 4,
            in_use: 3,
            in_laundry: 2,
            damaged: 1,
        }
    }

    #[test]
    fn reserve_moves_available_to_reserved() {
        let next = stock().apply(InventoryOperation::Reserve, 5).unwrap();
        assert_eq!(next.available, 5);
        assert_eq!(next.reserved, 9);
        assert_eq!(next.total, 20);
    }

    #[test]
    fn reserve_rejects_oversubscription() {
        let err = stock().apply(InventoryOperation::Reserve, 11).unwrap_err();
        assert_eq!(
            err,
            StockError::InsufficientAvailable {
                requested: 11,
                available: 10
            }
        );
    }

    #[test]
    fn release_saturates_reserved_at_zero() {
        let next = stock().apply(InventoryOperation::Release, 6).unwrap();
        assert_eq!(next.available, 16);
        assert_eq!(next.reserved, 0);
    }

    #[test]
    fn confirm_requires_enough_reserved() {
        let next = stock().apply(InventoryOperation::Confirm, 4).unwrap();
        assert_eq!(next.reserved, 0);
        assert_eq!(next.in_use, 7);

        let err = stock().apply(InventoryOperation::Confirm, 5).unwrap_err();
        assert_eq!(
            err,
            StockError::InsufficientReserved {
                requested: 5,
                reserved: 4
            }
        );
    }

    #[test]
    fn return_requires_enough_in_use() {
        let next = stock().apply(InventoryOperation::Return, 3).unwrap();
        assert_eq!(next.in_use, 0);
        assert_eq!(next.available, 13);

        let err = stock().apply(InventoryOperation::Return, 4).unwrap_err();
        assert_eq!(
            err,
            StockError::InsufficientInUse {
                requested: 4,
                in_use: 3
            }
        );
    }

    #[test]
    fn zero_quantity_is_rejected() {
        assert_eq!(
            stock().apply(InventoryOperation::Reserve, 0).unwrap_err(),
            StockError::NonPositiveQuantity
        );
    }

    #[test]
    fn sell_shrinks_the_fleet() {
        let next = stock().sell(2).unwrap();
        assert_eq!(next.total, 18);
        assert_eq!(next.available, 8);
        assert!(stock().sell(11).is_err());
    }

    #[test]
    fn restock_grows_the_fleet() {
        let next = stock().restock(5).unwrap();
        assert_eq!(next.total, 25);
        assert_eq!(next.available, 15);
        assert!(stock().restock(0).is_err());
    }

    #[test]
    fn write_off_pulls_from_available() {
        let next = stock().write_off(3).unwrap();
        assert_eq!(next.total, 17);
        assert_eq!(next.available, 7);
        assert!(stock().write_off(11).is_err());
    }

    #[test]
    fn manual_laundry_send_and_receive() {
        let sent = stock().send_to_laundry(4).unwrap();
        assert_eq!(sent.available, 6);
        assert_eq!(sent.in_laundry, 6);

        let received = sent.receive_from_laundry(6, 1).unwrap();
        assert_eq!(received.in_laundry, 0);
        assert_eq!(received.available, 11);
        assert_eq!(received.damaged, 2);
        assert_eq!(received.total, 20);
    }

    #[test]
    fn laundry_receipt_checks_bucket_and_damage() {
        assert_eq!(
            stock().receive_from_laundry(3, 0).unwrap_err(),
            StockError::InsufficientInLaundry {
                requested: 3,
                in_laundry: 2
            }
        );
        assert!(stock().receive_from_laundry(2, 3).is_err());
    }

    #[test]
    fn barcode_number_pads_sequence() {
        assert_eq!(barcode_number("TRB-RED", 7), "TRB-RED-007");
        assert_eq!(barcode_number("TRB-RED", 123), "TRB-RED-123");
        assert_eq!(barcode_number("TRB-RED", 1234), "TRB-RED-1234");
    }
}
