//! Rental returns and the per-line reconciliation that drives stock.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::product::StockLevels;
use crate::domain::types::TypeConstraintError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReturnStatus {
    Pending,
    Completed,
    Cancelled,
}

impl Display for ReturnStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReturnStatus::Pending => "pending",
            ReturnStatus::Completed => "completed",
            ReturnStatus::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ReturnStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReturnStatus::Pending),
            "completed" => Ok(ReturnStatus::Completed),
            "cancelled" => Ok(ReturnStatus::Cancelled),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown return status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReturnValidationError {
    #[error(
        "quantities for product {product_id} do not add up: returned {returned} + not used {not_used} + damaged {damaged} + lost {lost} != delivered {delivered}"
    )]
    QuantityMismatch {
        product_id: i32,
        delivered: i32,
        returned: i32,
        not_used: i32,
        damaged: i32,
        lost: i32,
    },
    #[error("negative quantity for product {product_id}")]
    NegativeQuantity { product_id: i32 },
    #[error("damage reason is required for product {product_id}")]
    MissingDamageReason { product_id: i32 },
    #[error("lost reason is required for product {product_id}")]
    MissingLostReason { product_id: i32 },
}

/// One product line of a processed return.
///
/// Every delivered unit must be accounted for across the four buckets.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReturnLine {
    pub product_id: i32,
    pub qty_delivered: i32,
    pub qty_returned: i32,
    pub qty_not_used: i32,
    pub qty_damaged: i32,
    pub qty_lost: i32,
    pub damage_reason: Option<String>,
    pub lost_reason: Option<String>,
    pub notes: Option<String>,
}

impl ReturnLine {
    pub fn validate(&self) -> Result<(), ReturnValidationError> {
        if self.qty_returned < 0 || self.qty_not_used < 0 || self.qty_damaged < 0 || self.qty_lost < 0
        {
            return Err(ReturnValidationError::NegativeQuantity {
                product_id: self.product_id,
            });
        }
        if self.qty_returned + self.qty_not_used + self.qty_damaged + self.qty_lost
            != self.qty_delivered
        {
            return Err(ReturnValidationError::QuantityMismatch {
                product_id: self.product_id,
                delivered: self.qty_delivered,
                returned: self.qty_returned,
                not_used: self.qty_not_used,
                damaged: self.qty_damaged,
                lost: self.qty_lost,
            });
        }
        if self.qty_damaged > 0
            && self
                .damage_reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .is_none()
        {
            return Err(ReturnValidationError::MissingDamageReason {
                product_id: self.product_id,
            });
        }
        if self.qty_lost > 0
            && self
                .lost_reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .is_none()
        {
            return Err(ReturnValidationError::MissingLostReason {
                product_id: self.product_id,
            });
        }
        Ok(())
    }

    /// Signed stock deltas this line produces. `in_use` is applied with
    /// saturation at zero since older bookings may predate reservation
    /// tracking.
    pub fn stock_delta(&self, send_to_laundry: bool) -> ReturnStockDelta {
        let (available_back, to_laundry) = if send_to_laundry {
            (self.qty_not_used, self.qty_returned)
        } else {
            (self.qty_not_used + self.qty_returned, 0)
        };
        ReturnStockDelta {
            available: available_back,
            in_laundry: to_laundry,
            damaged: self.qty_damaged,
            total: -self.qty_lost,
            in_use: -self.qty_delivered,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReturnStockDelta {
    pub available: i32,
    pub in_laundry: i32,
    pub damaged: i32,
    pub total: i32,
    pub in_use: i32,
}

impl ReturnStockDelta {
    /// Applies the delta to a stock snapshot. `in_use` and `total` saturate
    /// at zero.
    pub fn apply_to(self, stock: StockLevels) -> StockLevels {
        StockLevels {
            total: (stock.total + self.total).max(0),
            available: stock.available + self.available,
            reserved: stock.reserved,
            in_use: (stock.in_use + self.in_use).max(0),
            in_laundry: stock.in_laundry + self.in_laundry,
            damaged: stock.damaged + self.damaged,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Return {
    pub id: i32,
    pub franchise_id: i32,
    pub booking_id: i32,
    pub delivery_id: i32,
    pub return_number: String,
    pub status: ReturnStatus,
    pub scheduled_date: Option<NaiveDate>,
    pub processed_at: Option<NaiveDateTime>,
    pub processed_by: Option<i32>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewReturn {
    pub franchise_id: i32,
    pub booking_id: i32,
    pub delivery_id: i32,
    pub return_number: String,
    pub scheduled_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReturnItem {
    pub id: i32,
    pub return_id: i32,
    pub product_id: i32,
    pub qty_delivered: i32,
    pub qty_returned: i32,
    pub qty_not_used: i32,
    pub qty_damaged: i32,
    pub qty_lost: i32,
    pub damage_reason: Option<String>,
    pub lost_reason: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> ReturnLine {
        ReturnLine {
            product_id: 7,
            qty_delivered: 10,
            qty_returned: 6,
            qty_not_used: 2,
            qty_damaged: 1,
            qty_lost: 1,
            damage_reason: Some("torn lining".into()),
            lost_reason: Some("left at venue".into()),
            notes: None,
        }
    }

    #[test]
    fn buckets_must_sum_to_delivered() {
        let mut bad = line();
        bad.qty_returned = 5;
        assert!(matches!(
            bad.validate(),
            Err(ReturnValidationError::QuantityMismatch { delivered: 10, .. })
        ));
        assert!(line().validate().is_ok());
    }

    #[test]
    fn damage_and_lost_reasons_required() {
        let mut no_damage_reason = line();
        no_damage_reason.damage_reason = Some("   ".into());
        assert_eq!(
            no_damage_reason.validate(),
            Err(ReturnValidationError::MissingDamageReason { product_id: 7 })
        );

        let mut no_lost_reason = line();
        no_lost_reason.lost_reason = None;
        assert_eq!(
            no_lost_reason.validate(),
            Err(ReturnValidationError::MissingLostReason { product_id: 7 })
        );
    }

    #[test]
    fn negative_quantities_rejected() {
        let mut bad = line();
        bad.qty_not_used = -2;
        assert_eq!(
            bad.validate(),
            Err(ReturnValidationError::NegativeQuantity { product_id: 7 })
        );
    }

    #[test]
    fn laundry_branch_diverts_used_items() {
        let delta = line().stock_delta(true);
        assert_eq!(delta.available, 2);
        assert_eq!(delta.in_laundry, 6);
        assert_eq!(delta.damaged, 1);
        assert_eq!(delta.total, -1);
        assert_eq!(delta.in_use, -10);
    }

    #[test]
    fn without_laundry_everything_usable_returns_to_stock() {
        let delta = line().stock_delta(false);
        assert_eq!(delta.available, 8);
        assert_eq!(delta.in_laundry, 0);
    }

    #[test]
    fn delta_applies_to_stock_snapshot() {
        let stock = StockLevels {
            total: 20,
            available: 5,
            reserved: 2,
            in_use: 10,
            in_laundry: 1,
            damaged: 0,
        };
        let after = line().stock_delta(true).apply_to(stock);
        assert_eq!(after.total, 19);
        assert_eq!(after.available, 7);
        assert_eq!(after.reserved, 2);
        assert_eq!(after.in_use, 0);
        assert_eq!(after.in_laundry, 7);
        assert_eq!(after.damaged, 1);
    }
}
