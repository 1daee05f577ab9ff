//! Laundry batches for cleaning rented items between uses.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LaundryStatus {
    Pending,
    InLaundry,
    Received,
    Cancelled,
}

impl LaundryStatus {
    pub fn can_transition_to(self, next: LaundryStatus) -> bool {
        matches!(
            (self, next),
            (LaundryStatus::Pending, LaundryStatus::InLaundry)
                | (LaundryStatus::Pending, LaundryStatus::Cancelled)
                | (LaundryStatus::InLaundry, LaundryStatus::Received)
                | (LaundryStatus::InLaundry, LaundryStatus::Cancelled)
        )
    }
}

impl Display for LaundryStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LaundryStatus::Pending => "pending",
            LaundryStatus::InLaundry => "in_laundry",
            LaundryStatus::Received => "received",
            LaundryStatus::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

impl FromStr for LaundryStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(LaundryStatus::Pending),
            "in_laundry" => Ok(LaundryStatus::InLaundry),
            "received" => Ok(LaundryStatus::Received),
            "cancelled" => Ok(LaundryStatus::Cancelled),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown laundry status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LaundryBatch {
    pub id: i32,
    pub franchise_id: i32,
    pub batch_number: String,
    pub status: LaundryStatus,
    /// Set when the batch was created automatically while processing a return.
    pub auto_created: bool,
    pub return_id: Option<i32>,
    pub expected_date: Option<NaiveDate>,
    pub sent_at: Option<NaiveDateTime>,
    pub received_at: Option<NaiveDateTime>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewLaundryBatch {
    pub franchise_id: i32,
    pub batch_number: String,
    pub auto_created: bool,
    pub return_id: Option<i32>,
    pub expected_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LaundryItem {
    pub id: i32,
    pub batch_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub condition_before: Option<String>,
    pub condition_after: Option<String>,
    /// Units that came back unusable and were moved to the damaged bucket.
    pub qty_damaged: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewLaundryItem {
    pub product_id: i32,
    pub quantity: i32,
    pub condition_before: Option<String>,
}

/// Per-item receipt details. Anything marked damaged on receipt moves to
/// the damaged bucket instead of available stock.
#[derive(Clone, Debug, Deserialize)]
pub struct LaundryReceiptLine {
    pub product_id: i32,
    #[serde(default)]
    pub qty_damaged: i32,
    pub condition_after: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_lifecycle() {
        assert!(LaundryStatus::Pending.can_transition_to(LaundryStatus::InLaundry));
        assert!(LaundryStatus::InLaundry.can_transition_to(LaundryStatus::Received));
        assert!(!LaundryStatus::Received.can_transition_to(LaundryStatus::Pending));
        assert!(!LaundryStatus::Cancelled.can_transition_to(LaundryStatus::InLaundry));
    }

    #[test]
    fn status_parses_from_text() {
        assert_eq!(
            "in_laundry".parse::<LaundryStatus>().unwrap(),
            LaundryStatus::InLaundry
        );
        assert!("washed".parse::<LaundryStatus>().is_err());
    }
}
