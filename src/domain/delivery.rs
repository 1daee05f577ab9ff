//! Delivery scheduling and its status machine.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::booking::BookingType;
use crate::domain::types::TypeConstraintError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    InTransit,
    Delivered,
    Cancelled,
}

impl DeliveryStatus {
    /// Allowed transitions. Delivered and cancelled are terminal.
    pub fn can_transition_to(self, next: DeliveryStatus) -> bool {
        matches!(
            (self, next),
            (DeliveryStatus::Pending, DeliveryStatus::InTransit)
                | (DeliveryStatus::Pending, DeliveryStatus::Cancelled)
                | (DeliveryStatus::InTransit, DeliveryStatus::Delivered)
                | (DeliveryStatus::InTransit, DeliveryStatus::Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, DeliveryStatus::Delivered | DeliveryStatus::Cancelled)
    }
}

impl Display for DeliveryStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::InTransit => "in_transit",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

impl FromStr for DeliveryStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(DeliveryStatus::Pending),
            "in_transit" => Ok(DeliveryStatus::InTransit),
            "delivered" => Ok(DeliveryStatus::Delivered),
            "cancelled" => Ok(DeliveryStatus::Cancelled),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown delivery status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Delivery {
    pub id: i32,
    pub franchise_id: i32,
    pub booking_id: i32,
    pub delivery_number: String,
    /// Snapshot of the booking's type so delivered side effects do not need
    /// a join.
    pub booking_type: BookingType,
    pub status: DeliveryStatus,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<String>,
    pub delivery_address: String,
    pub assigned_to: Option<i32>,
    pub special_instructions: Option<String>,
    pub delivered_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewDelivery {
    pub franchise_id: i32,
    pub booking_id: i32,
    pub delivery_number: String,
    pub booking_type: BookingType,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<String>,
    pub delivery_address: String,
    pub assigned_to: Option<i32>,
    pub special_instructions: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct UpdateDelivery {
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<String>,
    pub delivery_address: Option<String>,
    pub assigned_to: Option<Option<i32>>,
    pub special_instructions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_moves_forward_or_cancels() {
        assert!(DeliveryStatus::Pending.can_transition_to(DeliveryStatus::InTransit));
        assert!(DeliveryStatus::Pending.can_transition_to(DeliveryStatus::Cancelled));
        assert!(!DeliveryStatus::Pending.can_transition_to(DeliveryStatus::Delivered));
        assert!(!DeliveryStatus::Pending.can_transition_to(DeliveryStatus::Pending));
    }

    #[test]
    fn in_transit_delivers_or_cancels() {
        assert!(DeliveryStatus::InTransit.can_transition_to(DeliveryStatus::Delivered));
        assert!(DeliveryStatus::InTransit.can_transition_to(DeliveryStatus::Cancelled));
        assert!(!DeliveryStatus::InTransit.can_transition_to(DeliveryStatus::Pending));
    }

    #[test]
    fn terminal_states_stay_put() {
        for terminal in [DeliveryStatus::Delivered, DeliveryStatus::Cancelled] {
            for next in [
                DeliveryStatus::Pending,
                DeliveryStatus::InTransit,
                DeliveryStatus::Delivered,
                DeliveryStatus::Cancelled,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }
}
