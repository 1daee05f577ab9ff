//! Diesel models for delivery scheduling.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::delivery::{
    Delivery as DomainDelivery, NewDelivery as DomainNewDelivery,
    UpdateDelivery as DomainUpdateDelivery,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::deliveries)]
/// Diesel model for [`crate::domain::delivery::Delivery`].
pub struct Delivery {
    pub id: i32,
    pub franchise_id: i32,
    pub booking_id: i32,
    pub delivery_number: String,
    pub booking_type: String,
    pub status: String,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<String>,
    pub delivery_address: String,
    pub assigned_to: Option<i32>,
    pub special_instructions: Option<String>,
    pub delivered_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::deliveries)]
pub struct NewDelivery<'a> {
    pub franchise_id: i32,
    pub booking_id: i32,
    pub delivery_number: &'a str,
    pub booking_type: String,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<&'a str>,
    pub delivery_address: &'a str,
    pub assigned_to: Option<i32>,
    pub special_instructions: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::deliveries)]
/// `assigned_to` is doubly optional so an update can clear the assignee.
pub struct UpdateDelivery<'a> {
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<&'a str>,
    pub delivery_address: Option<&'a str>,
    pub assigned_to: Option<Option<i32>>,
    pub special_instructions: Option<&'a str>,
}

impl TryFrom<Delivery> for DomainDelivery {
    type Error = TypeConstraintError;

    fn try_from(delivery: Delivery) -> Result<Self, Self::Error> {
        Ok(Self {
            id: delivery.id,
            franchise_id: delivery.franchise_id,
            booking_id: delivery.booking_id,
            delivery_number: delivery.delivery_number,
            booking_type: delivery.booking_type.parse()?,
            status: delivery.status.parse()?,
            scheduled_date: delivery.scheduled_date,
            scheduled_time: delivery.scheduled_time,
            delivery_address: delivery.delivery_address,
            assigned_to: delivery.assigned_to,
            special_instructions: delivery.special_instructions,
            delivered_at: delivery.delivered_at,
            created_at: delivery.created_at,
            updated_at: delivery.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewDelivery> for NewDelivery<'a> {
    fn from(delivery: &'a DomainNewDelivery) -> Self {
        Self {
            franchise_id: delivery.franchise_id,
            booking_id: delivery.booking_id,
            delivery_number: delivery.delivery_number.as_str(),
            booking_type: delivery.booking_type.to_string(),
            scheduled_date: delivery.scheduled_date,
            scheduled_time: delivery.scheduled_time.as_deref(),
            delivery_address: delivery.delivery_address.as_str(),
            assigned_to: delivery.assigned_to,
            special_instructions: delivery.special_instructions.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateDelivery> for UpdateDelivery<'a> {
    fn from(update: &'a DomainUpdateDelivery) -> Self {
        Self {
            scheduled_date: update.scheduled_date,
            scheduled_time: update.scheduled_time.as_deref(),
            delivery_address: update.delivery_address.as_deref(),
            assigned_to: update.assigned_to,
            special_instructions: update.special_instructions.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::BookingType;

    #[test]
    fn new_delivery_snapshots_booking_type() {
        let domain = DomainNewDelivery {
            franchise_id: 1,
            booking_id: 4,
            delivery_number: "DEL-9".to_string(),
            booking_type: BookingType::Rental,
            scheduled_date: None,
            scheduled_time: Some("14:30".to_string()),
            delivery_address: "12 MG Road".to_string(),
            assigned_to: Some(6),
            special_instructions: None,
        };
        let new: NewDelivery = (&domain).into();
        assert_eq!(new.booking_type, "rental");
        assert_eq!(new.scheduled_time, Some("14:30"));
    }

    #[test]
    fn unknown_delivery_status_is_rejected() {
        let now = chrono::Utc::now().naive_utc();
        let row = Delivery {
            id: 1,
            franchise_id: 1,
            booking_id: 1,
            delivery_number: "DEL-1".to_string(),
            booking_type: "rental".to_string(),
            status: "lost".to_string(),
            scheduled_date: None,
            scheduled_time: None,
            delivery_address: "12 MG Road".to_string(),
            assigned_to: None,
            special_instructions: None,
            delivered_at: None,
            created_at: now,
            updated_at: now,
        };
        assert!(DomainDelivery::try_from(row).is_err());
    }
}
