//! Diesel models for laundry batches and their items.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::laundry::{
    LaundryBatch as DomainLaundryBatch, LaundryItem as DomainLaundryItem,
    NewLaundryBatch as DomainNewLaundryBatch, NewLaundryItem as DomainNewLaundryItem,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::laundry_batches)]
pub struct LaundryBatch {
    pub id: i32,
    pub franchise_id: i32,
    pub batch_number: String,
    pub status: String,
    pub auto_created: bool,
    pub return_id: Option<i32>,
    pub expected_date: Option<NaiveDate>,
    pub sent_at: Option<NaiveDateTime>,
    pub received_at: Option<NaiveDateTime>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::laundry_batches)]
pub struct NewLaundryBatch<'a> {
    pub franchise_id: i32,
    pub batch_number: &'a str,
    pub auto_created: bool,
    pub return_id: Option<i32>,
    pub expected_date: Option<NaiveDate>,
    pub notes: Option<&'a str>,
}

impl TryFrom<LaundryBatch> for DomainLaundryBatch {
    type Error = TypeConstraintError;

    fn try_from(batch: LaundryBatch) -> Result<Self, Self::Error> {
        Ok(Self {
            id: batch.id,
            franchise_id: batch.franchise_id,
            batch_number: batch.batch_number,
            status: batch.status.parse()?,
            auto_created: batch.auto_created,
            return_id: batch.return_id,
            expected_date: batch.expected_date,
            sent_at: batch.sent_at,
            received_at: batch.received_at,
            notes: batch.notes,
            created_at: batch.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewLaundryBatch> for NewLaundryBatch<'a> {
    fn from(batch: &'a DomainNewLaundryBatch) -> Self {
        Self {
            franchise_id: batch.franchise_id,
            batch_number: batch.batch_number.as_str(),
            auto_created: batch.auto_created,
            return_id: batch.return_id,
            expected_date: batch.expected_date,
            notes: batch.notes.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(LaundryBatch, foreign_key = batch_id))]
#[diesel(table_name = crate::schema::laundry_items)]
pub struct LaundryItem {
    pub id: i32,
    pub batch_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub condition_before: Option<String>,
    pub condition_after: Option<String>,
    pub qty_damaged: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::laundry_items)]
pub struct NewLaundryItem<'a> {
    pub batch_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub condition_before: Option<&'a str>,
}

impl<'a> NewLaundryItem<'a> {
    pub fn from_domain(batch_id: i32, item: &'a DomainNewLaundryItem) -> Self {
        Self {
            batch_id,
            product_id: item.product_id,
            quantity: item.quantity,
            condition_before: item.condition_before.as_deref(),
        }
    }
}

impl From<LaundryItem> for DomainLaundryItem {
    fn from(item: LaundryItem) -> Self {
        Self {
            id: item.id,
            batch_id: item.batch_id,
            product_id: item.product_id,
            quantity: item.quantity,
            condition_before: item.condition_before,
            condition_after: item.condition_after,
            qty_damaged: item.qty_damaged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_status_parses_into_domain() {
        let now = chrono::Utc::now().naive_utc();
        let row = LaundryBatch {
            id: 1,
            franchise_id: 2,
            batch_number: "LB-77".to_string(),
            status: "in_laundry".to_string(),
            auto_created: true,
            return_id: Some(5),
            expected_date: None,
            sent_at: Some(now),
            received_at: None,
            notes: None,
            created_at: now,
        };
        let domain = DomainLaundryBatch::try_from(row).unwrap();
        assert_eq!(
            domain.status,
            crate::domain::laundry::LaundryStatus::InLaundry
        );
        assert!(domain.auto_created);
    }
}
