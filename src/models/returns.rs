//! Diesel models for returns and their reconciliation lines.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::returns::{
    NewReturn as DomainNewReturn, Return as DomainReturn, ReturnItem as DomainReturnItem,
    ReturnLine,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::returns)]
pub struct Return {
    pub id: i32,
    pub franchise_id: i32,
    pub booking_id: i32,
    pub delivery_id: i32,
    pub return_number: String,
    pub status: String,
    pub scheduled_date: Option<NaiveDate>,
    pub processed_at: Option<NaiveDateTime>,
    pub processed_by: Option<i32>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::returns)]
pub struct NewReturn<'a> {
    pub franchise_id: i32,
    pub booking_id: i32,
    pub delivery_id: i32,
    pub return_number: &'a str,
    pub scheduled_date: Option<NaiveDate>,
    pub notes: Option<&'a str>,
}

impl TryFrom<Return> for DomainReturn {
    type Error = TypeConstraintError;

    fn try_from(ret: Return) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ret.id,
            franchise_id: ret.franchise_id,
            booking_id: ret.booking_id,
            delivery_id: ret.delivery_id,
            return_number: ret.return_number,
            status: ret.status.parse()?,
            scheduled_date: ret.scheduled_date,
            processed_at: ret.processed_at,
            processed_by: ret.processed_by,
            notes: ret.notes,
            created_at: ret.created_at,
            updated_at: ret.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewReturn> for NewReturn<'a> {
    fn from(ret: &'a DomainNewReturn) -> Self {
        Self {
            franchise_id: ret.franchise_id,
            booking_id: ret.booking_id,
            delivery_id: ret.delivery_id,
            return_number: ret.return_number.as_str(),
            scheduled_date: ret.scheduled_date,
            notes: ret.notes.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Return, foreign_key = return_id))]
#[diesel(table_name = crate::schema::return_items)]
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

#[derive(Insertable)]
#[diesel(table_name = crate::schema::return_items)]
pub struct NewReturnItem<'a> {
    pub return_id: i32,
    pub product_id: i32,
    pub qty_delivered: i32,
    pub qty_returned: i32,
    pub qty_not_used: i32,
    pub qty_damaged: i32,
    pub qty_lost: i32,
    pub damage_reason: Option<&'a str>,
    pub lost_reason: Option<&'a str>,
    pub notes: Option<&'a str>,
}

impl<'a> NewReturnItem<'a> {
    /// Lines are validated before they get here; this only shapes the row.
    pub fn from_line(return_id: i32, line: &'a ReturnLine) -> Self {
        Self {
            return_id,
            product_id: line.product_id,
            qty_delivered: line.qty_delivered,
            qty_returned: line.qty_returned,
            qty_not_used: line.qty_not_used,
            qty_damaged: line.qty_damaged,
            qty_lost: line.qty_lost,
            damage_reason: line.damage_reason.as_deref(),
            lost_reason: line.lost_reason.as_deref(),
            notes: line.notes.as_deref(),
        }
    }
}

impl From<ReturnItem> for DomainReturnItem {
    fn from(item: ReturnItem) -> Self {
        Self {
            id: item.id,
            return_id: item.return_id,
            product_id: item.product_id,
            qty_delivered: item.qty_delivered,
            qty_returned: item.qty_returned,
            qty_not_used: item.qty_not_used,
            qty_damaged: item.qty_damaged,
            qty_lost: item.qty_lost,
            damage_reason: item.damage_reason,
            lost_reason: item.lost_reason,
            notes: item.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_item_shapes_from_line() {
        let line = ReturnLine {
            product_id: 7,
            qty_delivered: 10,
            qty_returned: 6,
            qty_not_used: 2,
            qty_damaged: 1,
            qty_lost: 1,
            damage_reason: Some("torn lining".into()),
            lost_reason: Some("left at venue".into()),
            notes: None,
        };
        let row = NewReturnItem::from_line(3, &line);
        assert_eq!(row.return_id, 3);
        assert_eq!(row.qty_returned, 6);
        assert_eq!(row.damage_reason, Some("torn lining"));
    }

    #[test]
    fn unknown_return_status_is_rejected() {
        let now = chrono::Utc::now().naive_utc();
        let row = Return {
            id: 1,
            franchise_id: 1,
            booking_id: 1,
            delivery_id: 1,
            return_number: "RET-1".to_string(),
            status: "done".to_string(),
            scheduled_date: None,
            processed_at: None,
            processed_by: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        assert!(DomainReturn::try_from(row).is_err());
    }
}
