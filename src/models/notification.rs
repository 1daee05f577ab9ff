//! Diesel model for the notification delivery log.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::notification::{
    NewNotificationLog as DomainNewNotificationLog, NotificationLog as DomainNotificationLog,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::notification_log)]
pub struct NotificationLog {
    pub id: i32,
    pub franchise_id: i32,
    pub notification_type: String,
    pub phone: String,
    pub message: String,
    pub status: String,
    pub error: Option<String>,
    pub booking_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::notification_log)]
pub struct NewNotificationLog<'a> {
    pub franchise_id: i32,
    pub notification_type: String,
    pub phone: &'a str,
    pub message: &'a str,
    pub status: String,
    pub error: Option<&'a str>,
    pub booking_id: Option<i32>,
}

impl TryFrom<NotificationLog> for DomainNotificationLog {
    type Error = TypeConstraintError;

    fn try_from(log: NotificationLog) -> Result<Self, Self::Error> {
        Ok(Self {
            id: log.id,
            franchise_id: log.franchise_id,
            notification_type: log.notification_type.parse()?,
            phone: log.phone,
            message: log.message,
            status: log.status.parse()?,
            error: log.error,
            booking_id: log.booking_id,
            created_at: log.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewNotificationLog> for NewNotificationLog<'a> {
    fn from(log: &'a DomainNewNotificationLog) -> Self {
        Self {
            franchise_id: log.franchise_id,
            notification_type: log.notification_type.to_string(),
            phone: log.phone.as_str(),
            message: log.message.as_str(),
            status: log.status.to_string(),
            error: log.error.as_deref(),
            booking_id: log.booking_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::{NotificationKind, NotificationStatus};

    #[test]
    fn log_round_trips_type_and_status() {
        let domain = DomainNewNotificationLog {
            franchise_id: 1,
            notification_type: NotificationKind::ReturnReminder,
            phone: "919876543210".to_string(),
            message: "Return due tomorrow".to_string(),
            status: NotificationStatus::Sent,
            error: None,
            booking_id: Some(4),
        };
        let new: NewNotificationLog = (&domain).into();
        assert_eq!(new.notification_type, "return_reminder");
        assert_eq!(new.status, "sent");
    }
}
