//! Repository implementation for the notification delivery log.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::notification::{NewNotificationLog, NotificationLog},
    models::notification::{
        NewNotificationLog as DbNewNotificationLog, NotificationLog as DbNotificationLog,
    },
    repository::{
        DieselRepository, NotificationListQuery, NotificationReader, NotificationWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

fn base_query(
    query: &NotificationListQuery,
) -> crate::schema::notification_log::BoxedQuery<'static, Sqlite> {
    use crate::schema::notification_log;

    let mut sql = notification_log::table
        .filter(notification_log::franchise_id.eq(query.franchise_id))
        .into_boxed();

    if let Some(booking_id) = query.booking_id {
        sql = sql.filter(notification_log::booking_id.eq(booking_id));
    }
    if let Some(status) = query.status {
        sql = sql.filter(notification_log::status.eq(status.to_string()));
    }

    sql
}

impl NotificationReader for DieselRepository {
    fn list_notifications(
        &self,
        query: NotificationListQuery,
    ) -> RepositoryResult<(usize, Vec<NotificationLog>)> {
        use crate::schema::notification_log;

        let mut conn = self.conn()?;

        let total: i64 = base_query(&query).count().get_result(&mut conn)?;

        let mut sql = base_query(&query).order(notification_log::created_at.desc());
        if let Some(pagination) = &query.pagination {
            let page = if pagination.page == 0 { 1 } else { pagination.page } as i64;
            let per_page = pagination.per_page as i64;
            sql = sql.limit(per_page).offset((page - 1) * per_page);
        }

        let logs = sql
            .load::<DbNotificationLog>(&mut conn)?
            .into_iter()
            .map(|db_log| NotificationLog::try_from(db_log).map_err(RepositoryError::from))
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok((total as usize, logs))
    }
}

impl NotificationWriter for DieselRepository {
    fn log_notification(&self, entry: &NewNotificationLog) -> RepositoryResult<NotificationLog> {
        use crate::schema::notification_log;

        let mut conn = self.conn()?;
        let db_log = diesel::insert_into(notification_log::table)
            .values(&DbNewNotificationLog::from(entry))
            .get_result::<DbNotificationLog>(&mut conn)?;

        NotificationLog::try_from(db_log).map_err(RepositoryError::from)
    }
}
