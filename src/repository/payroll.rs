//! Repository implementation for attendance, salary configuration and
//! salary adjustments.

use diesel::prelude::*;

use crate::{
    domain::payroll::{
        AttendanceRecord, NewAttendanceRecord, NewSalaryAdjustment, NewSalaryConfig,
        SalaryAdjustment, SalaryConfig, month_bounds,
    },
    models::payroll::{
        AttendanceRecord as DbAttendanceRecord, NewAttendanceRecord as DbNewAttendanceRecord,
        NewSalaryAdjustment as DbNewSalaryAdjustment,
        NewSalaryConfiguration as DbNewSalaryConfiguration,
        SalaryAdjustment as DbSalaryAdjustment, SalaryConfiguration as DbSalaryConfiguration,
    },
    repository::{
        AttendanceListQuery, DieselRepository, PayrollReader, PayrollWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl PayrollReader for DieselRepository {
    fn list_attendance(
        &self,
        query: AttendanceListQuery,
    ) -> RepositoryResult<Vec<AttendanceRecord>> {
        use crate::schema::attendance_records;

        let mut conn = self.conn()?;

        let mut sql = attendance_records::table
            .filter(attendance_records::franchise_id.eq(query.franchise_id))
            .into_boxed();
        if let Some(user_id) = query.user_id {
            sql = sql.filter(attendance_records::user_id.eq(user_id));
        }
        if let Some(from) = query.from {
            sql = sql.filter(attendance_records::work_date.ge(from));
        }
        if let Some(to) = query.to {
            sql = sql.filter(attendance_records::work_date.le(to));
        }

        sql.order((
            attendance_records::work_date.asc(),
            attendance_records::user_id.asc(),
        ))
        .load::<DbAttendanceRecord>(&mut conn)?
        .into_iter()
        .map(|db_record| AttendanceRecord::try_from(db_record).map_err(RepositoryError::from))
        .collect()
    }

    fn list_salary_configs(&self, franchise_id: i32) -> RepositoryResult<Vec<SalaryConfig>> {
        use crate::schema::salary_configurations;

        let mut conn = self.conn()?;
        let configs = salary_configurations::table
            .filter(salary_configurations::franchise_id.eq(franchise_id))
            .filter(salary_configurations::is_active.eq(true))
            .order(salary_configurations::user_id.asc())
            .load::<DbSalaryConfiguration>(&mut conn)?;

        Ok(configs.into_iter().map(Into::into).collect())
    }

    fn get_salary_config_for_user(
        &self,
        user_id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Option<SalaryConfig>> {
        use crate::schema::salary_configurations;

        let mut conn = self.conn()?;
        let config = salary_configurations::table
            .filter(salary_configurations::user_id.eq(user_id))
            .filter(salary_configurations::franchise_id.eq(franchise_id))
            .filter(salary_configurations::is_active.eq(true))
            .order(salary_configurations::effective_from.desc())
            .first::<DbSalaryConfiguration>(&mut conn)
            .optional()?;

        Ok(config.map(Into::into))
    }

    fn list_salary_adjustments(
        &self,
        franchise_id: i32,
        month: &str,
    ) -> RepositoryResult<Vec<SalaryAdjustment>> {
        use crate::schema::salary_adjustments;

        let mut conn = self.conn()?;
        salary_adjustments::table
            .filter(salary_adjustments::franchise_id.eq(franchise_id))
            .filter(salary_adjustments::month.eq(month))
            .order(salary_adjustments::created_at.asc())
            .load::<DbSalaryAdjustment>(&mut conn)?
            .into_iter()
            .map(|db_adjustment| {
                SalaryAdjustment::try_from(db_adjustment).map_err(RepositoryError::from)
            })
            .collect()
    }
}

impl PayrollWriter for DieselRepository {
    fn record_attendance(
        &self,
        record: &NewAttendanceRecord,
    ) -> RepositoryResult<AttendanceRecord> {
        use crate::schema::attendance_records;

        let mut conn = self.conn()?;
        let db_record = diesel::insert_into(attendance_records::table)
            .values(&DbNewAttendanceRecord::from(record))
            .on_conflict((
                attendance_records::user_id,
                attendance_records::work_date,
            ))
            .do_update()
            .set((
                attendance_records::status.eq(record.status.to_string()),
                attendance_records::total_hours.eq(record.total_hours),
                attendance_records::overtime_hours.eq(record.overtime_hours),
                attendance_records::notes.eq(record.notes.as_deref()),
            ))
            .get_result::<DbAttendanceRecord>(&mut conn)?;

        AttendanceRecord::try_from(db_record).map_err(RepositoryError::from)
    }

    fn save_salary_config(&self, config: &NewSalaryConfig) -> RepositoryResult<SalaryConfig> {
        use crate::schema::salary_configurations;

        let mut conn = self.conn()?;

        let db_config = conn
            .transaction::<DbSalaryConfiguration, diesel::result::Error, _>(|conn| {
                diesel::update(
                    salary_configurations::table
                        .filter(salary_configurations::user_id.eq(config.user_id))
                        .filter(salary_configurations::franchise_id.eq(config.franchise_id))
                        .filter(salary_configurations::is_active.eq(true)),
                )
                .set(salary_configurations::is_active.eq(false))
                .execute(conn)?;

                diesel::insert_into(salary_configurations::table)
                    .values(&DbNewSalaryConfiguration::from(config))
                    .get_result::<DbSalaryConfiguration>(conn)
            })
            .map_err(RepositoryError::from)?;

        Ok(db_config.into())
    }

    fn create_salary_adjustment(
        &self,
        adjustment: &NewSalaryAdjustment,
    ) -> RepositoryResult<SalaryAdjustment> {
        use crate::schema::salary_adjustments;

        month_bounds(&adjustment.month)?;
        if adjustment.amount <= 0.0 {
            return Err(RepositoryError::ValidationError(
                "Adjustment amount must be positive".to_string(),
            ));
        }

        let mut conn = self.conn()?;
        let db_adjustment = diesel::insert_into(salary_adjustments::table)
            .values(&DbNewSalaryAdjustment::from(adjustment))
            .get_result::<DbSalaryAdjustment>(&mut conn)?;

        SalaryAdjustment::try_from(db_adjustment).map_err(RepositoryError::from)
    }

    fn delete_salary_adjustment(&self, id: i32, franchise_id: i32) -> RepositoryResult<()> {
        use crate::schema::salary_adjustments;

        let mut conn = self.conn()?;
        let affected = diesel::delete(
            salary_adjustments::table
                .filter(salary_adjustments::id.eq(id))
                .filter(salary_adjustments::franchise_id.eq(franchise_id)),
        )
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
