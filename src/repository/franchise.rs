//! Repository implementation for franchises.

use diesel::prelude::*;

use crate::{
    domain::franchise::{Franchise, NewFranchise, UpdateFranchise},
    models::franchise::{
        Franchise as DbFranchise, NewFranchise as DbNewFranchise,
        UpdateFranchise as DbUpdateFranchise,
    },
    repository::{
        DieselRepository, FranchiseReader, FranchiseWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl FranchiseReader for DieselRepository {
    fn get_franchise_by_id(&self, id: i32) -> RepositoryResult<Option<Franchise>> {
        use crate::schema::franchises;

        let mut conn = self.conn()?;
        let db_franchise = franchises::table
            .find(id)
            .first::<DbFranchise>(&mut conn)
            .optional()?;

        Ok(db_franchise.map(Into::into))
    }

    fn get_franchise_by_code(&self, code: &str) -> RepositoryResult<Option<Franchise>> {
        use crate::schema::franchises;

        let mut conn = self.conn()?;
        let db_franchise = franchises::table
            .filter(franchises::code.eq(code.to_uppercase()))
            .first::<DbFranchise>(&mut conn)
            .optional()?;

        Ok(db_franchise.map(Into::into))
    }

    fn list_franchises(&self) -> RepositoryResult<Vec<Franchise>> {
        use crate::schema::franchises;

        let mut conn = self.conn()?;
        let db_franchises = franchises::table
            .order(franchises::name.asc())
            .load::<DbFranchise>(&mut conn)?;

        Ok(db_franchises.into_iter().map(Into::into).collect())
    }
}

impl FranchiseWriter for DieselRepository {
    fn create_franchise(&self, new_franchise: &NewFranchise) -> RepositoryResult<Franchise> {
        use crate::schema::franchises;

        let mut conn = self.conn()?;
        let db_new_franchise: DbNewFranchise = new_franchise.into();

        let db_franchise = diesel::insert_into(franchises::table)
            .values(&db_new_franchise)
            .get_result::<DbFranchise>(&mut conn)?;

        Ok(db_franchise.into())
    }

    fn update_franchise(&self, id: i32, updates: &UpdateFranchise) -> RepositoryResult<Franchise> {
        use crate::schema::franchises;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateFranchise = updates.into();

        let db_franchise = diesel::update(franchises::table.find(id))
            .set((&db_updates, franchises::updated_at.eq(diesel::dsl::now)))
            .get_result::<DbFranchise>(&mut conn)?;

        Ok(db_franchise.into())
    }

    fn delete_franchise(&self, id: i32) -> RepositoryResult<()> {
        use crate::schema::{bookings, franchises, users};

        let mut conn = self.conn()?;

        let users_count: i64 = users::table
            .filter(users::franchise_id.eq(id))
            .count()
            .get_result(&mut conn)?;
        let bookings_count: i64 = bookings::table
            .filter(bookings::franchise_id.eq(id))
            .count()
            .get_result(&mut conn)?;
        if users_count > 0 || bookings_count > 0 {
            return Err(RepositoryError::ConstraintViolation(
                "Franchise has users or bookings and cannot be deleted".to_string(),
            ));
        }

        let affected = diesel::delete(franchises::table.find(id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
