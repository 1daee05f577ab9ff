//! Repository implementation for staff accounts.

use diesel::prelude::*;

use crate::{
    domain::user::{NewUser, UpdateUser, User},
    models::user::{NewUser as DbNewUser, UpdateUser as DbUpdateUser, User as DbUser},
    repository::{
        DieselRepository, UserReader, UserWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = users::table
            .find(id)
            .first::<DbUser>(&mut conn)
            .optional()?;

        match db_user {
            Some(db_user) => Ok(Some(User::try_from(db_user).map_err(RepositoryError::from)?)),
            None => Ok(None),
        }
    }

    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = users::table
            .filter(users::email.eq(email.to_lowercase()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        match db_user {
            Some(db_user) => Ok(Some(User::try_from(db_user).map_err(RepositoryError::from)?)),
            None => Ok(None),
        }
    }

    fn list_users(&self, franchise_id: i32) -> RepositoryResult<Vec<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_users = users::table
            .filter(users::franchise_id.eq(franchise_id))
            .order(users::name.asc())
            .load::<DbUser>(&mut conn)?;

        db_users
            .into_iter()
            .map(|db_user| User::try_from(db_user).map_err(RepositoryError::from))
            .collect()
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_new_user: DbNewUser = new_user.into();

        let db_user = diesel::insert_into(users::table)
            .values(&db_new_user)
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(db_user).map_err(RepositoryError::from)
    }

    fn update_user(&self, id: i32, updates: &UpdateUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateUser = updates.into();

        let db_user = diesel::update(users::table.find(id))
            .set((&db_updates, users::updated_at.eq(diesel::dsl::now)))
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(db_user).map_err(RepositoryError::from)
    }
}
