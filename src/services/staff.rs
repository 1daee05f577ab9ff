//! Staff administration within a franchise.

use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::user::{Module, NewUser, Role, UpdateUser, User};
use crate::forms::staff::{CreateStaffForm, UpdateStaffForm};
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult, auth::hash_password};

pub fn list_staff<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<Vec<User>>
where
    R: UserReader + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Staff)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.list_users(franchise_id)?)
}

/// Creates a staff account. Callers can only grant roles at or below their
/// own, and only super admins may mint other super admins.
pub fn create_staff<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateStaffForm,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Staff)?;
    form.validate()?;

    if form.role.level() > user.role().level() {
        return Err(ServiceError::Forbidden);
    }

    let franchise_id = if form.role == Role::SuperAdmin {
        None
    } else {
        Some(user.franchise_for(form.franchise_id)?)
    };

    let email = form.email.trim().to_lowercase();
    if repo.get_user_by_email(&email)?.is_some() {
        return Err(ServiceError::Conflict(format!(
            "a user with email {email} already exists"
        )));
    }

    let password_hash = hash_password(&form.password)?;
    let new_user = NewUser::new(
        franchise_id,
        form.name,
        email,
        password_hash,
        form.role,
        form.permissions,
    )?;
    Ok(repo.create_user(&new_user)?)
}

pub fn update_staff<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: UpdateStaffForm,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Staff)?;
    form.validate()?;

    let target = load_in_scope(repo, user, id)?;
    if let Some(role) = form.role {
        if role.level() > user.role().level() || target.role.level() > user.role().level() {
            return Err(ServiceError::Forbidden);
        }
    }

    Ok(repo.update_user(
        target.id,
        &UpdateUser {
            name: form.name,
            role: form.role,
            permissions: form.permissions,
            ..UpdateUser::default()
        },
    )?)
}

/// Activates or deactivates an account. Nobody can lock themselves out.
pub fn set_staff_active<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    active: bool,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Staff)?;
    if id == user.id() && !active {
        return Err(ServiceError::Validation(
            "You cannot deactivate your own account".to_string(),
        ));
    }

    let target = load_in_scope(repo, user, id)?;
    Ok(repo.update_user(
        target.id,
        &UpdateUser {
            is_active: Some(active),
            ..UpdateUser::default()
        },
    )?)
}

/// Loads a user and hides accounts outside the caller's franchise.
fn load_in_scope<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let target = repo.get_user_by_id(id)?.ok_or(ServiceError::NotFound)?;
    if user.role() != Role::SuperAdmin && target.franchise_id != user.user.franchise_id {
        return Err(ServiceError::NotFound);
    }
    Ok(target)
}
