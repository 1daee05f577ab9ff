//! Franchise management. Creation and mutation are super-admin only.

use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::franchise::{Franchise, NewFranchise, UpdateFranchise};
use crate::domain::user::{Module, Role};
use crate::forms::franchise::CreateFranchiseForm;
use crate::repository::{FranchiseReader, FranchiseWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn list_franchises<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Franchise>>
where
    R: FranchiseReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Franchises)?;
    Ok(repo.list_franchises()?)
}

pub fn get_franchise<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Franchise>
where
    R: FranchiseReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Franchises)?;
    repo.get_franchise_by_id(id)?.ok_or(ServiceError::NotFound)
}

pub fn create_franchise<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateFranchiseForm,
) -> ServiceResult<Franchise>
where
    R: FranchiseReader + FranchiseWriter + ?Sized,
{
    user.ensure(Role::SuperAdmin, Module::Franchises)?;
    form.validate()?;

    let new_franchise = NewFranchise::new(
        form.name,
        form.code,
        form.address,
        form.city,
        form.phone,
        form.email,
    );
    if repo.get_franchise_by_code(&new_franchise.code)?.is_some() {
        return Err(ServiceError::Conflict(format!(
            "franchise code {} already exists",
            new_franchise.code
        )));
    }
    Ok(repo.create_franchise(&new_franchise)?)
}

pub fn update_franchise<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    updates: UpdateFranchise,
) -> ServiceResult<Franchise>
where
    R: FranchiseWriter + ?Sized,
{
    user.ensure(Role::SuperAdmin, Module::Franchises)?;
    Ok(repo.update_franchise(id, &updates)?)
}

pub fn delete_franchise<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: FranchiseWriter + ?Sized,
{
    user.ensure(Role::SuperAdmin, Module::Franchises)?;
    Ok(repo.delete_franchise(id)?)
}
