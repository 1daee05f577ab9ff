//! Login, password changes and the profile echo.

use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::user::UpdateUser;
use crate::dto::auth::UserProfile;
use crate::forms::auth::{ChangePasswordForm, LoginForm};
use crate::repository::{FranchiseReader, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Verifies credentials and returns the user with their profile so the
/// route can mint a session cookie. Unknown emails, bad passwords and
/// deactivated accounts all fail the same way so the response does not leak
/// which part was wrong.
pub fn login<R>(repo: &R, form: LoginForm) -> ServiceResult<(crate::domain::user::User, UserProfile)>
where
    R: UserReader + FranchiseReader + ?Sized,
{
    form.validate()?;

    let user = repo
        .get_user_by_email(form.email.trim().to_lowercase().as_str())?
        .ok_or(ServiceError::Unauthorized)?;

    let verified = bcrypt::verify(&form.password, &user.password_hash)
        .map_err(|e| ServiceError::Internal(format!("password verification failed: {e}")))?;
    if !verified || !user.is_active {
        return Err(ServiceError::Unauthorized);
    }

    let profile = profile(repo, &user)?;
    Ok((user, profile))
}

/// Re-hashes the password after verifying the current one.
pub fn change_password<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ChangePasswordForm,
) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    form.validate()?;

    let verified = bcrypt::verify(&form.current_password, &user.user.password_hash)
        .map_err(|e| ServiceError::Internal(format!("password verification failed: {e}")))?;
    if !verified {
        return Err(ServiceError::Validation(
            "Current password is incorrect".to_string(),
        ));
    }

    let password_hash = hash_password(&form.new_password)?;
    repo.update_user(
        user.id(),
        &UpdateUser {
            password_hash: Some(password_hash),
            ..UpdateUser::default()
        },
    )?;
    Ok(())
}

/// Profile for the authenticated session.
pub fn me<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<UserProfile>
where
    R: FranchiseReader + ?Sized,
{
    profile(repo, &user.user)
}

pub(crate) fn hash_password(password: &str) -> ServiceResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| ServiceError::Internal(format!("password hashing failed: {e}")))
}

fn profile<R>(repo: &R, user: &crate::domain::user::User) -> ServiceResult<UserProfile>
where
    R: FranchiseReader + ?Sized,
{
    let franchise = match user.franchise_id {
        Some(id) => repo.get_franchise_by_id(id)?,
        None => None,
    };
    Ok(UserProfile::new(user, franchise.as_ref()))
}
