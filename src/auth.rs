//! Session cookie handling and the authenticated-user extractor.
//!
//! Sessions are stateless: a signed JWT in the `safawala_session` cookie
//! carries the user id and a session id, valid for seven days. Each request
//! re-loads the user row so deactivated accounts lose access immediately
//! even though their token has not expired.

use std::future::{Ready, ready};

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::user::{Module, Role, User, UserPermissions};
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, UserReader};
use crate::services::{ServiceError, ServiceResult};

pub const SESSION_COOKIE: &str = "safawala_session";

const SESSION_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id.
    pub sub: i32,
    pub email: String,
    pub role: String,
    pub session_id: String,
    pub exp: i64,
}

/// Signs a fresh session token for a user.
pub fn issue_session_token(user: &User, secret: &str) -> ServiceResult<String> {
    let claims = SessionClaims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role.to_string(),
        session_id: uuid::Uuid::new_v4().to_string(),
        exp: (Utc::now() + chrono::Duration::days(SESSION_TTL_DAYS)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ServiceError::Internal(format!("failed to sign session token: {e}")))
}

pub fn decode_session_token(token: &str, secret: &str) -> ServiceResult<SessionClaims> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ServiceError::Unauthorized)
}

/// Builds the HttpOnly session cookie carrying a signed token.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::days(SESSION_TTL_DAYS))
        .finish()
}

/// An expired cookie that clears the session on logout.
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::ZERO)
        .finish()
}

/// The caller behind a request: the user row loaded fresh for every request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub session_id: String,
}

impl AuthenticatedUser {
    pub fn id(&self) -> i32 {
        self.user.id
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn permissions(&self) -> &UserPermissions {
        &self.user.permissions
    }

    /// Gate on minimum role and module permission. Super admins skip the
    /// permission check but not the role check.
    pub fn ensure(&self, min_role: Role, module: Module) -> ServiceResult<()> {
        if !self.user.role.at_least(min_role) {
            return Err(ServiceError::Forbidden);
        }
        if self.user.role != Role::SuperAdmin && !self.user.permissions.allows(module) {
            return Err(ServiceError::Forbidden);
        }
        Ok(())
    }

    /// Resolves which franchise a request operates on. Franchise users are
    /// pinned to their own; super admins must name one explicitly.
    pub fn franchise_for(&self, explicit: Option<i32>) -> ServiceResult<i32> {
        match self.user.franchise_id {
            Some(own) => Ok(own),
            None if self.user.role == Role::SuperAdmin => explicit.ok_or_else(|| {
                ServiceError::Validation("franchise_id is required for this request".to_string())
            }),
            None => Err(ServiceError::Unauthorized),
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ServiceError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ServiceError> {
    let config = req
        .app_data::<web::Data<ServerConfig>>()
        .ok_or_else(|| ServiceError::Internal("server config missing".to_string()))?;
    let repo = req
        .app_data::<web::Data<DieselRepository>>()
        .ok_or_else(|| ServiceError::Internal("repository missing".to_string()))?;

    let cookie = req.cookie(SESSION_COOKIE).ok_or(ServiceError::Unauthorized)?;
    let claims = decode_session_token(cookie.value(), &config.secret)?;

    let user = repo
        .get_user_by_id(claims.sub)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::Unauthorized)?;
    if !user.is_active {
        return Err(ServiceError::Unauthorized);
    }

    Ok(AuthenticatedUser {
        user,
        session_id: claims.session_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn user(role: Role, franchise_id: Option<i32>) -> User {
        let created = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        User {
            id: 7,
            franchise_id,
            name: "Asha".into(),
            email: "asha@safawala.test".into(),
            password_hash: String::new(),
            role,
            permissions: UserPermissions::for_role(role),
            is_active: true,
            created_at: created,
            updated_at: created,
        }
    }

    fn caller(role: Role, franchise_id: Option<i32>) -> AuthenticatedUser {
        AuthenticatedUser {
            user: user(role, franchise_id),
            session_id: "s".into(),
        }
    }

    #[test]
    fn token_round_trips() {
        let token = issue_session_token(&user(Role::Staff, Some(1)), "secret").unwrap();
        let claims = decode_session_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, "staff");
        assert!(decode_session_token(&token, "other-secret").is_err());
    }

    #[test]
    fn ensure_checks_role_and_module() {
        let staff = caller(Role::Staff, Some(1));
        assert!(staff.ensure(Role::Staff, Module::Bookings).is_ok());
        assert!(matches!(
            staff.ensure(Role::FranchiseAdmin, Module::Bookings),
            Err(ServiceError::Forbidden)
        ));
        // Staff defaults exclude financials.
        assert!(matches!(
            staff.ensure(Role::Staff, Module::Financials),
            Err(ServiceError::Forbidden)
        ));
    }

    #[test]
    fn super_admin_bypasses_module_permissions() {
        let mut admin = caller(Role::SuperAdmin, None);
        admin.user.permissions = UserPermissions::for_role(Role::Readonly);
        assert!(admin.ensure(Role::SuperAdmin, Module::Financials).is_ok());
    }

    #[test]
    fn franchise_scope_resolution() {
        let staff = caller(Role::Staff, Some(3));
        assert_eq!(staff.franchise_for(None).unwrap(), 3);
        // Explicit ids never override a franchise user's own scope.
        assert_eq!(staff.franchise_for(Some(9)).unwrap(), 3);

        let admin = caller(Role::SuperAdmin, None);
        assert_eq!(admin.franchise_for(Some(9)).unwrap(), 9);
        assert!(matches!(
            admin.franchise_for(None),
            Err(ServiceError::Validation(_))
        ));
    }
}
