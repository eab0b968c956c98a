//! `AuthUser` and `AdminUser` extractors: pull the JWT from the
//! Authorization header, verify it and inject the caller's context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::warn;

use qrfolio_core::error::AppError;
use qrfolio_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Read the bearer token from the request headers.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.jwt_decoder.decode(token)?;
        Ok(AuthUser(RequestContext::new(
            claims.user_id(),
            claims.email,
            claims.is_admin,
        )))
    }
}

/// Authenticated administrator.
///
/// The admin claim in the token is re-checked against the stored account so
/// a demoted or deleted admin loses access before their token expires.
#[derive(Debug, Clone)]
pub struct AdminUser(pub RequestContext);

impl std::ops::Deref for AdminUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthUser(ctx) = AuthUser::from_request_parts(parts, state).await?;
        if !ctx.is_admin {
            return Err(AppError::authorization("Admin access required").into());
        }

        let stored = state.user_repo.find_by_id(ctx.user_id).await?;
        match stored {
            Some(user) if user.is_admin => Ok(AdminUser(RequestContext::new(
                user.id, user.email, true,
            ))),
            _ => {
                warn!(user_id = %ctx.user_id, "Admin claim no longer backed by stored account");
                Err(AppError::authorization("Admin access required").into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/auth/me");
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&parts(Some("Bearer abc.def"))).unwrap(), "abc.def");
        assert!(bearer_token(&parts(None)).is_err());
        assert!(bearer_token(&parts(Some("Basic xyz"))).is_err());
        assert!(bearer_token(&parts(Some("Bearer   "))).is_err());
    }
}
