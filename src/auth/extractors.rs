use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::warn;
use uuid::Uuid;

use super::jwt::JwtKeys;
use super::repo::{Role, User};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated identity attached to a request: bearer token verified,
/// user loaded, `{id, role}` carried into the handler. Deleted user with
/// a still-valid token denies the same way as a bad token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?
        .strip_prefix("Bearer ")
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthenticated)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired token");
            ApiError::Unauthenticated
        })?;

        let (id, role) = User::find_identity(&state.db, claims.sub)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %claims.sub, "token subject no longer exists");
                ApiError::Unauthenticated
            })?;

        Ok(AuthUser { id, role })
    }
}

/// Role gate layered on top of authentication. One check, reusable per
/// route; callers pass the allowed set.
pub fn require_role(user: &AuthUser, allowed: &[Role]) -> Result<(), ApiError> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        warn!(user_id = %user.id, role = %user.role, "role not permitted");
        Err(ApiError::Forbidden { role: user.role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_extracts_value() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn bearer_token_rejects_missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn bearer_token_rejects_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("abc.def.ghi"));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn require_role_allows_member_of_set() {
        let user = AuthUser {
            id: Uuid::new_v4(),
            role: Role::Admin,
        };
        assert!(require_role(&user, &[Role::Admin]).is_ok());
        assert!(require_role(&user, &[Role::Doctor, Role::Admin]).is_ok());
    }

    #[test]
    fn require_role_denies_others_with_forbidden() {
        let user = AuthUser {
            id: Uuid::new_v4(),
            role: Role::Patient,
        };
        let err = require_role(&user, &[Role::Admin]).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden { role: Role::Patient }));
    }
}
