use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{AuthResponse, LoginRequest, RegisterRequest, UpdateRoleRequest, UserResponse};
use super::extractors::{require_role, AuthUser};
use super::jwt::JwtKeys;
use super::password::{hash_password, verify_password};
use super::repo::{Role, User};
use crate::error::{is_unique_violation, ApiError};
use crate::state::AppState;

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    payload.validate()?;

    // Early duplicate check for a friendly fast path; the unique index on
    // email is the actual safety mechanism under concurrent registration.
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::DuplicateEmail);
    }

    let hash = hash_password(&payload.password)?;
    let role = payload.role.unwrap_or(Role::Patient);

    let user = match User::create(&state.db, &payload.email, &hash, &payload.name, role).await {
        Ok(u) => u,
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %payload.email, "lost registration race on email");
            return Err(ApiError::DuplicateEmail);
        }
        Err(e) => return Err(e.into()),
    };

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            token,
            user: user.into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.validate()?;

    // Unknown email and wrong password take the same exit so callers
    // cannot enumerate accounts.
    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login with unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(&payload.password, &user.password_hash) {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        success: true,
        token,
        user: user.into(),
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    // The row can vanish between token verification and this read.
    let user = User::find_by_id(&state.db, auth.id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    Ok(Json(UserResponse {
        success: true,
        user: user.into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    require_role(&auth, &[Role::Admin])?;

    let user = User::update_role(&state.db, id, payload.role)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    info!(admin_id = %auth.id, user_id = %user.id, role = %user.role, "role updated");
    Ok(Json(UserResponse {
        success: true,
        user: user.into(),
    }))
}
