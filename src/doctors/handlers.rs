use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{
    DeleteAllResponse, DeleteResponse, DoctorListResponse, DoctorPayload, DoctorResponse,
};
use super::repo::Doctor;
use crate::auth::extractors::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn list_doctors(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<DoctorListResponse>, ApiError> {
    let doctors = Doctor::list_by_owner(&state.db, auth.id).await?;
    Ok(Json(DoctorListResponse {
        success: true,
        doctors: doctors.into_iter().map(Into::into).collect(),
    }))
}

#[instrument(skip(state))]
pub async fn get_doctor(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DoctorResponse>, ApiError> {
    let doctor = Doctor::get_owned(&state.db, auth.id, id)
        .await?
        .ok_or(ApiError::NotFound("Doctor"))?;
    Ok(Json(DoctorResponse {
        success: true,
        doctor: doctor.into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn create_doctor(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut payload): Json<DoctorPayload>,
) -> Result<(StatusCode, Json<DoctorResponse>), ApiError> {
    payload.validate()?;

    let doctor = Doctor::create(
        &state.db,
        auth.id,
        &payload.name,
        &payload.specialty,
        payload.phone.as_deref(),
        payload.email.as_deref(),
        payload.address.as_deref(),
    )
    .await?;

    info!(user_id = %auth.id, doctor_id = %doctor.id, "doctor created");
    Ok((
        StatusCode::CREATED,
        Json(DoctorResponse {
            success: true,
            doctor: doctor.into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_doctor(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(mut payload): Json<DoctorPayload>,
) -> Result<Json<DoctorResponse>, ApiError> {
    payload.validate()?;

    let doctor = Doctor::update_owned(
        &state.db,
        auth.id,
        id,
        &payload.name,
        &payload.specialty,
        payload.phone.as_deref(),
        payload.email.as_deref(),
        payload.address.as_deref(),
    )
    .await?
    .ok_or(ApiError::NotFound("Doctor"))?;

    info!(user_id = %auth.id, doctor_id = %doctor.id, "doctor updated");
    Ok(Json(DoctorResponse {
        success: true,
        doctor: doctor.into(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_doctor(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !Doctor::delete_owned(&state.db, auth.id, id).await? {
        return Err(ApiError::NotFound("Doctor"));
    }
    info!(user_id = %auth.id, doctor_id = %id, "doctor deleted");
    Ok(Json(DeleteResponse {
        success: true,
        message: "Doctor deleted successfully".into(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_all_doctors(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<DeleteAllResponse>, ApiError> {
    let deleted = Doctor::delete_all_by_owner(&state.db, auth.id).await?;
    info!(user_id = %auth.id, deleted, "all doctors deleted");
    Ok(Json(DeleteAllResponse {
        success: true,
        message: "All doctors deleted successfully".into(),
        deleted,
    }))
}
