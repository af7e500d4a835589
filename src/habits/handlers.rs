use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{CheckInRequest, CreateHabitRequest, DeleteAck, StreakResponse};
use super::repo::{CheckIn, Habit};
use super::services;
use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState};

pub fn habit_routes() -> Router<AppState> {
    Router::new()
        .route("/habits", post(create_habit).get(list_habits))
        .route("/habits/:id", get(get_habit).delete(delete_habit))
        .route("/habits/:id/checkin", post(check_in))
        .route("/habits/:id/streak", get(get_streak))
}

#[instrument(skip(state, payload))]
pub async fn create_habit(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<Habit>), ApiError> {
    let habit = services::create_habit(
        &state.db,
        user_id,
        &payload.name,
        payload.description.as_deref(),
        payload.target_per_day,
    )
    .await?;
    info!(habit_id = %habit.id, user_id = %user_id, "habit created");
    Ok((StatusCode::CREATED, Json(habit)))
}

#[instrument(skip(state))]
pub async fn list_habits(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Habit>>, ApiError> {
    let habits = Habit::list_by_owner(&state.db, user_id).await?;
    Ok(Json(habits))
}

#[instrument(skip(state))]
pub async fn get_habit(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Habit>, ApiError> {
    let habit = Habit::get_owned(&state.db, id, user_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(habit))
}

#[instrument(skip(state))]
pub async fn delete_habit(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteAck>, ApiError> {
    let habit = Habit::get_owned(&state.db, id, user_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Habit::delete(&state.db, habit.id).await?;
    info!(habit_id = %habit.id, user_id = %user_id, "habit deleted");
    Ok(Json(DeleteAck { ok: true }))
}

#[instrument(skip(state, payload))]
pub async fn check_in(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CheckInRequest>,
) -> Result<Json<CheckIn>, ApiError> {
    let habit = Habit::get_owned(&state.db, id, user_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    let check_in =
        services::record_check_in(&state.db, &habit, payload.date, payload.count).await?;
    info!(
        habit_id = %habit.id,
        date = %check_in.date,
        count = check_in.count,
        "check-in recorded"
    );
    Ok(Json(check_in))
}

#[instrument(skip(state))]
pub async fn get_streak(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<StreakResponse>, ApiError> {
    let habit = Habit::get_owned(&state.db, id, user_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    let today = OffsetDateTime::now_utc().date();
    let streak = services::calculate_streak(&state.db, habit.id, today).await?;
    Ok(Json(StreakResponse { streak }))
}
