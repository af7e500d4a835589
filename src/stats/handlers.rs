use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;

use super::dto::WeeklyParams;
use super::repo::{self, WeeklyHabitTotal};
use super::services::week_start_on_or_before;
use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState};

pub fn stats_routes() -> Router<AppState> {
    Router::new().route("/stats/weekly", get(weekly))
}

#[instrument(skip(state))]
pub async fn weekly(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<WeeklyParams>,
) -> Result<Json<Vec<WeeklyHabitTotal>>, ApiError> {
    let week_start = params
        .week_start
        .unwrap_or_else(|| week_start_on_or_before(OffsetDateTime::now_utc().date()));
    let totals = repo::weekly_totals(&state.db, user_id, week_start).await?;
    Ok(Json(totals))
}
