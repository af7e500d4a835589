use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::{Date, Duration};
use uuid::Uuid;

/// One row per owned habit, whether or not it was checked in during the week.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WeeklyHabitTotal {
    pub habit_id: Uuid,
    pub name: String,
    pub total_checkins: i64,
}

/// Sums check-in counts over `[week_start, week_start + 6]` inclusive.
/// The LEFT JOIN keeps habits with no check-ins in the window at total 0.
pub async fn weekly_totals(
    db: &PgPool,
    owner_id: Uuid,
    week_start: Date,
) -> sqlx::Result<Vec<WeeklyHabitTotal>> {
    let week_end = week_start + Duration::days(6);
    sqlx::query_as::<_, WeeklyHabitTotal>(
        r#"
        SELECT h.id AS habit_id, h.name, COALESCE(SUM(c.count), 0)::BIGINT AS total_checkins
        FROM habits h
        LEFT JOIN check_ins c
            ON c.habit_id = h.id AND c.date >= $2 AND c.date <= $3
        WHERE h.owner_id = $1
        GROUP BY h.id
        ORDER BY h.created_at ASC
        "#,
    )
    .bind(owner_id)
    .bind(week_start)
    .bind(week_end)
    .fetch_all(db)
    .await
}
