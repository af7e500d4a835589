use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Habit record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Habit {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub target_per_day: i32,
    pub created_at: OffsetDateTime,
}

/// Check-in record: at most one row per (habit_id, date).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CheckIn {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub date: Date,
    pub count: i32,
}

impl Habit {
    pub async fn create(
        db: &PgPool,
        owner_id: Uuid,
        name: &str,
        description: Option<&str>,
        target_per_day: i32,
    ) -> sqlx::Result<Habit> {
        sqlx::query_as::<_, Habit>(
            r#"
            INSERT INTO habits (owner_id, name, description, target_per_day)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, name, description, target_per_day, created_at
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(description)
        .bind(target_per_day)
        .fetch_one(db)
        .await
    }

    pub async fn list_by_owner(db: &PgPool, owner_id: Uuid) -> sqlx::Result<Vec<Habit>> {
        sqlx::query_as::<_, Habit>(
            r#"
            SELECT id, owner_id, name, description, target_per_day, created_at
            FROM habits
            WHERE owner_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(db)
        .await
    }

    /// The query is owner-scoped, so a habit owned by someone else is
    /// indistinguishable from one that does not exist.
    pub async fn get_owned(
        db: &PgPool,
        habit_id: Uuid,
        owner_id: Uuid,
    ) -> sqlx::Result<Option<Habit>> {
        sqlx::query_as::<_, Habit>(
            r#"
            SELECT id, owner_id, name, description, target_per_day, created_at
            FROM habits
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(habit_id)
        .bind(owner_id)
        .fetch_optional(db)
        .await
    }

    /// Check-ins cascade via the foreign key, so the delete is atomic.
    pub async fn delete(db: &PgPool, habit_id: Uuid) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM habits WHERE id = $1")
            .bind(habit_id)
            .execute(db)
            .await?;
        Ok(())
    }
}

impl CheckIn {
    /// Insert-or-increment in a single statement. Concurrent callers for the
    /// same (habit, date) serialize on the unique index: one inserts, the
    /// rest land in DO UPDATE, and no increment is lost.
    pub async fn accumulate(
        db: &PgPool,
        habit_id: Uuid,
        date: Date,
        count: i32,
    ) -> sqlx::Result<CheckIn> {
        sqlx::query_as::<_, CheckIn>(
            r#"
            INSERT INTO check_ins (habit_id, date, count)
            VALUES ($1, $2, $3)
            ON CONFLICT (habit_id, date)
            DO UPDATE SET count = check_ins.count + EXCLUDED.count
            RETURNING id, habit_id, date, count
            "#,
        )
        .bind(habit_id)
        .bind(date)
        .bind(count)
        .fetch_one(db)
        .await
    }

    /// Distinct calendar dates with at least one check-in for the habit.
    pub async fn dates_for_habit(db: &PgPool, habit_id: Uuid) -> sqlx::Result<Vec<Date>> {
        let rows: Vec<(Date,)> =
            sqlx::query_as("SELECT DISTINCT date FROM check_ins WHERE habit_id = $1")
                .bind(habit_id)
                .fetch_all(db)
                .await?;
        Ok(rows.into_iter().map(|(d,)| d).collect())
    }
}
