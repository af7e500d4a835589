use std::collections::HashSet;

use sqlx::PgPool;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::repo::{CheckIn, Habit};
use crate::error::ApiError;

pub async fn create_habit(
    db: &PgPool,
    owner_id: Uuid,
    name: &str,
    description: Option<&str>,
    target_per_day: i32,
) -> Result<Habit, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("name must not be empty".into()));
    }
    if target_per_day < 1 {
        return Err(ApiError::Validation(
            "target_per_day must be at least 1".into(),
        ));
    }
    Ok(Habit::create(db, owner_id, name, description, target_per_day).await?)
}

pub async fn record_check_in(
    db: &PgPool,
    habit: &Habit,
    date: Option<Date>,
    count: i32,
) -> Result<CheckIn, ApiError> {
    if count < 1 {
        return Err(ApiError::Validation("count must be at least 1".into()));
    }
    let date = date.unwrap_or_else(|| OffsetDateTime::now_utc().date());
    Ok(CheckIn::accumulate(db, habit.id, date, count).await?)
}

/// Consecutive days with a check-in, counted backward from `as_of` until the
/// first gap. A streak that does not include `as_of` itself counts as 0.
pub fn streak_from_dates(dates: &HashSet<Date>, as_of: Date) -> u32 {
    let mut streak = 0;
    let mut cur = as_of;
    while dates.contains(&cur) {
        streak += 1;
        match cur.previous_day() {
            Some(prev) => cur = prev,
            None => break,
        }
    }
    streak
}

pub async fn calculate_streak(db: &PgPool, habit_id: Uuid, as_of: Date) -> Result<u32, ApiError> {
    let dates: HashSet<Date> = CheckIn::dates_for_habit(db, habit_id)
        .await?
        .into_iter()
        .collect();
    Ok(streak_from_dates(&dates, as_of))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn set(dates: &[Date]) -> HashSet<Date> {
        dates.iter().copied().collect()
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(streak_from_dates(&HashSet::new(), date!(2026 - 08 - 06)), 0);
    }

    #[test]
    fn streak_requires_a_check_in_on_the_reference_date() {
        // Unbroken run ending yesterday still counts 0 as of today.
        let dates = set(&[
            date!(2026 - 08 - 03),
            date!(2026 - 08 - 04),
            date!(2026 - 08 - 05),
        ]);
        assert_eq!(streak_from_dates(&dates, date!(2026 - 08 - 06)), 0);
        assert_eq!(streak_from_dates(&dates, date!(2026 - 08 - 05)), 3);
    }

    #[test]
    fn three_consecutive_days_with_a_gap_before() {
        // D, D-1, D-2 present, D-3 missing, D-4 present.
        let dates = set(&[
            date!(2026 - 08 - 06),
            date!(2026 - 08 - 05),
            date!(2026 - 08 - 04),
            date!(2026 - 08 - 02),
        ]);
        assert_eq!(streak_from_dates(&dates, date!(2026 - 08 - 06)), 3);
    }

    #[test]
    fn single_day_streak() {
        let dates = set(&[date!(2026 - 08 - 06)]);
        assert_eq!(streak_from_dates(&dates, date!(2026 - 08 - 06)), 1);
    }

    #[test]
    fn streak_crosses_month_and_year_boundaries() {
        let dates = set(&[
            date!(2025 - 12 - 30),
            date!(2025 - 12 - 31),
            date!(2026 - 01 - 01),
            date!(2026 - 01 - 02),
        ]);
        assert_eq!(streak_from_dates(&dates, date!(2026 - 01 - 02)), 4);
    }

    #[test]
    fn streak_stops_at_calendar_minimum() {
        // previous_day() returning None must terminate, not wrap.
        let dates = set(&[Date::MIN]);
        assert_eq!(streak_from_dates(&dates, Date::MIN), 1);
    }
}
