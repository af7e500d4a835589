use serde::{Deserialize, Serialize};
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Request body for habit creation.
#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_target")]
    pub target_per_day: i32,
}

fn default_target() -> i32 {
    1
}

/// Request body for a check-in. Both fields are optional: the date defaults
/// to today (server clock, UTC) and the count to 1.
#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    #[serde(default, with = "iso_date::option")]
    pub date: Option<Date>,
    #[serde(default = "default_count")]
    pub count: i32,
}

fn default_count() -> i32 {
    1
}

#[derive(Debug, Serialize)]
pub struct StreakResponse {
    pub streak: u32,
}

#[derive(Debug, Serialize)]
pub struct DeleteAck {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_in_request_defaults() {
        let req: CheckInRequest = serde_json::from_str("{}").unwrap();
        assert!(req.date.is_none());
        assert_eq!(req.count, 1);
    }

    #[test]
    fn check_in_request_parses_date_and_count() {
        let req: CheckInRequest =
            serde_json::from_str(r#"{"date": "2026-08-03", "count": 2}"#).unwrap();
        assert_eq!(req.date, Some(time::macros::date!(2026 - 08 - 03)));
        assert_eq!(req.count, 2);
    }

    #[test]
    fn create_habit_request_defaults_target() {
        let req: CreateHabitRequest = serde_json::from_str(r#"{"name": "Run"}"#).unwrap();
        assert_eq!(req.target_per_day, 1);
        assert!(req.description.is_none());
    }
}
