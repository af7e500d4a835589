use serde::Deserialize;
use time::Date;

/// Query parameters for the weekly summary. When `week_start` is absent the
/// window starts at the most recent Monday on or before today (UTC).
#[derive(Debug, Deserialize)]
pub struct WeeklyParams {
    #[serde(default)]
    pub week_start: Option<Date>,
}
