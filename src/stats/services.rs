use time::{Date, Duration};

/// Most recent Monday on or before `date`.
pub fn week_start_on_or_before(date: Date) -> Date {
    let days_from_monday = date.weekday().number_days_from_monday() as i64;
    date - Duration::days(days_from_monday)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn monday_maps_to_itself() {
        assert_eq!(
            week_start_on_or_before(date!(2026 - 08 - 03)),
            date!(2026 - 08 - 03)
        );
    }

    #[test]
    fn midweek_maps_back_to_monday() {
        // 2026-08-06 is a Thursday.
        assert_eq!(
            week_start_on_or_before(date!(2026 - 08 - 06)),
            date!(2026 - 08 - 03)
        );
    }

    #[test]
    fn sunday_maps_back_six_days() {
        assert_eq!(
            week_start_on_or_before(date!(2026 - 08 - 09)),
            date!(2026 - 08 - 03)
        );
    }

    #[test]
    fn week_window_spans_seven_inclusive_days() {
        let start = week_start_on_or_before(date!(2026 - 08 - 06));
        let end = start + Duration::days(6);
        assert_eq!(end, date!(2026 - 08 - 09));
        assert_eq!((end - start).whole_days(), 6);
    }

    #[test]
    fn crosses_month_boundary() {
        // 2026-08-01 is a Saturday; its week started Monday 2026-07-27.
        assert_eq!(
            week_start_on_or_before(date!(2026 - 08 - 01)),
            date!(2026 - 07 - 27)
        );
    }
}
