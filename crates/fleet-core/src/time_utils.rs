use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// Detect the IANA timezone name of the running system.
///
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Parse `tz_name`, falling back to UTC (with a warning) when unrecognised.
pub fn resolve_timezone(tz_name: &str) -> Tz {
    tz_name.parse::<Tz>().unwrap_or_else(|_| {
        warn!("unrecognised timezone \"{}\", falling back to UTC", tz_name);
        Tz::UTC
    })
}

/// Calendar date of `now` as seen in `tz_name`.
pub fn local_date(now: DateTime<Utc>, tz_name: &str) -> NaiveDate {
    now.with_timezone(&resolve_timezone(tz_name)).date_naive()
}

/// Today's calendar date in `tz_name`.
pub fn today(tz_name: &str) -> NaiveDate {
    local_date(Utc::now(), tz_name)
}

/// The `days` consecutive dates ending at `end` (inclusive), newest first.
pub fn trailing_window(end: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days)
        .filter_map(|offset| end.checked_sub_days(chrono::Days::new(u64::from(offset))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_resolve_timezone_known_zone() {
        assert_eq!(resolve_timezone("Europe/Berlin"), Tz::Europe__Berlin);
    }

    #[test]
    fn test_resolve_timezone_falls_back_to_utc() {
        assert_eq!(resolve_timezone("not-a-zone"), Tz::UTC);
    }

    #[test]
    fn test_local_date_crosses_midnight() {
        // 23:30 UTC is already the next day in Tokyo.
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 23, 30, 0).unwrap();
        assert_eq!(local_date(now, "UTC"), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(
            local_date(now, "Asia/Tokyo"),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
    }

    #[test]
    fn test_trailing_window_newest_first() {
        let end = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let days = trailing_window(end, 3);
        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            ]
        );
    }

    #[test]
    fn test_system_timezone_is_non_empty() {
        assert!(!get_system_timezone().is_empty());
    }
}
