use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use chrono_tz::Tz;

use crate::error::ParseError;
use crate::models::event::EventTime;
use crate::service::tokens::{parse_date, parse_time};

/// Resolves up to four raw tokens into a concrete start/end pair.
///
/// Presence/absence of the parsed tokens decides the path:
/// - no start date: the start time is required and anchors to today, or to
///   tomorrow when the clock time has already passed;
/// - start date without start time: an all-day range (end date defaults to
///   the start date), both boundaries at local midnight;
/// - otherwise a timed range; a missing end time means
///   start + `default_duration`.
///
/// An explicit end that lands at or before the start is returned unchanged;
/// the end date never rolls forward.
pub fn resolve_time_range(
    start_date: Option<&str>,
    end_date: Option<&str>,
    start_time: Option<&str>,
    end_time: Option<&str>,
    now: DateTime<Tz>,
    default_duration: Duration,
) -> Result<(EventTime, EventTime), ParseError> {
    let today = now.date_naive();
    let start_date = parse_date(start_date, today)?;
    let end_date = parse_date(end_date, today)?;
    let start_time = parse_time(start_time)?;
    let end_time = parse_time(end_time)?;
    let tz = now.timezone();

    let (date, time) = match (start_date, start_time) {
        (None, None) => {
            return Err(ParseError::Value(
                "a start date or a start time is required".to_string(),
            ));
        }
        (None, Some(time)) => {
            // Bare time: today, or tomorrow once the clock time has passed.
            // Compared at minute granularity, so seconds never trigger a roll.
            let date = if (time.hour(), time.minute()) < (now.hour(), now.minute()) {
                today.succ_opt().ok_or_else(|| {
                    ParseError::Value("date out of supported range".to_string())
                })?
            } else {
                today
            };
            (date, time)
        }
        (Some(date), None) => {
            if end_time.is_some() {
                return Err(ParseError::Value(
                    "an end time is set but the start time is missing".to_string(),
                ));
            }
            let end = end_date.unwrap_or(date);
            return Ok((
                EventTime::all_day(local_midnight(tz, date)?),
                EventTime::all_day(local_midnight(tz, end)?),
            ));
        }
        (Some(date), Some(time)) => (date, time),
    };

    let start = localize(tz, date.and_time(time))?;
    let end = match end_time {
        None => start + default_duration,
        Some(time) => localize(tz, end_date.unwrap_or(date).and_time(time))?,
    };
    Ok((EventTime::timed(start), EventTime::timed(end)))
}

pub(crate) fn local_midnight(tz: Tz, date: NaiveDate) -> Result<DateTime<Tz>, ParseError> {
    localize(tz, date.and_time(NaiveTime::MIN))
}

// Nonexistent local times (DST gaps) are an error; ambiguous ones take the
// earlier offset.
fn localize(tz: Tz, naive: NaiveDateTime) -> Result<DateTime<Tz>, ParseError> {
    tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
        ParseError::Value(format!("{} does not exist in timezone {}", naive, tz))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Tokyo;

    fn default_duration() -> Duration {
        Duration::minutes(15)
    }

    fn nine_oclock() -> DateTime<Tz> {
        Tokyo.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap()
    }

    fn resolve(
        start_date: Option<&str>,
        end_date: Option<&str>,
        start_time: Option<&str>,
        end_time: Option<&str>,
    ) -> Result<(EventTime, EventTime), ParseError> {
        resolve_time_range(
            start_date,
            end_date,
            start_time,
            end_time,
            nine_oclock(),
            default_duration(),
        )
    }

    #[test]
    fn bare_past_time_rolls_to_tomorrow() {
        let (start, end) = resolve(None, None, Some("0800"), None).unwrap();
        assert_eq!(
            start.instant,
            Tokyo.with_ymd_and_hms(2024, 6, 16, 8, 0, 0).unwrap()
        );
        assert_eq!(end.instant, start.instant + default_duration());
        assert!(!start.is_all_day);
        assert!(!end.is_all_day);
    }

    #[test]
    fn bare_future_time_stays_today() {
        let (start, _) = resolve(None, None, Some("1000"), None).unwrap();
        assert_eq!(
            start.instant,
            Tokyo.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn bare_time_equal_to_now_stays_today() {
        // seconds in `now` are ignored by the minute-granularity comparison
        let now = Tokyo.with_ymd_and_hms(2024, 6, 15, 9, 0, 30).unwrap();
        let (start, _) =
            resolve_time_range(None, None, Some("0900"), None, now, default_duration()).unwrap();
        assert_eq!(
            start.instant,
            Tokyo.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn date_only_is_an_all_day_range() {
        let (start, end) = resolve(Some("20240101"), None, None, None).unwrap();
        assert!(start.is_all_day);
        assert!(end.is_all_day);
        let midnight = Tokyo.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(start.instant, midnight);
        assert_eq!(end.instant, midnight);
    }

    #[test]
    fn all_day_range_honors_the_end_date() {
        let (start, end) = resolve(Some("20240101"), Some("20240103"), None, None).unwrap();
        assert_eq!(
            start.instant,
            Tokyo.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            end.instant,
            Tokyo.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn missing_end_time_applies_the_default_duration() {
        let (start, end) = resolve(Some("20240101"), None, Some("0930"), None).unwrap();
        assert_eq!(
            start.instant,
            Tokyo.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap()
        );
        assert_eq!(end.instant - start.instant, Duration::minutes(15));
    }

    #[test]
    fn caller_supplied_duration_overrides_the_default() {
        let (start, end) = resolve_time_range(
            Some("20240101"),
            None,
            Some("0930"),
            None,
            nine_oclock(),
            Duration::hours(2),
        )
        .unwrap();
        assert_eq!(end.instant - start.instant, Duration::hours(2));
    }

    #[test]
    fn end_time_defaults_to_the_start_date() {
        let (start, end) = resolve(Some("20240101"), None, Some("0900"), Some("1100")).unwrap();
        assert_eq!(
            start.instant,
            Tokyo.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
        );
        assert_eq!(
            end.instant,
            Tokyo.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap()
        );
    }

    #[test]
    fn end_date_and_time_are_combined() {
        let (_, end) =
            resolve(Some("20240101"), Some("20240102"), Some("2300"), Some("0100")).unwrap();
        assert_eq!(
            end.instant,
            Tokyo.with_ymd_and_hms(2024, 1, 2, 1, 0, 0).unwrap()
        );
    }

    #[test]
    fn end_before_start_is_not_rolled_forward() {
        // pins the behavior: an end time earlier than the start stays on the
        // same day, producing an inverted range
        let (start, end) = resolve(Some("20240101"), None, Some("2300"), Some("0100")).unwrap();
        assert_eq!(
            start.instant,
            Tokyo.with_ymd_and_hms(2024, 1, 1, 23, 0, 0).unwrap()
        );
        assert_eq!(
            end.instant,
            Tokyo.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap()
        );
        assert!(end.instant < start.instant);
    }

    #[test]
    fn end_time_without_start_time_is_rejected() {
        let err = resolve(Some("20240101"), None, None, Some("1100")).unwrap_err();
        assert!(matches!(err, ParseError::Value(_)));
    }

    #[test]
    fn no_start_at_all_is_rejected() {
        let err = resolve(None, None, None, None).unwrap_err();
        assert!(matches!(err, ParseError::Value(_)));
        let err = resolve(None, Some("20240101"), None, Some("1100")).unwrap_err();
        assert!(matches!(err, ParseError::Value(_)));
    }

    #[test]
    fn token_parse_failures_propagate() {
        let err = resolve(Some("someday"), None, Some("0900"), None).unwrap_err();
        assert_eq!(
            err,
            ParseError::Format {
                raw: "someday".to_string()
            }
        );
    }
}
