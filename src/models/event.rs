use chrono::DateTime;
use chrono_tz::Tz;

// Default line formats for the summary view. The multi-day format adds the
// date so events from different days stay distinguishable.
pub const DEFAULT_FORMAT: &str = "{time} {summary}";
pub const DEFAULT_FORMAT_DAYS: &str = "{date} {time} {summary}";

/// One boundary of an event range.
///
/// For an all-day boundary the instant is local midnight of the day; the
/// time-of-day carries no meaning beyond that.
#[derive(Debug, Clone, PartialEq)]
pub struct EventTime {
    pub is_all_day: bool,
    pub instant: DateTime<Tz>,
}

impl EventTime {
    pub fn all_day(instant: DateTime<Tz>) -> Self {
        Self {
            is_all_day: true,
            instant,
        }
    }

    pub fn timed(instant: DateTime<Tz>) -> Self {
        Self {
            is_all_day: false,
            instant,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub start: EventTime,
    pub end: EventTime,
    pub summary: String,
    pub location: Option<String>,
}

impl Event {
    /// Renders one summary line from a format template. Recognized
    /// placeholders: `{date}`, `{time}`, `{summary}`, `{location}`.
    /// All-day events render an empty `{time}`.
    pub fn render(&self, format: &str) -> String {
        let time = if self.start.is_all_day {
            String::new()
        } else {
            format!(
                "{}-{}",
                self.start.instant.format("%H:%M"),
                self.end.instant.format("%H:%M")
            )
        };
        format
            .replace("{date}", &self.start.instant.format("%m/%d").to_string())
            .replace("{time}", &time)
            .replace("{summary}", &self.summary)
            .replace("{location}", self.location.as_deref().unwrap_or(""))
            .trim()
            .to_string()
    }
}
