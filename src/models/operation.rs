use chrono::{DateTime, Duration};
use chrono_tz::Tz;

use crate::models::event::Event;

/// The single value handed to the execution layer. Exactly one is built per
/// invocation; invalid input becomes `Help` with the failure message rather
/// than an error that could escape.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Summary {
        calendar_id: String,
        start: DateTime<Tz>,
        duration: Duration,
        format: String,
        separator: String,
    },
    Create {
        calendar_id: String,
        event: Event,
    },
    Delete {
        calendar_id: String,
        event_id: String,
    },
    Setup {
        calendar_id: String,
        read_only: bool,
        no_browser: bool,
    },
    Help {
        error: Option<String>,
    },
}
