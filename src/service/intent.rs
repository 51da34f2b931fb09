use chrono::{DateTime, Duration};
use chrono_tz::Tz;

use crate::cli::Cli;
use crate::error::ParseError;
use crate::models::event::{DEFAULT_FORMAT, DEFAULT_FORMAT_DAYS, Event};
use crate::models::operation::Operation;
use crate::service::range::{local_midnight, resolve_time_range};
use crate::service::tokens::parse_date;

pub const DEFAULT_CALENDAR: &str = "primary";
pub const DEFAULT_CREATE_MINUTES: i64 = 15;

/// Everything the execution layer needs for one invocation.
#[derive(Debug, Clone)]
pub struct Setting {
    pub operation: Operation,
    pub now: DateTime<Tz>,
    pub debug: bool,
}

/// Builds the operation for this invocation. Never fails outward: any
/// `ParseError` raised on the way becomes `Help` carrying the message, so
/// the caller always holds a well-formed operation.
pub fn build(cli: &Cli, now: DateTime<Tz>) -> Setting {
    let operation = match build_operation(cli, now) {
        Ok(operation) => operation,
        Err(err) => Operation::Help {
            error: Some(err.to_string()),
        },
    };
    Setting {
        operation,
        now,
        debug: cli.debug,
    }
}

// Closed dispatch over the first trailing word plus the argument count.
// Wrong arity falls through to the plain usage request.
enum SubCommand<'a> {
    Summary,
    Setup { calendar_ref: &'a str },
    Create { title_words: &'a [String] },
    Delete { event_id: &'a str },
    Other,
}

fn classify(args: &[String]) -> SubCommand<'_> {
    match args.split_first() {
        None => SubCommand::Summary,
        Some((word, rest)) => match (word.as_str(), rest) {
            ("setup", [calendar_ref]) => SubCommand::Setup { calendar_ref },
            ("create", title_words) if !title_words.is_empty() => {
                SubCommand::Create { title_words }
            }
            ("delete", [event_id, ..]) => SubCommand::Delete { event_id },
            _ => SubCommand::Other,
        },
    }
}

fn build_operation(cli: &Cli, now: DateTime<Tz>) -> Result<Operation, ParseError> {
    match classify(&cli.args) {
        SubCommand::Summary => build_summary(cli, now),
        SubCommand::Setup { calendar_ref } => Ok(Operation::Setup {
            calendar_id: calendar_ref.to_string(),
            read_only: cli.read_only,
            no_browser: cli.no_browser,
        }),
        SubCommand::Create { title_words } => {
            let (start, end) = resolve_time_range(
                cli.start_date.as_deref(),
                cli.end_date.as_deref(),
                cli.start_time.as_deref(),
                cli.end_time.as_deref(),
                now,
                Duration::minutes(DEFAULT_CREATE_MINUTES),
            )?;
            Ok(Operation::Create {
                calendar_id: calendar_id(cli),
                event: Event {
                    start,
                    end,
                    summary: title_words.join(" "),
                    location: cli.location.clone(),
                },
            })
        }
        SubCommand::Delete { event_id } => Ok(Operation::Delete {
            calendar_id: calendar_id(cli),
            event_id: event_id.to_string(),
        }),
        SubCommand::Other => Ok(Operation::Help { error: None }),
    }
}

/// The viewing window for the summary view, derived from `--days` and the
/// compound "DATE TIME" start string. The window always starts at local
/// midnight; the time half of the compound string is accepted and ignored.
fn build_summary(cli: &Cli, now: DateTime<Tz>) -> Result<Operation, ParseError> {
    let (date_half, _time_half) = split_compound(cli.start_date.as_deref());
    let date = parse_date(date_half, now.date_naive())?.unwrap_or_else(|| now.date_naive());
    let mut start = local_midnight(now.timezone(), date)?;

    let duration = if cli.days == 0 {
        // exactly the named day
        Duration::days(1)
    } else if cli.days < 0 {
        // window ends on the named day
        start = start - Duration::days(-cli.days);
        Duration::days(-cli.days + 1)
    } else {
        // window starts on the named day
        Duration::days(cli.days + 1)
    };

    let format = cli.format.clone().unwrap_or_else(|| {
        if cli.days == 0 {
            DEFAULT_FORMAT.to_string()
        } else {
            DEFAULT_FORMAT_DAYS.to_string()
        }
    });

    Ok(Operation::Summary {
        calendar_id: calendar_id(cli),
        start,
        duration,
        format,
        separator: cli.separator.clone().unwrap_or_default(),
    })
}

fn calendar_id(cli: &Cli) -> String {
    cli.calendar
        .clone()
        .unwrap_or_else(|| DEFAULT_CALENDAR.to_string())
}

// "DATE TIME" with either half possibly empty.
fn split_compound(raw: Option<&str>) -> (Option<&str>, Option<&str>) {
    match raw {
        None => (None, None),
        Some(s) => match s.split_once(' ') {
            Some((date, time)) => (non_empty(date), non_empty(time)),
            None => (non_empty(s), None),
        },
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}
