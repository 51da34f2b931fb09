use chrono::NaiveDate;

use crate::cli;
use crate::clients::google_calendar::ClientError;
use crate::i18n;
use crate::models::event::Event;
use crate::models::operation::Operation;
use crate::service::calendar_service::CalendarClient;
use crate::service::intent::Setting;

/// Executes the one operation built for this invocation and returns the
/// process exit code.
pub async fn run<C: CalendarClient + ?Sized>(setting: &Setting, client: &C) -> i32 {
    match &setting.operation {
        Operation::Summary {
            calendar_id,
            start,
            duration,
            format,
            separator,
        } => match client.list_events(calendar_id, *start, *start + *duration).await {
            Ok(events) => {
                print_summary(&events, format, separator);
                0
            }
            Err(err) => report_error(err, setting.debug),
        },
        Operation::Create { calendar_id, event } => {
            match client.create_event(calendar_id, event).await {
                Ok(()) => {
                    println!(
                        "{}",
                        i18n::messages()
                            .event_created
                            .replace("{summary}", &event.summary)
                    );
                    0
                }
                Err(err) => report_error(err, setting.debug),
            }
        }
        Operation::Delete {
            calendar_id,
            event_id,
        } => match client.delete_event(calendar_id, event_id).await {
            Ok(()) => {
                println!(
                    "{}",
                    i18n::messages().event_deleted.replace("{event}", event_id)
                );
                0
            }
            Err(err) => report_error(err, setting.debug),
        },
        Operation::Setup {
            calendar_id,
            read_only,
            no_browser,
        } => match client.setup(calendar_id, *read_only, *no_browser).await {
            Ok(()) => 0,
            Err(err) => report_error(err, setting.debug),
        },
        Operation::Help { error } => match error {
            Some(message) => {
                eprintln!("{}", message);
                eprintln!();
                eprintln!("{}", cli::usage());
                1
            }
            None => {
                println!("{}", cli::usage());
                0
            }
        },
    }
}

fn print_summary(events: &[Event], format: &str, separator: &str) {
    let mut last_day: Option<NaiveDate> = None;
    for event in events {
        let day = event.start.instant.date_naive();
        if !separator.is_empty() && last_day.is_some_and(|previous| previous != day) {
            println!("{}", separator);
        }
        last_day = Some(day);
        println!("{}", event.render(format));
    }
}

fn report_error(err: ClientError, debug: bool) -> i32 {
    eprintln!("{}", err);
    if debug {
        eprintln!("{:?}", err);
    }
    1
}
