#![allow(non_snake_case)]

mod cli;
mod clients;
mod config;
mod error;
mod handlers;
mod i18n;
mod models;
mod service;

use std::env;
use std::process;
use std::str::FromStr;

use chrono::Utc;
use chrono_tz::Tz;
use clap::Parser;

use crate::config::AppConfig;
use crate::service::calendar_service::GoogleCalendarService;
use crate::service::intent;

const DEFAULT_TIMEZONE: Tz = Tz::UTC;
const DEFAULT_CREDENTIAL_FILE: &str = ".calendar-cli.json";

#[tokio::main]
async fn main() {
    let config = AppConfig::load();

    // Timezone and "now" are resolved once here and threaded through; no
    // component looks them up again.
    let timezone = config
        .get("CALENDAR_TZ")
        .or_else(|| config.get("TZ"))
        .and_then(|name| Tz::from_str(&name).ok())
        .unwrap_or(DEFAULT_TIMEZONE);
    let now = Utc::now().with_timezone(&timezone);

    let mut options = cli::Cli::parse();
    if options.calendar.is_none() {
        options.calendar = config.get("CALENDAR_ID");
    }
    if options.credential.is_none() {
        options.credential = config.get("CREDENTIAL_FILE");
    }

    let setting = intent::build(&options, now);

    let credential_path = options
        .credential
        .clone()
        .unwrap_or_else(default_credential_path);
    let client = GoogleCalendarService::new(credential_path, timezone);

    let code = handlers::runner::run(&setting, &client).await;
    process::exit(code);
}

fn default_credential_path() -> String {
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/{}", home, DEFAULT_CREDENTIAL_FILE)
}
