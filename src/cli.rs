use clap::{CommandFactory, Parser};

/// Command-line surface. Flags form the structured option bag; the trailing
/// words select the sub-command (`create`, `delete`, `setup`) and its
/// arguments. No trailing words means the summary view.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "calendar-cli",
    about = "Read and update a remote calendar from the command line."
)]
pub struct Cli {
    /// Calendar to operate on.
    #[arg(long)]
    pub calendar: Option<String>,

    /// Path to the credential file.
    #[arg(long)]
    pub credential: Option<String>,

    /// Start date. The summary view also accepts "DATE TIME" in one value.
    #[arg(long)]
    pub start_date: Option<String>,

    /// End date.
    #[arg(long)]
    pub end_date: Option<String>,

    /// Start time.
    #[arg(long)]
    pub start_time: Option<String>,

    /// End time.
    #[arg(long)]
    pub end_time: Option<String>,

    /// Day window for the summary view: 0 shows one day, N shows N+1 days
    /// ahead, -N shows N+1 days back.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub days: i64,

    /// Line format for listed events.
    #[arg(long)]
    pub format: Option<String>,

    /// Separator printed between day groups in multi-day summaries.
    #[arg(long)]
    pub separator: Option<String>,

    /// Location attached to a created event.
    #[arg(long)]
    pub location: Option<String>,

    /// Request a read-only authorization scope during setup.
    #[arg(long)]
    pub read_only: bool,

    /// Never try to open a browser during setup.
    #[arg(long)]
    pub no_browser: bool,

    /// Print diagnostic detail on failures.
    #[arg(long)]
    pub debug: bool,

    /// Sub-command and its arguments.
    pub args: Vec<String>,
}

pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_and_trailing_words() {
        let cli = Cli::try_parse_from([
            "calendar-cli",
            "--calendar",
            "work",
            "--start-date",
            "20240101",
            "--start-time",
            "0900",
            "create",
            "Lunch",
            "with",
            "Bob",
        ])
        .unwrap();
        assert_eq!(cli.calendar.as_deref(), Some("work"));
        assert_eq!(cli.start_date.as_deref(), Some("20240101"));
        assert_eq!(cli.args, ["create", "Lunch", "with", "Bob"]);
    }

    #[test]
    fn parses_negative_days() {
        let cli = Cli::try_parse_from(["calendar-cli", "--days", "-2"]).unwrap();
        assert_eq!(cli.days, -2);
    }

    #[test]
    fn defaults_are_empty() {
        let cli = Cli::try_parse_from(["calendar-cli"]).unwrap();
        assert_eq!(cli.days, 0);
        assert!(cli.calendar.is_none());
        assert!(cli.args.is_empty());
        assert!(!cli.debug);
    }

    #[test]
    fn usage_lists_the_options() {
        let text = usage();
        assert!(text.contains("--start-date"));
        assert!(text.contains("--days"));
    }
}
