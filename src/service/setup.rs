use inquire::Text;

use crate::clients::google_calendar::{self, ClientError};
use crate::i18n;

/// Interactive authorization: prints the consent URL, prompts for the
/// pasted code, and writes the credential file. The URL is only ever
/// printed; with `--no-browser` the message tells the user to open it on
/// another machine.
pub async fn run_setup(
    credential_path: &str,
    calendar_id: &str,
    read_only: bool,
    no_browser: bool,
) -> Result<(), ClientError> {
    let client_id = Text::new("OAuth client id:").prompt()?;
    let client_secret = Text::new("OAuth client secret:").prompt()?;

    let url = google_calendar::auth_url(client_id.trim(), read_only);
    if no_browser {
        println!("Open this URL on a machine with a browser to authorize access:");
    } else {
        println!("Open this URL in your browser to authorize access:");
    }
    println!("{}", url);

    let code = Text::new("Authorization code:").prompt()?;
    let credential =
        google_calendar::exchange_code(client_id.trim(), client_secret.trim(), code.trim()).await?;

    let body = serde_json::to_string_pretty(&credential)?;
    std::fs::write(credential_path, body)?;
    println!(
        "{}",
        i18n::messages()
            .setup_complete
            .replace("{calendar}", calendar_id)
    );
    Ok(())
}
