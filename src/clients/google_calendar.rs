use serde::{Deserialize, Serialize};

pub type ClientError = Box<dyn std::error::Error + Send + Sync>;

const CALENDAR_URL: &str = "https://www.googleapis.com/calendar/v3/calendars";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
const SCOPE_READ_WRITE: &str = "https://www.googleapis.com/auth/calendar";
const SCOPE_READ_ONLY: &str = "https://www.googleapis.com/auth/calendar.readonly";
// Out-of-band flow: the user pastes the code back into the terminal.
const REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Contents of the credential file written by `setup`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Credential {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

/// One boundary in the wire format: all-day events carry `date`, timed
/// events carry `dateTime` plus the zone name.
#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiEventTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<ApiEventTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<ApiEventTime>,
}

#[derive(Debug, Deserialize)]
struct EventListResponse {
    #[serde(default)]
    items: Vec<ApiEvent>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

pub async fn list_events(
    credential: &Credential,
    calendar_id: &str,
    time_min: &str,
    time_max: &str,
) -> Result<Vec<ApiEvent>, ClientError> {
    let token = access_token(credential).await?;
    let url = format!("{}/{}/events", CALENDAR_URL, calendar_id);
    let response = reqwest::Client::new()
        .get(&url)
        .bearer_auth(&token)
        .query(&[
            ("timeMin", time_min),
            ("timeMax", time_max),
            ("singleEvents", "true"),
            ("orderBy", "startTime"),
        ])
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(format!("listing events failed: {}", response.status()).into());
    }
    let body: EventListResponse = response.json().await?;
    Ok(body.items)
}

pub async fn insert_event(
    credential: &Credential,
    calendar_id: &str,
    event: &ApiEvent,
) -> Result<ApiEvent, ClientError> {
    let token = access_token(credential).await?;
    let url = format!("{}/{}/events", CALENDAR_URL, calendar_id);
    let response = reqwest::Client::new()
        .post(&url)
        .bearer_auth(&token)
        .json(event)
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(format!("creating the event failed: {}", response.status()).into());
    }
    Ok(response.json().await?)
}

pub async fn delete_event(
    credential: &Credential,
    calendar_id: &str,
    event_id: &str,
) -> Result<(), ClientError> {
    let token = access_token(credential).await?;
    let url = format!("{}/{}/events/{}", CALENDAR_URL, calendar_id, event_id);
    let response = reqwest::Client::new()
        .delete(&url)
        .bearer_auth(&token)
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(format!("deleting the event failed: {}", response.status()).into());
    }
    Ok(())
}

/// URL the user opens to grant access.
pub fn auth_url(client_id: &str, read_only: bool) -> String {
    let scope = if read_only {
        SCOPE_READ_ONLY
    } else {
        SCOPE_READ_WRITE
    };
    format!(
        "{}?response_type=code&access_type=offline&client_id={}&redirect_uri={}&scope={}",
        AUTH_URL, client_id, REDIRECT_URI, scope
    )
}

/// Trades the pasted authorization code for a long-lived credential.
pub async fn exchange_code(
    client_id: &str,
    client_secret: &str,
    code: &str,
) -> Result<Credential, ClientError> {
    let params = [
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("code", code),
        ("redirect_uri", REDIRECT_URI),
        ("grant_type", "authorization_code"),
    ];
    let response = reqwest::Client::new()
        .post(TOKEN_URL)
        .form(&params)
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(format!("authorization failed: {}", response.status()).into());
    }
    let token: TokenResponse = response.json().await?;
    let refresh_token = token
        .refresh_token
        .ok_or("the authorization response carried no refresh token")?;
    Ok(Credential {
        client_id: client_id.to_string(),
        client_secret: client_secret.to_string(),
        refresh_token,
    })
}

async fn access_token(credential: &Credential) -> Result<String, ClientError> {
    let params = [
        ("client_id", credential.client_id.as_str()),
        ("client_secret", credential.client_secret.as_str()),
        ("refresh_token", credential.refresh_token.as_str()),
        ("grant_type", "refresh_token"),
    ];
    let response = reqwest::Client::new()
        .post(TOKEN_URL)
        .form(&params)
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(format!("token refresh failed: {}", response.status()).into());
    }
    let token: TokenResponse = response.json().await?;
    Ok(token.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_url_selects_the_scope() {
        let url = auth_url("client-1", false);
        assert!(url.contains("client_id=client-1"));
        assert!(url.ends_with(SCOPE_READ_WRITE));
        assert!(auth_url("client-1", true).ends_with(SCOPE_READ_ONLY));
    }

    #[test]
    fn timed_boundary_serializes_to_camel_case() {
        let boundary = ApiEventTime {
            date: None,
            date_time: Some("2024-01-01T09:00:00+09:00".to_string()),
            time_zone: Some("Asia/Tokyo".to_string()),
        };
        let json = serde_json::to_value(&boundary).unwrap();
        assert_eq!(json["dateTime"], "2024-01-01T09:00:00+09:00");
        assert_eq!(json["timeZone"], "Asia/Tokyo");
        assert!(json.get("date").is_none());
    }

    #[test]
    fn list_response_tolerates_missing_items() {
        let body: EventListResponse = serde_json::from_str("{}").unwrap();
        assert!(body.items.is_empty());
    }
}
