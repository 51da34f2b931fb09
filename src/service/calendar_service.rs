use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::clients::google_calendar::{self, ApiEvent, ApiEventTime, ClientError, Credential};
use crate::models::event::{Event, EventTime};
use crate::service::setup;

/// The remote calendar, behind a seam so the execution layer can be tested
/// against a fake.
#[async_trait]
pub trait CalendarClient: Send + Sync {
    async fn list_events(
        &self,
        calendar_id: &str,
        from: DateTime<Tz>,
        to: DateTime<Tz>,
    ) -> Result<Vec<Event>, ClientError>;

    async fn create_event(&self, calendar_id: &str, event: &Event) -> Result<(), ClientError>;

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<(), ClientError>;

    async fn setup(
        &self,
        calendar_id: &str,
        read_only: bool,
        no_browser: bool,
    ) -> Result<(), ClientError>;
}

pub struct GoogleCalendarService {
    credential_path: String,
    tz: Tz,
}

impl GoogleCalendarService {
    pub fn new(credential_path: String, tz: Tz) -> Self {
        Self {
            credential_path,
            tz,
        }
    }

    fn load_credential(&self) -> Result<Credential, ClientError> {
        let content = std::fs::read_to_string(&self.credential_path).map_err(|err| {
            format!(
                "cannot read the credential file {} ({}); run setup first",
                self.credential_path, err
            )
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl CalendarClient for GoogleCalendarService {
    async fn list_events(
        &self,
        calendar_id: &str,
        from: DateTime<Tz>,
        to: DateTime<Tz>,
    ) -> Result<Vec<Event>, ClientError> {
        let credential = self.load_credential()?;
        let items = google_calendar::list_events(
            &credential,
            calendar_id,
            &from.to_rfc3339(),
            &to.to_rfc3339(),
        )
        .await?;
        Ok(items
            .into_iter()
            .filter_map(|item| event_from_api(item, self.tz))
            .collect())
    }

    async fn create_event(&self, calendar_id: &str, event: &Event) -> Result<(), ClientError> {
        let credential = self.load_credential()?;
        google_calendar::insert_event(&credential, calendar_id, &event_to_api(event)).await?;
        Ok(())
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<(), ClientError> {
        let credential = self.load_credential()?;
        google_calendar::delete_event(&credential, calendar_id, event_id).await
    }

    async fn setup(
        &self,
        calendar_id: &str,
        read_only: bool,
        no_browser: bool,
    ) -> Result<(), ClientError> {
        setup::run_setup(&self.credential_path, calendar_id, read_only, no_browser).await
    }
}

pub fn event_to_api(event: &Event) -> ApiEvent {
    ApiEvent {
        id: None,
        summary: Some(event.summary.clone()),
        location: event.location.clone(),
        start: Some(boundary_to_api(&event.start)),
        end: Some(boundary_to_api(&event.end)),
    }
}

fn boundary_to_api(boundary: &EventTime) -> ApiEventTime {
    if boundary.is_all_day {
        ApiEventTime {
            date: Some(boundary.instant.format("%Y-%m-%d").to_string()),
            date_time: None,
            time_zone: None,
        }
    } else {
        ApiEventTime {
            date: None,
            date_time: Some(boundary.instant.to_rfc3339()),
            time_zone: Some(boundary.instant.timezone().name().to_string()),
        }
    }
}

// Events with an unreadable start or end are dropped from listings.
fn event_from_api(item: ApiEvent, tz: Tz) -> Option<Event> {
    let start = boundary_from_api(item.start.as_ref()?, tz)?;
    let end = boundary_from_api(item.end.as_ref()?, tz)?;
    Some(Event {
        start,
        end,
        summary: item.summary.unwrap_or_default(),
        location: item.location,
    })
}

fn boundary_from_api(boundary: &ApiEventTime, tz: Tz) -> Option<EventTime> {
    if let Some(date) = &boundary.date {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
        let instant = tz
            .from_local_datetime(&date.and_time(NaiveTime::MIN))
            .earliest()?;
        return Some(EventTime::all_day(instant));
    }
    let raw = boundary.date_time.as_deref()?;
    let instant = DateTime::parse_from_rfc3339(raw).ok()?;
    Some(EventTime::timed(instant.with_timezone(&tz)))
}
