use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, DurationRound, NaiveTime, SecondsFormat, TimeDelta, Utc};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::error::{ChronosError, Result};
use crate::models::{ClockifyConfig, ReportEntry, TimeEntry};
use crate::services::tracker::TimeTracker;

const API_KEY_HEADER: &str = "X-Api-Key";
const PAGE_SIZE: &str = "1000";

/// Entries are aligned to this boundary on the server.
const ROUNDING_MINUTES: i64 = 30;

pub struct ClockifyClient {
    client: Client,
    config: ClockifyConfig,
}

impl ClockifyClient {
    pub fn new(config: ClockifyConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Raw account/workspace metadata, pretty-printed.
    pub async fn workspace_info(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.config.user_url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await?;
        let body = check_status(response).await?.text().await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

#[async_trait]
impl TimeTracker for ClockifyClient {
    async fn fetch_entries(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ReportEntry>> {
        let url = self.url(&format!("user/{}/time-entries", self.config.user_id));
        tracing::debug!(%url, %from, %to, "fetch_entries");
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .query(&[
                ("start", rfc3339(from)),
                ("end", rfc3339(to)),
                ("page-size", PAGE_SIZE.to_string()),
            ])
            .send()
            .await?;
        let entries: Vec<ReportEntryDto> = check_status(response).await?.json().await?;
        Ok(entries.into_iter().map(ReportEntry::from).collect())
    }

    async fn create_entry(&self, entry: &TimeEntry) -> Result<String> {
        tracing::debug!(task = %entry.description, at = %entry.at, "create_entry");
        let response = self
            .client
            .post(self.url("time-entries"))
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&EntryBody::new(entry))
            .send()
            .await?;
        let created: CreatedEntry = check_status(response).await?.json().await?;
        Ok(created.id)
    }

    async fn update_entry(&self, id: &str, entry: &TimeEntry) -> Result<()> {
        tracing::debug!(id, task = %entry.description, "update_entry");
        let response = self
            .client
            .put(self.url(&format!("time-entries/{id}")))
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&EntryBody::new(entry))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn delete_entry(&self, id: &str) -> Result<()> {
        tracing::debug!(id, "delete_entry");
        let response = self
            .client
            .delete(self.url(&format!("time-entries/{id}")))
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), %body, "clockify request rejected");
    Err(ChronosError::Api {
        status: status.as_u16(),
        body,
    })
}

fn rfc3339(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Start/end of the entry written for `at`.
///
/// The end is `at` truncated to a half-hour boundary. A window that would
/// start on the previous day is anchored at midnight of `at`'s day instead,
/// so the entry still groups under the day it was logged for.
pub fn entry_window(at: DateTime<Utc>, duration: Duration) -> (DateTime<Utc>, DateTime<Utc>) {
    let end = at
        .duration_trunc(TimeDelta::minutes(ROUNDING_MINUTES))
        .unwrap_or(at);
    let span = TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX);
    match end.checked_sub_signed(span) {
        Some(start) if start.date_naive() == at.date_naive() => (start, end),
        _ => {
            let day_start = at.date_naive().and_time(NaiveTime::MIN).and_utc();
            let day_end = day_start
                .checked_add_signed(span)
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            (day_start, day_end)
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EntryBody<'a> {
    billable: bool,
    start: String,
    end: String,
    project_id: &'a str,
    description: &'a str,
}

impl<'a> EntryBody<'a> {
    fn new(entry: &'a TimeEntry) -> Self {
        let (start, end) = entry_window(entry.at, entry.duration);
        Self {
            billable: true,
            start: rfc3339(start),
            end: rfc3339(end),
            project_id: &entry.project_id,
            description: &entry.description,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatedEntry {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportEntryDto {
    id: String,
    description: Option<String>,
    time_interval: TimeIntervalDto,
}

#[derive(Debug, Deserialize)]
struct TimeIntervalDto {
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
}

impl From<ReportEntryDto> for ReportEntry {
    fn from(dto: ReportEntryDto) -> Self {
        Self {
            id: dto.id,
            description: dto.description.unwrap_or_default(),
            start: dto.time_interval.start,
            end: dto.time_interval.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 5, h, m, 12).unwrap()
    }

    #[test]
    fn window_ends_on_half_hour() {
        let (start, end) = entry_window(at(14, 47), Duration::from_secs(90 * 60));
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 10, 5, 14, 30, 0).unwrap());
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 10, 5, 13, 0, 0).unwrap());
    }

    #[test]
    fn window_never_starts_on_previous_day() {
        let (start, end) = entry_window(at(0, 40), Duration::from_secs(2 * 3600));
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 10, 5, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 10, 5, 2, 0, 0).unwrap());
    }

    #[test]
    fn oversized_duration_does_not_overflow() {
        let huge = Duration::from_secs(999_999_999_999 * 3600);
        let (start, end) = entry_window(at(10, 0), huge);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 10, 5, 0, 0, 0).unwrap());
        assert!(end > start);

        let (start, _) = entry_window(at(10, 0), Duration::MAX);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 10, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn body_uses_camel_case_and_utc() {
        let entry = TimeEntry::new("Build", at(10, 5), Duration::from_secs(45 * 60), "proj1");
        let json = serde_json::to_value(EntryBody::new(&entry)).unwrap();
        assert_eq!(json["billable"], true);
        assert_eq!(json["projectId"], "proj1");
        assert_eq!(json["description"], "Build");
        assert_eq!(json["start"], "2026-10-05T09:15:00Z");
        assert_eq!(json["end"], "2026-10-05T10:00:00Z");
    }

    #[test]
    fn parses_report_entries() {
        let json = r#"[
            {"id": "e1", "description": "Build",
             "timeInterval": {"start": "2026-10-05T08:00:00Z", "end": "2026-10-05T09:30:00Z", "duration": "PT1H30M"},
             "isLocked": false},
            {"id": "e2", "description": null,
             "timeInterval": {"start": "2026-10-06T08:00:00Z", "end": null}}
        ]"#;
        let dtos: Vec<ReportEntryDto> = serde_json::from_str(json).unwrap();
        let entries: Vec<ReportEntry> = dtos.into_iter().map(ReportEntry::from).collect();
        assert_eq!(entries[0].id, "e1");
        assert_eq!(entries[0].day(), 5);
        assert_eq!(entries[0].duration(), Some(Duration::from_secs(90 * 60)));
        assert_eq!(entries[1].description, "");
        assert_eq!(entries[1].duration(), None);
    }

    #[test]
    fn url_joins_without_double_slash() {
        let client = ClockifyClient::new(
            ClockifyConfig {
                api_key: "k".into(),
                base_url: "https://api.clockify.me/api/v1/workspaces/ws1/".into(),
                user_url: "https://api.clockify.me/api/v1/user".into(),
                user_id: "u1".into(),
            },
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.url("time-entries"),
            "https://api.clockify.me/api/v1/workspaces/ws1/time-entries"
        );
    }
}
