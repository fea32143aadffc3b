use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::error::{ChronosError, Result};
use crate::models::{ActivityItem, GitlabConfig};
use crate::services::tracker::ActivityFeed;

pub struct GitlabClient {
    client: Client,
    config: GitlabConfig,
}

impl GitlabClient {
    pub fn new(config: GitlabConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }

    fn events_url(&self) -> String {
        format!(
            "{}/users/{}/events",
            self.config.base_url.trim_end_matches('/'),
            self.config.user_id
        )
    }
}

#[async_trait]
impl ActivityFeed for GitlabClient {
    async fn last_activity(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ActivityItem>> {
        // The events API filters on whole dates, exclusive on both ends.
        let after = (from - chrono::TimeDelta::days(1)).format("%Y-%m-%d").to_string();
        let before = (to + chrono::TimeDelta::days(1)).format("%Y-%m-%d").to_string();
        let response = self
            .client
            .get(self.events_url())
            .header("PRIVATE-TOKEN", &self.config.api_key)
            .query(&[("after", after), ("before", before)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ChronosError::Api {
                status: status.as_u16(),
                body,
            });
        }
        parse_events(&body)
    }
}

fn parse_events(body: &str) -> Result<Vec<ActivityItem>> {
    let events: Vec<Event> = serde_json::from_str(body)?;
    Ok(events
        .into_iter()
        .map(|event| {
            let title = event
                .target_title
                .or(event.push_data.map(|p| p.r#ref))
                .unwrap_or_else(|| "N/A".to_string());
            ActivityItem {
                timestamp: event
                    .created_at
                    .as_deref()
                    .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
                    .map(|t| t.with_timezone(&Utc)),
                label: event.action_name,
                title,
            }
        })
        .collect())
}

#[derive(Deserialize)]
struct Event {
    action_name: String,
    target_title: Option<String>,
    push_data: Option<PushData>,
    created_at: Option<String>,
}

#[derive(Deserialize)]
struct PushData {
    r#ref: String,
}
