use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ChronosError, Result};
use crate::models::{ActivityItem, LinearConfig};
use crate::services::tracker::ActivityFeed;

/// Issues I created, own, follow, or commented on, most recently updated first.
const RECENT_ISSUES_QUERY: &str = r#"
query myRecentIssueActivity($from: DateTimeOrDuration!, $to: DateTimeOrDuration!) {
  issues(
    first: 50,
    sort: { updatedAt: { order: Descending } },
    filter: {
      and: [
        { updatedAt: { gte: $from, lte: $to } },
        {
          or: [
            { creator: { isMe: { eq: true } } },
            { assignee: { isMe: { eq: true } } },
            { subscribers: { some: { isMe: { eq: true } } } },
            { comments: { some: { user: { isMe: { eq: true } } } } }
          ]
        }
      ]
    }
  ) {
    nodes { id title identifier updatedAt }
  }
}
"#;

pub struct LinearClient {
    client: Client,
    config: LinearConfig,
}

impl LinearClient {
    pub fn new(config: LinearConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ActivityFeed for LinearClient {
    async fn last_activity(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ActivityItem>> {
        let request = GraphQlRequest {
            query: RECENT_ISSUES_QUERY,
            variables: Variables {
                from: from.to_rfc3339_opts(SecondsFormat::Secs, true),
                to: to.to_rfc3339_opts(SecondsFormat::Secs, true),
            },
        };
        let response = self
            .client
            .post(&self.config.base_url)
            .header("Authorization", &self.config.api_key)
            .json(&request)
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
        parse_issues(&body)
    }
}

fn parse_issues(body: &str) -> Result<Vec<ActivityItem>> {
    let response: IssuesResponse = serde_json::from_str(body)?;
    Ok(response
        .data
        .issues
        .nodes
        .into_iter()
        .map(|issue| ActivityItem {
            timestamp: DateTime::parse_from_rfc3339(&issue.updated_at)
                .ok()
                .map(|t| t.with_timezone(&Utc)),
            label: issue.identifier,
            title: issue.title,
        })
        .collect())
}

#[derive(Serialize)]
struct GraphQlRequest {
    query: &'static str,
    variables: Variables,
}

#[derive(Serialize)]
struct Variables {
    from: String,
    to: String,
}

#[derive(Deserialize)]
struct IssuesResponse {
    data: IssuesData,
}

#[derive(Deserialize)]
struct IssuesData {
    issues: IssueConnection,
}

#[derive(Deserialize)]
struct IssueConnection {
    nodes: Vec<Issue>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Issue {
    title: String,
    identifier: String,
    updated_at: String,
}
