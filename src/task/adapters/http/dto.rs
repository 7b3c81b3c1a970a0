//! Wire shapes for the task HTTP surface.

use crate::task::{domain::Page, services::TaskInput, services::TaskResponse};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Request body for creating or replacing a task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    /// Task title; validated by the domain.
    pub title: String,
    /// Optional ISO-8601 due date; `null` and absent both mean "none".
    #[serde(default, deserialize_with = "deserialize_due_date")]
    pub due_date: Option<DateTime<Utc>>,
}

impl From<TaskPayload> for TaskInput {
    fn from(payload: TaskPayload) -> Self {
        Self::new(payload.title).with_optional_due_date(payload.due_date)
    }
}

/// Accepts RFC 3339 timestamps, or offset-less local date-times read as UTC.
fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_due_date(&raw).map_err(serde::de::Error::custom))
        .transpose()
}

fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .map(|parsed| parsed.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc())
        })
        .map_err(|_| format!("dueDate '{raw}' is not an ISO-8601 date-time"))
}

/// Query parameters accepted by the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListParams {
    /// Zero-based page index.
    pub page: Option<u32>,
    /// Requested page size.
    pub size: Option<u32>,
    /// Sort expression, `key` or `key,direction`.
    pub sort: Option<String>,
}

/// Response body for the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    /// Tasks on this page.
    pub content: Vec<TaskResponse>,
    /// Number of tasks in the whole collection.
    pub total_elements: u64,
    /// Number of pages at the current size.
    pub total_pages: u64,
    /// Zero-based page index.
    pub page: u32,
    /// Effective page size.
    pub size: u32,
}

impl From<Page<TaskResponse>> for PageResponse {
    fn from(page: Page<TaskResponse>) -> Self {
        let total_elements = page.total();
        let total_pages = page.total_pages();
        let page_index = page.page();
        let size = page.size();
        Self {
            content: page.into_items(),
            total_elements,
            total_pages,
            page: page_index,
            size,
        }
    }
}
