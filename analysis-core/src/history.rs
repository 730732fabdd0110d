//! Search, severity filter and pagination over the incident history.

use crate::display::{format_timestamp, severity_badge, BadgeVariant};
use chrono::{DateTime, Utc};
use incident_registry::IncidentRecord;
use serde::{Deserialize, Serialize};

pub const PAGE_SIZE: usize = 4;

/// Severity value the admin select uses for "All Severities".
pub const ALL_SEVERITIES: &str = "all";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IncidentQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default = "first_page")]
    pub page: usize,
}

fn first_page() -> usize {
    1
}

/// One row of the history table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IncidentSummary {
    pub id: String,
    pub thumbnail: String,
    pub user_id: String,
    pub date: DateTime<Utc>,
    pub incident_type: String,
    pub severity: String,
    pub badge: BadgeVariant,
    pub date_display: String,
    pub summary: String,
}

impl From<&IncidentRecord> for IncidentSummary {
    fn from(r: &IncidentRecord) -> Self {
        Self {
            id: r.id.clone(),
            thumbnail: r.thumbnail.clone(),
            user_id: r.user_id.clone(),
            date: r.date,
            incident_type: r.incident_type.clone(),
            severity: r.severity.clone(),
            badge: severity_badge(&r.severity),
            date_display: format_timestamp(&r.date),
            summary: r.summary.clone(),
        }
    }
}

/// Everything the detail modal shows for one incident.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IncidentDetail {
    #[serde(flatten)]
    pub record: IncidentRecord,
    pub badge: BadgeVariant,
    pub date_display: String,
    pub analysis_time_display: String,
}

impl From<&IncidentRecord> for IncidentDetail {
    fn from(r: &IncidentRecord) -> Self {
        Self {
            record: r.clone(),
            badge: severity_badge(&r.severity),
            date_display: format_timestamp(&r.date),
            analysis_time_display: format_timestamp(&r.details.timestamp),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

fn severity_filter(severity: Option<&str>) -> Option<&str> {
    severity
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != ALL_SEVERITIES)
}

pub fn filter_incidents<'a>(
    records: &'a [IncidentRecord],
    search: &str,
    severity: Option<&str>,
) -> Vec<&'a IncidentRecord> {
    let needle = search.to_lowercase();
    let severity = severity_filter(severity);

    records
        .iter()
        .filter(|r| {
            let matches_search = [&r.id, &r.user_id, &r.incident_type, &r.summary]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            let matches_severity = severity.map_or(true, |s| r.severity == s);
            matches_search && matches_severity
        })
        .collect()
}

pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total);

    Page {
        items: items.get(start..end).unwrap_or_default().to_vec(),
        page,
        page_size,
        total,
        total_pages,
    }
}

pub fn query_history(records: &[IncidentRecord], query: &IncidentQuery) -> Page<IncidentSummary> {
    let rows: Vec<IncidentSummary> = filter_incidents(records, &query.search, query.severity.as_deref())
        .into_iter()
        .map(IncidentSummary::from)
        .collect();
    paginate(&rows, query.page, PAGE_SIZE)
}

pub fn find_incident<'a>(records: &'a [IncidentRecord], id: &str) -> Option<&'a IncidentRecord> {
    records.iter().find(|r| r.id == id)
}
