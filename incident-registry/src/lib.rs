use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_HISTORY: &str = include_str!("../data/incidents.json");

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("incident {id}: {field} is required")]
    MissingField { id: String, field: &'static str },
    #[error("duplicate incident id '{0}'")]
    DuplicateId(String),
    #[error("invalid incident history json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read incident history {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Full analysis report attached to a past incident.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IncidentReport {
    pub summary: String,
    pub details: String,
    pub severity: String,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
    pub tags: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub id: String,
    pub thumbnail: String,
    pub user_id: String,
    pub date: DateTime<Utc>,
    pub incident_type: String,
    pub severity: String,
    pub summary: String,
    pub details: IncidentReport,
}

pub fn validate_record(record: &IncidentRecord) -> Result<(), RegistryError> {
    let required = [
        ("id", &record.id),
        ("user_id", &record.user_id),
        ("incident_type", &record.incident_type),
        ("summary", &record.summary),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(RegistryError::MissingField {
                id: record.id.clone(),
                field,
            });
        }
    }
    Ok(())
}

pub fn validate_history(records: &[IncidentRecord]) -> Result<(), RegistryError> {
    let mut seen = HashSet::new();
    for record in records {
        validate_record(record)?;
        if !seen.insert(record.id.as_str()) {
            return Err(RegistryError::DuplicateId(record.id.clone()));
        }
    }
    Ok(())
}

pub fn parse_history(raw: &str) -> Result<Vec<IncidentRecord>, RegistryError> {
    let records: Vec<IncidentRecord> = serde_json::from_str(raw)?;
    validate_history(&records)?;
    Ok(records)
}

/// The mock incident history compiled into the binary.
pub fn builtin_history() -> Result<Vec<IncidentRecord>, RegistryError> {
    parse_history(BUILTIN_HISTORY)
}

pub fn load_history(path: &Path) -> Result<Vec<IncidentRecord>, RegistryError> {
    let raw = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_history(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_history_is_valid() {
        let records = builtin_history().expect("builtin history");
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].id, "INC-001");
        assert_eq!(records[3].severity, "Critical");
        assert_eq!(records[3].details.recommendations.len(), 6);
    }

    #[test]
    fn rejects_blank_user() {
        let mut record = builtin_history().expect("builtin history").remove(0);
        record.user_id = "  ".into();
        let err = validate_record(&record).expect_err("blank user");
        assert!(matches!(
            err,
            RegistryError::MissingField { field: "user_id", .. }
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut records = builtin_history().expect("builtin history");
        records[1].id = records[0].id.clone();
        let err = validate_history(&records).expect_err("duplicate");
        assert!(matches!(err, RegistryError::DuplicateId(id) if id == "INC-001"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            parse_history("[{\"id\": 1}]"),
            Err(RegistryError::Json(_))
        ));
    }

    #[test]
    fn load_history_reports_missing_file() {
        let err = load_history(Path::new("/nonexistent/incidents.json")).expect_err("missing");
        assert!(err.to_string().contains("/nonexistent/incidents.json"));
    }
}
