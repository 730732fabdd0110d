use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SUMMARY: &str = "No summary available.";
pub const UNKNOWN_SEVERITY: &str = "Unknown";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisasterCategory {
    Earthquake,
    Fog,
    HeavyRain,
    OnFire,
}

impl DisasterCategory {
    /// Fixed order used for prediction flags and tags.
    pub const ALL: [DisasterCategory; 4] = [
        DisasterCategory::Earthquake,
        DisasterCategory::Fog,
        DisasterCategory::HeavyRain,
        DisasterCategory::OnFire,
    ];

    pub fn as_key(self) -> &'static str {
        match self {
            DisasterCategory::Earthquake => "earthquake",
            DisasterCategory::Fog => "fog",
            DisasterCategory::HeavyRain => "heavy_rain",
            DisasterCategory::OnFire => "on_fire",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_key().eq_ignore_ascii_case(key.trim()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub details: String,
    pub severity: String,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
    pub tags: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_category: Option<DisasterCategory>,
}

/// The canned road-accident analysis shown when no model is configured.
pub fn mock_result(now: DateTime<Utc>) -> AnalysisResult {
    AnalysisResult {
        summary: "This image appears to show a road traffic accident involving two vehicles. \
                  The collision seems to have occurred at an intersection during nighttime. \
                  There is moderate damage to both vehicles, with the front of one car significantly impacted. \
                  Several people are gathered around the scene, possibly including emergency responders."
            .into(),
        details: "The accident appears to have resulted in moderate severity damage. \
                  There are visible signs of airbag deployment in at least one vehicle, suggesting a significant impact. \
                  The positioning of the vehicles indicates a possible T-bone collision at the intersection. \
                  There is potential hazard from leaked fluids on the road surface, which could pose slip risks \
                  or fire hazards if ignition sources are present."
            .into(),
        severity: "Moderate".into(),
        confidence: 92.0,
        timestamp: now,
        tags: [
            "Road Accident",
            "Nighttime",
            "Multiple Vehicles",
            "Crowd Present",
            "Police Present",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        recommendations: [
            "Ensure emergency services have been notified",
            "Establish a safe perimeter around the vehicles",
            "Check for fuel or fluid leakage",
            "Direct traffic away from the scene",
            "Gather witness statements if possible",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        primary_category: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_keys_round_trip_through_from_key() {
        for category in DisasterCategory::ALL {
            assert_eq!(DisasterCategory::from_key(category.as_key()), Some(category));
        }
        assert_eq!(DisasterCategory::from_key(" ON_FIRE "), Some(DisasterCategory::OnFire));
        assert_eq!(DisasterCategory::from_key("flood"), None);
    }

    #[test]
    fn category_serializes_as_key() {
        let json = serde_json::to_string(&DisasterCategory::HeavyRain).expect("serialize");
        assert_eq!(json, "\"heavy_rain\"");
    }

    #[test]
    fn mock_result_omits_primary_category() {
        let value = serde_json::to_value(mock_result(Utc::now())).expect("serialize");
        assert_eq!(value["severity"], "Moderate");
        assert!(value.get("primary_category").is_none());
    }
}
