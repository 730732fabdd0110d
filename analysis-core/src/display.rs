use crate::model::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Destructive,
    Default,
    Secondary,
    Outline,
}

impl BadgeVariant {
    pub fn css_class(self) -> &'static str {
        match self {
            BadgeVariant::Destructive => "destructive",
            BadgeVariant::Default => "default",
            BadgeVariant::Secondary => "secondary",
            BadgeVariant::Outline => "outline",
        }
    }
}

pub fn severity_badge(severity: &str) -> BadgeVariant {
    match severity {
        "Critical" => BadgeVariant::Destructive,
        "High" => BadgeVariant::Default,
        "Medium" | "Moderate" => BadgeVariant::Secondary,
        _ => BadgeVariant::Outline,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagIcon {
    Alert,
    Car,
    Users,
    Shield,
    Moon,
}

/// Later rules win when a tag matches more than one.
pub fn tag_icon(tag: &str) -> TagIcon {
    let mut icon = TagIcon::Alert;
    if tag.contains("Road") || tag.contains("Vehicle") {
        icon = TagIcon::Car;
    }
    if tag.contains("Crowd") {
        icon = TagIcon::Users;
    }
    if tag.contains("Police") {
        icon = TagIcon::Shield;
    }
    if tag.contains("Night") {
        icon = TagIcon::Moon;
    }
    icon
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// An [`AnalysisResult`] plus what the result card needs to render it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisView {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub tag_icons: Vec<TagIcon>,
    pub time_display: String,
}

impl From<AnalysisResult> for AnalysisView {
    fn from(result: AnalysisResult) -> Self {
        Self {
            tag_icons: result.tags.iter().map(|t| tag_icon(t)).collect(),
            time_display: format_timestamp(&result.timestamp),
            result,
        }
    }
}
