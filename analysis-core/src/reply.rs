use crate::model::{AnalysisResult, DisasterCategory, DEFAULT_SUMMARY, UNKNOWN_SEVERITY};
use crate::recommendations::recommendations_for_category;
use crate::AnalysisError;
use chrono::{DateTime, Utc};
use serde_json::Value;

const FENCE: &str = "```";

/// Contents of the first fenced code block, or the trimmed text when there is none.
pub fn extract_json_block(raw: &str) -> &str {
    let Some(start) = raw.find(FENCE) else {
        return raw.trim();
    };
    let after_fence = &raw[start + FENCE.len()..];
    let body = match after_fence.split_once('\n') {
        Some((info, rest)) if is_info_string(info) => rest,
        _ => after_fence,
    };
    match body.find(FENCE) {
        Some(end) => body[..end].trim(),
        None => raw.trim(),
    }
}

/// A language tag such as `json` on the opening fence line.
fn is_info_string(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
}

pub fn parse_model_reply(raw: &str, now: DateTime<Utc>) -> Result<AnalysisResult, AnalysisError> {
    let text = extract_json_block(raw);
    let v: Value = serde_json::from_str(text)
        .map_err(|e| AnalysisError::Parse(format!("reply is not json: {e}")))?;
    if !v.is_object() {
        return Err(AnalysisError::Parse("reply json is not an object".into()));
    }

    let detected = detected_categories(&v);
    let primary = primary_category(&v, &detected);

    Ok(AnalysisResult {
        summary: string_field(&v, "summary").unwrap_or(DEFAULT_SUMMARY).to_string(),
        details: string_field(&v, "details").unwrap_or_default().to_string(),
        severity: string_field(&v, "severity")
            .unwrap_or(UNKNOWN_SEVERITY)
            .to_string(),
        confidence: v.get("confidence").and_then(confidence_value).unwrap_or(0.0),
        timestamp: now,
        tags: detected.iter().map(|c| c.as_key().to_string()).collect(),
        recommendations: recommendations_for_category(primary),
        primary_category: primary,
    })
}

fn string_field<'a>(v: &'a Value, key: &str) -> Option<&'a str> {
    v.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn detected_categories(v: &Value) -> Vec<DisasterCategory> {
    let Some(predictions) = v.get("predictions").and_then(Value::as_object) else {
        return Vec::new();
    };
    DisasterCategory::ALL
        .into_iter()
        .filter(|c| {
            predictions
                .get(c.as_key())
                .is_some_and(|flag| flag.as_bool() == Some(true) || flag.as_str() == Some("true"))
        })
        .collect()
}

fn primary_category(v: &Value, detected: &[DisasterCategory]) -> Option<DisasterCategory> {
    if detected.is_empty() {
        return None;
    }
    v.get("primaryPrediction")
        .or_else(|| v.get("primary_prediction"))
        .and_then(Value::as_str)
        .and_then(DisasterCategory::from_key)
        .or_else(|| detected.first().copied())
}

fn confidence_value(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64().map(scale_fraction),
        Value::String(s) => {
            let s = s.trim();
            match s.strip_suffix('%') {
                Some(percent) => percent.trim().parse().ok(),
                None => s.parse().ok().map(scale_fraction),
            }
        }
        _ => None,
    }
}

/// Values strictly between 0 and 1, such as 0.87, are fractions of 100.
fn scale_fraction(raw: f64) -> f64 {
    if raw > 0.0 && raw < 1.0 {
        raw * 100.0
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendations::{common_recommendations, recommendations_for};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-05-10T14:30:00Z")
            .expect("timestamp")
            .with_timezone(&Utc)
    }

    const FIRE_REPLY: &str = r#"{
      "predictions": {"earthquake": false, "fog": false, "heavy_rain": false, "on_fire": true},
      "primaryPrediction": "on_fire",
      "confidence": 88,
      "summary": "A warehouse is burning.",
      "details": "Flames visible through the roof.",
      "severity": "High"
    }"#;

    #[test]
    fn extracts_fenced_block() {
        let raw = "Here you go:\n```json\n{\"a\": 1}\n```\nanything else";
        assert_eq!(extract_json_block(raw), "{\"a\": 1}");
        let bare = "```\n{\"a\": 2}\n```";
        assert_eq!(extract_json_block(bare), "{\"a\": 2}");
    }

    #[test]
    fn extracts_single_line_fenced_block() {
        let raw = "```{\"severity\":\"High\"}```\nHope this helps.";
        assert_eq!(extract_json_block(raw), "{\"severity\":\"High\"}");
        let parsed = parse_model_reply(raw, now()).expect("parse");
        assert_eq!(parsed.severity, "High");
    }

    #[test]
    fn falls_back_to_raw_text() {
        assert_eq!(extract_json_block("  {\"a\": 1}\n"), "{\"a\": 1}");
        assert_eq!(extract_json_block("```json {\"a\": 1}"), "```json {\"a\": 1}");
    }

    #[test]
    fn fenced_and_raw_replies_parse_identically() {
        let fenced = format!("```json\n{FIRE_REPLY}\n```");
        let a = parse_model_reply(FIRE_REPLY, now()).expect("raw");
        let b = parse_model_reply(&fenced, now()).expect("fenced");
        assert_eq!(a, b);
    }

    #[test]
    fn on_fire_reply_yields_fire_recommendations() {
        let parsed = parse_model_reply(FIRE_REPLY, now()).expect("parse");
        assert_eq!(parsed.primary_category, Some(DisasterCategory::OnFire));
        assert_eq!(parsed.tags, vec!["on_fire".to_string()]);
        assert_eq!(parsed.severity, "High");
        assert_eq!(parsed.confidence, 88.0);
        assert_eq!(parsed.recommendations, recommendations_for(Some("on_fire")));
        assert!(parsed.recommendations.ends_with(&common_recommendations()));
    }

    #[test]
    fn all_flags_false_yields_generic_recommendations() {
        let raw = r#"{
          "predictions": {"earthquake": false, "fog": false, "heavy_rain": false, "on_fire": false},
          "primaryPrediction": "on_fire",
          "confidence": 40,
          "summary": "Nothing notable.",
          "details": "",
          "severity": "Low"
        }"#;
        let parsed = parse_model_reply(raw, now()).expect("parse");
        assert_eq!(parsed.primary_category, None);
        assert!(parsed.tags.is_empty());
        assert_eq!(parsed.recommendations, common_recommendations());
    }

    #[test]
    fn unknown_primary_falls_back_to_first_detected_flag() {
        let raw = r#"{"predictions": {"fog": true, "heavy_rain": true}, "primaryPrediction": "tornado"}"#;
        let parsed = parse_model_reply(raw, now()).expect("parse");
        assert_eq!(parsed.primary_category, Some(DisasterCategory::Fog));
        assert_eq!(parsed.tags, vec!["fog".to_string(), "heavy_rain".to_string()]);
    }

    #[test]
    fn missing_fields_get_defaults() {
        let parsed = parse_model_reply("{}", now()).expect("parse");
        assert_eq!(parsed.summary, DEFAULT_SUMMARY);
        assert_eq!(parsed.details, "");
        assert_eq!(parsed.severity, UNKNOWN_SEVERITY);
        assert_eq!(parsed.confidence, 0.0);
        assert_eq!(parsed.timestamp, now());
        assert_eq!(parsed.recommendations, common_recommendations());
    }

    #[test]
    fn fractional_and_string_confidence_are_normalized() {
        let a = parse_model_reply(r#"{"confidence": 0.75}"#, now()).expect("parse");
        assert_eq!(a.confidence, 75.0);
        let b = parse_model_reply(r#"{"confidence": "64%"}"#, now()).expect("parse");
        assert_eq!(b.confidence, 64.0);
        let c = parse_model_reply(r#"{"confidence": "0.5"}"#, now()).expect("parse");
        assert_eq!(c.confidence, 50.0);
    }

    #[test]
    fn one_percent_confidence_is_not_rescaled() {
        let number = parse_model_reply(r#"{"confidence": 1}"#, now()).expect("parse");
        assert_eq!(number.confidence, 1.0);
        let percent = parse_model_reply(r#"{"confidence": "1%"}"#, now()).expect("parse");
        assert_eq!(percent.confidence, 1.0);
        let small = parse_model_reply(r#"{"confidence": "0.5%"}"#, now()).expect("parse");
        assert_eq!(small.confidence, 0.5);
    }

    #[test]
    fn garbage_reply_is_a_parse_error() {
        assert!(matches!(
            parse_model_reply("I cannot help with that.", now()),
            Err(AnalysisError::Parse(_))
        ));
        assert!(matches!(
            parse_model_reply("[1, 2, 3]", now()),
            Err(AnalysisError::Parse(_))
        ));
    }
}
