//! Strict parsing of the narrative JSON returned by the generator.
//!
//! Expected shape:
//!
//! ```json
//! {"adjustments": {"birthRate": 0.4, "deathRate": "-0.1"},
//!  "summary": "...", "insights": ["..."], "confidence": 0.7}
//! ```
//!
//! `adjustments` and `summary` are required. Delta values may be numbers
//! or numeric strings. Keys that are not model features are dropped and
//! reported. Anything else that deviates is an `UpstreamError::Response`.

use std::str::FromStr;

use popcast_core::errors::UpstreamError;
use popcast_core::models::{AdjustmentSet, FeatureName};
use serde_json::{Map, Value};

/// Text between the first `{` and the last `}`, inclusive.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedNarrative {
    pub adjustments: AdjustmentSet,
    pub summary: String,
    pub insights: Vec<String>,
    pub confidence: Option<f64>,
    pub ignored_keys: Vec<String>,
    /// Features whose delta was clamped to the bound.
    pub clamped: Vec<FeatureName>,
}

pub fn parse_narrative(
    service: &str,
    text: &str,
    max_abs_delta: f64,
) -> Result<ParsedNarrative, UpstreamError> {
    let bad = |reason: String| UpstreamError::Response {
        service: service.to_string(),
        reason,
    };

    let json = extract_json_object(text).ok_or_else(|| bad("no JSON object in response".into()))?;
    let value: Value = serde_json::from_str(json).map_err(|e| bad(format!("invalid JSON: {e}")))?;
    let root = value
        .as_object()
        .ok_or_else(|| bad("response is not a JSON object".into()))?;

    let raw_adjustments = match root.get("adjustments") {
        Some(Value::Object(map)) => map,
        Some(_) => return Err(bad("\"adjustments\" must be an object".into())),
        None => return Err(bad("missing \"adjustments\"".into())),
    };
    let summary = match root.get("summary") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::String(_)) => return Err(bad("\"summary\" is empty".into())),
        Some(_) => return Err(bad("\"summary\" must be a string".into())),
        None => return Err(bad("missing \"summary\"".into())),
    };

    let insights = match root.get("insights") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.trim().to_string()),
                other => Err(bad(format!("insight is not a string: {other}"))),
            })
            .filter(|r| !matches!(r, Ok(s) if s.is_empty()))
            .collect::<Result<_, _>>()?,
        Some(_) => return Err(bad("\"insights\" must be an array".into())),
    };

    let confidence = match root.get("confidence") {
        None | Some(Value::Null) => None,
        Some(v) => Some(
            numeric(v)
                .ok_or_else(|| bad(format!("\"confidence\" is not numeric: {v}")))?
                .clamp(0.0, 1.0),
        ),
    };

    let (adjustments, ignored_keys, clamped) =
        parse_adjustments(raw_adjustments, max_abs_delta).map_err(bad)?;

    Ok(ParsedNarrative {
        adjustments,
        summary,
        insights,
        confidence,
        ignored_keys,
        clamped,
    })
}

type Parsed = (AdjustmentSet, Vec<String>, Vec<FeatureName>);

fn parse_adjustments(raw: &Map<String, Value>, max_abs_delta: f64) -> Result<Parsed, String> {
    let mut set = AdjustmentSet::new();
    let mut ignored = Vec::new();
    let mut clamped = Vec::new();
    for (key, value) in raw {
        let Ok(name) = FeatureName::from_str(key) else {
            ignored.push(key.clone());
            continue;
        };
        let delta = numeric(value).ok_or_else(|| format!("adjustment {key} is not numeric: {value}"))?;
        if set.insert_clamped(name, delta, max_abs_delta) {
            clamped.push(name);
        }
    }
    Ok((set, ignored, clamped))
}

/// A finite number, or a string that parses as one.
fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
