//! Model response handling
//!
//! Turns the model's raw text into an `AnalysisResult`. Every way the text can
//! be wrong ends in an `AnalysisError` of kind `ResponseShape`; no value is
//! substituted here.

use serde_json::{Map, Value};

use crate::constants::analysis::{MAX_MOOD_SCORE, MIN_MOOD_SCORE};
use crate::types::AnalysisError;

/// Mood and summary derived from one journal entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// 1 (worst) to 10 (best)
    pub mood_score: i32,
    pub summary: Option<String>,
}

/// Remove surrounding whitespace, a UTF-8 BOM and markdown code fences.
///
/// Handles ```` ```json ```` (any case) or bare ```` ``` ```` openers, with
/// the payload on the same line or the next.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim_start_matches('\u{feff}').trim();

    if let Some(rest) = text.strip_prefix("```") {
        let rest = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
        text = rest.trim();
        if let Some(body) = text.strip_suffix("```") {
            text = body.trim();
        }
    }

    text
}

/// Parse fence-stripped text as a JSON object
pub fn parse_analysis_object(raw: &str) -> Result<Map<String, Value>, AnalysisError> {
    let text = strip_code_fences(raw);

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(AnalysisError::response_shape(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
        Err(e) => Err(AnalysisError::response_shape(format!(
            "response is not valid JSON: {}",
            e
        ))),
    }
}

/// Coerce a loosely-typed `mood_score` into an integer in 1..=10.
///
/// A JSON integer is taken as-is. Any other present value is rendered as
/// text and parsed as an integer, so `"7"` becomes 7 while `7.5`, `"7.5"`
/// and `true` are rejected.
pub fn coerce_mood_score(value: Option<&Value>) -> Result<i32, AnalysisError> {
    let score = match value {
        None | Some(Value::Null) => {
            return Err(AnalysisError::response_shape("mood_score is missing"));
        }
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| AnalysisError::response_shape(format!("mood_score {} overflows", n)))?,
        Some(Value::String(s)) => parse_score_text(s)?,
        Some(other) => parse_score_text(&other.to_string())?,
    };

    if !(MIN_MOOD_SCORE..=MAX_MOOD_SCORE).contains(&score) {
        return Err(AnalysisError::response_shape(format!(
            "mood_score {} is outside {}..={}",
            score, MIN_MOOD_SCORE, MAX_MOOD_SCORE
        )));
    }

    Ok(score)
}

fn parse_score_text(text: &str) -> Result<i32, AnalysisError> {
    text.trim().parse::<i32>().map_err(|_| {
        AnalysisError::response_shape(format!("mood_score '{}' is not an integer", text))
    })
}

/// `summary` as text: strings verbatim, null/absent as None, anything else as JSON text
pub fn extract_summary(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

/// Full pipeline from raw model text to a result
pub fn parse_analysis_response(raw: &str) -> Result<AnalysisResult, AnalysisError> {
    let object = parse_analysis_object(raw)?;
    let mood_score = coerce_mood_score(object.get("mood_score"))?;
    let summary = extract_summary(object.get("summary"));

    Ok(AnalysisResult {
        mood_score,
        summary,
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
