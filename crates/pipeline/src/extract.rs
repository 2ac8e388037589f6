use crate::error::AnalyzeError;
use domain::AnalysisResult;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref JSON_FENCE: Regex =
        Regex::new(r"```json\s*([\s\S]*?)\s*```").expect("json fence pattern should compile");
    static ref ANY_FENCE: Regex =
        Regex::new(r"```\s*([\s\S]*?)\s*```").expect("fence pattern should compile");
}

/// Pick the part of a model reply that should hold the JSON document.
///
/// The first ```json block wins, then the first plain ``` block, then the
/// reply as is. Only one layer of fencing is removed.
pub fn extract_json_text(reply: &str) -> &str {
    [&*JSON_FENCE, &*ANY_FENCE]
        .into_iter()
        .find_map(|fence| fence.captures(reply).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str())
        .unwrap_or(reply)
        .trim()
}

pub fn parse_reply(reply: &str) -> Result<Value, AnalyzeError> {
    serde_json::from_str(extract_json_text(reply)).map_err(AnalyzeError::Parse)
}

/// All-or-nothing schema check of a parsed reply
pub fn validate(value: Value) -> Result<AnalysisResult, AnalyzeError> {
    serde_json::from_value(value).map_err(AnalyzeError::Schema)
}

pub fn extract_analysis(reply: &str) -> Result<AnalysisResult, AnalyzeError> {
    validate(parse_reply(reply)?)
}
