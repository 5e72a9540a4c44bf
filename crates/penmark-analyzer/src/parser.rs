//! Parse LLM output into an analysis result

use crate::error::AnalysisError;
use crate::schema::REQUIRED_FIELDS;
use penmark_domain::AnalysisResult;
use serde_json::Value;
use tracing::warn;

const FENCE: &str = "```";

/// Remove a markdown code fence wrapped around a model reply
///
/// Trims surrounding whitespace, then drops a leading fence-open (with an
/// optional language tag such as `json`) and a trailing fence-close when
/// present. Either marker may appear on its own. The payload between the
/// markers is returned as-is apart from surrounding whitespace.
///
/// # Examples
///
/// ```
/// use penmark_analyzer::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
/// assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
/// ```
pub fn strip_code_fence(response: &str) -> &str {
    let mut body = response.trim();

    if let Some(rest) = body.strip_prefix(FENCE) {
        // Language tag, e.g. ```json
        body = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    }

    if let Some(rest) = body.trim_end().strip_suffix(FENCE) {
        body = rest;
    }

    body.trim()
}

/// Parse and validate a raw model reply
///
/// The reply is rejected wholesale on any problem; there is no field-level
/// defaulting or partial acceptance.
///
/// # Errors
///
/// `AnalysisError::InvalidResponse` if the reply is not JSON after fence
/// stripping, is not an object, lacks a required field, has a field of the
/// wrong type, has an unknown `conclusion`, or has an `aiProbability`
/// outside [0, 100].
pub fn parse_analysis_response(response: &str) -> Result<AnalysisResult, AnalysisError> {
    let json_str = strip_code_fence(response);
    if json_str.is_empty() {
        return Err(AnalysisError::InvalidResponse("Empty response".to_string()));
    }

    let json: Value = serde_json::from_str(json_str)?;

    let obj = json
        .as_object()
        .ok_or_else(|| AnalysisError::InvalidResponse("Expected JSON object".to_string()))?;

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|field| !obj.contains_key(**field)) {
        warn!("Model reply is missing required field '{}'", missing);
        return Err(AnalysisError::InvalidResponse(format!(
            "Missing required field '{}'",
            missing
        )));
    }

    let result: AnalysisResult = serde_json::from_value(json).map_err(|e| {
        warn!("Model reply does not match the result schema: {}", e);
        AnalysisError::InvalidResponse(format!("Schema violation: {}", e))
    })?;

    if let Err(e) = result.validate() {
        warn!("Model reply failed validation: {}", e);
        return Err(AnalysisError::InvalidResponse(e));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use penmark_domain::Conclusion;

    const VALID: &str = r#"{
        "conclusion": "AI Written",
        "aiProbability": 87,
        "evidence": [
            {"signal": "Sentence Rhythm", "explanation": "Uniform sentence length throughout."},
            {"signal": "Transitions", "explanation": "Heavy use of 'moreover' and 'in conclusion'."}
        ],
        "suspiciousExcerpts": [
            {"excerpt": "In conclusion, technology shapes our world.", "reason": "Generic summary sentence."}
        ],
        "humanizeSuggestions": [
            {"problem": "Uniform rhythm", "fix": "Vary sentence length", "example": "It works. Mostly.", "why": "Humans write in bursts."}
        ],
        "limitations": "Short sample."
    }"#;

    fn with_field(field: &str, value: &str) -> String {
        let mut json: Value = serde_json::from_str(VALID).unwrap();
        json[field] = serde_json::from_str(value).unwrap();
        json.to_string()
    }

    fn without_field(field: &str) -> String {
        let mut json: Value = serde_json::from_str(VALID).unwrap();
        json.as_object_mut().unwrap().remove(field);
        json.to_string()
    }

    fn assert_invalid(response: &str) {
        let err = parse_analysis_response(response).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse, "got {:?}", err);
    }

    #[test]
    fn test_parse_valid_json() {
        let result = parse_analysis_response(VALID).unwrap();
        assert_eq!(result.conclusion, Conclusion::AiWritten);
        assert_eq!(result.ai_probability, 87.0);
        assert_eq!(result.evidence.len(), 2);
        assert_eq!(result.evidence[0].signal, "Sentence Rhythm");
        assert_eq!(result.evidence[1].signal, "Transitions");
        assert_eq!(result.suspicious_excerpts.len(), 1);
        assert_eq!(result.humanize_suggestions[0].why, "Humans write in bursts.");
        assert_eq!(result.limitations, "Short sample.");
    }

    #[test]
    fn test_fenced_and_plain_parse_identically() {
        let fenced = format!("```json\n{}\n```", VALID);
        assert_eq!(
            parse_analysis_response(&fenced).unwrap(),
            parse_analysis_response(VALID).unwrap()
        );
    }

    #[test]
    fn test_parse_json_with_bare_fence() {
        let fenced = format!("```\n{}\n```", VALID);
        assert!(parse_analysis_response(&fenced).is_ok());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert_invalid("This is not JSON");
        assert_invalid("");
        assert_invalid("```json\n```");
    }

    #[test]
    fn test_parse_json_not_object() {
        assert_invalid("[1, 2, 3]");
    }

    #[test]
    fn test_missing_any_required_field() {
        for field in REQUIRED_FIELDS {
            let response = without_field(field);
            let err = parse_analysis_response(&response).unwrap_err();
            assert_eq!(
                err,
                AnalysisError::InvalidResponse(format!("Missing required field '{}'", field))
            );
        }
    }

    #[test]
    fn test_unknown_conclusion() {
        assert_invalid(&with_field("conclusion", r#""Probably AI""#));
        assert_invalid(&with_field("conclusion", r#""ai written""#));
    }

    #[test]
    fn test_probability_boundaries() {
        assert_eq!(
            parse_analysis_response(&with_field("aiProbability", "0")).unwrap().ai_probability,
            0.0
        );
        assert_eq!(
            parse_analysis_response(&with_field("aiProbability", "100")).unwrap().ai_probability,
            100.0
        );
        assert_invalid(&with_field("aiProbability", "150"));
        assert_invalid(&with_field("aiProbability", "-5"));
        assert_invalid(&with_field("aiProbability", r#""87""#));
        assert_invalid(&with_field("aiProbability", "null"));
    }

    #[test]
    fn test_array_fields_must_be_arrays() {
        assert_invalid(&with_field("evidence", r#""none""#));
        assert_invalid(&with_field("suspiciousExcerpts", "{}"));
        assert_invalid(&with_field("humanizeSuggestions", "null"));
    }

    #[test]
    fn test_item_sub_fields_are_required() {
        assert_invalid(&with_field("evidence", r#"[{"signal": "Rhythm"}]"#));
        assert_invalid(&with_field("suspiciousExcerpts", r#"[{"excerpt": "x", "reason": 3}]"#));
        assert_invalid(&with_field(
            "humanizeSuggestions",
            r#"[{"problem": "a", "fix": "b", "example": "c"}]"#,
        ));
    }

    #[test]
    fn test_limitations_must_be_string() {
        assert_invalid(&with_field("limitations", "null"));
        assert_invalid(&with_field("limitations", "[]"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let response = with_field("modelVersion", r#""x""#);
        assert!(parse_analysis_response(&response).is_ok());
    }

    #[test]
    fn test_strip_plain_json() {
        let json = r#"{"key": "value"}"#;
        assert_eq!(strip_code_fence(json), json);
    }

    #[test]
    fn test_strip_json_fence() {
        assert_eq!(strip_code_fence("```json\n{\"key\": \"value\"}\n```"), r#"{"key": "value"}"#);
    }

    #[test]
    fn test_strip_fence_without_language() {
        assert_eq!(strip_code_fence("```\n{\"key\": 1}\n```"), r#"{"key": 1}"#);
    }

    #[test]
    fn test_strip_fence_with_trailing_whitespace() {
        assert_eq!(strip_code_fence("\n  ```json\n{\"key\": 1}\n```  \n\t"), r#"{"key": 1}"#);
    }

    #[test]
    fn test_strip_partial_fence() {
        assert_eq!(strip_code_fence("```json\n{\"key\": 1}"), r#"{"key": 1}"#);
        assert_eq!(strip_code_fence("{\"key\": 1}\n```"), r#"{"key": 1}"#);
    }

    #[test]
    fn test_strip_fence_on_single_line() {
        assert_eq!(strip_code_fence("```json{\"key\": 1}```"), r#"{"key": 1}"#);
    }

    #[test]
    fn test_strip_keeps_payload_backticks() {
        let json = r#"{"excerpt": "use ```code``` here"}"#;
        assert_eq!(strip_code_fence(&format!("```json\n{}\n```", json)), json);
    }
}
