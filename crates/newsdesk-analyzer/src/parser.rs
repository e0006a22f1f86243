//! Parse LLM output into an entity bundle

use crate::error::AnalyzerError;
use newsdesk_domain::{EntityBundle, EntityCategory};
use serde_json::Value;
use tracing::{debug, warn};

/// Parse the entity extraction response
///
/// The response is untrusted: each of the four categories is read
/// independently, so one malformed field never costs the others.
///
/// - array values contribute their trimmed, non-empty string entries
/// - a missing key, or a value that is not an array, leaves that category empty
/// - unknown keys are ignored
///
/// # Errors
///
/// [`AnalyzerError::MalformedResponse`] when the body is not JSON or not a
/// JSON object. Callers are expected to fall back to the empty bundle.
pub fn parse_entity_response(response: &str) -> Result<EntityBundle, AnalyzerError> {
    // LLMs sometimes wrap JSON in markdown code blocks
    let json_str = extract_json(response);

    let json: Value = serde_json::from_str(json_str)?;

    let obj = json
        .as_object()
        .ok_or_else(|| AnalyzerError::MalformedResponse("Expected JSON object".to_string()))?;

    let mut bundle = EntityBundle::default();

    for category in EntityCategory::ALL {
        match obj.get(category.key()) {
            Some(Value::Array(items)) => {
                for item in items {
                    match item.as_str() {
                        Some(value) => {
                            bundle.insert(category, value);
                        }
                        None => debug!("Skipping non-string entry in '{}': {}", category, item),
                    }
                }
            }
            Some(other) => {
                warn!(
                    "Category '{}' is not an array ({}), leaving it empty",
                    category,
                    type_name(other)
                );
            }
            None => debug!("Category '{}' missing from response", category),
        }
    }

    for key in obj.keys() {
        if EntityCategory::from_key(key).is_none() {
            debug!("Ignoring unknown key '{}' in entity response", key);
        }
    }

    Ok(bundle)
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the opening fence line (``` or ```json) and a closing fence if present
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => "",
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
