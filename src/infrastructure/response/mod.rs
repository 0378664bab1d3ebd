use once_cell::sync::Lazy;
use regex::Regex;

static THINK_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<think>[\s\S]*?</think>|<think\s*/>").unwrap());

static CODE_FENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```[a-zA-Z]*\s*(.*?)\s*```$").unwrap());

/// Strip reasoning tags and surrounding whitespace from a model response.
pub fn clean_model_response(response: &str) -> String {
    THINK_TAG_PATTERN
        .replace_all(response, "")
        .trim()
        .to_string()
}

/// Pull the JSON document out of a model response that may wrap it in a
/// code fence or in leading/trailing prose.
pub fn extract_json_payload(output: &str) -> String {
    let cleaned = clean_model_response(output);

    if let Some(captures) = CODE_FENCE_PATTERN.captures(&cleaned) {
        if let Some(inner) = captures.get(1) {
            return inner.as_str().trim().to_string();
        }
    }

    if serde_json::from_str::<serde_json::Value>(&cleaned).is_ok() {
        return cleaned;
    }

    // Prose around an array: keep the outermost brackets
    match (cleaned.find('['), cleaned.rfind(']')) {
        (Some(start), Some(end)) if start < end => cleaned[start..=end].to_string(),
        _ => cleaned,
    }
}
