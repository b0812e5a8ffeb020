//! Tolerant extraction of a JSON object from free-form model output.

use serde_json::{Map, Value};

/// Locate the first `{...}` span in `text` and decode it as a JSON object.
///
/// Tries the widest span (first `{` to last `}`) first, which covers
/// objects wrapped in prose or markdown fences, then the first balanced
/// span. Returns `None` when neither decodes to an object.
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    let start = text.find('{')?;

    if let Some(end) = text.rfind('}') {
        if end > start {
            if let Some(map) = decode_object(&text[start..=end]) {
                return Some(map);
            }
        }
    }

    balanced_span(&text[start..]).and_then(decode_object)
}

fn decode_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Slice from the leading `{` up to its matching `}`, skipping braces that
/// appear inside string literals.
fn balanced_span(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=idx]);
                }
            }
            _ => {}
        }
    }

    None
}
