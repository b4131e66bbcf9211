//! Best-effort `{{ name }}` substitution over JSON-like value trees.
use std::collections::BTreeMap;

use serde_json::Value;

/// Renders a JSON-like tree against a flat context map, returning a new tree
/// of identical shape. String scalars are scanned for `{{ name }}`
/// placeholders; objects and arrays are walked preserving order; numbers,
/// booleans, and null pass through unchanged. Unknown placeholders stay in
/// the output verbatim so one unresolved name never aborts a run.
#[must_use]
pub fn render(value: &Value, context: &BTreeMap<String, String>) -> Value {
    match value {
        Value::String(text) => Value::String(render_template(text, context)),
        Value::Array(items) => Value::Array(items.iter().map(|item| render(item, context)).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, field)| (key.clone(), render(field, context)))
                .collect(),
        ),
        Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
    }
}

#[must_use]
pub fn render_template(input: &str, context: &BTreeMap<String, String>) -> String {
    let mut rest = input;
    let mut output = String::with_capacity(input.len());

    loop {
        let start = match rest.find("{{") {
            Some(start) => start,
            None => {
                output.push_str(rest);
                break;
            }
        };
        let (before, after_start) = rest.split_at(start);
        output.push_str(before);
        let after = match after_start.strip_prefix("{{") {
            Some(after) => after,
            None => {
                output.push_str(after_start);
                break;
            }
        };
        let end = match after.find("}}") {
            Some(end) => end,
            None => {
                output.push_str("{{");
                output.push_str(after);
                break;
            }
        };
        let (key_part, after_end) = after.split_at(end);
        let key = key_part.trim();
        if let Some(value) = context.get(key) {
            output.push_str(value);
        } else {
            // Missing context entry: keep the placeholder exactly as written.
            output.push_str("{{");
            output.push_str(key_part);
            output.push_str("}}");
        }
        rest = match after_end.strip_prefix("}}") {
            Some(remaining) => remaining,
            None => {
                output.push_str(after_end);
                break;
            }
        };
    }

    output
}
