//! Glob search parser (`path-glob`)
//!
//! Match lists arrive as a structured `{filenames, numFiles, truncated}`
//! object, a plain array of paths, or a newline-separated string. The
//! string shape uses a sentinel "No files found" message for empty results.

use crate::content::{self, ToolOutcome};
use crate::error::Result;
use crate::shape::decode_structured_text;
use crate::status::status_for;
use crate::types::{BaseProps, LogRecord};
use serde::Serialize;
use serde_json::Value;

use super::{extract_error_message, first_str, text_of, ToolParser, ToolProps};

const NO_FILES_SENTINEL: &str = "No files found";

/// Props for one glob search
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobProps {
    #[serde(flatten)]
    pub base: BaseProps,
    pub pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub matches: Vec<String>,
    pub match_count: usize,
    pub truncated: bool,
}

#[derive(Debug, Default)]
struct DecodedMatches {
    matches: Vec<String>,
    truncated: bool,
}

fn decode_object(value: &Value) -> Option<DecodedMatches> {
    let filenames = value.get("filenames")?.as_array()?;
    Some(DecodedMatches {
        matches: filenames
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        truncated: value
            .get("truncated")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

fn decode_array(value: &Value) -> Option<DecodedMatches> {
    let items = value.as_array()?;
    // Text-block arrays belong to the string decoder, not this one
    if items.iter().any(Value::is_object) {
        return None;
    }
    Some(DecodedMatches {
        matches: items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        truncated: false,
    })
}

fn decode_text(value: &Value) -> Option<DecodedMatches> {
    let text = text_of(value)?;
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == NO_FILES_SENTINEL {
        return Some(DecodedMatches::default());
    }
    Some(DecodedMatches {
        matches: trimmed.lines().map(str::to_string).collect(),
        truncated: false,
    })
}

/// Ordered decoder fallbacks: structured object, JSON-encoded string,
/// side channel, plain array, newline-separated text.
fn decode_output(outcome: &ToolOutcome) -> DecodedMatches {
    decode_object(&outcome.content)
        .or_else(|| {
            outcome
                .content
                .as_str()
                .and_then(decode_structured_text)
                .as_ref()
                .and_then(decode_object)
        })
        .or_else(|| outcome.side_channel.as_ref().and_then(decode_object))
        .or_else(|| decode_array(&outcome.content))
        .or_else(|| decode_text(&outcome.content))
        .unwrap_or_default()
}

pub struct GlobParser;

impl ToolParser for GlobParser {
    fn tool_name(&self) -> &'static str {
        "path-glob"
    }

    fn parse(&self, request: &LogRecord, result: Option<&LogRecord>) -> Result<ToolProps> {
        let invocation = content::extract_tool_use(request, self.tool_name())?;
        let input = &invocation.input;

        let pattern = first_str(input, &["pattern", "glob"]).unwrap_or_default();
        let path = content::str_field(input, "path");

        let outcome = content::find_tool_result(result, &invocation.id);
        let status = status_for(outcome.as_ref());

        let decoded = match &outcome {
            Some(outcome) if !outcome.is_error => decode_output(outcome),
            _ => DecodedMatches::default(),
        };
        if let Some(outcome) = outcome.as_ref().filter(|outcome| outcome.is_error) {
            tracing::debug!(
                pattern = %pattern,
                error = %extract_error_message(outcome),
                "glob search failed"
            );
        }

        Ok(ToolProps::PathGlob(GlobProps {
            base: content::base_props(request, &invocation, status),
            pattern,
            path,
            match_count: decoded.matches.len(),
            matches: decoded.matches,
            truncated: decoded.truncated,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NormalizedStatus;
    use serde_json::json;

    fn request(input: Value) -> LogRecord {
        serde_json::from_value(json!({
            "id": "rec-1",
            "timestamp": "2026-01-05T10:00:00Z",
            "role": "assistant",
            "content": [
                {"type": "tool_use", "id": "call-1", "name": "path-glob", "input": input}
            ]
        }))
        .unwrap()
    }

    fn result(content: Value, is_error: bool) -> LogRecord {
        serde_json::from_value(json!({
            "id": "rec-2",
            "timestamp": "2026-01-05T10:00:01Z",
            "parentId": "rec-1",
            "role": "user",
            "content": [
                {"type": "tool_result", "tool_use_id": "call-1",
                 "content": content, "is_error": is_error}
            ]
        }))
        .unwrap()
    }

    fn parse(request: &LogRecord, result: Option<&LogRecord>) -> GlobProps {
        match GlobParser.parse(request, result).unwrap() {
            ToolProps::PathGlob(props) => props,
            other => panic!("unexpected props: {:?}", other),
        }
    }

    #[test]
    fn test_structured_filenames_shape() {
        let req = request(json!({"pattern": "**/*.rs", "path": "src"}));
        let res = result(
            json!({"filenames": ["src/lib.rs", "src/main.rs"], "numFiles": 2, "truncated": true}),
            false,
        );

        let props = parse(&req, Some(&res));
        assert_eq!(props.pattern, "**/*.rs");
        assert_eq!(props.path.as_deref(), Some("src"));
        assert_eq!(props.matches, vec!["src/lib.rs", "src/main.rs"]);
        assert_eq!(props.match_count, 2);
        assert!(props.truncated);
    }

    #[test]
    fn test_plain_array_shape() {
        let req = request(json!({"pattern": "*.toml"}));
        let res = result(json!(["Cargo.toml", "rustfmt.toml"]), false);

        let props = parse(&req, Some(&res));
        assert_eq!(props.match_count, 2);
        assert!(!props.truncated);
    }

    #[test]
    fn test_json_encoded_string_shape_without_side_channel() {
        let req = request(json!({"pattern": "**/*.rs"}));
        let res = result(
            json!("{\"filenames\": [\"src/lib.rs\", \"src/types.rs\"], \"numFiles\": 2, \"truncated\": false}"),
            false,
        );

        let props = parse(&req, Some(&res));
        assert_eq!(props.matches, vec!["src/lib.rs", "src/types.rs"]);
        assert_eq!(props.match_count, 2);
        assert!(!props.truncated);
    }

    #[test]
    fn test_newline_separated_string_shape() {
        let req = request(json!({"pattern": "*.md"}));
        let res = result(json!("README.md\nCHANGELOG.md\n"), false);

        let props = parse(&req, Some(&res));
        assert_eq!(props.matches, vec!["README.md", "CHANGELOG.md"]);
    }

    #[test]
    fn test_no_files_sentinel_is_empty() {
        let req = request(json!({"pattern": "*.zig"}));
        let res = result(json!("No files found"), false);

        let props = parse(&req, Some(&res));
        assert!(props.matches.is_empty());
        assert_eq!(props.match_count, 0);
        assert_eq!(props.base.status.normalized, NormalizedStatus::Completed);
    }

    #[test]
    fn test_error_result_keeps_empty_matches() {
        let req = request(json!({"pattern": "["}));
        let res = result(json!("Invalid glob pattern"), true);

        let props = parse(&req, Some(&res));
        assert_eq!(props.base.status.normalized, NormalizedStatus::Failed);
        assert!(props.matches.is_empty());
    }
}
