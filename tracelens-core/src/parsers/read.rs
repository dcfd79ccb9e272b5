//! File read parser (`file-read`)
//!
//! Read results arrive either as a structured `{file: {content, numLines}}`
//! object (directly or on the side channel) or as the raw file text. The
//! line count comes from the decoded structure when present and is counted
//! from the content otherwise.

use crate::content::{self, ToolOutcome};
use crate::error::Result;
use crate::lang::infer_language;
use crate::status::status_for;
use crate::types::{BaseProps, LogRecord};
use serde::Serialize;
use serde_json::Value;

use super::{extract_error_message, first_str, text_of, ToolParser, ToolProps};

/// Props for one file read
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadProps {
    #[serde(flatten)]
    pub base: BaseProps,
    pub file_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    pub content: String,
    pub line_count: usize,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Decoded file payload: content plus producer-reported line count
fn decode_file(value: &Value) -> Option<(String, Option<usize>)> {
    let file = value.get("file").filter(|f| f.is_object()).or_else(|| {
        // Some producers flatten the file object to the top level
        value.as_object().and_then(|map| {
            if map.contains_key("content") {
                Some(value)
            } else {
                None
            }
        })
    })?;

    let text = content::str_field(file, "content")?;
    let lines = file
        .get("numLines")
        .or_else(|| file.get("num_lines"))
        .and_then(Value::as_u64)
        .map(|n| n as usize);
    Some((text, lines))
}

fn decode_output(outcome: &ToolOutcome) -> Option<(String, Option<usize>)> {
    decode_file(&outcome.content)
        .or_else(|| outcome.side_channel.as_ref().and_then(decode_file))
        .or_else(|| text_of(&outcome.content).map(|text| (text, None)))
}

fn count_lines(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    text.trim_end_matches('\n').split('\n').count()
}

pub struct ReadParser;

impl ToolParser for ReadParser {
    fn tool_name(&self) -> &'static str {
        "file-read"
    }

    fn parse(&self, request: &LogRecord, result: Option<&LogRecord>) -> Result<ToolProps> {
        let invocation = content::extract_tool_use(request, self.tool_name())?;
        let input = &invocation.input;

        let file_path = first_str(input, &["filePath", "file_path", "path"]).unwrap_or_default();
        let offset = content::u64_field(input, "offset");
        let limit = content::u64_field(input, "limit");

        let outcome = content::find_tool_result(result, &invocation.id);
        let status = status_for(outcome.as_ref());

        let (file_content, reported_lines, error_message) = match &outcome {
            None => (String::new(), None, None),
            Some(outcome) if outcome.is_error => {
                (String::new(), None, Some(extract_error_message(outcome)))
            }
            Some(outcome) => {
                let (text, lines) = decode_output(outcome).unwrap_or_default();
                (text, lines, None)
            }
        };

        let line_count = reported_lines.unwrap_or_else(|| count_lines(&file_content));

        Ok(ToolProps::FileRead(ReadProps {
            base: content::base_props(request, &invocation, status),
            language: infer_language(&file_path).to_string(),
            file_path,
            offset,
            limit,
            content: file_content,
            line_count,
            error_message,
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
                {"type": "tool_use", "id": "call-1", "name": "file-read", "input": input}
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

    fn parse(request: &LogRecord, result: Option<&LogRecord>) -> ReadProps {
        match ReadParser.parse(request, result).unwrap() {
            ToolProps::FileRead(props) => props,
            other => panic!("unexpected props: {:?}", other),
        }
    }

    #[test]
    fn test_structured_file_result() {
        let req = request(json!({"filePath": "src/lib.rs", "offset": 10, "limit": 50}));
        let res = result(
            json!({"file": {"content": "pub fn f() {}\n", "numLines": 1}}),
            false,
        );

        let props = parse(&req, Some(&res));
        assert_eq!(props.file_path, "src/lib.rs");
        assert_eq!(props.offset, Some(10));
        assert_eq!(props.limit, Some(50));
        assert_eq!(props.content, "pub fn f() {}\n");
        assert_eq!(props.line_count, 1);
        assert_eq!(props.language, "rust");
    }

    #[test]
    fn test_plain_text_result_counts_lines() {
        let req = request(json!({"filePath": "notes.md"}));
        let res = result(json!("line one\nline two\nline three\n"), false);

        let props = parse(&req, Some(&res));
        assert_eq!(props.line_count, 3);
        assert_eq!(props.language, "markdown");
    }

    #[test]
    fn test_side_channel_file_shape() {
        let req = request(json!({"filePath": "a.go"}));
        let mut record = json!({
            "id": "rec-2",
            "timestamp": "2026-01-05T10:00:01Z",
            "role": "user",
            "content": [
                {"type": "tool_result", "tool_use_id": "call-1", "content": 0}
            ]
        });
        record["rawResult"] = json!({"file": {"content": "package main\n", "numLines": 1}});
        let res: LogRecord = serde_json::from_value(record).unwrap();

        let props = parse(&req, Some(&res));
        assert_eq!(props.content, "package main\n");
        assert_eq!(props.line_count, 1);
    }

    #[test]
    fn test_error_result() {
        let req = request(json!({"filePath": "missing.txt"}));
        let res = result(json!("File does not exist."), true);

        let props = parse(&req, Some(&res));
        assert_eq!(props.base.status.normalized, NormalizedStatus::Failed);
        assert_eq!(props.error_message.as_deref(), Some("File does not exist."));
        assert!(props.content.is_empty());
        assert_eq!(props.line_count, 0);
    }

    #[test]
    fn test_pending_defaults() {
        let req = request(json!({"filePath": "a.txt"}));
        let props = parse(&req, None);
        assert_eq!(props.base.status.normalized, NormalizedStatus::Pending);
        assert_eq!(props.line_count, 0);
    }
}
