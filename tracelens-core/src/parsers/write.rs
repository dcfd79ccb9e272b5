//! File write parser (`file-write`)
//!
//! Write props come from the invocation input; the result record adds
//! status and, when the producer reports it, whether the write created
//! the file or overwrote an existing one.

use crate::content::{self, ToolOutcome};
use crate::error::Result;
use crate::lang::infer_language;
use crate::status::status_for;
use crate::types::{BaseProps, LogRecord};
use serde::Serialize;

use super::{extract_error_message, first_str, ToolParser, ToolProps};

/// Props for one file write
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteProps {
    #[serde(flatten)]
    pub base: BaseProps,
    pub file_path: String,
    pub content: String,
    pub line_count: usize,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Structured write results report `{type: "create" | "update"}`.
fn decode_created(outcome: &ToolOutcome) -> Option<bool> {
    let kind = content::str_field(&outcome.content, "type").or_else(|| {
        outcome
            .side_channel
            .as_ref()
            .and_then(|raw| content::str_field(raw, "type"))
    })?;
    match kind.as_str() {
        "create" => Some(true),
        "update" => Some(false),
        _ => None,
    }
}

fn count_lines(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    text.trim_end_matches('\n').split('\n').count()
}

pub struct WriteParser;

impl ToolParser for WriteParser {
    fn tool_name(&self) -> &'static str {
        "file-write"
    }

    fn parse(&self, request: &LogRecord, result: Option<&LogRecord>) -> Result<ToolProps> {
        let invocation = content::extract_tool_use(request, self.tool_name())?;
        let input = &invocation.input;

        let file_path = first_str(input, &["filePath", "file_path", "path"]).unwrap_or_default();
        let file_content = first_str(input, &["content", "text"]).unwrap_or_default();

        let outcome = content::find_tool_result(result, &invocation.id);
        let status = status_for(outcome.as_ref());
        let created = outcome
            .as_ref()
            .filter(|outcome| !outcome.is_error)
            .and_then(decode_created);
        let error_message = outcome
            .as_ref()
            .filter(|outcome| outcome.is_error)
            .map(extract_error_message);

        Ok(ToolProps::FileWrite(WriteProps {
            base: content::base_props(request, &invocation, status),
            language: infer_language(&file_path).to_string(),
            line_count: count_lines(&file_content),
            file_path,
            content: file_content,
            created,
            error_message,
        }))
    }
}
