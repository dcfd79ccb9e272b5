//! Multi-edit parser (`file-multi-edit`)
//!
//! A multi-edit invocation carries an ordered list of edit operations
//! against one file. Each operation gets its own diff; the count is derived
//! from the decoded list, never from the result message.

use crate::content;
use crate::diff::diff_lines;
use crate::error::Result;
use crate::lang::infer_language;
use crate::status::status_for;
use crate::types::{BaseProps, DiffLine, LogRecord};
use serde::Serialize;
use serde_json::Value;

use super::{extract_error_message, first_bool, first_str, ToolParser, ToolProps};

/// One edit operation within a multi-edit invocation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditOperation {
    pub old_content: String,
    pub new_content: String,
    pub replace_all: bool,
    pub diff: Vec<DiffLine>,
}

/// Props for one multi-edit invocation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiEditProps {
    #[serde(flatten)]
    pub base: BaseProps,
    pub file_path: String,
    pub language: String,
    pub edits: Vec<EditOperation>,
    pub edit_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

fn decode_edit(value: &Value) -> EditOperation {
    let old_content =
        first_str(value, &["oldString", "old_string", "oldContent"]).unwrap_or_default();
    let new_content =
        first_str(value, &["newString", "new_string", "newContent"]).unwrap_or_default();

    EditOperation {
        diff: diff_lines(&old_content, &new_content),
        replace_all: first_bool(value, &["replaceAll", "replace_all"]),
        old_content,
        new_content,
    }
}

pub struct MultiEditParser;

impl ToolParser for MultiEditParser {
    fn tool_name(&self) -> &'static str {
        "file-multi-edit"
    }

    fn parse(&self, request: &LogRecord, result: Option<&LogRecord>) -> Result<ToolProps> {
        let invocation = content::extract_tool_use(request, self.tool_name())?;
        let input = &invocation.input;

        let file_path = first_str(input, &["filePath", "file_path", "path"]).unwrap_or_default();

        // A wrong-typed or absent edits field degrades to an empty list
        let edits: Vec<EditOperation> = input
            .get("edits")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(decode_edit).collect())
            .unwrap_or_default();

        let outcome = content::find_tool_result(result, &invocation.id);
        let status = status_for(outcome.as_ref());
        let error_message = outcome
            .as_ref()
            .filter(|outcome| outcome.is_error)
            .map(extract_error_message);

        Ok(ToolProps::FileMultiEdit(MultiEditProps {
            base: content::base_props(request, &invocation, status),
            language: infer_language(&file_path).to_string(),
            file_path,
            edit_count: edits.len(),
            edits,
            error_message,
        }))
    }
}
