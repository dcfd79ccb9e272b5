//! Single file edit parser (`file-edit`)
//!
//! Edit props are input-driven: the old/new content and the computed diff
//! come from the invocation block, while the result record only contributes
//! status and error information.

use crate::content;
use crate::diff::diff_lines;
use crate::error::Result;
use crate::lang::infer_language;
use crate::status::status_for;
use crate::types::{BaseProps, DiffLine, LogRecord};
use serde::Serialize;

use super::{extract_error_message, first_bool, first_str, ToolParser, ToolProps};

/// Props for one single-location file edit
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditProps {
    #[serde(flatten)]
    pub base: BaseProps,
    pub file_path: String,
    pub old_content: String,
    pub new_content: String,
    pub replace_all: bool,
    pub language: String,
    pub diff: Vec<DiffLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

pub struct EditParser;

impl ToolParser for EditParser {
    fn tool_name(&self) -> &'static str {
        "file-edit"
    }

    fn parse(&self, request: &LogRecord, result: Option<&LogRecord>) -> Result<ToolProps> {
        let invocation = content::extract_tool_use(request, self.tool_name())?;
        let input = &invocation.input;

        let file_path = first_str(input, &["filePath", "file_path", "path"]).unwrap_or_default();
        let old_content =
            first_str(input, &["oldString", "old_string", "oldContent"]).unwrap_or_default();
        let new_content =
            first_str(input, &["newString", "new_string", "newContent"]).unwrap_or_default();
        let replace_all = first_bool(input, &["replaceAll", "replace_all"]);

        let outcome = content::find_tool_result(result, &invocation.id);
        let status = status_for(outcome.as_ref());
        let error_message = outcome
            .as_ref()
            .filter(|outcome| outcome.is_error)
            .map(extract_error_message);

        let diff = diff_lines(&old_content, &new_content);

        Ok(ToolProps::FileEdit(EditProps {
            base: content::base_props(request, &invocation, status),
            language: infer_language(&file_path).to_string(),
            file_path,
            old_content,
            new_content,
            replace_all,
            diff,
            error_message,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiffLineType, NormalizedStatus};
    use serde_json::{json, Value};

    fn request(input: Value) -> LogRecord {
        serde_json::from_value(json!({
            "id": "rec-1",
            "timestamp": "2026-01-05T10:00:00Z",
            "role": "assistant",
            "content": [
                {"type": "tool_use", "id": "call-1", "name": "file-edit", "input": input}
            ]
        }))
        .unwrap()
    }

    fn parse(request: &LogRecord, result: Option<&LogRecord>) -> EditProps {
        match EditParser.parse(request, result).unwrap() {
            ToolProps::FileEdit(props) => props,
            other => panic!("unexpected props: {:?}", other),
        }
    }

    #[test]
    fn test_edit_diff_and_language() {
        let req = request(json!({
            "filePath": "src/main.rs",
            "oldString": "let x = 1;\n",
            "newString": "let x = 2;\n"
        }));

        let props = parse(&req, None);
        assert_eq!(props.file_path, "src/main.rs");
        assert_eq!(props.language, "rust");
        assert!(!props.replace_all);

        let added: Vec<_> = props
            .diff
            .iter()
            .filter(|l| l.line_type == DiffLineType::Added)
            .collect();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].content, "let x = 2;");
    }

    #[test]
    fn test_snake_case_input_drift() {
        let req = request(json!({
            "file_path": "lib.py",
            "old_string": "a",
            "new_string": "b",
            "replace_all": true
        }));

        let props = parse(&req, None);
        assert_eq!(props.file_path, "lib.py");
        assert_eq!(props.old_content, "a");
        assert_eq!(props.new_content, "b");
        assert!(props.replace_all);
    }

    #[test]
    fn test_missing_fields_default_to_empty_diff() {
        let req = request(json!({}));
        let props = parse(&req, None);

        assert!(props.file_path.is_empty());
        assert!(props.diff.is_empty());
        assert_eq!(props.language, "plaintext");
        assert_eq!(props.base.status.normalized, NormalizedStatus::Pending);
    }

    #[test]
    fn test_failed_edit_keeps_diff_and_message() {
        let req = request(json!({
            "filePath": "src/main.rs",
            "oldString": "old",
            "newString": "new"
        }));
        let res: LogRecord = serde_json::from_value(json!({
            "id": "rec-2",
            "timestamp": "2026-01-05T10:00:01Z",
            "parentId": "rec-1",
            "role": "user",
            "content": [
                {"type": "tool_result", "tool_use_id": "call-1",
                 "content": "String to replace not found", "is_error": true}
            ]
        }))
        .unwrap();

        let props = parse(&req, Some(&res));
        assert_eq!(props.base.status.normalized, NormalizedStatus::Failed);
        assert_eq!(
            props.error_message.as_deref(),
            Some("String to replace not found")
        );
        assert!(!props.diff.is_empty());
    }
}
