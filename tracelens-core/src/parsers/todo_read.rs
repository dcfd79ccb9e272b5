//! Todo read parser (`todo-read`)
//!
//! The read tool takes no input; the whole list lives in the result, either
//! as a bare array of items or wrapped in `{todos: [...]}`, sometimes only
//! on the side channel.

use crate::content::{self, ToolOutcome};
use crate::error::Result;
use crate::status::status_for;
use crate::types::{BaseProps, LogRecord, TodoItem};
use serde::Serialize;
use serde_json::Value;

use super::{extract_error_message, ToolParser, ToolProps};

/// Props for one todo list read
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoReadProps {
    #[serde(flatten)]
    pub base: BaseProps,
    pub todos: Vec<TodoItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Decode a todo list from a bare array or a `{todos}` wrapper.
///
/// A todo entry is an object carrying a `content` field; this also rejects
/// the `{type: "text"}` block encoding textual results arrive in, which
/// would otherwise deserialize into an all-defaults item. Malformed entries
/// are dropped item by item.
pub(crate) fn decode_todos(value: &Value) -> Option<Vec<TodoItem>> {
    let items = value
        .as_array()
        .or_else(|| value.get("todos").and_then(Value::as_array))?;
    Some(
        items
            .iter()
            .filter_map(|item| {
                item.as_object()?.get("content")?;
                serde_json::from_value(item.clone()).ok()
            })
            .collect(),
    )
}

fn decode_output(outcome: &ToolOutcome) -> Vec<TodoItem> {
    decode_todos(&outcome.content)
        .or_else(|| outcome.side_channel.as_ref().and_then(decode_todos))
        .unwrap_or_default()
}

pub struct TodoReadParser;

impl ToolParser for TodoReadParser {
    fn tool_name(&self) -> &'static str {
        "todo-read"
    }

    fn parse(&self, request: &LogRecord, result: Option<&LogRecord>) -> Result<ToolProps> {
        let invocation = content::extract_tool_use(request, self.tool_name())?;

        let outcome = content::find_tool_result(result, &invocation.id);
        let status = status_for(outcome.as_ref());

        let (todos, error_message) = match &outcome {
            None => (Vec::new(), None),
            Some(outcome) if outcome.is_error => {
                (Vec::new(), Some(extract_error_message(outcome)))
            }
            Some(outcome) => (decode_output(outcome), None),
        };

        Ok(ToolProps::TodoRead(TodoReadProps {
            base: content::base_props(request, &invocation, status),
            todos,
            error_message,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NormalizedStatus, TodoStatus};
    use serde_json::json;

    fn request() -> LogRecord {
        serde_json::from_value(json!({
            "id": "rec-1",
            "timestamp": "2026-01-05T10:00:00Z",
            "role": "assistant",
            "content": [
                {"type": "tool_use", "id": "call-1", "name": "todo-read", "input": {}}
            ]
        }))
        .unwrap()
    }

    fn result(content: Value) -> LogRecord {
        serde_json::from_value(json!({
            "id": "rec-2",
            "timestamp": "2026-01-05T10:00:01Z",
            "parentId": "rec-1",
            "role": "user",
            "content": [
                {"type": "tool_result", "tool_use_id": "call-1",
                 "content": content, "is_error": false}
            ]
        }))
        .unwrap()
    }

    fn parse(request: &LogRecord, result: Option<&LogRecord>) -> TodoReadProps {
        match TodoReadParser.parse(request, result).unwrap() {
            ToolProps::TodoRead(props) => props,
            other => panic!("unexpected props: {:?}", other),
        }
    }

    #[test]
    fn test_bare_array_of_todos() {
        let req = request();
        let res = result(json!([
            {"id": "t-1", "content": "ship it", "status": "in_progress", "priority": "high"},
            {"id": "t-2", "content": "write docs"}
        ]));

        let props = parse(&req, Some(&res));
        assert_eq!(props.todos.len(), 2);
        assert_eq!(props.todos[0].status, TodoStatus::InProgress);
        // Missing fields take item defaults
        assert_eq!(props.todos[1].status, TodoStatus::Pending);
    }

    #[test]
    fn test_wrapped_todos_object() {
        let req = request();
        let res = result(json!({"todos": [{"id": "t-1", "content": "one"}]}));

        let props = parse(&req, Some(&res));
        assert_eq!(props.todos.len(), 1);
    }

    #[test]
    fn test_side_channel_todos() {
        let req = request();
        let mut record = json!({
            "id": "rec-2",
            "timestamp": "2026-01-05T10:00:01Z",
            "role": "user",
            "content": [
                {"type": "tool_result", "tool_use_id": "call-1",
                 "content": "Remember to check your todos"}
            ]
        });
        record["rawResult"] = json!({"todos": [{"id": "t-9", "content": "later"}]});
        let res: LogRecord = serde_json::from_value(record).unwrap();

        let props = parse(&req, Some(&res));
        assert_eq!(props.todos.len(), 1);
        assert_eq!(props.todos[0].id.as_deref(), Some("t-9"));
    }

    #[test]
    fn test_text_block_result_is_not_a_todo_list() {
        let req = request();
        let res = result(json!([{"type": "text", "text": "No todos in the list yet"}]));

        let props = parse(&req, Some(&res));
        assert!(props.todos.is_empty());
        assert_eq!(props.base.status.normalized, NormalizedStatus::Completed);
    }

    #[test]
    fn test_malformed_entries_dropped() {
        let req = request();
        let res = result(json!([{"content": "ok"}, "not a todo", 42]));

        let props = parse(&req, Some(&res));
        assert_eq!(props.todos.len(), 1);
    }

    #[test]
    fn test_pending_without_result() {
        let req = request();
        let props = parse(&req, None);
        assert!(props.todos.is_empty());
        assert_eq!(props.base.status.normalized, NormalizedStatus::Pending);
    }
}
