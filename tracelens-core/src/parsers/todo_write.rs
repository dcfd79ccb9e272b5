//! Todo write parser (`todo-write`)
//!
//! The written list comes from the invocation input. Change tracking
//! prefers a structured `{oldTodos, newTodos}` result and diffs the two
//! snapshots by identifier; the legacy human-readable count message is a
//! last-resort fallback that fills counts only, never changes.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::content::{self, ToolOutcome};
use crate::error::Result;
use crate::status::status_for;
use crate::types::{BaseProps, LogRecord, TodoChange, TodoChangeType, TodoItem, TodoOperation};
use serde::Serialize;
use serde_json::Value;

use super::todo_read::decode_todos;
use super::{extract_error_message, text_of, ToolParser, ToolProps};

/// Identifier prefix the agent assigns to items it has not persisted yet
const FRESH_ID_PREFIX: &str = "temp-";

static LEGACY_COUNTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+(added|updated|removed)").unwrap());

/// Props for one todo list write
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoWriteProps {
    #[serde(flatten)]
    pub base: BaseProps,
    pub todos: Vec<TodoItem>,
    pub changes: Vec<TodoChange>,
    pub operation: TodoOperation,
    pub added_count: usize,
    pub updated_count: usize,
    pub removed_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

fn is_fresh(id: Option<&str>) -> bool {
    match id {
        None => true,
        Some(id) => id.starts_with(FRESH_ID_PREFIX),
    }
}

/// Classify the write from identifier shape alone. The order of the
/// checks is a fixed tie-break: clear, create, update, replace.
fn classify_operation(todos: &[TodoItem]) -> TodoOperation {
    if todos.is_empty() {
        return TodoOperation::Clear;
    }
    if todos.iter().all(|item| is_fresh(item.id.as_deref())) {
        return TodoOperation::Create;
    }
    if todos
        .iter()
        .any(|item| !is_fresh(item.id.as_deref()) && item.updated_at.is_some())
    {
        return TodoOperation::Update;
    }
    TodoOperation::Replace
}

/// Items without an identifier are keyed by content so unlabeled lists
/// still diff positionally stable entries.
fn change_key(item: &TodoItem) -> String {
    item.id.clone().unwrap_or_else(|| item.content.clone())
}

/// Diff two list snapshots by identifier.
fn diff_snapshots(old: &[TodoItem], new: &[TodoItem]) -> Vec<TodoChange> {
    let old_by_key: HashMap<String, &TodoItem> =
        old.iter().map(|item| (change_key(item), item)).collect();
    let new_keys: Vec<String> = new.iter().map(change_key).collect();

    let mut changes = Vec::new();
    for (item, key) in new.iter().zip(&new_keys) {
        match old_by_key.get(key) {
            None => changes.push(TodoChange {
                change_type: TodoChangeType::Add,
                todo_id: item.id.clone(),
                old_value: None,
                new_value: Some(item.clone()),
            }),
            Some(previous) if *previous != item => changes.push(TodoChange {
                change_type: TodoChangeType::Update,
                todo_id: item.id.clone(),
                old_value: Some((*previous).clone()),
                new_value: Some(item.clone()),
            }),
            Some(_) => {}
        }
    }
    for item in old {
        if !new_keys.contains(&change_key(item)) {
            changes.push(TodoChange {
                change_type: TodoChangeType::Delete,
                todo_id: item.id.clone(),
                old_value: Some(item.clone()),
                new_value: None,
            });
        }
    }
    changes
}

/// Structured change payload: `{oldTodos, newTodos}` on the result
/// content or the side channel.
fn decode_snapshots(outcome: &ToolOutcome) -> Option<(Vec<TodoItem>, Vec<TodoItem>)> {
    let snapshots = |value: &Value| {
        let old = decode_todos(value.get("oldTodos")?)?;
        let new = decode_todos(value.get("newTodos")?)?;
        Some((old, new))
    };
    snapshots(&outcome.content).or_else(|| outcome.side_channel.as_ref().and_then(snapshots))
}

/// Last-resort count extraction from a human-readable result message.
/// Fills counts only; it can never produce change records.
fn legacy_counts(outcome: &ToolOutcome) -> (usize, usize, usize) {
    let Some(text) = text_of(&outcome.content) else {
        return (0, 0, 0);
    };
    let (mut added, mut updated, mut removed) = (0, 0, 0);
    for capture in LEGACY_COUNTS.captures_iter(&text) {
        let count: usize = capture[1].parse().unwrap_or(0);
        match &capture[2] {
            "added" => added = count,
            "updated" => updated = count,
            _ => removed = count,
        }
    }
    (added, updated, removed)
}

fn count_of(changes: &[TodoChange], kind: TodoChangeType) -> usize {
    changes
        .iter()
        .filter(|change| change.change_type == kind)
        .count()
}

pub struct TodoWriteParser;

impl ToolParser for TodoWriteParser {
    fn tool_name(&self) -> &'static str {
        "todo-write"
    }

    fn parse(&self, request: &LogRecord, result: Option<&LogRecord>) -> Result<ToolProps> {
        let invocation = content::extract_tool_use(request, self.tool_name())?;

        let todos = invocation
            .input
            .get("todos")
            .and_then(decode_todos)
            .unwrap_or_default();
        let operation = classify_operation(&todos);

        let outcome = content::find_tool_result(result, &invocation.id);
        let status = status_for(outcome.as_ref());
        let error_message = outcome
            .as_ref()
            .filter(|outcome| outcome.is_error)
            .map(extract_error_message);

        let (changes, added_count, updated_count, removed_count) = match &outcome {
            None => (Vec::new(), 0, 0, 0),
            Some(outcome) => match decode_snapshots(outcome) {
                Some((old, new)) => {
                    let changes = diff_snapshots(&old, &new);
                    let added = count_of(&changes, TodoChangeType::Add);
                    let updated = count_of(&changes, TodoChangeType::Update);
                    let removed = count_of(&changes, TodoChangeType::Delete);
                    (changes, added, updated, removed)
                }
                None => {
                    let (added, updated, removed) = legacy_counts(outcome);
                    (Vec::new(), added, updated, removed)
                }
            },
        };

        Ok(ToolProps::TodoWrite(TodoWriteProps {
            base: content::base_props(request, &invocation, status),
            todos,
            changes,
            operation,
            added_count,
            updated_count,
            removed_count,
            error_message,
        }))
    }
}
