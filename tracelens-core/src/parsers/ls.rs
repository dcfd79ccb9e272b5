//! Directory listing parser (`dir-list`)
//!
//! Listings arrive in three shapes: an array of `{name, type}` objects, an
//! array of plain strings where a trailing `/` marks a directory, or the
//! legacy indented text listing with `- ` bullets.

use crate::content::{self, ToolOutcome};
use crate::error::Result;
use crate::status::status_for;
use crate::types::{BaseProps, DirEntry, DirEntryKind, LogRecord};
use serde::Serialize;
use serde_json::Value;

use super::{extract_error_message, first_str, text_of, ToolParser, ToolProps};

/// Props for one directory listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LsProps {
    #[serde(flatten)]
    pub base: BaseProps,
    pub path: String,
    pub entries: Vec<DirEntry>,
    pub file_count: usize,
    pub dir_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

fn entry_from_name(name: &str) -> DirEntry {
    match name.strip_suffix('/') {
        Some(stripped) => DirEntry {
            name: stripped.to_string(),
            kind: DirEntryKind::Directory,
        },
        None => DirEntry {
            name: name.to_string(),
            kind: DirEntryKind::File,
        },
    }
}

fn decode_object_entry(value: &Value) -> Option<DirEntry> {
    let name = content::str_field(value, "name")?;
    let kind = match content::str_field(value, "type").as_deref() {
        Some("directory") | Some("dir") => DirEntryKind::Directory,
        _ => DirEntryKind::File,
    };
    Some(DirEntry { name, kind })
}

fn decode_array(value: &Value) -> Option<Vec<DirEntry>> {
    let items = value.as_array()?;
    // Text-block arrays belong to the legacy text decoder
    if items
        .iter()
        .any(|item| item.get("type").and_then(Value::as_str) == Some("text"))
    {
        return None;
    }
    Some(
        items
            .iter()
            .filter_map(|item| match item {
                Value::String(name) => Some(entry_from_name(name)),
                Value::Object(_) => decode_object_entry(item),
                _ => None,
            })
            .collect(),
    )
}

/// Legacy listings are indented bullet trees; non-bullet lines are the
/// listing header or a trailing note and carry no entries.
fn decode_text(value: &Value) -> Option<Vec<DirEntry>> {
    let text = text_of(value)?;
    Some(
        text.lines()
            .filter_map(|line| line.trim_start().strip_prefix("- "))
            .map(|name| entry_from_name(name.trim_end()))
            .collect(),
    )
}

fn decode_entries(outcome: &ToolOutcome) -> Vec<DirEntry> {
    decode_array(&outcome.content)
        .or_else(|| {
            outcome
                .side_channel
                .as_ref()
                .and_then(|raw| decode_array(raw).or_else(|| decode_text(raw)))
        })
        .or_else(|| decode_text(&outcome.content))
        .unwrap_or_default()
}

pub struct LsParser;

impl ToolParser for LsParser {
    fn tool_name(&self) -> &'static str {
        "dir-list"
    }

    fn parse(&self, request: &LogRecord, result: Option<&LogRecord>) -> Result<ToolProps> {
        let invocation = content::extract_tool_use(request, self.tool_name())?;

        let path = first_str(&invocation.input, &["path", "directory"]).unwrap_or_default();

        let outcome = content::find_tool_result(result, &invocation.id);
        let status = status_for(outcome.as_ref());

        let (entries, error_message) = match &outcome {
            None => (Vec::new(), None),
            Some(outcome) if outcome.is_error => {
                (Vec::new(), Some(extract_error_message(outcome)))
            }
            Some(outcome) => (decode_entries(outcome), None),
        };

        let dir_count = entries
            .iter()
            .filter(|entry| entry.kind == DirEntryKind::Directory)
            .count();

        Ok(ToolProps::DirList(LsProps {
            base: content::base_props(request, &invocation, status),
            path,
            file_count: entries.len() - dir_count,
            dir_count,
            entries,
            error_message,
        }))
    }
}
