//! Per-tool parsers and the dispatch registry
//!
//! Each supported tool has a parser module that implements the
//! [`ToolParser`] trait, turning a request record (and its optional result
//! record) into that tool's fixed props shape.
//!
//! ## Supported tools
//!
//! | Tool name | Module |
//! |-----------|--------|
//! | `command-exec` | [`command`] |
//! | `file-edit` | [`edit`] |
//! | `file-multi-edit` | [`multi_edit`] |
//! | `file-read` | [`read`] |
//! | `file-write` | [`write`] |
//! | `path-glob` | [`glob`] |
//! | `dir-list` | [`ls`] |
//! | `todo-read` | [`todo_read`] |
//! | `todo-write` | [`todo_write`] |
//! | `generic-integration__*` | [`generic`] |
//!
//! The registry is the single entry point for callers: it resolves a record
//! to a parser and converts any parser-level error into `None` plus a logged
//! diagnostic, so callers only ever see `None` or a valid props record.

mod command;
mod edit;
mod generic;
mod glob;
mod ls;
mod multi_edit;
mod read;
mod todo_read;
mod todo_write;
mod write;

pub use command::{CommandParser, CommandProps};
pub use edit::{EditParser, EditProps};
pub use generic::{GenericParser, GenericProps, GENERIC_TOOL_PREFIX};
pub use glob::{GlobParser, GlobProps};
pub use ls::{LsParser, LsProps};
pub use multi_edit::{EditOperation, MultiEditParser, MultiEditProps};
pub use read::{ReadParser, ReadProps};
pub use todo_read::{TodoReadParser, TodoReadProps};
pub use todo_write::{TodoWriteParser, TodoWriteProps};
pub use write::{WriteParser, WriteProps};

use crate::config::AnalyzerConfig;
use crate::content::{self, ToolOutcome};
use crate::error::Result;
use crate::shape::ShapeAnalyzer;
use crate::types::{BaseProps, LogRecord};
use serde::Serialize;
use serde_json::Value;

/// Trait implemented by all per-tool parsers.
///
/// `parse` is total over syntactically valid record pairs except for the
/// missing-invocation case; input-shape defects degrade to defaults.
pub trait ToolParser: Send + Sync {
    /// Canonical tool name this parser is registered under
    fn tool_name(&self) -> &'static str;

    /// Whether this parser accepts the record.
    ///
    /// Default: the record carries an invocation block with the exact
    /// canonical name.
    fn can_handle(&self, record: &LogRecord) -> bool {
        content::find_tool_use(record, |name| name == self.tool_name()).is_some()
    }

    /// Normalize a request record and its optional result record into
    /// this tool's props shape.
    fn parse(&self, request: &LogRecord, result: Option<&LogRecord>) -> Result<ToolProps>;
}

/// The union of all tool-specific props shapes.
///
/// Serializes with a `"tool"` tag so the rendering layer can dispatch on
/// one field.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tool", rename_all = "kebab-case")]
pub enum ToolProps {
    CommandExec(CommandProps),
    FileEdit(EditProps),
    FileMultiEdit(MultiEditProps),
    FileRead(ReadProps),
    FileWrite(WriteProps),
    PathGlob(GlobProps),
    DirList(LsProps),
    TodoRead(TodoReadProps),
    TodoWrite(TodoWriteProps),
    #[serde(rename = "generic-integration")]
    Generic(GenericProps),
}

impl ToolProps {
    /// The base fields shared by every props shape.
    pub fn base(&self) -> &BaseProps {
        match self {
            ToolProps::CommandExec(props) => &props.base,
            ToolProps::FileEdit(props) => &props.base,
            ToolProps::FileMultiEdit(props) => &props.base,
            ToolProps::FileRead(props) => &props.base,
            ToolProps::FileWrite(props) => &props.base,
            ToolProps::PathGlob(props) => &props.base,
            ToolProps::DirList(props) => &props.base,
            ToolProps::TodoRead(props) => &props.base,
            ToolProps::TodoWrite(props) => &props.base,
            ToolProps::Generic(props) => &props.base,
        }
    }
}

// ============================================
// Registry
// ============================================

/// Dispatch registry mapping tool names to parsers.
///
/// Populated once at construction and read-only afterwards, so independent
/// registries can coexist (tests) and one registry can serve concurrent
/// `parse` calls without coordination.
pub struct ParserRegistry {
    parsers: Vec<Box<dyn ToolParser>>,
    generic: GenericParser,
}

impl ParserRegistry {
    /// Create an empty registry around a generic-integration parser.
    pub fn new(generic: GenericParser) -> Self {
        Self {
            parsers: Vec::new(),
            generic,
        }
    }

    /// Register a parser. Later registrations do not shadow earlier ones;
    /// resolution scans in registration order.
    pub fn register(&mut self, parser: Box<dyn ToolParser>) {
        self.parsers.push(parser);
    }

    /// Resolve a record to the parser that will handle it.
    ///
    /// Resolution order: tool name from the first invocation block, then
    /// the reserved generic-integration prefix, then a linear scan of
    /// registered parsers.
    pub fn resolve(&self, record: &LogRecord) -> Option<&dyn ToolParser> {
        let invocation = content::find_tool_use(record, |_| true)?;

        if invocation.name.starts_with(GENERIC_TOOL_PREFIX) && self.generic.can_handle(record) {
            return Some(&self.generic);
        }

        self.parsers
            .iter()
            .map(|parser| parser.as_ref())
            .find(|parser| parser.can_handle(record))
    }

    /// Whether some registered parser accepts the record.
    pub fn can_parse(&self, record: &LogRecord) -> bool {
        self.resolve(record).is_some()
    }

    /// Parse a request/result pair into a props record.
    ///
    /// This is the only place parser errors are absorbed: any failure is
    /// logged and converted to `None`, never propagated to the caller.
    pub fn parse(&self, request: &LogRecord, result: Option<&LogRecord>) -> Option<ToolProps> {
        let parser = self.resolve(request)?;

        match parser.parse(request, result) {
            Ok(props) => Some(props),
            Err(error) => {
                tracing::warn!(
                    tool = parser.tool_name(),
                    record_id = %request.id,
                    %error,
                    "tool record normalization failed"
                );
                None
            }
        }
    }

    /// Canonical names of all registered parsers, generic unit last.
    pub fn registered_tools(&self) -> Vec<&'static str> {
        self.parsers
            .iter()
            .map(|parser| parser.tool_name())
            .chain(std::iter::once(self.generic.tool_name()))
            .collect()
    }
}

/// Build a registry with all built-in parsers registered.
pub fn default_registry(config: AnalyzerConfig) -> ParserRegistry {
    let analyzer = ShapeAnalyzer::new(config);

    let mut registry = ParserRegistry::new(GenericParser::new(analyzer));
    registry.register(Box::new(CommandParser));
    registry.register(Box::new(EditParser));
    registry.register(Box::new(MultiEditParser));
    registry.register(Box::new(ReadParser));
    registry.register(Box::new(WriteParser));
    registry.register(Box::new(GlobParser));
    registry.register(Box::new(LsParser));
    registry.register(Box::new(TodoReadParser));
    registry.register(Box::new(TodoWriteParser));
    registry
}

// ============================================
// Shared outcome decoding helpers
// ============================================

/// First string field present under any of the given keys.
///
/// Input parameter names drift between camelCase and snake_case across log
/// producers; parsers list the spellings they accept in preference order.
pub(crate) fn first_str(input: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| content::str_field(input, key))
}

/// First boolean field present under any of the given keys, default false.
pub(crate) fn first_bool(input: &Value, keys: &[&str]) -> bool {
    keys.iter()
        .any(|key| input.get(key).and_then(Value::as_bool).unwrap_or(false))
}

/// Extract human-readable text from a result content value.
///
/// Handles the two textual encodings in the wild: a plain string, and a
/// sequence of `{type: "text", text}` blocks (concatenated in order).
pub(crate) fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text.as_str()),
                    Value::Object(_) => item.get("text").and_then(Value::as_str),
                    _ => None,
                })
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("\n"))
            }
        }
        _ => None,
    }
}

/// Best-effort error message for a failed outcome.
///
/// Fallback order mirrors result decoding: textual content, then `message`
/// or `error` fields on the content object, then the side channel, then
/// the serialized content verbatim.
pub(crate) fn extract_error_message(outcome: &ToolOutcome) -> String {
    let message_field = |value: &Value| {
        value
            .get("message")
            .or_else(|| value.get("error"))
            .and_then(Value::as_str)
            .map(ToString::to_string)
    };

    text_of(&outcome.content)
        .or_else(|| message_field(&outcome.content))
        .or_else(|| outcome.side_channel.as_ref().and_then(&message_field))
        .unwrap_or_else(|| outcome.content.to_string())
}
