//! Core domain types for tracelens
//!
//! These types cover both sides of the normalization pipeline:
//! the loosely-typed agent log records consumed as input, and the
//! strongly-typed building blocks shared by every tool-specific
//! props record.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **LogRecord** | One entry in an agent's interaction history |
//! | **Invocation block** | Content block requesting a tool call (name + input) |
//! | **Result block** | Content block carrying a tool's outcome |
//! | **Side channel** | Legacy `rawResult` field attached outside the content sequence |
//! | **Props record** | The fixed, tool-specific output shape consumed by rendering |
//!
//! Input records arrive in camelCase JSON with heavy format drift, so the
//! deserialization types lean on `#[serde(default)]` and untagged/other
//! fallbacks rather than failing a whole record over one odd field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// Log records (input side)
// ============================================

/// One entry in an agent's interaction history.
///
/// `role` is a free string: `"assistant"` records carry invocation blocks,
/// any other role may carry result blocks.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LogRecord {
    /// Opaque correlation string
    pub id: String,
    /// ISO-8601 timestamp, carried verbatim into props
    pub timestamp: String,
    /// Links a result record to its originating request
    pub parent_id: Option<String>,
    /// Author role ("assistant", "user", ...)
    pub role: String,
    /// Free-form content: string, single block, or block sequence
    pub content: Option<RawContent>,
    /// Legacy out-of-band side channel some log producers attach
    /// alongside, rather than inside, the content sequence
    pub raw_result: Option<serde_json::Value>,
}

impl LogRecord {
    /// Parse the record timestamp, if it is valid RFC 3339.
    ///
    /// The normalization pipeline itself passes timestamps through verbatim;
    /// this is for downstream callers that need real time values.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// The raw shape of a record's content field.
///
/// Historical log producers emit three shapes for the same data; anything
/// that matches none of them is captured as [`RawContent::Other`] and
/// normalizes to an empty block sequence.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawContent {
    Text(String),
    Block(ContentBlock),
    Blocks(Vec<ContentBlock>),
    Other(serde_json::Value),
}

/// A tagged content block within a log record.
///
/// Exhaustive matching at every consumption site is the point: a result
/// block can never be silently misread as an invocation block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        #[serde(default)]
        text: String,
    },
    ToolUse {
        #[serde(default)]
        id: String,
        #[serde(default)]
        name: String,
        #[serde(default)]
        input: serde_json::Value,
    },
    ToolResult {
        #[serde(default)]
        tool_use_id: String,
        #[serde(default)]
        content: serde_json::Value,
        #[serde(default)]
        is_error: bool,
    },
    // Catch-all for unknown block types
    #[serde(other)]
    Unknown,
}

// ============================================
// Tool status
// ============================================

/// Canonical tool invocation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizedStatus {
    /// Invocation seen, no result yet
    Pending,
    /// Result streaming in (reserved for live log tailing)
    Running,
    Completed,
    Failed,
    /// Cut off by the operator before completion
    Interrupted,
    Unknown,
}

impl NormalizedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizedStatus::Pending => "pending",
            NormalizedStatus::Running => "running",
            NormalizedStatus::Completed => "completed",
            NormalizedStatus::Failed => "failed",
            NormalizedStatus::Interrupted => "interrupted",
            NormalizedStatus::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for NormalizedStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(NormalizedStatus::Pending),
            "running" => Ok(NormalizedStatus::Running),
            "completed" => Ok(NormalizedStatus::Completed),
            "failed" => Ok(NormalizedStatus::Failed),
            "interrupted" => Ok(NormalizedStatus::Interrupted),
            "unknown" => Ok(NormalizedStatus::Unknown),
            _ => Err(format!("unknown status: {}", s)),
        }
    }
}

/// Extra status detail flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusDetails {
    pub interrupted: bool,
}

/// Derived status plus the raw signal it was derived from.
///
/// `normalized` is a pure function of the status-mapper inputs; `original`
/// echoes whatever raw signal the caller saw, so that multiple raw encodings
/// mapping to the same normalized value stay distinguishable in diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolStatus {
    pub normalized: NormalizedStatus,
    pub original: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<StatusDetails>,
}

// ============================================
// Shared props building blocks
// ============================================

/// Fields present in every tool-specific props record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseProps {
    /// Invocation identifier (from the tool_use block)
    pub id: String,
    /// Identifier of the originating log record
    pub correlation_id: String,
    /// Record timestamp, verbatim
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub status: ToolStatus,
}

/// Classification of one physical line in a line-level edit script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffLineType {
    Added,
    Removed,
    Unchanged,
}

impl DiffLineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffLineType::Added => "added",
            DiffLineType::Removed => "removed",
            DiffLineType::Unchanged => "unchanged",
        }
    }
}

/// One line of a computed diff.
///
/// Added lines carry only `new_line_number`, removed lines only
/// `old_line_number`, unchanged lines carry both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    #[serde(rename = "type")]
    pub line_type: DiffLineType,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_line_number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_line_number: Option<usize>,
}

// ============================================
// Todo list types
// ============================================

/// Todo item progress state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TodoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Pending => "pending",
            TodoStatus::InProgress => "in_progress",
            TodoStatus::Completed => "completed",
        }
    }
}

/// Todo item priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl TodoPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoPriority::High => "high",
            TodoPriority::Medium => "medium",
            TodoPriority::Low => "low",
        }
    }
}

/// One todo list entry.
///
/// Identifiers are optional: freshly created items either lack one or carry
/// a `temp-` marker until the agent assigns a stable id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TodoItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: String,
    pub status: TodoStatus,
    pub priority: TodoPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Kind of change between two todo list snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoChangeType {
    Add,
    Update,
    Delete,
}

/// One tracked change between todo list snapshots
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoChange {
    #[serde(rename = "type")]
    pub change_type: TodoChangeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<TodoItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<TodoItem>,
}

/// How a todo-write invocation changed the list as a whole.
///
/// Classification is a pure function of todo-identifier shape; see the
/// todo-write parser for the exact tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoOperation {
    Create,
    Update,
    Replace,
    Clear,
}

impl TodoOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoOperation::Create => "create",
            TodoOperation::Update => "update",
            TodoOperation::Replace => "replace",
            TodoOperation::Clear => "clear",
        }
    }
}

// ============================================
// Directory entries
// ============================================

/// Kind of a normalized directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirEntryKind {
    File,
    Directory,
}

/// A normalized directory listing entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirEntry {
    pub name: String,
    pub kind: DirEntryKind,
}
