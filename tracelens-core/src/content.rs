//! Content normalization and request/result correlation
//!
//! The first two stages of the pipeline:
//!
//! 1. **Normalizer**: coerces a record's free-form content field into an
//!    ordered block sequence. Total function, never fails.
//! 2. **Correlator**: locates the tool invocation block in a request record
//!    and its matching result block (by invocation id) in an optional result
//!    record, capturing the legacy `rawResult` side channel along the way.
//!
//! A missing invocation block is the only condition that surfaces as an
//! error ([`Error::MissingInvocation`]); a missing result block is not an
//! error, it means the invocation is still pending.

use crate::error::{Error, Result};
use crate::types::{BaseProps, ContentBlock, LogRecord, RawContent, ToolStatus};
use serde_json::Value;

/// Coerce a raw content field into an ordered block sequence.
///
/// A string becomes one text block, a single block is wrapped, a sequence
/// passes through, anything else yields an empty sequence.
pub fn normalize_content(content: Option<&RawContent>) -> Vec<ContentBlock> {
    match content {
        Some(RawContent::Text(text)) => vec![ContentBlock::Text { text: text.clone() }],
        Some(RawContent::Block(block)) => vec![block.clone()],
        Some(RawContent::Blocks(blocks)) => blocks.clone(),
        Some(RawContent::Other(_)) | None => Vec::new(),
    }
}

/// A located tool invocation block
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    /// Invocation identifier (ties the result block back to this call)
    pub id: String,
    /// Tool name as emitted by the agent
    pub name: String,
    /// Input parameter mapping, shape unknown
    pub input: Value,
}

/// A located tool result block plus its record's side channel
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    /// Decoded output value, shape unknown
    pub content: Value,
    pub is_error: bool,
    /// Legacy `rawResult` field from the result record, if present
    pub side_channel: Option<Value>,
}

/// Scan a record for the first tool invocation block whose name satisfies
/// the predicate.
pub fn find_tool_use(record: &LogRecord, accepts: impl Fn(&str) -> bool) -> Option<ToolInvocation> {
    normalize_content(record.content.as_ref())
        .into_iter()
        .find_map(|block| match block {
            ContentBlock::ToolUse { id, name, input } if accepts(&name) => {
                Some(ToolInvocation { id, name, input })
            }
            _ => None,
        })
}

/// Extract the invocation block for an exact tool name.
///
/// This is the one place extraction raises instead of degrading: a parser
/// asked to handle a record with no qualifying invocation block is a
/// structural defect, not format drift.
pub fn extract_tool_use(record: &LogRecord, tool_name: &str) -> Result<ToolInvocation> {
    find_tool_use(record, |name| name == tool_name).ok_or_else(|| Error::MissingInvocation {
        tool: tool_name.to_string(),
        record_id: record.id.clone(),
    })
}

/// Extract the first invocation block whose name satisfies the predicate.
///
/// Used by the generic unit, which matches a reserved name prefix rather
/// than an exact name. `tool_label` only feeds the error message.
pub fn extract_tool_use_matching(
    record: &LogRecord,
    tool_label: &str,
    accepts: impl Fn(&str) -> bool,
) -> Result<ToolInvocation> {
    find_tool_use(record, accepts).ok_or_else(|| Error::MissingInvocation {
        tool: tool_label.to_string(),
        record_id: record.id.clone(),
    })
}

/// Locate the result block matching an invocation id.
///
/// Returns `None` (pending) when the result record is absent or carries no
/// matching block. Purely a search over already-normalized data.
pub fn find_tool_result(record: Option<&LogRecord>, invocation_id: &str) -> Option<ToolOutcome> {
    let record = record?;

    normalize_content(record.content.as_ref())
        .into_iter()
        .find_map(|block| match block {
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
            } if tool_use_id == invocation_id => Some(ToolOutcome {
                content,
                is_error,
                side_channel: record.raw_result.clone(),
            }),
            _ => None,
        })
}

/// Assemble the base fields shared by every props record.
pub fn base_props(
    record: &LogRecord,
    invocation: &ToolInvocation,
    status: ToolStatus,
) -> BaseProps {
    BaseProps {
        id: invocation.id.clone(),
        correlation_id: record.id.clone(),
        timestamp: record.timestamp.clone(),
        parent_id: record.parent_id.clone(),
        status,
    }
}

// ============================================
// Loose input-field accessors
// ============================================
//
// Invocation input fields go missing or arrive with the wrong type;
// these accessors substitute defaults instead of failing.

/// String field, `None` when absent or wrong-typed
pub fn str_field(input: &Value, key: &str) -> Option<String> {
    input
        .get(key)
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

/// Unsigned integer field, `None` when absent or wrong-typed
pub fn u64_field(input: &Value, key: &str) -> Option<u64> {
    input.get(key).and_then(Value::as_u64)
}

/// Boolean field, `false` when absent or wrong-typed
pub fn bool_field(input: &Value, key: &str) -> bool {
    input.get(key).and_then(Value::as_bool).unwrap_or(false)
}
