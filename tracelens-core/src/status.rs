//! Canonical tool status derivation
//!
//! Every per-tool parser derives status through [`map_status`], so the
//! precedence rules live in exactly one place.

use crate::content::ToolOutcome;
use crate::types::{NormalizedStatus, StatusDetails, ToolStatus};
use serde_json::Value;

/// Map raw result signals to a canonical status.
///
/// Precedence, highest first: interrupted, result absent (pending),
/// error (failed), otherwise completed. `original` is echoed verbatim,
/// never re-derived, so diagnostics keep the raw encoding the log
/// producer used.
pub fn map_status(
    is_error: bool,
    result_absent: bool,
    interrupted: bool,
    original: Value,
) -> ToolStatus {
    let normalized = if interrupted {
        NormalizedStatus::Interrupted
    } else if result_absent {
        NormalizedStatus::Pending
    } else if is_error {
        NormalizedStatus::Failed
    } else {
        NormalizedStatus::Completed
    };

    ToolStatus {
        normalized,
        original,
        details: interrupted.then_some(StatusDetails { interrupted: true }),
    }
}

/// Derive status for an optional correlated outcome.
///
/// Convenience wrapper every parser uses: pending when the outcome is
/// absent, otherwise mapped from the outcome's flags with the raw
/// `is_error` signal echoed as `original`.
pub fn status_for(outcome: Option<&ToolOutcome>) -> ToolStatus {
    match outcome {
        None => map_status(false, true, false, Value::Null),
        Some(outcome) => map_status(
            outcome.is_error,
            false,
            detect_interrupted(outcome),
            Value::Bool(outcome.is_error),
        ),
    }
}

/// Check whether an outcome carries an interruption marker.
///
/// Producers flag interruption either inside the decoded output object or
/// on the side channel; both spellings mean the operator cut the tool off.
pub fn detect_interrupted(outcome: &ToolOutcome) -> bool {
    let flagged = |value: &Value| {
        value
            .get("interrupted")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    };

    flagged(&outcome.content) || outcome.side_channel.as_ref().is_some_and(flagged)
}
