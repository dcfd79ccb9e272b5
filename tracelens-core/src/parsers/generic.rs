//! Generic external-tool parser (`generic-integration`)
//!
//! External integrations register tools under the reserved
//! `generic-integration__<server>__<method>` name. With no tool-specific
//! schema to lean on, this unit passes the input through verbatim and asks
//! the shape analyzer for display hints on the output.

use crate::content::{self, ToolOutcome};
use crate::error::Result;
use crate::shape::{OutputShape, ShapeAnalyzer};
use crate::status::status_for;
use crate::types::{BaseProps, LogRecord};
use serde::Serialize;
use serde_json::Value;

use super::{extract_error_message, ToolParser, ToolProps};

/// Reserved name prefix for external integration tools
pub const GENERIC_TOOL_PREFIX: &str = "generic-integration";

/// Props for one external integration call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericProps {
    #[serde(flatten)]
    pub base: BaseProps,
    pub tool_name: String,
    pub server_name: String,
    pub method_name: String,
    pub input: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    pub shape: OutputShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Split `generic-integration__<server>__<method>` into its parts.
///
/// Extra `__` separators fold into the method name; missing segments
/// come back empty.
fn split_name(name: &str) -> (String, String) {
    let rest = name
        .strip_prefix(GENERIC_TOOL_PREFIX)
        .unwrap_or(name)
        .trim_start_matches("__");
    match rest.split_once("__") {
        Some((server, method)) => (server.to_string(), method.to_string()),
        None => (rest.to_string(), String::new()),
    }
}

fn output_value(outcome: &ToolOutcome) -> Value {
    if outcome.content.is_null() {
        outcome.side_channel.clone().unwrap_or(Value::Null)
    } else {
        outcome.content.clone()
    }
}

pub struct GenericParser {
    analyzer: ShapeAnalyzer,
}

impl GenericParser {
    pub fn new(analyzer: ShapeAnalyzer) -> Self {
        Self { analyzer }
    }
}

impl ToolParser for GenericParser {
    fn tool_name(&self) -> &'static str {
        GENERIC_TOOL_PREFIX
    }

    fn can_handle(&self, record: &LogRecord) -> bool {
        content::find_tool_use(record, |name| name.starts_with(GENERIC_TOOL_PREFIX)).is_some()
    }

    fn parse(&self, request: &LogRecord, result: Option<&LogRecord>) -> Result<ToolProps> {
        let invocation = content::extract_tool_use_matching(request, GENERIC_TOOL_PREFIX, |name| {
            name.starts_with(GENERIC_TOOL_PREFIX)
        })?;

        let (server_name, method_name) = split_name(&invocation.name);

        let outcome = content::find_tool_result(result, &invocation.id);
        let status = status_for(outcome.as_ref());

        let (output, error_message) = match &outcome {
            None => (None, None),
            Some(outcome) if outcome.is_error => (None, Some(extract_error_message(outcome))),
            Some(outcome) => (Some(output_value(outcome)), None),
        };

        let shape = self
            .analyzer
            .analyze_decoded(output.as_ref().unwrap_or(&Value::Null));

        Ok(ToolProps::Generic(GenericProps {
            base: content::base_props(request, &invocation, status),
            tool_name: invocation.name.clone(),
            server_name,
            method_name,
            input: invocation.input.clone(),
            output,
            shape,
            error_message,
        }))
    }
}
