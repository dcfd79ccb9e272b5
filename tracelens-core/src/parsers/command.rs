//! Command execution parser (`command-exec`)
//!
//! Result payloads for command runs appear in four historical encodings:
//! a structured `{stdout, stderr, exitCode}` object, the same object
//! JSON-encoded into a string, the same object on the `rawResult` side
//! channel, and a bare stdout string. All of them normalize to one
//! [`CommandProps`] shape.

use crate::content::{self, ToolOutcome};
use crate::error::Result;
use crate::shape::decode_structured_text;
use crate::status::{detect_interrupted, status_for};
use crate::types::{BaseProps, LogRecord};
use serde::Serialize;
use serde_json::Value;

use super::{extract_error_message, text_of, ToolParser, ToolProps};

/// Props for one command execution
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandProps {
    #[serde(flatten)]
    pub base: BaseProps,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub output: String,
    pub error_output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i64>,
    pub interrupted: bool,
}

/// Decoded structured command output
#[derive(Debug, Default)]
struct DecodedOutput {
    stdout: String,
    stderr: String,
    exit_code: Option<i64>,
}

/// Decode a value that looks like structured command output.
fn decode_object(value: &Value) -> Option<DecodedOutput> {
    let map = value.as_object()?;
    let known = ["stdout", "stderr", "exitCode", "exit_code"];
    if !known.iter().any(|key| map.contains_key(*key)) {
        return None;
    }

    Some(DecodedOutput {
        stdout: content::str_field(value, "stdout").unwrap_or_default(),
        stderr: content::str_field(value, "stderr").unwrap_or_default(),
        exit_code: value
            .get("exitCode")
            .or_else(|| value.get("exit_code"))
            .and_then(Value::as_i64),
    })
}

/// Ordered decoder fallbacks: structured content, JSON-encoded string,
/// side channel.
fn decode_output(outcome: &ToolOutcome) -> Option<DecodedOutput> {
    decode_object(&outcome.content)
        .or_else(|| {
            outcome
                .content
                .as_str()
                .and_then(decode_structured_text)
                .as_ref()
                .and_then(decode_object)
        })
        .or_else(|| outcome.side_channel.as_ref().and_then(decode_object))
}

pub struct CommandParser;

impl ToolParser for CommandParser {
    fn tool_name(&self) -> &'static str {
        "command-exec"
    }

    fn parse(&self, request: &LogRecord, result: Option<&LogRecord>) -> Result<ToolProps> {
        let invocation = content::extract_tool_use(request, self.tool_name())?;

        let command = content::str_field(&invocation.input, "command").unwrap_or_default();
        let description = content::str_field(&invocation.input, "description");

        let outcome = content::find_tool_result(result, &invocation.id);
        let status = status_for(outcome.as_ref());
        let interrupted = outcome.as_ref().is_some_and(detect_interrupted);

        let (output, error_output, exit_code) = match &outcome {
            None => (String::new(), String::new(), None),
            Some(outcome) => {
                let decoded = decode_output(outcome);
                if outcome.is_error {
                    let stderr = decoded
                        .as_ref()
                        .map(|d| d.stderr.clone())
                        .filter(|s| !s.is_empty());
                    (
                        decoded.as_ref().map(|d| d.stdout.clone()).unwrap_or_default(),
                        stderr.unwrap_or_else(|| extract_error_message(outcome)),
                        decoded.and_then(|d| d.exit_code),
                    )
                } else {
                    match decoded {
                        Some(decoded) => (decoded.stdout, decoded.stderr, decoded.exit_code),
                        // Legacy shape: the whole result is stdout text
                        None => (
                            text_of(&outcome.content).unwrap_or_default(),
                            String::new(),
                            None,
                        ),
                    }
                }
            }
        };

        Ok(ToolProps::CommandExec(CommandProps {
            base: content::base_props(request, &invocation, status),
            command,
            description,
            output,
            error_output,
            exit_code,
            interrupted,
        }))
    }
}
