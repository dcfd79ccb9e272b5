//! Output shape analysis
//!
//! Tool results arrive as arbitrary decoded JSON. The analyzer classifies a
//! value into a display mode plus structural flags so the rendering layer
//! can pick a presentation without re-inspecting the value. One analyzer
//! instance is shared by every parser that needs display hints.

use crate::config::AnalyzerConfig;
use serde_json::Value;

/// How a decoded output value should be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    Empty,
    Text,
    Json,
    Table,
    List,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Empty => "empty",
            DisplayMode::Text => "text",
            DisplayMode::Json => "json",
            DisplayMode::Table => "table",
            DisplayMode::List => "list",
        }
    }
}

/// Classification of one decoded output value
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputShape {
    pub display_mode: DisplayMode,
    pub is_structured: bool,
    pub has_nested_data: bool,
    /// Element count for arrays, own-key count for objects, 0 otherwise
    pub key_count: usize,
    pub is_complex: bool,
    pub is_large: bool,
}

impl OutputShape {
    fn text(is_large: bool) -> Self {
        Self {
            display_mode: DisplayMode::Text,
            is_structured: false,
            has_nested_data: false,
            key_count: 0,
            is_complex: false,
            is_large,
        }
    }

    fn empty() -> Self {
        Self {
            display_mode: DisplayMode::Empty,
            is_structured: false,
            has_nested_data: false,
            key_count: 0,
            is_complex: false,
            is_large: false,
        }
    }
}

/// Heuristic classifier over arbitrary decoded output values.
///
/// Thresholds come from [`AnalyzerConfig`]; the defaults are the values the
/// rendering fixtures were built against.
#[derive(Debug, Clone, Default)]
pub struct ShapeAnalyzer {
    config: AnalyzerConfig,
}

impl ShapeAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Classify a decoded output value.
    pub fn analyze(&self, output: &Value) -> OutputShape {
        match output {
            Value::Null => OutputShape::empty(),
            Value::String(text) => OutputShape::text(text.len() > self.config.large_text_chars),
            Value::Array(items) => {
                let tabular = items.iter().any(|item| item.is_object());
                OutputShape {
                    display_mode: if tabular {
                        DisplayMode::Table
                    } else {
                        DisplayMode::List
                    },
                    is_structured: true,
                    has_nested_data: tabular,
                    key_count: items.len(),
                    is_complex: tabular && items.len() > self.config.complex_table_rows,
                    is_large: items.len() > self.config.large_list_items,
                }
            }
            Value::Object(map) => {
                let nested = map.values().any(|value| value.is_object());
                OutputShape {
                    display_mode: DisplayMode::Json,
                    is_structured: true,
                    has_nested_data: nested,
                    key_count: map.len(),
                    is_complex: nested || map.len() > self.config.complex_object_keys,
                    is_large: map.len() > self.config.large_object_keys,
                }
            }
            // Bools and numbers render as plain text
            _ => OutputShape::text(false),
        }
    }

    /// Classify with decode-then-reclassify for string values.
    ///
    /// A string holding valid structured data is classified as that
    /// structure; a decode failure falls back to text classification of
    /// the original string. The fallback is expected behavior, not an
    /// error path.
    pub fn analyze_decoded(&self, output: &Value) -> OutputShape {
        if let Value::String(text) = output {
            if let Some(decoded) = decode_structured_text(text) {
                return self.analyze(&decoded);
            }
        }
        self.analyze(output)
    }
}

/// Decode a string that holds JSON structured data.
///
/// Only objects and arrays count: a string like `"42"` stays text even
/// though it parses as JSON.
pub fn decode_structured_text(text: &str) -> Option<Value> {
    let trimmed = text.trim_start();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return None;
    }
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(|value| value.is_object() || value.is_array())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn analyzer() -> ShapeAnalyzer {
        ShapeAnalyzer::default()
    }

    #[test]
    fn test_null_is_empty() {
        let shape = analyzer().analyze(&Value::Null);
        assert_eq!(shape.display_mode, DisplayMode::Empty);
        assert!(!shape.is_structured);
        assert_eq!(shape.key_count, 0);
    }

    #[test]
    fn test_string_thresholds() {
        let shape = analyzer().analyze(&json!("short"));
        assert_eq!(shape.display_mode, DisplayMode::Text);
        assert!(!shape.is_large);

        let shape = analyzer().analyze(&json!("x".repeat(1001)));
        assert!(shape.is_large);
    }

    #[test]
    fn test_empty_array_is_list() {
        let shape = analyzer().analyze(&json!([]));
        assert_eq!(shape.display_mode, DisplayMode::List);
        assert_eq!(shape.key_count, 0);
        assert!(!shape.is_complex);
        assert!(shape.is_structured);
    }

    #[test]
    fn test_array_of_objects_is_table() {
        let rows: Vec<Value> = (0..6).map(|i| json!({"n": i})).collect();
        let shape = analyzer().analyze(&Value::Array(rows));
        assert_eq!(shape.display_mode, DisplayMode::Table);
        assert!(shape.has_nested_data);
        assert!(shape.is_complex, "6 rows exceeds the 5-row threshold");
        assert!(!shape.is_large, "6 items is under the 10-item threshold");
    }

    #[test]
    fn test_scalar_array_is_list_even_when_long() {
        let items: Vec<Value> = (0..11).map(|i| json!(i)).collect();
        let shape = analyzer().analyze(&Value::Array(items));
        assert_eq!(shape.display_mode, DisplayMode::List);
        assert!(!shape.is_complex);
        assert!(shape.is_large);
    }

    #[test]
    fn test_empty_object_is_json() {
        let shape = analyzer().analyze(&json!({}));
        assert_eq!(shape.display_mode, DisplayMode::Json);
        assert_eq!(shape.key_count, 0);
        assert!(!shape.has_nested_data);
    }

    #[test]
    fn test_nested_object_is_complex() {
        let shape = analyzer().analyze(&json!({"outer": {"inner": 1}}));
        assert!(shape.has_nested_data);
        assert!(shape.is_complex);
        assert!(!shape.is_large);
    }

    #[test]
    fn test_flat_object_complexity_by_key_count() {
        let mut map = serde_json::Map::new();
        for i in 0..11 {
            map.insert(format!("k{}", i), json!(i));
        }
        let shape = analyzer().analyze(&Value::Object(map));
        assert!(shape.is_complex, "11 keys exceeds the 10-key threshold");
        assert!(!shape.is_large, "11 keys is under the 20-key threshold");
    }

    #[test]
    fn test_primitives_are_text() {
        assert_eq!(analyzer().analyze(&json!(42)).display_mode, DisplayMode::Text);
        assert_eq!(
            analyzer().analyze(&json!(true)).display_mode,
            DisplayMode::Text
        );
    }

    #[test]
    fn test_decode_then_reclassify() {
        let shape = analyzer().analyze_decoded(&json!("{\"a\": 1}"));
        assert_eq!(shape.display_mode, DisplayMode::Json);
        assert_eq!(shape.key_count, 1);
    }

    #[test]
    fn test_decode_failure_falls_back_to_text() {
        let shape = analyzer().analyze_decoded(&json!("{not json"));
        assert_eq!(shape.display_mode, DisplayMode::Text);
    }

    #[test]
    fn test_scalar_json_strings_stay_text() {
        assert!(decode_structured_text("42").is_none());
        assert!(decode_structured_text("\"quoted\"").is_none());
        assert!(decode_structured_text("[1, 2]").is_some());
    }
}
