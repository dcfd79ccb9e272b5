//! File-type inference for display
//!
//! Maps a file path's extension to the language tag the rendering layer
//! feeds its syntax highlighter. Pure, total, case-insensitive; anything
//! unrecognized is plaintext.

/// Fallback tag for unknown or missing extensions
pub const PLAINTEXT: &str = "plaintext";

/// Infer the display language for a file path.
pub fn infer_language(path: &str) -> &'static str {
    let extension = match path.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && !ext.contains('/') => ext.to_ascii_lowercase(),
        _ => return PLAINTEXT,
    };

    match extension.as_str() {
        "rs" => "rust",
        "ts" | "tsx" => "typescript",
        "js" | "jsx" | "mjs" => "javascript",
        "py" => "python",
        "go" => "go",
        "java" => "java",
        "c" | "h" => "c",
        "cpp" | "cc" | "hpp" => "cpp",
        "cs" => "csharp",
        "rb" => "ruby",
        "php" => "php",
        "swift" => "swift",
        "kt" => "kotlin",
        "scala" => "scala",
        "sh" | "bash" | "zsh" => "shell",
        "html" | "htm" => "html",
        "css" => "css",
        "scss" | "sass" => "scss",
        "json" | "jsonl" => "json",
        "yaml" | "yml" => "yaml",
        "toml" => "toml",
        "xml" => "xml",
        "md" | "markdown" => "markdown",
        "sql" => "sql",
        "vue" => "vue",
        "svelte" => "svelte",
        "dockerfile" => "dockerfile",
        "proto" => "protobuf",
        "graphql" | "gql" => "graphql",
        "lua" => "lua",
        "r" => "r",
        "ex" | "exs" => "elixir",
        "txt" | "log" => PLAINTEXT,
        _ => PLAINTEXT,
    }
}
