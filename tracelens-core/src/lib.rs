//! # tracelens-core
//!
//! Core library for tracelens - a normalizer for AI agent activity logs.
//!
//! This library provides:
//! - Domain types for log records, content blocks, and tool props
//! - Request/result correlation and status derivation
//! - Per-tool extraction parsers behind one dispatch registry
//! - Line diffs, output-shape analysis, and file-type inference
//! - Configuration management and logging infrastructure
//!
//! ## Architecture
//!
//! Normalization is a pure pass over record pairs:
//! - **Correlate:** match a result record's `tool_use_id` back to the
//!   invocation block that requested it
//! - **Derive status:** map the error flag, result presence, and interrupt
//!   marker to one normalized status
//! - **Extract:** hand the pair to the tool's parser for a fixed props shape
//!
//! The core holds no persistent state; every parse call builds its output
//! fresh from the two records it is given.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tracelens_core::{default_registry, Config};
//!
//! let config = Config::load().expect("failed to load config");
//! let registry = default_registry(config.analyzer);
//!
//! let request: tracelens_core::LogRecord = serde_json::from_str("...").unwrap();
//! if let Some(props) = registry.parse(&request, None) {
//!     println!("{}", props.base().status.normalized.as_str());
//! }
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use parsers::{default_registry, ParserRegistry, ToolParser, ToolProps};
pub use types::*;

// Public modules
pub mod config;
pub mod content;
pub mod diff;
pub mod error;
pub mod lang;
pub mod logging;
pub mod parsers;
pub mod shape;
pub mod status;
pub mod types;
