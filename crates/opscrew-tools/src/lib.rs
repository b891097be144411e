//! Tool declarations and invocation for the opscrew pipeline.
//!
//! A tool is a narrow, synchronous-from-the-pipeline's-view capability an
//! agent may invoke while reasoning (e.g. reading the tail of a log file).
//! Tools read external resources but never touch the execution context —
//! only the pipeline writes there.
//!
//! # Main types
//!
//! - [`Tool`] — Trait all tools implement.
//! - [`ToolDescriptor`] — Name, description, and parameter schema advertised
//!   to the reasoning backend.
//! - [`ToolRegistry`] — The invoker: name → tool map with a single
//!   `invoke` entry point.
//! - [`TailLogTool`] — Built-in: last `n` lines of a text file.

/// Tool registry and invocation.
pub mod registry;
/// Built-in log-tail tool.
pub mod tail;
/// Tool trait and descriptor.
pub mod tool;

pub use registry::ToolRegistry;
pub use tail::TailLogTool;
pub use tool::{Tool, ToolDescriptor};

use std::sync::Arc;

/// Register the built-in tools into the given registry.
pub fn register_builtins(registry: &mut ToolRegistry) {
    registry.register(Arc::new(TailLogTool::new()));
}
