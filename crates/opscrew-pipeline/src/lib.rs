//! Sequential task orchestration for opscrew.
//!
//! A pipeline owns an ordered list of tasks and a registry of agents. It
//! runs tasks strictly in declaration order, making every completed task's
//! output available to later tasks, and persists each output to its
//! configured file before the next task begins.
//!
//! # Main types
//!
//! - [`TaskSpec`] — One ordered unit of work.
//! - [`PipelineBuilder`] — Validates configuration and assembles a pipeline.
//! - [`Pipeline`] — Runs the task sequence.
//! - [`RunResult`] — Final output plus the full execution context.

/// Pipeline assembly and configuration validation.
pub mod builder;
/// The sequential run loop.
pub mod engine;
/// Task and result types.
pub mod types;

pub use builder::PipelineBuilder;
pub use engine::Pipeline;
pub use types::{RunResult, TaskSpec};
