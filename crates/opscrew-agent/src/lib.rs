//! Agent execution for the opscrew pipeline.
//!
//! An agent is a configured role (name, role text, goal, backstory) bound to
//! zero or more tools. Executing a task means assembling a reasoning request
//! from the agent's persona, the rendered task description, and every prior
//! task's output, then looping with the reasoning backend until it produces
//! final text — invoking tools on its behalf along the way.
//!
//! # Main types
//!
//! - [`AgentSpec`] — Immutable agent configuration.
//! - [`ModelConfig`] / [`LlmProvider`] — Reasoning backend selection.
//! - [`AgentExecutor`] — Runs one task for one agent.
//! - [`backends::LlmBackend`] — Trait a reasoning backend implements.

/// Reasoning backend implementations.
pub mod backends;
/// Model and provider configuration.
pub mod config;
/// Task execution loop.
pub mod executor;
/// Backend-facing client and message types.
pub mod llm;
/// Agent configuration record.
pub mod spec;

pub use config::{LlmProvider, ModelConfig};
pub use executor::{AgentExecutor, TaskPrompt};
pub use llm::{ChatMessage, ChatRole, LlmClient, LlmResponse};
pub use spec::AgentSpec;
