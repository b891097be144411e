//! End-to-end pipeline tests with a scripted reasoning backend.
//!
//! Covers the orchestration contract: strict declaration-order execution,
//! context accumulation, output persistence, fail-fast behavior, and
//! assembly-time configuration checks.

use async_trait::async_trait;
use opscrew_agent::backends::LlmBackend;
use opscrew_agent::{AgentExecutor, AgentSpec, ChatMessage, LlmResponse};
use opscrew_core::{OpscrewError, OpscrewResult, ToolCall};
use opscrew_pipeline::{Pipeline, PipelineBuilder, TaskSpec};
use opscrew_tools::{ToolDescriptor, ToolRegistry};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Backend that pops scripted outcomes and records every request it saw.
struct ScriptedBackend {
    script: Mutex<Vec<OpscrewResult<LlmResponse>>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedBackend {
    fn new(mut script: Vec<OpscrewResult<LlmResponse>>) -> Arc<Self> {
        script.reverse();
        Arc::new(Self {
            script: Mutex::new(script),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn request_text(&self, index: usize) -> String {
        self.requests.lock().unwrap()[index]
            .iter()
            .map(|m| m.content.clone())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

struct BackendHandle(Arc<ScriptedBackend>);

#[async_trait]
impl LlmBackend for BackendHandle {
    async fn chat(
        &self,
        _system_prompt: &str,
        messages: &[ChatMessage],
        _tools: &[ToolDescriptor],
    ) -> OpscrewResult<LlmResponse> {
        self.0.requests.lock().unwrap().push(messages.to_vec());
        self.0
            .script
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(OpscrewError::Http("script exhausted".to_string())))
    }
}

fn done(text: &str) -> OpscrewResult<LlmResponse> {
    Ok(LlmResponse::Done(text.to_string()))
}

fn analyst(name: &str) -> AgentSpec {
    AgentSpec {
        name: name.to_string(),
        role: "Fleet Health Analyst".to_string(),
        goal: "Summarize operational state".to_string(),
        backstory: "Writes crisp status updates.".to_string(),
        tools: vec![],
    }
}

fn task(name: &str, agent: &str, output_file: Option<PathBuf>) -> TaskSpec {
    TaskSpec {
        name: name.to_string(),
        description: format!("Work on step {name} for {{log_path}}"),
        expected_output: "Markdown".to_string(),
        agent: agent.to_string(),
        output_file,
    }
}

fn inputs() -> HashMap<String, String> {
    HashMap::from([("log_path".to_string(), "fleet_health.log".to_string())])
}

fn pipeline(
    backend: &Arc<ScriptedBackend>,
    agents: Vec<AgentSpec>,
    tasks: Vec<TaskSpec>,
    tools: Arc<ToolRegistry>,
) -> OpscrewResult<Pipeline> {
    let executor = AgentExecutor::from_backend(
        Box::new(BackendHandle(backend.clone())),
        tools.clone(),
        5,
    );
    PipelineBuilder::new()
        .agents(agents)
        .tasks(tasks)
        .build(executor, &tools)
}

// --- Ordering and context accumulation ---

#[tokio::test]
async fn run_records_one_output_per_task_in_declaration_order() {
    let backend = ScriptedBackend::new(vec![done("out-1"), done("out-2"), done("out-3")]);
    let p = pipeline(
        &backend,
        vec![analyst("analyst")],
        vec![
            task("first", "analyst", None),
            task("second", "analyst", None),
            task("third", "analyst", None),
        ],
        Arc::new(ToolRegistry::new()),
    )
    .unwrap();

    let result = p.run(inputs()).await.unwrap();

    assert_eq!(result.context.completed_count(), 3);
    let names: Vec<&str> = result
        .context
        .outputs()
        .iter()
        .map(|o| o.task.as_str())
        .collect();
    assert_eq!(names, ["first", "second", "third"]);
    assert_eq!(result.final_output, "out-3");
    assert_eq!(result.context.output_of("second"), Some("out-2"));
}

#[tokio::test]
async fn later_task_sees_earlier_output_but_never_a_later_one() {
    let backend = ScriptedBackend::new(vec![done("incident: disk full on web-03"), done("fleet degraded")]);
    let p = pipeline(
        &backend,
        vec![analyst("analyst")],
        vec![
            task("triage", "analyst", None),
            task("summary", "analyst", None),
        ],
        Arc::new(ToolRegistry::new()),
    )
    .unwrap();

    p.run(inputs()).await.unwrap();

    let first_prompt = backend.request_text(0);
    let second_prompt = backend.request_text(1);

    assert!(!first_prompt.contains("previously completed tasks"));
    assert!(!first_prompt.contains("fleet degraded"));
    assert!(second_prompt.contains("incident: disk full on web-03"));
}

// --- Persistence ---

#[tokio::test]
async fn output_file_is_truncated_then_written_byte_for_byte() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("incident_report.md");
    std::fs::write(&report, "stale content from a previous run, much longer than the new one")
        .unwrap();

    let backend = ScriptedBackend::new(vec![done("# Incident\n\ndisk full on web-03\n")]);
    let p = pipeline(
        &backend,
        vec![analyst("analyst")],
        vec![task("triage", "analyst", Some(report.clone()))],
        Arc::new(ToolRegistry::new()),
    )
    .unwrap();

    let result = p.run(inputs()).await.unwrap();

    let persisted = std::fs::read_to_string(&report).unwrap();
    assert_eq!(persisted, "# Incident\n\ndisk full on web-03\n");
    assert_eq!(persisted, result.context.output_of("triage").unwrap());
}

#[tokio::test]
async fn missing_parent_directories_are_created() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("reports").join("fleet_summary.md");

    let backend = ScriptedBackend::new(vec![done("all green")]);
    let p = pipeline(
        &backend,
        vec![analyst("analyst")],
        vec![task("summary", "analyst", Some(nested.clone()))],
        Arc::new(ToolRegistry::new()),
    )
    .unwrap();

    p.run(inputs()).await.unwrap();
    assert_eq!(std::fs::read_to_string(&nested).unwrap(), "all green");
}

// --- Failure behavior ---

#[tokio::test]
async fn mid_pipeline_failure_aborts_and_keeps_completed_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let first_file = dir.path().join("first.md");
    let third_file = dir.path().join("third.md");

    let backend = ScriptedBackend::new(vec![
        done("out-1"),
        Err(OpscrewError::Http("backend timeout".to_string())),
    ]);
    let p = pipeline(
        &backend,
        vec![analyst("analyst")],
        vec![
            task("first", "analyst", Some(first_file.clone())),
            task("second", "analyst", None),
            task("third", "analyst", Some(third_file.clone())),
        ],
        Arc::new(ToolRegistry::new()),
    )
    .unwrap();

    let err = p.run(inputs()).await.unwrap_err();
    assert!(matches!(err, OpscrewError::Agent(_)));
    assert!(err.to_string().contains("task 'second'"));
    assert!(err.to_string().contains("backend timeout"));

    // Task 1's persisted output survives; task 3 never ran.
    assert_eq!(std::fs::read_to_string(&first_file).unwrap(), "out-1");
    assert!(!third_file.exists());
    assert_eq!(backend.request_count(), 2);
}

// --- Assembly-time validation ---

#[tokio::test]
async fn undeclared_agent_fails_assembly_with_zero_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("report.md");

    let backend = ScriptedBackend::new(vec![done("never used")]);
    let result = pipeline(
        &backend,
        vec![analyst("analyst")],
        vec![task("triage", "ghost_agent", Some(report.clone()))],
        Arc::new(ToolRegistry::new()),
    );

    match result {
        Err(OpscrewError::Config(msg)) => assert!(msg.contains("ghost_agent")),
        other => panic!("expected Config error, got {:?}", other.err()),
    }
    assert_eq!(backend.request_count(), 0);
    assert!(!report.exists());
}

#[tokio::test]
async fn duplicate_task_names_are_rejected() {
    let backend = ScriptedBackend::new(vec![]);
    let result = pipeline(
        &backend,
        vec![analyst("analyst")],
        vec![task("triage", "analyst", None), task("triage", "analyst", None)],
        Arc::new(ToolRegistry::new()),
    );
    match result {
        Err(OpscrewError::Config(msg)) => assert!(msg.contains("duplicate task name")),
        other => panic!("expected Config error, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn colliding_output_paths_are_rejected() {
    let shared = PathBuf::from("shared_output.md");
    let backend = ScriptedBackend::new(vec![]);
    let result = pipeline(
        &backend,
        vec![analyst("analyst")],
        vec![
            task("triage", "analyst", Some(shared.clone())),
            task("summary", "analyst", Some(shared)),
        ],
        Arc::new(ToolRegistry::new()),
    );
    match result {
        Err(OpscrewError::Config(msg)) => assert!(msg.contains("shared_output.md")),
        other => panic!("expected Config error, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn unknown_tool_binding_is_rejected() {
    let mut sre = analyst("sre_agent");
    sre.tools = vec!["tail_log".to_string()];

    // Empty registry: tail_log is not registered.
    let backend = ScriptedBackend::new(vec![]);
    let result = pipeline(
        &backend,
        vec![sre],
        vec![task("triage", "sre_agent", None)],
        Arc::new(ToolRegistry::new()),
    );
    match result {
        Err(OpscrewError::Config(msg)) => assert!(msg.contains("tail_log")),
        other => panic!("expected Config error, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn empty_pipeline_is_rejected() {
    let backend = ScriptedBackend::new(vec![]);
    let result = pipeline(
        &backend,
        vec![analyst("analyst")],
        vec![],
        Arc::new(ToolRegistry::new()),
    );
    assert!(matches!(result, Err(OpscrewError::Config(_))));
}

// --- Tool flow through the full loop ---

#[tokio::test]
async fn tail_tool_result_reaches_the_backend_mid_task() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("fleet_health.log");
    std::fs::write(&log, "INFO boot\nWARN high latency on web-02\nERROR disk full on web-03\n")
        .unwrap();

    let mut tools = ToolRegistry::new();
    opscrew_tools::register_builtins(&mut tools);

    let mut sre = analyst("sre_agent");
    sre.tools = vec!["tail_log".to_string()];

    let backend = ScriptedBackend::new(vec![
        Ok(LlmResponse::ToolUse {
            content: None,
            tool_calls: vec![ToolCall::new(
                "call_1",
                "tail_log",
                serde_json::json!({"path": log.to_string_lossy(), "n": 20}),
            )],
        }),
        done("# Incident\n\ndisk full on web-03"),
    ]);

    let p = pipeline(
        &backend,
        vec![sre],
        vec![task("triage", "sre_agent", None)],
        Arc::new(tools),
    )
    .unwrap();

    let result = p.run(inputs()).await.unwrap();
    assert_eq!(result.final_output, "# Incident\n\ndisk full on web-03");

    // The follow-up request carries the tailed log lines.
    assert_eq!(backend.request_count(), 2);
    let follow_up = backend.request_text(1);
    assert!(follow_up.contains("ERROR disk full on web-03"));
    assert!(follow_up.contains("WARN high latency on web-02"));
}
