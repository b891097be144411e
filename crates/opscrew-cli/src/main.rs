//! `opscrew` — run a configured agent pipeline against operational logs.

mod feeder;
mod watcher;

use clap::{Parser, Subcommand};
use feeder::LogFeeder;
use watcher::LogWatcher;
use opscrew_agent::{AgentExecutor, AgentSpec, ModelConfig};
use opscrew_pipeline::{Pipeline, PipelineBuilder, TaskSpec};
use opscrew_tools::ToolRegistry;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "opscrew", about = "opscrew — sequential agent pipeline for AIOps")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "opscrew.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline once and print the final output
    Run {
        /// Input values as key=value pairs (override config defaults)
        #[arg(short, long, value_name = "KEY=VALUE")]
        input: Vec<String>,
    },
    /// Assemble the pipeline and report configuration problems without running
    Check,
    /// Re-run the pipeline whenever the watched log file changes
    Watch {
        /// Poll interval in seconds (overrides config)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Stream entries from a source file into the watched log
    Seed {
        /// Source file to read entries from (overrides config)
        #[arg(long)]
        source: Option<PathBuf>,
        /// Target log file to append to (overrides config)
        #[arg(long)]
        target: Option<PathBuf>,
        /// Seconds between entries (overrides config)
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[derive(Deserialize)]
struct OpscrewConfig {
    model: ModelConfig,
    #[serde(default)]
    run: RunConfig,
    #[serde(default)]
    seed: SeedConfig,
    #[serde(default)]
    agents: Vec<AgentSpec>,
    #[serde(default)]
    tasks: Vec<TaskSpec>,
}

#[derive(Deserialize, Default)]
struct RunConfig {
    /// Default input mapping for every run.
    #[serde(default)]
    inputs: HashMap<String, String>,
    /// File whose growth triggers re-runs in `watch` mode.
    watch_file: Option<PathBuf>,
    #[serde(default = "default_watch_interval")]
    watch_interval_secs: u64,
}

#[derive(Deserialize)]
struct SeedConfig {
    #[serde(default = "default_seed_source")]
    source: PathBuf,
    #[serde(default = "default_seed_target")]
    target: PathBuf,
    #[serde(default = "default_seed_interval")]
    interval_secs: u64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            source: default_seed_source(),
            target: default_seed_target(),
            interval_secs: default_seed_interval(),
        }
    }
}

fn default_watch_interval() -> u64 {
    3
}
fn default_seed_source() -> PathBuf {
    PathBuf::from("logs_source.jsonl")
}
fn default_seed_target() -> PathBuf {
    PathBuf::from("fleet_health.log")
}
fn default_seed_interval() -> u64 {
    2
}

fn build_pipeline(config: &OpscrewConfig) -> anyhow::Result<Pipeline> {
    let mut registry = ToolRegistry::new();
    opscrew_tools::register_builtins(&mut registry);
    let tools = Arc::new(registry);

    let executor = AgentExecutor::new(config.model.clone(), tools.clone());
    let pipeline = PipelineBuilder::new()
        .agents(config.agents.iter().cloned())
        .tasks(config.tasks.iter().cloned())
        .build(executor, &tools)?;
    Ok(pipeline)
}

fn parse_inputs(defaults: &HashMap<String, String>, overrides: &[String]) -> anyhow::Result<HashMap<String, String>> {
    let mut inputs = defaults.clone();
    for pair in overrides {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            anyhow::anyhow!("invalid --input '{pair}': expected KEY=VALUE")
        })?;
        inputs.insert(key.to_string(), value.to_string());
    }
    Ok(inputs)
}

async fn run_once(pipeline: &Pipeline, inputs: HashMap<String, String>) -> anyhow::Result<()> {
    let result = pipeline.run(inputs).await?;
    info!(
        run_id = %result.run_id,
        tasks = result.context.completed_count(),
        "Run complete"
    );
    println!("{}", result.final_output);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config_str = tokio::fs::read_to_string(&cli.config).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to read config file '{}': {}",
            cli.config.display(),
            e
        )
    })?;
    let mut config: OpscrewConfig = toml::from_str(&config_str)?;

    // Credentials come from the environment when not set in config.
    if let Ok(key) = std::env::var("OPSCREW_API_KEY") {
        config.model.api_key = key;
    }

    match cli.command {
        Commands::Run { input } => {
            let pipeline = build_pipeline(&config)?;
            let inputs = parse_inputs(&config.run.inputs, &input)?;
            run_once(&pipeline, inputs).await?;
        }

        Commands::Check => {
            let pipeline = build_pipeline(&config)?;
            println!(
                "Configuration OK: {} agent(s), {} task(s)",
                config.agents.len(),
                pipeline.tasks().len()
            );
            for task in pipeline.tasks() {
                match &task.output_file {
                    Some(path) => {
                        println!("  {} -> {} (writes {})", task.name, task.agent, path.display());
                    }
                    None => println!("  {} -> {}", task.name, task.agent),
                }
            }
        }

        Commands::Watch { interval } => {
            let watch_file = config.run.watch_file.clone().ok_or_else(|| {
                anyhow::anyhow!("watch mode requires run.watch_file in the config")
            })?;
            let interval =
                Duration::from_secs(interval.unwrap_or(config.run.watch_interval_secs));
            let pipeline = build_pipeline(&config)?;
            let inputs = config.run.inputs.clone();

            let mut watcher = LogWatcher::new(watch_file);
            info!(file = %watcher.path().display(), "Watching for log changes");

            loop {
                if let Some(size) = watcher.poll().await {
                    info!(size, "Log changed, running pipeline");
                    if let Err(e) = run_once(&pipeline, inputs.clone()).await {
                        error!(error = %e, "Run failed, continuing to watch");
                    }
                }

                tokio::time::sleep(interval).await;
            }
        }

        Commands::Seed {
            source,
            target,
            interval,
        } => {
            let feeder = LogFeeder::new(
                source.unwrap_or(config.seed.source),
                target.unwrap_or(config.seed.target),
                Duration::from_secs(interval.unwrap_or(config.seed.interval_secs)),
            );
            let written = feeder.run().await?;
            println!("Seeded {written} log entries");
        }
    }

    Ok(())
}
