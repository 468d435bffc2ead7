//! CLI entry point. Parses arguments, loads config, builds the real VCS and
//! worker adapters, and drives one orchestrator run.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use governator::config::Config;
use governator::controller::{self, RunDeps};
use governator::role_select::FirstAvailableRoleSelector;
use governator::telemetry::{self, LogFormat};
use governator::worker::SubprocessWorkerAdapter;
use governator_core::store;
use governator_vcs::GitCli;

/// Task-execution orchestrator for agent-driven software development.
#[derive(Debug, Parser)]
#[command(name = "governator", version, about)]
struct Cli {
    /// Repository root; defaults to the current directory.
    #[arg(long, global = true, default_value = ".")]
    repo_root: PathBuf,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Runs the resume controller and every stage executor once.
    Run {
        /// Shell command that invokes the agent; run for every worker dispatch.
        #[arg(long, env = "GOVERNATOR_AGENT_COMMAND")]
        agent_command: String,
    },
    /// Prints a summary of the current task index without mutating it.
    Status,
    /// Writes an empty task index at `<repo_root>/_governator/task-index.json`.
    Init,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.log_format);

    match cli.command {
        Commands::Run { agent_command } => run(&cli.repo_root, agent_command),
        Commands::Status => status(&cli.repo_root),
        Commands::Init => init(&cli.repo_root),
    }
}

fn run(repo_root: &PathBuf, agent_command: String) -> anyhow::Result<()> {
    let cfg = Config::load(repo_root)?;
    let index_path = repo_root.join(store::INDEX_RELATIVE_PATH);
    let mut index = store::load(&index_path)?
        .ok_or_else(|| anyhow::anyhow!("no task index at {}; run `governator init` first", index_path.display()))?;

    let vcs = GitCli::new();
    let worker = SubprocessWorkerAdapter { command: agent_command };
    let role_selector = FirstAvailableRoleSelector;
    let available_roles: Vec<String> = vec!["implementer".to_string()];
    let auditor = governator::audit::StdoutAuditSink;

    let deps = RunDeps {
        vcs: &vcs,
        worker: &worker,
        role_selector: &role_selector,
        available_roles: &available_roles,
        auditor: &auditor,
    };

    let result = controller::run(&mut index, repo_root, &cfg, &deps)?;
    println!("{}", result.message);
    Ok(())
}

fn status(repo_root: &PathBuf) -> anyhow::Result<()> {
    let index_path = repo_root.join(store::INDEX_RELATIVE_PATH);
    match store::load(&index_path)? {
        None => println!("no task index at {}", index_path.display()),
        Some(index) => {
            for task in &index.tasks {
                println!("{}\t{:?}\t{}", task.id, task.state, task.title);
            }
        }
    }
    Ok(())
}

fn init(repo_root: &PathBuf) -> anyhow::Result<()> {
    let index_path = repo_root.join(store::INDEX_RELATIVE_PATH);
    if store::load(&index_path)?.is_some() {
        anyhow::bail!("task index already exists at {}", index_path.display());
    }
    let index = governator_core::Index {
        schema_version: 1,
        digests: String::new(),
        tasks: Vec::new(),
    };
    store::save_atomic(&index, &index_path)?;
    println!("wrote empty task index to {}", index_path.display());
    Ok(())
}
