use std::collections::HashMap;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use weft_config::{FailureMode, WorkflowDef};
use weft_runtime::{InvokeOptions, Invoker, Runtime, RuntimeConfig};

mod units;

/// Weft - a declarative workflow statement interpreter
#[derive(Parser)]
#[command(name = "weft")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Default invocation timeout in milliseconds
  #[arg(long, global = true, default_value_t = RuntimeConfig::DEFAULT_TIMEOUT.as_millis() as u64)]
  timeout_ms: u64,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run a workflow or a single unit of work
  Run {
    #[command(subcommand)]
    target: RunTarget,
  },

  /// Resolve a workflow file and print the statement tree
  Validate {
    /// Path to the workflow file (YAML or JSON)
    workflow_file: PathBuf,
  },

  /// List the built-in units of work
  Units,
}

#[derive(Subcommand)]
enum RunTarget {
  /// Run an entire workflow
  Workflow {
    /// Path to the workflow file (YAML or JSON)
    workflow_file: PathBuf,

    /// Override or add an initial variable (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_variable)]
    variables: Vec<(String, String)>,

    /// Report every failed parallel branch instead of only the first
    #[arg(long)]
    aggregate_failures: bool,

    /// Print the final bindings store as JSON
    #[arg(long)]
    print_bindings: bool,
  },

  /// Invoke a single built-in unit of work
  Unit {
    /// Unit name
    name: String,

    /// Positional inputs
    inputs: Vec<String>,
  },
}

fn main() -> Result<()> {
  init_tracing();

  let cli = Cli::parse();
  let default_timeout = Duration::from_millis(cli.timeout_ms);

  match cli.command {
    Some(Commands::Run { target }) => match target {
      RunTarget::Workflow {
        workflow_file,
        variables,
        aggregate_failures,
        print_bindings,
      } => {
        let config = RuntimeConfig {
          default_timeout,
          failure_mode: if aggregate_failures {
            FailureMode::Aggregate
          } else {
            FailureMode::FirstObserved
          },
        };
        run_workflow(workflow_file, variables, config, print_bindings)?;
      }
      RunTarget::Unit { name, inputs } => {
        run_unit(name, inputs, default_timeout)?;
      }
    },
    Some(Commands::Validate { workflow_file }) => {
      validate(workflow_file)?;
    }
    Some(Commands::Units) => {
      for name in units::builtin().names() {
        println!("{}", name);
      }
    }
    None => {
      println!("weft - use --help to see available commands");
    }
  }

  Ok(())
}

fn init_tracing() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(io::stderr)
    .init();
}

fn run_workflow(
  workflow_file: PathBuf,
  variables: Vec<(String, String)>,
  config: RuntimeConfig,
  print_bindings: bool,
) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { run_workflow_async(workflow_file, variables, config, print_bindings).await })
}

async fn run_workflow_async(
  workflow_file: PathBuf,
  variables: Vec<(String, String)>,
  config: RuntimeConfig,
  print_bindings: bool,
) -> Result<()> {
  let workflow_def = WorkflowDef::load(&workflow_file)
    .with_context(|| format!("failed to load workflow file: {}", workflow_file.display()))?;

  let mut workflow = weft_workflow::resolve(workflow_def).context("failed to resolve workflow")?;

  eprintln!(
    "Loaded workflow: {} ({} invocations)",
    workflow.name,
    workflow.root.invocation_count()
  );

  // Stdin variables first, then --var flags, both over the file's variables
  workflow.variables.extend(read_variables_from_stdin()?);
  workflow.variables.extend(variables);

  let runtime = Runtime::new(Arc::new(units::builtin()), config);

  let cancel = CancellationToken::new();
  let ctrl_c = cancel.clone();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      eprintln!("Interrupted, cancelling workflow");
      ctrl_c.cancel();
    }
  });

  let run = runtime.run(&workflow, cancel).await;

  if print_bindings {
    let bindings: std::collections::BTreeMap<_, _> = run.bindings.iter().collect();
    println!("{}", serde_json::to_string_pretty(&bindings)?);
  }

  let result = run.into_result().context("workflow execution failed")?;
  eprintln!("Execution completed: {}", result.execution_id);

  Ok(())
}

fn run_unit(name: String, inputs: Vec<String>, timeout: Duration) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async {
    let registry = units::builtin();
    if !registry.contains(&name) {
      bail!("unknown unit '{}' (see `weft units`)", name);
    }

    let output = registry
      .invoke(&name, inputs, &InvokeOptions { timeout })
      .await
      .with_context(|| format!("unit '{}' failed", name))?;

    println!("{}", output);
    Ok(())
  })
}

fn validate(workflow_file: PathBuf) -> Result<()> {
  let workflow_def = WorkflowDef::load(&workflow_file)
    .with_context(|| format!("failed to load workflow file: {}", workflow_file.display()))?;
  let workflow = weft_workflow::resolve(workflow_def).context("failed to resolve workflow")?;

  eprintln!(
    "Workflow '{}' is valid ({} invocations)",
    workflow.workflow_id,
    workflow.root.invocation_count()
  );
  println!("{}", serde_json::to_string_pretty(&workflow)?);

  Ok(())
}

fn parse_variable(raw: &str) -> Result<(String, String), String> {
  let (key, value) = raw
    .split_once('=')
    .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
  if key.is_empty() {
    return Err(format!("empty variable name in '{}'", raw));
  }
  Ok((key.to_string(), value.to_string()))
}

fn read_variables_from_stdin() -> Result<HashMap<String, String>> {
  use std::io::IsTerminal;

  if io::stdin().is_terminal() {
    return Ok(HashMap::new());
  }

  let mut input = String::new();
  io::stdin()
    .read_to_string(&mut input)
    .context("failed to read variables from stdin")?;

  if input.trim().is_empty() {
    Ok(HashMap::new())
  } else {
    serde_json::from_str(&input).context("failed to parse variables JSON from stdin")
  }
}
