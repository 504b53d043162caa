//! Workflow runtime.
//!
//! The [`Runtime`] struct is the entry point for running workflows. It owns
//! the invoker, the event notifier, and the default invocation options, and
//! provides `execute(workflow, cancel)` to interpret a full statement tree.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};
use weft_config::FailureMode;
use weft_workflow::{Bindings, Workflow};

use crate::error::RuntimeError;
use crate::events::{ExecutionEvent, ExecutionNotifier, NoopNotifier};
use crate::executor::Executor;
use crate::invoker::Invoker;
use crate::result::{InvokeResult, WorkflowRun};

/// Configuration for the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
  /// Timeout applied to every invocation that does not set its own.
  pub default_timeout: Duration,
  /// How parallel blocks report failures.
  pub failure_mode: FailureMode,
}

impl RuntimeConfig {
  pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
}

impl Default for RuntimeConfig {
  fn default() -> Self {
    Self {
      default_timeout: Self::DEFAULT_TIMEOUT,
      failure_mode: FailureMode::default(),
    }
  }
}

/// The workflow runtime.
///
/// A runtime can execute any number of workflows, concurrently or not; each
/// run gets its own bindings store and execution ID.
pub struct Runtime {
  invoker: Arc<dyn Invoker>,
  notifier: Arc<dyn ExecutionNotifier>,
  config: RuntimeConfig,
}

impl Runtime {
  /// Create a runtime that calls units of work through `invoker`.
  pub fn new(invoker: Arc<dyn Invoker>, config: RuntimeConfig) -> Self {
    Self {
      invoker,
      notifier: Arc::new(NoopNotifier),
      config,
    }
  }

  /// Send execution events to `notifier`.
  pub fn with_notifier(mut self, notifier: Arc<dyn ExecutionNotifier>) -> Self {
    self.notifier = notifier;
    self
  }

  pub fn config(&self) -> &RuntimeConfig {
    &self.config
  }

  /// Execute the workflow.
  ///
  /// On success the result only carries the execution ID. Cancelling
  /// `cancel` stops the run at its next invocation boundary.
  pub async fn execute(
    &self,
    workflow: &Workflow,
    cancel: CancellationToken,
  ) -> Result<InvokeResult, RuntimeError> {
    self.run(workflow, cancel).await.into_result()
  }

  /// Execute the workflow and keep the final bindings store alongside the
  /// outcome.
  #[instrument(
    name = "workflow_execute",
    skip(self, workflow, cancel),
    fields(
      workflow_id = %workflow.workflow_id,
    )
  )]
  pub async fn run(&self, workflow: &Workflow, cancel: CancellationToken) -> WorkflowRun {
    let execution_id = uuid::Uuid::new_v4().to_string();

    info!(
      execution_id = %execution_id,
      workflow_id = %workflow.workflow_id,
      workflow_name = %workflow.name,
      variables = workflow.variables.len(),
      "workflow_started"
    );
    self.notifier.notify(ExecutionEvent::WorkflowStarted {
      execution_id: execution_id.clone(),
      workflow_id: workflow.workflow_id.clone(),
    });

    let bindings = Bindings::from_variables(&workflow.variables);
    let scope = cancel.child_token();

    let executor = Executor {
      invoker: self.invoker.as_ref(),
      notifier: self.notifier.as_ref(),
      config: &self.config,
      execution_id: &execution_id,
    };
    let outcome = executor.execute(&workflow.root, &bindings, &scope).await;

    match &outcome {
      Ok(()) => {
        info!(execution_id = %execution_id, "workflow_completed");
        self.notifier.notify(ExecutionEvent::WorkflowCompleted {
          execution_id: execution_id.clone(),
        });
      }
      Err(e) => {
        error!(execution_id = %execution_id, error = %e, "workflow_failed");
        self.notifier.notify(ExecutionEvent::WorkflowFailed {
          execution_id: execution_id.clone(),
          error: e.to_string(),
        });
      }
    }

    WorkflowRun {
      execution_id,
      outcome,
      bindings: bindings.snapshot(),
    }
  }
}
