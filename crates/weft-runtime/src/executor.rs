//! Statement execution.
//!
//! Parallel branches are polled by a `FuturesUnordered` on the caller's task
//! rather than spawned. Branches therefore only interleave at await points
//! (an in-flight invocation or the fan-in itself), and every branch shares
//! the same borrowed statement tree and bindings store.

use futures::FutureExt;
use futures::StreamExt;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use weft_config::FailureMode;
use weft_workflow::{Bindings, Invocation, Parallel, Sequence, Statement};

use crate::error::RuntimeError;
use crate::events::{ExecutionEvent, ExecutionNotifier};
use crate::invoker::{InvokeOptions, Invoker};
use crate::runtime::RuntimeConfig;

/// Interprets statements for a single workflow run.
pub(crate) struct Executor<'a> {
  pub invoker: &'a dyn Invoker,
  pub notifier: &'a dyn ExecutionNotifier,
  pub config: &'a RuntimeConfig,
  pub execution_id: &'a str,
}

impl Executor<'_> {
  /// Execute a statement against `bindings` within the `cancel` scope.
  pub fn execute<'s>(
    &'s self,
    statement: &'s Statement,
    bindings: &'s Bindings,
    cancel: &'s CancellationToken,
  ) -> BoxFuture<'s, Result<(), RuntimeError>> {
    async move {
      match statement {
        Statement::Invocation(invocation) => {
          self.execute_invocation(invocation, bindings, cancel).await
        }
        Statement::Sequence(sequence) => self.execute_sequence(sequence, bindings, cancel).await,
        Statement::Parallel(parallel) => self.execute_parallel(parallel, bindings, cancel).await,
        Statement::Noop => Ok(()),
      }
    }
    .boxed()
  }

  async fn execute_sequence(
    &self,
    sequence: &Sequence,
    bindings: &Bindings,
    cancel: &CancellationToken,
  ) -> Result<(), RuntimeError> {
    for element in &sequence.elements {
      self.execute(element, bindings, cancel).await?;
    }
    Ok(())
  }

  async fn execute_parallel(
    &self,
    parallel: &Parallel,
    bindings: &Bindings,
    cancel: &CancellationToken,
  ) -> Result<(), RuntimeError> {
    if parallel.branches.is_empty() {
      return Ok(());
    }

    // Cancelling this scope reaches every branch, but not the caller's siblings.
    let scope = cancel.child_token();

    let mut pending: FuturesUnordered<_> = parallel
      .branches
      .iter()
      .map(|branch| self.execute(branch, bindings, &scope))
      .collect();

    let aggregate = matches!(self.config.failure_mode, FailureMode::Aggregate);
    let mut first: Option<RuntimeError> = None;
    let mut later = Vec::new();

    // Drain every branch, even after cancelling, so none is still touching
    // the bindings store when we return.
    while let Some(result) = pending.next().await {
      let Err(e) = result else {
        continue;
      };

      if first.is_none() {
        warn!(
          execution_id = %self.execution_id,
          error = %e,
          remaining = pending.len(),
          "parallel branch failed, cancelling siblings"
        );
        scope.cancel();
        first = Some(e);
      } else if aggregate {
        later.push(e);
      } else if !e.is_cancelled() {
        debug!(
          execution_id = %self.execution_id,
          error = %e,
          "discarding later parallel failure"
        );
      }
    }

    match first {
      None => Ok(()),
      Some(first) if aggregate => Err(aggregate_failures(first, later)),
      Some(first) => Err(first),
    }
  }

  async fn execute_invocation(
    &self,
    invocation: &Invocation,
    bindings: &Bindings,
    cancel: &CancellationToken,
  ) -> Result<(), RuntimeError> {
    if cancel.is_cancelled() {
      debug!(
        execution_id = %self.execution_id,
        invocation = %invocation.name,
        "skipping invocation in cancelled scope"
      );
      return Err(RuntimeError::Cancelled);
    }

    let inputs = bindings.resolve(&invocation.arguments);
    let options = InvokeOptions {
      timeout: invocation.timeout.unwrap_or(self.config.default_timeout),
    };

    info!(
      execution_id = %self.execution_id,
      invocation = %invocation.name,
      inputs = ?inputs,
      timeout = ?options.timeout,
      "invocation_started"
    );
    self.notifier.notify(ExecutionEvent::InvocationStarted {
      execution_id: self.execution_id.to_string(),
      name: invocation.name.clone(),
      inputs: inputs.clone(),
    });

    // A failure that is already available when the scope is cancelled is
    // still reported; a value is dropped so a cancelled scope never writes.
    let result = tokio::select! {
      biased;
      result = self.invoker.invoke(&invocation.name, inputs, &options) => {
        result.map_err(|source| RuntimeError::Invocation {
          name: invocation.name.clone(),
          source,
        })
      }
      _ = cancel.cancelled() => Err(RuntimeError::Cancelled),
    };
    let result = match result {
      Ok(_) if cancel.is_cancelled() => Err(RuntimeError::Cancelled),
      other => other,
    };

    match result {
      Ok(output) => {
        if let Some(key) = &invocation.result {
          bindings.insert(key.clone(), output.clone());
        }

        info!(
          execution_id = %self.execution_id,
          invocation = %invocation.name,
          result = ?invocation.result,
          output = %output,
          "invocation_completed"
        );
        self.notifier.notify(ExecutionEvent::InvocationCompleted {
          execution_id: self.execution_id.to_string(),
          name: invocation.name.clone(),
          output,
        });
        Ok(())
      }
      Err(e) => {
        if e.is_cancelled() {
          warn!(
            execution_id = %self.execution_id,
            invocation = %invocation.name,
            "invocation cancelled"
          );
        } else {
          error!(
            execution_id = %self.execution_id,
            invocation = %invocation.name,
            error = %e,
            "invocation_failed"
          );
        }
        self.notifier.notify(ExecutionEvent::InvocationFailed {
          execution_id: self.execution_id.to_string(),
          name: invocation.name.clone(),
          error: e.to_string(),
        });
        Err(e)
      }
    }
  }
}

/// Merges the failures of one parallel block, leaving out cancellations.
fn aggregate_failures(first: RuntimeError, later: Vec<RuntimeError>) -> RuntimeError {
  let mut failures: Vec<RuntimeError> = std::iter::once(first)
    .chain(later)
    .filter(|e| !e.is_cancelled())
    .collect();

  match failures.len() {
    // Every branch was cancelled from outside this block.
    0 => RuntimeError::Cancelled,
    1 => failures.remove(0),
    _ => RuntimeError::Parallel { failures },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::InvokeError;

  fn failed(name: &str) -> RuntimeError {
    RuntimeError::Invocation {
      name: name.to_string(),
      source: InvokeError::failed("boom"),
    }
  }

  #[test]
  fn test_aggregate_failures_skips_cancellations() {
    assert_eq!(
      aggregate_failures(failed("X"), vec![RuntimeError::Cancelled, failed("Z")]),
      RuntimeError::Parallel {
        failures: vec![failed("X"), failed("Z")]
      }
    );
    assert_eq!(
      aggregate_failures(failed("X"), vec![RuntimeError::Cancelled]),
      failed("X")
    );
    assert_eq!(
      aggregate_failures(RuntimeError::Cancelled, vec![RuntimeError::Cancelled]),
      RuntimeError::Cancelled
    );
  }
}
