//! Runtime error types.

use std::time::Duration;

/// Failures reported by an [`Invoker`](crate::Invoker).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvokeError {
  /// The unit of work ran and returned an error.
  #[error("{message}")]
  Failed { message: String },

  /// The unit of work did not finish within its timeout.
  #[error("timed out after {timeout:?}")]
  Timeout { timeout: Duration },

  /// No unit of work is registered under the requested name.
  #[error("no unit of work registered as '{name}'")]
  NotRegistered { name: String },
}

impl InvokeError {
  pub fn failed(message: impl Into<String>) -> Self {
    Self::Failed {
      message: message.into(),
    }
  }
}

/// Errors that can occur while interpreting a workflow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
  /// Execution was cancelled, either by the caller or because a sibling
  /// parallel branch failed.
  #[error("execution cancelled")]
  Cancelled,

  /// A named invocation failed.
  #[error("invocation '{name}' failed: {source}")]
  Invocation {
    name: String,
    #[source]
    source: InvokeError,
  },

  /// Several parallel branches failed. Only produced by
  /// [`FailureMode::Aggregate`](crate::FailureMode::Aggregate).
  #[error("{} parallel branches failed: {}", .failures.len(), join_errors(.failures))]
  Parallel { failures: Vec<RuntimeError> },
}

impl RuntimeError {
  pub fn is_cancelled(&self) -> bool {
    matches!(self, Self::Cancelled)
  }
}

fn join_errors(errors: &[RuntimeError]) -> String {
  errors
    .iter()
    .map(|e| e.to_string())
    .collect::<Vec<_>>()
    .join("; ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_display() {
    let err = RuntimeError::Invocation {
      name: "A".to_string(),
      source: InvokeError::failed("boom"),
    };
    assert_eq!(err.to_string(), "invocation 'A' failed: boom");

    let err = RuntimeError::Parallel {
      failures: vec![
        err,
        RuntimeError::Invocation {
          name: "B".to_string(),
          source: InvokeError::Timeout {
            timeout: Duration::from_millis(5),
          },
        },
      ],
    };
    assert_eq!(
      err.to_string(),
      "2 parallel branches failed: invocation 'A' failed: boom; invocation 'B' failed: timed out after 5ms"
    );
  }
}
