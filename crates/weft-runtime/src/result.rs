//! Execution result types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::RuntimeError;

/// Result of a successful workflow execution.
///
/// Values written by invocations are not part of the result; they live in
/// the bindings store, which is discarded when the run ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeResult {
  /// Unique execution ID.
  pub execution_id: String,
}

/// Everything a run produced, including the final bindings store.
#[derive(Debug)]
pub struct WorkflowRun {
  pub execution_id: String,
  pub outcome: Result<(), RuntimeError>,
  /// Store content at the end of the run, whether it succeeded or not.
  pub bindings: HashMap<String, String>,
}

impl WorkflowRun {
  pub fn into_result(self) -> Result<InvokeResult, RuntimeError> {
    self.outcome.map(|()| InvokeResult {
      execution_id: self.execution_id,
    })
  }
}
