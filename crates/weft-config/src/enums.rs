use serde::{Deserialize, Serialize};

/// How a parallel block reports failures once its branches have drained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
  /// Return the first failure observed; later failures are discarded.
  #[default]
  FirstObserved,
  /// Return every non-cancellation failure in the order observed.
  Aggregate,
}
