use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::statement::Statement;

/// A resolved workflow ready for execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
  pub workflow_id: String,
  pub name: String,
  /// Initial content of the bindings store. Never mutated by a run.
  pub variables: HashMap<String, String>,
  pub root: Statement,
}

impl Workflow {
  pub const DEFAULT_ID: &'static str = "workflow";

  /// Build a workflow with the default id and name.
  pub fn new(variables: HashMap<String, String>, root: Statement) -> Self {
    Self {
      workflow_id: Self::DEFAULT_ID.to_string(),
      name: Self::DEFAULT_ID.to_string(),
      variables,
      root,
    }
  }
}
