//! Resolution of authored definitions into the executable statement tree.

use std::time::Duration;

use weft_config::{InvocationDef, StatementDef, WorkflowDef};

use crate::error::WorkflowError;
use crate::statement::{Invocation, Parallel, Sequence, Statement};
use crate::workflow::Workflow;

/// Resolve a workflow definition into an executable workflow.
///
/// This process:
/// 1. Rejects statements that set more than one variant
/// 2. Turns statements with no variant into [`Statement::Noop`]
/// 3. Rejects invocations without a name
/// 4. Drops empty result bindings
pub fn resolve(def: WorkflowDef) -> Result<Workflow, WorkflowError> {
  let workflow_id = def
    .workflow_id
    .unwrap_or_else(|| Workflow::DEFAULT_ID.to_string());
  let name = def.name.unwrap_or_else(|| workflow_id.clone());
  let root = resolve_statement(def.root, "root")?;

  Ok(Workflow {
    workflow_id,
    name,
    variables: def.variables,
    root,
  })
}

fn resolve_statement(def: StatementDef, path: &str) -> Result<Statement, WorkflowError> {
  if def.variant_count() > 1 {
    return Err(WorkflowError::AmbiguousStatement {
      path: path.to_string(),
    });
  }

  let StatementDef {
    invocation,
    sequence,
    parallel,
  } = def;

  if let Some(invocation) = invocation {
    return resolve_invocation(invocation, &format!("{}.invocation", path)).map(Statement::from);
  }

  if let Some(sequence) = sequence {
    let elements = sequence
      .elements
      .into_iter()
      .enumerate()
      .map(|(i, element)| resolve_statement(element, &format!("{}.sequence[{}]", path, i)))
      .collect::<Result<Vec<_>, _>>()?;
    return Ok(Statement::Sequence(Sequence { elements }));
  }

  if let Some(parallel) = parallel {
    let branches = parallel
      .branches
      .into_iter()
      .enumerate()
      .map(|(i, branch)| resolve_statement(branch, &format!("{}.parallel[{}]", path, i)))
      .collect::<Result<Vec<_>, _>>()?;
    return Ok(Statement::Parallel(Parallel { branches }));
  }

  Ok(Statement::Noop)
}

fn resolve_invocation(def: InvocationDef, path: &str) -> Result<Invocation, WorkflowError> {
  if def.name.trim().is_empty() {
    return Err(WorkflowError::MissingInvocationName {
      path: path.to_string(),
    });
  }

  Ok(Invocation {
    name: def.name,
    arguments: def.arguments,
    result: def.result.filter(|r| !r.is_empty()),
    timeout: def.timeout_ms.map(Duration::from_millis),
  })
}
