use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A node of the execution tree.
///
/// Statements are immutable once resolved and are only ever read during
/// execution, so parallel branches can borrow the same tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Statement {
  /// Call a named unit of work.
  Invocation(Invocation),
  /// Run elements one after another, stopping at the first failure.
  Sequence(Sequence),
  /// Run branches concurrently, cancelling the rest on the first failure.
  Parallel(Parallel),
  /// A statement with no variant populated. Succeeds without doing anything.
  Noop,
}

impl Statement {
  pub fn sequence(elements: impl IntoIterator<Item = Statement>) -> Self {
    Self::Sequence(Sequence {
      elements: elements.into_iter().collect(),
    })
  }

  pub fn parallel(branches: impl IntoIterator<Item = Statement>) -> Self {
    Self::Parallel(Parallel {
      branches: branches.into_iter().collect(),
    })
  }

  /// Total number of invocation nodes in this subtree.
  pub fn invocation_count(&self) -> usize {
    match self {
      Self::Invocation(_) => 1,
      Self::Sequence(sequence) => sequence.elements.iter().map(Self::invocation_count).sum(),
      Self::Parallel(parallel) => parallel.branches.iter().map(Self::invocation_count).sum(),
      Self::Noop => 0,
    }
  }
}

impl From<Invocation> for Statement {
  fn from(invocation: Invocation) -> Self {
    Self::Invocation(invocation)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
  pub elements: Vec<Statement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parallel {
  pub branches: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
  /// Registered name of the unit of work.
  pub name: String,
  /// Binding names, resolved positionally at invocation time.
  pub arguments: Vec<String>,
  /// Binding the result is written to; `None` discards the result.
  pub result: Option<String>,
  /// Overrides the runtime's default timeout for this invocation.
  pub timeout: Option<Duration>,
}

impl Invocation {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      arguments: Vec::new(),
      result: None,
      timeout: None,
    }
  }

  pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.arguments = arguments.into_iter().map(Into::into).collect();
    self
  }

  /// Bind the result to `name`. An empty name means no binding.
  pub fn with_result(mut self, name: impl Into<String>) -> Self {
    let name = name.into();
    self.result = (!name.is_empty()).then_some(name);
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = Some(timeout);
    self
  }
}
