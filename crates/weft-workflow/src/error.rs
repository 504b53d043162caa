use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
  #[error("statement at '{path}' sets more than one of invocation, sequence, parallel")]
  AmbiguousStatement { path: String },

  #[error("invocation at '{path}' has no name")]
  MissingInvocationName { path: String },
}
