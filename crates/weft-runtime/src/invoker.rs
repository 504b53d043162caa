//! The seam between the interpreter and the host that performs work.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::InvokeError;

/// Options applied to a single invocation.
///
/// Retry policy and delivery guarantees belong to the host; the interpreter
/// only decides the timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvokeOptions {
  pub timeout: Duration,
}

/// Calls named units of work.
///
/// Implementations are expected to return exactly one result or failure per
/// call. The interpreter never retries; a failure is propagated as is.
#[async_trait]
pub trait Invoker: Send + Sync {
  async fn invoke(
    &self,
    name: &str,
    inputs: Vec<String>,
    options: &InvokeOptions,
  ) -> Result<String, InvokeError>;
}
