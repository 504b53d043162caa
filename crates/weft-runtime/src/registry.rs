//! In-process unit-of-work registry.
//!
//! Maps names to async handlers and enforces invocation timeouts with
//! `tokio::time::timeout`. Used by the CLI and by tests in place of a
//! durable-execution host.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;

use crate::error::InvokeError;
use crate::invoker::{InvokeOptions, Invoker};

type Handler = Arc<dyn Fn(Vec<String>) -> BoxFuture<'static, Result<String, InvokeError>> + Send + Sync>;

/// Named units of work backed by async closures.
#[derive(Clone, Default)]
pub struct Registry {
  handlers: HashMap<String, Handler>,
}

impl Registry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register `handler` under `name`, replacing any previous registration.
  pub fn register<F, Fut>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
  where
    F: Fn(Vec<String>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<String, InvokeError>> + Send + 'static,
  {
    let handler: Handler = Arc::new(move |inputs| handler(inputs).boxed());
    self.handlers.insert(name.into(), handler);
    self
  }

  pub fn contains(&self, name: &str) -> bool {
    self.handlers.contains_key(name)
  }

  /// Registered names, sorted.
  pub fn names(&self) -> Vec<&str> {
    let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
  }
}

impl std::fmt::Debug for Registry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Registry")
      .field("handlers", &self.names())
      .finish()
  }
}

#[async_trait]
impl Invoker for Registry {
  async fn invoke(
    &self,
    name: &str,
    inputs: Vec<String>,
    options: &InvokeOptions,
  ) -> Result<String, InvokeError> {
    let handler = self
      .handlers
      .get(name)
      .cloned()
      .ok_or_else(|| InvokeError::NotRegistered {
        name: name.to_string(),
      })?;

    tokio::time::timeout(options.timeout, handler(inputs))
      .await
      .map_err(|_| InvokeError::Timeout {
        timeout: options.timeout,
      })?
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::*;

  fn options(timeout_ms: u64) -> InvokeOptions {
    InvokeOptions {
      timeout: Duration::from_millis(timeout_ms),
    }
  }

  fn test_registry() -> Registry {
    let mut registry = Registry::new();
    registry
      .register("join", |inputs| async move { Ok(inputs.join(",")) })
      .register("fail", |_| async { Err(InvokeError::failed("boom")) })
      .register("slow", |_| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok("late".to_string())
      });
    registry
  }

  #[tokio::test]
  async fn test_invoke_registered() {
    let registry = test_registry();
    let output = registry
      .invoke("join", vec!["a".to_string(), "b".to_string()], &options(1000))
      .await
      .unwrap();
    assert_eq!(output, "a,b");
  }

  #[tokio::test]
  async fn test_handler_failure_is_returned() {
    let registry = test_registry();
    let err = registry.invoke("fail", vec![], &options(1000)).await.unwrap_err();
    assert_eq!(err, InvokeError::failed("boom"));
  }

  #[tokio::test]
  async fn test_not_registered() {
    let registry = test_registry();
    let err = registry.invoke("nope", vec![], &options(1000)).await.unwrap_err();
    assert_eq!(
      err,
      InvokeError::NotRegistered {
        name: "nope".to_string()
      }
    );
  }

  #[tokio::test]
  async fn test_timeout() {
    let registry = test_registry();
    let err = registry.invoke("slow", vec![], &options(10)).await.unwrap_err();
    assert_eq!(
      err,
      InvokeError::Timeout {
        timeout: Duration::from_millis(10)
      }
    );
  }

  #[test]
  fn test_names_sorted() {
    let registry = test_registry();
    assert_eq!(registry.names(), vec!["fail", "join", "slow"]);
    assert!(registry.contains("join"));
    assert!(!registry.contains("other"));
  }
}
