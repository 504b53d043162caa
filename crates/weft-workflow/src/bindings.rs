//! The bindings store threaded through a workflow run.
//!
//! One store is created per run and shared by every branch of that run.
//! Branches are polled cooperatively on a single task, so the lock is never
//! contended; it exists so the store stays `Send + Sync` and remains sound if
//! a caller drives branches from several threads. The lock is never held
//! across an await point.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Resolve argument names against a store snapshot.
///
/// Returns one value per name, in order. A name missing from the store
/// resolves to the empty string rather than an error.
pub fn resolve_arguments(arguments: &[String], store: &HashMap<String, String>) -> Vec<String> {
  arguments
    .iter()
    .map(|name| store.get(name).cloned().unwrap_or_default())
    .collect()
}

/// Shared, mutable string-keyed variable table.
///
/// Cloning a `Bindings` yields another handle to the same store.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
  inner: Arc<Mutex<HashMap<String, String>>>,
}

impl Bindings {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seed a fresh store with a copy of `variables`. Later writes never reach
  /// the caller's map.
  pub fn from_variables(variables: &HashMap<String, String>) -> Self {
    Self {
      inner: Arc::new(Mutex::new(variables.clone())),
    }
  }

  pub fn get(&self, name: &str) -> Option<String> {
    self.lock().get(name).cloned()
  }

  pub fn insert(&self, name: impl Into<String>, value: impl Into<String>) {
    self.lock().insert(name.into(), value.into());
  }

  /// Resolve `arguments` against the current content of the store.
  pub fn resolve(&self, arguments: &[String]) -> Vec<String> {
    resolve_arguments(arguments, &self.lock())
  }

  /// Copy of the current content.
  pub fn snapshot(&self) -> HashMap<String, String> {
    self.lock().clone()
  }

  pub fn len(&self) -> usize {
    self.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.lock().is_empty()
  }

  // A panic while holding the lock cannot leave the map half-written, so a
  // poisoned lock is still usable.
  fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
    self.inner.lock().unwrap_or_else(|e| e.into_inner())
  }
}
