//! Execution events and notifiers for observability.
//!
//! Events are emitted while a workflow runs so that a host can observe
//! progress, persist history, or stream it elsewhere. They mirror the
//! `tracing` events the runtime logs.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Events emitted during workflow execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionEvent {
  /// Workflow execution has started.
  WorkflowStarted {
    execution_id: String,
    workflow_id: String,
  },

  /// An invocation has been handed to the invoker.
  InvocationStarted {
    execution_id: String,
    name: String,
    inputs: Vec<String>,
  },

  /// An invocation returned a value.
  InvocationCompleted {
    execution_id: String,
    name: String,
    output: String,
  },

  /// An invocation failed or was cancelled while in flight.
  InvocationFailed {
    execution_id: String,
    name: String,
    error: String,
  },

  /// Workflow execution has completed successfully.
  WorkflowCompleted { execution_id: String },

  /// Workflow execution has failed.
  WorkflowFailed { execution_id: String, error: String },
}

/// Trait for receiving execution events.
///
/// The runtime calls `notify` for each event; implementations decide what to
/// do with them.
pub trait ExecutionNotifier: Send + Sync {
  fn notify(&self, event: ExecutionEvent);
}

/// A notifier that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl ExecutionNotifier for NoopNotifier {
  fn notify(&self, _event: ExecutionEvent) {}
}

/// A notifier that forwards events to an unbounded channel.
///
/// Unbounded so a slow consumer never blocks the interpreter; volume is at
/// most a few events per invocation.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  sender: mpsc::UnboundedSender<ExecutionEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::UnboundedSender<ExecutionEvent>) -> Self {
    Self { sender }
  }

  /// Create a notifier together with the receiving end of its channel.
  pub fn channel() -> (Self, mpsc::UnboundedReceiver<ExecutionEvent>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (Self::new(sender), receiver)
  }
}

impl ExecutionNotifier for ChannelNotifier {
  fn notify(&self, event: ExecutionEvent) {
    // Receiver may have been dropped
    let _ = self.sender.send(event);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_channel_notifier_forwards_in_order() {
    let (notifier, mut receiver) = ChannelNotifier::channel();

    notifier.notify(ExecutionEvent::WorkflowStarted {
      execution_id: "e".to_string(),
      workflow_id: "w".to_string(),
    });
    notifier.notify(ExecutionEvent::WorkflowCompleted {
      execution_id: "e".to_string(),
    });

    assert!(matches!(
      receiver.try_recv(),
      Ok(ExecutionEvent::WorkflowStarted { .. })
    ));
    assert!(matches!(
      receiver.try_recv(),
      Ok(ExecutionEvent::WorkflowCompleted { .. })
    ));
    assert!(receiver.try_recv().is_err());
  }

  #[test]
  fn test_channel_notifier_ignores_dropped_receiver() {
    let (notifier, receiver) = ChannelNotifier::channel();
    drop(receiver);

    notifier.notify(ExecutionEvent::WorkflowCompleted {
      execution_id: "e".to_string(),
    });
  }
}
