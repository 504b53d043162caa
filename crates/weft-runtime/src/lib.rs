//! Weft Runtime
//!
//! This crate interprets resolved weft workflows. It walks the statement
//! tree, threads one [`Bindings`](weft_workflow::Bindings) store through the
//! run, and calls named units of work through the [`Invoker`] seam.
//!
//! # Architecture
//!
//! ```text
//! Runtime
//! ├── execute(workflow, cancel) -> InvokeResult
//! └── run(workflow, cancel) -> WorkflowRun (outcome + final bindings)
//!
//! Executor (per run)
//! ├── Sequence   - elements in order, stop at first failure
//! ├── Parallel   - branches on a child cancellation scope, fan-in with
//! │                FuturesUnordered, cancel on first failure, always drain
//! ├── Invocation - resolve arguments, call the Invoker, bind the result
//! └── Noop       - succeeds
//!
//! Invoker (external host)
//! └── Registry   - in-process implementation keyed by name
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use weft_runtime::{Registry, Runtime, RuntimeConfig};
//!
//! let mut registry = Registry::new();
//! registry.register("greet", |inputs| async move {
//!   Ok(format!("hello {}", inputs.join(" ")))
//! });
//!
//! let runtime = Runtime::new(Arc::new(registry), RuntimeConfig::default());
//! let result = runtime.execute(&workflow, CancellationToken::new()).await?;
//! ```

mod error;
mod events;
mod executor;
mod invoker;
mod registry;
mod result;
mod runtime;

pub use error::{InvokeError, RuntimeError};
pub use events::{ChannelNotifier, ExecutionEvent, ExecutionNotifier, NoopNotifier};
pub use invoker::{InvokeOptions, Invoker};
pub use registry::Registry;
pub use result::{InvokeResult, WorkflowRun};
pub use runtime::{Runtime, RuntimeConfig};
pub use weft_config::FailureMode;
