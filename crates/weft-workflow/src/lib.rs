//! Weft Workflow
//!
//! This crate provides the resolved workflow representation for weft.
//! A resolved workflow is the validated, immutable form of a definition
//! that the runtime interprets.
//!
//! Key differences from `weft-config`:
//! - Each statement is exactly one variant of [`Statement`]; an empty
//!   definition becomes an explicit [`Statement::Noop`]
//! - Ambiguous statements and unnamed invocations are rejected up front
//! - Empty result bindings are normalized away
//!
//! It also owns the [`Bindings`] store that is threaded through execution.

mod bindings;
mod error;
mod resolve;
mod statement;
mod workflow;

pub use bindings::{Bindings, resolve_arguments};
pub use error::WorkflowError;
pub use resolve::resolve;
pub use statement::{Invocation, Parallel, Sequence, Statement};
pub use workflow::Workflow;
