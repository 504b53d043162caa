//! Weft Config
//!
//! This crate contains the serializable workflow definition types for weft.
//! These types represent workflow definitions as authored, before they are
//! resolved into the immutable statement tree that the runtime executes.
//!
//! Definitions can be loaded from:
//! - YAML files (the default authoring format)
//! - JSON files or blobs
//!
//! `weft-workflow` takes these definition types, validates them, and resolves
//! them into runtime structures for execution.

mod enums;
mod error;
mod statement;
mod workflow;

pub use enums::FailureMode;
pub use error::ConfigError;
pub use statement::{InvocationDef, ParallelDef, SequenceDef, StatementDef};
pub use workflow::WorkflowDef;
