//! Composable asynchronous tasks.
//!
//! The task module is built from three pieces:
//!
//! - [`runtime`]: the explicit default execution context, a process-wide
//!   multi-thread runtime plus the blocking-execution shim used by
//!   retrieval.
//! - [`TaskBuilder`]: a factory bound to an [`ExecutionContext`]; all
//!   tasks produced by one builder schedule their work and their
//!   continuations the same way.
//! - [`Task`]: an eagerly started computation resolving exactly once,
//!   with `map`/`flat_map`/`ap` combinators and blocking retrieval into a
//!   [`Try`](crate::data::Try).
//!
//! # Examples
//!
//! ```rust
//! use fputils::task::TaskBuilder;
//!
//! let builder = TaskBuilder::build();
//! let first = builder.run(|| "a".to_string());
//! let second = builder.run(|| "b".to_string());
//! let third = builder.run(|| "c".to_string());
//!
//! let joined = first.ap3(second, third, |a, b, c| format!("{a}{b}{c}"));
//! assert_eq!(joined.try_get().success(), Some("abc".to_string()));
//! ```

pub mod builder;
pub mod runtime;

pub use builder::{ExecutionContext, Task, TaskBuilder};
