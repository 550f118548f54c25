//! # fputils
//!
//! Functional data types and composable asynchronous tasks for Rust.
//!
//! ## Overview
//!
//! The library has two halves:
//!
//! - **Data** ([`data`]): small algebraic wrappers, [`Either`](data::Either),
//!   [`Try`](data::Try), positional tuples with per-slot mappers, and a
//!   memoized [`Lazy`](data::Lazy) value.
//! - **Tasks** ([`task`]): [`TaskBuilder`](task::TaskBuilder) produces
//!   eagerly started [`Task`](task::Task)s bound to one execution context
//!   (the process-wide default runtime, or a caller-supplied one), with
//!   `map` / `flat_map` / `ap` combinators and blocking retrieval that
//!   packages the outcome as a `Try` instead of throwing.
//!
//! Failures travel as [`TaskError`](error::TaskError) values; no panic or
//! error ever crosses from a worker thread into the caller except as data
//! handed to an explicit failure handler.
//!
//! ## Example
//!
//! ```rust
//! use fputils::prelude::*;
//!
//! let builder = TaskBuilder::build();
//! let greeting = builder
//!     .run(|| "future".to_string())
//!     .map(|s| s.len())
//!     .get(|n| format!("{n} chars"), |error| error.message());
//! assert_eq!(greeting, "6 chars");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod data;
pub mod error;
pub mod task;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use fputils::prelude::*;
/// ```
pub mod prelude {
    pub use crate::data::{
        Either, Lazy, Try, Tuple2, Tuple3, Tuple4, Tuple5, zip, zip_with_index,
    };
    pub use crate::error::{BlockingError, TaskError};
    pub use crate::task::{ExecutionContext, Task, TaskBuilder};
}
