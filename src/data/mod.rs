//! Value-level functional data types.
//!
//! - [`Either`]: a disjoint union of two alternatives, right-biased.
//! - [`Try`]: the outcome of a fallible computation as a value.
//! - [`Tuple2`]..[`Tuple5`]: positional products with per-slot mappers,
//!   plus the [`zip`] / [`zip_with_index`] helpers.
//! - [`Lazy`]: a memoized zero-argument computation.
//!
//! Optional values are deliberately absent: `std::option::Option` already
//! covers that contract (`map_or_else` is the two-armed fold,
//! `unwrap_or_else` the fallback accessor).

pub mod either;
pub mod lazy;
pub mod tuple;
pub mod try_;

pub use either::Either;
pub use lazy::Lazy;
pub use try_::Try;
pub use tuple::{Tuple2, Tuple3, Tuple4, Tuple5, zip, zip_with_index};
