//! Try type - the outcome of a fallible computation as a value.
//!
//! `Try<A>` is either `Success(value)` or `Failure(error)`. It is what
//! blocking retrieval on a [`Task`](crate::task::Task) produces, turning
//! "the computation may have failed" into data the caller must fold over
//! instead of an exception to forget about.
//!
//! # Examples
//!
//! ```rust
//! use fputils::data::Try;
//!
//! let parsed = Try::of(|| "42".parse::<i32>());
//! let answer = parsed.fold(|n| n, |_| -1);
//! assert_eq!(answer, 42);
//!
//! let broken = Try::of(|| "forty-two".parse::<i32>());
//! assert!(broken.is_failure());
//! ```

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::data::Either;
use crate::error::TaskError;

/// The outcome of a fallible computation: a success value or the error
/// that prevented one.
///
/// Combinators are success-biased: `map` and `flat_map` act on the
/// success branch and pass failures through untouched.
///
/// # Examples
///
/// ```rust
/// use fputils::data::Try;
///
/// let result = Try::Success(41).map(|x| x + 1);
/// assert_eq!(result.success(), Some(42));
/// ```
#[derive(Debug, Clone)]
pub enum Try<A> {
    /// The computation produced a value.
    Success(A),
    /// The computation failed.
    Failure(TaskError),
}

impl<A> Try<A> {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Runs a fallible thunk and captures its outcome.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fputils::data::Try;
    ///
    /// let ok = Try::of(|| "6".parse::<i32>());
    /// assert!(ok.is_success());
    /// ```
    pub fn of<E, F>(thunk: F) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
        F: FnOnce() -> Result<A, E>,
    {
        match thunk() {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(TaskError::failed(error)),
        }
    }

    /// Runs an infallible-looking thunk, capturing a panic as `Failure`.
    ///
    /// This folds "the supplier may throw" into the value level: the
    /// panic payload becomes [`TaskError::Panicked`] and never unwinds
    /// into the caller.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fputils::data::Try;
    ///
    /// let result: Try<i32> = Try::capture(|| panic!("boom"));
    /// assert_eq!(result.failure().unwrap().message(), "boom");
    /// ```
    pub fn capture<F>(thunk: F) -> Self
    where
        F: FnOnce() -> A,
    {
        match catch_unwind(AssertUnwindSafe(thunk)) {
            Ok(value) => Self::Success(value),
            Err(payload) => Self::Failure(TaskError::panicked(payload.as_ref())),
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Returns `true` for `Success`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for `Failure`.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// The success value, if any, consuming the `Try`.
    #[must_use]
    pub fn success(self) -> Option<A> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The failure, if any, consuming the `Try`.
    #[must_use]
    pub fn failure(self) -> Option<TaskError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    // =========================================================================
    // Combinators
    // =========================================================================

    /// Transforms the success value; failures pass through.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fputils::data::Try;
    ///
    /// let length = Try::Success("future".to_string()).map(|s| s.len());
    /// assert_eq!(length.success(), Some(6));
    /// ```
    #[inline]
    pub fn map<B, F>(self, f: F) -> Try<B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Self::Success(value) => Try::Success(f(value)),
            Self::Failure(error) => Try::Failure(error),
        }
    }

    /// Chains another fallible step onto the success branch.
    #[inline]
    pub fn flat_map<B, F>(self, f: F) -> Try<B>
    where
        F: FnOnce(A) -> Try<B>,
    {
        match self {
            Self::Success(value) => f(value),
            Self::Failure(error) => Try::Failure(error),
        }
    }

    /// Eliminates the `Try` by applying the matching handler.
    ///
    /// The two-armed fold makes failure handling mandatory at the point
    /// of extraction.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fputils::data::Try;
    ///
    /// let message = Try::Success(42).fold(|n| n.to_string(), |e| e.message());
    /// assert_eq!(message, "42");
    /// ```
    #[inline]
    pub fn fold<B, S, F>(self, on_success: S, on_failure: F) -> B
    where
        S: FnOnce(A) -> B,
        F: FnOnce(TaskError) -> B,
    {
        match self {
            Self::Success(value) => on_success(value),
            Self::Failure(error) => on_failure(error),
        }
    }

    /// Returns the success value unchanged, or rebuilds one from the
    /// failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fputils::data::Try;
    /// use fputils::error::TaskError;
    ///
    /// let fallback = Try::<i32>::Failure(TaskError::Panicked("boom".into()))
    ///     .recover(|_| 0);
    /// assert_eq!(fallback, 0);
    /// ```
    #[inline]
    pub fn recover<F>(self, on_failure: F) -> A
    where
        F: FnOnce(TaskError) -> A,
    {
        match self {
            Self::Success(value) => value,
            Self::Failure(error) => on_failure(error),
        }
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    /// `Success` becomes `Some`; the failure is discarded.
    #[must_use]
    pub fn to_option(self) -> Option<A> {
        self.success()
    }

    /// `Success` becomes `Right`; `Failure` becomes `Left`.
    #[must_use]
    pub fn to_either(self) -> Either<TaskError, A> {
        match self {
            Self::Success(value) => Either::Right(value),
            Self::Failure(error) => Either::Left(error),
        }
    }

    // =========================================================================
    // N-ary Composition
    // =========================================================================

    /// Combines two outcomes; the first failure in argument order wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fputils::data::Try;
    ///
    /// let sum = Try::Success(40).ap(Try::Success(2), |a, b| a + b);
    /// assert_eq!(sum.success(), Some(42));
    /// ```
    pub fn ap<B, X, F>(self, fb: Try<B>, f: F) -> Try<X>
    where
        F: FnOnce(A, B) -> X,
    {
        self.flat_map(move |a| fb.map(move |b| f(a, b)))
    }

    /// Three-way [`ap`](Self::ap).
    pub fn ap3<B, C, X, F>(self, fb: Try<B>, fc: Try<C>, f: F) -> Try<X>
    where
        F: FnOnce(A, B, C) -> X,
    {
        self.flat_map(move |a| fb.flat_map(move |b| fc.map(move |c| f(a, b, c))))
    }

    /// Four-way [`ap`](Self::ap).
    pub fn ap4<B, C, D, X, F>(self, fb: Try<B>, fc: Try<C>, fd: Try<D>, f: F) -> Try<X>
    where
        F: FnOnce(A, B, C, D) -> X,
    {
        self.flat_map(move |a| {
            fb.flat_map(move |b| fc.flat_map(move |c| fd.map(move |d| f(a, b, c, d))))
        })
    }

    /// Five-way [`ap`](Self::ap).
    pub fn ap5<B, C, D, E, X, F>(
        self,
        fb: Try<B>,
        fc: Try<C>,
        fd: Try<D>,
        fe: Try<E>,
        f: F,
    ) -> Try<X>
    where
        F: FnOnce(A, B, C, D, E) -> X,
    {
        self.flat_map(move |a| {
            fb.flat_map(move |b| {
                fc.flat_map(move |c| fd.flat_map(move |d| fe.map(move |e| f(a, b, c, d, e))))
            })
        })
    }
}

impl<A, E> From<Result<A, E>> for Try<A>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// `Ok` becomes `Success`; `Err` is wrapped as [`TaskError::Failed`].
    fn from(result: Result<A, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(TaskError::failed(error)),
        }
    }
}
