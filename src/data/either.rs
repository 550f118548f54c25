//! Either type - a disjoint union of two alternatives.
//!
//! `Either<L, R>` holds exactly one of a `Left(L)` or a `Right(R)` value.
//! It is right-biased: `map` and `flat_map` act on the `Right` branch and
//! leave a `Left` untouched, matching the convention that `Left` carries
//! the error or the road not taken.
//!
//! # Examples
//!
//! ```rust
//! use fputils::data::Either;
//!
//! let checked: Either<String, i32> = Either::right(41);
//! let answer = checked.map(|x| x + 1).fold(|_| -1, |x| x);
//! assert_eq!(answer, 42);
//! ```

use std::fmt;

/// A value that is one of two alternatives.
///
/// By convention `Left` is the failure or first alternative and `Right`
/// the success or second alternative; the success-path combinators act on
/// `Right` only.
///
/// # Examples
///
/// ```rust
/// use fputils::data::Either;
///
/// let success: Either<String, i32> = Either::right(42);
/// assert_eq!(success.map(|x| x * 2), Either::Right(84));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Either<L, R> {
    /// The first alternative, conventionally the failure branch.
    Left(L),
    /// The second alternative, conventionally the success branch.
    Right(R),
}

impl<L, R> Either<L, R> {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Wraps a value in the `Left` branch.
    #[inline]
    pub const fn left(value: L) -> Self {
        Self::Left(value)
    }

    /// Wraps a value in the `Right` branch.
    #[inline]
    pub const fn right(value: R) -> Self {
        Self::Right(value)
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Returns `true` for `Left`.
    #[inline]
    #[must_use]
    pub const fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Returns `true` for `Right`.
    #[inline]
    #[must_use]
    pub const fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    /// The left value, if any, consuming the either.
    #[inline]
    pub fn left_value(self) -> Option<L> {
        match self {
            Self::Left(value) => Some(value),
            Self::Right(_) => None,
        }
    }

    /// The right value, if any, consuming the either.
    #[inline]
    pub fn right_value(self) -> Option<R> {
        match self {
            Self::Left(_) => None,
            Self::Right(value) => Some(value),
        }
    }

    // =========================================================================
    // Right-biased Combinators
    // =========================================================================

    /// Transforms the `Right` value; a `Left` passes through unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fputils::data::Either;
    ///
    /// let length: Either<i32, usize> = Either::right("future".to_string()).map(|s| s.len());
    /// assert_eq!(length, Either::Right(6));
    /// ```
    #[inline]
    pub fn map<T, F>(self, f: F) -> Either<L, T>
    where
        F: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => Either::Right(f(value)),
        }
    }

    /// Chains a step that may itself turn left.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fputils::data::Either;
    ///
    /// let result: Either<String, i32> = Either::right("42".to_string())
    ///     .flat_map(|s| s.parse::<i32>().map_err(|e| e.to_string()).into());
    /// assert_eq!(result, Either::Right(42));
    /// ```
    #[inline]
    pub fn flat_map<T, F>(self, f: F) -> Either<L, T>
    where
        F: FnOnce(R) -> Either<L, T>,
    {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => f(value),
        }
    }

    /// Transforms the `Left` value; a `Right` passes through unchanged.
    #[inline]
    pub fn map_left<T, F>(self, f: F) -> Either<T, R>
    where
        F: FnOnce(L) -> T,
    {
        match self {
            Self::Left(value) => Either::Left(f(value)),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// Eliminates the either by applying the matching handler.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fputils::data::Either;
    ///
    /// let rendered = Either::<i32, String>::left(42).fold(
    ///     |n| n.to_string(),
    ///     |s| s,
    /// );
    /// assert_eq!(rendered, "42");
    /// ```
    #[inline]
    pub fn fold<T, F, G>(self, on_left: F, on_right: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => on_left(value),
            Self::Right(value) => on_right(value),
        }
    }

    /// Exchanges the branches.
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        match self {
            Self::Left(value) => Either::Right(value),
            Self::Right(value) => Either::Left(value),
        }
    }
}

impl<L: fmt::Debug, R: fmt::Debug> fmt::Debug for Either<L, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left(value) => formatter.debug_tuple("Left").field(value).finish(),
            Self::Right(value) => formatter.debug_tuple("Right").field(value).finish(),
        }
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    /// `Ok` becomes `Right`; `Err` becomes `Left`.
    #[inline]
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(value) => Self::Right(value),
            Err(error) => Self::Left(error),
        }
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    /// `Right` becomes `Ok`; `Left` becomes `Err`.
    #[inline]
    fn from(either: Either<L, R>) -> Self {
        match either {
            Either::Left(value) => Err(value),
            Either::Right(value) => Ok(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn constructors_tag_the_expected_branch() {
        let left: Either<i32, String> = Either::left(42);
        assert!(left.is_left());

        let right: Either<i32, String> = Either::right("hello".to_string());
        assert!(right.is_right());
    }

    #[rstest]
    fn map_is_right_biased() {
        let right: Either<i32, String> = Either::right("future".to_string());
        assert_eq!(right.map(|s| s.len()), Either::Right(6));

        let left: Either<i32, String> = Either::left(7);
        assert_eq!(left.map(|s| s.len()), Either::Left(7));
    }

    #[rstest]
    fn flat_map_short_circuits_on_left() {
        let left: Either<&str, i32> = Either::left("stop");
        let chained = left.flat_map(|x| Either::<&str, i32>::right(x + 1));
        assert_eq!(chained, Either::Left("stop"));
    }

    #[rstest]
    fn fold_applies_the_matching_arm() {
        let left: Either<i32, String> = Either::left(42);
        assert_eq!(left.fold(|n| n.to_string(), |s| s), "42");

        let right: Either<i32, String> = Either::right("hello".to_string());
        assert_eq!(right.fold(|n| n.to_string(), |s| s), "hello");
    }

    #[rstest]
    fn result_conversions_round_trip() {
        let ok: Result<i32, String> = Ok(42);
        let either: Either<String, i32> = ok.into();
        let back: Result<i32, String> = either.into();
        assert_eq!(back, Ok(42));
    }

    #[rstest]
    fn swap_exchanges_branches() {
        let left: Either<i32, String> = Either::left(1);
        assert_eq!(left.swap(), Either::Right(1));
    }
}
