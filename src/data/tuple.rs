//! Positional tuples with per-slot mappers, plus zipping helpers.
//!
//! `Tuple2..Tuple5` are named product types whose fields read as `_1`,
//! `_2`, … and which can be updated one slot at a time (`mod1`, `mod2`,
//! …) without touching the others. They render as `(a, b, ...)` and
//! convert to and from the native tuples of the same arity.
//!
//! The free functions [`zip`] and [`zip_with_index`] pair two sequences
//! into `Tuple2`s, truncating to the shorter input.
//!
//! # Examples
//!
//! ```rust
//! use fputils::data::{Tuple2, zip_with_index};
//!
//! let pair = Tuple2::of("answer", 41).mod2(|n| n + 1);
//! assert_eq!(pair.to_string(), "(answer, 42)");
//!
//! let indexed = zip_with_index(vec!["a", "b"]);
//! assert_eq!(indexed[1], Tuple2::of(1, "b"));
//! ```

use std::fmt;

// =============================================================================
// Tuple2
// =============================================================================

/// A pair with positional fields and per-slot mappers.
///
/// # Examples
///
/// ```rust
/// use fputils::data::Tuple2;
///
/// let pair = Tuple2::of(1, "one");
/// assert_eq!(pair._1, 1);
/// assert_eq!(pair.mod1(|n| n * 10)._1, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tuple2<A, B> {
    /// First element.
    pub _1: A,
    /// Second element.
    pub _2: B,
}

impl<A, B> Tuple2<A, B> {
    /// Builds a pair from its elements.
    #[inline]
    pub const fn of(_1: A, _2: B) -> Self {
        Self { _1, _2 }
    }

    /// Maps the first slot, leaving the second untouched.
    #[inline]
    pub fn mod1<T, F>(self, f: F) -> Tuple2<T, B>
    where
        F: FnOnce(A) -> T,
    {
        Tuple2::of(f(self._1), self._2)
    }

    /// Maps the second slot, leaving the first untouched.
    #[inline]
    pub fn mod2<T, F>(self, f: F) -> Tuple2<A, T>
    where
        F: FnOnce(B) -> T,
    {
        Tuple2::of(self._1, f(self._2))
    }
}

impl<A: fmt::Display, B: fmt::Display> fmt::Display for Tuple2<A, B> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self._1, self._2)
    }
}

impl<A, B> From<(A, B)> for Tuple2<A, B> {
    fn from((_1, _2): (A, B)) -> Self {
        Self::of(_1, _2)
    }
}

impl<A, B> From<Tuple2<A, B>> for (A, B) {
    fn from(tuple: Tuple2<A, B>) -> Self {
        (tuple._1, tuple._2)
    }
}

// =============================================================================
// Tuple3
// =============================================================================

/// A triple with positional fields and per-slot mappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tuple3<A, B, C> {
    /// First element.
    pub _1: A,
    /// Second element.
    pub _2: B,
    /// Third element.
    pub _3: C,
}

impl<A, B, C> Tuple3<A, B, C> {
    /// Builds a triple from its elements.
    #[inline]
    pub const fn of(_1: A, _2: B, _3: C) -> Self {
        Self { _1, _2, _3 }
    }

    /// Maps the first slot.
    #[inline]
    pub fn mod1<T, F>(self, f: F) -> Tuple3<T, B, C>
    where
        F: FnOnce(A) -> T,
    {
        Tuple3::of(f(self._1), self._2, self._3)
    }

    /// Maps the second slot.
    #[inline]
    pub fn mod2<T, F>(self, f: F) -> Tuple3<A, T, C>
    where
        F: FnOnce(B) -> T,
    {
        Tuple3::of(self._1, f(self._2), self._3)
    }

    /// Maps the third slot.
    #[inline]
    pub fn mod3<T, F>(self, f: F) -> Tuple3<A, B, T>
    where
        F: FnOnce(C) -> T,
    {
        Tuple3::of(self._1, self._2, f(self._3))
    }
}

impl<A: fmt::Display, B: fmt::Display, C: fmt::Display> fmt::Display for Tuple3<A, B, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {}, {})", self._1, self._2, self._3)
    }
}

impl<A, B, C> From<(A, B, C)> for Tuple3<A, B, C> {
    fn from((_1, _2, _3): (A, B, C)) -> Self {
        Self::of(_1, _2, _3)
    }
}

impl<A, B, C> From<Tuple3<A, B, C>> for (A, B, C) {
    fn from(tuple: Tuple3<A, B, C>) -> Self {
        (tuple._1, tuple._2, tuple._3)
    }
}

// =============================================================================
// Tuple4
// =============================================================================

/// A quadruple with positional fields and per-slot mappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tuple4<A, B, C, D> {
    /// First element.
    pub _1: A,
    /// Second element.
    pub _2: B,
    /// Third element.
    pub _3: C,
    /// Fourth element.
    pub _4: D,
}

impl<A, B, C, D> Tuple4<A, B, C, D> {
    /// Builds a quadruple from its elements.
    #[inline]
    pub const fn of(_1: A, _2: B, _3: C, _4: D) -> Self {
        Self { _1, _2, _3, _4 }
    }

    /// Maps the first slot.
    #[inline]
    pub fn mod1<T, F>(self, f: F) -> Tuple4<T, B, C, D>
    where
        F: FnOnce(A) -> T,
    {
        Tuple4::of(f(self._1), self._2, self._3, self._4)
    }

    /// Maps the second slot.
    #[inline]
    pub fn mod2<T, F>(self, f: F) -> Tuple4<A, T, C, D>
    where
        F: FnOnce(B) -> T,
    {
        Tuple4::of(self._1, f(self._2), self._3, self._4)
    }

    /// Maps the third slot.
    #[inline]
    pub fn mod3<T, F>(self, f: F) -> Tuple4<A, B, T, D>
    where
        F: FnOnce(C) -> T,
    {
        Tuple4::of(self._1, self._2, f(self._3), self._4)
    }

    /// Maps the fourth slot.
    #[inline]
    pub fn mod4<T, F>(self, f: F) -> Tuple4<A, B, C, T>
    where
        F: FnOnce(D) -> T,
    {
        Tuple4::of(self._1, self._2, self._3, f(self._4))
    }
}

impl<A: fmt::Display, B: fmt::Display, C: fmt::Display, D: fmt::Display> fmt::Display
    for Tuple4<A, B, C, D>
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "({}, {}, {}, {})",
            self._1, self._2, self._3, self._4
        )
    }
}

impl<A, B, C, D> From<(A, B, C, D)> for Tuple4<A, B, C, D> {
    fn from((_1, _2, _3, _4): (A, B, C, D)) -> Self {
        Self::of(_1, _2, _3, _4)
    }
}

impl<A, B, C, D> From<Tuple4<A, B, C, D>> for (A, B, C, D) {
    fn from(tuple: Tuple4<A, B, C, D>) -> Self {
        (tuple._1, tuple._2, tuple._3, tuple._4)
    }
}

// =============================================================================
// Tuple5
// =============================================================================

/// A quintuple with positional fields and per-slot mappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tuple5<A, B, C, D, E> {
    /// First element.
    pub _1: A,
    /// Second element.
    pub _2: B,
    /// Third element.
    pub _3: C,
    /// Fourth element.
    pub _4: D,
    /// Fifth element.
    pub _5: E,
}

impl<A, B, C, D, E> Tuple5<A, B, C, D, E> {
    /// Builds a quintuple from its elements.
    #[inline]
    pub const fn of(_1: A, _2: B, _3: C, _4: D, _5: E) -> Self {
        Self { _1, _2, _3, _4, _5 }
    }

    /// Maps the first slot.
    #[inline]
    pub fn mod1<T, F>(self, f: F) -> Tuple5<T, B, C, D, E>
    where
        F: FnOnce(A) -> T,
    {
        Tuple5::of(f(self._1), self._2, self._3, self._4, self._5)
    }

    /// Maps the second slot.
    #[inline]
    pub fn mod2<T, F>(self, f: F) -> Tuple5<A, T, C, D, E>
    where
        F: FnOnce(B) -> T,
    {
        Tuple5::of(self._1, f(self._2), self._3, self._4, self._5)
    }

    /// Maps the third slot.
    #[inline]
    pub fn mod3<T, F>(self, f: F) -> Tuple5<A, B, T, D, E>
    where
        F: FnOnce(C) -> T,
    {
        Tuple5::of(self._1, self._2, f(self._3), self._4, self._5)
    }

    /// Maps the fourth slot.
    #[inline]
    pub fn mod4<T, F>(self, f: F) -> Tuple5<A, B, C, T, E>
    where
        F: FnOnce(D) -> T,
    {
        Tuple5::of(self._1, self._2, self._3, f(self._4), self._5)
    }

    /// Maps the fifth slot.
    #[inline]
    pub fn mod5<T, F>(self, f: F) -> Tuple5<A, B, C, D, T>
    where
        F: FnOnce(E) -> T,
    {
        Tuple5::of(self._1, self._2, self._3, self._4, f(self._5))
    }
}

impl<A: fmt::Display, B: fmt::Display, C: fmt::Display, D: fmt::Display, E: fmt::Display>
    fmt::Display for Tuple5<A, B, C, D, E>
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "({}, {}, {}, {}, {})",
            self._1, self._2, self._3, self._4, self._5
        )
    }
}

impl<A, B, C, D, E> From<(A, B, C, D, E)> for Tuple5<A, B, C, D, E> {
    fn from((_1, _2, _3, _4, _5): (A, B, C, D, E)) -> Self {
        Self::of(_1, _2, _3, _4, _5)
    }
}

impl<A, B, C, D, E> From<Tuple5<A, B, C, D, E>> for (A, B, C, D, E) {
    fn from(tuple: Tuple5<A, B, C, D, E>) -> Self {
        (tuple._1, tuple._2, tuple._3, tuple._4, tuple._5)
    }
}

// =============================================================================
// Zipping
// =============================================================================

/// Pairs two sequences element-wise, truncating to the shorter one.
///
/// # Examples
///
/// ```rust
/// use fputils::data::{Tuple2, zip};
///
/// let pairs = zip(vec![1, 2, 3], vec!["one", "two"]);
/// assert_eq!(pairs, vec![Tuple2::of(1, "one"), Tuple2::of(2, "two")]);
/// ```
pub fn zip<A, B, I, J>(first: I, second: J) -> Vec<Tuple2<A, B>>
where
    I: IntoIterator<Item = A>,
    J: IntoIterator<Item = B>,
{
    first
        .into_iter()
        .zip(second)
        .map(|(a, b)| Tuple2::of(a, b))
        .collect()
}

/// Pairs every element with its zero-based position.
///
/// # Examples
///
/// ```rust
/// use fputils::data::{Tuple2, zip_with_index};
///
/// let indexed = zip_with_index(vec!["a", "b", "c"]);
/// assert_eq!(indexed[2], Tuple2::of(2, "c"));
/// ```
pub fn zip_with_index<A, I>(items: I) -> Vec<Tuple2<usize, A>>
where
    I: IntoIterator<Item = A>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| Tuple2::of(index, item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn mod_slots_are_independent() {
        let tuple = Tuple3::of(1, "two", 3.0).mod1(|n| n + 1).mod3(|f| f * 2.0);
        assert_eq!(tuple, Tuple3::of(2, "two", 6.0));
    }

    #[rstest]
    fn display_matches_the_parenthesized_form() {
        assert_eq!(Tuple2::of(1, 2).to_string(), "(1, 2)");
        assert_eq!(Tuple5::of(1, 2, 3, 4, 5).to_string(), "(1, 2, 3, 4, 5)");
    }

    #[rstest]
    fn native_tuple_conversions_round_trip() {
        let tuple: Tuple4<i32, i32, i32, i32> = (1, 2, 3, 4).into();
        let native: (i32, i32, i32, i32) = tuple.into();
        assert_eq!(native, (1, 2, 3, 4));
    }

    #[rstest]
    fn zip_truncates_to_the_shorter_input() {
        let pairs = zip(vec![1, 2, 3], vec!["one"]);
        assert_eq!(pairs, vec![Tuple2::of(1, "one")]);
    }

    #[rstest]
    fn zip_with_index_starts_at_zero() {
        let indexed = zip_with_index(vec!["a", "b"]);
        assert_eq!(indexed, vec![Tuple2::of(0, "a"), Tuple2::of(1, "b")]);
    }
}
