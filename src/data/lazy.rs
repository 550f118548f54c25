//! Lazy type - a memoized zero-argument computation.
//!
//! `Lazy<A>` defers its thunk until the first [`force`](Lazy::force) and
//! caches the result; later calls return the cached value without
//! recomputation. Not thread-safe; for concurrent initialization use
//! `std::sync::LazyLock`.
//!
//! # Examples
//!
//! ```rust
//! use fputils::data::Lazy;
//! use std::cell::Cell;
//!
//! let calls = Cell::new(0);
//! let lazy = Lazy::of(|| {
//!     calls.set(calls.get() + 1);
//!     42
//! });
//!
//! assert_eq!(calls.get(), 0);
//! assert_eq!(*lazy.force(), 42);
//! assert_eq!(*lazy.force(), 42);
//! assert_eq!(calls.get(), 1);
//! ```

use std::cell::{Ref, RefCell};

/// Internal state of a lazy value.
enum LazyState<A, F> {
    /// Not evaluated yet; holds the thunk.
    Pending(F),
    /// Evaluated; holds the cached value.
    Evaluated(A),
    /// The thunk panicked; the value is unusable.
    Poisoned,
}

/// A memoized zero-argument computation.
///
/// The thunk runs at most once. If it panics, the lazy value is poisoned
/// and every later access panics too.
///
/// # Examples
///
/// ```rust
/// use fputils::data::Lazy;
///
/// let lazy = Lazy::of(|| "expensive".len());
/// assert_eq!(*lazy.force(), 9);
/// ```
pub struct Lazy<A, F = fn() -> A> {
    state: RefCell<LazyState<A, F>>,
}

impl<A, F: FnOnce() -> A> Lazy<A, F> {
    /// Defers `thunk` until the first `force`.
    #[inline]
    pub const fn of(thunk: F) -> Self {
        Self {
            state: RefCell::new(LazyState::Pending(thunk)),
        }
    }

    /// Evaluates if necessary and returns a reference to the value.
    ///
    /// # Panics
    ///
    /// Panics if the thunk panicked on an earlier call (the value is
    /// poisoned), or re-raises the thunk's own panic on first evaluation.
    pub fn force(&self) -> Ref<'_, A> {
        {
            let mut state = self.state.borrow_mut();
            if let LazyState::Pending(_) = &*state {
                // Take the thunk out, leaving Poisoned in case it panics.
                let LazyState::Pending(thunk) = std::mem::replace(&mut *state, LazyState::Poisoned)
                else {
                    unreachable!()
                };
                *state = LazyState::Evaluated(thunk());
            }
        }

        Ref::map(self.state.borrow(), |state| match state {
            LazyState::Evaluated(value) => value,
            LazyState::Pending(_) => unreachable!(),
            LazyState::Poisoned => panic!("Lazy value poisoned by a panicking thunk"),
        })
    }

    /// Returns the cached value without forcing evaluation.
    #[must_use]
    pub fn peek(&self) -> Option<Ref<'_, A>> {
        let state = self.state.borrow();
        match &*state {
            LazyState::Evaluated(_) => Some(Ref::map(state, |state| match state {
                LazyState::Evaluated(value) => value,
                LazyState::Pending(_) | LazyState::Poisoned => unreachable!(),
            })),
            LazyState::Pending(_) | LazyState::Poisoned => None,
        }
    }

    /// Returns `true` once the value has been computed.
    #[must_use]
    pub fn is_evaluated(&self) -> bool {
        matches!(&*self.state.borrow(), LazyState::Evaluated(_))
    }

    /// Consumes the lazy value, evaluating if necessary.
    pub fn into_inner(self) -> A {
        match self.state.into_inner() {
            LazyState::Pending(thunk) => thunk(),
            LazyState::Evaluated(value) => value,
            LazyState::Poisoned => panic!("Lazy value poisoned by a panicking thunk"),
        }
    }
}
