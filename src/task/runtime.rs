//! Default execution context for tasks.
//!
//! The "no executor supplied" mode of [`TaskBuilder`](crate::task::TaskBuilder)
//! schedules work on a process-wide multi-thread runtime. This module makes
//! that default explicit rather than hiding it behind the scheduling calls:
//!
//! 1. **Global runtime**: a lazily-initialized multi-thread runtime sized by
//!    the number of CPU cores, created once and never torn down.
//! 2. **Handle priority**: when the caller is already inside a tokio runtime,
//!    that runtime wins over the global one. This is what makes the default
//!    context swappable in tests: a `#[tokio::test]` body schedules onto the
//!    test runtime without any extra wiring.
//! 3. **Blocking execution**: [`try_run_blocking`] parks the calling thread
//!    on a future from synchronous code, using `block_in_place` when already
//!    inside a multi-thread runtime to avoid nested-runtime panics.
//!
//! Blocking from inside a current-thread runtime is refused with
//! [`BlockingError::CurrentThreadRuntime`] instead of deadlocking.

use std::cell::RefCell;
use std::future::Future;
use std::sync::LazyLock;

use tokio::runtime::{Builder, Handle, Runtime, RuntimeFlavor};

use crate::error::BlockingError;

// =============================================================================
// Global Runtime
// =============================================================================

/// Process-wide default runtime, initialized on first use.
///
/// Multi-thread scheduler, one worker per CPU core, io/time drivers
/// enabled. Static lifetime; never dropped.
static GLOBAL_RUNTIME: LazyLock<Runtime> = LazyLock::new(|| {
    Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .enable_all()
        .build()
        .expect("failed to create the default task runtime")
});

/// Returns the process-wide default runtime.
///
/// The same instance is returned from every thread; it is initialized on
/// the first call and lives for the remainder of the process.
#[inline]
#[must_use]
pub fn global() -> &'static Runtime {
    &GLOBAL_RUNTIME
}

// =============================================================================
// Handle Caching
// =============================================================================

thread_local! {
    /// Per-thread cached handle to the global runtime, so repeated
    /// scheduling from one thread does not touch the `LazyLock` each time.
    static CACHED_HANDLE: RefCell<Option<Handle>> = const { RefCell::new(None) };
}

/// Returns a handle to the current runtime, or to the global one.
///
/// Priority:
///
/// 1. inside a tokio runtime: `Handle::current()`, so the caller's runtime
///    keeps scheduling its own continuations;
/// 2. otherwise: a cached handle to [`global()`].
///
/// # Examples
///
/// ```rust
/// use fputils::task::runtime::handle;
///
/// let obtained = handle();
/// let join = obtained.spawn_blocking(|| 41 + 1);
/// # drop(join);
/// ```
#[inline]
#[must_use]
#[allow(clippy::missing_panics_doc)] // the unwrap reads a value set just above
pub fn handle() -> Handle {
    if let Ok(current) = Handle::try_current() {
        return current;
    }

    CACHED_HANDLE.with(|cached| {
        let mut cached = cached.borrow_mut();
        if cached.is_none() {
            *cached = Some(global().handle().clone());
        }
        cached.as_ref().unwrap().clone()
    })
}

// =============================================================================
// Blocking Execution
// =============================================================================

/// Runs a future to completion, blocking the calling thread.
///
/// This is the substrate of `Task::try_get`. It adapts to the calling
/// context:
///
/// - **outside any runtime**: `block_on` against the global runtime;
/// - **inside a multi-thread runtime**: `block_in_place` with the current
///   handle, preserving the caller's runtime context;
/// - **inside a current-thread runtime**: refused with
///   [`BlockingError::CurrentThreadRuntime`].
///
/// # Errors
///
/// Returns [`BlockingError`] when the calling context cannot host a
/// blocking wait.
///
/// # Examples
///
/// ```rust
/// use fputils::task::runtime::try_run_blocking;
///
/// let result = try_run_blocking(async { 42 });
/// assert_eq!(result, Ok(42));
/// ```
pub fn try_run_blocking<F, T>(future: F) -> Result<T, BlockingError>
where
    F: Future<Output = T>,
{
    if let Ok(current) = Handle::try_current() {
        match current.runtime_flavor() {
            RuntimeFlavor::MultiThread => {
                Ok(tokio::task::block_in_place(|| current.block_on(future)))
            }
            RuntimeFlavor::CurrentThread => Err(BlockingError::CurrentThreadRuntime),
            _ => Err(BlockingError::UnsupportedRuntimeFlavor),
        }
    } else {
        Ok(global().block_on(future))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn global_runtime_is_shared() {
        let first = global();
        let second = global();
        assert!(std::ptr::eq(first, second));
    }

    #[rstest]
    fn handle_outside_runtime_points_at_global() {
        let obtained = handle();
        let value = obtained.block_on(async { 7 });
        assert_eq!(value, 7);
    }

    #[rstest]
    fn try_run_blocking_outside_runtime_succeeds() {
        let result = try_run_blocking(async { "done" });
        assert_eq!(result, Ok("done"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn try_run_blocking_inside_multi_thread_runtime_succeeds() {
        let result = try_run_blocking(async { 42 });
        assert_eq!(result, Ok(42));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn try_run_blocking_inside_current_thread_runtime_is_refused() {
        let result = try_run_blocking(async { 42 });
        assert_eq!(result, Err(BlockingError::CurrentThreadRuntime));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn handle_inside_runtime_prefers_current() {
        let obtained = handle();
        assert_eq!(obtained.runtime_flavor(), RuntimeFlavor::MultiThread);
    }
}
