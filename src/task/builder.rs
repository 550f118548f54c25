//! Task builder and task handles.
//!
//! [`TaskBuilder`] is a factory carrying an [`ExecutionContext`]; every
//! [`Task`] it produces, and every continuation chained onto such a task,
//! is scheduled on that same context. [`Task<A>`] is a single, eagerly
//! started asynchronous computation that resolves exactly once to either a
//! value or a [`TaskError`].
//!
//! # Design Philosophy
//!
//! Binding the execution context at the builder level (rather than per
//! call) lets an entire dependent pipeline share one pool, so a bounded
//! caller-supplied runtime is never mixed with the default one mid-chain.
//! Tasks are started by construction, not by observation: `run` schedules
//! its thunk before it returns, and combinators schedule their
//! continuation as soon as the predecessor resolves.
//!
//! Failures never escape as unwound panics. A panicking thunk, mapper or
//! combiner is captured inside the task, and only the blocking retrieval
//! operations hand it to the caller, as a [`Try`] value or through the
//! failure callback of [`Task::get`].
//!
//! # Examples
//!
//! ```rust
//! use fputils::task::TaskBuilder;
//!
//! let builder = TaskBuilder::build();
//! let answer = builder
//!     .run(|| 41)
//!     .map(|x| x + 1)
//!     .try_get()
//!     .recover(|_| 0);
//! assert_eq!(answer, 42);
//! ```
//!
//! With a caller-supplied runtime:
//!
//! ```rust
//! use fputils::task::TaskBuilder;
//!
//! let runtime = tokio::runtime::Builder::new_multi_thread()
//!     .worker_threads(2)
//!     .enable_all()
//!     .build()
//!     .unwrap();
//!
//! let builder = TaskBuilder::build_with(runtime.handle().clone());
//! let length = builder
//!     .run(|| "future".to_string())
//!     .map(|s| s.len())
//!     .try_get()
//!     .recover(|_| 0);
//! assert_eq!(length, 6);
//! ```

use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::data::Try;
use crate::error::TaskError;
use crate::task::runtime;

// =============================================================================
// ExecutionContext
// =============================================================================

/// Where scheduled work runs.
///
/// Immutable once a builder is constructed; shared by all tasks the
/// builder produces. The default context is not a hidden global: it is
/// this value, and [`ExecutionContext::handle`] spells out exactly how it
/// resolves to a runtime.
#[derive(Debug, Clone)]
pub enum ExecutionContext {
    /// The implementation-selected pool: the caller's current runtime when
    /// inside one, otherwise the process-wide default runtime
    /// ([`runtime::global`]).
    Default,

    /// A caller-supplied runtime. The handle is non-owning; keeping the
    /// backing runtime alive (and shutting it down) is the caller's job.
    Supplied(Handle),
}

impl ExecutionContext {
    /// Resolves the context to a concrete runtime handle.
    #[must_use]
    pub fn handle(&self) -> Handle {
        match self {
            Self::Default => runtime::handle(),
            Self::Supplied(handle) => handle.clone(),
        }
    }
}

// =============================================================================
// TaskBuilder
// =============================================================================

/// A factory for [`Task`]s bound to one [`ExecutionContext`].
///
/// Builders are cheap to clone and safe to share across threads for
/// concurrent `run` calls; they hold no mutable state.
///
/// # Examples
///
/// ```rust
/// use fputils::task::TaskBuilder;
///
/// let builder = TaskBuilder::build();
/// let task = builder.run(|| "future".to_string());
/// let result = task.try_get();
/// assert_eq!(result.success(), Some("future".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct TaskBuilder {
    context: ExecutionContext,
}

impl TaskBuilder {
    /// A builder whose tasks run on the default context.
    #[must_use]
    pub const fn build() -> Self {
        Self {
            context: ExecutionContext::Default,
        }
    }

    /// A builder bound to a caller-supplied runtime.
    ///
    /// The builder does not own the runtime's lifecycle: the caller must
    /// keep it alive while tasks are in flight and shut it down when done.
    /// A task still in flight when the runtime shuts down resolves to
    /// [`TaskError::Canceled`].
    #[must_use]
    pub const fn build_with(handle: Handle) -> Self {
        Self {
            context: ExecutionContext::Supplied(handle),
        }
    }

    /// The execution context this builder schedules on.
    #[must_use]
    pub const fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Schedules `thunk` immediately and returns its task handle.
    ///
    /// The thunk is dispatched to the context's blocking pool before this
    /// method returns; the calling thread is never blocked. A panic inside
    /// the thunk is captured as [`TaskError::Panicked`] in the task, not
    /// propagated to the caller.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fputils::task::TaskBuilder;
    ///
    /// let task = TaskBuilder::build().run(|| 6 * 7);
    /// assert_eq!(task.try_get().success(), Some(42));
    /// ```
    pub fn run<A, F>(&self, thunk: F) -> Task<A>
    where
        A: Clone + Send + Sync + 'static,
        F: FnOnce() -> A + Send + 'static,
    {
        let join = self.context.handle().spawn_blocking(thunk);
        Task::from_join(self.context.clone(), join)
    }

    /// Schedules a fallible thunk; an `Err` resolves the task to
    /// [`TaskError::Failed`].
    ///
    /// This is the value-level home of what checked-exception adapters do
    /// in languages without a unified error model: the thunk's error is
    /// captured inside the task exactly like a panic would be.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fputils::task::TaskBuilder;
    /// use std::io;
    ///
    /// let task = TaskBuilder::build()
    ///     .run_result(|| Err::<String, _>(io::Error::other("no such host")));
    /// let error = task.try_get().failure().unwrap();
    /// assert_eq!(error.message(), "no such host");
    /// ```
    pub fn run_result<A, E, F>(&self, thunk: F) -> Task<A>
    where
        A: Clone + Send + Sync + 'static,
        E: Error + Send + Sync + 'static,
        F: FnOnce() -> Result<A, E> + Send + 'static,
    {
        let join = self
            .context
            .handle()
            .spawn_blocking(move || thunk().map_err(TaskError::failed));
        Task::from_flat_join(self.context.clone(), join)
    }
}

impl Default for TaskBuilder {
    fn default() -> Self {
        Self::build()
    }
}

// =============================================================================
// Task
// =============================================================================

/// The shared, cloneable resolution of a task.
type TaskFuture<A> = Shared<BoxFuture<'static, Result<A, TaskError>>>;

/// A single asynchronous computation that resolves exactly once.
///
/// A `Task<A>` is already scheduled when you hold it; there is no separate
/// trigger step, no cancellation and no re-run. Cloning a task does not
/// re-run anything: clones share one resolution, which is also why
/// retrieval is idempotent: `try_get` can be called any number of times
/// and observes the same terminal state.
///
/// The element type must be `Clone + Send + Sync` because the resolved
/// value is handed out from a shared future; wrap non-cloneable values in
/// `Arc`.
///
/// # State machine
///
/// Scheduled → Running → Resolved(value) | Resolved(error). Terminal
/// states are absorbing.
///
/// # Examples
///
/// ```rust
/// use fputils::task::TaskBuilder;
///
/// let builder = TaskBuilder::build();
/// let task = builder
///     .run(|| "future".to_string())
///     .flat_map(move |s| TaskBuilder::build().run(move || s.len()));
/// assert_eq!(task.try_get().success(), Some(6));
/// ```
pub struct Task<A> {
    inner: TaskFuture<A>,
    context: ExecutionContext,
}

impl<A> Clone for Task<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            context: self.context.clone(),
        }
    }
}

impl<A> fmt::Debug for Task<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Task")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl<A> Task<A>
where
    A: Clone + Send + Sync + 'static,
{
    /// Wraps a join handle whose task yields a plain value.
    fn from_join(context: ExecutionContext, join: JoinHandle<A>) -> Self {
        let future = async move { join.await.map_err(TaskError::from_join) };
        Self {
            inner: future.boxed().shared(),
            context,
        }
    }

    /// Wraps a join handle whose task yields an already-tagged result.
    ///
    /// Join-level failure (panic, runtime shutdown) takes precedence over
    /// whatever the task would have returned.
    fn from_flat_join(
        context: ExecutionContext,
        join: JoinHandle<Result<A, TaskError>>,
    ) -> Self {
        let future = async move {
            match join.await {
                Ok(result) => result,
                Err(join_error) => Err(TaskError::from_join(join_error)),
            }
        };
        Self {
            inner: future.boxed().shared(),
            context,
        }
    }

    // =========================================================================
    // Combinators
    // =========================================================================

    /// Schedules `f` to transform the value once this task succeeds.
    ///
    /// The continuation runs on the same execution context. If this task
    /// fails, the resulting task fails with the same error and `f` is
    /// never invoked; if `f` panics, the resulting task fails with that
    /// panic.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fputils::task::TaskBuilder;
    ///
    /// let task = TaskBuilder::build().run(|| 41).map(|x| x + 1);
    /// assert_eq!(task.try_get().success(), Some(42));
    /// ```
    #[must_use]
    pub fn map<B, F>(self, f: F) -> Task<B>
    where
        B: Clone + Send + Sync + 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        let context = self.context.clone();
        let prev = self.inner;
        let join = context.handle().spawn(async move {
            let value = prev.await?;
            Ok(f(value))
        });
        Task::from_flat_join(context, join)
    }

    /// Schedules `f` to produce a follow-up task, whose resolution becomes
    /// this chain's resolution.
    ///
    /// No nested task-of-task is ever observable. Failure of this task, a
    /// panic inside `f`, or failure of the inner task all surface as the
    /// failure of the result; the first failure along the chain wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fputils::task::TaskBuilder;
    ///
    /// let builder = TaskBuilder::build();
    /// let inner_builder = builder.clone();
    /// let task = builder
    ///     .run(|| "future".to_string())
    ///     .flat_map(move |s| inner_builder.run(move || s.len()));
    /// assert_eq!(task.try_get().success(), Some(6));
    /// ```
    #[must_use]
    pub fn flat_map<B, F>(self, f: F) -> Task<B>
    where
        B: Clone + Send + Sync + 'static,
        F: FnOnce(A) -> Task<B> + Send + 'static,
    {
        let context = self.context.clone();
        let prev = self.inner;
        let join = context.handle().spawn(async move {
            let value = prev.await?;
            f(value).inner.await
        });
        Task::from_flat_join(context, join)
    }

    /// Combines this task with one other; `f` runs once both succeed.
    ///
    /// Both tasks are already running concurrently (they were scheduled at
    /// creation). Composition is a left-to-right nested
    /// [`flat_map`](Self::flat_map), so when several inputs fail, the error of the
    /// earliest *argument* is reported. Argument order, not completion
    /// order, decides precedence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fputils::task::TaskBuilder;
    ///
    /// let builder = TaskBuilder::build();
    /// let first = builder.run(|| 40);
    /// let second = builder.run(|| 2);
    /// let sum = first.ap(second, |a, b| a + b);
    /// assert_eq!(sum.try_get().success(), Some(42));
    /// ```
    #[must_use]
    pub fn ap<B, X, F>(self, fb: Task<B>, f: F) -> Task<X>
    where
        B: Clone + Send + Sync + 'static,
        X: Clone + Send + Sync + 'static,
        F: FnOnce(A, B) -> X + Send + 'static,
    {
        self.flat_map(move |a| fb.map(move |b| f(a, b)))
    }

    /// Three-way [`ap`](Self::ap).
    #[must_use]
    pub fn ap3<B, C, X, F>(self, fb: Task<B>, fc: Task<C>, f: F) -> Task<X>
    where
        B: Clone + Send + Sync + 'static,
        C: Clone + Send + Sync + 'static,
        X: Clone + Send + Sync + 'static,
        F: FnOnce(A, B, C) -> X + Send + 'static,
    {
        self.flat_map(move |a| fb.flat_map(move |b| fc.map(move |c| f(a, b, c))))
    }

    /// Four-way [`ap`](Self::ap).
    #[must_use]
    pub fn ap4<B, C, D, X, F>(self, fb: Task<B>, fc: Task<C>, fd: Task<D>, f: F) -> Task<X>
    where
        B: Clone + Send + Sync + 'static,
        C: Clone + Send + Sync + 'static,
        D: Clone + Send + Sync + 'static,
        X: Clone + Send + Sync + 'static,
        F: FnOnce(A, B, C, D) -> X + Send + 'static,
    {
        self.flat_map(move |a| {
            fb.flat_map(move |b| fc.flat_map(move |c| fd.map(move |d| f(a, b, c, d))))
        })
    }

    /// Five-way [`ap`](Self::ap).
    #[must_use]
    pub fn ap5<B, C, D, E, X, F>(
        self,
        fb: Task<B>,
        fc: Task<C>,
        fd: Task<D>,
        fe: Task<E>,
        f: F,
    ) -> Task<X>
    where
        B: Clone + Send + Sync + 'static,
        C: Clone + Send + Sync + 'static,
        D: Clone + Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
        X: Clone + Send + Sync + 'static,
        F: FnOnce(A, B, C, D, E) -> X + Send + 'static,
    {
        self.flat_map(move |a| {
            fb.flat_map(move |b| {
                fc.flat_map(move |c| fd.flat_map(move |d| fe.map(move |e| f(a, b, c, d, e))))
            })
        })
    }

    // =========================================================================
    // Blocking Retrieval
    // =========================================================================

    /// Blocks until resolution and packages the outcome as a [`Try`].
    ///
    /// Idempotent: repeated calls observe the same terminal state. Blocks
    /// only as long as the underlying computation runs; called from inside
    /// a current-thread runtime it returns
    /// [`TaskError::Blocking`] instead of deadlocking.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fputils::task::TaskBuilder;
    ///
    /// let task = TaskBuilder::build().run(|| 41).map(|x| x + 1);
    /// assert_eq!(task.try_get().success(), Some(42));
    /// assert_eq!(task.try_get().success(), Some(42));
    /// ```
    #[must_use]
    pub fn try_get(&self) -> Try<A> {
        match runtime::try_run_blocking(self.inner.clone()) {
            Ok(Ok(value)) => Try::Success(value),
            Ok(Err(error)) => Try::Failure(error),
            Err(blocking) => Try::Failure(blocking.into()),
        }
    }

    /// As [`try_get`](Self::try_get), but gives up after `duration`.
    ///
    /// Elapsing the deadline yields [`TaskError::Timeout`]. Only the wait
    /// is abandoned: the underlying computation keeps running in the
    /// background and a later `try_get` can still observe its value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fputils::task::TaskBuilder;
    /// use std::time::Duration;
    ///
    /// let task = TaskBuilder::build().run(|| {
    ///     std::thread::sleep(Duration::from_millis(200));
    ///     "slow"
    /// });
    /// let result = task.try_get_within(Duration::from_millis(10));
    /// assert!(result.failure().is_some_and(|e| e.is_timeout()));
    /// ```
    #[must_use]
    pub fn try_get_within(&self, duration: Duration) -> Try<A> {
        let shared = self.inner.clone();
        let wait = async move { tokio::time::timeout(duration, shared).await };
        match runtime::try_run_blocking(wait) {
            Ok(Ok(Ok(value))) => Try::Success(value),
            Ok(Ok(Err(error))) => Try::Failure(error),
            Ok(Err(_elapsed)) => Try::Failure(TaskError::Timeout(duration)),
            Err(blocking) => Try::Failure(blocking.into()),
        }
    }

    /// Blocks until resolution and folds the outcome in one step.
    ///
    /// The two-callback form of retrieval: no separate [`Try`] fold is
    /// needed, and handling the failure branch is mandatory by
    /// construction.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fputils::task::TaskBuilder;
    ///
    /// let message = TaskBuilder::build()
    ///     .run(|| "future".to_string())
    ///     .get(|s| s, |error| error.message());
    /// assert_eq!(message, "future");
    /// ```
    pub fn get<B, S, F>(&self, on_success: S, on_failure: F) -> B
    where
        S: FnOnce(A) -> B,
        F: FnOnce(TaskError) -> B,
    {
        self.try_get().fold(on_success, on_failure)
    }

    /// As [`get`](Self::get), bounded by `duration`.
    pub fn get_within<B, S, F>(&self, on_success: S, on_failure: F, duration: Duration) -> B
    where
        S: FnOnce(A) -> B,
        F: FnOnce(TaskError) -> B,
    {
        self.try_get_within(duration).fold(on_success, on_failure)
    }
}

// Builders and tasks must stay shareable across threads; a regression here
// is an API break.
static_assertions::assert_impl_all!(TaskBuilder: Send, Sync, Clone);
static_assertions::assert_impl_all!(Task<i32>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Task<Arc<String>>: Send, Sync, Clone);
