//! Failure currency for tasks and deferred results.
//!
//! Every way a computation in this library can fail is represented as a
//! [`TaskError`] value. Errors never cross a thread boundary as unwound
//! panics or thrown exceptions; they travel as data and are handed to the
//! caller only at the explicit retrieval points (`Task::try_get`,
//! `Task::get`, `Try::fold`, `Try::recover`).
//!
//! # Examples
//!
//! ```rust
//! use fputils::error::TaskError;
//! use std::time::Duration;
//!
//! let timeout = TaskError::Timeout(Duration::from_secs(1));
//! assert!(timeout.is_timeout());
//! assert_eq!(timeout.to_string(), "task did not resolve within 1s");
//! ```

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinError;

// =============================================================================
// BlockingError
// =============================================================================

/// Error for blocking retrieval attempted from a context that cannot block.
///
/// Blocking retrieval parks the calling thread until a task resolves. That
/// is only possible outside a runtime, or inside a multi-thread runtime
/// (via `block_in_place`). Inside a current-thread runtime there is no
/// spare worker to park on, so the attempt is reported instead of deadlocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockingError {
    /// Cannot block inside a current-thread runtime.
    CurrentThreadRuntime,

    /// The runtime flavor is unknown and blocking support cannot be assumed.
    ///
    /// Exists for forward compatibility with runtime flavors added by
    /// future tokio versions.
    UnsupportedRuntimeFlavor,
}

impl fmt::Display for BlockingError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentThreadRuntime => {
                write!(
                    formatter,
                    "cannot block on a task inside a current-thread runtime: \
                     block_in_place is only supported in multi-thread runtimes"
                )
            }
            Self::UnsupportedRuntimeFlavor => {
                write!(
                    formatter,
                    "cannot block on a task: the runtime flavor is not supported \
                     for blocking retrieval"
                )
            }
        }
    }
}

impl Error for BlockingError {}

// =============================================================================
// TaskError
// =============================================================================

/// The failure value of a task or deferred result.
///
/// `TaskError` is `Clone` so that a single resolution can be observed any
/// number of times (retrieval is idempotent); arbitrary user error types
/// are carried behind an `Arc`.
///
/// # Taxonomy
///
/// - [`Failed`](Self::Failed) and [`Panicked`](Self::Panicked) are
///   user-computation errors: a fallible thunk returned `Err`, or a
///   thunk/mapper/combiner panicked.
/// - [`Canceled`](Self::Canceled) is a platform condition: the runtime
///   executing the task shut down before resolution. It is reported as
///   itself, never disguised as a user failure.
/// - [`Timeout`](Self::Timeout) is synthetic and produced only by timed
///   retrieval. The underlying computation keeps running; only the wait
///   is abandoned.
/// - [`Blocking`](Self::Blocking) means retrieval itself was impossible
///   in the calling context.
#[derive(Debug, Clone)]
pub enum TaskError {
    /// A user-supplied fallible computation returned an error.
    Failed(Arc<dyn Error + Send + Sync>),

    /// A user-supplied computation panicked; carries the panic message.
    ///
    /// The message is extracted from the panic payload so callers see the
    /// original cause rather than the execution-layer wrapper.
    Panicked(String),

    /// The runtime executing the task shut down before it resolved.
    Canceled,

    /// Timed retrieval gave up after the given duration.
    Timeout(Duration),

    /// Blocking retrieval was attempted from a context that cannot block.
    Blocking(BlockingError),
}

impl TaskError {
    /// Wraps an arbitrary error value as a task failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fputils::error::TaskError;
    /// use std::io;
    ///
    /// let error = TaskError::failed(io::Error::other("boom"));
    /// assert!(error.is_failed());
    /// ```
    pub fn failed<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::Failed(Arc::new(error))
    }

    /// Builds a `Panicked` error from a captured panic payload.
    ///
    /// `&str` and `String` payloads (everything `panic!` produces in
    /// practice) are rendered verbatim; anything else falls back to a
    /// generic message.
    #[must_use]
    pub fn panicked(payload: &(dyn Any + Send)) -> Self {
        Self::Panicked(panic_message(payload))
    }

    /// Translates a tokio [`JoinError`] into a task failure.
    ///
    /// A panicking task surfaces as [`Panicked`](Self::Panicked) with the
    /// original payload message; a task aborted by runtime shutdown
    /// surfaces as [`Canceled`](Self::Canceled).
    #[must_use]
    pub fn from_join(error: JoinError) -> Self {
        if error.is_panic() {
            let payload = error.into_panic();
            Self::Panicked(panic_message(payload.as_ref()))
        } else {
            Self::Canceled
        }
    }

    /// Returns `true` for [`Failed`](Self::Failed).
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns `true` for [`Panicked`](Self::Panicked).
    #[must_use]
    pub const fn is_panicked(&self) -> bool {
        matches!(self, Self::Panicked(_))
    }

    /// Returns `true` for [`Timeout`](Self::Timeout).
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Returns `true` for [`Canceled`](Self::Canceled).
    #[must_use]
    pub const fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }

    /// The message of the underlying cause.
    ///
    /// For `Failed` this is the wrapped error's `Display` output; for
    /// `Panicked` the panic message. This is the closest analog of
    /// `getMessage()` on the original cause and is what the retrieval
    /// tests match on.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fputils::error::TaskError;
    ///
    /// let error = TaskError::Panicked("boom".to_string());
    /// assert_eq!(error.message(), "boom");
    /// ```
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Failed(error) => error.to_string(),
            Self::Panicked(message) => message.clone(),
            Self::Canceled | Self::Timeout(_) | Self::Blocking(_) => self.to_string(),
        }
    }
}

impl fmt::Display for TaskError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(error) => write!(formatter, "task failed: {error}"),
            Self::Panicked(message) => write!(formatter, "task panicked: {message}"),
            Self::Canceled => {
                write!(formatter, "task was canceled before it resolved")
            }
            Self::Timeout(duration) => {
                write!(formatter, "task did not resolve within {duration:?}")
            }
            Self::Blocking(error) => write!(formatter, "{error}"),
        }
    }
}

impl Error for TaskError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Failed(error) => Some(error.as_ref()),
            Self::Blocking(error) => Some(error),
            Self::Panicked(_) | Self::Canceled | Self::Timeout(_) => None,
        }
    }
}

impl From<BlockingError> for TaskError {
    fn from(error: BlockingError) -> Self {
        Self::Blocking(error)
    }
}

// =============================================================================
// Panic Payload Rendering
// =============================================================================

/// Renders a panic payload as a human-readable message.
///
/// `panic!("...")` produces `&'static str` payloads, `panic!("{x}")`
/// produces `String`; other payload types have no portable rendering.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "task panicked with a non-string payload".to_string()
    }
}
