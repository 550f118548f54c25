//! Integration tests for the task builder and task handles.
//!
//! Covers, on both the default context and a caller-supplied runtime:
//! - non-blocking scheduling (run/map/flat_map/ap return immediately)
//! - success and failure propagation through map and flat_map
//! - join semantics of flat_map (no observable task-of-task)
//! - timed retrieval (deadline abandons the wait, not the computation)
//! - n-ary composition: value joining in argument order, and
//!   argument-order failure precedence regardless of completion order
//! - idempotence of retrieval
//! - panic-payload unwrapping across the thread boundary

use fputils::task::TaskBuilder;
use rstest::rstest;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

/// A bounded runtime standing in for a caller-supplied thread pool.
fn supplied_runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(3)
        .enable_all()
        .build()
        .expect("test runtime")
}

/// Builders under test: the default context plus a caller-supplied pool.
/// The runtime must outlive the tasks, so it rides along.
fn builders() -> Vec<(TaskBuilder, Option<Runtime>)> {
    let runtime = supplied_runtime();
    let supplied = TaskBuilder::build_with(runtime.handle().clone());
    vec![(TaskBuilder::build(), None), (supplied, Some(runtime))]
}

// =============================================================================
// Scheduling
// =============================================================================

#[rstest]
fn scheduling_is_non_blocking() {
    for (builder, _runtime) in builders() {
        let start = Instant::now();
        let inner = builder.clone();

        let task = builder
            .run(|| {
                thread::sleep(Duration::from_millis(500));
                21
            })
            .map(|x| x * 2)
            .flat_map(move |x| inner.run(move || x));

        // run, map and flat_map only schedule; the half-second thunk must
        // not have been awaited on this thread.
        assert!(
            start.elapsed() < Duration::from_millis(250),
            "scheduling blocked the calling thread for {:?}",
            start.elapsed()
        );
        assert_eq!(task.try_get().success(), Some(42));
    }
}

#[rstest]
fn ap_schedules_without_blocking() {
    let builder = TaskBuilder::build();
    let slow = builder.run(|| {
        thread::sleep(Duration::from_millis(400));
        "a".to_string()
    });
    let fast = builder.run(|| "b".to_string());

    let start = Instant::now();
    let joined = slow.ap(fast, |a, b| a + &b);
    assert!(start.elapsed() < Duration::from_millis(200));
    assert_eq!(joined.try_get().success(), Some("ab".to_string()));
}

// =============================================================================
// Map / FlatMap
// =============================================================================

#[rstest]
fn map_propagates_success() {
    for (builder, _runtime) in builders() {
        let task = builder.run(|| 41).map(|x| x + 1);
        assert_eq!(task.try_get().success(), Some(42));
    }
}

#[rstest]
fn map_propagates_failure_without_invoking_mapper() {
    for (builder, _runtime) in builders() {
        let invoked = Arc::new(AtomicBool::new(false));
        let spy = Arc::clone(&invoked);

        let task = builder
            .run(|| -> i32 { panic!("thunk exploded") })
            .map(move |x| {
                spy.store(true, Ordering::SeqCst);
                x + 1
            });

        let error = task.try_get().failure().expect("task must fail");
        assert!(error.is_panicked());
        assert_eq!(error.message(), "thunk exploded");
        assert!(!invoked.load(Ordering::SeqCst), "mapper ran after failure");
    }
}

#[rstest]
fn map_captures_a_panicking_mapper() {
    let task = TaskBuilder::build()
        .run(|| "future".to_string())
        .map(|_| -> usize { panic!("error") });

    let message = task.get(|n| n.to_string(), |error| error.message());
    assert_eq!(message, "error");
}

#[rstest]
fn flat_map_unwraps_nested_tasks() {
    for (builder, _runtime) in builders() {
        let inner = builder.clone();
        let task = builder
            .run(|| "future".to_string())
            .flat_map(move |s| inner.run(move || s.len()));
        assert_eq!(task.try_get().success(), Some(6));
    }
}

#[rstest]
fn flat_map_surfaces_inner_task_failure() {
    let builder = TaskBuilder::build();
    let inner = builder.clone();
    let task = builder
        .run(|| 1)
        .flat_map(move |_| inner.run(|| -> i32 { panic!("inner dead") }));

    let error = task.try_get().failure().expect("inner failure surfaces");
    assert_eq!(error.message(), "inner dead");
}

// =============================================================================
// Timed Retrieval
// =============================================================================

#[rstest]
fn timed_retrieval_gives_up_at_the_deadline() {
    for (builder, _runtime) in builders() {
        let task = builder.run(|| {
            thread::sleep(Duration::from_secs(5));
            "late"
        });

        let start = Instant::now();
        let result = task.try_get_within(Duration::from_secs(1));
        let elapsed = start.elapsed();

        let error = result.failure().expect("deadline must elapse");
        assert!(error.is_timeout());
        assert!(
            elapsed >= Duration::from_millis(900) && elapsed < Duration::from_secs(3),
            "wait was {elapsed:?}, expected ~1s"
        );
    }
}

#[rstest]
fn timed_retrieval_leaves_the_computation_running() {
    let builder = TaskBuilder::build();
    let task = builder.run(|| {
        thread::sleep(Duration::from_millis(300));
        42
    });

    let timed_out = task.try_get_within(Duration::from_millis(50));
    assert!(timed_out.failure().is_some_and(|e| e.is_timeout()));

    // The background computation was not cancelled; an unbounded wait
    // still observes its value.
    assert_eq!(task.try_get().success(), Some(42));
}

#[rstest]
fn timed_retrieval_returns_early_on_fast_tasks() {
    let task = TaskBuilder::build().run(|| "quick");
    let result = task.try_get_within(Duration::from_secs(5));
    assert_eq!(result.success(), Some("quick"));
}

// =============================================================================
// N-ary Composition
// =============================================================================

#[rstest]
fn ap_joins_values_in_argument_order() {
    for (builder, _runtime) in builders() {
        let fa = builder.run(|| {
            thread::sleep(Duration::from_millis(300));
            "a".to_string()
        });
        let fb = builder.run(|| "b".to_string());
        let fc = builder.run(|| {
            thread::sleep(Duration::from_millis(150));
            "c".to_string()
        });

        let joined = fa.ap3(fb, fc, |a, b, c| a + &b + &c);
        assert_eq!(
            joined.try_get().recover(|error| error.message()),
            "abc",
            "concatenation must follow argument order, not completion order"
        );
    }
}

#[rstest]
fn ap_failure_takes_the_first_failing_argument() {
    for (builder, _runtime) in builders() {
        let fa = builder.run(|| {
            thread::sleep(Duration::from_millis(300));
            "a".to_string()
        });
        let fb = builder.run(|| -> String { panic!("err") });
        let fc = builder.run(|| {
            thread::sleep(Duration::from_millis(150));
            "c".to_string()
        });

        let joined = fa.ap3(fb, fc, |a, b, c| a + &b + &c);
        assert_eq!(joined.try_get().recover(|error| error.message()), "err");
    }
}

#[rstest]
fn ap_failure_precedence_is_argument_order_not_wall_clock() {
    let builder = TaskBuilder::build();

    // The second argument fails immediately; the first fails later. The
    // reported error must still be the first argument's, because joining
    // proceeds left to right and never reaches the second one's error
    // ahead of it.
    let fa = builder.run(|| -> i32 {
        thread::sleep(Duration::from_millis(250));
        panic!("first argument")
    });
    let fb = builder.run(|| -> i32 { panic!("second argument") });

    let joined = fa.ap(fb, |a, b| a + b);
    let error = joined.try_get().failure().expect("both inputs failed");
    assert_eq!(error.message(), "first argument");
}

#[rstest]
fn ap4_and_ap5_combine_all_arguments() {
    let builder = TaskBuilder::build();

    let four = builder.run(|| 1).ap4(
        builder.run(|| 2),
        builder.run(|| 3),
        builder.run(|| 4),
        |a, b, c, d| a + b + c + d,
    );
    assert_eq!(four.try_get().success(), Some(10));

    let five = builder.run(|| "a".to_string()).ap5(
        builder.run(|| "b".to_string()),
        builder.run(|| "c".to_string()),
        builder.run(|| "d".to_string()),
        builder.run(|| "e".to_string()),
        |a, b, c, d, e| a + &b + &c + &d + &e,
    );
    assert_eq!(five.try_get().success(), Some("abcde".to_string()));
}

// =============================================================================
// Resolution
// =============================================================================

#[rstest]
fn retrieval_is_idempotent() {
    let task = TaskBuilder::build().run(|| 42);
    assert_eq!(task.try_get().success(), Some(42));
    assert_eq!(task.try_get().success(), Some(42));
}

#[rstest]
fn failed_resolution_is_stable_across_retrievals() {
    let task = TaskBuilder::build().run(|| -> i32 { panic!("once") });
    let first = task.try_get().failure().expect("failure");
    let second = task.try_get().failure().expect("failure");
    assert!(first.is_panicked());
    assert_eq!(first.message(), second.message());
}

#[rstest]
fn get_applies_the_matching_callback() {
    let builder = TaskBuilder::build();

    let ok = builder.run(|| 41).map(|x| x + 1);
    assert_eq!(ok.get(|n| n, |_| -1), 42);

    let failing = builder.run(|| -> i32 { panic!("error") });
    assert_eq!(
        failing.get(|n| n.to_string(), |error| error.message()),
        "error"
    );
}

#[rstest]
fn get_within_folds_the_timeout_branch() {
    let task = TaskBuilder::build().run(|| {
        thread::sleep(Duration::from_secs(5));
        "late".to_string()
    });

    let outcome = task.get_within(
        |value| value,
        |error| format!("gave up: timeout={}", error.is_timeout()),
        Duration::from_millis(100),
    );
    assert_eq!(outcome, "gave up: timeout=true");
}

// =============================================================================
// Caller-supplied Runtime Lifecycle
// =============================================================================

#[rstest]
fn dropping_the_builder_does_not_stop_in_flight_tasks() {
    let runtime = supplied_runtime();
    let task = {
        let builder = TaskBuilder::build_with(runtime.handle().clone());
        builder.run(|| {
            thread::sleep(Duration::from_millis(100));
            "still running"
        })
        // builder dropped here; only the caller owns the runtime
    };
    assert_eq!(task.try_get().success(), Some("still running"));
}

#[rstest]
fn runtime_shutdown_surfaces_as_canceled() {
    let runtime = supplied_runtime();
    let builder = TaskBuilder::build_with(runtime.handle().clone());

    // The continuation is an async task on the supplied runtime; it is
    // still waiting on the thunk when the runtime goes away.
    let task = builder
        .run(|| {
            thread::sleep(Duration::from_millis(300));
            21
        })
        .map(|x| x * 2);

    runtime.shutdown_background();

    let error = task.try_get().failure().expect("task was abandoned");
    assert!(error.is_canceled());
}

// =============================================================================
// Retrieval From Async Contexts
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn try_get_works_inside_a_multi_thread_runtime() {
    let task = TaskBuilder::build().run(|| 41).map(|x| x + 1);
    assert_eq!(task.try_get().success(), Some(42));
}

#[tokio::test(flavor = "current_thread")]
async fn try_get_refuses_to_block_a_current_thread_runtime() {
    let task = TaskBuilder::build().run(|| 42);
    // Give the thunk a moment; the refusal must come from the retrieval
    // context, not from the task being unfinished.
    std::thread::sleep(Duration::from_millis(50));
    let error = task.try_get().failure().expect("blocking must be refused");
    assert!(matches!(error, fputils::error::TaskError::Blocking(_)));
}
