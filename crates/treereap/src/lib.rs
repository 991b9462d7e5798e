//! Best-effort process-tree termination.
//!
//! Given a reference to a process, terminate it and every process it
//! transitively spawned, without blocking the caller indefinitely or
//! leaking orphaned children. Two entry points share one contract:
//! [`kill_tree_blocking`] for shutdown paths that must finish before
//! proceeding, and [`kill_tree`] for event-driven contexts where blocking
//! is unacceptable.
//!
//! Neither entry point ever reports failure. The contract is explicitly
//! best-effort: a target that is already gone is an achieved goal, and
//! the only observable outcome is that the call returned. Callers that
//! need confirmation poll [`is_running`] afterwards.

mod platform;

pub use platform::{is_running, platform_name};
pub use treereap_core::{ProcessHandle, ProcessRef, Signal};

use platform::platform_reaper;
use tracing::debug;
use treereap_core::{TreeReaper, best_effort};

/// Terminate the tree rooted at `target` with the strongest kill signal,
/// blocking the calling thread until the sweep completes.
pub fn kill_tree_blocking<'a>(target: impl Into<ProcessRef<'a>>) {
    kill_tree_blocking_with(target, Signal::default());
}

/// Terminate the tree rooted at `target` with an explicit signal,
/// blocking the calling thread until the sweep completes.
pub fn kill_tree_blocking_with<'a>(target: impl Into<ProcessRef<'a>>, signal: Signal) {
    let mut target = target.into();
    match target.pid() {
        Some(pid) => platform_reaper().reap_blocking(pid, signal),
        None => direct_kill(&mut target),
    }
}

/// Terminate the tree rooted at `target` with the strongest kill signal,
/// suspending the caller while the sweep runs.
pub async fn kill_tree<'a>(target: impl Into<ProcessRef<'a>>) {
    kill_tree_with(target, Signal::default()).await;
}

/// Terminate the tree rooted at `target` with an explicit signal,
/// suspending the caller while the sweep runs.
pub async fn kill_tree_with<'a>(target: impl Into<ProcessRef<'a>>, signal: Signal) {
    let mut target = target.into();
    match target.pid() {
        Some(pid) => platform_reaper().reap(pid, signal).await,
        None => direct_kill(&mut target),
    }
}

/// A handle without an identifier can still terminate the one process it
/// wraps, though nothing spawned underneath it. Failure here means the
/// process already exited.
fn direct_kill(target: &mut ProcessRef<'_>) {
    if let ProcessRef::Handle(handle) = target {
        debug!("no identifier resolved, falling back to direct termination");
        best_effort("direct termination", handle.start_kill());
    }
}
