use async_trait::async_trait;
use tracing::debug;

use crate::error::{ReapError, best_effort};
use crate::signal::Signal;

/// Direct-child discovery against a live process table.
///
/// Called once per node of the recursive sweep; each call is an
/// independent query because the table can change between calls.
pub trait ChildSource {
    fn direct_children(&mut self, pid: u32) -> Result<Vec<u32>, ReapError>;
}

/// Flat transitive-descendant enumeration.
///
/// The returned list excludes the root and must be in parent-first
/// topological order: every process appears before everything it spawned,
/// so that reversal yields a children-before-parents kill order.
#[async_trait]
pub trait DescendantSource: Send {
    async fn descendants(&mut self, root: u32) -> Result<Vec<u32>, ReapError>;
}

/// Signal delivery to a single process.
pub trait SignalSender {
    fn send(&mut self, pid: u32, signal: Signal) -> Result<(), ReapError>;
}

/// Platform termination strategy, selected once per call and injected
/// into the entry points rather than read from a global platform flag.
#[async_trait]
pub trait TreeReaper: Send + Sync {
    /// Platform name for logging and diagnostics.
    fn platform_name(&self) -> &'static str;

    /// Terminate `root` and its whole subtree, blocking until the sweep
    /// completes. Best-effort: never fails.
    fn reap_blocking(&self, root: u32, signal: Signal);

    /// Terminate `root` and its whole subtree, suspending the caller
    /// while the sweep runs. Best-effort: never fails.
    async fn reap(&self, root: u32, signal: Signal);
}

/// Post-order subtree sweep: recurse into every direct child before
/// signaling the node itself, so leaves die first and the root dies last.
///
/// Signaling a parent before its children would re-parent the children to
/// an unrelated ancestor and leak them outside the tree. Discovery and
/// delivery failures both degrade to "nothing left under this node" and
/// never abort the rest of the sweep.
pub fn sweep_post_order(
    children: &mut impl ChildSource,
    signals: &mut impl SignalSender,
    pid: u32,
    signal: Signal,
) {
    let direct = best_effort("child discovery", children.direct_children(pid)).unwrap_or_default();
    for child in direct {
        sweep_post_order(children, signals, child, signal);
    }
    debug!(pid = %pid, "signaling after subtree sweep");
    best_effort("signal delivery", signals.send(pid, signal));
}

/// Flat reverse-order sweep: enumerate all transitive descendants in one
/// round-trip, signal them in reverse of the returned order, then signal
/// the root.
///
/// Correctness rests on the enumerator's parent-first ordering contract
/// (see [`DescendantSource`]); reversing such an order signals every
/// process before its parent. An enumeration failure means the root has
/// no reachable descendants; the root itself is still signaled.
pub async fn sweep_reversed(
    descendants: &mut impl DescendantSource,
    signals: &mut impl SignalSender,
    root: u32,
    signal: Signal,
) {
    let pids = best_effort("descendant enumeration", descendants.descendants(root).await)
        .unwrap_or_default();
    debug!(root = %root, count = pids.len(), "sweeping enumerated descendants");
    for pid in pids.iter().rev() {
        best_effort("signal delivery", signals.send(*pid, signal));
    }
    best_effort("signal delivery", signals.send(root, signal));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    /// Static parent -> children table with per-node injected failures.
    struct FakeTable {
        edges: HashMap<u32, Vec<u32>>,
        fail_discovery_on: HashSet<u32>,
    }

    impl FakeTable {
        fn new(edges: &[(u32, &[u32])]) -> Self {
            Self {
                edges: edges
                    .iter()
                    .map(|(parent, children)| (*parent, children.to_vec()))
                    .collect(),
                fail_discovery_on: HashSet::new(),
            }
        }
    }

    impl ChildSource for FakeTable {
        fn direct_children(&mut self, pid: u32) -> Result<Vec<u32>, ReapError> {
            if self.fail_discovery_on.contains(&pid) {
                return Err(ReapError::Discovery {
                    pid,
                    reason: "query tool unavailable".to_string(),
                });
            }
            Ok(self.edges.get(&pid).cloned().unwrap_or_default())
        }
    }

    /// Canned flat enumeration result.
    struct FakeEnumeration {
        result: Option<Vec<u32>>,
    }

    #[async_trait]
    impl DescendantSource for FakeEnumeration {
        async fn descendants(&mut self, root: u32) -> Result<Vec<u32>, ReapError> {
            match self.result.take() {
                Some(pids) => Ok(pids),
                None => Err(ReapError::Discovery {
                    pid: root,
                    reason: "root already exited".to_string(),
                }),
            }
        }
    }

    /// Records delivery order; selected pids refuse the signal.
    struct Recorder {
        sent: Vec<u32>,
        fail_send_on: HashSet<u32>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                sent: Vec::new(),
                fail_send_on: HashSet::new(),
            }
        }

        fn position(&self, pid: u32) -> usize {
            self.sent
                .iter()
                .position(|sent| *sent == pid)
                .unwrap_or_else(|| panic!("pid {pid} was never signaled"))
        }
    }

    impl SignalSender for Recorder {
        fn send(&mut self, pid: u32, _signal: Signal) -> Result<(), ReapError> {
            if self.fail_send_on.contains(&pid) {
                return Err(ReapError::Signal {
                    pid,
                    reason: "no such process".to_string(),
                });
            }
            self.sent.push(pid);
            Ok(())
        }
    }

    const ROOT: u32 = 1;
    const A: u32 = 2;
    const B: u32 = 3;
    const C: u32 = 4;

    #[test]
    fn post_order_signals_leaves_before_ancestors() {
        // root -> {A, B}, A -> {C}
        let mut table = FakeTable::new(&[(ROOT, &[A, B]), (A, &[C])]);
        let mut recorder = Recorder::new();

        sweep_post_order(&mut table, &mut recorder, ROOT, Signal::Kill);

        assert_eq!(recorder.sent.len(), 4);
        assert!(recorder.position(C) < recorder.position(A));
        assert!(recorder.position(A) < recorder.position(ROOT));
        assert!(recorder.position(B) < recorder.position(ROOT));
        assert_eq!(*recorder.sent.last().unwrap(), ROOT);
    }

    #[test]
    fn post_order_signals_every_node_exactly_once() {
        let mut table = FakeTable::new(&[(ROOT, &[A, B]), (A, &[C])]);
        let mut recorder = Recorder::new();

        sweep_post_order(&mut table, &mut recorder, ROOT, Signal::Term);

        let mut sorted = recorder.sent.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![ROOT, A, B, C]);
    }

    #[test]
    fn discovery_failure_degrades_node_to_leaf() {
        let mut table = FakeTable::new(&[(ROOT, &[A, B]), (A, &[C])]);
        table.fail_discovery_on.insert(A);
        let mut recorder = Recorder::new();

        sweep_post_order(&mut table, &mut recorder, ROOT, Signal::Kill);

        // C is unreachable once A's discovery fails, but A itself is still
        // signaled and the rest of the tree is unaffected.
        assert!(recorder.sent.contains(&A));
        assert!(recorder.sent.contains(&B));
        assert_eq!(*recorder.sent.last().unwrap(), ROOT);
        assert!(!recorder.sent.contains(&C));
    }

    #[test]
    fn signal_failure_does_not_abort_remaining_nodes() {
        let mut table = FakeTable::new(&[(ROOT, &[A, B]), (A, &[C])]);
        let mut recorder = Recorder::new();
        recorder.fail_send_on.insert(A);

        sweep_post_order(&mut table, &mut recorder, ROOT, Signal::Kill);

        assert!(recorder.sent.contains(&C));
        assert!(recorder.sent.contains(&B));
        assert_eq!(*recorder.sent.last().unwrap(), ROOT);
    }

    #[test]
    fn sweep_of_unknown_pid_still_signals_it() {
        let mut table = FakeTable::new(&[]);
        let mut recorder = Recorder::new();

        sweep_post_order(&mut table, &mut recorder, 5555, Signal::Kill);

        assert_eq!(recorder.sent, vec![5555]);
    }

    #[tokio::test]
    async fn reversed_sweep_signals_enumeration_backwards_then_root() {
        // Parent-first enumeration of root -> A -> B -> C.
        let mut enumeration = FakeEnumeration {
            result: Some(vec![A, B, C]),
        };
        let mut recorder = Recorder::new();

        sweep_reversed(&mut enumeration, &mut recorder, ROOT, Signal::Kill).await;

        assert_eq!(recorder.sent, vec![C, B, A, ROOT]);
    }

    #[tokio::test]
    async fn reversed_sweep_signals_root_when_enumeration_fails() {
        let mut enumeration = FakeEnumeration { result: None };
        let mut recorder = Recorder::new();

        sweep_reversed(&mut enumeration, &mut recorder, ROOT, Signal::Kill).await;

        assert_eq!(recorder.sent, vec![ROOT]);
    }

    #[tokio::test]
    async fn reversed_sweep_tolerates_exited_descendant() {
        let mut enumeration = FakeEnumeration {
            result: Some(vec![A, B, C]),
        };
        let mut recorder = Recorder::new();
        recorder.fail_send_on.insert(B);

        sweep_reversed(&mut enumeration, &mut recorder, ROOT, Signal::Kill).await;

        assert_eq!(recorder.sent, vec![C, A, ROOT]);
    }
}
