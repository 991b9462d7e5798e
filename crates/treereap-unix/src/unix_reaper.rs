#[cfg(unix)]
mod unix_impl {
    use async_trait::async_trait;
    use nix::sys::signal::{self, Signal as NixSignal};
    use nix::unistd::Pid as NixPid;
    use std::collections::VecDeque;
    use sysinfo::System;
    use tracing::debug;
    use treereap_core::{
        ChildSource, DescendantSource, ReapError, Signal, SignalSender, TreeReaper,
        sweep_post_order, sweep_reversed,
    };

    /// Live process-table view backed by sysinfo.
    ///
    /// Each query re-reads the table: the recursive sweep relies on every
    /// node performing its own independent discovery, and nothing here
    /// survives a single termination call.
    pub struct SysinfoTable {
        system: System,
    }

    impl SysinfoTable {
        pub fn new() -> Self {
            Self {
                system: System::new(),
            }
        }

        fn refresh(&mut self) {
            self.system.refresh_processes_specifics(
                sysinfo::ProcessesToUpdate::All,
                true,
                sysinfo::ProcessRefreshKind::default(),
            );
        }

        fn children_of(&self, parent: u32) -> Vec<u32> {
            self.system
                .processes()
                .iter()
                .filter(|(_, process)| {
                    process.parent().map(|ppid| ppid.as_u32()) == Some(parent)
                })
                .map(|(pid, _)| pid.as_u32())
                .collect()
        }
    }

    impl Default for SysinfoTable {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ChildSource for SysinfoTable {
        fn direct_children(&mut self, pid: u32) -> Result<Vec<u32>, ReapError> {
            self.refresh();
            Ok(self.children_of(pid))
        }
    }

    #[async_trait]
    impl DescendantSource for SysinfoTable {
        async fn descendants(&mut self, root: u32) -> Result<Vec<u32>, ReapError> {
            self.refresh();
            // Breadth-first walk from the root; parents always precede
            // what they spawned, so reversal gives a children-first order.
            let mut ordered = Vec::new();
            let mut frontier = VecDeque::from([root]);
            while let Some(parent) = frontier.pop_front() {
                for child in self.children_of(parent) {
                    ordered.push(child);
                    frontier.push_back(child);
                }
            }
            Ok(ordered)
        }
    }

    /// Signal delivery via kill(2).
    pub struct NixSignals;

    impl SignalSender for NixSignals {
        fn send(&mut self, pid: u32, signal: Signal) -> Result<(), ReapError> {
            let target = NixPid::from_raw(pid as i32);
            signal::kill(target, map_signal(signal)).map_err(|errno| ReapError::Signal {
                pid,
                reason: errno.to_string(),
            })
        }
    }

    fn map_signal(signal: Signal) -> NixSignal {
        match signal {
            Signal::Kill => NixSignal::SIGKILL,
            Signal::Term => NixSignal::SIGTERM,
            Signal::Int => NixSignal::SIGINT,
            Signal::Quit => NixSignal::SIGQUIT,
        }
    }

    /// Signal-0 liveness probe, for callers that poll after a sweep.
    pub fn is_running(pid: u32) -> bool {
        signal::kill(NixPid::from_raw(pid as i32), None).is_ok()
    }

    /// Unix termination strategy: explicit enumeration sweeps.
    pub struct UnixReaper;

    impl UnixReaper {
        pub fn new() -> Self {
            Self
        }
    }

    impl Default for UnixReaper {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl TreeReaper for UnixReaper {
        fn platform_name(&self) -> &'static str {
            "Unix"
        }

        fn reap_blocking(&self, root: u32, signal: Signal) {
            debug!(root = %root, "post-order subtree sweep");
            let mut table = SysinfoTable::new();
            let mut signals = NixSignals;
            sweep_post_order(&mut table, &mut signals, root, signal);
        }

        async fn reap(&self, root: u32, signal: Signal) {
            debug!(root = %root, "flat reverse-order subtree sweep");
            let mut table = SysinfoTable::new();
            let mut signals = NixSignals;
            sweep_reversed(&mut table, &mut signals, root, signal).await;
        }
    }

}

#[cfg(unix)]
pub use unix_impl::{NixSignals, SysinfoTable, UnixReaper, is_running};

// Stub so the crate still compiles when cross-checked from other hosts.
#[cfg(not(unix))]
pub struct UnixReaper;

#[cfg(not(unix))]
impl UnixReaper {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(unix))]
impl Default for UnixReaper {
    fn default() -> Self {
        Self::new()
    }
}
