use async_trait::async_trait;
use sysinfo::System;
use tracing::debug;
use treereap_core::{ReapError, Signal, TreeReaper, best_effort};

/// Windows termination strategy: one `taskkill /T` call covers the root
/// and its whole tree, so there is no per-node traversal here.
pub struct WindowsReaper;

impl WindowsReaper {
    pub fn new() -> Self {
        Self
    }

    /// `/T` sweeps the tree; `/F` forces, matching the unconditional-kill
    /// signal. Softer signals fall back to taskkill's default WM_CLOSE
    /// style request, the closest thing Windows has to SIGTERM.
    fn tree_args(root: u32, signal: Signal) -> Vec<String> {
        let mut args = vec!["/T".to_string(), "/PID".to_string(), root.to_string()];
        if signal == Signal::Kill {
            args.insert(0, "/F".to_string());
        }
        args
    }

    fn check(root: u32, output: std::process::Output) -> Result<(), ReapError> {
        if output.status.success() {
            Ok(())
        } else {
            Err(ReapError::Signal {
                pid: root,
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    fn taskkill_tree_blocking(root: u32, signal: Signal) -> Result<(), ReapError> {
        let output = std::process::Command::new("taskkill")
            .args(Self::tree_args(root, signal))
            .output()?;
        Self::check(root, output)
    }

    async fn taskkill_tree(root: u32, signal: Signal) -> Result<(), ReapError> {
        let output = tokio::process::Command::new("taskkill")
            .args(Self::tree_args(root, signal))
            .output()
            .await?;
        Self::check(root, output)
    }
}

impl Default for WindowsReaper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TreeReaper for WindowsReaper {
    fn platform_name(&self) -> &'static str {
        "Windows"
    }

    fn reap_blocking(&self, root: u32, signal: Signal) {
        debug!(root = %root, "native subtree taskkill");
        best_effort(
            "native subtree kill",
            Self::taskkill_tree_blocking(root, signal),
        );
    }

    async fn reap(&self, root: u32, signal: Signal) {
        debug!(root = %root, "native subtree taskkill");
        best_effort("native subtree kill", Self::taskkill_tree(root, signal).await);
    }
}

/// Process-table liveness probe, for callers that poll after a sweep.
pub fn is_running(pid: u32) -> bool {
    let mut system = System::new();
    system.refresh_processes_specifics(
        sysinfo::ProcessesToUpdate::All,
        true,
        sysinfo::ProcessRefreshKind::default(),
    );
    system
        .processes()
        .iter()
        .any(|(candidate, _)| candidate.as_u32() == pid)
}
