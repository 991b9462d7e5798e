use std::io;

/// Handle to a single spawned process.
///
/// A handle may or may not still expose its numeric identifier, but it
/// always carries a direct termination capability that reaches the one
/// process it wraps (and nothing spawned underneath it).
pub trait ProcessHandle: Send {
    /// Process identifier, `None` once the process has exited and been reaped.
    fn pid(&self) -> Option<u32>;

    /// Deliver a kill to the wrapped process without waiting for it to exit.
    fn start_kill(&mut self) -> io::Result<()>;
}

impl ProcessHandle for tokio::process::Child {
    fn pid(&self) -> Option<u32> {
        self.id()
    }

    fn start_kill(&mut self) -> io::Result<()> {
        tokio::process::Child::start_kill(self)
    }
}

impl ProcessHandle for std::process::Child {
    fn pid(&self) -> Option<u32> {
        Some(self.id())
    }

    fn start_kill(&mut self) -> io::Result<()> {
        self.kill()
    }
}

/// Reference to the root of the tree to terminate.
///
/// A closed variant type rather than "anything shaped like a process":
/// either a bare identifier or a handle borrowed for the duration of the
/// call. The subsystem never retains a reference past the call that
/// received it.
pub enum ProcessRef<'a> {
    /// Bare numeric process identifier.
    Pid(u32),
    /// Opaque handle that may or may not still expose its identifier.
    Handle(&'a mut dyn ProcessHandle),
}

impl ProcessRef<'_> {
    /// Normalize to a numeric identifier when one is available.
    ///
    /// Identifier-based termination is preferred because it reaches
    /// descendants; absence of an identifier is a normal outcome for a
    /// handle whose process already exited, not a failure.
    pub fn pid(&self) -> Option<u32> {
        match self {
            ProcessRef::Pid(pid) => Some(*pid),
            ProcessRef::Handle(handle) => handle.pid(),
        }
    }
}

impl From<u32> for ProcessRef<'static> {
    fn from(pid: u32) -> Self {
        ProcessRef::Pid(pid)
    }
}

impl<'a> From<&'a mut tokio::process::Child> for ProcessRef<'a> {
    fn from(child: &'a mut tokio::process::Child) -> Self {
        ProcessRef::Handle(child)
    }
}

impl<'a> From<&'a mut std::process::Child> for ProcessRef<'a> {
    fn from(child: &'a mut std::process::Child) -> Self {
        ProcessRef::Handle(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubHandle {
        pid: Option<u32>,
        kills: u32,
    }

    impl ProcessHandle for StubHandle {
        fn pid(&self) -> Option<u32> {
            self.pid
        }

        fn start_kill(&mut self) -> io::Result<()> {
            self.kills += 1;
            Ok(())
        }
    }

    #[test]
    fn bare_pid_normalizes_to_itself() {
        let target = ProcessRef::Pid(4242);
        assert_eq!(target.pid(), Some(4242));
    }

    #[test]
    fn handle_with_pid_normalizes_to_embedded_pid() {
        let mut handle = StubHandle {
            pid: Some(77),
            kills: 0,
        };
        let target = ProcessRef::Handle(&mut handle);
        assert_eq!(target.pid(), Some(77));
    }

    #[test]
    fn exited_handle_normalizes_to_none() {
        let mut handle = StubHandle {
            pid: None,
            kills: 0,
        };
        let target = ProcessRef::Handle(&mut handle);
        assert_eq!(target.pid(), None);
    }

    #[test]
    fn normalization_has_no_side_effects() {
        let mut handle = StubHandle {
            pid: Some(1),
            kills: 0,
        };
        let target = ProcessRef::Handle(&mut handle);
        let _ = target.pid();
        let _ = target.pid();
        drop(target);
        assert_eq!(handle.kills, 0);
    }

    #[test]
    fn pid_conversion_builds_pid_variant() {
        let target: ProcessRef<'_> = 9u32.into();
        assert!(matches!(target, ProcessRef::Pid(9)));
    }
}
