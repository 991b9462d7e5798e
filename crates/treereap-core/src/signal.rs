/// Termination strength applied uniformly to every process in one sweep.
///
/// The default is the strongest, unconditional kill. Callers wanting a
/// softer shutdown can substitute one of the other values; the same value
/// is delivered to every node of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Signal {
    /// Unconditional kill (SIGKILL on Unix, forced `taskkill` on Windows).
    #[default]
    Kill,
    /// Polite termination request (SIGTERM).
    Term,
    /// Keyboard-interrupt equivalent (SIGINT).
    Int,
    /// Quit with core dump (SIGQUIT).
    Quit,
}
