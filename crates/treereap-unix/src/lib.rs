//! Unix-specific process-tree termination
//!
//! No native one-shot subtree primitive exists here, so termination goes
//! through explicit descendant discovery against the process table.

mod unix_reaper;

pub use unix_reaper::UnixReaper;

#[cfg(unix)]
pub use unix_reaper::{NixSignals, SysinfoTable, is_running};
