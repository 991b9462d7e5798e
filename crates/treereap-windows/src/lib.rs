//! Windows-specific process-tree termination
//!
//! Windows offers a native one-shot subtree primitive (`taskkill /T`), so
//! no explicit descendant enumeration is needed on this platform.

mod windows_reaper;

pub use windows_reaper::{WindowsReaper, is_running};
