use treereap_core::TreeReaper;

#[cfg(unix)]
use treereap_unix::UnixReaper;
#[cfg(windows)]
use treereap_windows::WindowsReaper;

/// Select the termination strategy for the host platform. Chosen once per
/// call and injected into the sweep, never consulted per descendant.
pub(crate) fn platform_reaper() -> impl TreeReaper {
    #[cfg(unix)]
    {
        UnixReaper::new()
    }

    #[cfg(windows)]
    {
        WindowsReaper::new()
    }

    #[cfg(not(any(unix, windows)))]
    {
        compile_error!("unsupported platform: only Unix and Windows are supported")
    }
}

/// Platform name for logging and debugging.
pub fn platform_name() -> &'static str {
    #[cfg(unix)]
    {
        "Unix"
    }

    #[cfg(windows)]
    {
        "Windows"
    }
}

/// Liveness probe for callers that need termination confirmation: poll
/// for the identifier's absence after a sweep returns.
pub fn is_running(pid: u32) -> bool {
    #[cfg(unix)]
    {
        treereap_unix::is_running(pid)
    }

    #[cfg(windows)]
    {
        treereap_windows::is_running(pid)
    }
}
