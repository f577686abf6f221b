/// Returns true when the current process runs as root (UID 0).
/// Root ignores directory permissions, so permission-denial tests skip themselves.
#[inline]
pub fn running_as_root() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: libc call has no side effects; used for testing only.
        unsafe { libc::geteuid() == 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}
