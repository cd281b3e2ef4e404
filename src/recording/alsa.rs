//! ALSA stderr suppression for Linux.
//!
//! The ALSA library prints warnings directly to stderr while devices are
//! probed. These come from inside cpal and do not indicate actual errors,
//! so device enumeration and stream setup run with stderr redirected to
//! /dev/null.

#[cfg(target_os = "linux")]
use std::fs::OpenOptions;
#[cfg(target_os = "linux")]
use std::os::unix::io::AsRawFd;

/// Runs `f` with stderr temporarily redirected to /dev/null.
///
/// If the redirection cannot be set up, the closure runs unsuppressed.
#[cfg(target_os = "linux")]
pub fn suppress_stderr<F, T>(f: F) -> T
where
    F: FnOnce() -> T,
{
    let Ok(dev_null) = OpenOptions::new().write(true).open("/dev/null") else {
        return f();
    };
    let dev_null_fd = dev_null.as_raw_fd();

    // Save the current stderr file descriptor
    let old_stderr = unsafe { libc::dup(libc::STDERR_FILENO) };
    if old_stderr == -1 {
        return f();
    }

    // Redirect stderr to /dev/null
    let redirect_result = unsafe { libc::dup2(dev_null_fd, libc::STDERR_FILENO) };
    if redirect_result == -1 {
        unsafe { libc::close(old_stderr) };
        return f();
    }

    // Execute the closure
    let result = f();

    // Restore the original stderr
    unsafe {
        libc::dup2(old_stderr, libc::STDERR_FILENO);
        libc::close(old_stderr);
    }

    result
}

/// On non-Linux platforms, no stderr suppression is needed since ALSA doesn't exist.
#[cfg(not(target_os = "linux"))]
pub fn suppress_stderr<F, T>(f: F) -> T
where
    F: FnOnce() -> T,
{
    f()
}
