//! Thin wrappers over the libc calls the sources need.

use std::io;
use std::os::fd::{AsRawFd, BorrowedFd, FromRawFd, OwnedFd};

/// Map a C-style `-1` return to the thread's last OS error.
pub(crate) fn cvt(ret: libc::c_int) -> io::Result<libc::c_int> {
    if ret == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(ret)
    }
}

/// Take ownership of a descriptor returned by a creating syscall.
pub(crate) fn owned(ret: libc::c_int) -> io::Result<OwnedFd> {
    let fd = cvt(ret)?;
    // SAFETY: `fd` was just returned by the kernel and is owned by no one else.
    Ok(unsafe { OwnedFd::from_raw_fd(fd) })
}

/// Fetch the file status flags (`F_GETFL`).
pub(crate) fn status_flags(fd: BorrowedFd<'_>) -> io::Result<libc::c_int> {
    // SAFETY: F_GETFL takes no argument and `fd` is open for the borrow.
    cvt(unsafe { libc::fcntl(fd.as_raw_fd(), libc::F_GETFL) })
}

/// Replace the file status flags (`F_SETFL`).
pub(crate) fn set_status_flags(fd: BorrowedFd<'_>, flags: libc::c_int) -> io::Result<()> {
    // SAFETY: F_SETFL takes an int flag set and `fd` is open for the borrow.
    cvt(unsafe { libc::fcntl(fd.as_raw_fd(), libc::F_SETFL, flags) })?;
    Ok(())
}

/// Set O_NONBLOCK on the open file description behind `fd`.
///
/// Returns the flags as they were before, or `None` when the flag was
/// already set and nothing was changed.
pub(crate) fn set_nonblocking(fd: BorrowedFd<'_>) -> io::Result<Option<libc::c_int>> {
    let flags = status_flags(fd)?;
    if flags & libc::O_NONBLOCK != 0 {
        return Ok(None);
    }
    set_status_flags(fd, flags | libc::O_NONBLOCK)?;
    Ok(Some(flags))
}
