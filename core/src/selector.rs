//! Level-triggered epoll wrapper.
//!
//! Interest is always `EPOLLIN` without `EPOLLET`: a handle with unread data
//! keeps being reported until it is drained. `EPOLLHUP` is reported by the
//! kernel without being asked for, and is passed on as [`Readiness`].

use std::io;
use std::os::fd::{AsRawFd, BorrowedFd, OwnedFd};

use crate::sys::{cvt, owned};

/// Index of a registry entry, carried in the epoll event payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token(pub usize);

/// Flags that came with one readiness notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Readiness {
    hangup: bool,
}

impl Readiness {
    /// Readable, peer still connected.
    pub const READABLE: Self = Self { hangup: false };
    /// The other end is gone: a pipe with no writers left, a closed terminal.
    pub const HANGUP: Self = Self { hangup: true };

    #[must_use]
    pub const fn is_hangup(self) -> bool {
        self.hangup
    }
}

#[derive(Debug)]
pub(crate) struct Selector {
    ep: OwnedFd,
}

impl Selector {
    pub(crate) fn new() -> io::Result<Self> {
        // SAFETY: plain syscall, no pointers.
        let ep = owned(unsafe { libc::epoll_create1(libc::EPOLL_CLOEXEC) })?;
        Ok(Self { ep })
    }

    pub(crate) fn register(&self, fd: BorrowedFd<'_>, token: Token) -> io::Result<()> {
        let mut event = libc::epoll_event {
            events: libc::EPOLLIN as u32,
            u64: token.0 as u64,
        };
        // SAFETY: `event` outlives the call and both descriptors are open.
        cvt(unsafe {
            libc::epoll_ctl(
                self.ep.as_raw_fd(),
                libc::EPOLL_CTL_ADD,
                fd.as_raw_fd(),
                &raw mut event,
            )
        })?;
        Ok(())
    }

    /// Stop watching `fd`. The caller keeps its registry entry.
    pub(crate) fn deregister(&self, fd: BorrowedFd<'_>) -> io::Result<()> {
        // SAFETY: EPOLL_CTL_DEL ignores the event pointer on Linux >= 2.6.9.
        cvt(unsafe {
            libc::epoll_ctl(
                self.ep.as_raw_fd(),
                libc::EPOLL_CTL_DEL,
                fd.as_raw_fd(),
                std::ptr::null_mut(),
            )
        })?;
        Ok(())
    }

    /// Block until at least one registered descriptor is ready.
    ///
    /// `events` is cleared and refilled up to its capacity. EINTR surfaces as
    /// `ErrorKind::Interrupted`; the caller decides whether to retry.
    pub(crate) fn select(&self, events: &mut Vec<libc::epoll_event>) -> io::Result<()> {
        events.clear();
        let capacity = libc::c_int::try_from(events.capacity()).unwrap_or(libc::c_int::MAX);

        // SAFETY: the kernel writes at most `capacity` entries into the
        // vector's spare capacity.
        let n = cvt(unsafe {
            libc::epoll_wait(self.ep.as_raw_fd(), events.as_mut_ptr(), capacity, -1)
        })?;

        // SAFETY: `n` entries were initialised by epoll_wait and n <= capacity.
        unsafe { events.set_len(n as usize) };
        Ok(())
    }
}

/// Token stored in a ready event.
pub(crate) fn event_token(event: &libc::epoll_event) -> Token {
    let data = event.u64;
    Token(data as usize)
}

/// Flags stored in a ready event.
pub(crate) fn event_readiness(event: &libc::epoll_event) -> Readiness {
    let events = event.events;
    Readiness {
        hangup: events & (libc::EPOLLHUP as u32) != 0,
    }
}
