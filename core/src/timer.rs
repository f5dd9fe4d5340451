//! Periodic wakeup source backed by a timerfd.

use std::fs::File;
use std::io::{self, Read};
use std::os::fd::{AsFd, AsRawFd, BorrowedFd};

use tickloop_types::Interval;

use crate::error::{Error, Result};
use crate::sys::{cvt, owned};

/// A monotonic timer that becomes readable once per elapsed interval.
///
/// The first expiry is one full interval after creation. The descriptor is
/// non-blocking, so consuming with nothing pending is reported instead of
/// stalling the loop.
#[derive(Debug)]
pub struct TimerSource {
    name: &'static str,
    interval: Interval,
    file: File,
}

impl TimerSource {
    pub fn new(name: &'static str, interval: Interval) -> Result<Self> {
        // SAFETY: plain syscall, no pointers.
        let fd = owned(unsafe {
            libc::timerfd_create(
                libc::CLOCK_MONOTONIC,
                libc::TFD_CLOEXEC | libc::TFD_NONBLOCK,
            )
        })
        .map_err(Error::setup("timerfd_create"))?;

        let period = libc::timespec {
            tv_sec: interval.secs() as libc::time_t,
            tv_nsec: interval.subsec_nanos() as libc::c_long,
        };
        let spec = libc::itimerspec {
            it_interval: period,
            it_value: period,
        };
        // SAFETY: `spec` outlives the call; a null old-value pointer is allowed.
        cvt(unsafe {
            libc::timerfd_settime(fd.as_raw_fd(), 0, &raw const spec, std::ptr::null_mut())
        })
        .map_err(Error::setup("timerfd_settime"))?;

        tracing::debug!(timer = name, %interval, "timer armed");
        Ok(Self {
            name,
            interval,
            file: File::from(fd),
        })
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Clear the pending expiration and return how many intervals elapsed
    /// since the previous consume.
    ///
    /// Must be called once per readiness notification. Calling it with no
    /// expiration pending is a usage error.
    pub fn consume(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        loop {
            match self.file.read(&mut buf) {
                Ok(8) => return Ok(u64::from_ne_bytes(buf)),
                Ok(len) => {
                    return Err(Error::ShortTimerRead {
                        source_name: self.name,
                        len,
                    });
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) if err.kind() == io::ErrorKind::WouldBlock => {
                    return Err(Error::NoPendingExpiration {
                        source_name: self.name,
                    });
                }
                Err(source) => {
                    return Err(Error::Read {
                        source_name: self.name,
                        source,
                    });
                }
            }
        }
    }
}

impl AsFd for TimerSource {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.file.as_fd()
    }
}
