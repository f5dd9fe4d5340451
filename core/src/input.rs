//! Non-blocking line input, normally the process's standard input.

use std::fs::File;
use std::io::{self, Read};
use std::os::fd::{AsFd, BorrowedFd, OwnedFd};

use tickloop_types::QuitScanner;

use crate::error::{Error, Result};
use crate::sys::{set_nonblocking, set_status_flags};

/// Bytes requested per read.
pub const READ_CHUNK: usize = 128;

/// What one drain pass found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Drain {
    pub bytes: usize,
    /// A line asked the process to quit.
    pub quit: bool,
    /// A read returned zero bytes. On a terminal that is Ctrl-D and input
    /// can still follow; only a hangup says the writer is gone.
    pub eof: bool,
}

/// A non-blocking reader that watches its lines for a quit command.
///
/// The status flags it found are put back on drop, so a terminal shared with
/// the parent shell is not left non-blocking.
#[derive(Debug)]
pub struct InputSource {
    name: &'static str,
    file: File,
    scanner: QuitScanner,
    restore_flags: Option<libc::c_int>,
}

impl InputSource {
    /// Wrap standard input.
    ///
    /// O_NONBLOCK lives on the open file description, so it also applies to
    /// the process's own descriptor 0 until this source is dropped.
    pub fn stdin() -> Result<Self> {
        let fd = io::stdin()
            .as_fd()
            .try_clone_to_owned()
            .map_err(Error::setup("fcntl"))?;
        Self::from_fd("stdin", fd)
    }

    pub fn from_fd(name: &'static str, fd: impl Into<OwnedFd>) -> Result<Self> {
        let fd = fd.into();
        let restore_flags = set_nonblocking(fd.as_fd()).map_err(Error::setup("fcntl"))?;
        if restore_flags.is_some() {
            tracing::debug!(input = name, "switched to non-blocking reads");
        }
        Ok(Self {
            name,
            file: File::from(fd),
            scanner: QuitScanner::new(),
            restore_flags,
        })
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Read everything currently available.
    ///
    /// The source is level-triggered: leaving bytes behind would re-fire the
    /// notification immediately, and unread input would be left for whoever
    /// shares the descriptor. So the whole backlog is consumed before the
    /// caller acts on a quit request.
    ///
    /// A zero-byte read ends the pass but is not treated as closed here: a
    /// terminal returns one per Ctrl-D and keeps delivering input afterwards.
    pub fn drain(&mut self) -> Result<Drain> {
        let mut buf = [0u8; READ_CHUNK];
        let mut drain = Drain::default();

        loop {
            match self.file.read(&mut buf) {
                Ok(0) => {
                    drain.eof = true;
                    self.scanner.reset();
                    break;
                }
                Ok(n) => {
                    drain.bytes += n;
                    drain.quit |= self.scanner.feed(&buf[..n]);
                }
                Err(err) if err.kind() == io::ErrorKind::WouldBlock => break,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(source) => {
                    return Err(Error::Read {
                        source_name: self.name,
                        source,
                    });
                }
            }
        }

        Ok(drain)
    }
}

impl AsFd for InputSource {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.file.as_fd()
    }
}

impl Drop for InputSource {
    fn drop(&mut self) {
        let Some(flags) = self.restore_flags else {
            return;
        };
        if let Err(err) = set_status_flags(self.file.as_fd(), flags) {
            tracing::warn!(input = self.name, error = %err, "could not restore blocking reads");
        }
    }
}
