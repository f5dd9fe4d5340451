//! Fatal error taxonomy for the event loop.
//!
//! Nothing here is recoverable: every variant ends the process. "Would block"
//! and EINTR are handled where they occur and never surface as an `Error`.

use std::io;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Creating or configuring a source or the selector failed.
    Resource,
    /// The blocking wait itself failed.
    Wait,
    /// Reading a ready source failed.
    Read,
    /// Writing task output failed.
    Output,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{call}() failed")]
    Setup {
        call: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("epoll_wait() failed")]
    Wait(#[source] io::Error),
    #[error("read() from {source_name} failed")]
    Read {
        source_name: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("read() from {source_name} returned {len} bytes, expected 8")]
    ShortTimerRead { source_name: &'static str, len: usize },
    #[error("{source_name} was consumed with no pending expiration")]
    NoPendingExpiration { source_name: &'static str },
    #[error("failed to write {task} output")]
    Output {
        task: &'static str,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn setup(call: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Setup { call, source }
    }

    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Setup { .. } => ErrorCategory::Resource,
            Error::Wait(_) => ErrorCategory::Wait,
            Error::Read { .. }
            | Error::ShortTimerRead { .. }
            | Error::NoPendingExpiration { .. } => ErrorCategory::Read,
            Error::Output { .. } => ErrorCategory::Output,
        }
    }
}
