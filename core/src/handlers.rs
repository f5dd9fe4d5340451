//! Concrete handlers: a timer that drives a task, and the quit-watching input.

use std::io::Write;
use std::os::fd::{AsFd, BorrowedFd};

use crate::error::Result;
use crate::input::InputSource;
use crate::reactor::{Control, Handler};
use crate::selector::Readiness;
use crate::tasks::Task;
use crate::timer::TimerSource;

/// Clears its timer, then runs its task once.
pub struct TimerHandler<W> {
    timer: TimerSource,
    task: Task,
    out: W,
}

impl<W: Write> TimerHandler<W> {
    pub fn new(timer: TimerSource, task: Task, out: W) -> Self {
        Self { timer, task, out }
    }
}

impl<W: Write> Handler for TimerHandler<W> {
    fn name(&self) -> &'static str {
        self.timer.name()
    }

    fn source(&self) -> BorrowedFd<'_> {
        self.timer.as_fd()
    }

    fn on_ready(&mut self, _ready: Readiness) -> Result<Control> {
        let expirations = self.timer.consume()?;
        if expirations > 1 {
            tracing::warn!(
                timer = self.timer.name(),
                task = %self.task.kind(),
                missed = expirations - 1,
                "timer overrun"
            );
        }
        self.task.run(&mut self.out)?;
        Ok(Control::Continue)
    }
}

/// Drains the input and turns a quit line into [`Control::Quit`].
///
/// The input is only given up when epoll reports a hangup and the drain ran
/// into end of file. A bare zero-byte read (Ctrl-D on a terminal) keeps it
/// watched.
pub struct InputHandler {
    input: InputSource,
}

impl InputHandler {
    #[must_use]
    pub fn new(input: InputSource) -> Self {
        Self { input }
    }
}

impl Handler for InputHandler {
    fn name(&self) -> &'static str {
        self.input.name()
    }

    fn source(&self) -> BorrowedFd<'_> {
        self.input.as_fd()
    }

    fn on_ready(&mut self, ready: Readiness) -> Result<Control> {
        let drain = self.input.drain()?;
        tracing::trace!(input = self.input.name(), bytes = drain.bytes, "drained");
        if drain.quit {
            tracing::info!(input = self.input.name(), "quit requested");
            return Ok(Control::Quit);
        }
        if drain.eof && ready.is_hangup() {
            tracing::info!(input = self.input.name(), "end of input");
            return Ok(Control::Hangup);
        }
        Ok(Control::Continue)
    }
}
