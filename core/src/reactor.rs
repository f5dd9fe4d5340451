//! Readiness event loop and its callback registry.
//!
//! # Architecture
//!
//! ```text
//! LoopBuilder::new() -> register(handler)* -> build() -> EventLoop::run()
//!                                                            |
//!                                   epoll_wait (no timeout) <-+
//!                                          |
//!                                          v
//!                    Handler::on_ready(readiness) per ready token
//! ```
//!
//! Every registered descriptor is paired with exactly one [`Handler`] for the
//! life of the loop. There is no unregister: once [`LoopBuilder::build`] has
//! run, the registry is closed. A handler that reports [`Control::Hangup`]
//! stops being watched by epoll but keeps its registry slot. The loop never
//! decides that on its own: [`Readiness`] is handed to the handler, which
//! drains its source first.
//!
//! Handlers run one at a time, to completion, on the loop's thread. A handler
//! that blocks stalls every other source.

use std::io;
use std::os::fd::BorrowedFd;

use crate::error::{Error, Result};
use crate::selector::{Readiness, Selector, Token, event_readiness, event_token};

/// What the loop should do after a handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// The source will never become useful again; stop watching it.
    Hangup,
    /// Stop the loop. Remaining ready handles in the batch are not dispatched.
    Quit,
}

/// Action bound to one waitable handle.
pub trait Handler {
    /// Short label for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// The descriptor the loop waits on. Must stay the same for the handler's
    /// whole life.
    fn source(&self) -> BorrowedFd<'_>;

    /// Called once per readiness notification.
    fn on_ready(&mut self, ready: Readiness) -> Result<Control>;
}

struct Entry {
    handler: Box<dyn Handler>,
    watched: bool,
}

/// Collects `(handle, action)` pairs before the loop starts.
pub struct LoopBuilder {
    selector: Selector,
    entries: Vec<Entry>,
}

impl LoopBuilder {
    pub fn new() -> Result<Self> {
        let selector = Selector::new().map_err(Error::setup("epoll_create1"))?;
        Ok(Self {
            selector,
            entries: Vec::new(),
        })
    }

    pub fn register(mut self, handler: impl Handler + 'static) -> Result<Self> {
        let token = Token(self.entries.len());
        self.selector
            .register(handler.source(), token)
            .map_err(Error::setup("epoll_ctl"))?;
        tracing::debug!(handler = handler.name(), token = token.0, "registered");
        self.entries.push(Entry {
            handler: Box::new(handler),
            watched: true,
        });
        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> EventLoop {
        let events = Vec::with_capacity(self.entries.len().max(1));
        EventLoop {
            selector: self.selector,
            entries: self.entries,
            events,
        }
    }
}

/// Result of one wait-and-dispatch pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Turn {
    pub dispatched: usize,
    pub quit: bool,
}

pub struct EventLoop {
    selector: Selector,
    entries: Vec<Entry>,
    events: Vec<libc::epoll_event>,
}

impl EventLoop {
    /// Dispatch batches until a handler asks to quit.
    ///
    /// Any error is fatal: it is returned as-is and the loop is left as it was
    /// when the error happened.
    pub fn run(&mut self) -> Result<()> {
        tracing::debug!(handlers = self.entries.len(), "event loop started");
        loop {
            if self.turn()?.quit {
                return Ok(());
            }
        }
    }

    /// Block for one batch of ready handles and dispatch it in reported order.
    pub fn turn(&mut self) -> Result<Turn> {
        loop {
            match self.selector.select(&mut self.events) {
                Ok(()) => break,
                // SIGSTOP/SIGCONT interrupts epoll_wait even without handlers.
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(Error::Wait(err)),
            }
        }

        let mut turn = Turn::default();
        for event in &self.events {
            let Token(index) = event_token(event);
            let Some(entry) = self.entries.get_mut(index) else {
                tracing::warn!(token = index, "event for unknown token");
                continue;
            };
            if !entry.watched {
                continue;
            }

            tracing::trace!(handler = entry.handler.name(), "dispatch");
            turn.dispatched += 1;
            match entry.handler.on_ready(event_readiness(event))? {
                Control::Continue => {}
                Control::Hangup => {
                    self.selector
                        .deregister(entry.handler.source())
                        .map_err(Error::setup("epoll_ctl"))?;
                    entry.watched = false;
                    tracing::info!(handler = entry.handler.name(), "source hung up");
                }
                Control::Quit => {
                    turn.quit = true;
                    return Ok(turn);
                }
            }
        }

        Ok(turn)
    }

    /// Number of registered handlers, watched or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the handler registered under `name` is still being watched.
    #[must_use]
    pub fn is_watched(&self, name: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|entry| entry.handler.name() == name)
            .map(|entry| entry.watched)
    }
}
