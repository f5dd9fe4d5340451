//! Periodic task actions.
//!
//! Each task owns one [`Mailbox`]. On every tick it takes the published value,
//! if any, and prints one derived line. An empty mailbox is a silent no-op.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use tickloop_types::{Mailbox, Publisher, leading_zeros, popcount};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// `popcnt(<n>) = <v>`
    Popcount,
    /// `lzcnt(<n>) = <v>`
    LeadingZeros,
}

impl TaskKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            TaskKind::Popcount => "popcnt",
            TaskKind::LeadingZeros => "lzcnt",
        }
    }

    #[must_use]
    pub const fn compute(self, value: i32) -> u32 {
        match self {
            TaskKind::Popcount => popcount(value),
            TaskKind::LeadingZeros => leading_zeros(value),
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug)]
pub struct Task {
    kind: TaskKind,
    mailbox: Arc<Mailbox>,
}

impl Task {
    #[must_use]
    pub fn new(kind: TaskKind) -> Self {
        Self {
            kind,
            mailbox: Arc::new(Mailbox::new()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Producer handle for this task's input.
    #[must_use]
    pub fn publisher(&self) -> Publisher {
        Publisher::new(Arc::clone(&self.mailbox))
    }

    #[must_use]
    pub fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    /// Run one tick. Returns true if a line was written.
    pub fn run(&self, out: &mut dyn Write) -> Result<bool> {
        let Some(value) = self.mailbox.take() else {
            return Ok(false);
        };
        let result = self.kind.compute(value);
        writeln!(out, "{}({value}) = {result}", self.kind.label())
            .and_then(|()| out.flush())
            .map_err(|source| Error::Output {
                task: self.kind.label(),
                source,
            })?;
        Ok(true)
    }
}
