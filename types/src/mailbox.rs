//! Single-slot handoff between a producer and a periodic task.
//!
//! The ready flag and the payload share one atomic word, so a consumer that
//! observes the flag also observes the payload that was published with it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

const READY: u64 = 1 << 32;
const PAYLOAD: u64 = 0xFFFF_FFFF;

/// Ready flag plus a 32-bit payload.
///
/// `take` consumes a published value at most once. Clearing the flag leaves
/// the payload bits in place, so an empty `take` changes nothing.
#[derive(Debug, Default)]
pub struct Mailbox {
    cell: AtomicU64,
}

impl Mailbox {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: AtomicU64::new(0),
        }
    }

    /// Store `value` and raise the ready flag in one release store.
    ///
    /// An unconsumed previous value is overwritten.
    pub fn publish(&self, value: i32) {
        self.cell
            .store(READY | u64::from(value as u32), Ordering::Release);
    }

    /// Take the published value if the ready flag is set.
    pub fn take(&self) -> Option<i32> {
        let mut current = self.cell.load(Ordering::Acquire);
        loop {
            if current & READY == 0 {
                return None;
            }
            match self.cell.compare_exchange_weak(
                current,
                current & PAYLOAD,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Some((current & PAYLOAD) as u32 as i32),
                Err(observed) => current = observed,
            }
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.cell.load(Ordering::Acquire) & READY != 0
    }
}

/// Cloneable producer side of a [`Mailbox`].
#[derive(Debug, Clone)]
pub struct Publisher {
    mailbox: Arc<Mailbox>,
}

impl Publisher {
    #[must_use]
    pub fn new(mailbox: Arc<Mailbox>) -> Self {
        Self { mailbox }
    }

    pub fn publish(&self, value: i32) {
        self.mailbox.publish(value);
    }

    /// True while the last published value is still waiting for its task.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.mailbox.is_ready()
    }
}
