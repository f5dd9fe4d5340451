//! Core domain types for tickloop.
//!
//! This crate contains pure domain types with no IO and no syscalls.
//! The OS-facing event loop in `tickloop-core` is built on top of them.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod bits;
mod interval;
mod mailbox;
mod quit;

pub use bits::{leading_zeros, popcount};
pub use interval::{Interval, IntervalError};
pub use mailbox::{Mailbox, Publisher};
pub use quit::QuitScanner;
