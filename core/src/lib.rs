//! Single-threaded readiness event loop for tickloop.
//!
//! Waitable sources (timers, non-blocking input) are paired with one
//! [`Handler`] each and dispatched from a level-triggered epoll loop.
//!
//! - **`reactor`**: callback registry and the blocking dispatch loop
//! - **`timer`** / **`input`**: the two kinds of waitable source
//! - **`tasks`**: the periodic actions and their shared-state handoff
//! - **`app`**: the demo wiring of two timers and standard input

#![cfg(target_os = "linux")]

mod app;
mod error;
mod handlers;
mod input;
mod reactor;
mod selector;
mod sys;
mod tasks;
mod timer;

pub use app::App;
pub use error::{Error, ErrorCategory, Result};
pub use handlers::{InputHandler, TimerHandler};
pub use input::{Drain, InputSource, READ_CHUNK};
pub use reactor::{Control, EventLoop, Handler, LoopBuilder, Turn};
pub use selector::{Readiness, Token};
pub use tasks::{Task, TaskKind};
pub use timer::TimerSource;
