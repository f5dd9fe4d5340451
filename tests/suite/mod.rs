//! Integration test modules

mod logging;
mod process;
