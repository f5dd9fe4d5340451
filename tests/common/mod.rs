//! Shared test utilities and fixtures
//!
//! Spawns the built `tickloop` binary with piped standard streams.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// How long a quit command may take to end the process.
pub const EXIT_DEADLINE: Duration = Duration::from_secs(5);

/// How long a process must survive to count as "still running".
pub const SURVIVAL_WINDOW: Duration = Duration::from_millis(400);

pub struct Running {
    child: Child,
    stdin: Option<ChildStdin>,
}

impl Running {
    pub fn spawn() -> Self {
        Self::spawn_with_env(&[])
    }

    pub fn spawn_with_env(env: &[(&str, &str)]) -> Self {
        let mut command = Command::new(env!("CARGO_BIN_EXE_tickloop"));
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .env_remove("TICKLOOP_LOG")
            .env_remove("TICKLOOP_LOG_FILE");
        for (key, value) in env {
            command.env(key, value);
        }
        let mut child = command.spawn().expect("spawn tickloop");
        let stdin = child.stdin.take();
        Self { child, stdin }
    }

    pub fn send(&mut self, bytes: &[u8]) {
        let stdin = self.stdin.as_mut().expect("stdin already closed");
        stdin.write_all(bytes).expect("write to tickloop stdin");
        stdin.flush().expect("flush tickloop stdin");
    }

    /// Close the write end of the child's standard input.
    pub fn close_stdin(&mut self) {
        self.stdin.take();
    }

    /// Poll for exit until `deadline` passes.
    pub fn wait_for_exit(&mut self, deadline: Duration) -> Option<ExitStatus> {
        let started = Instant::now();
        loop {
            if let Some(status) = self.child.try_wait().expect("try_wait") {
                return Some(status);
            }
            if started.elapsed() >= deadline {
                return None;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    /// True if the process has not exited within `window`.
    pub fn survives(&mut self, window: Duration) -> bool {
        self.wait_for_exit(window).is_none()
    }

    pub fn stdout(&mut self) -> String {
        let mut out = String::new();
        if let Some(mut stdout) = self.child.stdout.take() {
            stdout.read_to_string(&mut out).expect("read stdout");
        }
        out
    }

    pub fn stderr(&mut self) -> String {
        let mut err = String::new();
        if let Some(mut stderr) = self.child.stderr.take() {
            stderr.read_to_string(&mut err).expect("read stderr");
        }
        err
    }
}

impl Drop for Running {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
