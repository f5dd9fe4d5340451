//! Log routing: never standard output.

use std::fs;

use crate::common::{EXIT_DEADLINE, Running};

#[test]
fn log_file_receives_loop_events() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("logs").join("tickloop.log");
    let log_path_str = log_path.to_str().unwrap();

    let mut running = Running::spawn_with_env(&[
        ("TICKLOOP_LOG", "debug"),
        ("TICKLOOP_LOG_FILE", log_path_str),
    ]);
    running.send(b"q\n");
    let status = running.wait_for_exit(EXIT_DEADLINE).expect("exit");
    assert!(status.success());

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("Logging initialized"), "{log}");
    assert!(log.contains("registered"), "{log}");
    assert!(log.contains("quit requested"), "{log}");
    assert_eq!(running.stdout(), "");
    assert_eq!(running.stderr(), "");
}

#[test]
fn default_logging_goes_to_stderr() {
    let mut running = Running::spawn_with_env(&[("TICKLOOP_LOG", "info")]);
    running.send(b"exit\n");
    running.wait_for_exit(EXIT_DEADLINE).expect("exit");

    assert!(running.stderr().contains("quit requested"));
    assert_eq!(running.stdout(), "");
}

#[test]
fn invalid_filter_falls_back_with_warning() {
    let mut running = Running::spawn_with_env(&[("TICKLOOP_LOG", "tickloop=notalevel")]);
    running.send(b"q\n");
    let status = running.wait_for_exit(EXIT_DEADLINE).expect("exit");
    assert!(status.success());
    assert!(running.stderr().contains("Invalid log filter"));
}

#[test]
fn unwritable_log_file_falls_back_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be opened for appending.
    let target = dir.path().to_str().unwrap();

    let mut running = Running::spawn_with_env(&[("TICKLOOP_LOG_FILE", target)]);
    running.send(b"q\n");
    let status = running.wait_for_exit(EXIT_DEADLINE).expect("exit");
    assert!(status.success());
    assert!(running.stderr().contains("Failed to open log file"));
}
