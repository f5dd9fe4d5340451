//! Exit-code contract of the `tickloop` binary.

use std::thread;
use std::time::Duration;

use crate::common::{EXIT_DEADLINE, Running, SURVIVAL_WINDOW};

fn assert_quits_on(input: &[u8]) {
    let mut running = Running::spawn();
    running.send(input);
    let status = running
        .wait_for_exit(EXIT_DEADLINE)
        .unwrap_or_else(|| panic!("no exit after {:?}", String::from_utf8_lossy(input)));
    assert!(status.success(), "status {status:?}");
}

#[test]
fn q_line_exits_successfully() {
    assert_quits_on(b"q\n");
}

#[test]
fn exit_is_matched_case_insensitively() {
    assert_quits_on(b"ExIt\n");
    assert_quits_on(b"EXIT\n");
}

#[test]
fn quit_on_a_later_line_exits() {
    assert_quits_on(b"hello\nworld\nplease quit\n");
}

#[test]
fn quit_after_a_large_backlog_exits() {
    let mut input = vec![b'x'; 4096];
    input.extend_from_slice(b"\nexit\n");
    assert_quits_on(&input);
}

#[test]
fn exit_split_across_writes_exits() {
    let mut running = Running::spawn();
    running.send(b"ex");
    thread::sleep(Duration::from_millis(50));
    assert!(running.survives(Duration::from_millis(100)));
    running.send(b"it\n");
    let status = running.wait_for_exit(EXIT_DEADLINE).expect("exit");
    assert!(status.success());
}

#[test]
fn ordinary_input_keeps_running() {
    let mut running = Running::spawn();
    running.send(b"hello\nworld\n1234\n");
    assert!(running.survives(SURVIVAL_WINDOW));

    // Still responsive after discarding the noise.
    running.send(b"exit\n");
    let status = running.wait_for_exit(EXIT_DEADLINE).expect("exit");
    assert!(status.success());
}

#[test]
fn idle_process_keeps_running_silently() {
    let mut running = Running::spawn();
    assert!(running.survives(SURVIVAL_WINDOW));
    running.send(b"q\n");
    running.wait_for_exit(EXIT_DEADLINE).expect("exit");
    assert_eq!(running.stdout(), "");
}

#[test]
fn closed_stdin_without_quit_keeps_running() {
    let mut running = Running::spawn();
    running.send(b"nothing to see\n");
    running.close_stdin();
    assert!(running.survives(SURVIVAL_WINDOW));
}

#[test]
fn exit_across_lines_is_not_a_quit() {
    let mut running = Running::spawn();
    running.send(b"ex\nit\n");
    assert!(running.survives(SURVIVAL_WINDOW));
}
