//! End-to-end tests for the `alift` binary.

use std::process::{Command, Output};

fn alift(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_alift"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run alift")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_check_passes() {
    let output = alift(&["check"]);
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_lift_blocks() {
    let output = alift(&["lift", "010000d4c0035fd6"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "0x00000000: SET_REG(syscall_imm,CONST(0)); SYSCALL(); RET(REG(x30))\n"
    );
}

#[test]
fn test_lift_oracle_llil() {
    let output = alift(&["lift", "--llil", "--oracle", "1f2003d5"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "LLIL_INTRINSIC([],SystemHintOp_NOP,LLIL_CALL_PARAM([]))\n"
    );
}

#[test]
fn test_lift_no_optimize() {
    let output = alift(&["lift", "--no-optimize", "--oracle", "e00300aa"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "SET_REG(x0,REG(x0))\n");
}

#[test]
fn test_lift_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("inputs.txt");
    std::fs::write(&path, "# barriers\nbf3f03d5\n\n9f3f03d5  # dsb sy\n").expect("write inputs");

    let output = alift(&["lift", "--oracle", "--file", path.to_str().expect("utf-8 path")]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "INTRINSIC([],__dmb,CALL_PARAM([]))\nINTRINSIC([],__dsb,CALL_PARAM([]))\n"
    );
}

#[test]
fn test_lift_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing.txt");
    let output = alift(&["lift", "--file", path.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_lift_truncated_fails() {
    let output = alift(&["lift", "1f2003"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_disasm() {
    let output = alift(&["disasm", "--base", "0x1000", "1f2003d5"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0x00001000  d503201f  hint       nop\n");
}

#[test]
fn test_sweep_samples() {
    let output = alift(&["sweep", "--start", "0", "--end", "0x1000000", "--step", "8388608"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "00000000: .inst 0x00000000\n01000000: .inst 0x01000000\n"
    );
}

#[test]
fn test_lift_base_overflow_fails() {
    let output = alift(&["lift", "--base", "0xfffffffffffffffc", "1f2003d5"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
}
