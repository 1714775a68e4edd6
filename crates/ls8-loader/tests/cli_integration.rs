//! Integration tests for the `ls8` CLI.

use log as _;
use ls8_core as _;
use ls8_loader as _;
use simple_logger as _;
use thiserror as _;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ls8"))
}

fn sample_program(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("programs")
        .join(name)
}

fn create_temp_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write temp program");
    path
}

fn run_ls8(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .output()
        .expect("failed to run ls8")
}

fn run_sample(name: &str) -> Output {
    let path = sample_program(name);
    run_ls8(&[path.to_str().expect("utf-8 path")])
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn print8_prints_eight() {
    let output = run_sample("print8.ls8");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "8\n");
}

#[test]
fn mult_prints_product() {
    let output = run_sample("mult.ls8");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "72\n");
}

#[test]
fn stack_prints_in_pop_order() {
    let output = run_sample("stack.ls8");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "2\n4\n1\n");
}

#[test]
fn call_prints_each_doubled_value() {
    let output = run_sample("call.ls8");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "20\n30\n36\n60\n");
}

#[test]
fn pra_output_is_not_line_terminated() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let source = create_temp_file(
        temp_dir.path(),
        "hi.ls8",
        "10000010\n00000000\n01001000 # 'H'\n01001000 # PRA R0\n00000000\n\
         10000010\n00000000\n01101001 # 'i'\n01001000\n00000000\n00000001\n",
    );

    let output = run_ls8(&[source.to_str().expect("utf-8 path")]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "Hi");
}

#[test]
fn fault_reports_trace_line_and_fails() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let source = create_temp_file(
        temp_dir.path(),
        "bad.ls8",
        "10000010 # LDI R1,42\n00000001\n00101010\n11111111 # not an opcode\n",
    );

    let output = run_ls8(&[source.to_str().expect("utf-8 path")]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(
        stderr.contains("error: unrecognized opcode at pc 0x03"),
        "stderr: {stderr}"
    );
    assert!(
        stderr.contains("TRACE: 03 | FF 00 00 | 00 2A 00 00 00 00 00 FF"),
        "stderr: {stderr}"
    );
}

#[test]
fn divide_by_zero_is_reported() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let source = create_temp_file(
        temp_dir.path(),
        "div.ls8",
        "10100011 # DIV R0,R1\n00000000\n00000001\n00000001\n",
    );

    let output = run_ls8(&[source.to_str().expect("utf-8 path")]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("division by zero"));
}

#[test]
fn step_limit_exits_with_status_two() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let source = create_temp_file(
        temp_dir.path(),
        "spin.ls8",
        "10000010 # LDI R0,0\n00000000\n00000000\n01010100 # JMP R0\n00000000\n",
    );

    let output = run_ls8(&[source.to_str().expect("utf-8 path"), "--max-steps", "100"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("step limit reached after 100 instructions"));
}

#[test]
fn malformed_program_is_rejected_with_line_number() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let source = create_temp_file(temp_dir.path(), "typo.ls8", "00000001\nLDI\n");

    let output = run_ls8(&[source.to_str().expect("utf-8 path")]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("line 2: `LDI` is not a binary literal"));
    assert!(stdout_of(&output).is_empty());
}

#[test]
fn missing_file_is_reported() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let missing = temp_dir.path().join("missing.ls8");

    let output = run_ls8(&[missing.to_str().expect("utf-8 path")]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("failed to read"));
}

#[test]
fn no_arguments_prints_usage() {
    let output = run_ls8(&[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("missing program path"));
    assert!(stderr.contains("Usage: ls8"));
}

#[test]
fn help_goes_to_stdout() {
    let output = run_ls8(&["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).starts_with("Usage: ls8"));
}

#[test]
fn verbose_logs_instructions_to_stderr_only() {
    let output = Command::new(binary_path())
        .arg(sample_program("print8.ls8"))
        .arg("--verbose")
        .output()
        .expect("failed to run ls8");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "8\n");
    let stderr = stderr_of(&output);
    assert!(stderr.contains("LDI R0, 8"), "stderr: {stderr}");
    assert!(stderr.contains("PRN R0"), "stderr: {stderr}");
}
