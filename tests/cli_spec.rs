use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

const LATIN1_LOG: &[u8] = b"#Version: 1.0\n#Fields: date cs-uri-stem\n2019-01-01 /caf\xe9\n";

fn write_log(name: &str, data: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("cloudfront-cli-{}-{}.log", name, std::process::id()));
    std::fs::write(&path, data).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cloudfront-decode"))
        .args(args)
        .output()
        .unwrap()
}

fn assert_decoded_latin1(output: &Output) {
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("2019-01-01 /café"), "stdout: {stdout}");
    assert!(stdout.contains("Version: 1.0"), "stdout: {stdout}");
    assert!(stdout.contains("1 records decoded"), "stdout: {stdout}");
}

#[test]
fn charset_flag_before_path() {
    let path = write_log("before", LATIN1_LOG);
    let output = run(&["--charset", "CP1252", path.to_str().unwrap()]);
    std::fs::remove_file(&path).unwrap();

    assert_decoded_latin1(&output);
}

#[test]
fn charset_flag_after_path() {
    let path = write_log("after", LATIN1_LOG);
    let output = run(&[path.to_str().unwrap(), "--charset", "CP1252"]);
    std::fs::remove_file(&path).unwrap();

    assert_decoded_latin1(&output);
}

#[test]
fn missing_path_prints_usage() {
    let output = run(&["--charset", "CP1252"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn dangling_charset_flag_fails() {
    let output = run(&["file.log", "--charset"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--charset flag requires an argument"));
}

#[test]
fn dash_reads_from_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_cloudfront-decode"))
        .args(["-", "--charset", "CP1252"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(LATIN1_LOG).unwrap();
    let output = child.wait_with_output().unwrap();

    assert_decoded_latin1(&output);
}
