//! Integration tests that run the hgl binary

mod common;

use std::io::Write;
use std::process::{Command, Stdio};

use common::{create_temp_project, fixtures_dir};

fn hgl_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_hgl"))
}

#[test]
fn test_test_command_passing() {
    let output = hgl_bin()
        .arg("test")
        .arg(fixtures_dir().join("ita.hgl"))
        .output()
        .expect("Failed to run hgl");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.is_empty(), "No mismatches expected: {}", stdout);
}

#[test]
fn test_test_command_cover() {
    let output = hgl_bin()
        .arg("test")
        .arg("--cover")
        .arg(fixtures_dir().join("ita.hgl"))
        .output()
        .expect("Failed to run hgl");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "coverage: 60.0% of rules\n");
}

#[test]
fn test_test_command_coverprofile() {
    let project = create_temp_project(&["coverage.hgl"]);

    let output = hgl_bin()
        .current_dir(project.path())
        .arg("test")
        .arg("--coverprofile")
        .arg("cover.txt")
        .arg("coverage.hgl")
        .output()
        .expect("Failed to run hgl");

    assert!(
        output.status.success(),
        "Command should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // --coverprofile implies --cover
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "coverage: 66.7% of rules\n");

    let profile = std::fs::read_to_string(project.path().join("cover.txt"))
        .expect("Profile should be written");
    assert_eq!(
        profile,
        "mode: count\n\
         coverage.hgl:3.1,3.14 1 1\n\
         coverage.hgl:5.1,5.13 1 0\n\
         coverage.hgl:9.1,9.21 1 1\n"
    );
}

#[test]
fn test_test_command_mismatch() {
    let project = create_temp_project(&["mismatch.hgl"]);

    let output = hgl_bin()
        .current_dir(project.path())
        .arg("test")
        .arg("--cover")
        .arg("mismatch.hgl")
        .output()
        .expect("Failed to run hgl");

    assert!(!output.status.success(), "Command should fail on mismatch");
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "mismatch.hgl: \"b\" -> \"ㅂ\", expected: \"ㅍ\"\ncoverage: 100.0% of rules\n"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("FAIL"), "Should report failure: {}", stderr);
}

#[test]
fn test_test_command_missing_file() {
    let output = hgl_bin()
        .arg("test")
        .arg(fixtures_dir().join("does_not_exist.hgl"))
        .output()
        .expect("Failed to run hgl");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("does_not_exist.hgl"),
        "Should name the missing file: {}",
        stderr
    );
    assert!(stderr.contains("error:"), "Should use the error prefix: {}", stderr);
    assert!(!stderr.contains("Error:"), "Unexpected report format: {}", stderr);
}

#[test]
fn test_unknown_command() {
    let output = hgl_bin()
        .arg("frobnicate")
        .output()
        .expect("Failed to run hgl");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown command `frobnicate`"), "{}", stderr);
    assert!(stderr.contains("hgl test <file.hgl>"), "Should print usage: {}", stderr);
}

#[test]
fn test_test_command_explicit_config() {
    let project = create_temp_project(&["coverage.hgl"]);
    std::fs::write(project.path().join("hgl.yaml"), "coverprofile: from-config.txt\n").unwrap();

    let output = hgl_bin()
        .current_dir(project.path())
        .arg("test")
        .arg("-c")
        .arg("hgl.yaml")
        .arg("coverage.hgl")
        .output()
        .expect("Failed to run hgl");

    assert!(
        output.status.success(),
        "Command should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "coverage: 66.7% of rules\n");
    assert!(project.path().join("from-config.txt").exists());
}

#[test]
fn test_test_command_config_file() {
    let project = create_temp_project(&["coverage.hgl"]);
    let config_dir = project.path().join(".config/hgl");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.yaml"), "cover: true\n").unwrap();

    let output = hgl_bin()
        .current_dir(project.path())
        .arg("test")
        .arg("coverage.hgl")
        .output()
        .expect("Failed to run hgl");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "coverage: 66.7% of rules\n");
}

#[test]
fn test_dev_command_args() {
    let output = hgl_bin()
        .arg("dev")
        .arg(fixtures_dir().join("ita.hgl"))
        .arg("ciao")
        .arg("gli")
        .output()
        .expect("Failed to run hgl");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "차오\n리\n");
}

#[test]
fn test_dev_command_stdin_verbose() {
    let mut child = hgl_bin()
        .arg("dev")
        .arg("-v")
        .arg(fixtures_dir().join("ita.hgl"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to run hgl");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(b"gli\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 11);
    assert!(lines[0].starts_with("rewrite "));
    assert!(lines[0].ends_with(r#""^gli$" -> "li""#));
    assert_eq!(lines[10], "리");
}

#[test]
fn test_version_command() {
    let output = hgl_bin()
        .arg("version")
        .output()
        .expect("Failed to run hgl");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("hgl-"), "Unexpected output: {}", stdout);
}
