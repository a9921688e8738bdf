use std::process::{Command, Output};

fn lifecore(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lifecore"))
        .args(args)
        .output()
        .expect("binary runs")
}

#[test]
fn missing_seed_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-pattern.txt");

    let out = lifecore(&["--seed", path.to_str().unwrap(), "-g", "1"]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("error:"), "stderr was {stderr:?}");
    assert!(stderr.contains("not found"), "stderr was {stderr:?}");
    // fails before any engine is built
    assert!(!String::from_utf8_lossy(&out.stdout).contains("alive:"));
}

#[test]
fn oversized_size_is_rejected() {
    let out = lifecore(&["--size", "4294967296", "-g", "1"]);

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("--size"));
}

#[test]
fn headless_run_stops_at_generation_limit() {
    let out = lifecore(&["-g", "5"]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("alive: 36"), "stdout was {stdout:?}");
    assert!(stdout.trim_end().lines().last().is_some_and(|l| l.starts_with("gen:5 alive:")));
}

#[test]
fn help_prints_usage() {
    let out = lifecore(&["--help"]);

    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("usage: lifecore"));
}
