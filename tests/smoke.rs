mod common;

use assert_cmd::Command;

#[test]
fn cli_help_runs() {
    let mut cmd = Command::cargo_bin("repurpose").expect("binary exists");
    cmd.arg("--help").assert().success();
}

#[test]
fn resolve_reads_the_configured_index() {
    let dir = tempfile::tempdir().unwrap();
    let index = dir.path().join("index.json");
    std::fs::write(&index, common::index_json().to_string()).unwrap();

    let mut cmd = Command::cargo_bin("repurpose").expect("binary exists");
    let run = cmd
        .current_dir(dir.path())
        .env("INDEX_PATH", &index)
        .args(["resolve", "asprin", "--text"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&run.get_output().stdout).into_owned();
    assert!(stdout.contains("Did you mean"));
    assert!(stdout.contains("- Aspirin"));
}

#[test]
fn missing_index_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("repurpose").expect("binary exists");
    cmd.current_dir(dir.path())
        .env("INDEX_PATH", dir.path().join("absent.json"))
        .args(["catalog"])
        .assert()
        .failure();
}
