use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const BIN: &str = env!("CARGO_BIN_EXE_efficiency-plots");

fn run(args: &[&str], input: &Path, output: &Path) -> Output {
    Command::new(BIN)
        .args(args)
        .arg("--input-dir")
        .arg(input)
        .arg("--output-dir")
        .arg(output)
        .output()
        .unwrap()
}

#[test]
fn missing_inputs_fail_every_job_without_stopping_the_others() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let result = run(&[], input.path(), output.path());
    assert!(!result.status.success());

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("0 ok, 7 failed"));
    for job in ["pdf:f", "pdf:g", "pdf:efficiency", "pdf:approx", "reco", "approx"] {
        assert!(stdout.contains(job), "missing {} in summary", job);
    }
}

#[test]
fn single_job_reports_its_failure() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let result = run(&["--job", "reco"], input.path(), output.path());
    assert!(!result.status.success());

    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("fsamples.csv"));
}

#[test]
fn only_selects_the_listed_jobs() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let result = run(
        &["--only", "reco", "--only", "approx", "--threads"],
        input.path(),
        output.path(),
    );
    assert!(!result.status.success());

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("0 ok, 2 failed"));
    assert!(!stdout.contains("efficiency"));
}

#[test]
fn unknown_job_name_is_rejected() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let result = run(&["--job", "bogus"], input.path(), output.path());
    assert!(!result.status.success());
    assert!(fs::read_dir(output.path()).unwrap().next().is_none());
}

#[test]
#[ignore = "Font rendering not available in test environment"]
fn child_process_renders_with_forwarded_settings() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("domain_f.csv"), "-3,-1,1,3,5,7").unwrap();
    fs::write(input.path().join("vals_f.csv"), "0.1,0.4,0.9,0.6,0.3,0.1").unwrap();

    let result = run(
        &["--only", "pdf:f", "--low", "-3", "--high", "7", "--edges", "21"],
        input.path(),
        output.path(),
    );
    assert!(result.status.success());

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("1 ok, 0 failed"));
    assert!(output.path().join("f.png").exists());
}
