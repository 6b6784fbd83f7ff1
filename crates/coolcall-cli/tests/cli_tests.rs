//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ROSTER: &str = "<first>\t<last>\t<id>\t<email>\t<phonetic>\t<reveal>
Amy\tReichhold\t951000000\tareichh2@uoregon.edu\tAY-mee\t0
Quinn\tFetrow\t951000001\tqfetrow@uoregon.edu\tkwin\t0
Derek\tMartin\t951000002\tdmartin@uoregon.edu\tDARE-ik\t0
Arden\tButterfield\t951000003\tarden@cs.uoregon.edu\tAR-den\t0
Madison\tWerries\t951000004\tmwerries@uoregon.edu\tMAD-ih-son\t0
Fatima\tPatel\t951000005\tfpatel@uoregon.edu\tFAH-tee-mah\t0
Hidden\tStudent\t951000006\thidden@uoregon.edu\tHID-en\t1
";

/// A `coolcall` command isolated inside `dir`.
fn coolcall(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("coolcall").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("COOLCALL_DATA_DIR")
        .env_remove("COOLCALL_LOG_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn with_imported_roster() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("class.txt"), ROSTER).unwrap();
    coolcall(dir.path())
        .args(["import", "--roster", "class.txt", "--yes"])
        .assert()
        .success();
    dir
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    coolcall(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created coolcall.toml"))
        .stdout(predicate::str::contains("Created sample-roster.txt"));

    assert!(dir.path().join("coolcall.toml").exists());

    // The sample roster is itself valid.
    coolcall(dir.path())
        .args(["validate", "--roster", "sample-roster.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6 students"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();
    coolcall(dir.path()).arg("init").assert().success();
    coolcall(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_reports_counts() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("class.txt"), ROSTER).unwrap();

    coolcall(dir.path())
        .args(["validate", "--roster", "class.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7 students"))
        .stdout(predicate::str::contains("6 in the on-deck rotation"));
}

#[test]
fn validate_rejects_bad_email() {
    let dir = TempDir::new().unwrap();
    let bad = ROSTER.replace("qfetrow@uoregon.edu", "qfetrow@gmail.com");
    std::fs::write(dir.path().join("class.txt"), bad).unwrap();

    coolcall(dir.path())
        .args(["validate", "--roster", "class.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3"));
}

#[test]
fn validate_missing_file() {
    let dir = TempDir::new().unwrap();
    coolcall(dir.path())
        .args(["validate", "--roster", "nonexistent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to read roster file"));
}

#[test]
fn import_without_yes_is_a_preview() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("class.txt"), ROSTER).unwrap();

    coolcall(dir.path())
        .args(["import", "--roster", "class.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amy Reichhold"))
        .stdout(predicate::str::contains("Nothing imported"));

    assert!(!dir.path().join("coolcall-data/roster.txt").exists());
}

#[test]
fn import_persists_roster_and_queue() {
    let dir = with_imported_roster();

    let stored = std::fs::read_to_string(dir.path().join("coolcall-data/roster.txt")).unwrap();
    assert_eq!(stored, ROSTER);
    assert!(dir.path().join("coolcall-data/queue.json").exists());
}

#[test]
fn reimport_lists_changed_students() {
    let dir = with_imported_roster();
    let edited = ROSTER.replace("fpatel@uoregon.edu", "fatima@uoregon.edu");
    std::fs::write(dir.path().join("edited.txt"), edited).unwrap();

    coolcall(dir.path())
        .args(["import", "--roster", "edited.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("changes the stored data of Fatima Patel."));

    coolcall(dir.path())
        .args(["import", "--roster", "class.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No student data will be changed"));
}

#[test]
fn deck_is_stable_between_commands() {
    let dir = with_imported_roster();

    let first = coolcall(dir.path()).arg("deck").assert().success();
    let second = coolcall(dir.path()).arg("deck").assert().success();
    assert_eq!(first.get_output().stdout, second.get_output().stdout);

    let out = String::from_utf8(first.get_output().stdout.clone()).unwrap();
    assert!(out.contains("On deck"));
    assert!(!out.contains("Hidden Student"));
}

#[test]
fn call_records_history_and_logs() {
    let dir = with_imported_roster();

    coolcall(dir.path())
        .args(["call", "--position", "1", "--flag"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(flagged)"));

    let summary = std::fs::read_to_string(dir.path().join("coolcall-logs/summary.txt")).unwrap();
    assert!(summary
        .lines()
        .any(|line| line.starts_with("1\t1\t")));

    let log = std::fs::read_dir(dir.path().join("coolcall-logs"))
        .unwrap()
        .filter_map(|e| e.ok())
        .find(|e| e.file_name().to_string_lossy().starts_with("daily_log--"))
        .expect("daily log written");
    let content = std::fs::read_to_string(log.path()).unwrap();
    assert!(content.starts_with("Daily Log for Cold Call Assist Program\n"));
    assert!(content.lines().nth(2).unwrap().starts_with("X\t"));

    coolcall(dir.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary Performance File"))
        .stdout(predicate::str::contains("1\t1\t"));
}

#[test]
fn call_rejects_out_of_range_position() {
    let dir = with_imported_roster();
    coolcall(dir.path())
        .args(["call", "--position", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("position must be between 1 and 4"));
}

#[test]
fn session_commands_need_a_roster() {
    let dir = TempDir::new().unwrap();
    coolcall(dir.path())
        .arg("deck")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no roster found"));
}

#[test]
fn start_keeps_everyone_in_rotation() {
    let dir = with_imported_roster();
    coolcall(dir.path())
        .arg("start")
        .assert()
        .success()
        .stdout(predicate::str::contains("6 students in the rotation"));
}

#[test]
fn export_picks_unused_names() {
    let dir = with_imported_roster();
    let out = dir.path().join("out");
    std::fs::create_dir(&out).unwrap();

    coolcall(dir.path())
        .args(["export", "--dir", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("roster.txt"));
    coolcall(dir.path())
        .args(["export", "--dir", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("roster0.txt"));

    assert_eq!(std::fs::read_to_string(out.join("roster0.txt")).unwrap(), ROSTER);
}

#[test]
fn verify_writes_distribution_files() {
    let dir = with_imported_roster();
    let queue_before =
        std::fs::read_to_string(dir.path().join("coolcall-data/queue.json")).unwrap();

    coolcall(dir.path())
        .args(["verify", "--restarts", "5", "--calls", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hidden Student"));

    let logs = dir.path().join("coolcall-logs");
    let calls = std::fs::read_to_string(logs.join("random_distribution_verification.txt")).unwrap();
    assert_eq!(calls.lines().count(), 3 + 100);
    assert!(logs.join("RDV_summary.txt").exists());

    let queue_after = std::fs::read_to_string(dir.path().join("coolcall-data/queue.json")).unwrap();
    assert_eq!(queue_before, queue_after);
}

#[test]
fn config_controls_window_size() {
    let dir = with_imported_roster();
    std::fs::write(dir.path().join("coolcall.toml"), "window_size = 2\n").unwrap();

    coolcall(dir.path())
        .args(["call", "--position", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 2"));
}
