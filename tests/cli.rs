//! End-to-end checks of the rptree binary.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

fn fixture() -> TempDir {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path();
    fs::create_dir_all(root.join("app/models")).unwrap();
    fs::create_dir_all(root.join(".venv/lib")).unwrap();
    write(&root.join("app/__init__.py"), 0);
    write(&root.join("app/models/user.py"), 2048);
    write(&root.join("notes.txt"), 100);
    write(&root.join("Makefile"), 1500);
    tmp
}

fn write(path: &Path, bytes: usize) {
    let mut f = File::create(path).unwrap();
    f.write_all(&vec![b'#'; bytes]).unwrap();
}

fn rptree() -> Command {
    Command::cargo_bin("rptree").expect("binary built")
}

#[test]
fn prints_banner_then_tree() {
    let tmp = fixture();
    let out = rptree()
        .arg(tmp.path())
        .args(["--color", "never"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    let expected = "\nDirectory Tree Structure:\n\n\
├── app\n\
│   ├── models\n\
│   │   └── user.py (2.00 KB)\n\
│   └── __init__.py (0.00 B)\n\
├── Makefile (1.46 KB)\n\
└── notes.txt (100.00 B)\n";
    assert_eq!(text, expected);
}

#[test]
fn hidden_flag_shows_dot_directories() {
    let tmp = fixture();
    rptree()
        .arg(tmp.path())
        .args(["--no-banner", "--hidden"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("├── .venv\n│   └── lib\n"));
}

#[test]
fn depth_one_stops_at_children() {
    let tmp = fixture();
    rptree()
        .arg(tmp.path())
        .args(["--no-banner", "--max-depth", "1"])
        .assert()
        .success()
        .stdout("├── app\n├── Makefile (1.46 KB)\n└── notes.txt (100.00 B)\n");
}

#[test]
fn suffix_filter_drops_non_matching_directories() {
    let tmp = fixture();
    rptree()
        .arg(tmp.path())
        .args(["--no-banner", "--suffix", ".txt"])
        .assert()
        .success()
        .stdout("└── notes.txt (100.00 B)\n");
}

#[test]
fn search_colours_matches_red() {
    let tmp = fixture();
    rptree()
        .arg(tmp.path())
        .args(["--no-banner", "--color", "always", "--search", "NOTES"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[31mnotes.txt\x1b[0m (100.00 B)"))
        .stdout(predicate::str::contains("\x1b[34mapp\x1b[0m"));
}

#[test]
fn json_format_emits_ndjson() {
    let tmp = fixture();
    let out = rptree()
        .arg(tmp.path())
        .args(["--format", "json", "--source-suffix", ".py"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    let records: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid json line"))
        .collect();
    assert_eq!(records.len(), 6);
    assert_eq!(records[0]["name"], "app");
    assert_eq!(records[0]["kind"], "dir");
    assert_eq!(records[2]["name"], "user.py");
    assert_eq!(records[2]["highlight"], "source_file");
    assert_eq!(records[2]["depth"], 2);
    assert_eq!(records[2]["line"], "│   │   └── user.py (2.00 KB)");
}

#[test]
fn non_directory_root_is_reported_not_fatal() {
    let tmp = fixture();
    rptree()
        .arg(tmp.path().join("notes.txt"))
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains(
            "Error: The specified path is not a valid directory.",
        ));
}

#[test]
fn output_is_stable_across_runs() {
    let tmp = fixture();
    let run = || {
        rptree()
            .arg(tmp.path())
            .arg("--no-banner")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };
    assert_eq!(run(), run());
}
