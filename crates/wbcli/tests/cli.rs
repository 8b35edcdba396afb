use assert_cmd::Command;
use predicates::prelude::*;

/// Format-1 SMF at 120 bpm, 480 ppq: a C major triad held for one beat.
fn triad_midi() -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"MThd");
    buf.extend_from_slice(&6u32.to_be_bytes());
    buf.extend_from_slice(&1u16.to_be_bytes());
    buf.extend_from_slice(&2u16.to_be_bytes());
    buf.extend_from_slice(&480u16.to_be_bytes());

    let mut track0 = Vec::new();
    track0.extend_from_slice(&[0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20]);
    track0.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);
    buf.extend_from_slice(b"MTrk");
    buf.extend_from_slice(&(track0.len() as u32).to_be_bytes());
    buf.extend_from_slice(&track0);

    let mut track1 = Vec::new();
    track1.extend_from_slice(&[0x00, 0x90, 60, 100]);
    track1.extend_from_slice(&[0x00, 0x90, 64, 100]);
    track1.extend_from_slice(&[0x00, 0x90, 67, 100]);
    track1.extend_from_slice(&[0x83, 0x60, 0x80, 60, 0]);
    track1.extend_from_slice(&[0x00, 0x80, 64, 0]);
    track1.extend_from_slice(&[0x00, 0x80, 67, 0]);
    track1.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);
    buf.extend_from_slice(b"MTrk");
    buf.extend_from_slice(&(track1.len() as u32).to_be_bytes());
    buf.extend_from_slice(&track1);

    buf
}

#[test]
fn process_writes_summary_and_skips_bad_files() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("songs");
    std::fs::create_dir(&sub).unwrap();
    std::fs::write(sub.join("good.mid"), triad_midi()).unwrap();
    std::fs::write(dir.path().join("bad.mid"), b"definitely not midi").unwrap();

    let output = dir.path().join("summary.json");

    Command::cargo_bin("wbcli")
        .unwrap()
        .args(["process"])
        .arg(dir.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 1 of 2 files successfully."));

    let text = std::fs::read_to_string(&output).unwrap();
    let summaries: serde_json::Value = serde_json::from_str(&text).unwrap();
    let entries = summaries.as_array().unwrap();
    assert_eq!(entries.len(), 1);

    let entry = &entries[0];
    assert_eq!(entry["file_index"], 0);
    assert_eq!(entry["note_count"], 3);
    assert_eq!(entry["piano_roll_rows"], 128);
    // One beat at 120 bpm = 0.5s; default fs 50 → 25 columns
    assert_eq!(entry["piano_roll_columns"], 25);
    assert_eq!(entry["chord_label_count"], 25);
    assert_eq!(entry["chord_labels"][0], "C major");
}

#[test]
fn process_empty_directory_writes_empty_summary() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("summary.json");

    Command::cargo_bin("wbcli")
        .unwrap()
        .args(["process"])
        .arg(dir.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 0 of 0 files successfully."));

    let text = std::fs::read_to_string(&output).unwrap();
    assert_eq!(text.trim(), "[]");
}

#[test]
fn inspect_prints_single_file_summary() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("song.mid");
    std::fs::write(&file, triad_midi()).unwrap();

    Command::cargo_bin("wbcli")
        .unwrap()
        .args(["inspect"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"note_count\": 3"))
        .stdout(predicate::str::contains("C major"));
}

#[test]
fn config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("song.mid");
    std::fs::write(&file, triad_midi()).unwrap();

    let config = dir.path().join("prep.toml");
    std::fs::write(&config, "fs = 10.0\n").unwrap();

    Command::cargo_bin("wbcli")
        .unwrap()
        .args(["inspect"])
        .arg(&file)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        // 0.5s at 10 columns/second
        .stdout(predicate::str::contains("\"piano_roll_columns\": 5"));
}
