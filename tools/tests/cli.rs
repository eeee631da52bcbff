// Runs the built binaries the way a user would.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;
use std::process::Command;

const EXTRACT: &str = env!("CARGO_BIN_EXE_extract_bigrams");
const INSPECT: &str = env!("CARGO_BIN_EXE_inspect_bigrams");

#[test]
fn missing_input_folder_exits_with_usage() {
    let out = Command::new(EXTRACT)
        .env_remove("BIGRAMS_CONFIG")
        .output()
        .expect("spawn extract_bigrams");

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Usage"), "stderr was: {stderr}");
    assert!(out.stdout.is_empty());
}

#[test]
fn unknown_flag_reports_error_and_exits_one() {
    let out = Command::new(EXTRACT)
        .env_remove("BIGRAMS_CONFIG")
        .args(["--bogus", "shards"])
        .output()
        .expect("spawn extract_bigrams");

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("--bogus"), "stderr was: {stderr}");
    assert!(stderr.ends_with('\n'));
    assert!(out.stdout.is_empty());
}

#[test]
fn extracts_and_inspects_folder() {
    let dir = tempfile::tempdir().expect("tempdir");
    let shards = dir.path().join("shards");
    std::fs::create_dir(&shards).expect("mkdir");

    let mut enc = GzEncoder::new(
        File::create(shards.join("eng-2-00000")).expect("create"),
        Compression::default(),
    );
    enc.write_all(b"Running_VERB fast_ADV\t2001,4,1\t2002,3,1\nrun_VERB slow_ADV\t2001,9,1\n")
        .expect("write");
    enc.finish().expect("finish");

    let vocab = dir.path().join("data.json");
    std::fs::write(&vocab, r#"{"fast": 10}"#).expect("write vocab");
    let output = dir.path().join("bigrams.json");
    let config = dir.path().join("bigrams.toml");
    std::fs::write(
        &config,
        format!(
            "vocabulary_path = {:?}\noutput_path = {:?}\nworkers = 2\n",
            vocab.to_string_lossy(),
            output.to_string_lossy()
        ),
    )
    .expect("write config");

    let out = Command::new(EXTRACT)
        .arg(&shards)
        .env("BIGRAMS_CONFIG", &config)
        .env("RUST_LOG", "warn")
        .output()
        .expect("spawn extract_bigrams");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Found 1 files to process"));
    assert_eq!(stdout.lines().last(), Some("Found 1 unique bigrams"));

    let json: String = std::fs::read_to_string(&output)
        .expect("artifact")
        .split_whitespace()
        .collect();
    assert_eq!(json, r#"{"running|fast":7}"#);

    let out = Command::new(INSPECT)
        .arg("--path")
        .arg(&output)
        .arg("--word")
        .arg("Running")
        .output()
        .expect("spawn inspect_bigrams");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("running|fast"));
}

#[test]
fn bad_vocabulary_fails_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let shards = dir.path().join("shards");
    std::fs::create_dir(&shards).expect("mkdir");
    let config = dir.path().join("bigrams.toml");
    std::fs::write(
        &config,
        format!(
            "vocabulary_path = {:?}\noutput_path = {:?}\n",
            dir.path().join("nope.json").to_string_lossy(),
            dir.path().join("bigrams.json").to_string_lossy()
        ),
    )
    .expect("write config");

    let out = Command::new(EXTRACT)
        .arg(&shards)
        .env("BIGRAMS_CONFIG", &config)
        .output()
        .expect("spawn extract_bigrams");

    assert!(!out.status.success());
    assert!(!dir.path().join("bigrams.json").exists());
}
