use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

fn run_cmd(config_home: &Path, args: &[&str]) -> Output {
    cargo_bin_cmd!("phonesift")
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run command")
}

fn run_ok(config_home: &Path, args: &[&str]) -> String {
    let output = run_cmd(config_home, args);
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf8 path")
}

fn orders_fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("phonesift-sheet")
        .join("tests")
        .join("fixtures")
        .join("orders.xlsx")
}

fn seed_orders(data: &Path, names: &[&str]) {
    fs::create_dir_all(data).expect("create data dir");
    for name in names {
        fs::copy(orders_fixture(), data.join(name)).expect("copy fixture");
    }
}

#[test]
fn cli_count_only_prints_zero_for_empty_directory() {
    let temp = TempDir::new().expect("temp dir");
    let data = temp.path().join("data");
    fs::create_dir(&data).expect("create data dir");

    let stdout = run_ok(
        temp.path(),
        &["extract", "--path", path_str(&data), "--count-only"],
    );
    assert_eq!(stdout, "0\n");
}

#[test]
fn cli_extract_writes_output_and_reports_progress() {
    let temp = TempDir::new().expect("temp dir");
    let data = temp.path().join("data");
    fs::create_dir_all(data.join("nested")).expect("create data dir");
    let out = temp.path().join("out").join("phones.csv");

    let stdout = run_ok(
        temp.path(),
        &[
            "extract",
            "--path",
            path_str(&data),
            "--city",
            "Москва",
            "--out",
            path_str(&out),
        ],
    );

    assert!(stdout.contains("Scanning"), "stdout: {stdout}");
    assert!(stdout.contains("Matched 0 phones in 0 files, 0 unique"));
    assert!(stdout.contains("Saved 0 phones to"));
    assert_eq!(fs::read_to_string(&out).expect("read output"), "");
}

#[test]
fn cli_extract_json_report() {
    let temp = TempDir::new().expect("temp dir");
    let data = temp.path().join("data");
    fs::create_dir(&data).expect("create data dir");
    let out = temp.path().join("phones.csv");

    let stdout = run_ok(
        temp.path(),
        &[
            "--json",
            "extract",
            "--path",
            path_str(&data),
            "--out",
            path_str(&out),
        ],
    );

    let report: Value = serde_json::from_str(&stdout).expect("parse json");
    assert_eq!(report["files"], 0);
    assert_eq!(report["matched"], 0);
    assert_eq!(report["unique"], 0);
    assert_eq!(report["output"], path_str(&out));
    assert_eq!(report["phones"], Value::Array(Vec::new()));
}

#[test]
fn cli_extract_dedups_phones_across_workbooks() {
    let temp = TempDir::new().expect("temp dir");
    let data = temp.path().join("data");
    seed_orders(&data, &["january.xlsx", "february.xlsx"]);
    let out = temp.path().join("phones.csv");

    let stdout = run_ok(
        temp.path(),
        &[
            "extract",
            "--path",
            path_str(&data),
            "--city",
            "Москва",
            "--out",
            path_str(&out),
        ],
    );

    assert!(
        stdout.contains("Matched 6 phones in 2 files, 2 unique"),
        "stdout: {stdout}"
    );
    assert!(stdout.contains("Saved 2 phones to"), "stdout: {stdout}");

    let written = fs::read_to_string(&out).expect("read output");
    let mut lines: Vec<&str> = written.lines().collect();
    lines.sort_unstable();
    assert_eq!(lines, vec!["+7(900)111-22-33", "+7(926)123-45-67"]);
}

#[test]
fn cli_count_only_counts_matches_before_dedup() {
    let temp = TempDir::new().expect("temp dir");
    let data = temp.path().join("data");
    seed_orders(&data, &["orders.xlsx"]);

    let stdout = run_ok(
        temp.path(),
        &[
            "extract",
            "--path",
            path_str(&data),
            "--city",
            "Москва",
            "--count-only",
        ],
    );
    assert_eq!(stdout, "3\n");
}

#[test]
fn cli_extract_json_lists_unique_phones() {
    let temp = TempDir::new().expect("temp dir");
    let data = temp.path().join("data");
    seed_orders(&data, &["orders.xlsx"]);
    let out = temp.path().join("phones.csv");

    let stdout = run_ok(
        temp.path(),
        &[
            "--json",
            "extract",
            "--path",
            path_str(&data),
            "--city",
            "Москва",
            "--from",
            "2023",
            "--out",
            path_str(&out),
        ],
    );

    let report: Value = serde_json::from_str(&stdout).expect("parse json");
    assert_eq!(report["files"], 1);
    assert_eq!(report["rows"], 6);
    assert_eq!(report["matched"], 2);
    assert_eq!(report["unique"], 2);
    let mut phones: Vec<&str> = report["phones"]
        .as_array()
        .expect("phones array")
        .iter()
        .map(|phone| phone.as_str().expect("phone string"))
        .collect();
    phones.sort_unstable();
    assert_eq!(phones, vec!["+7(900)111-22-33", "+7(926)123-45-67"]);
}

#[test]
fn cli_missing_directory_exits_not_found() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("missing");

    let output = run_cmd(
        temp.path(),
        &["extract", "--path", path_str(&missing), "--count-only"],
    );

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.starts_with("error:"), "stderr: {stderr}");
}

#[test]
fn cli_unreadable_spreadsheet_is_fatal() {
    let temp = TempDir::new().expect("temp dir");
    let data = temp.path().join("data");
    fs::create_dir(&data).expect("create data dir");
    fs::write(data.join("orders.xlsx"), "not a workbook").expect("write file");
    let out = temp.path().join("phones.csv");

    let output = run_cmd(
        temp.path(),
        &[
            "extract",
            "--path",
            path_str(&data),
            "--out",
            path_str(&out),
        ],
    );

    assert_eq!(output.status.code(), Some(3));
    assert!(!out.exists(), "no output expected after a fatal error");
}

#[test]
fn cli_rejects_inverted_year_range() {
    let temp = TempDir::new().expect("temp dir");

    let output = run_cmd(
        temp.path(),
        &["extract", "--from", "2024", "--to", "2021", "--count-only"],
    );

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("resolve run settings"), "stderr: {stderr}");
}

#[test]
fn cli_reads_config_file() {
    let temp = TempDir::new().expect("temp dir");
    let data = temp.path().join("orders");
    fs::create_dir(&data).expect("create data dir");
    let config_dir = temp.path().join("phonesift");
    fs::create_dir(&config_dir).expect("create config dir");
    fs::write(
        config_dir.join("config.toml"),
        format!("path = {:?}\ncity = \"Москва\"\n", path_str(&data)),
    )
    .expect("write config");

    let stdout = run_ok(temp.path(), &["extract", "--count-only"]);
    assert_eq!(stdout, "0\n");
}

#[test]
fn cli_rejects_unknown_config_keys() {
    let temp = TempDir::new().expect("temp dir");
    let config = temp.path().join("custom.toml");
    fs::write(&config, "town = \"Москва\"\n").expect("write config");

    let output = run_cmd(
        temp.path(),
        &["--config", path_str(&config), "extract", "--count-only"],
    );

    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn cli_emits_completions() {
    let temp = TempDir::new().expect("temp dir");
    let stdout = run_ok(temp.path(), &["completions", "bash"]);
    assert!(stdout.contains("phonesift"));
}
