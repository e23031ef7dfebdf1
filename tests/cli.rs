use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

const BINARY_NAME: &str = "chartdeck";

/// Helper to get a temporary working directory
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Config path that does not exist, so defaults apply.
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".chartdeck").join("config.json")
}

fn chartdeck(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--config")
        .arg(config_file_path(dir))
        .env("CHARTDECK_ANALYSIS_DELAY_MS", "0")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Terminal analytics dashboard"))
        .stdout(contains("quote"));
}

#[test]
/// Template command writes the CSV sample to the requested path.
fn template_writes_csv() {
    let tmp = temp_dir();
    let output = tmp.path().join("out").join("sample.csv");

    chartdeck(&tmp)
        .args(["template", "--format", "csv", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Template written"));

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("name,age,email,department,salary"));
    assert_eq!(text.lines().count(), 4);
}

#[test]
/// Analyze prints insights and a report for a well-formed file.
fn analyze_reports_on_template() {
    let tmp = temp_dir();
    let data = tmp.path().join("people.csv");

    chartdeck(&tmp)
        .args(["template", "--output"])
        .arg(&data)
        .assert()
        .success();

    chartdeck(&tmp)
        .arg("analyze")
        .arg(&data)
        .assert()
        .success()
        .stdout(contains("Your dataset contains 3 records"))
        .stdout(contains("Severity: low"))
        .stdout(contains("Confidence: 95%"));
}

#[test]
/// Unsupported extensions are rejected with a friendly error.
fn analyze_rejects_unknown_format() {
    let tmp = temp_dir();
    let data = tmp.path().join("notes.txt");
    fs::write(&data, "hello").unwrap();

    chartdeck(&tmp)
        .arg("analyze")
        .arg(&data)
        .assert()
        .failure()
        .stdout(contains("Unsupported file format"));
}

#[test]
/// An invalid config file is an error, not silently ignored.
fn invalid_config_fails() {
    let tmp = temp_dir();
    let config = config_file_path(&tmp);
    fs::create_dir_all(config.parent().unwrap()).unwrap();
    fs::write(&config, "invalid json").unwrap();

    chartdeck(&tmp)
        .args(["product", "1"])
        .assert()
        .failure()
        .stdout(contains("Failed to load config"));
}

#[test]
/// init-config writes the defaults and keeps values already in the file.
fn init_config_fills_defaults() {
    let tmp = temp_dir();
    let config = config_file_path(&tmp);
    fs::create_dir_all(config.parent().unwrap()).unwrap();
    fs::write(&config, r#"{"bar_window": 3}"#).unwrap();

    chartdeck(&tmp)
        .arg("init-config")
        .assert()
        .success()
        .stdout(contains("Config written"));

    let text = fs::read_to_string(&config).unwrap();
    assert!(text.contains(r#""bar_window": 3"#));
    assert!(text.contains(r#""drag_activation_distance": 1"#));
}

#[test]
fn unknown_product_is_not_found() {
    let tmp = temp_dir();
    chartdeck(&tmp)
        .args(["product", "999"])
        .assert()
        .success()
        .stdout(contains("Product 999 not found"));
}

#[test]
fn products_filter_by_category() {
    let tmp = temp_dir();
    chartdeck(&tmp)
        .args(["products", "--category", "furniture"])
        .assert()
        .success()
        .stdout(contains("Ergonomic Office Chair"))
        .stdout(contains("Headphones").not());
}

#[test]
fn categories_are_listed() {
    let tmp = temp_dir();
    chartdeck(&tmp)
        .arg("categories")
        .assert()
        .success()
        .stdout(contains("home-garden"))
        .stdout(contains("Clothing"));
}

#[test]
fn search_matches_tags() {
    let tmp = temp_dir();
    chartdeck(&tmp)
        .args(["search", "qi"])
        .assert()
        .success()
        .stdout(contains("Wireless Charging Pad"));
}

#[test]
/// Quote totals are rounded to cents.
fn quote_totals_cart() {
    let tmp = temp_dir();
    chartdeck(&tmp)
        .args(["quote", "--item", "6:3", "--item", "5:1"])
        .assert()
        .success()
        .stdout(contains("Items: 4"))
        .stdout(contains("Total: $209.96"));
}

#[test]
/// Carts above the item cap are rejected.
fn quote_rejects_oversized_cart() {
    let tmp = temp_dir();
    chartdeck(&tmp)
        .args(["quote", "--item", "6:60", "--item", "1:40"])
        .assert()
        .failure()
        .stdout(contains("at most 99 items"));
}
