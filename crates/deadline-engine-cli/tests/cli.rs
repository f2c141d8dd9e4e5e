use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn deadline() -> Command {
    let mut cmd = Command::cargo_bin("deadline").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn calculate_business_days_text() {
    deadline()
        .args([
            "calculate", "--trigger", "2024-11-01", "--days", "10", "--method", "business",
            "--service", "personal",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Deadline:     2024-11-18 (Monday)"))
        .stdout(predicate::str::contains("SKIP_HOLIDAY"))
        .stdout(predicate::str::contains("Veterans Day"));
}

#[test]
fn calculate_json_for_state_mail_service() {
    let json = json_stdout(deadline().args([
        "calculate", "-t", "2024-12-20", "-d", "5", "-m", "calendar", "-s", "mail", "--state",
        "FL", "--format", "json",
    ]));
    assert_eq!(json["deadlineDate"], "2024-12-30");
    assert_eq!(json["serviceDaysAdded"], 5);
    assert_eq!(json["serviceMethod"], "FIRST_CLASS_MAIL");
    let actions: Vec<&str> = json["auditLog"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert!(actions.contains(&"SERVICE_DAYS"));
    assert!(!actions.contains(&"ROLL_FORWARD"));
}

#[test]
fn calculate_negative_days() {
    let json = json_stdout(deadline().args([
        "calculate", "-t", "2024-11-18", "-d", "-5", "-m", "retrograde", "-f", "json",
    ]));
    assert_eq!(json["deadlineDate"], "2024-11-08");
    assert_eq!(json["baseDays"], -5);
}

#[test]
fn calculate_timestamp_trigger_in_court_timezone() {
    let json = json_stdout(deadline().args([
        "calculate",
        "-t",
        "2024-11-02T03:30:00Z",
        "-d",
        "0",
        "--timezone",
        "America/New_York",
        "-f",
        "json",
    ]));
    assert_eq!(json["triggerDate"], "2024-11-01");
}

#[test]
fn invalid_trigger_is_rejected() {
    deadline()
        .args(["calculate", "-t", "next tuesday", "-d", "3"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Invalid date"));
}

#[test]
fn invalid_counting_method_is_rejected() {
    deadline()
        .args(["calculate", "-t", "2024-11-01", "-d", "3", "-m", "lunar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid counting method"));
}

#[test]
fn state_level_requires_code() {
    deadline()
        .args(["calculate", "-t", "2024-11-01", "-d", "3", "--level", "state"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("state code"));
}

#[test]
fn rule_from_file() {
    let dir = TempDir::new().unwrap();
    let rule = dir.path().join("answer.json");
    fs::write(
        &rule,
        r#"{"baseDays": 21, "triggerEvent": "SERVICE_OF_SUMMONS", "serviceMethodApplies": true,
            "name": "Answer", "citation": "Fed. R. Civ. P. 12(a)"}"#,
    )
    .unwrap();
    let json = json_stdout(deadline().args([
        "rule",
        "-t",
        "2024-11-01",
        "-r",
        rule.to_str().unwrap(),
        "-s",
        "mail",
        "-f",
        "json",
    ]));
    assert_eq!(json["deadlineDate"], "2024-11-25");
    assert_eq!(json["serviceDaysAdded"], 3);
    assert!(json["auditLog"][0]["note"].as_str().unwrap().contains("Answer"));
}

#[test]
fn rule_file_missing() {
    deadline()
        .args(["rule", "-t", "2024-11-01", "-r", "/nonexistent/rule.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read rule file"));
}

#[test]
fn holidays_for_a_year() {
    let json = json_stdout(deadline().args(["holidays", "-y", "2024", "-f", "json"]));
    let holidays = json.as_array().unwrap();
    assert_eq!(holidays.len(), 11);
    assert_eq!(holidays[0]["date"], "2024-01-01");
    assert_eq!(holidays[0]["type"], "FEDERAL");
    assert_eq!(holidays[10]["name"], "Christmas Day");
}

#[test]
fn holidays_for_a_month_text() {
    deadline()
        .args(["holidays", "-y", "2024", "-m", "11", "--state", "FL"])
        .assert()
        .success()
        .stdout(predicate::str::contains("November 2024"))
        .stdout(predicate::str::contains("Su Mo Tu We Th Fr Sa"))
        .stdout(predicate::str::contains("2024-11-29  Friday     Friday after Thanksgiving"));
}

#[test]
fn holidays_month_out_of_range() {
    deadline()
        .args(["holidays", "-y", "2024", "-m", "13"])
        .assert()
        .failure();
}

#[test]
fn holidays_year_out_of_range() {
    for year in ["0", "10000"] {
        deadline()
            .args(["holidays", "-y", year, "-f", "json"])
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Error: Invalid date: year"));
    }
}

#[test]
fn config_file_supplies_jurisdiction_and_closures() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("deadline.toml");
    fs::write(
        &config,
        r#"
[jurisdiction]
level = "state"
state = "FL"

[[holidays]]
date = "2024-10-09"
name = "Hurricane closure"
"#,
    )
    .unwrap();
    let json = json_stdout(deadline().args([
        "--config",
        config.to_str().unwrap(),
        "calculate",
        "-t",
        "2024-10-08",
        "-d",
        "1",
        "-m",
        "business",
        "-f",
        "json",
    ]));
    assert_eq!(json["deadlineDate"], "2024-10-10");
    assert_eq!(json["holidaysSkipped"], 1);
}

#[test]
fn config_with_unknown_key_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("deadline.toml");
    fs::write(&config, "[jurisdiction]\ncountry = \"US\"\n").unwrap();
    deadline()
        .args(["-c", config.to_str().unwrap(), "holidays", "-y", "2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse TOML config"));
}
