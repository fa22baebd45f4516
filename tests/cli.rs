use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn deduce(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("deduce").unwrap();
    // Isolate settings lookup from the real home directory
    cmd.env("HOME", home);
    cmd
}

fn write_file(path: &Path, content: &str) {
    std::fs::write(path, content).unwrap();
}

#[test]
fn demo_then_classify_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let demo_dir = tmp.path().join("demo");
    deduce(tmp.path())
        .arg("demo")
        .arg("--dir")
        .arg(&demo_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("transactions.csv"));

    let out_csv = tmp.path().join("results.csv");
    let out_json = tmp.path().join("results.json");
    deduce(tmp.path())
        .arg("classify")
        .arg(demo_dir.join("transactions.csv"))
        .arg("--model")
        .arg(demo_dir.join("model.json"))
        .arg("--output")
        .arg(&out_csv)
        .arg("--json")
        .arg(&out_json)
        .assert()
        .success()
        .stdout(predicate::str::contains("non-deductible"));

    let csv = std::fs::read_to_string(&out_csv).unwrap();
    assert!(csv.starts_with("date,merchant,description,deductible,reason"));
    assert_eq!(csv.lines().count(), 22); // header + 21 demo rows

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_json).unwrap()).unwrap();
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 21);
    // Input order is preserved
    assert_eq!(rows[0]["merchant"], "WeWork");
    assert_eq!(rows[0]["deductible"], true);
}

#[test]
fn negative_override_survives_zero_threshold() {
    let tmp = tempfile::tempdir().unwrap();
    let demo_dir = tmp.path().join("demo");
    deduce(tmp.path()).arg("demo").arg("--dir").arg(&demo_dir).assert().success();

    let out_json = tmp.path().join("results.json");
    deduce(tmp.path())
        .arg("classify")
        .arg(demo_dir.join("transactions.csv"))
        .arg("--model")
        .arg(demo_dir.join("model.json"))
        .arg("--threshold")
        .arg("0.0")
        .arg("--json")
        .arg(&out_json)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_json).unwrap()).unwrap();
    let vacation = json
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["description"] == "Family vacation to Hawaii")
        .unwrap();
    assert_eq!(vacation["deductible"], false);
    assert_eq!(vacation["reason"], "Personal occasion");
}

#[test]
fn classify_without_ml_needs_no_model() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("txns.csv");
    write_file(
        &input,
        "date,amount,merchant,description\n\
         2025-04-01,88.00,Acme,random obscure purchase xyz\n",
    );
    deduce(tmp.path())
        .arg("classify")
        .arg(&input)
        .arg("--no-ml")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 deductible, 1 non-deductible"));
}

#[test]
fn classify_with_ml_but_no_model_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("txns.csv");
    write_file(&input, "date,amount,merchant,description\n");
    deduce(tmp.path())
        .arg("classify")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no model artifact configured"));
}

#[test]
fn missing_column_is_reported_before_classification() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("txns.csv");
    write_file(&input, "date,amount,description\n2025-04-01,10.00,Lunch\n");
    deduce(tmp.path())
        .arg("classify")
        .arg(&input)
        .arg("--no-ml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed input"));
}

#[test]
fn out_of_range_threshold_is_a_config_error() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("txns.csv");
    write_file(&input, "date,amount,merchant,description\n");
    deduce(tmp.path())
        .arg("classify")
        .arg(&input)
        .arg("--no-ml")
        .arg("--threshold")
        .arg("1.5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Threshold"));
}

#[test]
fn rules_check_names_the_firing_rule() {
    let tmp = tempfile::tempdir().unwrap();
    deduce(tmp.path())
        .args(["rules", "check", "family vacation to hawaii"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Personal occasion"));
    deduce(tmp.path())
        .args(["rules", "check", "team lunch with client"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Business meal"));
}

#[test]
fn model_info_reports_fingerprint() {
    let tmp = tempfile::tempdir().unwrap();
    let demo_dir = tmp.path().join("demo");
    deduce(tmp.path()).arg("demo").arg("--dir").arg(&demo_dir).assert().success();
    deduce(tmp.path())
        .arg("model")
        .arg("info")
        .arg("--model")
        .arg(demo_dir.join("model.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("SHA-256"));
}
