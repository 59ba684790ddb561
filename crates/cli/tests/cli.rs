use assert_cmd::Command;
use predicates::prelude::*;

fn scenario(name: &str) -> String {
    format!("{}/../../configs/scenarios/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn simulate_prints_final_state() {
    Command::cargo_bin("simulate")
        .unwrap()
        .args(["--scenario", &scenario("inner_system.yaml"), "--frames", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scenario: inner_system"))
        .stdout(predicate::str::contains("Moon"))
        .stdout(predicate::str::contains("Earth"))
        .stdout(predicate::str::contains("over 50 frames"));
}

#[test]
fn simulate_rejects_negative_time_scale() {
    Command::cargo_bin("simulate")
        .unwrap()
        .args([
            "--scenario",
            &scenario("inner_system.yaml"),
            "--time-scale=-1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("time scale"));
}

#[test]
fn saved_state_can_be_inspected() {
    let dir = tempfile::tempdir().unwrap();
    let save = dir.path().join("trinary.orbyte");
    let trails = dir.path().join("trails.csv");

    Command::cargo_bin("simulate")
        .unwrap()
        .args(["--scenario", &scenario("trinary.toml"), "--frames", "200"])
        .arg("--save")
        .arg(&save)
        .arg("--trails")
        .arg(&trails)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved state"));

    let csv = std::fs::read_to_string(&trails).unwrap();
    assert!(csv.starts_with("body,index,x_m,y_m,z_m"));

    Command::cargo_bin("inspect")
        .unwrap()
        .arg(&save)
        .assert()
        .success()
        .stdout(predicate::str::contains("Central: Primary"))
        .stdout(predicate::str::contains("Mode: Mutual"))
        .stdout(predicate::str::contains("Ring orbits Heavy"));
}

#[test]
fn inspect_reports_missing_file() {
    Command::cargo_bin("inspect")
        .unwrap()
        .arg("does/not/exist.orbyte")
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading"));
}
