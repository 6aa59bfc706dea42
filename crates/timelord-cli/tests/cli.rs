// crates/timelord-cli/tests/cli.rs
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::Path;

fn write_data_dir(root: &Path) {
    let datasets = root.join("datasets");
    fs::create_dir_all(&datasets).unwrap();
    fs::create_dir_all(root.join("flags")).unwrap();
    fs::write(
        datasets.join("cities.json"),
        r#"[
          {"id":"6167865","name":"Toronto","asciiname":"Toronto","country_id":"CA","timezone":"America/Toronto","population":2600000,"latitude":"43.70011","longitude":"-79.4163"},
          {"id":"2988507","name":"Paris","asciiname":"Paris","country_id":"FR","timezone":"Europe/Paris","population":2138551,"latitude":"48.85341","longitude":"2.3488"}
        ]"#,
    )
    .unwrap();
    fs::write(
        datasets.join("countries.json"),
        r#"[{"Code":"CA","Name":"Canada"},{"Code":"FR","Name":"France"}]"#,
    )
    .unwrap();
    fs::write(
        datasets.join("airports.json"),
        r#"[
          {"id":1,"name":"Toronto Pearson","code":"YYZ","country_code":"CA","lat":43.6772,"long":-79.6306,"type":"large_airport"},
          {"id":2,"name":"Charles de Gaulle","code":"CDG","country_code":"FR","lat":49.0097,"long":2.5479,"type":"large_airport"}
        ]"#,
    )
    .unwrap();
    fs::write(datasets.join("phone.json"), r#"{"CA":"1","FR":"33"}"#).unwrap();
    fs::write(datasets.join("currency.json"), r#"{"CA":"CAD","FR":"EUR"}"#).unwrap();
    fs::write(root.join("flags").join("canada.png"), b"png").unwrap();
}

fn timelord(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("timelord").expect("binary exists");
    cmd.env_remove("TIMELORD_INDEX")
        .env_remove("TIMELORD_FLAGS_DIR")
        .env_remove("TIMELORD_LOG")
        .env("TIMELORD_DATA_DIR", data_dir);
    cmd
}

fn items(stdout: &[u8]) -> Vec<Value> {
    let payload: Value = serde_json::from_slice(stdout).expect("stdout is JSON");
    payload["items"].as_array().expect("items array").clone()
}

#[test]
fn cli_help_runs() {
    let mut cmd = Command::cargo_bin("timelord").expect("binary exists");
    cmd.arg("--help").assert().success();
}

#[test]
fn resolves_toronto_and_drops_misses() {
    let dir = tempfile::tempdir().unwrap();
    write_data_dir(dir.path());

    let out = timelord(dir.path())
        .args(["toronto,", "nonexistentcityxyz"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let items = items(&out);
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item["uid"], "6167865");
    assert_eq!(item["arg"], "Toronto");
    assert!(item["title"].as_str().unwrap().starts_with("Toronto — "));
    let subtitle = item["subtitle"].as_str().unwrap();
    assert!(subtitle.contains("| Canada | +1 | CAD | YYZ"), "{subtitle}");
    assert!(item["icon"]["path"].as_str().unwrap().ends_with("canada.png"));

    assert!(dir.path().join("cities.idx").exists());
}

#[test]
fn stable_order_follows_the_query() {
    let dir = tempfile::tempdir().unwrap();
    write_data_dir(dir.path());

    let out = timelord(dir.path())
        .args(["--stable-order", "paris,", "toronto"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let uids: Vec<_> = items(&out).iter().map(|i| i["uid"].clone()).collect();
    assert_eq!(uids, vec!["2988507", "6167865"]);
}

#[test]
fn all_misses_print_an_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    write_data_dir(dir.path());

    let out = timelord(dir.path())
        .arg("qqqqqqqq")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert!(items(&out).is_empty());
}

#[test]
fn empty_query_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_data_dir(dir.path());

    let assert = timelord(dir.path()).arg(" , ").assert().failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("must specify query"), "{stderr}");
    assert!(assert.get_output().stdout.is_empty());
}

#[test]
fn missing_datasets_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    timelord(dir.path()).arg("toronto").assert().failure();
}
