#![allow(non_snake_case)]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const NAME: &str = "adlink-audit";

fn export_file(ads: &str, suffix: &str) -> Result<NamedTempFile, std::io::Error> {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
    file.write_all(ads.as_bytes())?;
    file.flush()?;
    Ok(file)
}

fn ad_json(id: &str, url: &str) -> String {
    format!(
        r#"{{"campaignName":"Spring","campaignId":"c-1","adId":"{id}","adType":"EXPANDED_TEXT_AD","destinationUrl":"{url}"}}"#
    )
}

fn command() -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(NAME)?;
    cmd.arg("--no-config").arg("--no-progress");
    Ok(cmd)
}

#[test]
fn test_missing_export__exits_fatal() -> TestResult {
    command()?
        .arg("does-not-exist.json")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error"));
    Ok(())
}

#[test]
fn test_no_arguments__shows_usage() -> TestResult {
    Command::cargo_bin(NAME)?
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
    Ok(())
}

#[test]
fn test_healthy_links__exit_zero() -> TestResult {
    let mut server = mockito::Server::new();
    let _ok = server.mock("GET", "/landing").with_status(200).create();
    let url = format!("{}/landing", server.url());
    let export = export_file(&format!("[{}]", ad_json("1", &url)), ".json")?;

    command()?
        .arg(export.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No broken links found!"))
        .stdout(predicate::str::contains("1 ads scanned"));
    Ok(())
}

#[test]
fn test_broken_link__exit_one_and_listed() -> TestResult {
    let mut server = mockito::Server::new();
    let _gone = server.mock("GET", "/gone").with_status(404).create();
    let url = format!("{}/gone", server.url());
    let export = export_file(
        &format!("[{},{}]", ad_json("11", &url), ad_json("12", &url)),
        ".json",
    )?;

    command()?
        .arg(export.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Broken links (2)"))
        .stdout(predicate::str::contains("404"))
        .stdout(predicate::str::contains("1 unique URLs checked (1 cached)"));
    Ok(())
}

#[test]
fn test_jsonl_export__paused_ads_skipped_by_default() -> TestResult {
    let mut server = mockito::Server::new();
    let _gone = server.mock("GET", "/gone").with_status(404).create();
    let url = format!("{}/gone", server.url());
    let paused = format!(
        r#"{{"campaignName":"Spring","campaignId":"c-1","adId":"2","adType":"EXPANDED_TEXT_AD","destinationUrl":"{url}","adStatus":"PAUSED"}}"#
    );
    let export = export_file(&paused, ".jsonl")?;

    command()?
        .arg(export.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 ads scanned"));

    command()?
        .arg(export.path())
        .arg("--include-paused")
        .assert()
        .code(1);
    Ok(())
}

#[test]
fn test_csv_output_file() -> TestResult {
    let mut server = mockito::Server::new();
    let _err = server.mock("GET", "/down").with_status(500).create();
    let url = format!("{}/down", server.url());
    let export = export_file(&format!("[{}]", ad_json("5", &url)), ".json")?;
    let dir = tempfile::tempdir()?;
    let report_path = dir.path().join("report.csv");

    command()?
        .arg(export.path())
        .args(["--format", "csv", "-o"])
        .arg(&report_path)
        .assert()
        .code(1);

    let csv = std::fs::read_to_string(&report_path)?;
    let mut lines = csv.lines();
    assert!(lines.next().is_some_and(|header| header.starts_with("Date Checked")));
    let row = lines.next().unwrap_or_default();
    assert!(row.contains(",Spring,5,EXPANDED_TEXT_AD,"));
    assert!(row.contains(",500,"));
    Ok(())
}

#[test]
fn test_aborted_run__keeps_previous_report() -> TestResult {
    let export = export_file("not json\n", ".jsonl")?;
    let dir = tempfile::tempdir()?;
    let report_path = dir.path().join("report.csv");
    std::fs::write(&report_path, "earlier findings\n")?;

    command()?
        .arg(export.path())
        .args(["--format", "csv", "-o"])
        .arg(&report_path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("line 1"));

    assert_eq!(std::fs::read_to_string(&report_path)?, "earlier findings\n");
    Ok(())
}

#[test]
fn test_csv_without_output_path__rejected() -> TestResult {
    let export = export_file("[]", ".json")?;

    command()?
        .arg(export.path())
        .args(["--format", "csv"])
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn test_auto_pause_posts_mutation() -> TestResult {
    let mut server = mockito::Server::new();
    let _gone = server.mock("GET", "/gone").with_status(404).create();
    let pause = server
        .mock("POST", "/pause")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"adId":"9","status":"PAUSED"}"#.to_string(),
        ))
        .with_status(200)
        .expect(1)
        .create();
    let export = export_file(
        &format!("[{}]", ad_json("9", &format!("{}/gone", server.url()))),
        ".json",
    )?;

    command()?
        .arg(export.path())
        .arg("--auto-pause")
        .arg("--pause-endpoint")
        .arg(format!("{}/pause", server.url()))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1 paused"));

    pause.assert();
    Ok(())
}

#[test]
fn test_auto_pause_without_endpoint__rejected() -> TestResult {
    let export = export_file("[]", ".json")?;

    command()?
        .arg(export.path())
        .arg("--auto-pause")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("pause"));
    Ok(())
}

#[test]
fn test_json_output() -> TestResult {
    let export = export_file(&format!("[{}]", ad_json("3", "")), ".json")?;

    command()?
        .arg(export.path())
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"records\": []"));
    Ok(())
}
