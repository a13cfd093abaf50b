// SPDX-License-Identifier: MIT OR Apache-2.0

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use tempfile::TempDir;

const FOODS: &str = "\
food_kr,source_reliability,source_name,rule_source,임산부_정보유무,임산부_주의
커피,gov,Clinic A,https://clinic.example/coffee,TRUE,주의
커피,blog,Mom Blog,https://blog.example/coffee,TRUE,안전
커피,blog,Mom Blog,https://blog.example/coffee,TRUE,안전
커피우유,news,Daily News,https://NEWS.example/milk ,TRUE,조건부
녹차 라떼,4,Hospital,https://hospital.example/latte,yes,caution
팥빙수,2,Cafe Guide,,있음,safe
김밥,gov,Ministry,https://gov.example/kimbap,FALSE,안전
";

const SYNONYMS: &str = "key,aliases\n라테,라떼\n아아,\"아이스 아메리카노|커피\"\n";

fn write_file(path: &std::path::Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, content).expect("write file");
}

fn dataset_dir() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    write_file(&dir.path().join("data/foods.csv"), FOODS);
    write_file(&dir.path().join("data/synonyms.csv"), SYNONYMS);
    write_file(
        &dir.path().join(".mammarc.toml"),
        "foods_path = \"data/foods.csv\"\nsynonyms_path = \"data/synonyms.csv\"\n",
    );
    dir
}

fn mamma(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mamma"));
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("NO_COLOR", "1")
        .env_remove("MAMMA_LOG");
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let assert = cmd.assert().success();
    let out = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    serde_json::from_str(&out).expect("json")
}

/// Answer one HTTP request with `body`; returns the raw request text.
fn serve_once(body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let endpoint = format!("http://{}/ai/fallback", listener.local_addr().expect("addr"));
    let handle = thread::spawn(move || {
        let (mut socket, _) = listener.accept().expect("accept");
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).expect("read");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request).into_owned();
            if let Some(split) = text.find("\r\n\r\n") {
                let length = text[..split]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if request.len() >= split + 4 + length {
                    break;
                }
            }
        }
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).expect("write");
        String::from_utf8_lossy(&request).into_owned()
    });
    (endpoint, handle)
}

#[test]
fn show_lists_sources_by_severity() {
    let dir = dataset_dir();
    let view = json_output(mamma(&dir).args(["--format", "json", "show", "커피"]));

    assert_eq!(view["name"], "커피");
    let sources = view["sources"].as_array().expect("sources");
    // duplicate Mom Blog row collapsed
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0]["verdict"], "caution");
    assert_eq!(sources[0]["note"], "주의");
    assert_eq!(sources[1]["verdict"], "safe");
    assert_eq!(
        view["summary"],
        "According to high-reliability sources, caution is the dominant opinion. \
         Still, some sources say it's okay."
    );
    assert_eq!(view["signal"], "caution");
    assert_eq!(view["weighted_score"], 1.5);
    assert_eq!(view["score_rounded"], 2);
}

#[test]
fn show_unknown_food_fails_with_suggestion() {
    let dir = dataset_dir();
    mamma(&dir)
        .args(["show", "김치"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No food named '김치'"))
        .stderr(predicate::str::contains("mamma search \"김치\""));
}

#[test]
fn show_text_has_group_rows() {
    let dir = dataset_dir();
    mamma(&dir)
        .args(["show", "녹차 라떼"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Clinicians / Institutions"))
        .stdout(predicate::str::contains("Individuals / Communities"))
        .stdout(predicate::str::contains("No data"))
        .stdout(predicate::str::contains("Hospital"));
}

#[test]
fn hints_reports_expansion_and_ordered_hints() {
    let dir = dataset_dir();
    let payload = json_output(mamma(&dir).args(["--format", "json", "hints", "임신 중 커피 우유"]));

    assert_eq!(payload["normalized"], "임신중커피우유");
    assert_eq!(payload["expanded"][0], "임신 중 커피 우유");
    assert_eq!(payload["hints"][0], "커피우유");
    assert_eq!(payload["hints"][1], "커피우");
    assert_eq!(payload["hints"][2], "커피");
}

#[test]
fn stats_counts_distinct_foods_and_urls() {
    let dir = dataset_dir();
    let payload = json_output(mamma(&dir).args(["--format", "json", "stats"]));

    assert_eq!(payload["foods"], 5);
    assert_eq!(payload["sources"], 4);
    assert_eq!(payload["synonym_keys"], 2);
    assert_eq!(payload["fingerprint"].as_str().map(str::len), Some(64));
}

#[test]
fn cli_paths_override_config() {
    let dir = dataset_dir();
    write_file(
        &dir.path().join("other/foods.csv"),
        "food_kr,source_reliability,source_name,rule_source,임산부_정보유무,임산부_주의\n두부,gov,Clinic,,TRUE,safe\n",
    );
    let payload = json_output(mamma(&dir).args([
        "--format",
        "json",
        "--foods",
        "other/foods.csv",
        "stats",
    ]));
    assert_eq!(payload["foods"], 1);
    assert_eq!(payload["synonym_keys"], 2);
}

#[test]
fn missing_dataset_fails_with_suggestion() {
    let dir = TempDir::new().expect("tempdir");
    Command::new(assert_cmd::cargo::cargo_bin!("mamma"))
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .args(["stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not load the dataset"))
        .stderr(predicate::str::contains("foods.csv"))
        .stderr(predicate::str::contains("Suggestion:"));
}

#[test]
fn advise_prints_service_text() {
    let dir = dataset_dir();
    let (endpoint, server) = serve_once(r#"{"text":"Limit coffee to one cup a day."}"#);

    mamma(&dir)
        .args(["advise", "  커피 몇 잔?  ", "--endpoint", &endpoint])
        .assert()
        .success()
        .stdout(predicate::str::contains("Limit coffee to one cup a day."));

    let request = server.join().expect("server");
    assert!(request.starts_with("POST /ai/fallback"));
    assert!(request.contains(r#"{"query":"커피 몇 잔?"}"#));
}

#[test]
fn advise_connection_failure_is_reported_not_raised() {
    let dir = dataset_dir();
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let endpoint = format!("http://127.0.0.1:{port}/ai/fallback");

    mamma(&dir)
        .args(["advise", "커피", "--endpoint", &endpoint])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Connection error: "));
}

#[test]
fn interactive_session_answers_each_line() {
    let dir = dataset_dir();
    let assert = mamma(&dir)
        .args(["--format", "json", "--compact", "interactive"])
        .write_stdin("커피\n팥빙수\n")
        .assert()
        .success();
    let out = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let payloads: Vec<Value> = out
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();

    assert_eq!(payloads.len(), 2);
    assert_eq!(payloads[0]["results"][0]["name"], "커피");
    assert_eq!(payloads[1]["results"][0]["name"], "팥빙수");
}

#[test]
fn completions_generate_for_bash() {
    Command::new(assert_cmd::cargo::cargo_bin!("mamma"))
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mamma"));
}
