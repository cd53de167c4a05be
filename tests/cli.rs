//
//  atlassian-cloud
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! End-to-end runs of the `atl` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "ATL_BASE_URL",
    "ATL_USERNAME",
    "ATL_API_TOKEN",
    "ATL_CONFIG",
    "ATL_NO_PROMPT",
    "ATL_LOG_FILE",
    "ATL_DEBUG",
];

/// `atl` with a private config file and no inherited settings.
fn atl(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("atl").unwrap();
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("--config").arg(config).arg("--no-prompt");
    cmd
}

/// `atl` pointed at `site` with a token on the command line.
fn atl_for(site: &str, config: &Path) -> Command {
    let mut cmd = atl(config);
    cmd.args(["--base-url", site, "--username", "me@example.com", "--token", "secret-token"]);
    cmd
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    atl(&dir.path().join("config.toml"))
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("atl version "));
}

#[test]
fn test_help_lists_products() {
    Command::cargo_bin("atl")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("jira").and(predicate::str::contains("confluence")));
}

#[test]
fn test_missing_site_is_config_error() {
    let dir = TempDir::new().unwrap();
    atl(&dir.path().join("config.toml"))
        .args(["jira", "boards"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No site URL configured"));
}

#[test]
fn test_config_set_get_round_trip() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");

    atl(&config)
        .args(["config", "set", "site.base_url", "https://example.atlassian.net/"])
        .assert()
        .success();
    atl(&config)
        .args(["config", "get", "site.base_url"])
        .assert()
        .success()
        .stdout("https://example.atlassian.net\n");
    atl(&config)
        .args(["config", "get", "site.username"])
        .assert()
        .code(8);
    atl(&config)
        .args(["config", "set", "core.editor", "vim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_jira_user_as_json() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/rest/api/3/user")
        .match_query(mockito::Matcher::UrlEncoded("accountId".into(), "abc".into()))
        .with_status(200)
        .with_body(r#"{"accountId": "abc", "displayName": "Ada Lovelace", "active": true}"#)
        .create();

    let dir = TempDir::new().unwrap();
    atl_for(&server.url(), &dir.path().join("config.toml"))
        .args(["--json", "jira", "user", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"displayName\": \"Ada Lovelace\""));
    mock.assert();
}

#[test]
fn test_missing_page_is_not_found() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/wiki/api/v2/pages/42")
        .match_query(mockito::Matcher::Any)
        .with_status(404)
        .with_body(r#"{"errors": [{"status": 404, "code": "NOT_FOUND", "title": "Not Found"}]}"#)
        .create();

    let dir = TempDir::new().unwrap();
    atl_for(&server.url(), &dir.path().join("config.toml"))
        .args(["confluence", "page", "42"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("Page 42 not found"));
    mock.assert();
}

#[test]
fn test_api_command_paginates_cursor_listings() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/wiki/api/v2/spaces")
        .match_query(mockito::Matcher::UrlEncoded("limit".into(), "25".into()))
        .with_status(200)
        .with_body(r#"{"results": [{"id": "1", "key": "DOC"}], "_links": {}}"#)
        .create();

    let dir = TempDir::new().unwrap();
    atl_for(&server.url(), &dir.path().join("config.toml"))
        .args(["api", "spaces", "--api", "confluence", "--paginate", "cursor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"key\": \"DOC\""));
    mock.assert();
}
