//! CLI argument validation tests.
//!
//! Everything here stays off the network: either the run fails before a
//! request is made, or the endpoint is a loopback port that refuses
//! connections.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Loopback address with nothing listening.
const DEAD_ENDPOINT: &str = "http://127.0.0.1:1/api/";

/// A command isolated from the user's config files and environment.
fn pixseek(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pixseek").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("PIXABAY_API_KEY")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

// === Help and Usage ===

#[test]
fn test_help_lists_subcommands() {
    let home = tempfile::tempdir().unwrap();
    pixseek(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search").and(predicate::str::contains("browse")));
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    pixseek(&home).assert().code(2).stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_search_requires_query() {
    let home = tempfile::tempdir().unwrap();
    pixseek(&home)
        .arg("search")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("QUERY"));
}

// === API Key ===

#[test]
fn test_missing_api_key_is_error() {
    let home = tempfile::tempdir().unwrap();
    pixseek(&home)
        .args(["search", "cats"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No Pixabay API key"));
}

#[test]
fn test_blank_api_key_is_error() {
    let home = tempfile::tempdir().unwrap();
    pixseek(&home)
        .args(["search", "cats", "--api-key", "   "])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("API key"));
}

#[test]
fn test_api_key_from_environment() {
    let home = tempfile::tempdir().unwrap();
    pixseek(&home)
        .env("PIXABAY_API_KEY", "from-env")
        .args(["search", "cats", "--endpoint", DEAD_ENDPOINT])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No Pixabay API key").not())
        .stderr(predicate::str::contains("Search request to"));
}

// === Query Validation ===

#[test]
fn test_blank_query_notifies_and_fails() {
    let home = tempfile::tempdir().unwrap();
    pixseek(&home)
        .args(["search", "   ", "--api-key", "dummy", "--endpoint", DEAD_ENDPOINT])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Oops, the search is empty"))
        .stderr(predicate::str::contains("Search request to").not());
}

#[test]
fn test_blank_query_jsonl_notice_on_stdout() {
    let home = tempfile::tempdir().unwrap();
    pixseek(&home)
        .args(["--format", "jsonl", "search", "", "--api-key", "dummy"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(r#""event":"notice""#))
        .stdout(predicate::str::contains(r#""kind":"failure""#))
        .stdout(predicate::str::contains("Oops, the search is empty"));
}

// === Request Failures ===

#[test]
fn test_unreachable_endpoint_reports_failure() {
    let home = tempfile::tempdir().unwrap();
    pixseek(&home)
        .args(["search", "cats", "--api-key", "dummy", "--endpoint", DEAD_ENDPOINT])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Search request to http://127.0.0.1:1/api/ failed",
        ));
}

// === Flag Validation ===

#[test]
fn test_per_page_out_of_range_rejected() {
    let home = tempfile::tempdir().unwrap();
    pixseek(&home)
        .args(["search", "cats", "--api-key", "dummy", "--per-page", "500"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("500 is not in 3..=200"));
}

#[test]
fn test_negative_margin_rejected() {
    let home = tempfile::tempdir().unwrap();
    pixseek(&home)
        .args(["search", "cats", "--margin=-3"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("non-negative"));
}

#[test]
fn test_zero_pages_rejected() {
    let home = tempfile::tempdir().unwrap();
    pixseek(&home)
        .args(["search", "cats", "--pages", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--pages"));
}

#[test]
fn test_invalid_format_rejected() {
    let home = tempfile::tempdir().unwrap();
    pixseek(&home)
        .args(["search", "cats", "--format", "xml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("text").and(predicate::str::contains("jsonl")));
}

// === Browse ===

#[test]
fn test_browse_quits_on_command() {
    let home = tempfile::tempdir().unwrap();
    pixseek(&home)
        .args(["browse", "--api-key", "dummy"])
        .write_stdin(":q\nthis line is never read\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Search request").not());
}

#[test]
fn test_browse_scroll_before_search_does_nothing() {
    let home = tempfile::tempdir().unwrap();
    pixseek(&home)
        .args(["browse", "--api-key", "dummy", "--endpoint", DEAD_ENDPOINT])
        .write_stdin("\n\n\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Search request").not());
}

#[test]
fn test_browse_reports_failures_and_continues() {
    let home = tempfile::tempdir().unwrap();
    pixseek(&home)
        .args(["browse", "--api-key", "dummy", "--endpoint", DEAD_ENDPOINT])
        .write_stdin("cats\n\n:q\n")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Search request to http://127.0.0.1:1/api/ failed",
        ));
}

#[test]
fn test_browse_requires_api_key() {
    let home = tempfile::tempdir().unwrap();
    pixseek(&home)
        .arg("browse")
        .write_stdin(":q\n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No Pixabay API key"));
}
