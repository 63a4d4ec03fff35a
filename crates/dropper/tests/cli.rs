// ABOUTME: Integration tests for the dropper CLI binary.
// ABOUTME: Covers stdout mode, file mode, fetch failures, and missing input.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const ARTICLE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Field Notes From The Archive</title></head>
<body>
<nav><a href="/">Home</a> | <a href="/about">About</a></nav>
<article>
<h1>Field Notes From The Archive</h1>
<p>Every page that is worth reading is also worth keeping, because links rot and
sites are redesigned, and what was there yesterday is often gone tomorrow.</p>
<p>Keeping a plain Markdown copy with the source address and the time it was saved
makes the copy easy to search, easy to read, and easy to cite later on.</p>
</article>
</body>
</html>"#;

fn dropper_cmd() -> Command {
    Command::cargo_bin("dropper").unwrap()
}

fn article_server() -> MockServer {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/article");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(ARTICLE);
    });
    server
}

#[test]
fn prints_document_to_stdout_by_default() {
    let server = article_server();
    let url = server.url("/article");

    let output = dropper_cmd()
        .arg(&url)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert!(
        stdout.starts_with(&format!("---\nurl: {}\ntitle: Field Notes From The Archive\ndate_saved: ", url)),
        "unexpected frontmatter: {}",
        stdout
    );
    assert!(stdout.contains("\n---\n# Field Notes From The Archive\n\n"), "got: {}", stdout);
    assert!(stdout.contains("links rot"), "body missing: {}", stdout);
    assert!(stdout.ends_with('\n'));
}

#[test]
fn output_file_flag_writes_title_named_file() {
    let server = article_server();
    let temp_dir = TempDir::new().unwrap();

    dropper_cmd()
        .current_dir(temp_dir.path())
        .arg("-o")
        .arg(server.url("/article"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Saved to: "))
        .stdout(predicate::str::contains("Field Notes From The Archive-"));

    let entries: Vec<_> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(entries.len(), 1, "expected one file, got {:?}", entries);

    let name = &entries[0];
    assert!(name.starts_with("Field Notes From The Archive-"), "got: {}", name);
    assert!(name.ends_with(".md"), "got: {}", name);

    let content = fs::read_to_string(temp_dir.path().join(name)).unwrap();
    assert!(content.starts_with("---\nurl: "), "got: {}", content);
    assert!(content.contains("links rot"), "got: {}", content);
}

#[test]
fn long_output_dir_flag_is_honoured() {
    let server = article_server();
    let temp_dir = TempDir::new().unwrap();

    dropper_cmd()
        .arg("--output-file")
        .arg("--output-dir")
        .arg(temp_dir.path())
        .arg(server.url("/article"))
        .assert()
        .success();

    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
}

#[test]
fn max_bytes_limits_filename_length() {
    let server = article_server();
    let temp_dir = TempDir::new().unwrap();

    dropper_cmd()
        .current_dir(temp_dir.path())
        .arg("-o")
        .arg("--max-bytes")
        .arg("24")
        .arg(server.url("/article"))
        .assert()
        .success();

    let name = fs::read_dir(temp_dir.path())
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .file_name()
        .into_string()
        .unwrap();
    assert!(name.len() <= 24, "too long: {}", name);
    assert!(name.ends_with(".md"), "got: {}", name);
}

#[test]
fn http_error_status_fails_without_writing() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/gone");
        then.status(404).body("not here");
    });
    let temp_dir = TempDir::new().unwrap();

    dropper_cmd()
        .current_dir(temp_dir.path())
        .arg("-o")
        .arg(server.url("/gone"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("404"));

    mock.assert();
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn invalid_url_fails() {
    dropper_cmd()
        .arg("not a url")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid URL"));
}

#[test]
fn help_shows_library_defaults() {
    dropper_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("[default: 100]"))
        .stdout(predicate::str::contains("[default: 250]"))
        .stdout(predicate::str::contains("[default: 30]"));
}

#[test]
fn no_args_fails() {
    dropper_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("URL is required"));
}
