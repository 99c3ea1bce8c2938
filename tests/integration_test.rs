use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn ghrp(url: &str, file_path: &Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("ghrp"));
    cmd.arg("--github_token")
        .arg("test_token")
        .arg("--repository_owner")
        .arg("owner")
        .arg("--repository_name")
        .arg("repo")
        .arg("--release_tag")
        .arg("v1.0.0")
        .arg("--new_release_name")
        .arg("Release 1.0.0")
        .arg("--new_release_description")
        .arg("First release")
        .arg("--file_path")
        .arg(file_path)
        .arg("--file_name")
        .arg("bin.tar.gz")
        .arg("--api-url")
        .arg(url)
        .arg("--upload-url")
        .arg(url);
    cmd
}

fn write_asset(dir: &Path, content: &[u8]) -> std::path::PathBuf {
    let path = dir.join("bin.tar.gz");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_new_release_without_existing_asset() {
    let mut server = Server::new();
    let url = server.url();

    let mock_lookup = server
        .mock("GET", "/repos/owner/repo/releases/tags/v1.0.0")
        .match_header("Authorization", "Bearer test_token")
        .match_header("X-GitHub-Api-Version", "2022-11-28")
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create();

    let mock_create = server
        .mock("POST", "/repos/owner/repo/releases")
        .match_body(Matcher::Json(serde_json::json!({
            "tag_name": "v1.0.0",
            "target_commitish": "main",
            "name": "Release 1.0.0",
            "body": "First release",
            "draft": false,
            "prerelease": false,
            "generate_release_notes": false
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 42, "tag_name": "v1.0.0"}"#)
        .expect(1)
        .create();

    let mock_assets = server
        .mock("GET", "/repos/owner/repo/releases/42/assets")
        .with_status(200)
        .with_body("[]")
        .create();

    let mock_delete = server
        .mock("DELETE", Matcher::Any)
        .expect(0)
        .create();

    let mock_upload = server
        .mock("POST", "/repos/owner/repo/releases/42/assets?name=bin.tar.gz")
        .match_header("content-type", "application/octet-stream")
        .match_header("content-length", "13")
        .match_body(Matcher::Exact("tarball bytes".to_string()))
        .with_status(201)
        .with_body(r#"{"id": 9, "name": "bin.tar.gz", "state": "uploaded"}"#)
        .create();

    let dir = tempdir().unwrap();
    let file_path = write_asset(dir.path(), b"tarball bytes");

    ghrp(&url, &file_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("created owner/repo v1.0.0 (id 42)"))
        .stdout(predicate::str::contains("no asset bin.tar.gz to replace"))
        .stdout(predicate::str::contains("uploaded bin.tar.gz (id 9)"))
        .stdout(predicate::str::contains(r#""state": "uploaded""#));

    mock_lookup.assert();
    mock_create.assert();
    mock_assets.assert();
    mock_delete.assert();
    mock_upload.assert();
}

#[test]
fn test_existing_release_replaces_asset() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_lookup = server
        .mock("GET", "/repos/owner/repo/releases/tags/v1.0.0")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id": 42, "tag_name": "v1.0.0", "name": "Release 1.0.0", "target_commitish": "main"}"#,
        )
        .create();

    let mock_create = server
        .mock("POST", "/repos/owner/repo/releases")
        .expect(0)
        .create();

    let _mock_assets = server
        .mock("GET", "/repos/owner/repo/releases/42/assets")
        .with_status(200)
        .with_body(
            r#"[
                {"id": 6, "name": "bin.zip"},
                {"id": 7, "name": "bin.tar.gz"}
            ]"#,
        )
        .create();

    let mock_delete = server
        .mock("DELETE", "/repos/owner/repo/releases/assets/7")
        .with_status(204)
        .expect(1)
        .create();

    let mock_upload = server
        .mock("POST", "/repos/owner/repo/releases/42/assets?name=bin.tar.gz")
        .with_status(201)
        .with_body(r#"{"id": 10, "name": "bin.tar.gz"}"#)
        .expect(1)
        .create();

    let dir = tempdir().unwrap();
    let file_path = write_asset(dir.path(), b"new tarball");

    ghrp(&url, &file_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("exists owner/repo v1.0.0 (id 42)"))
        .stdout(predicate::str::contains("name Release 1.0.0"))
        .stdout(predicate::str::contains("target main"))
        .stdout(predicate::str::contains("deleting bin.tar.gz (id 7)"))
        .stdout(predicate::str::contains("uploaded bin.tar.gz (id 10)"));

    mock_create.assert();
    mock_delete.assert();
    mock_upload.assert();
}

#[test]
fn test_creation_failure_exits_non_zero() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_lookup = server
        .mock("GET", "/repos/owner/repo/releases/tags/v1.0.0")
        .with_status(404)
        .create();

    let _mock_create = server
        .mock("POST", "/repos/owner/repo/releases")
        .with_status(422)
        .with_body(r#"{"message": "Validation Failed"}"#)
        .create();

    let mock_assets = server
        .mock("GET", Matcher::Regex("/assets".to_string()))
        .expect(0)
        .create();

    let mock_upload = server
        .mock("POST", Matcher::Regex("/assets".to_string()))
        .expect(0)
        .create();

    let dir = tempdir().unwrap();
    let file_path = write_asset(dir.path(), b"tarball");

    ghrp(&url, &file_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Creating release failed with HTTP 422"))
        .stderr(predicate::str::contains("Validation Failed"));

    mock_assets.assert();
    mock_upload.assert();
}

#[test]
fn test_lookup_error_is_not_treated_as_missing() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_lookup = server
        .mock("GET", "/repos/owner/repo/releases/tags/v1.0.0")
        .with_status(500)
        .with_body("upstream exploded")
        .create();

    let mock_create = server
        .mock("POST", "/repos/owner/repo/releases")
        .expect(0)
        .create();

    let dir = tempdir().unwrap();
    let file_path = write_asset(dir.path(), b"tarball");

    ghrp(&url, &file_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Looking up release failed with HTTP 500"))
        .stderr(predicate::str::contains("upstream exploded"));

    mock_create.assert();
}

#[test]
fn test_delete_failure_stops_before_upload() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_lookup = server
        .mock("GET", "/repos/owner/repo/releases/tags/v1.0.0")
        .with_status(200)
        .with_body(r#"{"id": 42, "tag_name": "v1.0.0"}"#)
        .create();

    let _mock_assets = server
        .mock("GET", "/repos/owner/repo/releases/42/assets")
        .with_status(200)
        .with_body(r#"[{"id": 7, "name": "bin.tar.gz"}]"#)
        .create();

    let _mock_delete = server
        .mock("DELETE", "/repos/owner/repo/releases/assets/7")
        .with_status(403)
        .create();

    let mock_upload = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create();

    let dir = tempdir().unwrap();
    let file_path = write_asset(dir.path(), b"tarball");

    ghrp(&url, &file_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Deleting asset failed with HTTP 403"));

    mock_upload.assert();
}

#[test]
fn test_list_assets_failure_stops_before_delete_and_upload() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_lookup = server
        .mock("GET", "/repos/owner/repo/releases/tags/v1.0.0")
        .with_status(200)
        .with_body(r#"{"id": 42, "tag_name": "v1.0.0"}"#)
        .create();

    let _mock_assets = server
        .mock("GET", "/repos/owner/repo/releases/42/assets")
        .with_status(500)
        .with_body("assets unavailable")
        .create();

    let mock_delete = server
        .mock("DELETE", Matcher::Any)
        .expect(0)
        .create();

    let mock_upload = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create();

    let dir = tempdir().unwrap();
    let file_path = write_asset(dir.path(), b"tarball");

    ghrp(&url, &file_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Listing release assets failed with HTTP 500"))
        .stderr(predicate::str::contains("assets unavailable"));

    mock_delete.assert();
    mock_upload.assert();
}

#[test]
fn test_upload_failure_exits_non_zero() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_lookup = server
        .mock("GET", "/repos/owner/repo/releases/tags/v1.0.0")
        .with_status(200)
        .with_body(r#"{"id": 42, "tag_name": "v1.0.0"}"#)
        .create();

    let _mock_assets = server
        .mock("GET", "/repos/owner/repo/releases/42/assets")
        .with_status(200)
        .with_body("[]")
        .create();

    let _mock_upload = server
        .mock("POST", "/repos/owner/repo/releases/42/assets?name=bin.tar.gz")
        .with_status(502)
        .with_body("bad gateway")
        .create();

    let dir = tempdir().unwrap();
    let file_path = write_asset(dir.path(), b"tarball");

    ghrp(&url, &file_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Uploading asset failed with HTTP 502"))
        .stderr(predicate::str::contains("bad gateway"));
}

#[test]
fn test_missing_file_makes_no_requests() {
    let mut server = Server::new();
    let url = server.url();

    let mock_get = server.mock("GET", Matcher::Any).expect(0).create();
    let mock_post = server.mock("POST", Matcher::Any).expect(0).create();

    let dir = tempdir().unwrap();
    let file_path = dir.path().join("does-not-exist.tar.gz");

    ghrp(&url, &file_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));

    mock_get.assert();
    mock_post.assert();
}

#[test]
fn test_missing_required_flag_fails() {
    Command::new(cargo::cargo_bin!("ghrp"))
        .arg("--github_token")
        .arg("t")
        .arg("--repository_owner")
        .arg("owner")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--repository_name"));
}
