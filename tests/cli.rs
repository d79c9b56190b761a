use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn pdfshelf(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pdfshelf").unwrap();
    cmd.env("PDFSHELF_HOME", home)
        .env("NO_COLOR", "1")
        .current_dir(home);
    cmd
}

/// Uploads in one call; the last name ends up at position 1.
fn shelf_with(names: &[&str]) -> TempDir {
    let home = tempfile::tempdir().unwrap();
    let mut upload = pdfshelf(home.path());
    upload.arg("upload");
    for name in names {
        let path = home.path().join(name);
        fs::write(&path, format!("%PDF-1.4 {}", name)).unwrap();
        upload.arg(&path);
    }
    upload.assert().success();
    home
}

#[test]
fn upload_skips_non_pdfs_and_lists_in_order() {
    let home = tempfile::tempdir().unwrap();
    let pdf = home.path().join("Report.pdf");
    let txt = home.path().join("notes.txt");
    fs::write(&pdf, b"%PDF-1.4").unwrap();
    fs::write(&txt, b"plain").unwrap();

    pdfshelf(home.path())
        .args(["upload"])
        .arg(&pdf)
        .arg(&txt)
        .assert()
        .success()
        .stdout(predicate::str::contains("Uploaded: Report"))
        .stdout(predicate::str::contains("notes").not());

    pdfshelf(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Report"));
}

#[test]
fn empty_shelf_lists_nothing() {
    let home = tempfile::tempdir().unwrap();
    pdfshelf(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No documents found."));
}

#[test]
fn open_survives_between_runs_until_closed() {
    let home = shelf_with(&["alpha.pdf", "beta.pdf"]);

    pdfshelf(home.path())
        .args(["open", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Viewing: beta"))
        .stdout(predicate::str::contains("pdfId="));

    pdfshelf(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("beta"))
        .stdout(predicate::str::contains("views       1"));

    pdfshelf(home.path())
        .arg("close")
        .assert()
        .success()
        .stdout(predicate::str::contains("Viewer closed."));

    pdfshelf(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No document is open."))
        .stdout(predicate::str::contains("pdfId=").not());
}

#[test]
fn share_prints_link_even_without_clipboard() {
    let home = shelf_with(&["alpha.pdf"]);
    pdfshelf(home.path())
        .args(["share", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:5173/?pdfId="));
}

#[test]
fn favorites_view_only_shows_favorites() {
    let home = shelf_with(&["alpha.pdf", "beta.pdf"]);

    pdfshelf(home.path())
        .args(["favorite", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha"));

    pdfshelf(home.path())
        .args(["list", "--favorites"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha"))
        .stdout(predicate::str::contains("beta").not());
}

#[test]
fn highlight_requires_open_document() {
    let home = shelf_with(&["alpha.pdf"]);

    pdfshelf(home.path())
        .args(["highlight", "0.1", "0.1", "0.5", "0.3"])
        .assert()
        .failure();

    pdfshelf(home.path()).args(["open", "1"]).assert().success();
    pdfshelf(home.path())
        .args(["highlight", "0.1", "0.1", "0.5", "0.3"])
        .assert()
        .success();

    pdfshelf(home.path())
        .arg("annotations")
        .assert()
        .success()
        .stdout(predicate::str::contains("w  40.0%"));
}

#[test]
fn export_single_and_bundle() {
    let home = shelf_with(&["alpha.pdf", "beta.pdf"]);
    let out = home.path().join("out");
    fs::create_dir(&out).unwrap();

    pdfshelf(home.path())
        .args(["export", "2", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha.pdf"));
    assert_eq!(fs::read(out.join("alpha.pdf")).unwrap(), b"%PDF-1.4 alpha.pdf");

    pdfshelf(home.path())
        .args(["export", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains(".tar.gz"));
}

#[test]
fn config_set_and_show() {
    let home = tempfile::tempdir().unwrap();

    pdfshelf(home.path())
        .args(["config", "base-url", "https://docs.example/shelf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base-url set to"));

    pdfshelf(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("base-url = https://docs.example/shelf"));
}

#[test]
fn unknown_selector_exits_with_error() {
    let home = shelf_with(&["alpha.pdf"]);
    pdfshelf(home.path())
        .args(["open", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record not found"));
}

#[test]
fn delete_removes_record() {
    let home = shelf_with(&["alpha.pdf", "beta.pdf"]);
    pdfshelf(home.path())
        .args(["delete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted: alpha"));

    pdfshelf(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha").not());
}
