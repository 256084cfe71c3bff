//! Basic functionality integration tests for the bkp CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_directory_backup() {
    let fixture = TestFixture::new();
    fixture.create_sample_tree();

    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.arg(fixture.src.path())
        .arg(fixture.dst.path())
        .assert()
        .success();

    fixture.assert_file_content(&fixture.dst.path().join("file1.txt"), "File 1");
    fixture.assert_file_content(&fixture.dst.path().join("subdir/file2.txt"), "File 2");
}

#[test]
fn test_directory_backup_to_new_destination() {
    let fixture = TestFixture::new();
    fixture.create_nested_structure(4, 3);

    let dst = fixture.dst.path().join("backups/today");
    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.arg(fixture.src.path()).arg(&dst).assert().success();

    assert_eq!(fixture.count_files_recursive(&dst), 12);
    fixture.assert_file_content(
        &dst.join("level0/level1/level2/level3/file2.txt"),
        "content at level 3",
    );
}

#[test]
fn test_file_to_new_path() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    fs::write(src.path().join("source.txt"), "Hello, World!").unwrap();

    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.arg(src.path().join("source.txt"))
        .arg(dst.path().join("dest.txt"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(
        fs::read_to_string(dst.path().join("dest.txt")).unwrap(),
        "Hello, World!"
    );
}

#[test]
fn test_file_into_existing_directory() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    fs::write(src.path().join("source.txt"), "Hello, Directory!").unwrap();

    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.arg(src.path().join("source.txt"))
        .arg(dst.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dst.path().join("source.txt")).unwrap(),
        "Hello, Directory!"
    );
}

#[test]
fn test_overwrite_existing_file() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    fs::write(src.path().join("source.txt"), "New Content").unwrap();
    fs::write(dst.path().join("dest.txt"), "Old Content").unwrap();

    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.arg(src.path().join("source.txt"))
        .arg(dst.path().join("dest.txt"))
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dst.path().join("dest.txt")).unwrap(),
        "New Content"
    );
}

#[test]
fn test_repeated_backup_is_idempotent() {
    let fixture = TestFixture::new();
    fixture.create_sample_tree();

    for _ in 0..2 {
        let mut cmd = cargo_bin_cmd!("bkp");
        cmd.arg(fixture.src.path())
            .arg(fixture.dst.path())
            .assert()
            .success();
    }

    assert_eq!(fixture.count_files_recursive(fixture.dst.path()), 2);
    fixture.assert_file_content(&fixture.dst.path().join("subdir/file2.txt"), "File 2");
}

#[test]
fn test_relative_paths() {
    let work = TempDir::new().unwrap();
    fs::create_dir(work.path().join("docs")).unwrap();
    fs::write(work.path().join("docs/a.txt"), "a").unwrap();

    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.current_dir(work.path())
        .arg("docs")
        .arg("backup")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(work.path().join("backup/a.txt")).unwrap(),
        "a"
    );
}

#[test]
fn test_no_sync_flag() {
    let fixture = TestFixture::new();
    fixture.create_sample_tree();

    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.arg("--no-sync")
        .arg(fixture.src.path())
        .arg(fixture.dst.path())
        .assert()
        .success();

    fixture.assert_file_content(&fixture.dst.path().join("file1.txt"), "File 1");
}

#[test]
fn test_verbose_prints_summary() {
    let fixture = TestFixture::new();
    fixture.create_sample_tree();

    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.arg("-v")
        .arg(fixture.src.path())
        .arg(fixture.dst.path().join("out"))
        .assert()
        .success()
        .stderr(
            predicate::str::contains("Backup completed")
                .and(predicate::str::contains("Files copied:   2")),
        );
}

#[cfg(unix)]
#[test]
fn test_symlinks_skip_flag() {
    use std::os::unix::fs::symlink;

    let fixture = TestFixture::new();
    fixture.create_sample_tree();
    symlink(
        fixture.src.path().join("file1.txt"),
        fixture.src.path().join("link.txt"),
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.arg("--symlinks")
        .arg("skip")
        .arg(fixture.src.path())
        .arg(fixture.dst.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipping symlink"));

    assert!(fs::symlink_metadata(fixture.dst.path().join("link.txt")).is_err());
    assert!(fixture.dst.path().join("file1.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_symlinks_followed_by_default() {
    use std::os::unix::fs::symlink;

    let fixture = TestFixture::new();
    fixture.create_sample_tree();
    symlink(
        fixture.src.path().join("subdir"),
        fixture.src.path().join("alias"),
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.arg(fixture.src.path())
        .arg(fixture.dst.path())
        .assert()
        .success();

    fixture.assert_file_content(&fixture.dst.path().join("alias/file2.txt"), "File 2");
}
