//! Error handling integration tests for the bkp CLI.
//!
//! These tests verify proper error handling behaviors:
//! - Destinations inside the source are refused before anything is written
//! - Source validation
//! - Permission errors
//! - Usage errors and help output

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

#[rstest]
#[case::no_arguments(&[])]
#[case::one_argument(&["only-source"])]
fn test_too_few_arguments_print_help(#[case] args: &[&str]) {
    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.args(args)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Usage:")
                .and(predicate::str::contains("back up")),
        );
}

#[test]
fn test_too_many_arguments_is_usage_error() {
    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.args(["a", "b", "c"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unexpected argument"));
}

#[rstest]
#[case::nested("backup")]
#[case::deeply_nested("a/b/c")]
#[case::same(".")]
fn test_destination_inside_source_is_refused(#[case] relative_dst: &str) {
    let fixture = TestFixture::new();
    fixture.create_sample_tree();
    let dst = fixture.src.path().join(relative_dst);

    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.arg(fixture.src.path())
        .arg(&dst)
        .assert()
        .failure()
        .code(1)
        .stderr(
            predicate::str::contains("error[nested_destination]")
                .and(predicate::str::contains("cannot be inside source")),
        );

    // Nothing was written into the source tree
    assert_eq!(fixture.count_files_recursive(fixture.src.path()), 2);
    if relative_dst != "." {
        assert!(!dst.exists());
    }
}

#[test]
fn test_destination_inside_source_relative_forms() {
    let work = TempDir::new().unwrap();
    fs::create_dir(work.path().join("docs")).unwrap();
    fs::write(work.path().join("docs/a.txt"), "a").unwrap();

    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.current_dir(work.path())
        .arg(work.path().join("docs"))
        .arg("./docs/../docs/backup")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[nested_destination]"));

    assert!(!work.path().join("docs/backup").exists());
}

#[test]
fn test_file_into_its_own_directory_is_refused() {
    let src = TempDir::new().unwrap();
    let file = src.path().join("data.txt");
    fs::write(&file, "precious").unwrap();

    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.arg(&file)
        .arg(src.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[nested_destination]"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "precious");
}

#[test]
fn test_nonexistent_source() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.arg(src.path().join("nonexistent"))
        .arg(dst.path().join("out"))
        .assert()
        .failure()
        .code(1)
        .stderr(
            predicate::str::contains("error[source_not_found]")
                .and(predicate::str::contains("does not exist")),
        );

    assert_eq!(fs::read_dir(dst.path()).unwrap().count(), 0);
}

#[test]
fn test_destination_blocked_by_file() {
    let fixture = TestFixture::new();
    fixture.create_sample_tree();
    let blocker = fixture.dst.path().join("blocker");
    fs::write(&blocker, "in the way").unwrap();

    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.arg(fixture.src.path())
        .arg(&blocker)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[directory_creation]"));

    fixture.assert_file_content(&blocker, "in the way");
}

#[test]
fn test_destination_below_a_file() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    fs::write(src.path().join("file.txt"), "content").unwrap();
    let blocker = dst.path().join("blocker");
    fs::write(&blocker, "in the way").unwrap();

    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.arg(src.path().join("file.txt"))
        .arg(blocker.join("sub/file.txt"))
        .assert()
        .failure()
        .code(1)
        .stderr(
            predicate::str::contains("error[destination_access]")
                .and(predicate::str::contains("Failed to access destination")),
        );

    assert_eq!(fs::read_to_string(&blocker).unwrap(), "in the way");
}

#[cfg(unix)]
#[test]
fn test_symlink_to_destination_is_refused() {
    use std::os::unix::fs::symlink;

    let fixture = TestFixture::new();
    fixture.create_sample_tree();
    symlink(fixture.dst.path(), fixture.src.path().join("mirror")).unwrap();

    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.arg(fixture.src.path())
        .arg(fixture.dst.path())
        .assert()
        .failure()
        .code(1)
        .stderr(
            predicate::str::contains("error[nested_destination]")
                .and(predicate::str::contains("mirror")),
        );

    assert!(!fixture.dst.path().join("mirror").exists());
}

#[cfg(unix)]
#[test]
fn test_symlink_error_mode() {
    use std::os::unix::fs::symlink;

    let fixture = TestFixture::new();
    fixture.create_sample_tree();
    symlink(
        fixture.src.path().join("file1.txt"),
        fixture.src.path().join("link.txt"),
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.args(["--symlinks", "error"])
        .arg(fixture.src.path())
        .arg(fixture.dst.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[symlink_rejected]"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_source_file() {
    use std::os::unix::fs::PermissionsExt;

    if common::running_as_root() {
        eprintln!("skipping: permission bits are not enforced for root");
        return;
    }

    let fixture = TestFixture::new();
    fixture.create_sample_tree();
    let locked = fixture.src.path().join("subdir/file2.txt");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    let _guard = scopeguard::guard(locked.clone(), |path| {
        fs::set_permissions(path, fs::Permissions::from_mode(0o644)).ok();
    });

    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.arg(fixture.src.path())
        .arg(fixture.dst.path())
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("error[source_open]")
                .and(predicate::str::contains("file2.txt"))
                .and(predicate::str::contains("Permission denied")),
        );
}

#[cfg(unix)]
#[test]
fn test_read_only_destination() {
    use std::os::unix::fs::PermissionsExt;

    if common::running_as_root() {
        eprintln!("skipping: permission bits are not enforced for root");
        return;
    }

    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    fs::write(src.path().join("file.txt"), "content").unwrap();

    fs::set_permissions(dst.path(), fs::Permissions::from_mode(0o555)).unwrap();
    let _guard = scopeguard::guard(dst.path().to_path_buf(), |path| {
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).ok();
    });

    let mut cmd = cargo_bin_cmd!("bkp");
    cmd.arg(src.path().join("file.txt"))
        .arg(dst.path().join("file.txt"))
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("error[destination_create]")
                .and(predicate::str::contains("Permission denied")),
        );
}
