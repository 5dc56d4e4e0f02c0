//! End-to-end tests driving the ggallin binary in a scratch project

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ggallin(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ggallin").unwrap();
    cmd.current_dir(dir)
        .env_remove("DEBUG")
        .env_remove("RUST_LOG")
        .env_remove("GGALLIN_JOBS")
        .arg("--no-color");
    cmd
}

fn project_with_outputs(version: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("Ggallin.toml"),
        format!("[package]\nname = \"mytool\"\nversion = \"{}\"\n", version),
    )
    .unwrap();

    let build_dir = temp_dir.path().join("build").join(version);
    for (platform, size) in [("linux_amd64", 500), ("darwin_amd64", 480)] {
        let dir = build_dir.join(platform);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("mytool"), vec![0u8; size]).unwrap();
    }
    temp_dir
}

fn entry_sizes(path: &Path) -> Vec<(String, u64)> {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| {
            let entry = archive.by_index(i).unwrap();
            (entry.name().to_string(), entry.size())
        })
        .collect()
}

#[test]
fn test_version_subcommand() {
    let temp_dir = TempDir::new().unwrap();
    ggallin(temp_dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "ggallin v{}, build ",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_flag() {
    let temp_dir = TempDir::new().unwrap();
    ggallin(temp_dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("v{}, build ", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_init_then_refuse_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    ggallin(temp_dir.path())
        .args(["init", "--name", "mytool", "--project-version", "1.0.0"])
        .assert()
        .success();

    let content = fs::read_to_string(temp_dir.path().join("Ggallin.toml")).unwrap();
    assert!(content.contains("version = \"1.0.0\""));

    ggallin(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_package_two_platforms() {
    let project = project_with_outputs("1.2.0");

    ggallin(project.path())
        .arg("package")
        .assert()
        .success()
        .stderr(predicate::str::contains("Package files created into"));

    let pkg_dir = project.path().join("pkg").join("1.2.0");
    let names: BTreeSet<String> = fs::read_dir(&pkg_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        BTreeSet::from([
            "darwin_amd64_1.2.0.zip".to_string(),
            "linux_amd64_1.2.0.zip".to_string(),
        ])
    );

    assert_eq!(
        entry_sizes(&pkg_dir.join("linux_amd64_1.2.0.zip")),
        vec![("mytool".to_string(), 500)]
    );
    assert_eq!(
        entry_sizes(&pkg_dir.join("darwin_amd64_1.2.0.zip")),
        vec![("mytool".to_string(), 480)]
    );
}

#[test]
fn test_package_reads_version_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("VERSION"), "0.0.7\n").unwrap();
    fs::create_dir_all(temp_dir.path().join("build").join("0.0.7").join("linux_arm")).unwrap();

    ggallin(temp_dir.path())
        .args(["package", "--jobs", "1"])
        .assert()
        .success();

    assert!(temp_dir
        .path()
        .join("pkg")
        .join("0.0.7")
        .join("linux_arm_0.0.7.zip")
        .is_file());
}

#[test]
fn test_package_without_build_dir_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("VERSION"), "1.2.0").unwrap();

    ggallin(temp_dir.path())
        .arg("package")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"));

    let pkg_dir = temp_dir.path().join("pkg").join("1.2.0");
    assert!(pkg_dir.is_dir());
    assert_eq!(fs::read_dir(&pkg_dir).unwrap().count(), 0);
}

#[test]
fn test_build_without_version_declaration() {
    let temp_dir = TempDir::new().unwrap();
    ggallin(temp_dir.path())
        .arg("build")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("ggallin init"));
}

#[test]
fn test_build_with_missing_compiler() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("Ggallin.toml"),
        "[package]\nversion = \"1.0.0\"\n\n[build]\ncompiler = \"ggallin-missing-gox\"\n",
    )
    .unwrap();

    ggallin(temp_dir.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing tool: ggallin-missing-gox"));
}

#[test]
fn test_debug_env_enables_logging() {
    let project = project_with_outputs("1.2.0");

    ggallin(project.path())
        .env("DEBUG", "1")
        .arg("package")
        .assert()
        .success()
        .stderr(predicate::str::contains("packaging 2 target(s)"));
}

#[test]
fn test_invalid_config_shows_hint() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("Ggallin.toml"), "[package\nversion = 1").unwrap();

    ggallin(temp_dir.path())
        .arg("package")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("hint"));
}

#[cfg(unix)]
fn write_stub(bin_dir: &Path, name: &str, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = bin_dir.join(name);
    fs::write(
        &path,
        format!("#!/bin/sh\necho \"{} $*\" >> \"$GGALLIN_CALL_LOG\"\n{}", name, body),
    )
    .unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(unix)]
#[test]
fn test_release_runs_build_push_publish_in_order() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("Ggallin.toml"),
        "[package]\nname = \"mytool\"\nversion = \"1.2.0\"\n",
    )
    .unwrap();

    let bin_dir = temp_dir.path().join("stub-bin");
    fs::create_dir_all(&bin_dir).unwrap();
    write_stub(
        &bin_dir,
        "gox",
        "mkdir -p build/1.2.0/linux_amd64\nprintf bin > build/1.2.0/linux_amd64/mytool\n",
    );
    write_stub(
        &bin_dir,
        "git",
        "case \"$1\" in\n  describe) echo abc1234 ;;\n  rev-parse) echo main ;;\nesac\n",
    );
    write_stub(&bin_dir, "ghr", "");

    let call_log = temp_dir.path().join("calls.log");
    let path = format!(
        "{}:{}",
        bin_dir.display(),
        std::env::var("PATH").unwrap_or_default()
    );

    ggallin(temp_dir.path())
        .env("PATH", path)
        .env("GGALLIN_CALL_LOG", &call_log)
        .args(["release", "--replace", "-u", "octocat"])
        .assert()
        .success();

    let calls: Vec<String> = fs::read_to_string(&call_log)
        .unwrap()
        .lines()
        .filter(|line| {
            line.starts_with("gox ") || line.starts_with("git push") || line.starts_with("ghr ")
        })
        .map(String::from)
        .collect();
    assert_eq!(calls.len(), 3, "unexpected calls: {:?}", calls);
    assert!(calls[0].starts_with("gox -ldflags -X main.GitCommit=abc1234 -output build"));
    assert_eq!(calls[1], "git push origin main");
    assert_eq!(calls[2], "ghr --username octocat --replace v1.2.0 pkg/1.2.0");

    assert!(temp_dir
        .path()
        .join("pkg")
        .join("1.2.0")
        .join("linux_amd64_1.2.0.zip")
        .is_file());
}
