use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn extcopy() -> Command {
    let mut cmd = Command::cargo_bin("extcopy").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn copies_nested_files_and_reports_count() {
    let source = TempDir::new().unwrap();
    let destination = TempDir::new().unwrap();
    write(source.path(), "Main.class", "main");
    write(source.path(), "pkg/Util.class", "util");
    write(source.path(), "pkg/Util.java", "source");
    write(source.path(), "pkg/inner/Deep.class", "deep");

    extcopy()
        .arg(".class")
        .arg(source.path())
        .arg(destination.path())
        .args(["--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Operation Successful.\nTotal Number of Files Copied: 3",
        ));

    assert_eq!(
        fs::read_to_string(destination.path().join("Deep.class")).unwrap(),
        "deep"
    );
    assert!(!destination.path().join("Util.java").exists());
    assert!(!destination.path().join("pkg").exists());
}

#[test]
fn empty_source_reports_operation_failed() {
    let source = TempDir::new().unwrap();
    let destination = TempDir::new().unwrap();

    extcopy()
        .arg(".txt")
        .arg(source.path())
        .arg(destination.path())
        .args(["--output-format", "plain"])
        .assert()
        .code(4)
        .stdout(predicate::str::contains("Operation Failed"));
}

#[test]
fn extension_without_dot_is_rejected_by_argument_parser() {
    let source = TempDir::new().unwrap();
    let destination = TempDir::new().unwrap();

    extcopy()
        .arg("class")
        .arg(source.path())
        .arg(destination.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("must start with '.'"));
}

#[test]
fn missing_source_directory_exits_with_invalid_argument() {
    let destination = TempDir::new().unwrap();
    let missing = destination.path().join("missing");

    extcopy()
        .arg(".txt")
        .arg(&missing)
        .arg(destination.path())
        .args(["--output-format", "plain"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not an existing directory"));
}

#[test]
fn dry_run_lists_without_copying() {
    let source = TempDir::new().unwrap();
    let destination = TempDir::new().unwrap();
    write(source.path(), "a/one.tar.gz", "1");
    write(source.path(), "two.gz", "2");

    extcopy()
        .arg(".gz")
        .arg(source.path())
        .arg(destination.path())
        .args(["--dry-run", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("two.gz"))
        .stdout(predicate::str::contains("one.tar.gz").not())
        .stdout(predicate::str::contains("Files that would be copied: 1"));

    assert_eq!(fs::read_dir(destination.path()).unwrap().count(), 0);
}

#[test]
fn json_output_carries_summary() {
    let source = TempDir::new().unwrap();
    let destination = TempDir::new().unwrap();
    write(source.path(), "notes.md", "hello");

    let output = extcopy()
        .arg(".md")
        .arg(source.path())
        .arg(destination.path())
        .args(["--output-format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let status_line = stdout
        .lines()
        .find(|line| line.contains("\"status\""))
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(status_line).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["summary"]["files_copied"], 1);
    assert_eq!(json["summary"]["bytes_copied"], 5);
}

#[test]
fn parameters_can_come_from_config_file() {
    let source = TempDir::new().unwrap();
    let destination = TempDir::new().unwrap();
    let config_dir = TempDir::new().unwrap();
    write(source.path(), "deep/er/data.csv", "a,b");

    let config_path = config_dir.path().join("extcopy.toml");
    fs::write(
        &config_path,
        format!(
            "[extract]\nextension = \".csv\"\nsource_dir = {:?}\ndestination_dir = {:?}\n",
            source.path().display().to_string(),
            destination.path().display().to_string()
        ),
    )
    .unwrap();

    extcopy()
        .arg("--config")
        .arg(&config_path)
        .args(["--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Number of Files Copied: 1"));

    assert!(destination.path().join("data.csv").exists());
}

#[test]
fn missing_parameters_are_a_configuration_error() {
    let source = TempDir::new().unwrap();

    extcopy()
        .current_dir(source.path())
        .arg(".txt")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No source directory"));
}

#[test]
fn startup_errors_follow_the_output_format() {
    let source = TempDir::new().unwrap();

    extcopy()
        .current_dir(source.path())
        .arg(".txt")
        .args(["--output-format", "json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"level\":\"error\""))
        .stdout(predicate::str::contains("No source directory"));
}

#[cfg(unix)]
#[test]
fn symlink_in_source_aborts_the_run() {
    let source = TempDir::new().unwrap();
    let destination = TempDir::new().unwrap();
    write(source.path(), "real.txt", "real");
    std::os::unix::fs::symlink(source.path().join("real.txt"), source.path().join("link.txt"))
        .unwrap();

    extcopy()
        .arg(".txt")
        .arg(source.path())
        .arg(destination.path())
        .args(["--output-format", "plain"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("link.txt"));
}
