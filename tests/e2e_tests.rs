//! End-to-end tests for the outdatedcheck CLI
//!
//! These tests verify:
//! - Exit codes for clean, outdated and failed runs
//! - Text, JSON and diagnostics output
//! - Prefix scoping and config file handling
//!
//! Every run uses an on-disk tag table so no network access is needed.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const GO_MOD: &str = "\
module git.example.net/app

go 1.22

require (
\tgit.example.net/lib v1.0.0
\tgit.example.net/tools v0.4.0
\tgithub.com/third/party v2.1.0 // indirect
)
";

const TAGS: &str = r#"{
  "git.example.net/lib": ["v0.9.0", "v1.0.0", "v1.1.0", "nightly"],
  "git.example.net/tools": ["v0.4.0", "v0.4.0^{}"],
  "github.com/third/party": ["v2.0.0", "v2.1.0"]
}"#;

/// Create a project with a go.mod and a tag table
fn create_test_project(go_mod: &str, tags: &str) -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("go.mod"), go_mod).unwrap();
    fs::write(temp_dir.path().join("tags.json"), tags).unwrap();
    temp_dir
}

/// Command running the binary against `dir` with the on-disk tag table
fn outdatedcheck(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_outdatedcheck"));
    cmd.arg(dir)
        .arg("--tags-file")
        .arg(dir.join("tags.json"))
        .arg("--no-color")
        .env_remove("RUST_LOG");
    cmd
}

mod exit_code_tests {
    use super::*;

    #[test]
    fn test_exit_code_outdated() {
        let temp_dir = create_test_project(GO_MOD, TAGS);
        outdatedcheck(temp_dir.path()).assert().code(1);
    }

    #[test]
    fn test_exit_code_up_to_date() {
        let temp_dir = create_test_project(
            "require git.example.net/tools v0.4.0\n",
            TAGS,
        );
        outdatedcheck(temp_dir.path()).assert().code(0);
    }

    #[test]
    fn test_unresolvable_does_not_fail_run() {
        let temp_dir = create_test_project(
            "require (\n\tgit.example.net/tools v0.4.0\n\tgit.example.net/gone v1.0.0\n)\n",
            TAGS,
        );
        outdatedcheck(temp_dir.path())
            .assert()
            .code(0)
            .stdout(predicate::str::contains("Unresolvable"))
            .stderr(predicate::str::contains("git.example.net/gone"));
    }

    #[test]
    fn test_exit_code_nonexistent_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("does-not-exist");

        Command::new(env!("CARGO_BIN_EXE_outdatedcheck"))
            .arg(&missing)
            .arg("--tags-file")
            .arg(temp_dir.path().join("tags.json"))
            .assert()
            .code(2)
            .stderr(predicate::str::contains("manifest file not found"));
    }

    #[test]
    fn test_exit_code_unparsable_manifest() {
        let temp_dir = create_test_project("require (\n\tgit.example.net/lib v1.0.0\n", TAGS);
        outdatedcheck(temp_dir.path())
            .assert()
            .code(2)
            .stderr(predicate::str::contains("unterminated block"));
    }

    #[test]
    fn test_exit_code_missing_tags_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("go.mod"), GO_MOD).unwrap();
        outdatedcheck(temp_dir.path()).assert().code(2);
    }

    #[test]
    fn test_exit_code_help() {
        Command::new(env!("CARGO_BIN_EXE_outdatedcheck"))
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--prefix"));
    }

    #[test]
    fn test_exit_code_version() {
        Command::new(env!("CARGO_BIN_EXE_outdatedcheck"))
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

mod text_output_tests {
    use super::*;

    #[test]
    fn test_table_and_verdict() {
        let temp_dir = create_test_project(GO_MOD, TAGS);
        outdatedcheck(temp_dir.path())
            .assert()
            .code(1)
            .stdout(predicate::str::contains("MODULE"))
            .stdout(predicate::str::contains("NEW VERSION"))
            .stdout(predicate::str::is_match(r"git\.example\.net/lib\s+\| v1\.0\.0\s+\| v1\.1\.0\s+\| Outdated").unwrap())
            .stdout(predicate::str::is_match(r"git\.example\.net/tools\s+\| v0\.4\.0\s+\| -\s+\| Up-to-date").unwrap())
            .stdout(predicate::str::contains("There are outdated modules."));
    }

    #[test]
    fn test_quiet_mode() {
        let temp_dir = create_test_project(GO_MOD, TAGS);
        outdatedcheck(temp_dir.path())
            .arg("--quiet")
            .assert()
            .code(1)
            .stdout("There are outdated modules.\n");
    }

    #[test]
    fn test_prefix_scopes_report() {
        let temp_dir = create_test_project(GO_MOD, TAGS);
        outdatedcheck(temp_dir.path())
            .args(["--prefix", "github.com/"])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("github.com/third/party"))
            .stdout(predicate::str::contains("git.example.net/lib").not())
            .stdout(predicate::str::contains("All modules are up-to-date."));
    }

    #[test]
    fn test_manifest_found_from_subdirectory() {
        let temp_dir = create_test_project(GO_MOD, TAGS);
        let nested = temp_dir.path().join("internal").join("pkg");
        fs::create_dir_all(&nested).unwrap();

        Command::new(env!("CARGO_BIN_EXE_outdatedcheck"))
            .arg(&nested)
            .arg("--tags-file")
            .arg(temp_dir.path().join("tags.json"))
            .arg("--no-color")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("git.example.net/lib"));
    }
}

mod json_output_tests {
    use super::*;

    #[test]
    fn test_json_output_schema() {
        let temp_dir = create_test_project(GO_MOD, TAGS);
        let output = outdatedcheck(temp_dir.path())
            .arg("--json")
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

        assert_eq!(json["has_outdated"], true);
        assert_eq!(json["summary"]["total"], 3);
        assert_eq!(json["summary"]["outdated"], 1);
        assert_eq!(json["summary"]["up_to_date"], 2);

        let modules = json["modules"].as_array().unwrap();
        let paths: Vec<&str> = modules.iter().map(|m| m["path"].as_str().unwrap()).collect();
        assert_eq!(
            paths,
            vec![
                "git.example.net/lib",
                "git.example.net/tools",
                "github.com/third/party"
            ]
        );
        assert_eq!(modules[0]["latest"], "v1.1.0");
        assert_eq!(modules[2]["indirect"], true);
    }

    #[test]
    fn test_json_stdout_is_only_json() {
        let temp_dir = create_test_project(
            "require git.example.net/gone v1.0.0\n",
            TAGS,
        );
        let output = outdatedcheck(temp_dir.path())
            .args(["--format", "json"])
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(0));
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["modules"][0]["status"], "unresolvable");
        assert_eq!(json["modules"][0]["reason"]["code"], "fetch_failed");
    }
}

mod diagnostics_output_tests {
    use super::*;

    #[test]
    fn test_diagnostics_output() {
        let temp_dir = create_test_project(GO_MOD, TAGS);
        outdatedcheck(temp_dir.path())
            .args(["--format", "diagnostics"])
            .assert()
            .code(1)
            .stdout(
                "error: module 'git.example.net/lib' is outdated (v1.0.0), latest version: v1.1.0\n",
            );
    }

    #[test]
    fn test_unresolvable_module_is_warning() {
        let temp_dir = create_test_project(
            "require (\n\tgit.example.net/tools v0.4.0\n\tgit.example.net/gone v1.0.0\n)\n",
            TAGS,
        );
        outdatedcheck(temp_dir.path())
            .args(["--format", "diagnostics"])
            .assert()
            .code(0)
            .stdout(predicate::str::starts_with(
                "warning: could not check versions of module 'git.example.net/gone'",
            ))
            .stdout(predicate::str::contains("error:").not());
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_project_config_prefix() {
        let temp_dir = create_test_project(GO_MOD, TAGS);
        fs::write(
            temp_dir.path().join(".outdatedcheck.toml"),
            "module_prefix = \"github.com/\"\n",
        )
        .unwrap();

        outdatedcheck(temp_dir.path())
            .assert()
            .code(0)
            .stdout(predicate::str::contains("git.example.net/lib").not());
    }

    #[test]
    fn test_cli_prefix_overrides_config() {
        let temp_dir = create_test_project(GO_MOD, TAGS);
        fs::write(
            temp_dir.path().join(".outdatedcheck.toml"),
            "module_prefix = \"github.com/\"\n",
        )
        .unwrap();

        outdatedcheck(temp_dir.path())
            .args(["--prefix", "git.example.net/lib"])
            .assert()
            .code(1);
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let temp_dir = create_test_project(GO_MOD, TAGS);
        fs::write(temp_dir.path().join(".outdatedcheck.toml"), "concurrency = 0\n").unwrap();

        outdatedcheck(temp_dir.path())
            .assert()
            .code(2)
            .stderr(predicate::str::contains("concurrency"));
    }

    #[test]
    fn test_stable_only_flag() {
        let temp_dir = create_test_project(
            "require git.example.net/lib v1.1.0\n",
            r#"{"git.example.net/lib": ["v1.1.0", "v1.2.0-rc.1"]}"#,
        );

        outdatedcheck(temp_dir.path()).assert().code(1);
        outdatedcheck(temp_dir.path())
            .arg("--stable-only")
            .assert()
            .code(0);
    }
}
