//! End-to-end tests for the `pgcore` binary.
//!
//! Run with: `cargo test -p pgcore-cli --test cli_integration`

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Minimal Skyrim SE install with one active plugin and its archives.
struct Install {
    temp: TempDir,
}

impl Install {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let data = temp.path().join("game").join("Data");
        fs::create_dir_all(&data).unwrap();
        for file in ["Skyrim.esm", "Foo.esp", "Foo.bsa", "Foo - Textures.bsa", "Stray.bsa"] {
            fs::write(data.join(file), b"").unwrap();
        }

        let docs = temp.path().join("docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(
            docs.join("skyrim.ini"),
            "[Archive]\nsResourceArchiveList=Skyrim - Misc.bsa\n[General]\nsLanguage=ENGLISH\n",
        )
        .unwrap();

        let appdata = temp.path().join("appdata");
        fs::create_dir_all(&appdata).unwrap();
        fs::write(appdata.join("plugins.txt"), "*Foo.esp\n").unwrap();

        Self { temp }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.temp.path().join(name)
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_pgcore"))
            .arg("--game-dir")
            .arg(self.path("game"))
            .arg("--documents-dir")
            .arg(self.path("docs"))
            .arg("--appdata-dir")
            .arg(self.path("appdata"))
            .arg("--log-dir")
            .arg(self.path("logs"))
            .args(args)
            .output()
            .unwrap()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_plugins_command() {
    let install = Install::new();
    let output = install.run(&["plugins"]);

    assert!(output.status.success());
    let lines: Vec<String> = stdout(&output).lines().map(|l| l.trim().to_string()).collect();
    assert_eq!(lines, vec!["0  Skyrim", "1  Foo"]);
}

#[test]
fn test_archives_json_command() {
    let install = Install::new();
    let output = install.run(&["archives", "--json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value["order"],
        serde_json::json!(["Skyrim - Misc.bsa", "Foo.bsa", "Foo - Textures.bsa"])
    );
    assert_eq!(value["orphans"], serde_json::json!(["Stray.bsa"]));
}

#[test]
fn test_archives_output_file_and_log() {
    let install = Install::new();
    let report = install.path("report.txt");
    let output = install.run(&["archives", "--output", report.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    let text = fs::read_to_string(&report).unwrap();
    assert!(text.contains("Foo - Textures.bsa"));
    assert!(text.contains("Stray.bsa"));
    assert!(install.path("logs").join("pgcore.log").exists());
}

#[test]
fn test_ini_key_lookup() {
    let install = Install::new();

    let found = install.run(&["ini", "--key", "General.sLanguage"]);
    assert!(found.status.success());
    assert_eq!(stdout(&found).trim(), "ENGLISH");

    let missing = install.run(&["ini", "--key", "General.sMissing"]);
    assert_eq!(missing.status.code(), Some(1));
}

#[test]
fn test_invalid_game_dir_exits_with_error() {
    let install = Install::new();
    fs::remove_file(install.path("game").join("Data").join("Skyrim.esm")).unwrap();

    let output = install.run(&["plugins"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not contain Skyrim.esm"));
}
