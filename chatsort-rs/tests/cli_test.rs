//! Integration tests for the chatsort CLI against a copy of the fixture archive.

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join(name)
}

fn copy_dir(from: &Path, to: &Path) {
    std::fs::create_dir_all(to).unwrap();
    for entry in std::fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            std::fs::copy(entry.path(), target).unwrap();
        }
    }
}

/// A scratch directory holding `archive/` (a fixture copy) and `config.toml`.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        copy_dir(&fixture_path("chats"), &dir.path().join("archive"));
        std::fs::write(
            dir.path().join("config.toml"),
            "[settings]\nlocation = \"local\"\n",
        )
        .unwrap();
        Self { dir }
    }

    fn archive(&self) -> PathBuf {
        self.dir.path().join("archive")
    }

    /// Run chatsort and return (stdout, stderr, exit code).
    fn run(&self, args: &[&str]) -> (String, String, i32) {
        let binary = env!("CARGO_BIN_EXE_chatsort");

        let output = Command::new(binary)
            .arg("--archive")
            .arg(self.archive())
            .arg("--config")
            .arg(self.dir.path().join("config.toml"))
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute chatsort");

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);

        (stdout, stderr, code)
    }

    fn json(&self, args: &[&str]) -> serde_json::Value {
        let (stdout, stderr, code) = self.run(args);
        assert_eq!(code, 0, "stderr: {stderr}");
        serde_json::from_str(&stdout).unwrap()
    }
}

fn titles(response: &serde_json::Value) -> Vec<String> {
    response["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect()
}

mod search_command {
    use super::*;

    #[test]
    fn no_filters_shows_nothing() {
        let ws = Workspace::new();
        let response = ws.json(&["search"]);
        assert_eq!(response["total"], 0);
        assert!(titles(&response).is_empty());
    }

    #[test]
    fn content_query() {
        let ws = Workspace::new();
        let response = ws.json(&["search", "--content", r#""food" "eat" -"hungry""#]);
        assert_eq!(titles(&response), vec!["Trip Planning"]);
        assert_eq!(response["results"][0]["date"], "2024-03-01");
        assert_eq!(response["applied"], true);
    }

    #[test]
    fn limit_and_preview() {
        let ws = Workspace::new();
        let response = ws.json(&["search", "--tag", "misc", "--limit", "2"]);
        assert_eq!(response["total"], 4);
        assert_eq!(titles(&response), vec!["Trip Planning", "Rust Lifetimes"]);
        assert_eq!(response["results"][0]["summary"]["truncated"], false);
    }

    #[test]
    fn yaml_output() {
        let ws = Workspace::new();
        let (stdout, _, code) = ws.run(&["--yaml", "search", "--title", "budget"]);
        assert_eq!(code, 0);
        assert!(stdout.contains("title: Budget Review"));
    }
}

mod resume_command {
    use super::*;

    #[test]
    fn resume_after_search_reruns_it() {
        let ws = Workspace::new();
        let searched = ws.json(&["search", "--summary", "food"]);
        let resumed = ws.json(&["resume"]);
        assert_eq!(resumed["applied"], true);
        assert_eq!(titles(&resumed), titles(&searched));
        assert_eq!(resumed["fields"]["summary"], "food");
    }

    #[test]
    fn resume_after_draft_is_empty() {
        let ws = Workspace::new();
        ws.json(&["draft", "--title", "trip"]);
        let resumed = ws.json(&["resume"]);
        assert_eq!(resumed["applied"], false);
        assert_eq!(resumed["fields"]["title"], "trip");
        assert!(titles(&resumed).is_empty());
    }

    #[test]
    fn state_clear_resets() {
        let ws = Workspace::new();
        ws.json(&["search", "--title", "trip"]);
        assert_eq!(ws.json(&["state", "show"])["applied"], true);

        let cleared = ws.json(&["state", "clear"]);
        assert_eq!(cleared["applied"], false);
        assert_eq!(ws.json(&["state", "show"])["fields"]["title"], "");
    }
}

mod tags_command {
    use super::*;

    const TRIP: &str = "2024/2024-03-01 - Trip Planning - a1b2c3.md";

    #[test]
    fn show_tags_as_buffer() {
        let ws = Workspace::new();
        let response = ws.json(&["tags", TRIP]);
        assert_eq!(response["buffer"], "misc/travel\nmisc/food");
    }

    #[test]
    fn set_changed_tags() {
        let ws = Workspace::new();
        let response = ws.json(&["tags", TRIP, "--set", "travel, beach"]);
        assert_eq!(response["changed"], true);
        assert_eq!(
            response["tags"],
            serde_json::json!(["misc/travel", "misc/beach"])
        );

        let raw = std::fs::read_to_string(ws.archive().join(TRIP)).unwrap();
        assert!(raw.contains("- misc/beach"));
        assert!(!raw.contains("misc/food"));
    }

    #[test]
    fn set_unchanged_tags() {
        let ws = Workspace::new();
        let response = ws.json(&["tags", TRIP, "--set", "#travel\n#food"]);
        assert_eq!(response["changed"], false);
    }

    #[test]
    fn unknown_document() {
        let ws = Workspace::new();
        let (_, stderr, code) = ws.run(&["tags", "missing.md"]);
        assert_eq!(code, 2);
        assert!(stderr.contains("not found"));
    }
}

mod errors {
    use super::*;

    #[test]
    fn missing_archive() {
        let ws = Workspace::new();
        let binary = env!("CARGO_BIN_EXE_chatsort");
        let output = Command::new(binary)
            .arg("--archive")
            .arg(ws.dir.path().join("nope"))
            .arg("--config")
            .arg(ws.dir.path().join("config.toml"))
            .args(["state", "show"])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("Archive not found"));
    }
}
