//! End-to-end engine tests over a copy of the fixture archive.

use chatsort::archive::Archive;
use chatsort::config::ArchiveConfig;
use chatsort::state::{FilterStateStore, JsonFileSettings};
use chatsort::{EngineSession, FieldInputs, Scope, SearchOutcome, TagRules};
use std::path::{Path, PathBuf};
use std::sync::Arc;
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

/// A writable copy of the `chats` fixture.
fn chats() -> TempDir {
    let dir = TempDir::new().unwrap();
    copy_dir(&fixture_path("chats"), dir.path());
    dir
}

fn open(root: &Path) -> EngineSession {
    let archive = Archive::new(root, &ArchiveConfig::default()).unwrap();
    let settings = JsonFileSettings::new(root.join(".chatsort").join("settings.json"));
    EngineSession::open(
        Arc::new(archive),
        &Scope::all(),
        FilterStateStore::new(Box::new(settings)),
        TagRules::default(),
    )
    .unwrap()
}

async fn titles(session: &EngineSession, inputs: &FieldInputs) -> Vec<String> {
    match session.search(inputs).await {
        SearchOutcome::Results(docs) => docs.into_iter().map(|d| d.title).collect(),
        SearchOutcome::Superseded => panic!("unexpected superseded search"),
    }
}

const TRIP: &str = "2024/2024-03-01 - Trip Planning - a1b2c3.md";

mod filtering {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn lists_only_real_documents() {
        let dir = chats();
        let session = open(dir.path());
        assert_eq!(session.documents().len(), 4);
    }

    #[tokio::test]
    async fn empty_inputs_show_nothing() {
        let dir = chats();
        let session = open(dir.path());
        assert!(titles(&session, &FieldInputs::default()).await.is_empty());
    }

    #[tokio::test]
    async fn signed_content_query_includes_and_excludes() {
        let dir = chats();
        let inputs = FieldInputs {
            content: r#""food" "eat" -"hungry""#.to_string(),
            ..Default::default()
        };

        let session = open(dir.path());
        assert_eq!(titles(&session, &inputs).await, vec!["Trip Planning"]);

        let path = dir.path().join(TRIP);
        let mut raw = std::fs::read_to_string(&path).unwrap();
        raw.push_str("\nBy the end everyone was hungry.\n");
        std::fs::write(&path, raw).unwrap();

        let session = open(dir.path());
        assert!(titles(&session, &inputs).await.is_empty());
    }

    #[tokio::test]
    async fn date_range_excludes_even_when_text_matches() {
        let dir = chats();
        let session = open(dir.path());
        let inputs = FieldInputs {
            title: "trip".to_string(),
            date_from: "2024-01-01".to_string(),
            date_to: "2024-01-31".to_string(),
            ..Default::default()
        };
        assert!(titles(&session, &inputs).await.is_empty());
    }

    #[tokio::test]
    async fn plain_tag_substring_vs_quoted_nonexistent() {
        let dir = chats();
        let session = open(dir.path());

        let plain = FieldInputs {
            tag: "misc".to_string(),
            ..Default::default()
        };
        assert_eq!(
            titles(&session, &plain).await,
            vec!["Trip Planning", "Rust Lifetimes", "Budget Review", "Loose Notes"]
        );

        let quoted = FieldInputs {
            tag: r#""nonexistent""#.to_string(),
            ..Default::default()
        };
        assert!(titles(&session, &quoted).await.is_empty());
    }

    #[tokio::test]
    async fn scalar_tags_and_filename_dates() {
        let dir = chats();
        let session = open(dir.path());
        let inputs = FieldInputs {
            tag: r#""travel" -"food""#.to_string(),
            date_to: "2023-12-31".to_string(),
            ..Default::default()
        };
        assert_eq!(titles(&session, &inputs).await, vec!["Budget Review"]);
    }

    #[tokio::test]
    async fn repeated_content_search_uses_cache() {
        let dir = chats();
        let session = open(dir.path());
        let inputs = FieldInputs {
            content: "food".to_string(),
            ..Default::default()
        };

        assert_eq!(titles(&session, &inputs).await, vec!["Trip Planning", "Loose Notes"]);
        assert_eq!(session.cache().len(), 4);

        // Edits on disk are not seen for the rest of the session.
        std::fs::write(dir.path().join(TRIP), "no longer relevant").unwrap();
        assert_eq!(titles(&session, &inputs).await, vec!["Trip Planning", "Loose Notes"]);
    }

    #[tokio::test]
    async fn folder_scope() {
        let dir = chats();
        let archive = Archive::new(dir.path(), &ArchiveConfig::default()).unwrap();
        let session = EngineSession::open(
            Arc::new(archive),
            &Scope::folder("2024"),
            FilterStateStore::new(Box::new(JsonFileSettings::new(
                dir.path().join("settings.json"),
            ))),
            TagRules::default(),
        )
        .unwrap();
        assert_eq!(session.documents().len(), 2);
    }
}

mod persistence {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn reload_reproduces_applied_search() {
        let dir = chats();
        let inputs = FieldInputs {
            summary: r#"-"borrow""#.to_string(),
            ..Default::default()
        };

        let first = open(dir.path());
        let before = titles(&first, &inputs).await;
        assert_eq!(before, vec!["Trip Planning", "Budget Review", "Loose Notes"]);
        drop(first);

        let second = open(dir.path());
        let resumed = second.restore().await;
        assert!(resumed.ran);
        assert_eq!(resumed.state.fields, inputs);
        let after: Vec<String> = resumed.results.into_iter().map(|d| d.title).collect();
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn draft_only_state_starts_empty() {
        let dir = chats();
        let first = open(dir.path());
        first.draft(&FieldInputs {
            title: "trip".to_string(),
            ..Default::default()
        });
        drop(first);

        let resumed = open(dir.path()).restore().await;
        assert!(!resumed.ran);
        assert!(resumed.results.is_empty());
        assert_eq!(resumed.state.fields.title, "trip");
    }

    #[tokio::test]
    async fn corrupt_settings_degrade_to_empty() {
        let dir = chats();
        std::fs::create_dir_all(dir.path().join(".chatsort")).unwrap();
        std::fs::write(dir.path().join(".chatsort/settings.json"), "garbage").unwrap();

        let resumed = open(dir.path()).restore().await;
        assert!(!resumed.ran);
        assert_eq!(resumed.state, Default::default());
    }
}

mod tag_editing {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn changed_commit_persists_canonical_tags() {
        let dir = chats();
        let session = open(dir.path());

        let outcome = session
            .commit_tags(Path::new(TRIP), "#Travel\nfood, Road Trip")
            .await
            .unwrap();
        assert!(outcome.changed);
        assert_eq!(
            outcome.tags,
            vec!["misc/travel", "misc/food", "misc/road", "misc/trip"]
        );

        let raw = std::fs::read_to_string(dir.path().join(TRIP)).unwrap();
        assert!(raw.contains("- misc/road\n"));
        assert!(raw.contains("title: Trip Planning"));
        assert!(raw.ends_with("We talked about food and where to eat near the hotel.\n"));

        let reopened = open(dir.path());
        assert_eq!(
            reopened.document(Path::new(TRIP)).unwrap().tags,
            outcome.tags
        );
    }

    #[tokio::test]
    async fn unchanged_commit_leaves_file_alone() {
        let dir = chats();
        let path = dir.path().join(TRIP);
        let before = std::fs::read_to_string(&path).unwrap();

        let session = open(dir.path());
        let outcome = session
            .commit_tags(Path::new(TRIP), "travel food")
            .await
            .unwrap();
        assert!(!outcome.changed);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn commit_marks_state_applied_for_reload() {
        let dir = chats();
        let session = open(dir.path());
        session.draft(&FieldInputs {
            tag: "travel".to_string(),
            ..Default::default()
        });

        session
            .commit_tags(Path::new(TRIP), "travel\nbeach")
            .await
            .unwrap();
        drop(session);

        let resumed = open(dir.path()).restore().await;
        assert!(resumed.ran);
        let titles: Vec<String> = resumed.results.into_iter().map(|d| d.title).collect();
        assert_eq!(titles, vec!["Trip Planning", "Budget Review"]);
    }
}
