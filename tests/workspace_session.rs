use jotboard_core::{
    storage::FileSnapshotStore, AppController, AppEvent, ColumnId, DragLocation, DragResult,
    KeyPress, WorkspaceConfig,
};
use std::sync::Arc;
use tempfile::TempDir;

async fn type_and_commit(app: &mut AppController, text: &str) -> anyhow::Result<()> {
    app.dispatch(AppEvent::DraftChanged {
        text: text.to_string(),
    })
    .await?;
    app.dispatch(AppEvent::KeyPressed(KeyPress::new("Enter")))
        .await?;
    Ok(())
}

#[tokio::test]
async fn notes_survive_restart_but_board_does_not() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let config = WorkspaceConfig::default();

    {
        let store = Arc::new(FileSnapshotStore::new(temp_dir.path()));
        let mut app = AppController::open(&config, store).await?;

        type_and_commit(&mut app, "Standup at 10").await?;
        type_and_commit(&mut app, "Call the bank").await?;
        app.dispatch(AppEvent::EntryEdited {
            index: 1,
            text: "Called the bank".to_string(),
        })
        .await?;
        app.dispatch(AppEvent::DragEnded(DragResult::new(
            DragLocation::new(ColumnId::ToDo, 0),
            DragLocation::new(ColumnId::Done, 0),
        )))
        .await?;
        app.dispatch(AppEvent::DraftChanged {
            text: "unfinished".to_string(),
        })
        .await?;
    }

    let store = Arc::new(FileSnapshotStore::new(temp_dir.path()));
    let app = AppController::open(&config, store).await?;

    let texts: Vec<&str> = app.notes().entries().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, ["Standup at 10", "Called the bank"]);
    assert_eq!(app.draft(), "");
    assert_eq!(app.board().tasks(ColumnId::ToDo).len(), 2);
    assert_eq!(app.board().tasks(ColumnId::Done).len(), 2);
    Ok(())
}

#[tokio::test]
async fn snapshot_on_disk_is_plain_entry_list() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let config = WorkspaceConfig::default();
    let store = Arc::new(FileSnapshotStore::new(temp_dir.path()));
    let mut app = AppController::open(&config, store).await?;

    type_and_commit(&mut app, "Buy milk").await?;

    let raw = std::fs::read_to_string(temp_dir.path().join(".jotboard/notes.json"))?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    let entries = value.as_array().expect("snapshot is an array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["text"], "Buy milk");
    assert!(entries[0]["time"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(entries[0].as_object().map(|o| o.len()), Some(2));
    Ok(())
}

#[tokio::test]
async fn corrupted_snapshot_starts_fresh_and_is_replaced() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let dir = temp_dir.path().join(".jotboard");
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join("notes.json"), "[{\"text\": 1")?;

    let config = WorkspaceConfig::default();
    let store = Arc::new(FileSnapshotStore::new(temp_dir.path()));
    let mut app = AppController::open(&config, store).await?;
    assert!(app.notes().is_empty());

    type_and_commit(&mut app, "fresh start").await?;

    let raw = std::fs::read_to_string(dir.join("notes.json"))?;
    assert!(raw.contains("fresh start"));
    Ok(())
}

#[tokio::test]
async fn custom_snapshot_key_from_config_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("config.json");
    std::fs::write(&config_path, r#"{ "snapshot_key": "journal" }"#)?;

    let config = WorkspaceConfig::load(&config_path).await?;
    let store = Arc::new(FileSnapshotStore::new(temp_dir.path()));
    let mut app = AppController::open(&config, store).await?;
    type_and_commit(&mut app, "keyed").await?;

    assert!(temp_dir.path().join(".jotboard/journal.json").exists());
    assert!(!temp_dir.path().join(".jotboard/notes.json").exists());
    Ok(())
}
