use pretty_assertions::assert_eq;
use wiedit::backup::BackupStyle;
use wiedit::{DocState, DocumentController, EditorConfig, EditorError, EntryId};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn backups_in(dir: &std::path::Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if name.contains("backup_") {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

#[test]
fn open_writes_a_byte_identical_backup() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("lore.json");
    // Hand-edited file: comments and trailing commas are accepted on read.
    let input = "{\r\n  // hand edited\r\n  \"entries\": { \"0\": { \"comment\": \"龙\", }, },\r\n}\r\n";
    std::fs::write(&path, input)?;

    let mut doc = DocumentController::new(EditorConfig::default());
    let report = doc.open(&path)?;

    let backup = report.backup?;
    assert_eq!(std::fs::read(&backup)?, input.as_bytes());
    let name = backup.file_name().ok_or("no file name")?.to_string_lossy().into_owned();
    assert!(name.starts_with("lore.json.backup_"), "{name}");
    assert_eq!(doc.state(), DocState::Clean);
    assert_eq!(doc.entry(&EntryId::new("0")).ok_or("missing")?.title(), "龙");
    Ok(())
}

#[test]
fn stem_style_backups_keep_the_extension() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("lore.json");
    std::fs::write(&path, r#"{"entries":{}}"#)?;

    let config = EditorConfig {
        backup: BackupStyle::Stem,
        ..EditorConfig::default()
    };
    let mut doc = DocumentController::new(config);
    doc.open(&path)?;
    doc.open(&path)?;

    // Two opens within the same second still give two distinct backups.
    let names = backups_in(dir.path())?;
    assert_eq!(names.len(), 2, "{names:?}");
    assert!(names.iter().all(|n| n.starts_with("lore_backup_") && n.ends_with(".json")));
    Ok(())
}

#[test]
fn malformed_file_is_rejected_but_still_backed_up() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let good = dir.path().join("good.json");
    let bad = dir.path().join("bad.json");
    std::fs::write(&good, r#"{"entries":{"0":{"comment":"keep me"}}}"#)?;
    std::fs::write(&bad, r#"{"entries":{"0":["not","an","object"]}}"#)?;

    let mut doc = DocumentController::new(EditorConfig::default());
    doc.open(&good)?;

    let err = doc.open(&bad).err().ok_or("expected an error")?;
    assert!(matches!(err, EditorError::MalformedDocument(_)), "{err}");

    // The previous document is untouched.
    assert_eq!(doc.path(), Some(good.as_path()));
    assert_eq!(doc.entry(&EntryId::new("0")).ok_or("missing")?.title(), "keep me");

    let backups = backups_in(dir.path())?;
    assert_eq!(backups.len(), 2, "{backups:?}");
    Ok(())
}

#[test]
fn non_object_root_is_malformed() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("list.json");
    std::fs::write(&path, "[1, 2, 3]")?;

    let mut doc = DocumentController::new(EditorConfig::default());
    assert!(matches!(doc.open(&path), Err(EditorError::MalformedDocument(_))));
    assert_eq!(doc.state(), DocState::NoDocument);
    Ok(())
}

#[test]
fn missing_file_is_an_io_error_and_changes_nothing() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut doc = DocumentController::new(EditorConfig::default());
    doc.new_document();
    doc.create_entry()?;

    let err = doc.open(&dir.path().join("nope.json")).err().ok_or("expected an error")?;
    assert!(matches!(err, EditorError::Io { .. }), "{err}");
    assert_eq!(doc.state(), DocState::Dirty);
    assert_eq!(doc.store().len(), 1);
    assert!(backups_in(dir.path())?.is_empty());
    Ok(())
}

#[cfg(unix)]
#[test]
fn unwritable_directory_does_not_block_opening() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir()?;
    let locked = dir.path().join("locked");
    std::fs::create_dir(&locked)?;
    let path = locked.join("lore.json");
    std::fs::write(&path, r#"{"entries":{"0":{"comment":"A"}}}"#)?;
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o555))?;

    // Root ignores directory permissions; nothing to check then.
    let canary = locked.join("canary");
    if std::fs::write(&canary, b"").is_ok() {
        std::fs::remove_file(&canary)?;
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let mut doc = DocumentController::new(EditorConfig::default());
    let report = doc.open(&path);
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755))?;

    let report = report?;
    assert!(report.backup.is_err());
    assert_eq!(report.entries, 1);
    assert_eq!(doc.state(), DocState::Clean);
    Ok(())
}
