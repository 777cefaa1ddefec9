use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use wiedit::statics;
use wiedit::{
    Dialogs, DocState, DocumentController, EditorConfig, EntryId, FieldValue, UnsavedChoice,
};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Answers every prompt the same way and records what was asked.
struct Scripted {
    answer: UnsavedChoice,
    open_path: Option<PathBuf>,
    save_path: Option<PathBuf>,
    prompts: usize,
    save_pickers: usize,
}

impl Scripted {
    fn new(answer: UnsavedChoice) -> Self {
        Self {
            answer,
            open_path: None,
            save_path: None,
            prompts: 0,
            save_pickers: 0,
        }
    }
}

impl Dialogs for Scripted {
    fn pick_open_path(&mut self) -> Option<PathBuf> {
        self.open_path.clone()
    }
    fn pick_save_path(&mut self, _current: Option<&Path>) -> Option<PathBuf> {
        self.save_pickers += 1;
        self.save_path.clone()
    }
    fn ask_unsaved(&mut self) -> UnsavedChoice {
        self.prompts += 1;
        self.answer
    }
}

fn dirty_document(dir: &Path) -> Result<(DocumentController, PathBuf)> {
    let path = dir.join("lore.json");
    std::fs::write(&path, r#"{"entries":{"0":{"comment":"A"}}}"#)?;
    let mut doc = DocumentController::new(EditorConfig::default());
    doc.open(&path)?;
    doc.select(Some(&EntryId::new("0")))?;
    doc.edit(statics::WI_COMMENT, FieldValue::Text("B".into()))?;
    assert_eq!(doc.state(), DocState::Dirty);
    Ok((doc, path))
}

#[test]
fn save_and_close_writes_to_the_bound_path() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (mut doc, path) = dirty_document(dir.path())?;

    let mut dialogs = Scripted::new(UnsavedChoice::Save);
    assert!(doc.close(&mut dialogs)?);
    assert_eq!(dialogs.prompts, 1);
    assert_eq!(dialogs.save_pickers, 0);
    assert_eq!(doc.state(), DocState::NoDocument);
    assert_eq!(std::fs::read_to_string(&path)?, r#"{"entries":{"0":{"comment":"B"}}}"#);
    Ok(())
}

#[test]
fn save_as_and_close_rebinds_the_path() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (mut doc, path) = dirty_document(dir.path())?;
    let copy = dir.path().join("copy.json");

    let mut dialogs = Scripted::new(UnsavedChoice::SaveAs);
    dialogs.save_path = Some(copy.clone());
    assert!(doc.close(&mut dialogs)?);

    assert_eq!(std::fs::read_to_string(&copy)?, r#"{"entries":{"0":{"comment":"B"}}}"#);
    assert_eq!(std::fs::read_to_string(&path)?, r#"{"entries":{"0":{"comment":"A"}}}"#);
    Ok(())
}

#[test]
fn cancelled_save_as_keeps_the_document_open() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (mut doc, _) = dirty_document(dir.path())?;

    let mut dialogs = Scripted::new(UnsavedChoice::SaveAs);
    assert!(!doc.close(&mut dialogs)?);
    assert_eq!(dialogs.save_pickers, 1);
    assert_eq!(doc.state(), DocState::Dirty);
    Ok(())
}

#[test]
fn open_over_dirty_document_respects_the_answer() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (mut doc, path) = dirty_document(dir.path())?;
    let other = dir.path().join("other.json");
    std::fs::write(&other, r#"{"entries":{"5":{"comment":"Other"}}}"#)?;

    let mut cancel = Scripted::new(UnsavedChoice::Cancel);
    cancel.open_path = Some(other.clone());
    assert!(doc.open_with(&mut cancel)?.is_none());
    assert_eq!(doc.path(), Some(path.as_path()));
    assert_eq!(doc.state(), DocState::Dirty);

    let mut discard = Scripted::new(UnsavedChoice::Discard);
    discard.open_path = Some(other.clone());
    let report = doc.open_with(&mut discard)?.ok_or("open was cancelled")?;
    assert_eq!(report.entries, 1);
    assert_eq!(doc.path(), Some(other.as_path()));
    assert_eq!(doc.state(), DocState::Clean);

    // Discarded edits never reached the file.
    assert_eq!(std::fs::read_to_string(&path)?, r#"{"entries":{"0":{"comment":"A"}}}"#);
    Ok(())
}

#[test]
fn new_on_clean_document_does_not_prompt() -> Result<()> {
    let mut doc = DocumentController::new(EditorConfig::default());
    let mut dialogs = Scripted::new(UnsavedChoice::Cancel);
    assert!(doc.new_with(&mut dialogs)?);
    assert!(doc.new_with(&mut dialogs)?);
    assert_eq!(dialogs.prompts, 0);
    assert_eq!(doc.state(), DocState::Clean);
    Ok(())
}

#[test]
fn unbound_new_document_saves_through_the_picker() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let target = dir.path().join("fresh.json");

    let mut doc = DocumentController::new(EditorConfig::default());
    doc.new_document();
    doc.create_entry()?;

    let mut dialogs = Scripted::new(UnsavedChoice::Cancel);
    dialogs.save_path = Some(target.clone());
    assert!(doc.save(&mut dialogs)?);
    assert_eq!(doc.path(), Some(target.as_path()));
    assert_eq!(doc.title(), "fresh.json");

    let saved = std::fs::read_to_string(&target)?;
    assert!(saved.starts_with(r#"{"entries":{"0":{"#), "{saved}");
    Ok(())
}
