use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use wiedit::statics;
use wiedit::{
    Dialogs, DocumentController, EditorConfig, EntryId, FieldValue, JsonValue, OutputStyle, Script,
    ScriptConverter, UnsavedChoice,
};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

struct Identity;

impl ScriptConverter for Identity {
    fn convert(&self, text: &str, _target: Script) -> String {
        text.to_string()
    }
}

/// Never shows anything; saving requires a bound path.
struct NoDialogs;

impl Dialogs for NoDialogs {
    fn pick_open_path(&mut self) -> Option<PathBuf> {
        None
    }
    fn pick_save_path(&mut self, _current: Option<&Path>) -> Option<PathBuf> {
        None
    }
    fn ask_unsaved(&mut self) -> UnsavedChoice {
        UnsavedChoice::Cancel
    }
}

fn controller(output: OutputStyle) -> DocumentController {
    let config = EditorConfig {
        output,
        ..EditorConfig::default()
    };
    DocumentController::with_converter(config, Box::new(Identity))
}

#[test]
fn save_then_open_preserves_order_and_every_field_kind() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("lore.json");

    let mut doc = controller(OutputStyle::Compact);
    doc.new_document();

    doc.create_entry()?;
    doc.edit(statics::WI_COMMENT, FieldValue::Text("Dragon".into()))?;
    doc.edit(statics::WI_KEY, FieldValue::Text("dragon, wyrm, ,drake".into()))?;
    doc.edit(statics::WI_CONTENT, FieldValue::Text("Breathes fire.\n龙".into()))?;
    doc.edit(statics::WI_DISABLE, FieldValue::Flag(false))?;
    doc.edit(statics::WI_ORDER, FieldValue::Number(250))?;
    doc.edit(statics::WI_POSITION, FieldValue::Choice(6))?;
    doc.edit(statics::WI_DEPTH, FieldValue::Number(2))?;
    doc.edit(statics::WI_ROLE, FieldValue::Choice(1))?;
    doc.edit(statics::WI_SCAN_DEPTH, FieldValue::Text("12".into()))?;
    doc.edit(statics::WI_CASE_SENSITIVE, FieldValue::Choice(2))?;
    doc.edit(statics::WI_STRATEGY, FieldValue::Choice(1))?;
    doc.edit(
        statics::WI_TRIGGERS,
        FieldValue::Selection(vec!["swipe".into(), "normal".into()]),
    )?;

    doc.create_entry()?;
    doc.edit(statics::WI_COMMENT, FieldValue::Text("Castle".into()))?;
    doc.edit(statics::WI_SCAN_DEPTH, FieldValue::Text("abc".into()))?;
    doc.edit(statics::WI_STRATEGY, FieldValue::Choice(2))?;

    doc.create_entry()?;
    doc.reorder(2, 0)?;
    doc.save_as(&path)?;

    let mut reopened = controller(OutputStyle::Compact);
    reopened.open(&path)?;

    let ids: Vec<_> = reopened.projection().into_iter().map(|r| r.id).collect();
    assert_eq!(
        ids,
        vec![EntryId::new("2"), EntryId::new("0"), EntryId::new("1")]
    );
    assert_eq!(reopened.render()?, doc.render()?);

    let dragon = reopened.entry(&EntryId::new("0")).ok_or("missing entry")?;
    assert_eq!(dragon.primary_keys(), vec!["dragon", "wyrm", "drake"]);
    assert_eq!(dragon.get(statics::WI_DISABLE), Some(&JsonValue::Bool(true)));
    assert_eq!(dragon.get(statics::WI_SCAN_DEPTH), Some(&JsonValue::int(12)));
    assert_eq!(dragon.get(statics::WI_CASE_SENSITIVE), Some(&JsonValue::Bool(false)));
    assert_eq!(dragon.get(statics::WI_CONSTANT), Some(&JsonValue::Bool(true)));
    assert_eq!(dragon.get(statics::WI_SELECTIVE), Some(&JsonValue::Bool(false)));
    assert_eq!(
        dragon.list_attr(statics::WI_TRIGGERS),
        vec!["normal", "swipe"]
    );

    let castle = reopened.entry(&EntryId::new("1")).ok_or("missing entry")?;
    assert_eq!(castle.get(statics::WI_SCAN_DEPTH), Some(&JsonValue::Null));
    assert_eq!(castle.get(statics::WI_VECTORIZED), Some(&JsonValue::Bool(true)));

    // The form sees the same values after the round trip.
    reopened.select(Some(&EntryId::new("0")))?;
    let form = reopened.form().ok_or("no form")?;
    assert_eq!(form.get(statics::WI_POSITION), Some(&FieldValue::Choice(6)));
    assert_eq!(form.get(statics::WI_DISABLE), Some(&FieldValue::Flag(false)));
    assert_eq!(form.text(statics::WI_KEY), "dragon, wyrm, drake");
    assert!(reopened.visible_fields().contains(statics::WI_DEPTH));
    assert!(!reopened.visible_fields().contains(statics::WI_OUTLET_NAME));
    Ok(())
}

#[test]
fn deleting_the_only_entry_saves_an_empty_entries_object() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("empty.json");

    let mut doc = controller(OutputStyle::Compact);
    doc.new_document();
    let id = doc.create_entry()?;
    doc.delete_entry(&id)?;
    doc.save_as(&path)?;

    assert_eq!(std::fs::read_to_string(&path)?, r#"{"entries":{}}"#);
    Ok(())
}

#[test]
fn unedited_document_is_written_back_unchanged() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("book.json");
    let input = r#"{"name":"Lore","entries":{"7":{"uid":7,"key":["a"],"comment":"A","extensions":{"depth":4,"weight":0.5}},"x":{"comment":"odd key"}},"extra":[1,2.5,null]}"#;
    std::fs::write(&path, input)?;

    let mut doc = controller(OutputStyle::Compact);
    let report = doc.open(&path)?;
    assert_eq!(report.entries, 2);

    // Selecting without editing must not touch stored data.
    doc.select(Some(&EntryId::new("x")))?;
    doc.select(Some(&EntryId::new("7")))?;
    assert!(doc.save(&mut NoDialogs)?);

    assert_eq!(std::fs::read_to_string(&path)?, input);
    Ok(())
}

#[test]
fn pretty_output_uses_two_space_indent() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("pretty.json");
    std::fs::write(&path, r#"{"entries":{"0":{"comment":"A","key":[]}}}"#)?;

    let mut doc = controller(OutputStyle::Pretty);
    doc.open(&path)?;
    doc.save(&mut NoDialogs)?;

    let expected = "{\n  \"entries\": {\n    \"0\": {\n      \"comment\": \"A\",\n      \"key\": []\n    }\n  }\n}\n";
    assert_eq!(std::fs::read_to_string(&path)?, expected);
    Ok(())
}

#[test]
fn new_entries_get_the_next_identifier_after_open() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("gaps.json");
    std::fs::write(
        &path,
        r#"{"entries":{"3":{"comment":"a"},"10":{"comment":"b"},"note":{"comment":"c"}}}"#,
    )?;

    let mut doc = controller(OutputStyle::Compact);
    doc.open(&path)?;
    let id = doc.create_entry()?;
    assert_eq!(id, EntryId::new("11"));

    let entry = doc.entry(&id).ok_or("missing entry")?;
    assert_eq!(entry.title(), "New entry");
    assert_eq!(entry.get(statics::WI_UID), Some(&JsonValue::int(11)));
    assert_eq!(entry.get(statics::WI_ADD_MEMO), Some(&JsonValue::Bool(true)));
    Ok(())
}

#[test]
fn create_never_overwrites_the_largest_numeric_key() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("full.json");
    std::fs::write(
        &path,
        r#"{"entries":{"18446744073709551615":{"comment":"precious"}}}"#,
    )?;

    let mut doc = controller(OutputStyle::Compact);
    doc.open(&path)?;
    assert!(matches!(
        doc.create_entry(),
        Err(wiedit::EditorError::InvalidOperation(_))
    ));

    assert_eq!(doc.store().len(), 1);
    let kept = doc
        .entry(&EntryId::new("18446744073709551615"))
        .ok_or("missing entry")?;
    assert_eq!(kept.title(), "precious");
    assert!(!doc.is_dirty());
    Ok(())
}
