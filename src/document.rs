use crate::backup;
use crate::config::{EditorConfig, FlushPolicy};
use crate::convert::{FieldSelection, Script, ScriptConverter, ZhConverter};
use crate::entry::{Entry, EntryId};
use crate::error::{EditorError, Result};
use crate::find;
use crate::form::{self, FormBinding, FormState};
use crate::projection::{self, ListRow};
use crate::schema::FieldValue;
use crate::statics;
use crate::store::EntryStore;
use crate::value::JsonValue;
use indexmap::IndexMap;
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocState {
    NoDocument,
    Clean,
    Dirty,
}

/// Answer to the unsaved-changes prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsavedChoice {
    Save,
    SaveAs,
    Discard,
    Cancel,
}

/// File pickers and the unsaved-changes prompt. `None` means cancelled.
pub trait Dialogs {
    fn pick_open_path(&mut self) -> Option<PathBuf>;
    fn pick_save_path(&mut self, current: Option<&Path>) -> Option<PathBuf>;
    fn ask_unsaved(&mut self) -> UnsavedChoice;
}

/// Outcome of a successful open. A failed backup does not fail the open.
#[derive(Debug)]
pub struct OpenReport {
    pub path: PathBuf,
    pub entries: usize,
    pub backup: Result<PathBuf>,
}

/// One open lore book: its entries, the other top-level attributes, the bound
/// file, the search term and the entry currently in the form.
pub struct DocumentController {
    state: DocState,
    store: EntryStore,
    // Top-level attributes in file order. The `entries` slot is refreshed on save.
    root: IndexMap<String, JsonValue>,
    path: Option<PathBuf>,
    search: String,
    binding: FormBinding,
    config: EditorConfig,
    converter: Box<dyn ScriptConverter>,
}

impl DocumentController {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_converter(config, Box::new(ZhConverter))
    }

    pub fn with_converter(config: EditorConfig, converter: Box<dyn ScriptConverter>) -> Self {
        Self {
            state: DocState::NoDocument,
            store: EntryStore::new(),
            root: IndexMap::new(),
            path: None,
            search: String::new(),
            binding: FormBinding::default(),
            config,
            converter,
        }
    }

    pub fn state(&self) -> DocState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == DocState::Dirty
    }

    pub fn has_document(&self) -> bool {
        self.state != DocState::NoDocument
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn entry(&self, id: &EntryId) -> Option<&Entry> {
        self.store.get(id)
    }

    pub fn selected(&self) -> Option<&EntryId> {
        self.binding.bound()
    }

    pub fn form(&self) -> Option<&FormState> {
        self.binding.state()
    }

    pub fn visible_fields(&self) -> BTreeSet<&'static str> {
        self.binding.visible_fields()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// File name (or a placeholder) with a trailing ` *` while there are unsaved changes.
    pub fn title(&self) -> String {
        if !self.has_document() {
            return statics::EN_APP_TITLE.to_string();
        }
        let name = self
            .path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| statics::EN_PLACEHOLDER_UNSAVED.to_string());
        if self.is_dirty() {
            format!("{name}{}", statics::EN_TITLE_DIRTY_MARK)
        } else {
            name
        }
    }

    fn require_document(&self) -> Result<()> {
        if self.has_document() {
            Ok(())
        } else {
            Err(EditorError::InvalidOperation(statics::EN_ERR_NO_DOCUMENT.into()))
        }
    }

    fn require_selection(&self) -> Result<EntryId> {
        self.require_document()?;
        self.binding
            .bound()
            .cloned()
            .ok_or_else(|| EditorError::InvalidOperation(statics::EN_SELECT_ENTRY.into()))
    }

    fn mark_dirty(&mut self) {
        if self.state == DocState::Clean {
            debug!("document now has unsaved changes");
            self.state = DocState::Dirty;
        }
    }

    /// Write the form's pending edits into the bound entry.
    fn flush_form(&mut self) {
        let (Some(id), Some(state)) = (self.binding.bound(), self.binding.state()) else {
            return;
        };
        if let Some(entry) = self.store.get_mut(id) {
            let written = form::flush(state, entry);
            if !written.is_empty() {
                debug!("flushed {written:?} into entry {id}");
            }
        }
    }

    fn reset(&mut self, state: DocState) {
        self.store = EntryStore::new();
        self.root.clear();
        self.path = None;
        self.binding.unbind();
        self.search.clear();
        self.state = state;
    }

    // ----- document lifecycle -----

    /// Start an empty, unbound document.
    pub fn new_document(&mut self) {
        self.reset(DocState::Clean);
        info!("new document");
    }

    /// Read `path`, back it up byte for byte, then replace the current document.
    /// On any read or parse failure the current document is left as it was.
    pub fn open(&mut self, path: &Path) -> Result<OpenReport> {
        let bytes = fs::read(path).map_err(|e| EditorError::io(path, e))?;

        let backup = backup::write_backup(
            path,
            &bytes,
            self.config.backup,
            chrono::Local::now().naive_local(),
        );
        match &backup {
            Ok(p) => info!("backup written to {}", p.display()),
            Err(e) => warn!("backup of {} failed: {e}", path.display()),
        }

        let text = std::str::from_utf8(&bytes)
            .map_err(|e| EditorError::MalformedDocument(format!("not UTF-8: {e}")))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let root = JsonValue::parse(text).map_err(EditorError::MalformedDocument)?;
        let (root, store) = split_document(root)?;

        self.binding.unbind();
        self.store = store;
        self.root = root;
        self.path = Some(path.to_path_buf());
        self.search.clear();
        self.state = DocState::Clean;
        info!("opened {} ({} entries)", path.display(), self.store.len());

        Ok(OpenReport {
            path: path.to_path_buf(),
            entries: self.store.len(),
            backup,
        })
    }

    /// Serialized document as it would be written by `save`.
    pub fn render(&self) -> Result<String> {
        self.require_document()?;
        let mut root = self.root.clone();
        root.insert(statics::WI_ENTRIES.to_string(), self.store.to_json());
        Ok(JsonValue::Object(root).to_json(self.config.output))
    }

    fn write_to(&mut self, path: &Path) -> Result<()> {
        self.flush_form();
        let text = self.render()?;
        fs::write(path, text).map_err(|e| EditorError::io(path, e))?;
        self.state = DocState::Clean;
        info!("saved {} ({} entries)", path.display(), self.store.len());
        Ok(())
    }

    /// Save to the bound path, or ask for one. `Ok(false)` when the picker was cancelled.
    pub fn save(&mut self, dialogs: &mut dyn Dialogs) -> Result<bool> {
        if !self.has_document() {
            return Err(EditorError::InvalidOperation(statics::EN_ERR_NOTHING_TO_SAVE.into()));
        }
        match self.path.clone() {
            Some(path) => self.write_to(&path).map(|()| true),
            None => self.save_as_with(dialogs),
        }
    }

    /// Bind `path` and save there.
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        if !self.has_document() {
            return Err(EditorError::InvalidOperation(statics::EN_ERR_NOTHING_TO_SAVE.into()));
        }
        self.path = Some(path.to_path_buf());
        self.write_to(path)
    }

    pub fn save_as_with(&mut self, dialogs: &mut dyn Dialogs) -> Result<bool> {
        if !self.has_document() {
            return Err(EditorError::InvalidOperation(statics::EN_ERR_NOTHING_TO_SAVE.into()));
        }
        let Some(path) = dialogs.pick_save_path(self.path.as_deref()) else {
            return Ok(false);
        };
        self.save_as(&path).map(|()| true)
    }

    /// Whether the current document may be thrown away. Asks when dirty; a
    /// failed or cancelled save answers `false` (or the error).
    pub fn confirm_discard(&mut self, dialogs: &mut dyn Dialogs) -> Result<bool> {
        if !self.is_dirty() {
            return Ok(true);
        }
        match dialogs.ask_unsaved() {
            UnsavedChoice::Save => self.save(dialogs),
            UnsavedChoice::SaveAs => self.save_as_with(dialogs),
            UnsavedChoice::Discard => Ok(true),
            UnsavedChoice::Cancel => Ok(false),
        }
    }

    /// Close the document. Returns `false` if the user backed out.
    pub fn close(&mut self, dialogs: &mut dyn Dialogs) -> Result<bool> {
        if !self.confirm_discard(dialogs)? {
            return Ok(false);
        }
        if self.has_document() {
            info!("closed {}", self.title());
        }
        self.reset(DocState::NoDocument);
        Ok(true)
    }

    /// `new_document` behind the unsaved-changes guard.
    pub fn new_with(&mut self, dialogs: &mut dyn Dialogs) -> Result<bool> {
        if !self.confirm_discard(dialogs)? {
            return Ok(false);
        }
        self.new_document();
        Ok(true)
    }

    /// Guarded open through the file picker. `Ok(None)` when cancelled.
    pub fn open_with(&mut self, dialogs: &mut dyn Dialogs) -> Result<Option<OpenReport>> {
        if !self.confirm_discard(dialogs)? {
            return Ok(None);
        }
        let Some(path) = dialogs.pick_open_path() else {
            return Ok(None);
        };
        self.open(&path).map(Some)
    }

    // ----- selection and form -----

    /// Flush the form into its entry, then load `id` (or clear the form).
    pub fn select(&mut self, id: Option<&EntryId>) -> Result<()> {
        self.require_document()?;
        self.flush_form();
        match id {
            Some(id) => {
                let entry = self
                    .store
                    .get(id)
                    .ok_or_else(|| EditorError::NotFound(format!("entry {id}")))?;
                self.binding.bind(id.clone(), entry);
                debug!("selected entry {id}");
            }
            None => self.binding.unbind(),
        }
        Ok(())
    }

    /// Change one form field. Returns whether the value changed.
    pub fn edit(&mut self, key: &str, value: FieldValue) -> Result<bool> {
        self.require_selection()?;
        let Some(state) = self.binding.state_mut() else {
            return Err(EditorError::InvalidOperation(statics::EN_SELECT_ENTRY.into()));
        };
        let changed = state.set(key, value)?;
        if changed {
            self.mark_dirty();
            if self.config.flush == FlushPolicy::OnChange {
                self.flush_form();
            }
        }
        Ok(changed)
    }

    // ----- entry operations -----

    /// Append a new entry with defaults and select it.
    pub fn create_entry(&mut self) -> Result<EntryId> {
        self.require_document()?;
        self.flush_form();
        let id = self.store.create()?;
        if let Some(entry) = self.store.get_mut(&id) {
            entry.set(
                statics::WI_COMMENT,
                JsonValue::str(self.config.new_entry_title.as_str()),
            );
        }
        self.mark_dirty();
        info!("added entry {id}");
        self.select(Some(&id))?;
        Ok(id)
    }

    pub fn delete_entry(&mut self, id: &EntryId) -> Result<()> {
        self.require_document()?;
        self.flush_form();
        self.store.delete(id)?;
        if self.binding.bound() == Some(id) {
            self.binding.unbind();
        }
        self.mark_dirty();
        info!("deleted entry {id}");
        Ok(())
    }

    pub fn delete_selected(&mut self) -> Result<()> {
        let id = self.require_selection()?;
        self.delete_entry(&id)
    }

    /// Move the entry at store position `from` to `to`. Not allowed while a
    /// search term narrows the list.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        self.require_document()?;
        if !self.search.is_empty() {
            warn!("reorder rejected while filtering on {:?}", self.search);
            return Err(EditorError::InvalidOperation(statics::EN_ERR_REORDER_FILTERED.into()));
        }
        self.flush_form();
        self.store.reorder(from, to)?;
        if from != to {
            self.mark_dirty();
            debug!("moved entry from {from} to {to}");
        }
        Ok(())
    }

    /// Move the selected entry up (negative) or down. `Ok(false)` at either end.
    pub fn move_selected_by(&mut self, delta: isize) -> Result<bool> {
        let id = self.require_selection()?;
        let from = self
            .store
            .position_of(&id)
            .ok_or_else(|| EditorError::NotFound(format!("entry {id}")))?;
        let Some(to) = from.checked_add_signed(delta).filter(|&to| to < self.store.len()) else {
            return Ok(false);
        };
        self.reorder(from, to)?;
        Ok(from != to)
    }

    /// Move the selected entry to a 1-based position as typed by the user.
    pub fn move_selected_to(&mut self, position: usize) -> Result<()> {
        let id = self.require_selection()?;
        let len = self.store.len();
        if position == 0 || position > len {
            return Err(EditorError::InvalidOperation(format!(
                "position must be between 1 and {len}"
            )));
        }
        let from = self
            .store
            .position_of(&id)
            .ok_or_else(|| EditorError::NotFound(format!("entry {id}")))?;
        self.reorder(from, position - 1)
    }

    /// Copy the selected entry with script conversion, insert it after the
    /// source and select the copy.
    pub fn duplicate_selected(
        &mut self,
        selection: FieldSelection,
        target: Script,
    ) -> Result<EntryId> {
        let id = self.require_selection()?;
        self.flush_form();
        let new_id = self.store.duplicate_after(
            &id,
            selection,
            target,
            self.config.suffix_for(target),
            self.converter.as_ref(),
        )?;
        self.mark_dirty();
        debug!("duplicated entry {id} as {new_id} ({target:?})");
        self.select(Some(&new_id))?;
        Ok(new_id)
    }

    // ----- content helpers -----

    /// Byte range of the next match in the form's content, wrapping around.
    pub fn find_in_content(&self, needle: &str, from: usize) -> Option<Range<usize>> {
        let content = self.form()?.text(statics::WI_CONTENT);
        find::find_next(content, needle, from)
    }

    /// Replace the next match at or after `from` in the form's content and
    /// look for the one after it. `None` when nothing was replaced.
    pub fn replace_next_in_content(
        &mut self,
        needle: &str,
        replacement: &str,
        from: usize,
    ) -> Result<Option<Replaced>> {
        self.require_selection()?;
        let content = self
            .form()
            .map(|f| f.text(statics::WI_CONTENT))
            .unwrap_or_default();
        let Some((text, at)) = find::replace_next(content, needle, replacement, from) else {
            return Ok(None);
        };
        self.edit(statics::WI_CONTENT, FieldValue::Text(text))?;
        let next = self.find_in_content(needle, at.end);
        Ok(Some(Replaced { at, next }))
    }

    /// Replace every occurrence in the form's content. Returns the count.
    pub fn replace_all_in_content(&mut self, needle: &str, replacement: &str) -> Result<usize> {
        self.require_selection()?;
        let content = self
            .form()
            .map(|f| f.text(statics::WI_CONTENT))
            .unwrap_or_default();
        let (text, count) = find::replace_all(content, needle, replacement);
        if count > 0 {
            self.edit(statics::WI_CONTENT, FieldValue::Text(text))?;
        }
        Ok(count)
    }

    /// Convert the form's content to `target` in place.
    pub fn convert_current_content(&mut self, target: Script) -> Result<bool> {
        self.require_selection()?;
        let content = self
            .form()
            .map(|f| f.text(statics::WI_CONTENT))
            .unwrap_or_default();
        let converted = self.converter.convert(content, target);
        self.edit(statics::WI_CONTENT, FieldValue::Text(converted))
    }

    // ----- list -----

    pub fn set_search(&mut self, term: &str) {
        if self.search != term {
            self.search = term.to_string();
            debug!("search term now {term:?}");
        }
    }

    pub fn projection(&self) -> Vec<ListRow> {
        projection::project(&self.store, &self.search)
    }
}

/// Result of a single replacement in the content field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replaced {
    /// Span of the inserted text.
    pub at: Range<usize>,
    /// Next match after it, wrapping around.
    pub next: Option<Range<usize>>,
}

/// Split a parsed document into its top-level attributes and the entry store.
fn split_document(root: JsonValue) -> Result<(IndexMap<String, JsonValue>, EntryStore)> {
    let JsonValue::Object(mut root) = root else {
        return Err(EditorError::MalformedDocument(format!(
            "top level must be an object, found {}",
            root.type_name()
        )));
    };
    let store = match root.get_mut(statics::WI_ENTRIES) {
        Some(entries) => {
            let store = EntryStore::from_json(entries)?;
            *entries = JsonValue::Null;
            store
        }
        None => EntryStore::new(),
    };
    Ok((root, store))
}
