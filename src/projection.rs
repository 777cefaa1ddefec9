use crate::entry::{Entry, EntryId};
use crate::statics;
use crate::store::EntryStore;

/// One visible row of the entry list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    /// Position among the visible rows, from 0.
    pub visual_index: usize,
    /// Position in the store (document order).
    pub store_index: usize,
    pub id: EntryId,
    pub label: String,
}

/// Title, else the joined primary keys, else an "untitled" placeholder.
pub fn display_label(id: &EntryId, entry: &Entry) -> String {
    let title = entry.title();
    if !title.is_empty() {
        return title.to_string();
    }
    let keys = entry.primary_keys();
    if !keys.is_empty() {
        return keys.join(", ");
    }
    format!("{} {id}", statics::EN_UNTITLED_ENTRY)
}

/// Case-insensitive substring match over title, keys, secondary keys and content.
pub fn matches(entry: &Entry, term_lower: &str) -> bool {
    if term_lower.is_empty() {
        return true;
    }
    entry.title().to_lowercase().contains(term_lower)
        || entry.primary_keys().join(", ").to_lowercase().contains(term_lower)
        || entry.secondary_keys().join(", ").to_lowercase().contains(term_lower)
        || entry.content().to_lowercase().contains(term_lower)
}

/// The visible, ordered rows for a search term. Store order is never changed;
/// only the visual index is renumbered.
pub fn project(store: &EntryStore, search_term: &str) -> Vec<ListRow> {
    let term = search_term.to_lowercase();
    store
        .iter()
        .enumerate()
        .filter(|(_, (_, entry))| matches(entry, &term))
        .enumerate()
        .map(|(visual_index, (store_index, (id, entry)))| ListRow {
            visual_index,
            store_index,
            id: id.clone(),
            label: display_label(id, entry),
        })
        .collect()
}
