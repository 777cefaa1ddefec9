use crate::convert::{FieldSelection, Script, ScriptConverter};
use crate::entry::{Entry, EntryId};
use crate::error::{EditorError, Result};
use crate::form;
use crate::statics;
use crate::value::JsonValue;
use indexmap::IndexMap;

/// The ordered collection of entries, keyed by stable identifier.
/// Map order is document order and display order.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: IndexMap<EntryId, Entry>,
    // Highest numeric identifier seen this session. Never lowered by deletes,
    // so a deleted identifier is never handed out again.
    high_water: Option<u64>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from the document's `entries` object.
    pub fn from_json(raw: &JsonValue) -> Result<Self> {
        let mut store = Self::new();
        store.load_all(raw)?;
        Ok(store)
    }

    /// Replace all contents with the given mapping, keeping its key order.
    /// On error the store is left untouched.
    pub fn load_all(&mut self, raw: &JsonValue) -> Result<()> {
        let Some(map) = raw.as_object() else {
            return Err(EditorError::MalformedDocument(format!(
                "`{}` must be an object, found {}",
                statics::WI_ENTRIES,
                raw.type_name()
            )));
        };

        let mut entries = IndexMap::with_capacity(map.len());
        for (key, value) in map {
            let Some(attrs) = value.as_object() else {
                return Err(EditorError::MalformedDocument(format!(
                    "entry {key:?} must be an object, found {}",
                    value.type_name()
                )));
            };
            entries.insert(EntryId::new(key.as_str()), Entry::from_attrs(attrs.clone()));
        }

        self.high_water = entries.keys().filter_map(EntryId::numeric).max();
        self.entries = entries;
        Ok(())
    }

    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.entries
                .iter()
                .map(|(id, e)| (id.as_str().to_string(), JsonValue::Object(e.attrs().clone())))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntryId, &Entry)> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &EntryId> {
        self.entries.keys()
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &EntryId) -> Option<&mut Entry> {
        self.entries.get_mut(id)
    }

    pub fn position_of(&self, id: &EntryId) -> Option<usize> {
        self.entries.get_index_of(id)
    }

    pub fn id_at(&self, position: usize) -> Option<&EntryId> {
        self.entries.get_index(position).map(|(id, _)| id)
    }

    /// The identifier the next `create`/`duplicate_after` will use, or `None`
    /// once the numeric range is used up.
    pub fn next_id(&self) -> Option<EntryId> {
        self.free_after(self.high_water).map(|(id, _)| id)
    }

    // First digit-string identifier above `floor` not already taken.
    fn free_after(&self, floor: Option<u64>) -> Option<(EntryId, u64)> {
        let mut next = match floor {
            None => 0,
            Some(h) => h.checked_add(1)?,
        };
        loop {
            let id = EntryId::new(next.to_string());
            if !self.entries.contains_key(&id) {
                return Some((id, next));
            }
            next = next.checked_add(1)?;
        }
    }

    fn allocate(&mut self) -> Result<(EntryId, u64)> {
        let (id, next) = self.free_after(self.high_water).ok_or_else(|| {
            EditorError::InvalidOperation(statics::EN_ERR_IDS_EXHAUSTED.into())
        })?;
        self.high_water = Some(next);
        Ok((id, next))
    }

    /// Append a new entry holding schema defaults.
    pub fn create(&mut self) -> Result<EntryId> {
        let (id, uid) = self.allocate()?;
        let mut entry = Entry::new();
        set_uid(&mut entry, uid);
        form::apply_defaults(&mut entry);
        entry.set(statics::WI_ADD_MEMO, JsonValue::Bool(true));
        entry.set(statics::WI_USE_PROBABILITY, JsonValue::Bool(true));
        self.entries.insert(id.clone(), entry);
        Ok(id)
    }

    pub fn delete(&mut self, id: &EntryId) -> Result<Entry> {
        self.entries
            .shift_remove(id)
            .ok_or_else(|| EditorError::NotFound(format!("entry {id}")))
    }

    /// Move the entry at `from` to `to`, shifting the ones in between by one.
    /// Identifiers are untouched.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.entries.len();
        if from >= len || to >= len {
            return Err(EditorError::NotFound(format!(
                "position {} of {len}",
                from.max(to)
            )));
        }
        self.entries.move_index(from, to);
        Ok(())
    }

    /// Deep-copy an entry, convert the selected field groups to `target`,
    /// tag the title with `suffix` and insert the copy right after the source.
    pub fn duplicate_after(
        &mut self,
        id: &EntryId,
        selection: FieldSelection,
        target: Script,
        suffix: &str,
        converter: &dyn ScriptConverter,
    ) -> Result<EntryId> {
        let Some((position, _, source)) = self.entries.get_full(id) else {
            return Err(EditorError::NotFound(format!("entry {id}")));
        };
        let mut copy = source.clone();

        let title = if selection.title {
            converter.convert(copy.title(), target)
        } else {
            copy.title().to_string()
        };
        copy.set(statics::WI_COMMENT, JsonValue::String(title + suffix));

        if selection.keys {
            for key in [statics::WI_KEY, statics::WI_KEY_SECONDARY] {
                if let Some(JsonValue::Array(items)) = copy.get(key) {
                    let converted = items
                        .iter()
                        .map(|item| match item {
                            JsonValue::String(s) => JsonValue::String(converter.convert(s, target)),
                            other => other.clone(),
                        })
                        .collect();
                    copy.set(key, JsonValue::Array(converted));
                }
            }
        }

        if selection.content {
            let content = converter.convert(copy.content(), target);
            copy.set(statics::WI_CONTENT, JsonValue::String(content));
        }

        let (new_id, uid) = self.allocate()?;
        set_uid(&mut copy, uid);
        self.entries.shift_insert(position + 1, new_id.clone(), copy);
        Ok(new_id)
    }
}

// `uid` mirrors the identifier. Identifiers past i64 range get none rather
// than a wrapped or copied one.
fn set_uid(entry: &mut Entry, uid: u64) {
    match i64::try_from(uid) {
        Ok(uid) => entry.set(statics::WI_UID, JsonValue::int(uid)),
        Err(_) => {
            entry.remove(statics::WI_UID);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EntryStore;
    use crate::convert::{FieldSelection, Script, ScriptConverter};
    use crate::entry::EntryId;
    use crate::error::EditorError;
    use crate::statics;
    use crate::value::JsonValue;
    use pretty_assertions::assert_eq;

    struct Upper;

    impl ScriptConverter for Upper {
        fn convert(&self, text: &str, _target: Script) -> String {
            text.to_uppercase()
        }
    }

    fn store(json: &str) -> EntryStore {
        EntryStore::from_json(&JsonValue::parse(json).unwrap()).unwrap()
    }

    fn order(s: &EntryStore) -> Vec<(String, String)> {
        s.iter()
            .map(|(id, e)| (id.to_string(), e.title().to_string()))
            .collect()
    }

    #[test]
    fn load_keeps_source_order_including_non_numeric_keys() {
        let s = store(r#"{"5": {"comment": "A"}, "x": {"comment": "B"}, "2": {"comment": "C"}}"#);
        let ids: Vec<_> = s.ids().map(EntryId::to_string).collect();
        assert_eq!(ids, vec!["5", "x", "2"]);
        assert_eq!(s.next_id(), Some(EntryId::new("6")));
    }

    #[test]
    fn load_rejects_non_mappings_without_touching_contents() {
        let mut s = store(r#"{"0": {"comment": "keep"}}"#);
        let bad = JsonValue::parse(r#"{"0": {"comment": "x"}, "1": [1, 2]}"#).unwrap();
        assert!(matches!(s.load_all(&bad), Err(EditorError::MalformedDocument(_))));
        assert!(matches!(
            s.load_all(&JsonValue::Array(vec![])),
            Err(EditorError::MalformedDocument(_))
        ));
        assert_eq!(order(&s), vec![("0".to_string(), "keep".to_string())]);
    }

    #[test]
    fn create_allocates_max_plus_one_and_never_reuses() -> Result<(), EditorError> {
        let mut s = EntryStore::new();
        assert_eq!(s.create()?, EntryId::new("0"));
        assert_eq!(s.create()?, EntryId::new("1"));
        let last = s.create()?;
        assert_eq!(last, EntryId::new("2"));

        s.delete(&last)?;
        assert_eq!(s.create()?, EntryId::new("3"));

        let entry = s.get(&EntryId::new("3")).unwrap();
        assert_eq!(entry.get(statics::WI_UID), Some(&JsonValue::int(3)));
        assert_eq!(entry.get(statics::WI_ORDER), Some(&JsonValue::int(100)));
        assert_eq!(entry.get(statics::WI_SELECTIVE), Some(&JsonValue::Bool(true)));
        assert_eq!(entry.get(statics::WI_SCAN_DEPTH), Some(&JsonValue::Null));
        Ok(())
    }

    #[test]
    fn create_counts_zero_padded_keys() -> Result<(), EditorError> {
        let mut s = store(r#"{"08": {"comment": "a"}, "7": {"comment": "b"}, "9x": {}}"#);
        assert_eq!(s.create()?, EntryId::new("9"));
        assert_eq!(s.len(), 4);
        Ok(())
    }

    #[test]
    fn create_near_the_top_of_the_range_never_overwrites() -> Result<(), EditorError> {
        let mut s = store(r#"{"18446744073709551614": {"comment": "precious"}}"#);
        let id = s.create()?;
        assert_eq!(id, EntryId::new("18446744073709551615"));
        assert_eq!(s.len(), 2);
        // Too large for a signed uid: none is written.
        assert_eq!(s.get(&id).unwrap().get(statics::WI_UID), None);

        assert_eq!(s.next_id(), None);
        assert!(matches!(s.create(), Err(EditorError::InvalidOperation(_))));
        assert!(matches!(
            s.duplicate_after(&id, FieldSelection::ALL, Script::Simplified, "", &Upper),
            Err(EditorError::InvalidOperation(_))
        ));
        assert_eq!(s.len(), 2);
        assert_eq!(s.get(&EntryId::new("18446744073709551614")).unwrap().title(), "precious");
        Ok(())
    }

    #[test]
    fn duplicate_of_entry_with_huge_id_drops_the_copied_uid() -> Result<(), EditorError> {
        let mut s = store(r#"{"9223372036854775807": {"comment": "a", "uid": 9223372036854775807}}"#);
        let id = s.duplicate_after(
            &EntryId::new("9223372036854775807"),
            FieldSelection::ALL,
            Script::Simplified,
            "",
            &Upper,
        )?;
        assert_eq!(id, EntryId::new("9223372036854775808"));
        assert_eq!(s.get(&id).unwrap().get(statics::WI_UID), None);
        assert_eq!(s.len(), 2);
        Ok(())
    }

    #[test]
    fn delete_missing_is_not_found() {
        let mut s = EntryStore::new();
        assert!(matches!(s.delete(&EntryId::new("9")), Err(EditorError::NotFound(_))));
    }

    #[test]
    fn reorder_moves_entry_and_keeps_identifiers() -> Result<(), EditorError> {
        let mut s = store(r#"{"0": {"comment": "A"}, "1": {"comment": "B"}, "2": {"comment": "C"}}"#);
        s.reorder(2, 0)?;
        let expected: Vec<(String, String)> = [("2", "C"), ("0", "A"), ("1", "B")]
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();
        assert_eq!(order(&s), expected);

        s.reorder(0, 2)?;
        assert_eq!(s.id_at(2), Some(&EntryId::new("2")));
        assert!(matches!(s.reorder(0, 3), Err(EditorError::NotFound(_))));
        Ok(())
    }

    #[test]
    fn duplicate_inserts_after_source_and_leaves_source_alone() -> Result<(), EditorError> {
        let mut s = store(
            r#"{"0": {"comment": "a", "key": ["k"], "keysecondary": ["s"], "content": "c"},
                "7": {"comment": "z"}}"#,
        );
        let before = s.get(&EntryId::new("0")).cloned();
        let id = s.duplicate_after(
            &EntryId::new("0"),
            FieldSelection::ALL,
            Script::Simplified,
            statics::ZH_SUFFIX_SIMPLIFIED,
            &Upper,
        )?;
        assert_eq!(id, EntryId::new("8"));
        assert_eq!(s.position_of(&id), Some(1));

        let copy = s.get(&id).unwrap();
        assert_eq!(copy.title(), "A - 简");
        assert_eq!(copy.primary_keys(), vec!["K"]);
        assert_eq!(copy.secondary_keys(), vec!["S"]);
        assert_eq!(copy.content(), "C");
        assert_eq!(copy.get(statics::WI_UID), Some(&JsonValue::int(8)));
        assert_eq!(s.get(&EntryId::new("0")).cloned(), before);
        Ok(())
    }

    #[test]
    fn duplicate_suffixes_title_even_when_title_not_converted() -> Result<(), EditorError> {
        let mut s = store(r#"{"0": {"comment": "a", "content": "c"}}"#);
        let selection = FieldSelection {
            title: false,
            keys: false,
            content: false,
        };
        let id = s.duplicate_after(
            &EntryId::new("0"),
            selection,
            Script::Traditional,
            statics::ZH_SUFFIX_TRADITIONAL,
            &Upper,
        )?;
        let copy = s.get(&id).unwrap();
        assert_eq!(copy.title(), "a - 繁");
        assert_eq!(copy.content(), "c");

        assert!(matches!(
            s.duplicate_after(&EntryId::new("x"), selection, Script::Traditional, "", &Upper),
            Err(EditorError::NotFound(_))
        ));
        Ok(())
    }
}
