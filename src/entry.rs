use crate::statics;
use crate::value::JsonValue;
use indexmap::IndexMap;
use std::fmt;

/// Stable key of an entry inside the document's `entries` object.
/// Travels with the entry across reorders; never renumbered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric value for decimal-digit identifiers.
    pub fn numeric(&self) -> Option<u64> {
        if self.0.is_empty() || !self.0.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.0.parse().ok()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One lore-book record. Attributes the editor does not know about are kept
/// as-is, in their original order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entry {
    attrs: IndexMap<String, JsonValue>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attrs(attrs: IndexMap<String, JsonValue>) -> Self {
        Self { attrs }
    }

    pub fn attrs(&self) -> &IndexMap<String, JsonValue> {
        &self.attrs
    }

    pub fn remove(&mut self, key: &str) -> Option<JsonValue> {
        self.attrs.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.attrs.get(key)
    }

    /// Insert or overwrite; new attributes go to the end, existing ones keep their slot.
    pub fn set(&mut self, key: &str, value: JsonValue) {
        if let Some(slot) = self.attrs.get_mut(key) {
            *slot = value;
        } else {
            self.attrs.insert(key.to_string(), value);
        }
    }

    pub fn str_attr(&self, key: &str) -> &str {
        self.get(key).and_then(JsonValue::as_str).unwrap_or(statics::EN_EMPTY)
    }

    pub fn list_attr(&self, key: &str) -> Vec<&str> {
        self.get(key).map(JsonValue::string_items).unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.str_attr(statics::WI_COMMENT)
    }

    pub fn content(&self) -> &str {
        self.str_attr(statics::WI_CONTENT)
    }

    pub fn primary_keys(&self) -> Vec<&str> {
        self.list_attr(statics::WI_KEY)
    }

    pub fn secondary_keys(&self) -> Vec<&str> {
        self.list_attr(statics::WI_KEY_SECONDARY)
    }
}

#[cfg(test)]
mod tests {
    use super::{Entry, EntryId};
    use crate::value::JsonValue;

    #[test]
    fn numeric_ids_are_plain_digit_strings() {
        assert_eq!(EntryId::new("12").numeric(), Some(12));
        assert_eq!(EntryId::new("007").numeric(), Some(7));
        assert_eq!(EntryId::new("").numeric(), None);
        assert_eq!(EntryId::new("-1").numeric(), None);
        assert_eq!(EntryId::new("a1").numeric(), None);
    }

    #[test]
    fn set_keeps_existing_attribute_slot() {
        let mut e = Entry::new();
        e.set("a", JsonValue::int(1));
        e.set("b", JsonValue::int(2));
        e.set("a", JsonValue::int(3));
        let keys: Vec<_> = e.attrs().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(e.get("a"), Some(&JsonValue::int(3)));
    }

    #[test]
    fn list_attr_skips_non_strings() {
        let mut e = Entry::new();
        e.set(
            "key",
            JsonValue::Array(vec![JsonValue::str("x"), JsonValue::int(1), JsonValue::str("y")]),
        );
        assert_eq!(e.primary_keys(), vec!["x", "y"]);
        assert!(e.secondary_keys().is_empty());
    }
}
