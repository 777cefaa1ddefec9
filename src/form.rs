//! Translation between stored entry attributes and form widget values.

use crate::entry::{Entry, EntryId};
use crate::error::{EditorError, Result};
use crate::schema::{FIELDS, FieldKind, FieldSpec, FieldValue, VisibleWhen, describe};
use crate::statics;
use crate::value::JsonValue;
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Widget values for every schema field of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    values: IndexMap<&'static str, FieldValue>,
}

impl FormState {
    /// A form populated with schema defaults.
    pub fn defaults() -> Self {
        Self {
            values: FIELDS
                .iter()
                .map(|f| (f.key, f.kind.default_value()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    pub fn text(&self, key: &str) -> &str {
        self.get(key)
            .and_then(FieldValue::as_text)
            .unwrap_or(statics::EN_EMPTY)
    }

    /// Replace one field's value. Returns whether anything changed.
    /// Out-of-range numbers and indices are clamped the way a bounded widget would.
    pub fn set(&mut self, key: &str, value: FieldValue) -> Result<bool> {
        let spec = describe(key).ok_or_else(|| EditorError::NotFound(format!("field {key}")))?;
        let value = normalize(spec, value)?;
        let Some(slot) = self.values.get_mut(spec.key) else {
            return Err(EditorError::NotFound(format!("field {key}")));
        };
        if *slot == value {
            return Ok(false);
        }
        *slot = value;
        Ok(true)
    }
}

fn normalize(spec: &FieldSpec, value: FieldValue) -> Result<FieldValue> {
    let mismatch = || {
        EditorError::InvalidOperation(format!("wrong value type for field {}", spec.key))
    };
    match (spec.kind, value) {
        (
            FieldKind::Text { .. } | FieldKind::StringList | FieldKind::NullableInteger,
            v @ FieldValue::Text(_),
        ) => Ok(v),
        (FieldKind::Boolean { .. } | FieldKind::InvertedBoolean, v @ FieldValue::Flag(_)) => {
            Ok(v)
        }
        (FieldKind::Integer { min, max, .. }, FieldValue::Number(n)) => {
            Ok(FieldValue::Number(n.clamp(min, max)))
        }
        (
            kind @ (FieldKind::EnumIndex { .. }
            | FieldKind::TriState
            | FieldKind::StrategyComposite),
            FieldValue::Choice(i),
        ) => {
            let len = kind.choices().map_or(1, <[_]>::len);
            Ok(FieldValue::Choice(i.min(len.saturating_sub(1))))
        }
        (FieldKind::MultiSelect { options }, FieldValue::Selection(selected)) => {
            Ok(FieldValue::Selection(
                options
                    .iter()
                    .filter(|(k, _)| selected.iter().any(|s| s == k))
                    .map(|(k, _)| k.to_string())
                    .collect(),
            ))
        }
        _ => Err(mismatch()),
    }
}

/// Derive the widget value of one field from the stored entry.
pub fn read_field(spec: &FieldSpec, entry: &Entry) -> FieldValue {
    let raw = entry.get(spec.key);
    match spec.kind {
        FieldKind::Text { .. } => FieldValue::Text(match raw {
            Some(JsonValue::String(s)) => s.clone(),
            Some(n @ JsonValue::Number(_)) => n.to_json(Default::default()),
            _ => String::new(),
        }),
        FieldKind::StringList => {
            FieldValue::Text(raw.map(JsonValue::string_items).unwrap_or_default().join(", "))
        }
        FieldKind::Boolean { .. } => FieldValue::Flag(raw.is_some_and(JsonValue::truthy)),
        FieldKind::InvertedBoolean => FieldValue::Flag(!raw.is_some_and(JsonValue::truthy)),
        FieldKind::Integer { min, max, default } => FieldValue::Number(
            raw.and_then(JsonValue::as_i64)
                .unwrap_or(default)
                .clamp(min, max),
        ),
        FieldKind::NullableInteger => FieldValue::Text(
            raw.and_then(JsonValue::as_i64)
                .map(|n| n.to_string())
                .unwrap_or_default(),
        ),
        FieldKind::EnumIndex { choices } => {
            let last = choices.len().saturating_sub(1) as i64;
            let idx = raw.and_then(JsonValue::as_i64).unwrap_or(0).clamp(0, last);
            FieldValue::Choice(idx as usize)
        }
        FieldKind::TriState => FieldValue::Choice(match raw {
            Some(JsonValue::Bool(true)) => 1,
            Some(JsonValue::Bool(false)) => 2,
            _ => 0,
        }),
        FieldKind::StrategyComposite => {
            let on = |key: &str| entry.get(key).is_some_and(JsonValue::truthy);
            FieldValue::Choice(if on(statics::WI_CONSTANT) {
                1
            } else if on(statics::WI_VECTORIZED) {
                2
            } else {
                0
            })
        }
        FieldKind::MultiSelect { options } => {
            let stored = raw.map(JsonValue::string_items).unwrap_or_default();
            FieldValue::Selection(
                options
                    .iter()
                    .filter(|(k, _)| stored.contains(k))
                    .map(|(k, _)| k.to_string())
                    .collect(),
            )
        }
    }
}

/// Store one widget value into the entry.
pub fn write_field(spec: &FieldSpec, value: &FieldValue, entry: &mut Entry) {
    match (spec.kind, value) {
        (FieldKind::Text { .. }, FieldValue::Text(s)) => entry.set(spec.key, JsonValue::str(s)),
        (FieldKind::StringList, FieldValue::Text(s)) => {
            entry.set(spec.key, JsonValue::string_list(split_list(s)))
        }
        (FieldKind::Boolean { .. }, FieldValue::Flag(b)) => entry.set(spec.key, JsonValue::Bool(*b)),
        (FieldKind::InvertedBoolean, FieldValue::Flag(b)) => {
            entry.set(spec.key, JsonValue::Bool(!*b))
        }
        (FieldKind::Integer { min, max, .. }, FieldValue::Number(n)) => {
            entry.set(spec.key, JsonValue::int((*n).clamp(min, max)))
        }
        (FieldKind::NullableInteger, FieldValue::Text(s)) => {
            let value = parse_digits(s).map_or(JsonValue::Null, JsonValue::int);
            entry.set(spec.key, value)
        }
        (FieldKind::EnumIndex { .. }, FieldValue::Choice(i)) => {
            entry.set(spec.key, JsonValue::int(*i as i64))
        }
        (FieldKind::TriState, FieldValue::Choice(i)) => {
            let value = match *i {
                1 => JsonValue::Bool(true),
                2 => JsonValue::Bool(false),
                _ => JsonValue::Null,
            };
            entry.set(spec.key, value)
        }
        (FieldKind::StrategyComposite, FieldValue::Choice(i)) => {
            let (constant, vectorized, selective) = match *i {
                1 => (true, false, false),
                2 => (false, true, true),
                _ => (false, false, true),
            };
            entry.set(statics::WI_CONSTANT, JsonValue::Bool(constant));
            entry.set(statics::WI_VECTORIZED, JsonValue::Bool(vectorized));
            entry.set(statics::WI_SELECTIVE, JsonValue::Bool(selective));
        }
        (FieldKind::MultiSelect { options }, FieldValue::Selection(selected)) => {
            let keys = options
                .iter()
                .filter(|(k, _)| selected.iter().any(|s| s == k))
                .map(|(k, _)| *k);
            entry.set(spec.key, JsonValue::string_list(keys))
        }
        _ => log::warn!("ignoring mismatched value for field {}", spec.key),
    }
}

/// Comma-separated text to trimmed, non-empty items.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Only a (trimmed) run of ASCII digits is a number; everything else is absence.
fn parse_digits(text: &str) -> Option<i64> {
    let t = text.trim();
    if t.is_empty() || !t.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    t.parse().ok()
}

/// Populate a form from an entry. Pure: nothing is marked modified.
pub fn load(entry: &Entry) -> FormState {
    FormState {
        values: FIELDS.iter().map(|f| (f.key, read_field(f, entry))).collect(),
    }
}

/// Write the form back into the entry. Only fields whose form value differs
/// from what the entry currently loads as are written, so untouched fields
/// keep their stored representation. Returns the keys that were written.
pub fn flush(form: &FormState, entry: &mut Entry) -> Vec<&'static str> {
    let mut written = Vec::new();
    for spec in FIELDS {
        let Some(value) = form.get(spec.key) else {
            continue;
        };
        if read_field(spec, entry) != *value {
            write_field(spec, value, entry);
            written.push(spec.key);
        }
    }
    written
}

/// Write every field's default, as for a newly created entry.
pub fn apply_defaults(entry: &mut Entry) {
    for spec in FIELDS {
        write_field(spec, &spec.kind.default_value(), entry);
    }
}

/// Keys of the fields that are meaningful given the current form values.
pub fn visible_fields(form: &FormState) -> BTreeSet<&'static str> {
    FIELDS
        .iter()
        .filter(|f| match f.visible_when {
            VisibleWhen::Always => true,
            VisibleWhen::ChoiceIs { key, index } => {
                form.get(key).and_then(FieldValue::as_choice) == Some(index)
            }
            VisibleWhen::FlagSet { key } => form.get(key).and_then(FieldValue::as_flag) == Some(true),
        })
        .map(|f| f.key)
        .collect()
}

/// The single entry currently being edited and its working copy.
/// The form is a by-value copy; changes reach the store only through `flush`.
#[derive(Debug, Clone, Default)]
pub struct FormBinding {
    bound: Option<EntryId>,
    state: Option<FormState>,
}

impl FormBinding {
    pub fn bind(&mut self, id: EntryId, entry: &Entry) {
        self.state = Some(load(entry));
        self.bound = Some(id);
    }

    pub fn unbind(&mut self) {
        self.bound = None;
        self.state = None;
    }

    pub fn bound(&self) -> Option<&EntryId> {
        self.bound.as_ref()
    }

    pub fn state(&self) -> Option<&FormState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut FormState> {
        self.state.as_mut()
    }

    pub fn visible_fields(&self) -> BTreeSet<&'static str> {
        self.state.as_ref().map(visible_fields).unwrap_or_default()
    }
}
