use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, de};

/// A JSON number that keeps the integer/float distinction of its source text.
/// The chat application reads `order`, `depth` and friends as integers, so
/// `100` must not come back as `100.0`.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonNumber {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl JsonNumber {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonNumber::I64(v) => Some(*v),
            JsonNumber::U64(v) => i64::try_from(*v).ok(),
            JsonNumber::F64(v) => {
                // Whole floats (e.g. `4.0`) still count as integers.
                if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15 {
                    Some(*v as i64)
                } else {
                    None
                }
            }
        }
    }

    fn write(&self, out: &mut String) {
        match self {
            JsonNumber::I64(v) => out.push_str(&v.to_string()),
            JsonNumber::U64(v) => out.push_str(&v.to_string()),
            JsonNumber::F64(v) => {
                if !v.is_finite() {
                    // JSON has no spelling for NaN/Infinity.
                    out.push_str("null");
                } else {
                    let mut buf = ryu::Buffer::new();
                    out.push_str(buf.format(*v));
                }
            }
        }
    }
}

/// Output layout for [`JsonValue::to_json`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStyle {
    /// `{"a":1,"b":[2,3]}`, the layout the chat application itself writes.
    #[default]
    Compact,
    /// Two-space indentation.
    Pretty,
}

/// An order-preserving JSON value. Objects keep their source key order, which
/// is what makes entry order survive a load/save cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(JsonNumber),
    String(String),
    Array(Vec<JsonValue>),
    Object(IndexMap<String, JsonValue>),
}

impl JsonValue {
    pub fn int(v: i64) -> Self {
        JsonValue::Number(JsonNumber::I64(v))
    }

    pub fn str(s: impl Into<String>) -> Self {
        JsonValue::String(s.into())
    }

    pub fn string_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        JsonValue::Array(items.into_iter().map(|s| JsonValue::String(s.into())).collect())
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, JsonValue>> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Loose truthiness: `null`, `false`, `0`, `""` and empty containers are false.
    pub fn truthy(&self) -> bool {
        match self {
            JsonValue::Null => false,
            JsonValue::Bool(b) => *b,
            JsonValue::Number(JsonNumber::F64(v)) => *v != 0.0,
            JsonValue::Number(n) => n.as_i64() != Some(0),
            JsonValue::String(s) => !s.is_empty(),
            JsonValue::Array(values) => !values.is_empty(),
            JsonValue::Object(map) => !map.is_empty(),
        }
    }

    /// The string items of an array, skipping anything that is not a string.
    pub fn string_items(&self) -> Vec<&str> {
        self.as_array()
            .map(|items| items.iter().filter_map(JsonValue::as_str).collect())
            .unwrap_or_default()
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "bool",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    /// Parse JSON text. JSON5 extensions (comments, trailing commas) are
    /// tolerated so hand-edited files still open. The error is the parser's
    /// message, which carries line/column information.
    pub fn parse(text: &str) -> Result<JsonValue, String> {
        json5::from_str::<JsonValue>(text).map_err(|e| e.to_string())
    }

    pub fn to_json(&self, style: OutputStyle) -> String {
        let mut out = String::new();
        match style {
            OutputStyle::Compact => self.write_compact(&mut out),
            OutputStyle::Pretty => {
                self.write_pretty(&mut out, 0);
                out.push('\n');
            }
        }
        out
    }

    fn write_compact(&self, out: &mut String) {
        match self {
            JsonValue::Null => out.push_str("null"),
            JsonValue::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
            JsonValue::Number(n) => n.write(out),
            JsonValue::String(s) => write_escaped_string(out, s),
            JsonValue::Array(values) => {
                out.push('[');
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    v.write_compact(out);
                }
                out.push(']');
            }
            JsonValue::Object(map) => {
                out.push('{');
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write_escaped_string(out, k);
                    out.push(':');
                    v.write_compact(out);
                }
                out.push('}');
            }
        }
    }

    fn write_pretty(&self, out: &mut String, indent: usize) {
        match self {
            JsonValue::Array(values) if !values.is_empty() => {
                out.push_str("[\n");
                for (i, v) in values.iter().enumerate() {
                    out.push_str(&" ".repeat(indent + 2));
                    v.write_pretty(out, indent + 2);
                    if i + 1 != values.len() {
                        out.push(',');
                    }
                    out.push('\n');
                }
                out.push_str(&" ".repeat(indent));
                out.push(']');
            }
            JsonValue::Object(map) if !map.is_empty() => {
                out.push_str("{\n");
                for (i, (k, v)) in map.iter().enumerate() {
                    out.push_str(&" ".repeat(indent + 2));
                    write_escaped_string(out, k);
                    out.push_str(": ");
                    v.write_pretty(out, indent + 2);
                    if i + 1 != map.len() {
                        out.push(',');
                    }
                    out.push('\n');
                }
                out.push_str(&" ".repeat(indent));
                out.push('}');
            }
            // Scalars and empty containers look the same in both layouts.
            other => other.write_compact(out),
        }
    }
}

fn write_escaped_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write as _;
                write!(out, "\\u{:04x}", c as u32).ok();
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> de::Visitor<'de> for ValueVisitor {
            type Value = JsonValue;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a JSON value")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(JsonValue::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(JsonValue::Null)
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(JsonValue::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(JsonValue::Number(JsonNumber::I64(v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                // Only values past i64::MAX stay unsigned.
                Ok(JsonValue::Number(match i64::try_from(v) {
                    Ok(i) => JsonNumber::I64(i),
                    Err(_) => JsonNumber::U64(v),
                }))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(JsonValue::Number(JsonNumber::F64(v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(JsonValue::String(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(JsonValue::String(v))
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut values = Vec::new();
                while let Some(value) = seq.next_element::<JsonValue>()? {
                    values.push(value);
                }
                Ok(JsonValue::Array(values))
            }

            fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut values = IndexMap::new();
                while let Some((key, value)) = map.next_entry::<String, JsonValue>()? {
                    values.insert(key, value);
                }
                Ok(JsonValue::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
