//! Simplified/traditional Chinese conversion, kept behind a trait so the
//! document model never depends on a particular converter.

/// Target script for a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Simplified,
    Traditional,
}

/// A pure, total text conversion.
pub trait ScriptConverter {
    fn convert(&self, text: &str, target: Script) -> String;
}

/// Converter backed by the `zhconv` dictionaries (mainland/Taiwan variants).
#[derive(Debug, Clone, Copy, Default)]
pub struct ZhConverter;

impl ScriptConverter for ZhConverter {
    fn convert(&self, text: &str, target: Script) -> String {
        let variant = match target {
            Script::Simplified => zhconv::Variant::ZhCN,
            Script::Traditional => zhconv::Variant::ZhTW,
        };
        zhconv::zhconv(text, variant)
    }
}

/// Which field groups a duplicate-with-conversion rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSelection {
    /// The title (`comment`).
    pub title: bool,
    /// Primary and secondary keys.
    pub keys: bool,
    pub content: bool,
}

impl FieldSelection {
    pub const ALL: FieldSelection = FieldSelection {
        title: true,
        keys: true,
        content: true,
    };
}

impl Default for FieldSelection {
    fn default() -> Self {
        Self::ALL
    }
}
