//! Static description of every editable entry attribute.
//!
//! The table is plain data: adding a field means adding a row to [`FIELDS`],
//! the form binding dispatches on [`FieldKind`] and never on field names.

use crate::statics::*;

/// How a field is stored in the entry and presented in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, stored as a string.
    Text { multiline: bool },
    /// Comma-joined in the form, an array of trimmed non-empty strings on disk.
    StringList,
    Boolean { default: bool },
    /// The form shows the negation of the stored flag (an "enabled" box over `disable`).
    InvertedBoolean,
    Integer { min: i64, max: i64, default: i64 },
    /// Digits only; anything else stores `null` ("inherit the global setting").
    NullableInteger,
    /// Index into a fixed list of choices.
    EnumIndex { choices: &'static [&'static str] },
    /// unset / true / false, stored as null / true / false.
    TriState,
    /// One choice over the `constant`, `vectorized` and `selective` booleans.
    StrategyComposite,
    /// Subset of fixed option keys, stored as an array of the selected keys.
    MultiSelect {
        options: &'static [(&'static str, &'static str)],
    },
}

impl FieldKind {
    /// Choice labels for index-valued kinds.
    pub fn choices(&self) -> Option<&'static [&'static str]> {
        match self {
            FieldKind::EnumIndex { choices } => Some(choices),
            FieldKind::TriState => Some(WI_CHOICES_TRI_STATE),
            FieldKind::StrategyComposite => Some(WI_CHOICES_STRATEGY),
            _ => None,
        }
    }

    /// The form value a freshly created entry starts with.
    pub fn default_value(&self) -> FieldValue {
        match self {
            FieldKind::Text { .. } | FieldKind::StringList | FieldKind::NullableInteger => {
                FieldValue::Text(String::new())
            }
            FieldKind::Boolean { default } => FieldValue::Flag(*default),
            FieldKind::InvertedBoolean => FieldValue::Flag(true),
            FieldKind::Integer { default, .. } => FieldValue::Number(*default),
            FieldKind::EnumIndex { .. } | FieldKind::TriState | FieldKind::StrategyComposite => {
                FieldValue::Choice(0)
            }
            FieldKind::MultiSelect { .. } => FieldValue::Selection(Vec::new()),
        }
    }
}

/// The value a form widget holds for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text, string-list and nullable-integer fields.
    Text(String),
    /// Boolean fields, as displayed.
    Flag(bool),
    Number(i64),
    /// Enum, tri-state and strategy fields.
    Choice(usize),
    /// Selected option keys, in option-list order.
    Selection(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<usize> {
        match self {
            FieldValue::Choice(i) => Some(*i),
            _ => None,
        }
    }
}

/// Which form tab a field lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Basic,
    Insertion,
    Advanced,
}

/// When a field is meaningful, expressed over other fields' form values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleWhen {
    Always,
    ChoiceIs { key: &'static str, index: usize },
    FlagSet { key: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub tab: Tab,
    pub visible_when: VisibleWhen,
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind, tab: Tab) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind,
        tab,
        visible_when: VisibleWhen::Always,
    }
}

const fn counter(key: &'static str, label: &'static str, tab: Tab) -> FieldSpec {
    field(
        key,
        label,
        FieldKind::Integer {
            min: 0,
            max: 99_999,
            default: 0,
        },
        tab,
    )
}

const fn flag(key: &'static str, label: &'static str) -> FieldSpec {
    field(
        key,
        label,
        FieldKind::Boolean { default: false },
        Tab::Advanced,
    )
}

const TEXT: FieldKind = FieldKind::Text { multiline: false };

pub static FIELDS: &[FieldSpec] = &[
    // Basic
    field(WI_COMMENT, "Title / memo", TEXT, Tab::Basic),
    field(WI_KEY, "Primary keys (comma separated)", FieldKind::StringList, Tab::Basic),
    field(WI_KEY_SECONDARY, "Optional filter", FieldKind::StringList, Tab::Basic),
    field(
        WI_SELECTIVE_LOGIC,
        "Filter logic",
        FieldKind::EnumIndex {
            choices: WI_CHOICES_SELECTIVE_LOGIC,
        },
        Tab::Basic,
    ),
    field(WI_CONTENT, "Content", FieldKind::Text { multiline: true }, Tab::Basic),
    field(WI_AUTOMATION_ID, "Automation ID", TEXT, Tab::Basic),
    field(WI_DISABLE, "Enabled", FieldKind::InvertedBoolean, Tab::Basic),
    field(WI_STRATEGY, "Strategy", FieldKind::StrategyComposite, Tab::Basic),
    // Insertion & matching
    field(
        WI_ORDER,
        "Order",
        FieldKind::Integer {
            min: 0,
            max: 99_999,
            default: 100,
        },
        Tab::Insertion,
    ),
    field(
        WI_POSITION,
        "Position",
        FieldKind::EnumIndex {
            choices: WI_CHOICES_POSITION,
        },
        Tab::Insertion,
    ),
    FieldSpec {
        visible_when: VisibleWhen::ChoiceIs {
            key: WI_POSITION,
            index: WI_POSITION_AT_DEPTH,
        },
        ..field(
            WI_DEPTH,
            "Depth",
            FieldKind::Integer {
                min: 0,
                max: 99_999,
                default: 4,
            },
            Tab::Insertion,
        )
    },
    FieldSpec {
        visible_when: VisibleWhen::ChoiceIs {
            key: WI_POSITION,
            index: WI_POSITION_AT_DEPTH,
        },
        ..field(
            WI_ROLE,
            "Role",
            FieldKind::EnumIndex {
                choices: WI_CHOICES_ROLE,
            },
            Tab::Insertion,
        )
    },
    FieldSpec {
        visible_when: VisibleWhen::ChoiceIs {
            key: WI_POSITION,
            index: WI_POSITION_OUTLET,
        },
        ..field(WI_OUTLET_NAME, "Outlet name", TEXT, Tab::Insertion)
    },
    field(WI_SCAN_DEPTH, "Scan depth", FieldKind::NullableInteger, Tab::Insertion),
    field(
        WI_PROBABILITY,
        "Trigger %",
        FieldKind::Integer {
            min: 0,
            max: 100,
            default: 100,
        },
        Tab::Insertion,
    ),
    field(WI_CASE_SENSITIVE, "Case sensitive", FieldKind::TriState, Tab::Insertion),
    field(WI_MATCH_WHOLE_WORDS, "Match whole words", FieldKind::TriState, Tab::Insertion),
    field(WI_GROUP, "Inclusion group", TEXT, Tab::Insertion),
    field(
        WI_GROUP_WEIGHT,
        "Group weight",
        FieldKind::Integer {
            min: 0,
            max: 10_000,
            default: 100,
        },
        Tab::Insertion,
    ),
    field(
        WI_GROUP_OVERRIDE,
        "Prioritize inclusion",
        FieldKind::Boolean { default: false },
        Tab::Insertion,
    ),
    field(WI_USE_GROUP_SCORING, "Use group scoring", FieldKind::TriState, Tab::Insertion),
    field(
        WI_CHARACTER_FILTER,
        "Character filter",
        FieldKind::StringList,
        Tab::Insertion,
    ),
    field(
        WI_CHARACTER_FILTER_EXCLUDE,
        "Exclude listed characters",
        FieldKind::Boolean { default: false },
        Tab::Insertion,
    ),
    // Advanced
    field(
        WI_TRIGGERS,
        "Generation triggers",
        FieldKind::MultiSelect {
            options: WI_TRIGGER_OPTIONS,
        },
        Tab::Advanced,
    ),
    counter(WI_STICKY, "Sticky", Tab::Advanced),
    counter(WI_COOLDOWN, "Cooldown", Tab::Advanced),
    counter(WI_DELAY, "Delay", Tab::Advanced),
    flag(WI_EXCLUDE_RECURSION, "Non-recursable"),
    flag(WI_IGNORE_BUDGET, "Ignore budget"),
    flag(WI_PREVENT_RECURSION, "Prevent further recursion"),
    flag(WI_DELAY_UNTIL_RECURSION, "Delay until recursion"),
    FieldSpec {
        visible_when: VisibleWhen::FlagSet {
            key: WI_DELAY_UNTIL_RECURSION,
        },
        ..counter(WI_RECURSION_LEVEL, "Recursion level", Tab::Advanced)
    },
    flag(WI_MATCH_CHARACTER_DESCRIPTION, "Match character description"),
    flag(WI_MATCH_CHARACTER_DEPTH_PROMPT, "Match character depth prompt"),
    flag(WI_MATCH_CHARACTER_PERSONALITY, "Match character personality"),
    flag(WI_MATCH_SCENARIO, "Match scenario"),
    flag(WI_MATCH_PERSONA_DESCRIPTION, "Match persona description"),
    flag(WI_MATCH_CREATOR_NOTES, "Match creator notes"),
];

pub fn describe(key: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.key == key)
}

pub fn fields_on(tab: Tab) -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS.iter().filter(move |f| f.tab == tab)
}
