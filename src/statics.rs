// Central place for UI strings and other non-localized constants.
// Keep these out of gui.rs to reduce duplication and make tweaks safer.

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_APP_TITLE: &str = "WIEdit: World Info Editor";

pub const EN_BTN_NEW: &str = "New";
pub const EN_BTN_OPEN: &str = "Open...";
pub const EN_BTN_SAVE: &str = "Save";
pub const EN_BTN_SAVE_AS: &str = "Save As...";
pub const EN_BTN_QUIT: &str = "Quit";
pub const EN_FILTER_WORLD_INFO: &str = "World Info";
pub const EN_STATUS_NEW: &str = "New lore book";

pub const EN_BTN_ADD: &str = "Add";
pub const EN_BTN_DELETE: &str = "Delete";
pub const EN_BTN_UP: &str = "Up";
pub const EN_BTN_DOWN: &str = "Down";
pub const EN_BTN_MOVE_TO: &str = "Move to...";
pub const EN_BTN_DUP_SIMPLIFIED: &str = "Copy as Simplified";
pub const EN_BTN_DUP_TRADITIONAL: &str = "Copy as Traditional";
pub const EN_BTN_GO: &str = "Go";
pub const EN_BTN_OK: &str = "OK";
pub const EN_BTN_CANCEL: &str = "Cancel";
pub const EN_BTN_CLEAR: &str = "Clear";

pub const EN_BTN_FIND_NEXT: &str = "Find next";
pub const EN_BTN_REPLACE: &str = "Replace";
pub const EN_BTN_REPLACE_ALL: &str = "Replace all";
pub const EN_BTN_CONTENT_TO_SIMPLIFIED: &str = "Content to Simplified";
pub const EN_BTN_CONTENT_TO_TRADITIONAL: &str = "Content to Traditional";
pub const EN_HINT_FIND: &str = "Find in content";
pub const EN_HINT_REPLACE: &str = "Replace with";
pub const EN_FIND_NOT_FOUND: &str = "Not found in content";

pub const EN_BTN_SAVE_AND_CLOSE: &str = "Save";
pub const EN_BTN_SAVE_AS_AND_CLOSE: &str = "Save As...";
pub const EN_BTN_DISCARD: &str = "Discard";

pub const EN_WINDOW_UNSAVED: &str = "Unsaved changes";
pub const EN_WINDOW_MOVE_TO: &str = "Move entry";
pub const EN_WINDOW_DUPLICATE: &str = "Convert fields";
pub const EN_UNSAVED_PROMPT: &str = "You have unsaved changes. What should happen to them?";

pub const EN_HOME_HEADING: &str = "WIEdit: World Info Editor";
pub const EN_HOME_INSTRUCTIONS: &str = "Create a new lore book or open a world info .json file to begin.";

pub const EN_HEADING_ENTRIES: &str = "Entries";
pub const EN_HINT_SEARCH: &str = "Search title, keys, content";
pub const EN_SELECT_ENTRY: &str = "Select an entry on the left.";
pub const EN_SEARCH_NO_MATCHES: &str = "No matches.";
pub const EN_COL_POSITION: &str = "#";
pub const EN_COL_ENTRY: &str = "Entry";
pub const EN_LABEL_ENTRIES_COUNT: &str = "entries:";
pub const EN_LABEL_UID: &str = "UID";
pub const EN_REORDER_DISABLED: &str = "Clear the search to reorder entries.";

pub const EN_TAB_BASIC: &str = "Basic";
pub const EN_TAB_INSERTION: &str = "Insertion & Matching";
pub const EN_TAB_ADVANCED: &str = "Advanced";

pub const EN_LABEL_CONVERT_TITLE: &str = "Title (comment)";
pub const EN_LABEL_CONVERT_KEYS: &str = "Primary and secondary keys";
pub const EN_LABEL_CONVERT_CONTENT: &str = "Content";
pub const EN_MOVE_TO_PROMPT: &str = "New position";

pub const EN_BADGE_DIRTY: &str = "modified";
pub const EN_TITLE_DIRTY_MARK: &str = " *";
pub const EN_PLACEHOLDER_UNSAVED: &str = "<untitled>";
pub const EN_UNTITLED_ENTRY: &str = "Untitled entry";
pub const EN_NEW_ENTRY_TITLE: &str = "New entry";
pub const EN_EMPTY: &str = "";

pub const EN_ERR_NOTHING_TO_SAVE: &str = "There is no document to save";
pub const EN_ERR_NO_DOCUMENT: &str = "Create or open a lore book first";
pub const EN_ERR_POSITION_INTEGER: &str = "Position must be a whole number";
pub const EN_ERR_REORDER_FILTERED: &str = "Entries cannot be reordered while a search filter is active";
pub const EN_ERR_IDS_EXHAUSTED: &str = "No free entry identifier is left";

// Language tags appended to the title of a converted copy.
pub const ZH_SUFFIX_SIMPLIFIED: &str = " - 简";
pub const ZH_SUFFIX_TRADITIONAL: &str = " - 繁";

// Backup file naming.
pub const BACKUP_TAG: &str = "backup";
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// Optional CJK font override for the GUI.
pub const FONT_ENV_VAR: &str = "WIEDIT_FONT";
pub const FONT_CJK_FALLBACK: &str = "cjk_fallback";

// Config discovery.
pub const CONFIG_ENV_VAR: &str = "WIEDIT_CONFIG";
pub const CONFIG_FILE_NAME: &str = ".wiedit.json5";

// World info document structure keys (WI_ prefix)
pub const WI_ENTRIES: &str = "entries";
pub const WI_UID: &str = "uid";

// Entry attributes.
pub const WI_KEY: &str = "key";
pub const WI_KEY_SECONDARY: &str = "keysecondary";
pub const WI_COMMENT: &str = "comment";
pub const WI_CONTENT: &str = "content";
pub const WI_CONSTANT: &str = "constant";
pub const WI_VECTORIZED: &str = "vectorized";
pub const WI_SELECTIVE: &str = "selective";
pub const WI_SELECTIVE_LOGIC: &str = "selectiveLogic";
pub const WI_ADD_MEMO: &str = "addMemo";
pub const WI_ORDER: &str = "order";
pub const WI_POSITION: &str = "position";
pub const WI_DISABLE: &str = "disable";
pub const WI_PROBABILITY: &str = "probability";
pub const WI_USE_PROBABILITY: &str = "useProbability";
pub const WI_DEPTH: &str = "depth";
pub const WI_ROLE: &str = "role";
pub const WI_OUTLET_NAME: &str = "outletName";
pub const WI_SCAN_DEPTH: &str = "scanDepth";
pub const WI_CASE_SENSITIVE: &str = "caseSensitive";
pub const WI_MATCH_WHOLE_WORDS: &str = "matchWholeWords";
pub const WI_GROUP: &str = "group";
pub const WI_GROUP_WEIGHT: &str = "groupWeight";
pub const WI_GROUP_OVERRIDE: &str = "groupOverride";
pub const WI_USE_GROUP_SCORING: &str = "useGroupScoring";
pub const WI_CHARACTER_FILTER: &str = "characterFilter";
pub const WI_CHARACTER_FILTER_EXCLUDE: &str = "characterFilterExclude";
pub const WI_TRIGGERS: &str = "triggers";
pub const WI_STICKY: &str = "sticky";
pub const WI_COOLDOWN: &str = "cooldown";
pub const WI_DELAY: &str = "delay";
pub const WI_EXCLUDE_RECURSION: &str = "excludeRecursion";
pub const WI_IGNORE_BUDGET: &str = "ignoreBudget";
pub const WI_PREVENT_RECURSION: &str = "preventRecursion";
pub const WI_DELAY_UNTIL_RECURSION: &str = "delayUntilRecursion";
pub const WI_RECURSION_LEVEL: &str = "recursionLevel";
pub const WI_MATCH_CHARACTER_DESCRIPTION: &str = "matchCharacterDescription";
pub const WI_MATCH_CHARACTER_DEPTH_PROMPT: &str = "matchCharacterDepthPrompt";
pub const WI_MATCH_CHARACTER_PERSONALITY: &str = "matchCharacterPersonality";
pub const WI_MATCH_SCENARIO: &str = "matchScenario";
pub const WI_MATCH_PERSONA_DESCRIPTION: &str = "matchPersonaDescription";
pub const WI_MATCH_CREATOR_NOTES: &str = "matchCreatorNotes";
pub const WI_AUTOMATION_ID: &str = "automationId";

// Form-only key for the constant/vectorized/selective composite.
pub const WI_STRATEGY: &str = "strategy";

// Position choices that unlock dependent fields.
pub const WI_POSITION_AT_DEPTH: usize = 6;
pub const WI_POSITION_OUTLET: usize = 7;

// Choice lists (index is what gets stored).
pub const WI_CHOICES_SELECTIVE_LOGIC: &[&str] = &["AND ANY", "AND ALL", "NOT ANY", "NOT ALL"];
pub const WI_CHOICES_POSITION: &[&str] = &[
    "Before character definition",
    "After character definition",
    "Before example messages",
    "After example messages",
    "Top of author's note",
    "Bottom of author's note",
    "@ Depth",
    "Outlet",
];
pub const WI_CHOICES_ROLE: &[&str] = &["System", "User", "Assistant"];
pub const WI_CHOICES_TRI_STATE: &[&str] = &["Use global setting", "Yes", "No"];
pub const WI_CHOICES_STRATEGY: &[&str] = &["Selective (keyword)", "Constant", "Vectorized"];

// Generation triggers: (stored key, label).
pub const WI_TRIGGER_OPTIONS: &[(&str, &str)] = &[
    ("normal", "Normal"),
    ("continue", "Continue"),
    ("impersonate", "Impersonate"),
    ("swipe", "Swipe"),
    ("regenerate", "Regenerate"),
    ("quiet", "Quiet"),
];
