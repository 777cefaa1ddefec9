//! Core library for WIEdit, an editor for world info (lore book) JSON files.
//! Provides the order-preserving entry store, the field schema and form binding,
//! and the document controller (open/backup/save, unsaved-changes handling)
//! that the egui front end drives.

pub mod backup;
pub mod config;
pub mod convert;
pub mod document;
pub mod entry;
pub mod error;
pub mod find;
pub mod form;
mod gui;
pub mod projection;
pub mod schema;
pub mod statics;
pub mod store;
mod value;

pub use config::{EditorConfig, FlushPolicy};
pub use convert::{FieldSelection, Script, ScriptConverter, ZhConverter};
pub use document::{DocState, Dialogs, DocumentController, OpenReport, Replaced, UnsavedChoice};
pub use entry::{Entry, EntryId};
pub use error::EditorError;
pub use gui::run_gui;
pub use schema::FieldValue;
pub use store::EntryStore;
pub use value::{JsonNumber, JsonValue, OutputStyle};
