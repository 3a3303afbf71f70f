//! Key-remapping settings frontend for the Game Boy joypad.
//!
//! The mapping record binds each logical joypad button to a key label.
//! The editor stages one rebinding at a time: select a button, capture
//! the next keypress, confirm or cancel. Confirmed edits persist to a
//! single JSON file and feed straight back into joypad input routing.

pub mod editor;
pub mod font;
pub mod mapping;
pub mod normalize;
pub mod store;

pub use editor::{KeymapEditor, KeymapRow};
pub use mapping::KeyMapping;
pub use store::{KEYMAP_FILE, KeymapStore, StoreError};
