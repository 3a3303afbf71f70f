//! Editor state for rebinding joypad buttons.
//!
//! The flow mirrors the settings screen: pick a row, press a key while
//! the capture overlay is open, then confirm or cancel. The mapping is
//! only written on confirm.

use gb_joypad::GbButton;

use crate::mapping::KeyMapping;
use crate::normalize;

/// One rendered row of the settings table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeymapRow {
    pub button: GbButton,
    pub label: String,
}

/// Transient rebinding state: which button is being rebound, and the
/// last key captured for it. Empty outside a capture.
#[derive(Debug, Default, Clone)]
struct PendingSelection {
    selected: Option<GbButton>,
    captured: Option<String>,
}

/// The key mapping editor.
///
/// Owns the mapping and the pending selection; the frontend drives it
/// with select/capture/confirm/cancel and re-reads `rows()` and
/// `preview()` after every event.
#[derive(Debug, Default)]
pub struct KeymapEditor {
    mapping: KeyMapping,
    pending: PendingSelection,
}

impl KeymapEditor {
    #[must_use]
    pub fn new(mapping: KeyMapping) -> Self {
        Self {
            mapping,
            pending: PendingSelection::default(),
        }
    }

    /// The current mapping.
    #[must_use]
    pub fn mapping(&self) -> &KeyMapping {
        &self.mapping
    }

    /// Row descriptors for the whole table, in canonical button order.
    #[must_use]
    pub fn rows(&self) -> Vec<KeymapRow> {
        self.mapping
            .iter()
            .map(|(button, label)| KeymapRow {
                button,
                label: label.to_string(),
            })
            .collect()
    }

    /// Button currently selected for rebinding, if any.
    #[must_use]
    pub fn selected(&self) -> Option<GbButton> {
        self.pending.selected
    }

    /// True while a capture is in progress.
    #[must_use]
    pub fn capturing(&self) -> bool {
        self.pending.selected.is_some()
    }

    /// Label to show in the capture preview field, empty before the
    /// first keypress.
    #[must_use]
    pub fn preview(&self) -> &str {
        self.pending.captured.as_deref().unwrap_or("")
    }

    /// Start rebinding a button. Replaces any previous selection and
    /// discards its captured key.
    pub fn select(&mut self, button: GbButton) {
        self.pending = PendingSelection {
            selected: Some(button),
            captured: None,
        };
    }

    /// Feed a physical key-code name while capturing. Each press
    /// overwrites the previous capture. Ignored outside a capture.
    pub fn capture(&mut self, code: &str) {
        if self.pending.selected.is_some() {
            self.pending.captured = Some(normalize::key_label(code));
        }
    }

    /// Commit the captured key to the selected button and clear the
    /// pending state. Returns true if the mapping changed (the caller
    /// re-renders and persists). Confirming with no selection, or before
    /// any key was captured, only clears state.
    pub fn confirm(&mut self) -> bool {
        let pending = std::mem::take(&mut self.pending);
        match (pending.selected, pending.captured) {
            (Some(button), Some(label)) => {
                self.mapping.bind(button, label);
                true
            }
            _ => false,
        }
    }

    /// Abandon the capture. The mapping is untouched.
    pub fn cancel(&mut self) {
        self.pending = PendingSelection::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_the_mapping() {
        let editor = KeymapEditor::default();
        let rows = editor.rows();

        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].button, GbButton::Up);
        assert_eq!(rows[0].label, "E");
        assert_eq!(rows[7].button, GbButton::Start);
        assert_eq!(rows[7].label, "Return");
    }

    #[test]
    fn select_capture_confirm_rebinds_one_button() {
        let mut editor = KeymapEditor::default();
        let before = editor.rows();

        editor.select(GbButton::B);
        editor.capture("Digit1");
        assert!(editor.confirm());

        assert_eq!(editor.mapping().label(GbButton::B), "Key1");
        for (i, row) in editor.rows().iter().enumerate() {
            if row.button != GbButton::B {
                assert_eq!(*row, before[i]);
            }
        }
    }

    #[test]
    fn capture_overwrites_previous_press() {
        let mut editor = KeymapEditor::default();
        editor.select(GbButton::A);
        editor.capture("KeyQ");
        editor.capture("ArrowLeft");

        assert_eq!(editor.preview(), "Left");
        editor.confirm();
        assert_eq!(editor.mapping().label(GbButton::A), "Left");
    }

    #[test]
    fn cancel_leaves_mapping_untouched() {
        let mut editor = KeymapEditor::default();
        let before = editor.mapping().clone();

        editor.select(GbButton::Start);
        editor.capture("KeyQ");
        editor.cancel();

        assert_eq!(*editor.mapping(), before);
        assert!(!editor.capturing());
        assert_eq!(editor.preview(), "");
    }

    #[test]
    fn confirm_without_selection_is_a_no_op() {
        let mut editor = KeymapEditor::default();
        let before = editor.mapping().clone();

        assert!(!editor.confirm());
        assert_eq!(*editor.mapping(), before);
    }

    #[test]
    fn confirm_without_capture_only_clears_state() {
        let mut editor = KeymapEditor::default();
        let before = editor.mapping().clone();

        editor.select(GbButton::Up);
        assert!(!editor.confirm());

        assert_eq!(*editor.mapping(), before);
        assert!(!editor.capturing());
    }

    #[test]
    fn capture_outside_selection_is_ignored() {
        let mut editor = KeymapEditor::default();
        editor.capture("KeyQ");
        assert_eq!(editor.preview(), "");
    }

    #[test]
    fn reselect_discards_earlier_capture() {
        let mut editor = KeymapEditor::default();
        editor.select(GbButton::A);
        editor.capture("KeyQ");
        editor.select(GbButton::B);

        assert_eq!(editor.preview(), "");
        assert!(!editor.confirm());
        assert_eq!(editor.mapping().label(GbButton::B), "J");
    }
}
