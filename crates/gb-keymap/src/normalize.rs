//! Physical key-code names to key labels.
//!
//! Host key events carry DOM-style code names ("KeyE", "Digit1",
//! "ArrowUp"). Stored bindings use the shorter legacy names the emulator
//! core matches against ("E", "Key1", "Up"). The rewrite chain below
//! translates between the two vocabularies.

/// Normalize a physical key-code name to a key label.
///
/// Rules are applied in a fixed order, each rule acting on the output of
/// the previous one:
/// 1. strip a leading "Key"       ("KeyE" -> "E")
/// 2. strip a leading "Arrow"     ("ArrowUp" -> "Up")
/// 3. rewrite a leading "Digit" to "Key" ("Digit1" -> "Key1")
/// 4. rewrite "Enter" to "Return"
/// 5. rewrite "Backspace" to "Back"
///
/// Names not covered by any rule pass through unchanged.
#[must_use]
pub fn key_label(code: &str) -> String {
    let label = code.strip_prefix("Key").unwrap_or(code);
    let label = label.strip_prefix("Arrow").unwrap_or(label);
    let label = match label.strip_prefix("Digit") {
        Some(rest) => format!("Key{rest}"),
        None => label.to_string(),
    };
    let label = if label == "Enter" {
        "Return".to_string()
    } else {
        label
    };
    if label == "Backspace" {
        "Back".to_string()
    } else {
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_codes_lose_the_key_prefix() {
        assert_eq!(key_label("KeyE"), "E");
        assert_eq!(key_label("KeyZ"), "Z");
    }

    #[test]
    fn arrow_codes_lose_the_arrow_prefix() {
        assert_eq!(key_label("ArrowUp"), "Up");
        assert_eq!(key_label("ArrowDown"), "Down");
        assert_eq!(key_label("ArrowLeft"), "Left");
        assert_eq!(key_label("ArrowRight"), "Right");
    }

    #[test]
    fn digit_codes_become_key_names() {
        assert_eq!(key_label("Digit1"), "Key1");
        assert_eq!(key_label("Digit0"), "Key0");
    }

    #[test]
    fn enter_becomes_return() {
        assert_eq!(key_label("Enter"), "Return");
    }

    #[test]
    fn backspace_becomes_back() {
        assert_eq!(key_label("Backspace"), "Back");
    }

    #[test]
    fn uncovered_codes_pass_through() {
        assert_eq!(key_label("Space"), "Space");
        assert_eq!(key_label("F1"), "F1");
        assert_eq!(key_label("Tab"), "Tab");
        assert_eq!(key_label("ShiftLeft"), "ShiftLeft");
        assert_eq!(key_label("Escape"), "Escape");
    }

    #[test]
    fn normalization_is_deterministic() {
        for code in ["KeyE", "Digit7", "ArrowUp", "Enter", "Backspace", "F5"] {
            assert_eq!(key_label(code), key_label(code));
        }
    }
}
