//! The key mapping record: every joypad button bound to a key label.
//!
//! Key labels are the normalized names produced by [`crate::normalize`],
//! so stored records, captured keys, and the built-in defaults share one
//! vocabulary. Labels may collide; resolution takes the first button in
//! canonical order.

use std::fmt;

use gb_joypad::GbButton;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default bindings, aligned with `GbButton::ALL`.
const DEFAULT_LABELS: [&str; 8] = ["E", "D", "S", "F", "K", "J", "Space", "Return"];

/// Slot of a button in the canonical order.
const fn slot(button: GbButton) -> usize {
    match button {
        GbButton::Up => 0,
        GbButton::Down => 1,
        GbButton::Left => 2,
        GbButton::Right => 3,
        GbButton::A => 4,
        GbButton::B => 5,
        GbButton::Select => 6,
        GbButton::Start => 7,
    }
}

/// Ordered mapping from every `GbButton` to a key label.
///
/// All eight buttons are always present; edits replace one label at a
/// time. Iteration and serialization follow `GbButton::ALL` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMapping {
    labels: [String; 8],
}

impl Default for KeyMapping {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS.map(String::from),
        }
    }
}

impl KeyMapping {
    /// Label currently bound to a button.
    #[must_use]
    pub fn label(&self, button: GbButton) -> &str {
        &self.labels[slot(button)]
    }

    /// Rebind one button to a new label. The other seven are untouched.
    pub fn bind(&mut self, button: GbButton, label: impl Into<String>) {
        self.labels[slot(button)] = label.into();
    }

    /// Resolve a key label to the first button bound to it, in canonical
    /// order. Labels may be bound to several buttons; earlier wins.
    #[must_use]
    pub fn button_for_label(&self, label: &str) -> Option<GbButton> {
        GbButton::ALL
            .iter()
            .copied()
            .find(|&b| self.labels[slot(b)] == label)
    }

    /// Iterate all bindings in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (GbButton, &str)> {
        GbButton::ALL
            .iter()
            .map(move |&b| (b, self.labels[slot(b)].as_str()))
    }
}

impl fmt::Display for KeyMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (button, label)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{button}={label}")?;
        }
        Ok(())
    }
}

impl Serialize for KeyMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(GbButton::ALL.len()))?;
        for (button, label) in self.iter() {
            map.serialize_entry(button.name(), label)?;
        }
        map.end()
    }
}

/// One entry of the legacy on-disk shape: an ordered list of
/// `{"button": ..., "key": ...}` pairs.
#[derive(Deserialize)]
struct LegacyPair {
    button: String,
    key: String,
}

struct KeyMappingVisitor;

impl<'de> Visitor<'de> for KeyMappingVisitor {
    type Value = KeyMapping;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a button-to-key object or a list of {button, key} pairs")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut labels: [Option<String>; 8] = Default::default();
        while let Some((name, label)) = access.next_entry::<String, String>()? {
            insert::<A::Error>(&mut labels, &name, label)?;
        }
        finish::<A::Error>(labels)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut labels: [Option<String>; 8] = Default::default();
        while let Some(pair) = access.next_element::<LegacyPair>()? {
            insert::<A::Error>(&mut labels, &pair.button, pair.key)?;
        }
        finish::<A::Error>(labels)
    }
}

fn insert<E: de::Error>(
    labels: &mut [Option<String>; 8],
    name: &str,
    label: String,
) -> Result<(), E> {
    let button = GbButton::from_name(name)
        .ok_or_else(|| E::custom(format!("unknown button name: {name}")))?;
    if labels[slot(button)].replace(label).is_some() {
        return Err(E::custom(format!("duplicate entry for button {name}")));
    }
    Ok(())
}

fn finish<E: de::Error>(labels: [Option<String>; 8]) -> Result<KeyMapping, E> {
    for (i, label) in labels.iter().enumerate() {
        if label.is_none() {
            return Err(E::custom(format!(
                "missing entry for button {}",
                GbButton::ALL[i]
            )));
        }
    }
    Ok(KeyMapping {
        labels: labels.map(|l| l.unwrap_or_default()),
    })
}

impl<'de> Deserialize<'de> for KeyMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(KeyMappingVisitor)
    }
}
