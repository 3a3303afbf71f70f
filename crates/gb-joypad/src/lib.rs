//! Game Boy joypad (P1 register) emulation.
//!
//! The joypad is a 2x4 key matrix read through the P1 register at $FF00.
//! Writing bit 4 low selects the direction keys, bit 5 low the action
//! buttons. Reads return the four keys of the selected half in the low
//! nibble, active low (0 = pressed).

use std::fmt;

/// Logical button on the Game Boy controller.
///
/// `ALL` fixes the canonical ordering used for display, serialization,
/// and collision resolution everywhere in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GbButton {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    Select,
    Start,
}

impl GbButton {
    /// Every button, in canonical order.
    pub const ALL: [Self; 8] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::A,
        Self::B,
        Self::Select,
        Self::Start,
    ];

    /// Display name, as shown in the settings table.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::A => "A",
            Self::B => "B",
            Self::Select => "SELECT",
            Self::Start => "START",
        }
    }

    /// Parse a display name back to a button.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.name() == name)
    }

    /// Bit position within the selected matrix half (0..=3).
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Self::Right | Self::A => 0,
            Self::Left | Self::B => 1,
            Self::Up | Self::Select => 2,
            Self::Down | Self::Start => 3,
        }
    }

    /// True for the direction keys (P14 half), false for the action
    /// buttons (P15 half).
    #[must_use]
    pub const fn is_direction(self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::Left | Self::Right)
    }
}

impl fmt::Display for GbButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Joypad state: eight keys plus the two matrix select lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct Joypad {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    a: bool,
    b: bool,
    select: bool,
    start: bool,
    /// P15 line level (high = action buttons deselected).
    p15: bool,
    /// P14 line level (high = direction keys deselected).
    p14: bool,
}

impl Joypad {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write P1: bits 4 and 5 set the select lines, the rest is ignored.
    pub fn write(&mut self, value: u8) {
        self.p15 = value & (1 << 5) != 0;
        self.p14 = value & (1 << 4) != 0;
    }

    /// Read P1: the selected half's keys in the low nibble, active low.
    ///
    /// With neither line pulled low all keys read released. The action
    /// half takes precedence when both lines are selected, matching the
    /// write-then-read access pattern games use.
    #[must_use]
    pub fn read(&self) -> u8 {
        if self.p15 && self.p14 {
            return 0x3F;
        }

        if !self.p15 {
            let mut value = 0x1F;
            value &= !(u8::from(self.start) << 3);
            value &= !(u8::from(self.select) << 2);
            value &= !(u8::from(self.b) << 1);
            value &= !u8::from(self.a);
            return value;
        }

        let mut value = 0x2F;
        value &= !(u8::from(self.down) << 3);
        value &= !(u8::from(self.up) << 2);
        value &= !(u8::from(self.left) << 1);
        value &= !u8::from(self.right);
        value
    }

    /// Press a button (idempotent).
    pub fn press(&mut self, button: GbButton) {
        self.set(button, true);
    }

    /// Release a button (idempotent).
    pub fn release(&mut self, button: GbButton) {
        self.set(button, false);
    }

    /// Current state of a button (true = pressed).
    #[must_use]
    pub const fn pressed(&self, button: GbButton) -> bool {
        match button {
            GbButton::Up => self.up,
            GbButton::Down => self.down,
            GbButton::Left => self.left,
            GbButton::Right => self.right,
            GbButton::A => self.a,
            GbButton::B => self.b,
            GbButton::Select => self.select,
            GbButton::Start => self.start,
        }
    }

    fn set(&mut self, button: GbButton, state: bool) {
        match button {
            GbButton::Up => self.up = state,
            GbButton::Down => self.down = state,
            GbButton::Left => self.left = state,
            GbButton::Right => self.right = state,
            GbButton::A => self.a = state,
            GbButton::B => self.b = state,
            GbButton::Select => self.select = state,
            GbButton::Start => self.start = state,
        }
    }
}
