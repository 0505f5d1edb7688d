// SPDX-License-Identifier: GPL-3.0-only

//! Classification of key codes.
//!
//! Key codes follow the standard key-event identifiers (`"KeyA"`, `"ShiftLeft"`,
//! `"ArrowUp"`). This module maps them onto the two closed sets the engine acts
//! on: modifier keys and text-editing function keys.
//!
//! # Matching Rules
//!
//! 1. Modifiers match by substring, so `"ShiftLeft"` and `"ShiftRight"` are both Shift
//! 2. Function keys match the code exactly

/// A key whose state is tracked rather than typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKey {
    /// Either Shift key
    Shift,
    /// Either Control key
    Control,
    /// Either Alt key
    Alt,
    /// Caps Lock
    CapsLock,
}

impl ModifierKey {
    /// Classifies `code` as a modifier, if it is one.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        if code.contains("Shift") {
            Some(Self::Shift)
        } else if code.contains("Control") {
            Some(Self::Control)
        } else if code.contains("Alt") {
            Some(Self::Alt)
        } else if code.contains("CapsLock") {
            Some(Self::CapsLock)
        } else {
            None
        }
    }
}

/// A function key with a text-editing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKeyKind {
    /// Insert a tab character
    Tab,
    /// Insert a line break
    Enter,
    /// Delete the character left of the cursor
    Backspace,
    /// Delete the character right of the cursor
    Delete,
    /// Insert a space
    Space,
    /// Move the cursor one character left
    ArrowLeft,
    /// Move the cursor one character right
    ArrowRight,
    /// Move the cursor to the previous line
    ArrowUp,
    /// Move the cursor to the next line
    ArrowDown,
}

impl FunctionKeyKind {
    /// Maps a key code to its editing operation.
    ///
    /// Returns `None` for function keys without one (modifiers, Meta, ...).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let kind = match code {
            "Tab" => Self::Tab,
            "Enter" | "NumpadEnter" => Self::Enter,
            "Backspace" => Self::Backspace,
            "Delete" => Self::Delete,
            "Space" => Self::Space,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            _ => return None,
        };
        Some(kind)
    }
}
