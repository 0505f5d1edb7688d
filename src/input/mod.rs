// SPDX-License-Identifier: GPL-3.0-only

//! Input interpretation for the on-screen keyboard.
//!
//! This module turns raw key edges into decisions: how the modifier flags move,
//! whether a code names an editing operation, and which glyph a key types.
//!
//! # Features
//!
//! - **Normalized events**: keyboard and pointer input share one [`InputEvent`] shape
//! - **Code classification**: [`ModifierKey`] and [`FunctionKeyKind`] from key codes
//! - **Modifier tracking**: held Shift/Ctrl/Alt and latched Caps Lock in [`ModifierState`]
//! - **Symbol resolution**: [`resolve_symbol`] applies the Caps Lock and Shift policy
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use virtboard::input::{resolve_symbol, ModifierState, Phase};
//! use virtboard::keyboard::KeyState;
//!
//! let modifiers = ModifierState::new().apply("CapsLock", Phase::Down);
//! let key = KeyState::glyph("Semicolon", ";", Some(":"));
//!
//! // Caps Lock does not shift punctuation
//! assert_eq!(resolve_symbol(&key, &modifiers), Some(";"));
//! ```

// Sub-modules
pub mod event;
pub mod keycode;
pub mod modifier;
pub mod resolver;

// Re-export public API
pub use event::{InputEvent, Phase, Source};
pub use keycode::{FunctionKeyKind, ModifierKey};
pub use modifier::ModifierState;
pub use resolver::{display_glyphs, has_sub_symbol, resolve_symbol};

// ============================================================================
// Module Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::KeyState;

    /// Shift typed through the tracker reaches the resolver.
    #[test]
    fn test_shift_edges_drive_resolution() {
        let key = KeyState::glyph("KeyQ", "q", Some("Q"));

        let held = ModifierState::new().apply("ShiftRight", Phase::Down);
        assert_eq!(resolve_symbol(&key, &held), Some("Q"));

        let released = held.apply("ShiftRight", Phase::Up);
        assert_eq!(resolve_symbol(&key, &released), Some("q"));
    }

    /// Caps Lock and Shift cancel out on letters, in both languages.
    #[test]
    fn test_caps_and_shift_cancel_on_letters() {
        let modifiers = ModifierState::new()
            .apply("CapsLock", Phase::Down)
            .apply("CapsLock", Phase::Up)
            .apply("ShiftLeft", Phase::Down);

        let latin = KeyState::glyph("KeyQ", "q", Some("Q"));
        let cyrillic = KeyState::glyph("KeyQ", "й", Some("Й"));
        assert_eq!(resolve_symbol(&latin, &modifiers), Some("q"));
        assert_eq!(resolve_symbol(&cyrillic, &modifiers), Some("й"));
    }

    /// Digit keys carry punctuation on their shifted layer.
    #[test]
    fn test_digit_row_ignores_caps_lock() {
        let key = KeyState::glyph("Digit2", "2", Some("\""));
        let caps = ModifierState::new().apply("CapsLock", Phase::Down);

        assert_eq!(resolve_symbol(&key, &caps), Some("2"));
        assert_eq!(
            resolve_symbol(&key, &caps.apply("ShiftLeft", Phase::Down)),
            Some("\"")
        );
    }

    /// Modifier and function classifications are disjoint for editing keys.
    #[test]
    fn test_classifications_do_not_overlap() {
        for code in ["Tab", "Enter", "Backspace", "Delete", "Space", "ArrowLeft"] {
            assert!(FunctionKeyKind::from_code(code).is_some());
            assert!(ModifierKey::from_code(code).is_none());
        }
    }
}
