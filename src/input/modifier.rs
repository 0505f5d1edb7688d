// SPDX-License-Identifier: GPL-3.0-only

//! Modifier state tracking for keyboard input.
//!
//! Shift, Control and Alt are held modifiers: they are active between their
//! key-down and key-up edges. Caps Lock is a latch that flips on each of its own
//! key-down edges and ignores key-up.
//!
//! # Example
//!
//! ```rust,ignore
//! use virtboard::input::{ModifierState, Phase};
//!
//! let state = ModifierState::new()
//!     .apply("ShiftLeft", Phase::Down)
//!     .apply("CapsLock", Phase::Down);
//!
//! assert!(state.shift_held && state.caps_lock_on);
//! ```

use crate::input::event::Phase;
use crate::input::keycode::ModifierKey;

/// Snapshot of the modifier flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierState {
    /// A Shift key is held
    pub shift_held: bool,
    /// A Control key is held
    pub ctrl_held: bool,
    /// An Alt key is held
    pub alt_held: bool,
    /// Caps Lock is latched on
    pub caps_lock_on: bool,
}

impl ModifierState {
    /// Creates a state with every modifier released.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state after an edge for `code`.
    ///
    /// Codes that are not modifiers leave the state unchanged, as does any
    /// [`Phase::Leave`].
    #[must_use]
    pub fn apply(self, code: &str, phase: Phase) -> Self {
        let Some(modifier) = ModifierKey::from_code(code) else {
            return self;
        };

        let down = match phase {
            Phase::Down => true,
            Phase::Up => false,
            Phase::Leave => return self,
        };

        let mut next = self;
        match modifier {
            ModifierKey::Shift => next.shift_held = down,
            ModifierKey::Control => next.ctrl_held = down,
            ModifierKey::Alt => next.alt_held = down,
            ModifierKey::CapsLock => {
                if down {
                    next.caps_lock_on = !next.caps_lock_on;
                }
            }
        }
        next
    }

    /// Returns `true` if `modifier` is held (or latched, for Caps Lock).
    #[must_use]
    pub fn is_active(&self, modifier: ModifierKey) -> bool {
        match modifier {
            ModifierKey::Shift => self.shift_held,
            ModifierKey::Control => self.ctrl_held,
            ModifierKey::Alt => self.alt_held,
            ModifierKey::CapsLock => self.caps_lock_on,
        }
    }

    /// Returns `true` if the flags that change glyph case differ from `other`.
    #[must_use]
    pub fn case_differs(&self, other: &Self) -> bool {
        self.shift_held != other.shift_held || self.caps_lock_on != other.caps_lock_on
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
