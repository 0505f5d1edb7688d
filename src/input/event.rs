// SPDX-License-Identifier: GPL-3.0-only

//! Normalized input events.
//!
//! Keyboard and pointer input reach the dispatcher in one shape: the code of the
//! key involved, the phase of the edge, and where it came from. Hosts translate
//! their native events into [`InputEvent`] before handing them over.

use serde::{Deserialize, Serialize};

/// Edge of a key interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Key went down (or auto-repeated).
    Down,
    /// Key was released.
    Up,
    /// Pointer left the pressed key before release. Affects visual state only.
    Leave,
}

/// Origin of an input event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Physical keyboard.
    #[default]
    Keyboard,
    /// Mouse or touch on an on-screen key.
    Pointer,
}

/// A normalized key event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Physical key code (e.g. "KeyA", "ShiftLeft").
    pub code: String,
    /// Edge of the interaction.
    pub phase: Phase,
    /// Where the event came from.
    #[serde(default)]
    pub source: Source,
}

impl InputEvent {
    /// Creates a new event.
    #[must_use]
    pub fn new(code: impl Into<String>, phase: Phase, source: Source) -> Self {
        Self {
            code: code.into(),
            phase,
            source,
        }
    }

    /// Creates a keyboard key-down event.
    #[must_use]
    pub fn key_down(code: impl Into<String>) -> Self {
        Self::new(code, Phase::Down, Source::Keyboard)
    }

    /// Creates a keyboard key-up event.
    #[must_use]
    pub fn key_up(code: impl Into<String>) -> Self {
        Self::new(code, Phase::Up, Source::Keyboard)
    }

    /// Creates a pointer press on an on-screen key.
    #[must_use]
    pub fn pointer_down(code: impl Into<String>) -> Self {
        Self::new(code, Phase::Down, Source::Pointer)
    }

    /// Creates a pointer release on an on-screen key.
    #[must_use]
    pub fn pointer_up(code: impl Into<String>) -> Self {
        Self::new(code, Phase::Up, Source::Pointer)
    }

    /// Creates a pointer-leave event for an on-screen key.
    #[must_use]
    pub fn pointer_leave(code: impl Into<String>) -> Self {
        Self::new(code, Phase::Leave, Source::Pointer)
    }
}
