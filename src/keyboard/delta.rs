// SPDX-License-Identifier: GPL-3.0-only

//! Visual-state deltas reported to the render surface.

use crate::layout::LanguageCode;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Glyphs a key should display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphDelta {
    /// Physical key code
    pub code: String,
    /// What the key types right now, or the function key label
    pub primary: String,
    /// Alternate glyph of a sub-symbol key
    pub sub: Option<String>,
}

/// A change the render surface should draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VisualDelta {
    /// A key's pressed state changed.
    Active {
        /// Physical key code
        code: String,
        /// New pressed state
        active: bool,
    },
    /// A key's glyphs changed.
    Glyph(GlyphDelta),
    /// The active language changed.
    Language {
        /// New language
        code: LanguageCode,
    },
}

/// Receiver of visual deltas.
pub trait RenderSurface {
    /// Draws one delta.
    fn apply(&mut self, delta: &VisualDelta);

    /// Draws a batch of deltas in order.
    fn apply_all(&mut self, deltas: &[VisualDelta]) {
        for delta in deltas {
            self.apply(delta);
        }
    }
}

/// Records deltas, mostly for tests and embedding hosts that poll.
impl RenderSurface for Vec<VisualDelta> {
    fn apply(&mut self, delta: &VisualDelta) {
        self.push(delta.clone());
    }
}

/// Writes each delta as one line of JSON.
#[derive(Debug)]
pub struct JsonLinesSurface<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSurface<W> {
    /// Wraps `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes any serializable value as a JSON line and flushes.
    pub fn emit<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, value)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderSurface for JsonLinesSurface<W> {
    fn apply(&mut self, delta: &VisualDelta) {
        if let Err(e) = self.emit(delta) {
            tracing::warn!("Failed to write visual delta: {}", e);
        }
    }
}
