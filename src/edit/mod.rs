// SPDX-License-Identifier: GPL-3.0-only

//! Cursor-aware text editing.
//!
//! Function keys map onto [`EditOp::Function`]; every other key that resolves to
//! a glyph becomes [`EditOp::Insert`]. Key-up edges never reach this module.

pub mod buffer;

pub use buffer::{apply_edit, EditBuffer, EditOp, TextSurface};
