// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard session state and event dispatch.
//!
//! # Architecture
//!
//! - [`InputDispatcher`] owns the session: key records, modifier flags, the text
//!   surface and the active language
//! - [`KeySet`] holds one [`KeyState`] per physical key, stable across language
//!   switches
//! - [`VisualDelta`] values describe what the render surface must redraw
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use virtboard::edit::EditBuffer;
//! use virtboard::input::InputEvent;
//! use virtboard::keyboard::InputDispatcher;
//! use virtboard::layout::load_builtin_layouts;
//! use virtboard::storage::MemoryStore;
//!
//! let layouts = load_builtin_layouts()?.into_layout();
//! let mut dispatcher =
//!     InputDispatcher::new(layouts, MemoryStore::new(), &"en".into(), EditBuffer::new())?;
//!
//! let deltas = dispatcher.handle(&InputEvent::key_down("KeyQ"));
//! ```

pub mod delta;
pub mod dispatcher;
pub mod keys;

pub use delta::{GlyphDelta, JsonLinesSurface, RenderSurface, VisualDelta};
pub use dispatcher::{DispatchError, InputDispatcher};
pub use keys::{KeySet, KeyState};
