// SPDX-License-Identifier: GPL-3.0-only

//! Virtboard - an on-screen keyboard input engine
//!
//! This crate interprets key and pointer edges for an on-screen keyboard that
//! mirrors a physical one. It tracks Shift, Ctrl, Alt and Caps Lock, switches
//! layout languages with Ctrl+Alt, and edits a text buffer at the cursor.
//!
//! # Architecture
//!
//! Every raw event is normalized to an [`input::InputEvent`] and handed to a
//! [`keyboard::InputDispatcher`], which:
//!
//! 1. updates the modifier flags,
//! 2. checks for the language switch,
//! 3. resolves the key to a glyph or an editing operation,
//! 4. applies it to the text surface,
//! 5. returns the visual deltas for the render surface.
//!
//! # Modules
//!
//! - `app_settings`: Centralized application constants
//! - `config`: User configuration loaded from JSON
//! - `edit`: Text surface trait, in-memory buffer and editing operations
//! - `input`: Event type, key code classification, modifiers, symbol resolution
//! - `keyboard`: Key records, visual deltas and the dispatcher
//! - `layout`: Layout tables, loading, validation and language cycling
//! - `session`: Channel-fed event loop
//! - `storage`: Persistent preferences (last-used language)

pub mod app_settings;
pub mod config;
pub mod edit;
pub mod input;
pub mod keyboard;
pub mod layout;
pub mod session;
pub mod storage;

// ============================================================================
// Integration Tests
// ============================================================================
