// SPDX-License-Identifier: GPL-3.0-only

//! Centralized application settings and constants.

/// Application ID in RDNN (reverse domain name notation) format.
pub const APP_ID: &str = "io.github.cosboard.Virtboard";

/// Preference key holding the last-used language.
pub const LANGUAGE_STORAGE_KEY: &str = "kbLang";

/// Language used when nothing usable is stored.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Preference file used when none is configured.
pub const DEFAULT_STATE_FILE: &str = "virtboard-state.json";

/// Capacity of the input event channel between reader and dispatcher.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;
