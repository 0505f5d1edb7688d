// SPDX-License-Identifier: GPL-3.0-only

//! Layout tables for the on-screen keyboard.
//!
//! A layout table maps each language to an ordered list of key descriptors and
//! records the physical arrangement of keys in rows. Tables are loaded once at
//! startup, either from a JSON file or from the built-in assets, and never change
//! afterwards.
//!
//! # Features
//!
//! - **JSON tables**: languages, key descriptors and rows in one file
//! - **Built-in layouts**: English and Russian standard keyboards embedded in the binary
//! - **Permissive validation**: duplicate or empty entries are dropped with a warning
//! - **Language cycling**: [`next_language`] walks languages in declaration order
//!
//! # Example
//!
//! ```rust,ignore
//! use virtboard::layout::{load_builtin_layouts, LayoutProvider};
//!
//! let table = load_builtin_layouts()?.into_layout();
//! for code in table.language_codes() {
//!     println!("{}: {} keys", code, table.keys(&code).len());
//! }
//! ```
//!
//! # File Format
//!
//! ```json
//! {
//!     "name": "Standard",
//!     "rows": [["KeyQ", "KeyW"]],
//!     "languages": [
//!         {
//!             "code": "en",
//!             "keys": [
//!                 {"code": "KeyQ", "small": "q", "shift": "Q"},
//!                 {"code": "Tab", "small": "Tab", "fn": true}
//!             ]
//!         }
//!     ]
//! }
//! ```

// Sub-modules
pub mod language;
pub mod parser;
pub mod types;
pub mod validation;

// Re-export public API - Error handling types
pub use types::{ParseError, ParseResult, Severity, ValidationIssue};

// Re-export public API - Loading and cycling
pub use language::next_language;
pub use parser::{load_builtin_layouts, parse_layout_file, parse_layout_from_string};

// Re-export public API - Data structures
pub use types::{KeyDescriptor, LanguageCode, LanguageLayout, LayoutProvider, LayoutTable};
