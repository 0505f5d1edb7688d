// SPDX-License-Identifier: GPL-3.0-only

//! Layout loading from JSON files, strings and the built-in assets.

use crate::layout::types::{LayoutTable, ParseError, ParseResult};
use crate::layout::validation::validate_layout;
use rust_embed::RustEmbed;
use std::fs;
use std::path::Path;

/// Name of the built-in layout asset.
pub const BUILTIN_LAYOUT: &str = "standard.json";

#[derive(RustEmbed)]
#[folder = "resources/layouts/"]
struct LayoutAssets;

/// Parses a layout table from a JSON file.
///
/// I/O errors (file not found, permission denied) and JSON errors (with line
/// number) are reported separately. After parsing, the table is validated and
/// repaired; repairs come back as warnings.
///
/// # Example
///
/// ```rust,ignore
/// use std::path::Path;
/// use virtboard::layout::parse_layout_file;
///
/// match parse_layout_file(Path::new("layouts/standard.json")) {
///     Ok(result) => {
///         for warning in &result.warnings {
///             eprintln!("{}", warning);
///         }
///         let table = result.into_layout();
///     }
///     Err(e) => eprintln!("Failed to load layout: {}", e),
/// }
/// ```
pub fn parse_layout_file(path: &Path) -> Result<ParseResult<LayoutTable>, ParseError> {
    let display = path.display().to_string();
    let json_str = fs::read_to_string(path)
        .map_err(|e| ParseError::io_error_with_path(e, display.as_str()))?;

    let table: LayoutTable = serde_json::from_str(&json_str)
        .map_err(|e| ParseError::json_error_with_path(e, display.as_str()))?;

    validate_layout(table).map_err(|e| e.with_path(&display))
}

/// Parses a layout table from a JSON string.
pub fn parse_layout_from_string(json: &str) -> Result<ParseResult<LayoutTable>, ParseError> {
    let table: LayoutTable = serde_json::from_str(json).map_err(ParseError::json_error)?;

    validate_layout(table)
}

/// Loads the layout table compiled into the binary.
pub fn load_builtin_layouts() -> Result<ParseResult<LayoutTable>, ParseError> {
    let asset = LayoutAssets::get(BUILTIN_LAYOUT).ok_or_else(|| ParseError::AssetMissing {
        name: BUILTIN_LAYOUT.to_string(),
    })?;

    let table: LayoutTable = serde_json::from_slice(&asset.data)?;

    validate_layout(table)
}
