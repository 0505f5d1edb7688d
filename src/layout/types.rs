// SPDX-License-Identifier: GPL-3.0-only

//! Core data types for keyboard layout tables.
//!
//! This module defines the layout table consumed by the input engine (language
//! codes, key descriptors, physical rows), the provider trait the dispatcher reads
//! it through, and the error and validation types produced while loading it.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================================================
// Error Handling Types
// ============================================================================

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal error that prevents the table from being used
    Error,
    /// Non-fatal issue that was repaired during validation
    Warning,
}

/// A validation issue discovered while loading a layout table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Severity level (Error or Warning)
    pub severity: Severity,
    /// Human-readable description of the issue
    pub message: String,
    /// Path to the field that caused the issue (e.g., "languages[ru].keys[3]")
    pub field_path: String,
    /// Optional suggestion for how to fix the issue
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Creates a new validation issue.
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        field_path: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            field_path: field_path.into(),
            suggestion: None,
        }
    }

    /// Creates a warning-level issue.
    pub fn warning(message: impl Into<String>, field_path: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message, field_path)
    }

    /// Adds a suggestion to the validation issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity_str = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        };

        write!(f, "[{}] {}: {}", severity_str, self.field_path, self.message)?;

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Error type for layout loading operations.
#[derive(Debug)]
pub enum ParseError {
    /// I/O error occurred while reading a layout file
    IoError {
        /// The underlying I/O error
        source: std::io::Error,
        /// Optional file path that caused the error
        file_path: Option<String>,
        /// Optional suggestion for fixing the error
        suggestion: Option<String>,
    },

    /// JSON parsing error
    JsonError {
        /// The underlying JSON parsing error
        source: serde_json::Error,
        /// Optional file path being parsed
        file_path: Option<String>,
        /// Line number where the error occurred (from serde_json)
        line_number: Option<usize>,
        /// Optional suggestion for fixing the error
        suggestion: Option<String>,
    },

    /// Validation found a fatal problem with the table
    ValidationError {
        /// List of validation issues found
        issues: Vec<ValidationIssue>,
        /// Optional file path being validated
        file_path: Option<String>,
    },

    /// A built-in layout asset is not present in the binary
    AssetMissing {
        /// Name of the embedded asset
        name: String,
    },
}

impl ParseError {
    /// Creates an I/O error with file path.
    pub fn io_error_with_path(source: std::io::Error, file_path: impl Into<String>) -> Self {
        Self::IoError {
            source,
            file_path: Some(file_path.into()),
            suggestion: Some("Check that the file exists and you have read permissions".into()),
        }
    }

    /// Creates a JSON parsing error with context.
    pub fn json_error(source: serde_json::Error) -> Self {
        let line_number = source.line().into();
        Self::JsonError {
            source,
            file_path: None,
            line_number,
            suggestion: Some("Check the JSON syntax at the indicated line".into()),
        }
    }

    /// Creates a JSON parsing error with file path.
    pub fn json_error_with_path(
        source: serde_json::Error,
        file_path: impl Into<String>,
    ) -> Self {
        let line_number = source.line().into();
        Self::JsonError {
            source,
            file_path: Some(file_path.into()),
            line_number,
            suggestion: Some("Check the JSON syntax at the indicated line".into()),
        }
    }

    /// Creates a validation error from a list of issues.
    pub fn validation_error(issues: Vec<ValidationIssue>) -> Self {
        Self::ValidationError {
            issues,
            file_path: None,
        }
    }

    /// Attaches a file path to errors that were raised without one.
    pub fn with_path(self, path: &str) -> Self {
        match self {
            ParseError::ValidationError {
                issues,
                file_path: None,
            } => ParseError::ValidationError {
                issues,
                file_path: Some(path.to_string()),
            },
            other => other,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::IoError {
                source,
                file_path,
                suggestion,
            } => {
                write!(f, "I/O error")?;
                if let Some(path) = file_path {
                    write!(f, " reading file '{}'", path)?;
                }
                write!(f, ": {}", source)?;
                if let Some(hint) = suggestion {
                    write!(f, "\n  Suggestion: {}", hint)?;
                }
            }
            ParseError::JsonError {
                source,
                file_path,
                line_number,
                suggestion,
            } => {
                write!(f, "JSON parsing error")?;
                if let Some(path) = file_path {
                    write!(f, " in file '{}'", path)?;
                }
                if let Some(line) = line_number {
                    write!(f, " at line {}", line)?;
                }
                write!(f, ": {}", source)?;
                if let Some(hint) = suggestion {
                    write!(f, "\n  Suggestion: {}", hint)?;
                }
            }
            ParseError::ValidationError { issues, file_path } => {
                write!(f, "Validation failed")?;
                if let Some(path) = file_path {
                    write!(f, " for file '{}'", path)?;
                }
                writeln!(f, " with {} issue(s):", issues.len())?;
                for (i, issue) in issues.iter().enumerate() {
                    write!(f, "  {}. {}", i + 1, issue)?;
                    if i + 1 < issues.len() {
                        writeln!(f)?;
                    }
                }
            }
            ParseError::AssetMissing { name } => {
                write!(f, "Built-in layout asset '{}' is missing", name)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::IoError { source, .. } => Some(source),
            ParseError::JsonError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::json_error(err)
    }
}

// ============================================================================
// ParseResult Type
// ============================================================================

/// Result of successfully loading a layout table with optional warnings.
///
/// Loading is permissive: the table is repaired where possible and the repairs
/// are reported here instead of failing the load.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult<T> {
    /// The successfully parsed layout
    pub layout: T,
    /// Non-fatal validation warnings
    pub warnings: Vec<ValidationIssue>,
}

impl<T> ParseResult<T> {
    /// Creates a new parse result with warnings.
    pub fn with_warnings(layout: T, warnings: Vec<ValidationIssue>) -> Self {
        Self { layout, warnings }
    }

    /// Returns true if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Consumes the result and returns the layout, discarding warnings.
    pub fn into_layout(self) -> T {
        self.layout
    }
}

// ============================================================================
// Layout Data Structures
// ============================================================================

/// Opaque identifier of a keyboard language (e.g. `"en"`, `"ru"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Creates a language code from any string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

/// One key of one language's layout.
///
/// `code` identifies the physical key position and is unique within a
/// language. `small` is the unshifted glyph (or the label of a function key),
/// `shift` the shifted glyph when the key has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDescriptor {
    /// Physical key code (e.g. "KeyQ", "ShiftLeft")
    pub code: String,

    /// Unshifted glyph
    #[serde(default)]
    pub small: String,

    /// Shifted glyph, if any. An empty string reads as no glyph.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub shift: Option<String>,

    /// Whether the key performs an action instead of typing a glyph
    #[serde(default, rename = "fn", alias = "isFnKey")]
    pub is_fn_key: bool,
}

impl KeyDescriptor {
    /// Creates a glyph key.
    pub fn glyph(code: impl Into<String>, small: impl Into<String>, shift: Option<&str>) -> Self {
        Self {
            code: code.into(),
            small: small.into(),
            shift: shift.filter(|s| !s.is_empty()).map(str::to_string),
            is_fn_key: false,
        }
    }

    /// Creates a function key labelled `label`.
    pub fn function(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            small: label.into(),
            shift: None,
            is_fn_key: true,
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let glyph = Option::<String>::deserialize(deserializer)?;
    Ok(glyph.filter(|s| !s.is_empty()))
}

/// The key list of a single language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageLayout {
    /// Language identifier
    pub code: LanguageCode,

    /// Human-readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Ordered key descriptors
    #[serde(default)]
    pub keys: Vec<KeyDescriptor>,
}

/// Immutable mapping from language code to key descriptors.
///
/// Languages keep the order in which they were declared; that order drives
/// language cycling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutTable {
    /// Table name
    #[serde(default)]
    pub name: String,

    /// Physical key arrangement, row by row
    #[serde(default)]
    pub rows: Vec<Vec<String>>,

    /// Languages in cycling order
    #[serde(default)]
    pub languages: Vec<LanguageLayout>,
}

impl LayoutTable {
    /// Returns the layout for `code`, if the table defines it.
    pub fn language(&self, code: &LanguageCode) -> Option<&LanguageLayout> {
        self.languages.iter().find(|l| &l.code == code)
    }
}

/// Read-only access to layout data, as consumed by the input dispatcher.
pub trait LayoutProvider {
    /// Returns the key descriptors of `code`, or an empty slice when unknown.
    fn keys(&self, code: &LanguageCode) -> &[KeyDescriptor];

    /// Returns all language codes in cycling order.
    fn language_codes(&self) -> Vec<LanguageCode>;

    /// Returns the physical row arrangement (may be empty).
    fn rows(&self) -> &[Vec<String>] {
        &[]
    }
}

impl LayoutProvider for LayoutTable {
    fn keys(&self, code: &LanguageCode) -> &[KeyDescriptor] {
        self.language(code).map(|l| l.keys.as_slice()).unwrap_or(&[])
    }

    fn language_codes(&self) -> Vec<LanguageCode> {
        self.languages.iter().map(|l| l.code.clone()).collect()
    }

    fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}
