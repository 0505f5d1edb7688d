// SPDX-License-Identifier: GPL-3.0-only

//! Validation rules for layout tables.
//!
//! This module implements permissive validation that repairs the table where it
//! can and reports each repair as a warning. Only a table with no languages at
//! all is rejected.

use crate::layout::types::{
    LayoutTable, ParseError, ParseResult, Severity, ValidationIssue,
};
use std::collections::HashSet;

/// Validates a layout table and returns the repaired table with warnings.
pub fn validate_layout(mut table: LayoutTable) -> Result<ParseResult<LayoutTable>, ParseError> {
    let mut warnings = Vec::new();

    if table.languages.is_empty() {
        return Err(ParseError::validation_error(vec![
            ValidationIssue::new(Severity::Error, "Layout table defines no languages", "languages")
                .with_suggestion("Add at least one entry to the 'languages' array"),
        ]));
    }

    dedupe_languages(&mut table, &mut warnings);
    clean_key_lists(&mut table, &mut warnings);
    validate_rows(&table, &mut warnings);

    if table.languages.iter().all(|l| l.keys.is_empty()) {
        return Err(ParseError::validation_error(vec![
            ValidationIssue::new(Severity::Error, "No language defines any keys", "languages")
                .with_suggestion("Add key descriptors to at least one language"),
        ]));
    }

    Ok(ParseResult::with_warnings(table, warnings))
}

/// Drops languages whose code repeats an earlier one.
fn dedupe_languages(table: &mut LayoutTable, warnings: &mut Vec<ValidationIssue>) {
    let mut seen = HashSet::new();
    table.languages.retain(|language| {
        if seen.insert(language.code.clone()) {
            return true;
        }
        warnings.push(
            ValidationIssue::warning(
                format!("Duplicate language '{}' ignored", language.code),
                format!("languages[{}]", language.code),
            )
            .with_suggestion("Give each language a unique code"),
        );
        false
    });
}

/// Drops keys with empty or repeated codes and flags empty key lists.
fn clean_key_lists(table: &mut LayoutTable, warnings: &mut Vec<ValidationIssue>) {
    for language in &mut table.languages {
        let path = format!("languages[{}]", language.code);
        let mut seen = HashSet::new();

        language.keys.retain(|key| {
            if key.code.is_empty() {
                warnings.push(ValidationIssue::warning(
                    "Key with empty code ignored",
                    format!("{}.keys", path),
                ));
                return false;
            }
            if !seen.insert(key.code.clone()) {
                warnings.push(
                    ValidationIssue::warning(
                        format!("Duplicate key code '{}' ignored", key.code),
                        format!("{}.keys[{}]", path, key.code),
                    )
                    .with_suggestion("Key codes must be unique within a language"),
                );
                return false;
            }
            true
        });

        if language.keys.is_empty() {
            warnings.push(
                ValidationIssue::warning("Language defines no keys", format!("{}.keys", path))
                    .with_suggestion("Switching to this language will be refused"),
            );
        }
    }
}

/// Flags row codes that no language defines, and keys that no row places.
///
/// A key outside every row never reaches the keyboard, so presses of it are
/// ignored.
fn validate_rows(table: &LayoutTable, warnings: &mut Vec<ValidationIssue>) {
    let known: HashSet<&str> = table
        .languages
        .iter()
        .flat_map(|l| l.keys.iter().map(|k| k.code.as_str()))
        .collect();

    for (row_idx, row) in table.rows.iter().enumerate() {
        for (col_idx, code) in row.iter().enumerate() {
            if !known.contains(code.as_str()) {
                warnings.push(ValidationIssue::warning(
                    format!("Row key '{}' is not defined by any language", code),
                    format!("rows[{}][{}]", row_idx, col_idx),
                ));
            }
        }
    }

    if table.rows.iter().all(Vec::is_empty) {
        return;
    }

    let placed: HashSet<&str> = table.rows.iter().flatten().map(String::as_str).collect();
    for language in &table.languages {
        for key in &language.keys {
            if !placed.contains(key.code.as_str()) {
                warnings.push(
                    ValidationIssue::warning(
                        format!("Key '{}' is not placed in any row", key.code),
                        format!("languages[{}].keys[{}]", language.code, key.code),
                    )
                    .with_suggestion("Add the key code to 'rows' or it cannot be pressed"),
                );
            }
        }
    }
}
