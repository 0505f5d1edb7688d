// SPDX-License-Identifier: GPL-3.0-only

//! Symbol resolution: which glyph a key types under the current modifiers.
//!
//! A key whose shifted glyph is punctuation (a "sub-symbol") is governed by
//! Shift alone, as on a physical keyboard. Keys whose shifted glyph is a letter
//! or digit follow the usual Caps Lock XOR Shift rule.
//!
//! | caps | shift | sub-symbol | result |
//! |------|-------|------------|--------|
//! | off  | off   | any        | small  |
//! | off  | on    | any        | shift  |
//! | on   | off   | yes        | small  |
//! | on   | off   | no         | shift  |
//! | on   | on    | yes        | shift  |
//! | on   | on    | no         | small  |

use crate::input::modifier::ModifierState;
use crate::keyboard::keys::KeyState;

/// Returns `true` for characters that count as letters or digits.
///
/// Only ASCII and Cyrillic letters and ASCII digits qualify.
fn is_alphanumeric_glyph(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё')
}

/// Returns `true` if `shift` is a sub-symbol, i.e. it contains a character that
/// is neither a letter nor a digit.
#[must_use]
pub fn has_sub_symbol(shift: Option<&str>) -> bool {
    shift.is_some_and(|glyph| glyph.chars().any(|c| !is_alphanumeric_glyph(c)))
}

/// Returns the text a glyph key inserts, or `None` for function keys.
///
/// Missing or empty shifted glyphs fall back to the unshifted one.
#[must_use]
pub fn resolve_symbol<'a>(key: &'a KeyState, modifiers: &ModifierState) -> Option<&'a str> {
    if key.is_fn_key {
        return None;
    }

    let shift = key.shift.as_deref().filter(|s| !s.is_empty());
    // Caps Lock never shifts punctuation.
    let shifted = if has_sub_symbol(shift) {
        modifiers.shift_held
    } else {
        modifiers.shift_held != modifiers.caps_lock_on
    };

    if shifted {
        Some(shift.unwrap_or(&key.small))
    } else {
        Some(&key.small)
    }
}

/// Returns the (primary, sub) glyphs a key should display right now.
///
/// The primary glyph is what the key would type; function keys show their
/// label. Sub-symbol keys also show the glyph they are not currently typing.
#[must_use]
pub fn display_glyphs(key: &KeyState, modifiers: &ModifierState) -> (String, Option<String>) {
    let Some(primary) = resolve_symbol(key, modifiers) else {
        return (key.small.clone(), None);
    };

    let shift = key.shift.as_deref().filter(|s| !s.is_empty());
    let sub = if !has_sub_symbol(shift) {
        None
    } else if primary == key.small {
        shift.map(str::to_string)
    } else {
        Some(key.small.clone())
    };

    (primary.to_string(), sub)
}
