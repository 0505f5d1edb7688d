// SPDX-License-Identifier: GPL-3.0-only

//! Language cycling.

use crate::layout::types::LanguageCode;

/// Returns the language that follows `current` in `languages`, wrapping to the
/// first one after the last.
///
/// A `current` that is not in the list also yields the first language. Returns
/// `None` only when `languages` is empty.
pub fn next_language<'a>(
    languages: &'a [LanguageCode],
    current: &LanguageCode,
) -> Option<&'a LanguageCode> {
    let next = match languages.iter().position(|code| code == current) {
        Some(index) if index + 1 < languages.len() => index + 1,
        _ => 0,
    };
    languages.get(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<LanguageCode> {
        list.iter().map(|c| LanguageCode::from(*c)).collect()
    }

    #[test]
    fn test_next_advances_and_wraps() {
        let languages = codes(&["en", "ru"]);
        assert_eq!(next_language(&languages, &"en".into()), Some(&languages[1]));
        assert_eq!(next_language(&languages, &"ru".into()), Some(&languages[0]));
    }

    #[test]
    fn test_cycling_returns_to_start() {
        let languages = codes(&["en", "ru", "de", "uk"]);
        let start = LanguageCode::from("de");

        let mut current = start.clone();
        for _ in 0..languages.len() {
            current = next_language(&languages, &current).unwrap().clone();
        }
        assert_eq!(current, start);
    }

    #[test]
    fn test_single_language_maps_to_itself() {
        let languages = codes(&["en"]);
        assert_eq!(next_language(&languages, &"en".into()), Some(&languages[0]));
    }

    #[test]
    fn test_unknown_current_and_empty_list() {
        let languages = codes(&["en", "ru"]);
        assert_eq!(next_language(&languages, &"fr".into()), Some(&languages[0]));
        assert_eq!(next_language(&[], &"en".into()), None);
    }
}
