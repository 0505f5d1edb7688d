// SPDX-License-Identifier: GPL-3.0-only

//! Runtime state of the physical keys.

use crate::layout::{KeyDescriptor, LanguageCode, LayoutProvider};
use std::collections::HashMap;

/// Runtime record of one physical key.
///
/// Identity is the `code`; the glyphs are refreshed from the active language
/// when it changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyState {
    /// Physical key code
    pub code: String,
    /// Unshifted glyph or function key label
    pub small: String,
    /// Shifted glyph, if any
    pub shift: Option<String>,
    /// Whether the key performs an action instead of typing
    pub is_fn_key: bool,
    /// Whether the key is drawn as pressed
    pub active: bool,
}

impl KeyState {
    /// Creates an idle glyph key.
    pub fn glyph(code: impl Into<String>, small: impl Into<String>, shift: Option<&str>) -> Self {
        Self::from_descriptor(&KeyDescriptor::glyph(code, small, shift))
    }

    /// Creates an idle function key.
    pub fn function(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self::from_descriptor(&KeyDescriptor::function(code, label))
    }

    /// Creates an idle key from a layout descriptor.
    pub fn from_descriptor(descriptor: &KeyDescriptor) -> Self {
        Self {
            code: descriptor.code.clone(),
            small: descriptor.small.clone(),
            shift: descriptor.shift.clone(),
            is_fn_key: descriptor.is_fn_key,
            active: false,
        }
    }

    /// Copies glyphs and the function flag from `descriptor`, keeping `active`.
    pub fn refresh(&mut self, descriptor: &KeyDescriptor) {
        self.small.clone_from(&descriptor.small);
        self.shift.clone_from(&descriptor.shift);
        self.is_fn_key = descriptor.is_fn_key;
    }
}

/// The ordered set of physical keys, indexed by code.
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    keys: Vec<KeyState>,
    index: HashMap<String, usize>,
}

impl KeySet {
    /// Builds the key set for `language`.
    ///
    /// Keys follow the provider's row arrangement, skipping row codes the
    /// language does not define. Without rows, the language's own key order
    /// is used.
    pub fn build(layouts: &dyn LayoutProvider, language: &LanguageCode) -> Self {
        let descriptors = layouts.keys(language);
        let rows = layouts.rows();

        let ordered: Vec<&KeyDescriptor> = if rows.iter().all(Vec::is_empty) {
            descriptors.iter().collect()
        } else {
            rows.iter()
                .flatten()
                .filter_map(|code| descriptors.iter().find(|d| &d.code == code))
                .collect()
        };

        let mut set = Self::default();
        for descriptor in ordered {
            set.push(KeyState::from_descriptor(descriptor));
        }
        set
    }

    fn push(&mut self, key: KeyState) {
        if self.index.contains_key(&key.code) {
            return;
        }
        self.index.insert(key.code.clone(), self.keys.len());
        self.keys.push(key);
    }

    /// Refreshes every key that `descriptors` defines, matched by code.
    ///
    /// Keys the new language does not define keep their previous glyphs.
    /// Returns the number of keys refreshed.
    pub fn refresh(&mut self, descriptors: &[KeyDescriptor]) -> usize {
        let mut refreshed = 0;
        for descriptor in descriptors {
            if let Some(&idx) = self.index.get(&descriptor.code) {
                self.keys[idx].refresh(descriptor);
                refreshed += 1;
            }
        }
        refreshed
    }

    /// Returns `true` if a key with `code` exists.
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Returns the key with `code`.
    pub fn get(&self, code: &str) -> Option<&KeyState> {
        self.index.get(code).map(|&idx| &self.keys[idx])
    }

    /// Returns the key with `code` mutably.
    pub fn get_mut(&mut self, code: &str) -> Option<&mut KeyState> {
        self.index.get(code).map(|&idx| &mut self.keys[idx])
    }

    /// Iterates keys in layout order.
    pub fn iter(&self) -> impl Iterator<Item = &KeyState> {
        self.keys.iter()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LanguageLayout, LayoutTable};

    fn table(rows: Vec<Vec<String>>) -> LayoutTable {
        LayoutTable {
            name: "test".into(),
            rows,
            languages: vec![
                LanguageLayout {
                    code: "en".into(),
                    name: None,
                    keys: vec![
                        KeyDescriptor::glyph("KeyQ", "q", Some("Q")),
                        KeyDescriptor::glyph("KeyW", "w", Some("W")),
                        KeyDescriptor::glyph("IntlBackslash", "\\", Some("|")),
                    ],
                },
                LanguageLayout {
                    code: "ru".into(),
                    name: None,
                    keys: vec![
                        KeyDescriptor::glyph("KeyW", "ц", Some("Ц")),
                        KeyDescriptor::glyph("KeyQ", "й", Some("Й")),
                    ],
                },
            ],
        }
    }

    #[test]
    fn test_build_follows_rows_and_skips_missing() {
        let layouts = table(vec![vec!["KeyW".into(), "KeyE".into(), "KeyQ".into()]]);
        let set = KeySet::build(&layouts, &"en".into());

        let codes: Vec<&str> = set.iter().map(|k| k.code.as_str()).collect();
        assert_eq!(codes, vec!["KeyW", "KeyQ"]);
        assert!(!set.contains("IntlBackslash"));
    }

    #[test]
    fn test_build_without_rows_uses_language_order() {
        let layouts = table(Vec::new());
        let set = KeySet::build(&layouts, &"en".into());
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().next().unwrap().code, "KeyQ");
    }

    #[test]
    fn test_refresh_matches_by_code_and_keeps_absent_keys() {
        let layouts = table(Vec::new());
        let mut set = KeySet::build(&layouts, &"en".into());
        set.get_mut("KeyQ").unwrap().active = true;

        let refreshed = set.refresh(layouts.keys(&"ru".into()));
        assert_eq!(refreshed, 2);

        let q = set.get("KeyQ").unwrap();
        assert_eq!(q.small, "й");
        assert!(q.active, "Refresh must not touch the active flag");

        let intl = set.get("IntlBackslash").unwrap();
        assert_eq!(intl.small, "\\", "Keys absent from the new layout are unchanged");
    }
}
