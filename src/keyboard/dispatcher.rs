// SPDX-License-Identifier: GPL-3.0-only

//! The input dispatcher: one entry point for every key edge.
//!
//! For each event the dispatcher updates the modifier flags, checks for the
//! Ctrl+Alt language switch, resolves the key to an edit, applies it to the text
//! surface and reports what changed visually. Events are handled one at a time
//! and each completes before the next is accepted.

use crate::app_settings::LANGUAGE_STORAGE_KEY;
use crate::edit::{apply_edit, EditBuffer, EditOp, TextSurface};
use crate::input::{
    display_glyphs, resolve_symbol, FunctionKeyKind, InputEvent, ModifierKey, ModifierState,
    Phase, Source,
};
use crate::keyboard::delta::{GlyphDelta, VisualDelta};
use crate::keyboard::keys::{KeySet, KeyState};
use crate::layout::{next_language, LanguageCode, LayoutProvider};
use crate::storage::PreferenceStore;
use std::fmt;

/// Error raised while selecting a language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The layout table has no language with keys
    NoLanguages,
    /// The requested language has no keys; the previous one stays active
    EmptyLayout(LanguageCode),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::NoLanguages => write!(f, "No language in the layout table has keys"),
            DispatchError::EmptyLayout(code) => {
                write!(f, "Language '{}' defines no keys", code)
            }
        }
    }
}

impl std::error::Error for DispatchError {}

/// Owns the keyboard session state and drives it from input events.
pub struct InputDispatcher<T: TextSurface = EditBuffer> {
    layouts: Box<dyn LayoutProvider>,
    store: Box<dyn PreferenceStore>,
    language: LanguageCode,
    keys: KeySet,
    modifiers: ModifierState,
    text: T,
}

impl<T: TextSurface> fmt::Debug for InputDispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputDispatcher")
            .field("language", &self.language)
            .field("keys", &self.keys.len())
            .field("modifiers", &self.modifiers)
            .field("cursor", &self.text.cursor())
            .finish()
    }
}

impl<T: TextSurface> InputDispatcher<T> {
    /// Creates a dispatcher for one session.
    ///
    /// The starting language is the stored preference when it names a language
    /// with keys, else `default_language` when usable, else the first usable
    /// language of the table.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NoLanguages`] if no language defines any key.
    pub fn new(
        layouts: impl LayoutProvider + 'static,
        store: impl PreferenceStore + 'static,
        default_language: &LanguageCode,
        text: T,
    ) -> Result<Self, DispatchError> {
        let language = initial_language(&layouts, &store, default_language)?;
        let keys = KeySet::build(&layouts, &language);

        tracing::info!("Keyboard ready: language={}, keys={}", language, keys.len());

        Ok(Self {
            layouts: Box::new(layouts),
            store: Box::new(store),
            language,
            keys,
            modifiers: ModifierState::new(),
            text,
        })
    }

    /// Active language.
    pub fn language(&self) -> &LanguageCode {
        &self.language
    }

    /// Current modifier flags.
    pub fn modifiers(&self) -> ModifierState {
        self.modifiers
    }

    /// Runtime key records in layout order.
    pub fn keys(&self) -> &KeySet {
        &self.keys
    }

    /// Runtime record of the key with `code`.
    pub fn key(&self, code: &str) -> Option<&KeyState> {
        self.keys.get(code)
    }

    /// The text surface being edited.
    pub fn text(&self) -> &T {
        &self.text
    }

    /// Glyph deltas for every key, for an initial render.
    pub fn glyphs(&self) -> Vec<VisualDelta> {
        self.keys
            .iter()
            .map(|key| glyph_delta(key, &self.modifiers))
            .collect()
    }

    /// Handles one input event and returns the visual changes it caused.
    ///
    /// Events for codes without a key are ignored, as is a leave that did not
    /// come from the pointer.
    pub fn handle(&mut self, event: &InputEvent) -> Vec<VisualDelta> {
        if !self.keys.contains(&event.code) {
            tracing::trace!("Ignoring {:?} for unknown key '{}'", event.phase, event.code);
            return Vec::new();
        }

        let mut deltas = Vec::new();
        match event.phase {
            Phase::Down => self.key_down(&event.code, &mut deltas),
            Phase::Up => self.key_up(&event.code, &mut deltas),
            Phase::Leave if event.source == Source::Pointer => {
                self.pointer_leave(&event.code, &mut deltas)
            }
            Phase::Leave => {
                tracing::trace!("Ignoring leave from {:?} for '{}'", event.source, event.code);
            }
        }
        deltas
    }

    /// Switches to the next language in table order.
    ///
    /// On success the new language is persisted and every key's glyphs are
    /// reported. A target language without keys leaves the session unchanged.
    pub fn cycle_language(&mut self) -> Result<Vec<VisualDelta>, DispatchError> {
        let codes = self.layouts.language_codes();
        let next = next_language(&codes, &self.language)
            .cloned()
            .ok_or(DispatchError::NoLanguages)?;

        let descriptors = self.layouts.keys(&next);
        if descriptors.is_empty() {
            return Err(DispatchError::EmptyLayout(next));
        }

        let refreshed = self.keys.refresh(descriptors);
        tracing::info!(
            "Switched language {} -> {} ({} keys refreshed)",
            self.language,
            next,
            refreshed
        );
        self.language = next;

        if let Err(e) = self.store.set(LANGUAGE_STORAGE_KEY, self.language.as_str()) {
            tracing::warn!("Failed to save language preference: {}", e);
        }

        let mut deltas = vec![VisualDelta::Language {
            code: self.language.clone(),
        }];
        deltas.extend(self.glyphs());
        Ok(deltas)
    }

    fn key_down(&mut self, code: &str, deltas: &mut Vec<VisualDelta>) {
        let before = self.modifiers;
        self.modifiers = before.apply(code, Phase::Down);

        let modifier = ModifierKey::from_code(code);
        // Only the edge that completes Ctrl+Alt switches; auto-repeat does not.
        let switch = match modifier {
            Some(ModifierKey::Control) => {
                !before.is_active(ModifierKey::Control)
                    && self.modifiers.is_active(ModifierKey::Alt)
            }
            Some(ModifierKey::Alt) => {
                !before.is_active(ModifierKey::Alt)
                    && self.modifiers.is_active(ModifierKey::Control)
            }
            _ => false,
        };

        if switch {
            match self.cycle_language() {
                Ok(switched) => deltas.extend(switched),
                Err(e) => tracing::warn!("Language switch aborted: {}", e),
            }
        } else if let Some(op) = self.edit_for(code) {
            apply_edit(&mut self.text, &op);
            tracing::debug!("Applied {:?}, cursor={}", op, self.text.cursor());
        }

        let active = match modifier {
            Some(ModifierKey::CapsLock) => self.modifiers.caps_lock_on,
            _ => true,
        };
        self.set_active(code, active, deltas);
        self.refresh_case(&before, deltas);
    }

    fn key_up(&mut self, code: &str, deltas: &mut Vec<VisualDelta>) {
        let before = self.modifiers;
        self.modifiers = before.apply(code, Phase::Up);

        if ModifierKey::from_code(code) != Some(ModifierKey::CapsLock) {
            self.set_active(code, false, deltas);
        }
        self.refresh_case(&before, deltas);
    }

    /// Clears the pressed look without touching modifiers.
    fn pointer_leave(&mut self, code: &str, deltas: &mut Vec<VisualDelta>) {
        if ModifierKey::from_code(code) != Some(ModifierKey::CapsLock) {
            self.set_active(code, false, deltas);
        }
    }

    fn edit_for(&self, code: &str) -> Option<EditOp> {
        let key = self.keys.get(code)?;
        if key.is_fn_key {
            return FunctionKeyKind::from_code(code).map(EditOp::Function);
        }
        resolve_symbol(key, &self.modifiers)
            .filter(|symbol| !symbol.is_empty())
            .map(|symbol| EditOp::Insert(symbol.to_string()))
    }

    fn set_active(&mut self, code: &str, active: bool, deltas: &mut Vec<VisualDelta>) {
        if let Some(key) = self.keys.get_mut(code) {
            if key.active != active {
                key.active = active;
                deltas.push(VisualDelta::Active {
                    code: code.to_string(),
                    active,
                });
            }
        }
    }

    /// Reports keys whose glyphs changed with Shift or Caps Lock.
    fn refresh_case(&self, before: &ModifierState, deltas: &mut Vec<VisualDelta>) {
        if !before.case_differs(&self.modifiers) {
            return;
        }
        for key in self.keys.iter() {
            if display_glyphs(key, before) != display_glyphs(key, &self.modifiers) {
                deltas.push(glyph_delta(key, &self.modifiers));
            }
        }
    }
}

fn glyph_delta(key: &KeyState, modifiers: &ModifierState) -> VisualDelta {
    let (primary, sub) = display_glyphs(key, modifiers);
    VisualDelta::Glyph(GlyphDelta {
        code: key.code.clone(),
        primary,
        sub,
    })
}

fn initial_language(
    layouts: &dyn LayoutProvider,
    store: &dyn PreferenceStore,
    default_language: &LanguageCode,
) -> Result<LanguageCode, DispatchError> {
    let usable = |code: &LanguageCode| !layouts.keys(code).is_empty();

    match store.get(LANGUAGE_STORAGE_KEY) {
        Ok(Some(stored)) => {
            let code = LanguageCode::from(stored);
            if usable(&code) {
                tracing::debug!("Restored language preference: {}", code);
                return Ok(code);
            }
            tracing::warn!("Stored language '{}' is not available", code);
        }
        Ok(None) => tracing::debug!("No stored language preference"),
        Err(e) => tracing::warn!("Failed to load language preference: {}", e),
    }

    if usable(default_language) {
        return Ok(default_language.clone());
    }

    layouts
        .language_codes()
        .into_iter()
        .find(|code| usable(code))
        .ok_or(DispatchError::NoLanguages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{KeyDescriptor, LanguageLayout, LayoutTable};
    use crate::storage::{MemoryStore, StorageError};

    fn layouts() -> LayoutTable {
        let en = vec![
            KeyDescriptor::glyph("KeyA", "a", Some("A")),
            KeyDescriptor::glyph("Semicolon", ";", Some(":")),
            KeyDescriptor::function("ShiftLeft", "Shift"),
            KeyDescriptor::function("ControlLeft", "Ctrl"),
            KeyDescriptor::function("AltLeft", "Alt"),
            KeyDescriptor::function("CapsLock", "Caps Lock"),
            KeyDescriptor::function("Backspace", "Backspace"),
            KeyDescriptor::function("MetaLeft", "Win"),
        ];
        let ru = vec![
            KeyDescriptor::glyph("KeyA", "ф", Some("Ф")),
            KeyDescriptor::glyph("Semicolon", "ж", Some("Ж")),
            KeyDescriptor::function("ShiftLeft", "Shift"),
            KeyDescriptor::function("ControlLeft", "Ctrl"),
            KeyDescriptor::function("AltLeft", "Alt"),
            KeyDescriptor::function("CapsLock", "Caps Lock"),
            KeyDescriptor::function("Backspace", "Backspace"),
        ];
        LayoutTable {
            name: "test".into(),
            rows: Vec::new(),
            languages: vec![
                LanguageLayout {
                    code: "en".into(),
                    name: None,
                    keys: en,
                },
                LanguageLayout {
                    code: "ru".into(),
                    name: None,
                    keys: ru,
                },
            ],
        }
    }

    fn dispatcher() -> InputDispatcher {
        InputDispatcher::new(layouts(), MemoryStore::new(), &"en".into(), EditBuffer::new())
            .unwrap()
    }

    fn press(d: &mut InputDispatcher, code: &str) -> Vec<VisualDelta> {
        let mut deltas = d.handle(&InputEvent::key_down(code));
        deltas.extend(d.handle(&InputEvent::key_up(code)));
        deltas
    }

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io {
                source: std::io::Error::other("unavailable"),
                path: "prefs.json".into(),
            })
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io {
                source: std::io::Error::other("read-only"),
                path: "prefs.json".into(),
            })
        }
    }

    #[test]
    fn test_typing_letters() {
        let mut d = dispatcher();
        press(&mut d, "KeyA");
        d.handle(&InputEvent::key_down("ShiftLeft"));
        press(&mut d, "KeyA");
        d.handle(&InputEvent::key_up("ShiftLeft"));
        press(&mut d, "KeyA");

        assert_eq!(d.text().text(), "aAa");
        assert_eq!(d.text().cursor(), 3);
    }

    #[test]
    fn test_active_flag_follows_edges() {
        let mut d = dispatcher();

        let down = d.handle(&InputEvent::key_down("KeyA"));
        assert!(down.contains(&VisualDelta::Active {
            code: "KeyA".into(),
            active: true
        }));
        assert!(d.key("KeyA").unwrap().active);

        let repeat = d.handle(&InputEvent::key_down("KeyA"));
        assert!(repeat.is_empty(), "Auto-repeat types but changes nothing visual");
        assert_eq!(d.text().text(), "aa");

        d.handle(&InputEvent::key_up("KeyA"));
        assert!(!d.key("KeyA").unwrap().active);
    }

    #[test]
    fn test_caps_lock_visual_follows_latch() {
        let mut d = dispatcher();

        press(&mut d, "CapsLock");
        assert!(d.modifiers().caps_lock_on);
        assert!(d.key("CapsLock").unwrap().active, "Stays lit after release");

        d.handle(&InputEvent::pointer_leave("CapsLock"));
        assert!(d.key("CapsLock").unwrap().active);

        press(&mut d, "CapsLock");
        assert!(!d.modifiers().caps_lock_on);
        assert!(!d.key("CapsLock").unwrap().active);
    }

    #[test]
    fn test_shift_reports_changed_glyphs_only() {
        let mut d = dispatcher();
        let deltas = d.handle(&InputEvent::key_down("ShiftLeft"));

        let glyph_codes: Vec<&str> = deltas
            .iter()
            .filter_map(|delta| match delta {
                VisualDelta::Glyph(g) => Some(g.code.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(glyph_codes, vec!["KeyA", "Semicolon"]);

        let deltas = d.handle(&InputEvent::key_down("CapsLock"));
        let glyphs: Vec<&GlyphDelta> = deltas
            .iter()
            .filter_map(|delta| match delta {
                VisualDelta::Glyph(g) => Some(g),
                _ => None,
            })
            .collect();
        assert_eq!(glyphs.len(), 1, "Caps Lock leaves punctuation alone");
        assert_eq!(glyphs[0].primary, "a");
    }

    #[test]
    fn test_ctrl_alt_switches_once() {
        let mut d = dispatcher();

        assert!(d.handle(&InputEvent::key_down("ControlLeft")).iter().all(|delta| {
            !matches!(delta, VisualDelta::Language { .. })
        }));
        let deltas = d.handle(&InputEvent::key_down("AltLeft"));
        assert_eq!(d.language(), &LanguageCode::from("ru"));
        assert_eq!(deltas[0], VisualDelta::Language { code: "ru".into() });

        // Auto-repeat of the held modifiers must not cycle again.
        d.handle(&InputEvent::key_down("AltLeft"));
        d.handle(&InputEvent::key_down("ControlLeft"));
        assert_eq!(d.language(), &LanguageCode::from("ru"));

        press(&mut d, "KeyA");
        assert_eq!(d.text().text(), "ф", "Typing continues in the new language");
    }

    #[test]
    fn test_switch_keeps_keys_missing_from_new_layout() {
        let mut d = dispatcher();
        d.handle(&InputEvent::key_down("AltLeft"));
        d.handle(&InputEvent::key_down("ControlLeft"));
        d.handle(&InputEvent::key_up("ControlLeft"));
        d.handle(&InputEvent::key_up("AltLeft"));

        assert_eq!(d.language(), &LanguageCode::from("ru"));
        assert_eq!(d.key("KeyA").unwrap().small, "ф");
        assert_eq!(d.key("MetaLeft").unwrap().small, "Win");

        press(&mut d, "KeyA");
        assert_eq!(d.text().text(), "ф");
    }

    #[test]
    fn test_empty_layout_aborts_switch() {
        let mut table = layouts();
        table.languages.push(LanguageLayout {
            code: "de".into(),
            name: None,
            keys: Vec::new(),
        });
        let store = MemoryStore::with_entry(LANGUAGE_STORAGE_KEY, "ru");
        let mut d = InputDispatcher::new(table, store, &"en".into(), EditBuffer::new()).unwrap();
        assert_eq!(d.language(), &LanguageCode::from("ru"));

        assert_eq!(
            d.cycle_language().unwrap_err(),
            DispatchError::EmptyLayout("de".into())
        );
        assert_eq!(d.language(), &LanguageCode::from("ru"));
        assert_eq!(d.key("KeyA").unwrap().small, "ф");
    }

    #[test]
    fn test_storage_failure_falls_back_to_default() {
        let mut d =
            InputDispatcher::new(layouts(), BrokenStore, &"ru".into(), EditBuffer::new()).unwrap();
        assert_eq!(d.language(), &LanguageCode::from("ru"));

        // Persisting fails too, but the switch still happens.
        assert!(d.cycle_language().is_ok());
        assert_eq!(d.language(), &LanguageCode::from("en"));
    }

    #[test]
    fn test_unusable_stored_and_default_languages() {
        let d = InputDispatcher::new(
            layouts(),
            MemoryStore::with_entry(LANGUAGE_STORAGE_KEY, "fr"),
            &"de".into(),
            EditBuffer::new(),
        )
        .unwrap();
        assert_eq!(d.language(), &LanguageCode::from("en"));

        let result = InputDispatcher::new(
            LayoutTable::default(),
            MemoryStore::new(),
            &"en".into(),
            EditBuffer::new(),
        );
        assert_eq!(result.unwrap_err(), DispatchError::NoLanguages);
    }

    #[test]
    fn test_unknown_and_inert_keys() {
        let mut d = dispatcher();
        assert!(d.handle(&InputEvent::key_down("F13")).is_empty());
        assert!(d.handle(&InputEvent::key_down("ShiftRight")).is_empty());
        assert!(!d.modifiers().shift_held, "Unknown codes do not reach the tracker");

        press(&mut d, "MetaLeft");
        assert_eq!(d.text().text(), "");
    }

    #[test]
    fn test_pointer_leave_clears_visual_only() {
        let mut d = dispatcher();
        d.handle(&InputEvent::pointer_down("ShiftLeft"));

        let deltas = d.handle(&InputEvent::pointer_leave("ShiftLeft"));
        assert_eq!(
            deltas,
            vec![VisualDelta::Active {
                code: "ShiftLeft".into(),
                active: false
            }]
        );
        assert!(d.modifiers().shift_held);

        assert!(d.handle(&InputEvent::pointer_leave("ShiftLeft")).is_empty());
    }

    #[test]
    fn test_keyboard_leave_is_ignored() {
        let mut d = dispatcher();
        d.handle(&InputEvent::key_down("KeyA"));

        let leave = InputEvent::new("KeyA", Phase::Leave, Source::Keyboard);
        assert!(d.handle(&leave).is_empty());
        assert!(d.key("KeyA").unwrap().active);

        d.handle(&InputEvent::key_up("KeyA"));
        assert!(!d.key("KeyA").unwrap().active);
    }

    #[test]
    fn test_language_is_persisted() {
        let mut d = dispatcher();
        d.cycle_language().unwrap();
        assert_eq!(
            d.store.get(LANGUAGE_STORAGE_KEY).unwrap().as_deref(),
            Some("ru")
        );
    }
}
