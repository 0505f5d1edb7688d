// SPDX-License-Identifier: GPL-3.0-only

//! Text storage and editing operations.
//!
//! Cursor positions count characters, not bytes, so multi-byte glyphs (Cyrillic,
//! symbols) move the cursor by one. Every operation is written against the
//! [`TextSurface`] trait; [`EditBuffer`] is the in-memory implementation.

use crate::input::keycode::FunctionKeyKind;

/// Storage for the edited text and its cursor.
///
/// Implementors must clamp the cursor to `0..=char_count` in `set_cursor`.
pub trait TextSurface {
    /// Current text.
    fn text(&self) -> &str;

    /// Replaces the text. The cursor is clamped to the new length.
    fn set_text(&mut self, text: String);

    /// Cursor position in characters.
    fn cursor(&self) -> usize;

    /// Moves the cursor, clamped to the text length.
    fn set_cursor(&mut self, cursor: usize);
}

/// In-memory text buffer with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    cursor: usize,
}

impl EditBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer holding `text` with the cursor at `cursor` (clamped).
    #[must_use]
    pub fn with_text(text: impl Into<String>, cursor: usize) -> Self {
        let mut buffer = Self {
            text: text.into(),
            cursor: 0,
        };
        buffer.set_cursor(cursor);
        buffer
    }
}

impl TextSurface for EditBuffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
        let cursor = self.cursor;
        self.set_cursor(cursor);
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.text.chars().count());
    }
}

/// An edit to apply at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Insert literal text.
    Insert(String),
    /// Run a function key's operation.
    Function(FunctionKeyKind),
}

/// Applies `op` to `surface`.
///
/// The cursor is read from the surface before the edit and written back after
/// it, so the surface stays the single source of truth.
pub fn apply_edit<S: TextSurface + ?Sized>(surface: &mut S, op: &EditOp) {
    match op {
        EditOp::Insert(text) => insert(surface, text),
        EditOp::Function(kind) => match kind {
            FunctionKeyKind::Tab => insert(surface, "\t"),
            FunctionKeyKind::Enter => insert(surface, "\n"),
            FunctionKeyKind::Space => insert(surface, " "),
            FunctionKeyKind::Backspace => backspace(surface),
            FunctionKeyKind::Delete => delete_forward(surface),
            FunctionKeyKind::ArrowLeft => {
                let cursor = surface.cursor();
                surface.set_cursor(cursor.saturating_sub(1));
            }
            FunctionKeyKind::ArrowRight => {
                let cursor = surface.cursor();
                surface.set_cursor(cursor + 1);
            }
            FunctionKeyKind::ArrowUp => move_vertical(surface, false),
            FunctionKeyKind::ArrowDown => move_vertical(surface, true),
        },
    }
}

/// Byte offset of the character at `char_idx`, or the text length past the end.
fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(offset, _)| offset)
}

fn insert<S: TextSurface + ?Sized>(surface: &mut S, fragment: &str) {
    if fragment.is_empty() {
        return;
    }
    let cursor = surface.cursor();
    let mut text = surface.text().to_string();
    text.insert_str(byte_offset(&text, cursor), fragment);
    surface.set_text(text);
    surface.set_cursor(cursor + fragment.chars().count());
}

fn backspace<S: TextSurface + ?Sized>(surface: &mut S) {
    let cursor = surface.cursor();
    if cursor == 0 {
        return;
    }
    let mut text = surface.text().to_string();
    text.remove(byte_offset(&text, cursor - 1));
    surface.set_text(text);
    surface.set_cursor(cursor - 1);
}

fn delete_forward<S: TextSurface + ?Sized>(surface: &mut S) {
    let cursor = surface.cursor();
    if cursor >= surface.text().chars().count() {
        return;
    }
    let mut text = surface.text().to_string();
    text.remove(byte_offset(&text, cursor));
    surface.set_text(text);
    surface.set_cursor(cursor);
}

/// Moves the cursor to the same column on the adjacent line, clamped to that
/// line's length. No-op on the first line (up) or last line (down).
fn move_vertical<S: TextSurface + ?Sized>(surface: &mut S, down: bool) {
    let (line, col) = line_col(surface.text(), surface.cursor());
    let line_count = surface.text().split('\n').count();

    let target = if down {
        if line + 1 >= line_count {
            return;
        }
        line + 1
    } else {
        if line == 0 {
            return;
        }
        line - 1
    };

    let offset = line_col_to_offset(surface.text(), target, col);
    surface.set_cursor(offset);
}

/// Converts a character offset into (line, column).
pub fn line_col(text: &str, char_offset: usize) -> (usize, usize) {
    let mut line = 0;
    let mut col = 0;
    for (i, ch) in text.chars().enumerate() {
        if i == char_offset {
            return (line, col);
        }
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// Converts (line, column) back to a character offset, clamping the column.
pub fn line_col_to_offset(text: &str, target_line: usize, target_col: usize) -> usize {
    let mut offset = 0;
    for (line_idx, line) in text.split('\n').enumerate() {
        let line_len = line.chars().count();
        if line_idx == target_line {
            return offset + target_col.min(line_len);
        }
        offset += line_len + 1;
    }
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(buffer: &mut EditBuffer, kind: FunctionKeyKind) {
        apply_edit(buffer, &EditOp::Function(kind));
    }

    #[test]
    fn test_insert_in_the_middle() {
        let mut buffer = EditBuffer::with_text("ab", 1);
        apply_edit(&mut buffer, &EditOp::Insert("c".into()));
        assert_eq!(buffer.text(), "acb");
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn test_insert_multichar_and_cyrillic() {
        let mut buffer = EditBuffer::with_text("жж", 1);
        apply_edit(&mut buffer, &EditOp::Insert("йё".into()));
        assert_eq!(buffer.text(), "жйёж");
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn test_backspace_until_empty() {
        let mut buffer = EditBuffer::with_text("abc", 3);

        run(&mut buffer, FunctionKeyKind::Backspace);
        assert_eq!((buffer.text(), buffer.cursor()), ("ab", 2));

        run(&mut buffer, FunctionKeyKind::Backspace);
        run(&mut buffer, FunctionKeyKind::Backspace);
        assert_eq!((buffer.text(), buffer.cursor()), ("", 0));

        run(&mut buffer, FunctionKeyKind::Backspace);
        assert_eq!((buffer.text(), buffer.cursor()), ("", 0));
    }

    #[test]
    fn test_delete_forward() {
        let mut buffer = EditBuffer::with_text("abc", 1);
        run(&mut buffer, FunctionKeyKind::Delete);
        assert_eq!((buffer.text(), buffer.cursor()), ("ac", 1));

        buffer.set_cursor(2);
        run(&mut buffer, FunctionKeyKind::Delete);
        assert_eq!((buffer.text(), buffer.cursor()), ("ac", 2));
    }

    #[test]
    fn test_whitespace_keys() {
        let mut buffer = EditBuffer::new();
        run(&mut buffer, FunctionKeyKind::Tab);
        run(&mut buffer, FunctionKeyKind::Space);
        run(&mut buffer, FunctionKeyKind::Enter);
        assert_eq!((buffer.text(), buffer.cursor()), ("\t \n", 3));
    }

    #[test]
    fn test_horizontal_arrows_clamp() {
        let mut buffer = EditBuffer::with_text("ab", 0);
        run(&mut buffer, FunctionKeyKind::ArrowLeft);
        assert_eq!(buffer.cursor(), 0);

        for _ in 0..5 {
            run(&mut buffer, FunctionKeyKind::ArrowRight);
        }
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn test_vertical_arrows_keep_column() {
        // Lines: "hello" (0..5), "hi" (6..8), "world" (9..14)
        let mut buffer = EditBuffer::with_text("hello\nhi\nworld", 4);

        run(&mut buffer, FunctionKeyKind::ArrowDown);
        assert_eq!(buffer.cursor(), 8, "Column clamps to the short line");

        run(&mut buffer, FunctionKeyKind::ArrowDown);
        assert_eq!(buffer.cursor(), 11);

        run(&mut buffer, FunctionKeyKind::ArrowDown);
        assert_eq!(buffer.cursor(), 11, "No line below");

        run(&mut buffer, FunctionKeyKind::ArrowUp);
        run(&mut buffer, FunctionKeyKind::ArrowUp);
        assert_eq!(buffer.cursor(), 2);

        run(&mut buffer, FunctionKeyKind::ArrowUp);
        assert_eq!(buffer.cursor(), 2, "No line above");
    }

    #[test]
    fn test_set_text_clamps_cursor() {
        let mut buffer = EditBuffer::with_text("abcdef", 10);
        assert_eq!(buffer.cursor(), 6);

        buffer.set_text("ab".into());
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn test_line_col_roundtrip_points() {
        let text = "ab\ncde";
        assert_eq!(line_col(text, 0), (0, 0));
        assert_eq!(line_col(text, 2), (0, 2));
        assert_eq!(line_col(text, 3), (1, 0));
        assert_eq!(line_col(text, 6), (1, 3));
        assert_eq!(line_col_to_offset(text, 1, 10), 6);
        assert_eq!(line_col_to_offset(text, 5, 0), 6);
    }
}
