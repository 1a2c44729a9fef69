use std::ops::Range;

use super::language::Language;

/// Indentation inserted for a Tab key press.
pub const INDENT: &str = "    ";

/// The code editor contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorBuffer {
    text: String,
    language: Language,
    /// Bumped on every content change; zero means untouched since startup.
    revision: u64,
}

impl EditorBuffer {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Default::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Replace the whole buffer as a user edit.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.revision += 1;
    }

    /// Load content that did not come from typing (restore, project load).
    pub fn load(&mut self, text: impl Into<String>, language: Language) {
        self.text = text.into();
        self.language = language;
        self.revision += 1;
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Replace `selection` (byte offsets) with [`INDENT`] and return the new cursor.
    pub fn indent(&mut self, selection: Range<usize>) -> usize {
        let start = self.floor_boundary(selection.start);
        let end = self.floor_boundary(selection.end.max(selection.start));
        self.text.replace_range(start..end, INDENT);
        self.revision += 1;
        start + INDENT.len()
    }

    fn floor_boundary(&self, index: usize) -> usize {
        let mut index = index.min(self.text.len());
        while !self.text.is_char_boundary(index) {
            index -= 1;
        }
        index
    }

    /// Number of gutter rows; an empty buffer still shows line 1.
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Render the buffer with `N | ` prefixes.
    pub fn numbered(&self) -> String {
        self.text
            .lines()
            .enumerate()
            .map(|(i, line)| format!("{} | {}", i + 1, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
