//! Structural representation of extracted text lines.
//!
//! A [`Line`] is an ordered sequence of [`Word`]s. Each word keeps the font
//! names recorded for its letters alongside its text. The extraction does not
//! guarantee one font per character, so `fonts` may be shorter than the text.

use serde::{Deserialize, Serialize};

/// A single extracted character with the font it was drawn in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    /// The character
    pub ch: char,
    /// Font name, empty when the extractor did not record one
    pub font: String,
}

impl Letter {
    /// Create a letter.
    pub fn new(ch: char, font: impl Into<String>) -> Self {
        Self {
            ch,
            font: font.into(),
        }
    }
}

/// A word: per-letter font names plus the word text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Font names recorded for the letters of this word
    pub fonts: Vec<String>,
    /// Word text
    pub text: String,
}

impl Word {
    /// Create a word from its recorded fonts and text.
    pub fn new(fonts: Vec<String>, text: impl Into<String>) -> Self {
        Self {
            fonts,
            text: text.into(),
        }
    }

    /// Create a word with no recorded fonts.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(Vec::new(), text)
    }

    /// Collapse letters into a word. Empty font names are not recorded.
    pub fn from_letters(letters: &[Letter]) -> Self {
        Self {
            fonts: letters
                .iter()
                .filter(|l| !l.font.is_empty())
                .map(|l| l.font.clone())
                .collect(),
            text: letters.iter().map(|l| l.ch).collect(),
        }
    }

    /// Number of characters in the word text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// One physical line of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    words: Vec<Word>,
}

impl Line {
    /// Create a line from words.
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    /// Build a font-less line by splitting `text` on whitespace.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.split_whitespace().map(Word::plain).collect())
    }

    /// Words of the line.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// First word, if any.
    pub fn first_word(&self) -> Option<&Word> {
        self.words.first()
    }

    /// Number of words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Whether the line has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Total number of characters over all words.
    pub fn char_count(&self) -> usize {
        self.words.iter().map(Word::char_len).sum()
    }

    /// Mean word length in characters, `0.0` for an empty line.
    pub fn average_word_length(&self) -> f64 {
        if self.words.is_empty() {
            return 0.0;
        }
        self.char_count() as f64 / self.words.len() as f64
    }

    /// Whether some word has exactly this text.
    pub fn contains_word(&self, text: &str) -> bool {
        self.words.iter().any(|w| w.text == text)
    }

    /// Words joined by single spaces.
    pub fn to_plain_text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<Vec<Word>> for Line {
    fn from(words: Vec<Word>) -> Self {
        Self::new(words)
    }
}
