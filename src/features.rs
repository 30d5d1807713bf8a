//! Line feature extraction.
//!
//! Font categories are decided by matching the recorded font name of each
//! letter against a fixed pattern per category. Keyword features look at the
//! text of the first word only.

use crate::label::Label;
use crate::line::{Line, Word};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref ITALIC_FONT: Regex = Regex::new(r"(TI)[0-9]+|Ital|rsfs|EUSM").unwrap();
    static ref BOLD_FONT: Regex = Regex::new(r"CMBX|Bold|NimbusRomNo9L-Medi").unwrap();
    static ref MATH_FONT: Regex =
        Regex::new(r"\+(CM)(SY|MI|EX)[0-9]+|math|Math|MSAM|MSBM|LASY|cmex|StandardSymL").unwrap();
    static ref HEADING_KEYWORD: Regex =
        Regex::new(r"Theorem|Lemma|Claim|Corollary|Proposition|Fact").unwrap();
    static ref PROOF_KEYWORD: Regex = Regex::new(r"Proof").unwrap();
}

/// Font category of a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontClass {
    /// Italic text fonts
    Italic,
    /// Bold text fonts
    Bold,
    /// Math symbol fonts
    Math,
}

impl FontClass {
    fn pattern(&self) -> &'static Regex {
        match self {
            FontClass::Italic => &ITALIC_FONT,
            FontClass::Bold => &BOLD_FONT,
            FontClass::Math => &MATH_FONT,
        }
    }

    /// Whether a font name belongs to this category.
    pub fn matches(&self, font: &str) -> bool {
        self.pattern().is_match(font)
    }
}

/// Fraction of a word's recorded font tags in the given category.
///
/// Measured over the recorded tags, not the text length, since extraction
/// may record fewer fonts than characters. `0.0` when nothing was recorded.
pub fn word_font_ratio(word: &Word, class: FontClass) -> f64 {
    if word.fonts.is_empty() {
        return 0.0;
    }
    let hits = word.fonts.iter().filter(|f| class.matches(f)).count();
    hits as f64 / word.fonts.len() as f64
}

/// Unweighted mean of [`word_font_ratio`] over the words of a line.
pub fn line_font_ratio(line: &Line, class: FontClass) -> f64 {
    if line.is_empty() {
        return 0.0;
    }
    let total: f64 = line.words().iter().map(|w| word_font_ratio(w, class)).sum();
    total / line.word_count() as f64
}

/// Whether a word names a theorem-like result (Theorem, Lemma, ...).
pub fn is_heading_keyword(word: &Word) -> bool {
    HEADING_KEYWORD.is_match(&word.text)
}

/// Whether a word opens a proof.
pub fn is_proof_keyword(word: &Word) -> bool {
    PROOF_KEYWORD.is_match(&word.text)
}

/// Whether the first word of the line opens a proof.
pub fn is_proof_first_word(line: &Line) -> bool {
    line.first_word().is_some_and(is_proof_keyword)
}

/// Whether the first word of the line names a result.
pub fn is_heading_first_word(line: &Line) -> bool {
    line.first_word().is_some_and(is_heading_keyword)
}

/// Whether the line starts with an ASCII capital letter.
pub fn is_capital_first_letter(line: &Line) -> bool {
    line.first_word()
        .and_then(|w| w.text.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

/// Feature row for one full-text line, plus its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Number of words
    pub words_num: usize,
    /// Mean word length in characters
    pub average_word_length: f64,
    /// Mean per-word italic proportion
    pub italicness: f64,
    /// Mean per-word math-font proportion
    pub mathness: f64,
    /// First word is a result keyword
    pub heading_first_word: bool,
    /// First word is a proof keyword
    pub proof_first_word: bool,
    /// Bold proportion of the first word
    pub boldness_first_word: f64,
    /// First character is an ASCII capital
    pub capital_first_letter: bool,
    /// Role assigned by alignment
    #[serde(rename = "type")]
    pub label: Label,
}

impl FeatureVector {
    /// Compute the features of a line. The label starts as [`Label::Unset`].
    pub fn from_line(line: &Line) -> Self {
        Self {
            words_num: line.word_count(),
            average_word_length: line.average_word_length(),
            italicness: line_font_ratio(line, FontClass::Italic),
            mathness: line_font_ratio(line, FontClass::Math),
            heading_first_word: is_heading_first_word(line),
            proof_first_word: is_proof_first_word(line),
            boldness_first_word: line
                .first_word()
                .map(|w| word_font_ratio(w, FontClass::Bold))
                .unwrap_or(0.0),
            capital_first_letter: is_capital_first_letter(line),
            label: Label::Unset,
        }
    }

    /// Write a label, respecting [`Label::accepts`]. Returns whether it was written.
    pub fn assign(&mut self, label: Label) -> bool {
        if self.label.accepts(label) {
            self.label = label;
            true
        } else {
            false
        }
    }
}

/// Compute feature vectors for a whole line sequence.
pub fn extract_all(lines: &[Line]) -> Vec<FeatureVector> {
    lines.iter().map(FeatureVector::from_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fonts(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_font_classes() {
        assert!(FontClass::Italic.matches("ABCDEF+CMTI10"));
        assert!(FontClass::Italic.matches("Times-Italic"));
        assert!(FontClass::Bold.matches("CMBX12"));
        assert!(FontClass::Bold.matches("NimbusRomNo9L-Medi"));
        assert!(FontClass::Math.matches("XYZ+CMMI10"));
        assert!(FontClass::Math.matches("MSBM10"));
        assert!(!FontClass::Math.matches("CMR10"));
        assert!(!FontClass::Bold.matches("CMR10"));
    }

    #[test]
    fn test_ratio_uses_recorded_fonts() {
        // Five characters, only two fonts recorded.
        let word = Word::new(fonts(&["CMTI10", "CMR10"]), "hello");
        assert!((word_font_ratio(&word, FontClass::Italic) - 0.5).abs() < 1e-9);
        assert_eq!(word_font_ratio(&Word::plain("x"), FontClass::Italic), 0.0);
    }

    #[test]
    fn test_line_ratio_is_unweighted_mean() {
        let line = Line::new(vec![
            Word::new(fonts(&["CMTI10"]), "a"),
            Word::new(fonts(&["CMR10", "CMR10", "CMR10", "CMR10"]), "long"),
        ]);
        assert!((line_font_ratio(&line, FontClass::Italic) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_line_features() {
        let v = FeatureVector::from_line(&Line::default());
        assert_eq!(v.words_num, 0);
        assert_eq!(v.average_word_length, 0.0);
        assert_eq!(v.italicness, 0.0);
        assert_eq!(v.mathness, 0.0);
        assert!(!v.heading_first_word);
        assert!(!v.proof_first_word);
        assert_eq!(v.boldness_first_word, 0.0);
        assert!(!v.capital_first_letter);
        assert_eq!(v.label, Label::Unset);
    }

    #[test]
    fn test_heading_line_features() {
        let line = Line::new(vec![
            Word::new(fonts(&["CMBX10"; 7]), "Theorem"),
            Word::new(fonts(&["CMBX10", "CMBX10", "CMBX10"]), "2.1."),
            Word::new(fonts(&["CMTI10", "CMTI10", "CMTI10"]), "Let"),
        ]);
        let v = FeatureVector::from_line(&line);
        assert_eq!(v.words_num, 3);
        assert!(v.heading_first_word);
        assert!(!v.proof_first_word);
        assert_eq!(v.boldness_first_word, 1.0);
        assert!(v.capital_first_letter);
        assert!((v.italicness - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_keywords_only_on_first_word() {
        assert!(is_proof_first_word(&Line::from_text("Proof. Trivial.")));
        assert!(!is_proof_first_word(&Line::from_text("See the Proof")));
        assert!(is_heading_first_word(&Line::from_text("Lemma 3")));
        assert!(!is_capital_first_letter(&Line::from_text("lemma 3")));
        assert!(!is_capital_first_letter(&Line::from_text("Ävery")));
    }

    #[test]
    fn test_assign_respects_precedence() {
        let mut v = FeatureVector::from_line(&Line::from_text("x"));
        assert!(v.assign(Label::Text));
        assert!(!v.assign(Label::Text));
        assert!(v.assign(Label::Heading));
        assert!(!v.assign(Label::Body));
        assert_eq!(v.label, Label::Heading);
    }
}
