//! Stateless line tests used by the alignment engine.

use crate::line::Line;

/// Marker word separating two results in a reference stream.
pub const SEPARATOR: &str = "***";

/// Character budget under which a line carries no matching signal.
pub const DEFAULT_NOISE_CHARS: usize = 3;

/// A result separator: some word is exactly `***`.
pub fn is_separator(line: &Line) -> bool {
    line.contains_word(SEPARATOR)
}

/// No ASCII letter or digit anywhere in the line.
pub fn is_empty(line: &Line) -> bool {
    !line
        .words()
        .iter()
        .any(|w| w.text.chars().any(|c| c.is_ascii_alphanumeric()))
}

/// Too short or empty to match reliably. Separators are never ignorable.
pub fn is_ignorable(line: &Line) -> bool {
    is_ignorable_with(line, DEFAULT_NOISE_CHARS)
}

/// [`is_ignorable`] with an explicit character budget.
pub fn is_ignorable_with(line: &Line, noise_chars: usize) -> bool {
    // average word length times word count is the total character count
    !is_separator(line) && (is_empty(line) || line.char_count() <= noise_chars)
}
