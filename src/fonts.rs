//! Font inventory for tuning the font-category patterns.
//!
//! Embedded fonts carry a subset tag and a size suffix (`ABCDEF+CMBX10`);
//! the inventory counts them by base name (`CMBX`).

use crate::line::Line;
use std::collections::HashMap;

/// Strip the trailing size digits and any subset prefix up to `+`.
pub fn normalize_font_name(font: &str) -> &str {
    let name = font.trim_end_matches(|c: char| c.is_ascii_digit());
    match name.find('+') {
        Some(i) => &name[i + 1..],
        None => name,
    }
}

/// Letter counts per normalized font name.
#[derive(Debug, Clone, Default)]
pub struct FontInventory {
    counts: HashMap<String, usize>,
}

impl FontInventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every recorded letter font of the lines.
    pub fn add_lines(&mut self, lines: &[Line]) {
        for word in lines.iter().flat_map(|l| l.words()) {
            for font in &word.fonts {
                *self.counts.entry(normalize_font_name(font).to_string()).or_insert(0) += 1;
            }
        }
    }

    /// Merge another inventory into this one.
    pub fn merge(&mut self, other: FontInventory) {
        for (font, count) in other.counts {
            *self.counts.entry(font).or_insert(0) += count;
        }
    }

    /// Number of distinct fonts.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Fonts by descending count, ties by name.
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut fonts: Vec<(&str, usize)> =
            self.counts.iter().map(|(f, &c)| (f.as_str(), c)).collect();
        fonts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        fonts
    }

    /// One row per font with its count.
    pub fn report(&self) -> String {
        let mut out = String::new();
        for (font, count) in self.sorted() {
            out.push_str(&format!("{:<25}{:>10}\n", font, count));
        }
        out
    }
}
