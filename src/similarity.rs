//! Word-overlap similarity between lines.
//!
//! `similarity(k, l)` counts the words of `l` whose text occurs anywhere in
//! `k`, divided by the longer of the two lengths. A word repeated in `l` is
//! counted once per occurrence; repetition in `k` does not matter. The score
//! is not symmetric in general, so callers always pass the reference line
//! first.

use crate::config::AlignmentConfig;
use crate::line::Line;

/// Overlap score in `[0, 1]`. Two empty lines score `0.0`.
pub fn similarity(k: &Line, l: &Line) -> f64 {
    let longest = k.word_count().max(l.word_count());
    if longest == 0 {
        return 0.0;
    }
    let shared = l.words().iter().filter(|w| k.contains_word(&w.text)).count();
    shared as f64 / longest as f64
}

/// Threshold-based line comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSimilarity {
    equality_threshold: f64,
    similarity_threshold: f64,
}

impl Default for LineSimilarity {
    fn default() -> Self {
        Self::from_config(&AlignmentConfig::default())
    }
}

impl LineSimilarity {
    /// Take the thresholds from a configuration.
    pub fn from_config(config: &AlignmentConfig) -> Self {
        Self {
            equality_threshold: config.equality_threshold,
            similarity_threshold: config.similarity_threshold,
        }
    }

    /// Same logical line.
    pub fn equal(&self, k: &Line, l: &Line) -> bool {
        similarity(k, l) > self.equality_threshold
    }

    /// Related lines.
    pub fn similar(&self, k: &Line, l: &Line) -> bool {
        similarity(k, l) > self.similarity_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_lines() {
        let a = Line::from_text("Theorem 1.1 statement");
        assert_eq!(similarity(&a, &a), 1.0);
        assert!(LineSimilarity::default().equal(&a, &a));
    }

    #[test]
    fn test_partial_overlap() {
        let k = Line::from_text("Let G be a group");
        let l = Line::from_text("Let H be a ring");
        // "Let", "be", "a" are shared out of five words.
        assert!((similarity(&k, &l) - 0.6).abs() < 1e-9);
        let oracle = LineSimilarity::default();
        assert!(!oracle.equal(&k, &l));
        assert!(oracle.similar(&k, &l));
    }

    #[test]
    fn test_counts_repeats_in_second_line_only() {
        let k = Line::from_text("a b c d");
        let l = Line::from_text("a a");
        assert!((similarity(&k, &l) - 0.5).abs() < 1e-9);
        assert!((similarity(&l, &k) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_empty_lines() {
        let empty = Line::default();
        assert_eq!(similarity(&empty, &empty), 0.0);
        assert_eq!(similarity(&empty, &Line::from_text("x")), 0.0);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let oracle = LineSimilarity::from_config(&AlignmentConfig::new().with_equality_threshold(0.5));
        let k = Line::from_text("a b");
        let l = Line::from_text("a c");
        assert!(!oracle.equal(&k, &l));
    }
}
