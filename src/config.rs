//! Configuration for alignment, smoothing and outcome classification.
//!
//! All thresholds are tunable constants. The defaults are the values the
//! training corpus was generated with.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Alignment configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Two lines are the same logical line when their similarity exceeds this.
    pub equality_threshold: f64,

    /// Two lines are related when their similarity exceeds this.
    pub similarity_threshold: f64,

    /// How many lines before the last heading a body search starts.
    pub body_backtrack: usize,

    /// Search window for ignorable reference lines, counted from the body anchor.
    pub ignorable_lookahead: usize,

    /// Lines with at most this many characters in total are ignorable.
    pub noise_chars: usize,

    /// Minimum fraction of consumed reference lines for a successful alignment.
    pub min_recall: f64,

    /// Upper bound on smoothing passes before giving up on a fixed point.
    pub max_smoothing_passes: usize,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AlignmentConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            equality_threshold: 0.7,
            similarity_threshold: 0.3,
            body_backtrack: 12,
            ignorable_lookahead: 8,
            noise_chars: 3,
            min_recall: 0.7,
            max_smoothing_passes: 8,
        }
    }

    /// Set the equality threshold.
    pub fn with_equality_threshold(mut self, threshold: f64) -> Self {
        self.equality_threshold = threshold;
        self
    }

    /// Set the similarity threshold.
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Set the backward slack used when searching for body lines.
    pub fn with_body_backtrack(mut self, lines: usize) -> Self {
        self.body_backtrack = lines;
        self
    }

    /// Set the bounded lookahead for ignorable reference lines.
    pub fn with_ignorable_lookahead(mut self, lines: usize) -> Self {
        self.ignorable_lookahead = lines;
        self
    }

    /// Set the character count under which a line is noise.
    pub fn with_noise_chars(mut self, chars: usize) -> Self {
        self.noise_chars = chars;
        self
    }

    /// Set the recall bar for a successful alignment.
    pub fn with_min_recall(mut self, recall: f64) -> Self {
        self.min_recall = recall;
        self
    }

    /// Set the smoothing pass limit.
    pub fn with_max_smoothing_passes(mut self, passes: usize) -> Self {
        self.max_smoothing_passes = passes;
        self
    }

    /// Check that the thresholds are usable.
    ///
    /// `similarity_threshold <= equality_threshold` is required so that two
    /// equal lines are always similar.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("equality_threshold", self.equality_threshold),
            ("similarity_threshold", self.similarity_threshold),
            ("min_recall", self.min_recall),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.similarity_threshold > self.equality_threshold {
            return Err(Error::InvalidConfig(format!(
                "similarity_threshold ({}) exceeds equality_threshold ({})",
                self.similarity_threshold, self.equality_threshold
            )));
        }
        if self.max_smoothing_passes == 0 {
            return Err(Error::InvalidConfig(
                "max_smoothing_passes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::reading(path, e.into()))?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AlignmentConfig::default();
        assert_eq!(config.equality_threshold, 0.7);
        assert_eq!(config.similarity_threshold, 0.3);
        assert_eq!(config.min_recall, 0.7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = AlignmentConfig::new()
            .with_equality_threshold(0.8)
            .with_body_backtrack(4)
            .with_ignorable_lookahead(2)
            .with_noise_chars(5);
        assert_eq!(config.equality_threshold, 0.8);
        assert_eq!(config.body_backtrack, 4);
        assert_eq!(config.ignorable_lookahead, 2);
        assert_eq!(config.noise_chars, 5);
    }

    #[test]
    fn test_similarity_above_equality_rejected() {
        let config = AlignmentConfig::new()
            .with_equality_threshold(0.4)
            .with_similarity_threshold(0.5);
        let err = config.validate().unwrap_err();
        assert!(format!("{}", err).contains("exceeds"));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(AlignmentConfig::new().with_min_recall(1.5).validate().is_err());
        assert!(AlignmentConfig::new()
            .with_max_smoothing_passes(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: AlignmentConfig = serde_json::from_str(r#"{"body_backtrack": 3}"#).unwrap();
        assert_eq!(config.body_backtrack, 3);
        assert_eq!(config.equality_threshold, 0.7);
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"min_recall": 0.5}"#).unwrap();
        let config = AlignmentConfig::from_json_file(&path).unwrap();
        assert_eq!(config.min_recall, 0.5);
    }
}
