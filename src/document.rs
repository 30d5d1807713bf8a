//! A document pair: full text plus its results reference.
//!
//! ```text
//! Document::new ──► label(config) ──► LabeledDocument
//!   features            alignment         verdict, read-only rows
//!                       gap filling
//!                       smoothing
//! ```

use crate::alignment::{fill_gaps, smooth, AlignmentEngine, AlignmentReport};
use crate::config::AlignmentConfig;
use crate::features::{extract_all, FeatureVector};
use crate::label::Label;
use crate::line::Line;
use crate::outcome::{classify_report, InvalidReason, Verdict};

/// Full text and reference lines, with one feature vector per full-text line.
#[derive(Debug, Clone)]
pub struct Document {
    fulltext: Vec<Line>,
    reference: Vec<Line>,
    vectors: Vec<FeatureVector>,
}

impl Document {
    /// Compute features for the full text. All labels start unset.
    pub fn new(fulltext: Vec<Line>, reference: Vec<Line>) -> Self {
        let vectors = extract_all(&fulltext);
        Self {
            fulltext,
            reference,
            vectors,
        }
    }

    /// Full-text lines.
    pub fn fulltext(&self) -> &[Line] {
        &self.fulltext
    }

    /// Reference lines.
    pub fn reference(&self) -> &[Line] {
        &self.reference
    }

    /// Feature vectors, index-aligned with [`Document::fulltext`].
    pub fn vectors(&self) -> &[FeatureVector] {
        &self.vectors
    }

    /// Align, fill, smooth and judge the document.
    ///
    /// Empty inputs are not aligned and come back invalid. Every line of the
    /// result carries a final label, whatever the verdict.
    pub fn label(mut self, config: &AlignmentConfig) -> LabeledDocument {
        let empty = if self.fulltext.is_empty() {
            Some(InvalidReason::EmptyFullText)
        } else if self.reference.is_empty() {
            Some(InvalidReason::EmptyReference)
        } else {
            None
        };

        let report = match empty {
            Some(_) => AlignmentReport {
                reference_len: self.reference.len(),
                ..Default::default()
            },
            None => AlignmentEngine::new(&self.fulltext, &self.reference, config).run(&mut self.vectors),
        };

        fill_gaps(&mut self.vectors);
        smooth(&mut self.vectors, config.max_smoothing_passes);

        let verdict = match empty {
            Some(reason) => Verdict::Invalid(reason),
            None => classify_report(&report, config.min_recall),
        };

        LabeledDocument {
            fulltext: self.fulltext,
            vectors: self.vectors,
            report,
            verdict,
        }
    }
}

/// A document after labeling. Read-only.
#[derive(Debug, Clone)]
pub struct LabeledDocument {
    fulltext: Vec<Line>,
    vectors: Vec<FeatureVector>,
    report: AlignmentReport,
    verdict: Verdict,
}

impl LabeledDocument {
    /// Verdict of the alignment.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Alignment statistics.
    pub fn report(&self) -> &AlignmentReport {
        &self.report
    }

    /// Full-text lines.
    pub fn fulltext(&self) -> &[Line] {
        &self.fulltext
    }

    /// Labeled feature vectors, whatever the verdict.
    pub fn vectors(&self) -> &[FeatureVector] {
        &self.vectors
    }

    /// Labels in line order.
    pub fn labels(&self) -> Vec<Label> {
        self.vectors.iter().map(|v| v.label).collect()
    }

    /// Training rows; only succeeded documents have any.
    pub fn training_rows(&self) -> Option<&[FeatureVector]> {
        self.verdict.is_success().then_some(self.vectors.as_slice())
    }

    /// Rows paired with the plain text of their line.
    pub fn rows_with_text(&self) -> impl Iterator<Item = (&FeatureVector, String)> + '_ {
        self.vectors
            .iter()
            .zip(self.fulltext.iter().map(Line::to_plain_text))
    }
}
