//! Per-document verdicts.

use crate::alignment::AlignmentReport;
use serde::Serialize;
use std::fmt;

/// Why a document cannot be used at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// The full text has no lines
    EmptyFullText,
    /// The results reference has no lines
    EmptyReference,
    /// The results reference never contains a `***` separator
    NoSeparator,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InvalidReason::EmptyFullText => "full text is empty",
            InvalidReason::EmptyReference => "results file is empty",
            InvalidReason::NoSeparator => "results contain no separator",
        };
        f.write_str(s)
    }
}

/// Outcome of aligning one document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Enough of the reference was consumed; the labels are usable for training
    Succeeded {
        /// Fraction of reference lines consumed
        recall: f64,
    },
    /// Alignment ran but consumed too little of the reference
    Failed {
        /// Fraction of reference lines consumed
        recall: f64,
    },
    /// The input cannot be aligned
    Invalid(InvalidReason),
}

impl Verdict {
    /// Only succeeded documents produce training rows.
    pub fn is_success(&self) -> bool {
        matches!(self, Verdict::Succeeded { .. })
    }

    /// Short name: `succeeded`, `failed` or `invalid`.
    pub fn name(&self) -> &'static str {
        match self {
            Verdict::Succeeded { .. } => "succeeded",
            Verdict::Failed { .. } => "failed",
            Verdict::Invalid(_) => "invalid",
        }
    }

    /// Consumed fraction, when alignment ran.
    pub fn recall(&self) -> Option<f64> {
        match self {
            Verdict::Succeeded { recall } | Verdict::Failed { recall } => Some(*recall),
            Verdict::Invalid(_) => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Succeeded { recall } => write!(f, "succeeded (recall {:.2})", recall),
            Verdict::Failed { recall } => write!(f, "failed (recall {:.2})", recall),
            Verdict::Invalid(reason) => write!(f, "invalid ({})", reason),
        }
    }
}

/// Judge a document from how much of its reference was consumed.
///
/// A reference without any separator is invalid whatever the recall.
pub fn classify(consumed: usize, reference_len: usize, stars_seen: bool, min_recall: f64) -> Verdict {
    let report = AlignmentReport {
        reference_len,
        consumed,
        stars_seen,
        ..Default::default()
    };
    classify_report(&report, min_recall)
}

/// [`classify`] applied to an alignment report.
pub fn classify_report(report: &AlignmentReport, min_recall: f64) -> Verdict {
    if !report.stars_seen {
        return Verdict::Invalid(InvalidReason::NoSeparator);
    }
    let recall = report.recall();
    if recall < min_recall {
        Verdict::Failed { recall }
    } else {
        Verdict::Succeeded { recall }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_separator_is_invalid() {
        assert_eq!(
            classify(10, 10, false, 0.7),
            Verdict::Invalid(InvalidReason::NoSeparator)
        );
    }

    #[test]
    fn test_low_recall_fails() {
        let verdict = classify(6, 10, true, 0.7);
        assert_eq!(verdict, Verdict::Failed { recall: 0.6 });
        assert!(!verdict.is_success());
        assert_eq!(verdict.name(), "failed");
    }

    #[test]
    fn test_recall_at_bar_succeeds() {
        let verdict = classify(7, 10, true, 0.7);
        assert!(verdict.is_success());
        assert_eq!(verdict.recall(), Some(0.7));
    }

    #[test]
    fn test_report_recall_drives_verdict() {
        let report = AlignmentReport {
            reference_len: 8,
            consumed: 6,
            stars_seen: true,
            ..Default::default()
        };
        assert_eq!(classify_report(&report, 0.7), Verdict::Succeeded { recall: 0.75 });
        assert_eq!(classify_report(&report, 0.8), Verdict::Failed { recall: 0.75 });
        assert_eq!(classify(0, 0, true, 0.7), Verdict::Failed { recall: 0.0 });
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Verdict::Invalid(InvalidReason::EmptyReference).to_string(),
            "invalid (results file is empty)"
        );
        assert_eq!(Verdict::Succeeded { recall: 1.0 }.to_string(), "succeeded (recall 1.00)");
    }
}
