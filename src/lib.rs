// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::needless_range_loop)]
#![allow(clippy::type_complexity)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Theorem Tagger
//!
//! Training data generation for theorem-statement detection in scientific
//! papers.
//!
//! Every full-text line of a paper is labeled `heading`, `body`,
//! `after_body` or `text` by aligning it against a results file that lists
//! the paper's theorem statements, each introduced by a `***` separator.
//! Lines carry font and keyword features; the labeled feature rows of
//! well-aligned papers are written as CSV training data.
//!
//! ## Pipeline
//!
//! ```text
//! _xml.xml ──► xml::read_lines ──► Document::new ──► features
//! _resxml.xml ─► xml::read_lines ──┘                    │
//!                                                       ▼
//!             alignment ──► fill_gaps ──► smooth ──► Verdict
//!                                                       │
//!                           output::write_training_csv ◄┘ (succeeded only)
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use theorem_tagger::{AlignmentConfig, Document, xml};
//!
//! # fn main() -> theorem_tagger::Result<()> {
//! let fulltext = xml::read_lines("1234_xml.xml")?;
//! let reference = xml::read_lines("1234_resxml.xml")?;
//! let doc = Document::new(fulltext, reference).label(&AlignmentConfig::default());
//! println!("{}", doc.verdict());
//! # Ok(())
//! # }
//! ```
//!
//! Whole corpus directories are handled by [`CorpusProcessor`] and the
//! `generate_training_data` binary.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Line model and input
pub mod line;
pub mod xml;

// Features and labels
pub mod features;
pub mod label;

// Alignment
pub mod alignment;
pub mod predicates;
pub mod similarity;

// Per-document results
pub mod document;
pub mod outcome;

// Corpus level
pub mod baseline;
pub mod corpus;
pub mod fonts;
pub mod output;

// Python bindings (optional)
#[cfg(feature = "python")]
mod python;

// Re-exports
pub use alignment::{AlignmentEngine, AlignmentReport};
pub use config::AlignmentConfig;
pub use corpus::{CorpusOptions, CorpusProcessor, CorpusSummary, DocumentPair, DocumentStatus};
pub use document::{Document, LabeledDocument};
pub use error::{Error, Result};
pub use features::FeatureVector;
pub use label::Label;
pub use line::{Line, Word};
pub use outcome::{InvalidReason, Verdict};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "theorem_tagger");
    }
}
