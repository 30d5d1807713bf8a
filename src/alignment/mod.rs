//! Alignment of a results reference stream against a full-text line stream.
//!
//! The reference stream is a list of known theorem statements, one result
//! after another, each introduced by a `***` separator line. The engine walks
//! it with two cursors:
//!
//! ```text
//! reference:  *** | Theorem 2.1 ... | Let G be ... | *** | Lemma 3 ... | ...
//!                    ri ─────────────────────────►
//! full text:  ... | ... | Theorem 2.1 ... | Let G be ... | ... | Lemma 3 ...
//!                    fi ─────────────────────────►
//! ```
//!
//! After a separator the engine scans forward for the result's heading. Once a
//! heading is found, the following reference lines are searched for as body
//! lines around the heading, tolerating small reorderings between the two
//! streams. Each reference line gets at most one restart; lines that still do
//! not match are left unmatched and the engine moves on.
//!
//! The engine only writes labels on the lines it visits. [`smoothing`] fills
//! the remaining gaps and removes isolated anomalies afterwards.

pub mod smoothing;

pub use smoothing::{fill_gaps, infer_gap, smooth, smoothing_pass};

use crate::config::AlignmentConfig;
use crate::features::{is_proof_first_word, FeatureVector};
use crate::label::Label;
use crate::line::Line;
use crate::predicates::{is_ignorable_with, is_separator};
use crate::similarity::LineSimilarity;
use serde::Serialize;

/// What the engine is looking for in the full text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// The next reference line opens a result
    ScanningForHeading,
    /// The next reference line belongs to the current result's statement
    ScanningForBody,
}

/// Cursor state of one alignment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    /// Next full-text line to look at
    fi: usize,
    /// Current reference line
    ri: usize,
    /// Full-text index of the last confirmed heading
    heading_fi: usize,
    mode: Mode,
    /// The current reference line already used its restart
    restarted: bool,
    stars_seen: bool,
    /// Reference lines advanced past successfully
    consumed: usize,
}

impl Cursor {
    fn new() -> Self {
        // Reference line 0 is the leading separator and is skipped.
        Self {
            fi: 0,
            ri: 1,
            heading_fi: 0,
            mode: Mode::ScanningForHeading,
            restarted: false,
            stars_seen: false,
            consumed: 1,
        }
    }

    fn advance(&mut self, consumed: bool) {
        self.ri += 1;
        self.restarted = false;
        if consumed {
            self.consumed += 1;
        }
    }
}

/// Statistics of one alignment run, used to judge the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlignmentReport {
    /// Number of reference lines
    pub reference_len: usize,
    /// Reference index when the engine stopped
    pub final_ri: usize,
    /// Reference lines matched, skipped as proof, or separators
    pub consumed: usize,
    /// At least one separator was seen
    pub stars_seen: bool,
    /// Headings labeled
    pub headings: usize,
    /// Body lines labeled
    pub bodies: usize,
    /// Restarts used
    pub restarts: usize,
    /// Reference lines skipped because their result is a proof
    pub proof_skipped: usize,
    /// Reference lines given up on
    pub unmatched: usize,
}

impl AlignmentReport {
    /// Fraction of the reference stream consumed, `0.0` for an empty stream.
    pub fn recall(&self) -> f64 {
        if self.reference_len == 0 {
            return 0.0;
        }
        self.consumed as f64 / self.reference_len as f64
    }
}

struct Run<'v> {
    cursor: Cursor,
    vectors: &'v mut [FeatureVector],
    report: AlignmentReport,
}

/// Fuzzy two-pointer matcher between a full text and its results reference.
pub struct AlignmentEngine<'a> {
    config: &'a AlignmentConfig,
    oracle: LineSimilarity,
    fulltext: &'a [Line],
    reference: &'a [Line],
}

impl<'a> AlignmentEngine<'a> {
    /// Create an engine over the two line streams.
    pub fn new(fulltext: &'a [Line], reference: &'a [Line], config: &'a AlignmentConfig) -> Self {
        Self {
            config,
            oracle: LineSimilarity::from_config(config),
            fulltext,
            reference,
        }
    }

    /// Label `vectors` (one per full-text line) and report what happened.
    ///
    /// Lines the scan never reaches stay [`Label::Unset`]. Empty streams are
    /// not attempted; the returned report then has `stars_seen == false`.
    pub fn run(&self, vectors: &mut [FeatureVector]) -> AlignmentReport {
        debug_assert_eq!(vectors.len(), self.fulltext.len());
        let mut run = Run {
            cursor: Cursor::new(),
            vectors,
            report: AlignmentReport {
                reference_len: self.reference.len(),
                ..Default::default()
            },
        };
        if self.fulltext.is_empty() || self.reference.is_empty() {
            return run.report;
        }

        while run.cursor.ri < self.reference.len() {
            if is_separator(&self.reference[run.cursor.ri]) {
                self.enter_result(&mut run);
                continue;
            }
            match run.cursor.mode {
                Mode::ScanningForHeading => self.scan_for_heading(&mut run),
                Mode::ScanningForBody => self.scan_for_body(&mut run),
            }
        }

        let tail = run.cursor.fi.min(self.fulltext.len());
        for v in run.vectors[tail..].iter_mut() {
            v.assign(Label::Text);
        }

        let Run {
            cursor, mut report, ..
        } = run;
        report.final_ri = cursor.ri;
        report.consumed = cursor.consumed.min(self.reference.len());
        report.stars_seen = cursor.stars_seen;
        log::debug!(
            "aligned {} reference lines: {} headings, {} bodies, {} restarts, {} unmatched",
            report.reference_len,
            report.headings,
            report.bodies,
            report.restarts,
            report.unmatched
        );
        report
    }

    /// A separator closes the current result and opens the next one.
    fn enter_result(&self, run: &mut Run<'_>) {
        let cur = &mut run.cursor;
        cur.stars_seen = true;
        // TODO: decide whether fi == 0 should also get an after_body mark; the
        // corpus was generated with the `fi > 0` guard.
        if cur.fi > 0 && cur.fi < self.fulltext.len() {
            run.vectors[cur.fi].assign(Label::AfterBody);
            cur.fi += 1;
        }
        cur.mode = Mode::ScanningForHeading;
        cur.advance(true);
    }

    fn scan_for_heading(&self, run: &mut Run<'_>) {
        let line = &self.reference[run.cursor.ri];
        let start = run.cursor.fi.min(self.fulltext.len());

        match self.find_equal(line, start, self.fulltext.len()) {
            Some(fi) => {
                for v in run.vectors[start..fi].iter_mut() {
                    v.assign(Label::Text);
                }
                if is_proof_first_word(line) {
                    self.skip_proof_block(run, fi);
                    return;
                }
                run.vectors[fi].assign(Label::Heading);
                run.report.headings += 1;
                let cur = &mut run.cursor;
                cur.heading_fi = fi;
                cur.fi = fi + 1;
                cur.mode = Mode::ScanningForBody;
                cur.advance(true);
            },
            None => {
                for v in run.vectors[start..].iter_mut() {
                    v.assign(Label::Text);
                }
                let cur = &mut run.cursor;
                if !cur.restarted {
                    log::debug!("heading at reference line {} not found, restarting", cur.ri);
                    cur.restarted = true;
                    cur.fi = 0;
                    run.report.restarts += 1;
                } else {
                    log::debug!("giving up on heading at reference line {}", cur.ri);
                    // Continue the previous result from its heading.
                    cur.fi = cur.heading_fi;
                    cur.mode = Mode::ScanningForBody;
                    cur.advance(false);
                    run.report.unmatched += 1;
                }
            },
        }
    }

    fn scan_for_body(&self, run: &mut Run<'_>) {
        let line = &self.reference[run.cursor.ri];
        let n = self.fulltext.len();
        let anchor = run
            .cursor
            .heading_fi
            .saturating_sub(self.config.body_backtrack)
            .min(n);
        let ignorable = is_ignorable_with(line, self.config.noise_chars);

        // Short lines repeat all over a paper, so they are only looked for
        // right next to the anchor and never restarted.
        let (start, end) = if ignorable {
            (anchor, (anchor + self.config.ignorable_lookahead).min(n))
        } else if run.cursor.restarted {
            (0, anchor)
        } else {
            (anchor, n)
        };

        match self.find_equal(line, start, end) {
            Some(fi) if is_proof_first_word(line) => self.skip_proof_block(run, fi),
            Some(fi) => {
                run.vectors[fi].assign(Label::Body);
                run.report.bodies += 1;
                run.cursor.fi = fi + 1;
                run.cursor.advance(true);
            },
            None if !ignorable && !run.cursor.restarted => {
                log::debug!(
                    "body line {} not found after line {}, searching from the start",
                    run.cursor.ri,
                    anchor
                );
                run.cursor.restarted = true;
                run.report.restarts += 1;
            },
            None => {
                run.report.unmatched += 1;
                run.cursor.advance(false);
            },
        }
    }

    /// The result continues with a proof: drop the rest of it.
    fn skip_proof_block(&self, run: &mut Run<'_>, fi: usize) {
        let cur = &mut run.cursor;
        log::debug!("proof block at reference line {}, skipping to next separator", cur.ri);
        cur.fi = fi;
        cur.mode = Mode::ScanningForBody;
        while cur.ri < self.reference.len() && !is_separator(&self.reference[cur.ri]) {
            cur.advance(true);
            run.report.proof_skipped += 1;
        }
    }

    fn find_equal(&self, line: &Line, start: usize, end: usize) -> Option<usize> {
        (start..end).find(|&fi| self.oracle.equal(line, &self.fulltext[fi]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extract_all;

    fn lines(texts: &[&str]) -> Vec<Line> {
        texts.iter().map(|t| Line::from_text(t)).collect()
    }

    fn align(full: &[&str], reference: &[&str]) -> (Vec<Label>, AlignmentReport) {
        let fulltext = lines(full);
        let reference = lines(reference);
        let config = AlignmentConfig::default();
        let mut vectors = extract_all(&fulltext);
        let report = AlignmentEngine::new(&fulltext, &reference, &config).run(&mut vectors);
        (vectors.iter().map(|v| v.label).collect(), report)
    }

    #[test]
    fn test_heading_and_body() {
        let (labels, report) = align(
            &["intro words here", "Theorem 1 holds", "for every group G", "closing remark here"],
            &["***", "Theorem 1 holds", "for every group G", "***"],
        );
        assert_eq!(
            labels,
            vec![Label::Text, Label::Heading, Label::Body, Label::AfterBody]
        );
        assert!(report.stars_seen);
        assert_eq!(report.headings, 1);
        assert_eq!(report.bodies, 1);
        assert_eq!(report.consumed, 4);
        assert_eq!(report.final_ri, 4);
    }

    #[test]
    fn test_body_tolerates_swapped_lines() {
        let (labels, report) = align(
            &[
                "Lemma 2 states",
                "second statement line",
                "first statement line",
                "unrelated prose continues",
            ],
            &["***", "Lemma 2 states", "first statement line", "second statement line"],
        );
        assert_eq!(labels[0], Label::Heading);
        assert_eq!(labels[1], Label::Body);
        assert_eq!(labels[2], Label::Body);
        assert_eq!(report.unmatched, 0);
    }

    #[test]
    fn test_missing_body_line_uses_one_restart() {
        let (_, report) = align(
            &["Theorem 4 says", "something true"],
            &["***", "Theorem 4 says", "never printed anywhere", "something true"],
        );
        assert_eq!(report.restarts, 1);
        assert_eq!(report.unmatched, 1);
        assert_eq!(report.bodies, 1);
    }

    #[test]
    fn test_ignorable_line_never_restarts() {
        let (_, report) = align(&["Theorem 5 says", "x"], &["***", "Theorem 5 says", "(1)"]);
        assert_eq!(report.restarts, 0);
        assert_eq!(report.unmatched, 1);
    }

    #[test]
    fn test_ignorable_search_is_bounded() {
        let mut full = vec!["Theorem 6 holds now"];
        full.extend(std::iter::repeat("filler prose line").take(20));
        full.push("(7)");
        let (labels, report) = align(&full, &["***", "Theorem 6 holds now", "(7)"]);
        assert_eq!(labels[21], Label::Text);
        assert_eq!(report.unmatched, 1);
    }

    #[test]
    fn test_missing_heading_gives_up_after_restart() {
        let (labels, report) = align(&["plain text only", "more plain text"], &["***", "Theorem 9 absent"]);
        assert_eq!(labels, vec![Label::Text, Label::Text]);
        assert_eq!(report.restarts, 1);
        assert_eq!(report.unmatched, 1);
        assert_eq!(report.headings, 0);
    }

    #[test]
    fn test_proof_block_is_skipped() {
        let (labels, report) = align(
            &["Some text here", "Proof of corollary", "we argue directly", "end of section"],
            &["***", "Proof of corollary", "we argue directly", "***"],
        );
        assert!(!labels.contains(&Label::Body));
        assert!(!labels.contains(&Label::Heading));
        assert_eq!(report.proof_skipped, 2);
        assert_eq!(report.consumed, 4);
    }

    #[test]
    fn test_empty_streams_not_attempted() {
        let (labels, report) = align(&["a line"], &[]);
        assert_eq!(labels, vec![Label::Unset]);
        assert!(!report.stars_seen);

        let (labels, report) = align(&[], &["***"]);
        assert!(labels.is_empty());
        assert!(!report.stars_seen);
    }

    #[test]
    fn test_no_separator_leaves_stars_unseen() {
        let (_, report) = align(&["Theorem 1 holds"], &["Theorem 1 holds", "Theorem 1 holds"]);
        assert!(!report.stars_seen);
        assert_eq!(report.headings, 1);
    }

    #[test]
    fn test_recall() {
        let report = AlignmentReport {
            reference_len: 10,
            consumed: 7,
            ..Default::default()
        };
        assert!((report.recall() - 0.7).abs() < 1e-9);
        assert_eq!(AlignmentReport::default().recall(), 0.0);
    }
}
