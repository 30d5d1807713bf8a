//! Corpus driver: pair files, label each document, write training data.
//!
//! A corpus directory holds one `<stem>_xml.xml` full text per paper and,
//! next to it, the `<stem>_resxml.xml` results reference. Documents are
//! processed in parallel; each produces a [`DocumentReport`] and the reports
//! are folded into a [`CorpusSummary`].

use crate::alignment::AlignmentReport;
use crate::baseline;
use crate::config::AlignmentConfig;
use crate::document::{Document, LabeledDocument};
use crate::error::{Error, Result};
use crate::fonts::FontInventory;
use crate::outcome::Verdict;
use crate::output;
use crate::xml;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix of full-text files.
pub const FULLTEXT_SUFFIX: &str = "_xml.xml";
/// Suffix of results reference files.
pub const RESULTS_SUFFIX: &str = "_resxml.xml";
/// Suffix of the feature CSV.
pub const TRAINING_SUFFIX: &str = "_training.csv";
/// Suffix of the feature CSV with the line text column.
pub const TRAINING_TEXT_SUFFIX: &str = "_training_plus_text.csv";

/// Results path belonging to a full-text path, if it has the full-text suffix.
pub fn results_path_for(fulltext: &Path) -> Option<PathBuf> {
    let name = fulltext.file_name()?.to_str()?;
    let stem = name.strip_suffix(FULLTEXT_SUFFIX)?;
    Some(fulltext.with_file_name(format!("{}{}", stem, RESULTS_SUFFIX)))
}

/// A full-text file and its expected results file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPair {
    /// Paper stem shared by both files
    pub name: String,
    /// Full-text XML
    pub fulltext: PathBuf,
    /// Results XML; may not exist
    pub results: PathBuf,
}

impl DocumentPair {
    /// Pair a full-text file with its results file by name.
    pub fn from_fulltext(path: impl Into<PathBuf>) -> Option<Self> {
        let fulltext = path.into();
        let name = fulltext
            .file_name()?
            .to_str()?
            .strip_suffix(FULLTEXT_SUFFIX)?
            .to_string();
        let results = results_path_for(&fulltext)?;
        Some(Self {
            name,
            fulltext,
            results,
        })
    }

    /// Where the feature CSV of this document goes.
    pub fn training_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}{}", self.name, TRAINING_SUFFIX))
    }

    /// Where the feature CSV with text goes.
    pub fn training_text_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}{}", self.name, TRAINING_TEXT_SUFFIX))
    }
}

/// Every full-text file of a directory, sorted by name.
pub fn discover_pairs(dir: impl AsRef<Path>) -> Result<Vec<DocumentPair>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::MissingDirectory(dir.to_path_buf()));
    }

    let mut pairs: Vec<DocumentPair> = fs::read_dir(dir)?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                log::warn!("{}: unreadable directory entry: {}", dir.display(), e);
                None
            },
        })
        .filter(|p| p.is_file())
        .filter_map(DocumentPair::from_fulltext)
        .collect();
    pairs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(pairs)
}

/// Read, align and judge one pair.
pub fn label_pair(pair: &DocumentPair, config: &AlignmentConfig) -> Result<LabeledDocument> {
    let fulltext = xml::read_lines(&pair.fulltext)?;
    let reference = xml::read_lines(&pair.results)?;
    Ok(Document::new(fulltext, reference).label(config))
}

/// What happened to one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Aligned well enough; training files written
    Succeeded,
    /// Aligned, but too little of the reference was consumed
    Failed,
    /// Empty input or no separator in the reference
    Invalid,
    /// Not processed: output present or results missing
    Skipped,
    /// Files could not be read, parsed or written
    Error,
}

impl From<Verdict> for DocumentStatus {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Succeeded { .. } => DocumentStatus::Succeeded,
            Verdict::Failed { .. } => DocumentStatus::Failed,
            Verdict::Invalid(_) => DocumentStatus::Invalid,
        }
    }
}

/// Per-document entry of the corpus summary.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    /// Paper stem
    pub name: String,
    /// Outcome
    pub status: DocumentStatus,
    /// Reason for skips, errors and invalid verdicts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Consumed fraction of the reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recall: Option<f64>,
    /// Full-text line count
    pub lines: usize,
    /// Engine statistics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<AlignmentReport>,
    /// Share of lines where the rule-based tagger agrees with the alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_agreement: Option<f64>,
}

impl DocumentReport {
    fn bare(name: &str, status: DocumentStatus, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            detail: Some(detail.into()),
            recall: None,
            lines: 0,
            alignment: None,
            baseline_agreement: None,
        }
    }

    fn skipped(name: &str, detail: impl Into<String>) -> Self {
        Self::bare(name, DocumentStatus::Skipped, detail)
    }

    fn error(name: &str, error: &Error) -> Self {
        Self::bare(name, DocumentStatus::Error, error.to_string())
    }
}

/// Totals over a corpus run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorpusSummary {
    /// Documents seen
    pub total: usize,
    /// Documents with training output
    pub succeeded: usize,
    /// Documents below the recall bar
    pub failed: usize,
    /// Documents that could not be aligned
    pub invalid: usize,
    /// Documents not processed
    pub skipped: usize,
    /// Documents with I/O or parse errors
    pub errors: usize,
    /// Names of failed documents, in corpus order
    pub failed_documents: Vec<String>,
    /// Every per-document report, in corpus order
    pub documents: Vec<DocumentReport>,
}

impl CorpusSummary {
    /// Fold per-document reports into totals.
    pub fn from_reports(reports: Vec<DocumentReport>) -> Self {
        let mut summary = Self::default();
        for report in reports {
            summary.add(report);
        }
        summary
    }

    fn add(&mut self, report: DocumentReport) {
        self.total += 1;
        match report.status {
            DocumentStatus::Succeeded => self.succeeded += 1,
            DocumentStatus::Failed => {
                self.failed += 1;
                self.failed_documents.push(report.name.clone());
            },
            DocumentStatus::Invalid => self.invalid += 1,
            DocumentStatus::Skipped => self.skipped += 1,
            DocumentStatus::Error => self.errors += 1,
        }
        self.documents.push(report);
    }

    /// Documents that went through alignment.
    pub fn processed(&self) -> usize {
        self.succeeded + self.failed + self.invalid
    }

    /// Write the summary as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }
}

impl FromIterator<DocumentReport> for CorpusSummary {
    fn from_iter<I: IntoIterator<Item = DocumentReport>>(iter: I) -> Self {
        let mut summary = Self::default();
        for report in iter {
            summary.add(report);
        }
        summary
    }
}

/// Where to read from and what to write.
#[derive(Debug, Clone)]
pub struct CorpusOptions {
    /// Directory with `_xml.xml` / `_resxml.xml` pairs
    pub input_dir: PathBuf,
    /// Directory receiving the CSV files
    pub output_dir: PathBuf,
    /// Regenerate documents whose training CSV already exists
    pub overwrite: bool,
    /// Also write the CSV with the line text column
    pub write_text: bool,
}

impl CorpusOptions {
    /// Options for a corpus directory, keeping existing output.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            overwrite: false,
            write_text: true,
        }
    }

    /// Regenerate existing output.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Write the text CSV as well.
    pub fn with_text(mut self, write_text: bool) -> Self {
        self.write_text = write_text;
        self
    }
}

/// Labels a whole corpus directory.
#[derive(Debug, Clone)]
pub struct CorpusProcessor {
    config: AlignmentConfig,
    options: CorpusOptions,
}

impl CorpusProcessor {
    /// Create a processor. The configuration is validated here.
    pub fn new(config: AlignmentConfig, options: CorpusOptions) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, options })
    }

    /// Alignment configuration in use.
    pub fn config(&self) -> &AlignmentConfig {
        &self.config
    }

    /// Corpus options in use.
    pub fn options(&self) -> &CorpusOptions {
        &self.options
    }

    /// Process every pair of the input directory.
    pub fn run(&self) -> Result<CorpusSummary> {
        let pairs = discover_pairs(&self.options.input_dir)?;
        fs::create_dir_all(&self.options.output_dir)?;
        log::info!(
            "Processing {} documents from {}",
            pairs.len(),
            self.options.input_dir.display()
        );

        let reports: Vec<DocumentReport> =
            pairs.par_iter().map(|pair| self.process_pair(pair)).collect();
        let summary = CorpusSummary::from_reports(reports);

        log::info!(
            "{} documents: {} succeeded, {} failed, {} invalid, {} skipped, {} errors",
            summary.total,
            summary.succeeded,
            summary.failed,
            summary.invalid,
            summary.skipped,
            summary.errors
        );
        Ok(summary)
    }

    /// Process one pair. Never fails; problems end up in the report.
    pub fn process_pair(&self, pair: &DocumentPair) -> DocumentReport {
        let output_dir = &self.options.output_dir;
        if !self.options.overwrite && pair.training_path(output_dir).exists() {
            log::debug!("{}: output exists, skipping", pair.name);
            return DocumentReport::skipped(&pair.name, "output exists");
        }
        if !pair.results.is_file() {
            log::warn!("{}: no results file", pair.name);
            return DocumentReport::skipped(&pair.name, "no results file");
        }

        let doc = match label_pair(pair, &self.config) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("{}: {}", pair.name, e);
                return DocumentReport::error(&pair.name, &e);
            },
        };

        let verdict = doc.verdict();
        let predicted = baseline::tag_lines(doc.vectors());
        let mut report = DocumentReport {
            name: pair.name.clone(),
            status: verdict.into(),
            detail: None,
            recall: verdict.recall(),
            lines: doc.vectors().len(),
            alignment: Some(doc.report().clone()),
            baseline_agreement: Some(baseline::agreement(&predicted, &doc.labels())),
        };

        match verdict {
            Verdict::Succeeded { recall } => {
                if let Err(e) = self.write_outputs(pair, &doc) {
                    log::warn!("{}: {}", pair.name, e);
                    report.status = DocumentStatus::Error;
                    report.detail = Some(e.to_string());
                } else {
                    log::info!("{}: succeeded (recall {:.2})", pair.name, recall);
                }
            },
            Verdict::Failed { recall } => {
                log::info!("{}: failed (recall {:.2})", pair.name, recall);
            },
            Verdict::Invalid(reason) => {
                log::warn!("{}: invalid, {}", pair.name, reason);
                report.detail = Some(reason.to_string());
            },
        }

        report
    }

    fn write_outputs(&self, pair: &DocumentPair, doc: &LabeledDocument) -> Result<()> {
        let Some(rows) = doc.training_rows() else {
            return Ok(());
        };
        let output_dir = &self.options.output_dir;
        // A training CSV on disk marks the document as done: write it last.
        if self.options.write_text {
            output::write_training_with_text_csv(
                pair.training_text_path(output_dir),
                rows,
                doc.fulltext(),
            )?;
        }
        let training = pair.training_path(output_dir);
        if let Err(e) = output::write_training_csv(&training, rows) {
            let _ = fs::remove_file(&training);
            return Err(e);
        }
        Ok(())
    }

    /// Font usage over every full text of the input directory.
    ///
    /// Files that fail to parse are logged and left out.
    pub fn font_inventory(&self) -> Result<FontInventory> {
        let pairs = discover_pairs(&self.options.input_dir)?;
        let inventory = pairs
            .par_iter()
            .filter_map(|pair| match xml::read_lines(&pair.fulltext) {
                Ok(lines) => {
                    let mut inventory = FontInventory::new();
                    inventory.add_lines(&lines);
                    Some(inventory)
                },
                Err(e) => {
                    log::warn!("{}: {}", pair.name, e);
                    None
                },
            })
            .reduce(FontInventory::new, |mut a, b| {
                a.merge(b);
                a
            });
        Ok(inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_path_for() {
        assert_eq!(
            results_path_for(Path::new("/data/1234.5678_xml.xml")),
            Some(PathBuf::from("/data/1234.5678_resxml.xml"))
        );
        assert_eq!(results_path_for(Path::new("/data/1234_resxml.xml")), None);
        assert_eq!(results_path_for(Path::new("/data/notes.txt")), None);
    }

    #[test]
    fn test_pair_output_paths() {
        let pair = DocumentPair::from_fulltext("in/paper_xml.xml").unwrap();
        assert_eq!(pair.name, "paper");
        assert_eq!(pair.results, PathBuf::from("in/paper_resxml.xml"));
        assert_eq!(
            pair.training_path(Path::new("out")),
            PathBuf::from("out/paper_training.csv")
        );
        assert_eq!(
            pair.training_text_path(Path::new("out")),
            PathBuf::from("out/paper_training_plus_text.csv")
        );
    }

    #[test]
    fn test_discover_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested_xml.xml")).unwrap();
        fs::write(dir.path().join("paper_xml.xml"), "").unwrap();
        let pairs = discover_pairs(dir.path()).unwrap();
        let names: Vec<&str> = pairs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["paper"]);
    }

    #[test]
    fn test_discover_missing_directory() {
        let err = discover_pairs("/no/such/corpus").unwrap_err();
        assert!(matches!(err, Error::MissingDirectory(_)));
    }

    #[test]
    fn test_summary_fold() {
        let reports = vec![
            DocumentReport::bare("a", DocumentStatus::Succeeded, ""),
            DocumentReport::bare("b", DocumentStatus::Failed, ""),
            DocumentReport::bare("c", DocumentStatus::Failed, ""),
            DocumentReport::skipped("d", "output exists"),
            DocumentReport::bare("e", DocumentStatus::Invalid, ""),
        ];
        let summary: CorpusSummary = reports.into_iter().collect();
        assert_eq!(summary.total, 5);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.processed(), 4);
        assert_eq!(summary.failed_documents, vec!["b", "c"]);
    }

    #[test]
    fn test_processor_rejects_bad_config() {
        let config = AlignmentConfig::default().with_equality_threshold(2.0);
        let result = CorpusProcessor::new(config, CorpusOptions::new("in", "out"));
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_status_from_verdict() {
        assert_eq!(
            DocumentStatus::from(Verdict::Failed { recall: 0.1 }),
            DocumentStatus::Failed
        );
        let json = serde_json::to_string(&DocumentStatus::Succeeded).unwrap();
        assert_eq!(json, "\"succeeded\"");
    }
}
