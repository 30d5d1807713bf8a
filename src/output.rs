//! Training CSV writers.
//!
//! Two layouts are written per document: the feature rows alone, and the
//! same rows with the plain text of the line appended as a last column.

use crate::error::Result;
use crate::features::FeatureVector;
use crate::label::Label;
use crate::line::Line;
use serde::Serialize;
use std::io;
use std::path::Path;

/// Feature row plus line text. The csv serializer does not support
/// flattened structs, so the columns are repeated here.
#[derive(Debug, Serialize)]
struct TextRow<'a> {
    words_num: usize,
    average_word_length: f64,
    italicness: f64,
    mathness: f64,
    heading_first_word: bool,
    proof_first_word: bool,
    boldness_first_word: f64,
    capital_first_letter: bool,
    #[serde(rename = "type")]
    label: Label,
    text: &'a str,
}

impl<'a> TextRow<'a> {
    fn new(v: &FeatureVector, text: &'a str) -> Self {
        Self {
            words_num: v.words_num,
            average_word_length: v.average_word_length,
            italicness: v.italicness,
            mathness: v.mathness,
            heading_first_word: v.heading_first_word,
            proof_first_word: v.proof_first_word,
            boldness_first_word: v.boldness_first_word,
            capital_first_letter: v.capital_first_letter,
            label: v.label,
            text,
        }
    }
}

/// Write feature rows with a header to any writer.
pub fn write_training<W: io::Write>(writer: W, vectors: &[FeatureVector]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for v in vectors {
        wtr.serialize(v)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write feature rows followed by the plain text of their line.
///
/// Rows and lines are paired by index; extra entries on either side are
/// dropped.
pub fn write_training_with_text<W: io::Write>(
    writer: W,
    vectors: &[FeatureVector],
    lines: &[Line],
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (v, line) in vectors.iter().zip(lines) {
        let text = line.to_plain_text();
        wtr.serialize(TextRow::new(v, &text))?;
    }
    wtr.flush()?;
    Ok(())
}

/// [`write_training`] into a file.
pub fn write_training_csv(path: impl AsRef<Path>, vectors: &[FeatureVector]) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_training(io::BufWriter::new(file), vectors)
}

/// [`write_training_with_text`] into a file.
pub fn write_training_with_text_csv(
    path: impl AsRef<Path>,
    vectors: &[FeatureVector],
    lines: &[Line],
) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_training_with_text(io::BufWriter::new(file), vectors, lines)
}
