//! Python bindings via PyO3.
//!
//! ```python
//! import theorem_tagger
//!
//! verdict, rows = theorem_tagger.label_xml_pair("1234_xml.xml", "1234_resxml.xml")
//! summary = theorem_tagger.process_corpus("results_pdf_xml", "training_data")
//! ```

use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::path::PathBuf;

use crate::config::AlignmentConfig;
use crate::corpus::{label_pair, CorpusOptions, CorpusProcessor, DocumentPair};
use crate::error::Error;

type Row = (usize, f64, f64, f64, bool, bool, f64, bool, String);

fn to_py_err(e: Error) -> PyErr {
    match e {
        Error::Io(_) | Error::Read { .. } | Error::MissingDirectory(_) => {
            PyIOError::new_err(e.to_string())
        },
        Error::InvalidConfig(_) => PyValueError::new_err(e.to_string()),
        _ => PyRuntimeError::new_err(e.to_string()),
    }
}

/// Label one full-text / results pair.
///
/// Args:
///     fulltext_path (str): Full-text textline XML
///     results_path (str): Results textline XML
///
/// Returns:
///     tuple[str, list[tuple]]: verdict name and one row per full-text line
///     (`words_num, average_word_length, italicness, mathness,
///     heading_first_word, proof_first_word, boldness_first_word,
///     capital_first_letter, type`). Rows are empty unless the verdict is
///     `succeeded`.
#[pyfunction]
fn label_xml_pair(fulltext_path: PathBuf, results_path: PathBuf) -> PyResult<(String, Vec<Row>)> {
    let pair = DocumentPair {
        name: fulltext_path.to_string_lossy().into_owned(),
        fulltext: fulltext_path,
        results: results_path,
    };
    let doc = label_pair(&pair, &AlignmentConfig::default()).map_err(to_py_err)?;
    let rows = doc
        .training_rows()
        .unwrap_or_default()
        .iter()
        .map(|v| {
            (
                v.words_num,
                v.average_word_length,
                v.italicness,
                v.mathness,
                v.heading_first_word,
                v.proof_first_word,
                v.boldness_first_word,
                v.capital_first_letter,
                v.label.to_string(),
            )
        })
        .collect();
    Ok((doc.verdict().name().to_string(), rows))
}

/// Generate training CSVs for a whole corpus directory.
///
/// Args:
///     input_dir (str): Directory of `_xml.xml` / `_resxml.xml` pairs
///     output_dir (str): Directory receiving the CSV files
///     overwrite (bool): Regenerate existing output (default: False)
///
/// Returns:
///     dict: verdict counts and the list of failed documents
#[pyfunction]
#[pyo3(signature = (input_dir, output_dir, overwrite=false))]
fn process_corpus<'py>(
    py: Python<'py>,
    input_dir: PathBuf,
    output_dir: PathBuf,
    overwrite: bool,
) -> PyResult<Bound<'py, PyDict>> {
    let options = CorpusOptions::new(input_dir, output_dir).with_overwrite(overwrite);
    let processor = CorpusProcessor::new(AlignmentConfig::default(), options).map_err(to_py_err)?;
    let summary = processor.run().map_err(to_py_err)?;

    let dict = PyDict::new(py);
    dict.set_item("total", summary.total)?;
    dict.set_item("succeeded", summary.succeeded)?;
    dict.set_item("failed", summary.failed)?;
    dict.set_item("invalid", summary.invalid)?;
    dict.set_item("skipped", summary.skipped)?;
    dict.set_item("errors", summary.errors)?;
    dict.set_item("failed_documents", summary.failed_documents)?;
    Ok(dict)
}

#[pymodule]
fn theorem_tagger(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(label_xml_pair, m)?)?;
    m.add_function(wrap_pyfunction!(process_corpus, m)?)?;
    m.add("VERSION", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
