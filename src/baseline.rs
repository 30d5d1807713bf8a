//! Rule-based tagger working from features alone.
//!
//! Used as a reference point for the aligned labels: it needs no results
//! file, so its agreement with the alignment shows how much the alignment
//! adds over font and keyword heuristics.

use crate::features::FeatureVector;
use crate::label::Label;

/// Italic share above which a line continuing a result counts as body.
pub const BODY_ITALICNESS: f64 = 0.5;

/// Math-font share above which a line continuing a result counts as body.
pub const BODY_MATHNESS: f64 = 0.6;

fn looks_like_body(v: &FeatureVector) -> bool {
    (v.italicness > BODY_ITALICNESS || v.mathness > BODY_MATHNESS) && !v.proof_first_word
}

/// Tag every line from its features and the previous tag.
///
/// The first and last lines are always text.
pub fn tag_lines(vectors: &[FeatureVector]) -> Vec<Label> {
    let n = vectors.len();
    let mut labels: Vec<Label> = Vec::with_capacity(n);

    for (i, v) in vectors.iter().enumerate() {
        let previous = labels.last().copied();
        let label = if i == 0 || i + 1 == n {
            Label::Text
        } else if v.heading_first_word {
            Label::Heading
        } else if matches!(previous, Some(Label::Heading | Label::Body)) {
            if looks_like_body(v) {
                Label::Body
            } else {
                Label::AfterBody
            }
        } else {
            Label::Text
        };
        labels.push(label);
    }

    labels
}

/// Share of positions where the two label sequences agree.
///
/// Compared over the shorter sequence; `0.0` when either is empty.
pub fn agreement(predicted: &[Label], expected: &[Label]) -> f64 {
    let n = predicted.len().min(expected.len());
    if n == 0 {
        return 0.0;
    }
    let same = predicted
        .iter()
        .zip(expected)
        .filter(|(p, e)| p == e)
        .count();
    same as f64 / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::{Line, Word};
    use Label::*;

    fn italic_line(text: &str) -> Line {
        Line::new(
            text.split_whitespace()
                .map(|w| Word::new(vec!["X+CMTI10".to_string(); w.chars().count()], w))
                .collect(),
        )
    }

    fn vector(line: &Line) -> FeatureVector {
        FeatureVector::from_line(line)
    }

    #[test]
    fn test_tag_result_block() {
        let vectors = vec![
            vector(&Line::from_text("Introduction text")),
            vector(&Line::from_text("Theorem 1.")),
            vector(&italic_line("every graph is nice")),
            vector(&italic_line("and also small")),
            vector(&Line::from_text("Proof. By induction.")),
            vector(&Line::from_text("more text")),
            vector(&Line::from_text("the end")),
        ];
        assert_eq!(
            tag_lines(&vectors),
            vec![Text, Heading, Body, Body, AfterBody, Text, Text]
        );
    }

    #[test]
    fn test_italic_proof_line_is_not_body() {
        let vectors = vec![
            vector(&Line::from_text("a")),
            vector(&Line::from_text("Lemma 2")),
            vector(&italic_line("Proof follows")),
            vector(&Line::from_text("b")),
        ];
        assert_eq!(tag_lines(&vectors), vec![Text, Heading, AfterBody, Text]);
    }

    #[test]
    fn test_boundaries_are_text() {
        let vectors = vec![vector(&Line::from_text("Theorem 1"))];
        assert_eq!(tag_lines(&vectors), vec![Text]);
        assert!(tag_lines(&[]).is_empty());
    }

    #[test]
    fn test_agreement() {
        assert_eq!(agreement(&[Text, Heading, Body, Text], &[Text, Heading, Text, Text]), 0.75);
        assert_eq!(agreement(&[], &[Text]), 0.0);
        assert_eq!(agreement(&[Text, Text], &[Text]), 1.0);
    }
}
