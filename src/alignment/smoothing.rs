//! Gap filling and local smoothing of aligned labels.
//!
//! The engine leaves lines it never visited [`Label::Unset`]. [`fill_gaps`]
//! decides them from their neighbours, then [`smooth`] removes isolated
//! single-line anomalies with 3-line windows.

use crate::features::FeatureVector;
use crate::label::Label;

/// Label for an unset interior line from its left and right neighbours.
///
/// `tr` may still be unset; it is then treated as missing. The first
/// matching rule wins:
///
/// | left | right | result |
/// |---|---|---|
/// | x | x (not missing) | x |
/// | text, after_body | heading | text |
/// | text | body, after_body | heading |
/// | heading | body, after_body | body |
/// | heading, body | text, missing | after_body |
/// | otherwise | | text |
pub fn infer_gap(tl: Label, tr: Label) -> Label {
    use Label::*;

    let tr = if tr.is_unset() { None } else { Some(tr) };
    match (tl, tr) {
        (left, Some(right)) if left == right => left,
        (Text | AfterBody, Some(Heading)) => Text,
        (Text, Some(Body | AfterBody)) => Heading,
        (Heading, Some(Body | AfterBody)) => Body,
        (Heading | Body, Some(Text) | None) => AfterBody,
        _ => Text,
    }
}

/// Decide every unset line, left to right. Returns how many were filled.
///
/// The first and last lines default to text.
pub fn fill_gaps(vectors: &mut [FeatureVector]) -> usize {
    let n = vectors.len();
    let mut filled = 0;
    for i in 0..n {
        if !vectors[i].label.is_unset() {
            continue;
        }
        vectors[i].label = if i == 0 || i + 1 == n {
            Label::Text
        } else {
            infer_gap(vectors[i - 1].label, vectors[i + 1].label)
        };
        filled += 1;
    }
    filled
}

/// One in-place left-to-right pass of the 3-line rules. Returns the number
/// of lines changed.
///
/// - `body, text, body`: centre becomes body
/// - `text, body|after_body, text`: centre becomes text
/// - `body, *, text`: centre becomes after_body
pub fn smoothing_pass(vectors: &mut [FeatureVector]) -> usize {
    let mut changed = 0;
    for i in 1..vectors.len().saturating_sub(1) {
        let tl = vectors[i - 1].label;
        let tr = vectors[i + 1].label;
        let old = vectors[i].label;
        let mut t = old;

        if tl == Label::Body && tr == Label::Body && t == Label::Text {
            t = Label::Body;
        }
        if tl == Label::Text && tr == Label::Text && matches!(t, Label::Body | Label::AfterBody) {
            t = Label::Text;
        }
        if tl == Label::Body && tr == Label::Text {
            t = Label::AfterBody;
        }

        if t != old {
            vectors[i].label = t;
            changed += 1;
        }
    }
    changed
}

/// Repeat [`smoothing_pass`] until nothing changes, at most `max_passes` times.
///
/// A single pass is not a fixed point: a change to a right neighbour can
/// enable a rule on a window already visited. Returns the total number of
/// changes.
pub fn smooth(vectors: &mut [FeatureVector], max_passes: usize) -> usize {
    let mut total = 0;
    for _ in 0..max_passes {
        let changed = smoothing_pass(vectors);
        if changed == 0 {
            return total;
        }
        total += changed;
    }
    log::warn!("smoothing did not settle after {} passes", max_passes);
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::Line;
    use Label::*;

    fn vectors(labels: &[Label]) -> Vec<FeatureVector> {
        labels
            .iter()
            .map(|&label| {
                let mut v = FeatureVector::from_line(&Line::from_text("line"));
                v.label = label;
                v
            })
            .collect()
    }

    fn labels(vectors: &[FeatureVector]) -> Vec<Label> {
        vectors.iter().map(|v| v.label).collect()
    }

    #[test]
    fn test_infer_gap_table() {
        assert_eq!(infer_gap(Body, Body), Body);
        assert_eq!(infer_gap(AfterBody, Heading), Text);
        assert_eq!(infer_gap(Text, Heading), Text);
        assert_eq!(infer_gap(Text, Body), Heading);
        assert_eq!(infer_gap(Text, AfterBody), Heading);
        assert_eq!(infer_gap(Heading, Body), Body);
        assert_eq!(infer_gap(Heading, Text), AfterBody);
        assert_eq!(infer_gap(Body, Unset), AfterBody);
        assert_eq!(infer_gap(AfterBody, Body), Text);
        assert_eq!(infer_gap(Text, Unset), Text);
    }

    #[test]
    fn test_fill_gaps_boundaries_default_to_text() {
        let mut v = vectors(&[Unset, Heading, Unset]);
        assert_eq!(fill_gaps(&mut v), 2);
        assert_eq!(labels(&v), vec![Text, Heading, Text]);
    }

    #[test]
    fn test_fill_gaps_uses_filled_left_neighbour() {
        let mut v = vectors(&[Heading, Unset, Unset, Body]);
        fill_gaps(&mut v);
        // index 1: heading | unset -> after_body; index 2: after_body | body -> text
        assert_eq!(labels(&v), vec![Heading, AfterBody, Text, Body]);
    }

    #[test]
    fn test_isolated_text_inside_body() {
        let mut v = vectors(&[Body, Text, Body]);
        smooth(&mut v, 8);
        assert_eq!(labels(&v), vec![Body, Body, Body]);
    }

    #[test]
    fn test_isolated_body_inside_text() {
        let mut v = vectors(&[Text, Body, Text, AfterBody, Text]);
        smoothing_pass(&mut v);
        assert_eq!(labels(&v), vec![Text, Text, Text, Text, Text]);
    }

    #[test]
    fn test_last_line_before_text_becomes_after_body() {
        let mut v = vectors(&[Body, Body, Body, Text, Text]);
        smooth(&mut v, 8);
        assert_eq!(labels(&v), vec![Body, Body, AfterBody, Text, Text]);
    }

    #[test]
    fn test_single_pass_is_not_a_fixed_point() {
        let mut v = vectors(&[Body, Text, AfterBody, Text]);
        assert_eq!(smoothing_pass(&mut v), 1);
        assert_eq!(labels(&v), vec![Body, Text, Text, Text]);
        assert_eq!(smoothing_pass(&mut v), 1);
        assert_eq!(labels(&v), vec![Body, AfterBody, Text, Text]);

        let mut w = vectors(&[Body, Text, AfterBody, Text]);
        smooth(&mut w, 8);
        assert_eq!(smoothing_pass(&mut w), 0);
    }

    #[test]
    fn test_short_sequences_untouched() {
        let mut v = vectors(&[Body, Text]);
        assert_eq!(smooth(&mut v, 8), 0);
        let mut empty: Vec<FeatureVector> = Vec::new();
        assert_eq!(fill_gaps(&mut empty), 0);
        assert_eq!(smooth(&mut empty, 8), 0);
    }
}
