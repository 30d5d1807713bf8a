//! Line role labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a full-text line.
///
/// `Unset` only exists between alignment and gap filling; every line
/// leaving the pipeline carries one of the four other labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    /// Opening line of a theorem-like result
    Heading,
    /// Statement line following a heading
    Body,
    /// First line after a body span
    AfterBody,
    /// Ordinary text
    Text,
    /// Not decided yet
    #[default]
    Unset,
}

impl Label {
    /// The four labels a finished line can carry.
    pub const FINAL: [Label; 4] = [Label::Heading, Label::Body, Label::AfterBody, Label::Text];

    /// String form used in training files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Heading => "heading",
            Label::Body => "body",
            Label::AfterBody => "after_body",
            Label::Text => "text",
            Label::Unset => "unset",
        }
    }

    /// Whether the label is still undecided.
    pub fn is_unset(&self) -> bool {
        matches!(self, Label::Unset)
    }

    /// Whether writing `new` over `self` is allowed during alignment.
    ///
    /// Blank slots accept anything. `Text` never overwrites a decided label
    /// and a `Heading` is never overwritten.
    pub fn accepts(&self, new: Label) -> bool {
        self.is_unset() || (*self != Label::Heading && new != Label::Text)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown label string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown label: {0}")]
pub struct ParseLabelError(pub String);

impl FromStr for Label {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heading" => Ok(Label::Heading),
            "body" => Ok(Label::Body),
            "after_body" => Ok(Label::AfterBody),
            "text" => Ok(Label::Text),
            "unset" => Ok(Label::Unset),
            other => Err(ParseLabelError(other.to_string())),
        }
    }
}
