//! Reader for per-letter, font-tagged textline XML.
//!
//! The expected input is what pdfminer-style extractors write, either whole
//! or as a dump of the `<textline>` elements only:
//!
//! ```text
//! <textline bbox="...">
//!   <text font="ABCDEF+CMBX10" bbox="..." size="9.96">T</text>
//!   <text font="ABCDEF+CMBX10" bbox="..." size="9.96">h</text>
//!   <text> </text>
//!   ...
//! </textline>
//! ```
//!
//! Each `<textline>` becomes one [`Line`]. Whitespace characters and the end of
//! the textline close the current word. `<text>` elements outside a textline
//! (figure labels and the like) are ignored.

use crate::error::{Error, Result};
use crate::line::{Letter, Line, Word};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

#[derive(Debug, Default)]
struct LineBuilder {
    words: Vec<Word>,
    letters: Vec<Letter>,
}

impl LineBuilder {
    fn push(&mut self, ch: char, font: &str) {
        if ch.is_whitespace() {
            self.close_word();
        } else {
            self.letters.push(Letter::new(ch, font));
        }
    }

    fn close_word(&mut self) {
        if !self.letters.is_empty() {
            self.words.push(Word::from_letters(&self.letters));
            self.letters.clear();
        }
    }

    fn finish(mut self) -> Line {
        self.close_word();
        Line::new(self.words)
    }
}

fn font_attribute(e: &BytesStart<'_>) -> Result<String> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::InvalidAttr)?;
        if attr.key.as_ref() == b"font" {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    Ok(String::new())
}

/// Parse textline XML into lines.
pub fn parse_lines(xml: &str) -> Result<Vec<Line>> {
    let mut reader = Reader::from_str(xml);
    let mut lines = Vec::new();
    let mut current: Option<LineBuilder> = None;
    // Font and characters of the open <text> element
    let mut glyph: Option<(String, String)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"textline" => current = Some(LineBuilder::default()),
                b"text" => glyph = Some((font_attribute(&e)?, String::new())),
                _ => {},
            },
            Event::Empty(e) if e.name().as_ref() == b"textline" => lines.push(Line::default()),
            Event::Text(t) => {
                if let Some((_, chars)) = glyph.as_mut() {
                    chars.push_str(&t.unescape()?);
                }
            },
            Event::End(e) => match e.name().as_ref() {
                b"text" => {
                    if let (Some((font, chars)), Some(builder)) = (glyph.take(), current.as_mut()) {
                        for ch in chars.chars() {
                            builder.push(ch, &font);
                        }
                    }
                },
                b"textline" => {
                    if let Some(builder) = current.take() {
                        lines.push(builder.finish());
                    }
                },
                _ => {},
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Ok(lines)
}

/// Read and parse a textline XML file.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<Line>> {
    let path = path.as_ref();
    let xml = std::fs::read_to_string(path).map_err(|e| Error::reading(path, e.into()))?;
    let lines = parse_lines(&xml).map_err(|e| Error::reading(path, e))?;
    log::debug!("{}: {} lines", path.display(), lines.len());
    Ok(lines)
}
