//! Line scanner for `.comp` documents
//!
//! Parsing happens in two independent sweeps over the trimmed input. The
//! header sweep reads `name`, `version` and `author` until it meets a
//! `properties` key; the block sweep locates the `properties:` marker on its
//! own and reads every following line as a property.

use tracing::debug;

use crate::comp::errors::CompIssue;
use crate::comp::model::ParsedDocument;
use crate::comp::report::ReportBuilder;

/// Key that opens the properties block
const PROPERTIES_KEY: &str = "properties";

/// Prefix a trimmed, lower-cased line must start with to open the block
const PROPERTIES_MARKER: &str = "properties:";

/// How far parsing got before it stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// No non-blank content; nothing else should run
    Empty,
    /// Header was read but no properties block exists
    MissingSection,
    /// Both sweeps ran
    Complete,
}

/// Parser for the header fields and properties block
#[derive(Debug, Clone, Copy, Default)]
pub struct CompParser;

impl CompParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse `text` into the builder's document, recording syntax issues
    pub fn parse(&self, text: &str, report: &mut ReportBuilder) -> ParseStatus {
        let lines = split_lines(text.trim_matches(is_padding));
        if lines.is_empty() {
            report.push(CompIssue::EmptyFile);
            return ParseStatus::Empty;
        }

        self.parse_header(&lines, report.document_mut());

        let Some(marker) = find_properties_marker(&lines) else {
            debug!(lines = lines.len(), "no properties marker found");
            report.push(CompIssue::MissingPropertiesSection);
            return ParseStatus::MissingSection;
        };

        debug!(lines = lines.len(), marker, "located properties block");
        self.parse_properties(&lines[marker + 1..], report);
        ParseStatus::Complete
    }

    fn parse_header(&self, lines: &[&str], document: &mut ParsedDocument) {
        for line in lines {
            let Some((key, value)) = split_key_value(line.trim()) else {
                continue;
            };

            let key = key.to_ascii_lowercase();
            if key == PROPERTIES_KEY {
                break;
            }
            document.set_header(&key, value.to_string());
        }
    }

    fn parse_properties(&self, lines: &[&str], report: &mut ReportBuilder) {
        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match split_key_value(line) {
                Some((key, value)) => {
                    report.document_mut().properties.insert(key.to_ascii_lowercase(), value);
                }
                None => report.push(CompIssue::MalformedProperty { line: line.to_string() }),
            }
        }
    }
}

/// Split on every line boundary a `.comp` file may use.
///
/// `\r\n` counts as one break. A trailing break does not produce an empty
/// last line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..idx]);
        start = idx + c.len_utf8();
        if c == '\r' && chars.next_if(|&(_, next)| next == '\n').is_some() {
            start += 1;
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Characters stripped from both ends of the input, including the ASCII
/// separator controls
fn is_padding(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Index of the first line opening the properties block
fn find_properties_marker(lines: &[&str]) -> Option<usize> {
    lines.iter().position(|line| line.trim().to_lowercase().starts_with(PROPERTIES_MARKER))
}

/// Split a trimmed line of the shape `key: value`.
///
/// The key is everything before the first colon, minus trailing whitespace,
/// and must be a non-empty run of ASCII letters, digits and underscores. The
/// value is the trimmed remainder and may itself contain colons.
pub fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim_end();
    if key.is_empty() || !key.chars().all(is_key_char) {
        return None;
    }
    Some((key, value.trim()))
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
