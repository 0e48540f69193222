//! Field scanner for form-field CSV.
//!
//! The scanner walks the input once, left to right, with an explicit byte
//! cursor. For each field it looks at the character under the cursor to pick
//! a [`ScanMode`], then searches forward for the field-end marker of that
//! mode:
//!
//! - Unquoted: a delimiter (`,`, `\r` or `\n`) followed by any number of spaces.
//! - Quoted: a closing `"` (after skipping `""` pairs), a delimiter, then any
//!   number of spaces. An odd run of quotes at the cursor that ends right
//!   before a delimiter closes on its last quote, so `""",` holds `"`.
//!
//! When no marker can be found the scanner stops and the caller picks up the
//! rest of the input through [`Scanner::remainder`].

use std::borrow::Cow;

use super::escape::unescape_quoted;

const QUOTE: u8 = b'"';
const COMMA: u8 = b',';
const CR: u8 = b'\r';
const LF: u8 = b'\n';
const SPACE: u8 = b' ';

/// How a field is being scanned, decided by its first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Field starts with `"`; delimiters inside the quotes are content.
    Quoted,
    /// Any other field; ends at the next delimiter.
    Unquoted,
}

/// The delimiter that ended a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// `,` - the record continues.
    Comma,
    /// `\r` or `\n` - the record ends.
    LineBreak,
}

impl Terminator {
    fn from_delimiter(byte: u8) -> Self {
        if byte == COMMA {
            Terminator::Comma
        } else {
            Terminator::LineBreak
        }
    }
}

/// A field produced by the scanner, already un-escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedField<'a> {
    /// Field content.
    pub value: Cow<'a, str>,
    /// Mode the field was scanned in.
    pub mode: ScanMode,
    /// Delimiter that ended the field.
    pub terminator: Terminator,
}

/// Location of a field-end marker.
#[derive(Debug, Clone, Copy)]
struct Marker {
    /// First byte of the marker (the closing quote in quoted mode).
    start: usize,
    /// Delimiter byte inside the marker.
    delimiter: u8,
    /// First byte after the marker, spaces included.
    end: usize,
}

fn is_delimiter(byte: u8) -> bool {
    matches!(byte, COMMA | CR | LF)
}

/// Cursor-based scanner over a single input string.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Scanner<'a> {
    /// Create a scanner positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Byte offset of the next unscanned field.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Text from the cursor to the end of input.
    pub fn remainder(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Mode for the field under the cursor, or `None` at end of input.
    pub fn mode(&self) -> Option<ScanMode> {
        self.input.as_bytes().get(self.position).map(|&b| {
            if b == QUOTE {
                ScanMode::Quoted
            } else {
                ScanMode::Unquoted
            }
        })
    }

    /// Build a marker for the delimiter at `at`, swallowing trailing spaces.
    fn marker_at(&self, start: usize, at: usize) -> Marker {
        let bytes = self.input.as_bytes();
        let mut end = at + 1;
        while bytes.get(end) == Some(&SPACE) {
            end += 1;
        }
        Marker {
            start,
            delimiter: bytes[at],
            end,
        }
    }

    fn find_unquoted_end(&self) -> Option<Marker> {
        let bytes = self.input.as_bytes();
        (self.position..bytes.len())
            .find(|&i| is_delimiter(bytes[i]))
            .map(|at| self.marker_at(at, at))
    }

    fn find_quoted_end(&self) -> Option<Marker> {
        let bytes = self.input.as_bytes();

        // An odd run of three or more quotes right before a delimiter is
        // `("")*` plus the closing quote, counted from the cursor.
        let run = bytes[self.position..]
            .iter()
            .take_while(|&&b| b == QUOTE)
            .count();
        if run >= 3 && run % 2 == 1 {
            if let Some(&next) = bytes.get(self.position + run) {
                if is_delimiter(next) {
                    let close = self.position + run - 1;
                    return Some(self.marker_at(close, close + 1));
                }
            }
        }

        // Skip the opening quote.
        let mut i = self.position + 1;

        while i < bytes.len() {
            if bytes[i] != QUOTE {
                i += 1;
                continue;
            }
            match bytes.get(i + 1) {
                Some(&QUOTE) => i += 2,
                Some(&next) if is_delimiter(next) => return Some(self.marker_at(i, i + 1)),
                // Stray quote, or a quote at end of input.
                _ => i += 1,
            }
        }

        None
    }

    /// Scan the next field, or `None` if no field-end marker remains.
    ///
    /// On `None` the cursor is left where it was, so [`remainder`](Self::remainder)
    /// returns the unterminated tail verbatim.
    pub fn next_field(&mut self) -> Option<ScannedField<'a>> {
        let mode = self.mode()?;

        let (value, marker) = match mode {
            ScanMode::Unquoted => {
                let marker = self.find_unquoted_end()?;
                (Cow::Borrowed(&self.input[self.position..marker.start]), marker)
            }
            ScanMode::Quoted => {
                let marker = self.find_quoted_end()?;
                let inner = &self.input[self.position + 1..marker.start];
                (unescape_quoted(inner), marker)
            }
        };

        debug_assert!(marker.end > self.position);
        self.position = marker.end;

        Some(ScannedField {
            value,
            mode,
            terminator: Terminator::from_delimiter(marker.delimiter),
        })
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = ScannedField<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_field()
    }
}
