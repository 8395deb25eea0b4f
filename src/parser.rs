//! Parser for `searchData` fragments
//!
//! The on-disk format is a small JavaScript fragment emitted once per
//! documentation build:
//!
//! ```text
//! var searchData=
//! [
//!   ['getdistance',['GetDistance',['../classubxsec_1_1VertexCheck.html#a2cf1...',1,'ubxsec::VertexCheck']]],
//!   ...
//! ];
//! ```
//!
//! Each record is `[key, [display_name, occurrence...]]` and each occurrence
//! is `[url, flag, owner_label]`. Strings are single-quoted with `\'` and
//! `\\` escapes; owner labels keep HTML entities raw. The parser is a plain
//! byte cursor over the input, no lookahead beyond one byte.

use crate::error::IndexError;
use crate::models::{Entry, Occurrence};

/// Literal every fragment starts with
pub const HEADER: &str = "var searchData=";

/// Check whether `input` looks like a searchData fragment (cheap, header only)
pub fn is_fragment(input: &str) -> bool {
    input.trim_start().starts_with(HEADER)
}

/// Parse a complete fragment into its records
///
/// Structural problems with the fragment itself (header, array brackets,
/// trailing garbage) surface as [`IndexError::InvalidFragment`]; problems
/// inside a record surface as [`IndexError::MalformedRecord`] carrying the
/// zero-based record index.
pub fn parse_fragment(input: &str) -> Result<Vec<Entry>, IndexError> {
    let mut s = Scanner::new(input);

    s.skip_ws();
    if !s.consume_literal(HEADER) {
        return Err(IndexError::InvalidFragment(format!(
            "missing '{HEADER}' header"
        )));
    }
    s.skip_ws();
    if !s.eat(b'[') {
        return Err(IndexError::InvalidFragment(
            "expected '[' to open the table".into(),
        ));
    }

    let mut entries = Vec::new();
    s.skip_ws();
    if !s.eat(b']') {
        loop {
            let record = entries.len();
            entries.push(parse_record(&mut s, record)?);
            s.skip_ws();
            if s.eat(b',') {
                s.skip_ws();
                continue;
            }
            break;
        }
        if !s.eat(b']') {
            return Err(IndexError::InvalidFragment(
                "unterminated table array".into(),
            ));
        }
    }

    s.skip_ws();
    // trailing ';' is part of the generator's output but not required here
    s.eat(b';');
    s.skip_ws();
    if !s.at_end() {
        return Err(IndexError::InvalidFragment(
            "trailing garbage after table".into(),
        ));
    }

    log::debug!("parsed fragment: {} records", entries.len());
    Ok(entries)
}

fn parse_record(s: &mut Scanner<'_>, record: usize) -> Result<Entry, IndexError> {
    s.expect(b'[', record, "expected '[' to open record")?;
    s.skip_ws();

    let key = parse_string(s, record)?;
    if key.is_empty() {
        return Err(IndexError::malformed(record, "empty search key"));
    }

    s.skip_ws();
    s.expect(b',', record, "expected ',' after search key")?;
    s.skip_ws();
    s.expect(b'[', record, "expected '[' to open display list")?;
    s.skip_ws();

    let display_name = parse_string(s, record)?;
    if display_name.is_empty() {
        return Err(IndexError::malformed(record, "empty display name"));
    }

    let mut occurrences = Vec::new();
    loop {
        s.skip_ws();
        if s.eat(b']') {
            break;
        }
        s.expect(b',', record, "expected ',' or ']' in display list")?;
        s.skip_ws();
        occurrences.push(parse_occurrence(s, record)?);
    }
    if occurrences.is_empty() {
        return Err(IndexError::malformed(record, "empty occurrence list"));
    }

    s.skip_ws();
    s.expect(b']', record, "expected ']' to close record")?;

    Ok(Entry {
        key,
        display_name,
        occurrences,
    })
}

fn parse_occurrence(s: &mut Scanner<'_>, record: usize) -> Result<Occurrence, IndexError> {
    s.expect(b'[', record, "expected '[' to open occurrence")?;
    s.skip_ws();
    let url = parse_string(s, record)?;
    if url.is_empty() {
        return Err(IndexError::malformed(record, "empty occurrence URL"));
    }
    s.skip_ws();
    s.expect(b',', record, "expected ',' after occurrence URL")?;
    s.skip_ws();
    let flag = parse_flag(s, record)?;
    s.skip_ws();
    s.expect(b',', record, "expected ',' after occurrence flag")?;
    s.skip_ws();
    let owner = parse_string(s, record)?;
    s.skip_ws();
    s.expect(b']', record, "expected ']' to close occurrence")?;

    Ok(Occurrence { url, flag, owner })
}

/// Parse a single-quoted string literal, resolving `\'` and `\\` escapes.
///
/// Any other escape is rejected: the generator never emits one, and passing
/// it through would break the byte-exact round-trip guarantee.
fn parse_string(s: &mut Scanner<'_>, record: usize) -> Result<String, IndexError> {
    s.expect(b'\'', record, "expected string literal")?;

    let mut buf = Vec::new();
    loop {
        match s.bump() {
            None => return Err(IndexError::malformed(record, "unterminated string literal")),
            Some(b'\'') => break,
            Some(b'\\') => match s.bump() {
                Some(b'\'') => buf.push(b'\''),
                Some(b'\\') => buf.push(b'\\'),
                _ => {
                    return Err(IndexError::malformed(
                        record,
                        "unsupported escape in string literal",
                    ));
                }
            },
            Some(b) => buf.push(b),
        }
    }

    // splits only ever happen at ASCII bytes, so this cannot fail on valid input
    String::from_utf8(buf)
        .map_err(|_| IndexError::malformed(record, "string literal is not valid UTF-8"))
}

fn parse_flag(s: &mut Scanner<'_>, record: usize) -> Result<u32, IndexError> {
    let start = s.pos;
    while matches!(s.peek(), Some(b'0'..=b'9')) {
        s.pos += 1;
    }
    if s.pos == start {
        return Err(IndexError::malformed(record, "expected numeric flag"));
    }
    std::str::from_utf8(&s.bytes[start..s.pos])
        .ok()
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| IndexError::malformed(record, "occurrence flag out of range"))
}

/// Byte cursor over the fragment text
struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
    }

    /// Consume `b` if it is next; returns whether it was consumed
    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume `b` or fail the current record
    fn expect(&mut self, b: u8, record: usize, reason: &str) -> Result<(), IndexError> {
        if self.eat(b) {
            Ok(())
        } else {
            Err(IndexError::malformed(record, reason))
        }
    }

    fn consume_literal(&mut self, lit: &str) -> bool {
        if self.bytes[self.pos..].starts_with(lit.as_bytes()) {
            self.pos += lit.len();
            true
        } else {
            false
        }
    }
}
