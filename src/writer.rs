//! Canonical serializer for `searchData` fragments
//!
//! Reproduces the generator's byte layout exactly: header on its own line,
//! two-space indent, one record per line, comma between records, `];` tail.
//! Together with the parser this gives the lossless round-trip guarantee:
//! parse followed by write yields the input bytes for any well-formed
//! fragment.

use crate::models::Entry;

/// Serialize records back into fragment form
pub fn write_fragment(entries: &[Entry]) -> String {
    let mut out = String::from("var searchData=\n[\n");
    for (i, entry) in entries.iter().enumerate() {
        out.push_str("  [");
        push_literal(&mut out, &entry.key);
        out.push_str(",[");
        push_literal(&mut out, &entry.display_name);
        for occ in &entry.occurrences {
            out.push_str(",[");
            push_literal(&mut out, &occ.url);
            out.push(',');
            out.push_str(&occ.flag.to_string());
            out.push(',');
            push_literal(&mut out, &occ.owner);
            out.push(']');
        }
        out.push_str("]]");
        if i + 1 < entries.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("];\n");
    out
}

/// Append a single-quoted literal, escaping `\` and `'`
fn push_literal(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            other => out.push(other),
        }
    }
    out.push('\'');
}
