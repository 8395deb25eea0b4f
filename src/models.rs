//! Core data models for doxidx
//!
//! These structures mirror the records found in a generator-produced
//! `searchData` table: one entry per normalized search key, each with a
//! display name and an ordered list of definition sites.

use serde::{Deserialize, Serialize};

/// One definition/overload site of a symbol
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Occurrence {
    /// Anchor URL, relative to the site's `search/` directory
    /// (e.g. `../classubxsec_1_1VertexCheck.html#a2cf1...`)
    pub url: String,
    /// Numeric flag carried between URL and label in the on-disk tuple.
    /// Always `1` in generator output; preserved so re-serialization is lossless.
    pub flag: u32,
    /// Owning-scope label. Overloaded symbols carry the full signature here,
    /// with HTML entities (`&amp;`, `&lt;`, `&gt;`) left raw as the generator
    /// wrote them.
    pub owner: String,
}

impl Occurrence {
    pub fn new(url: impl Into<String>, flag: u32, owner: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            flag,
            owner: owner.into(),
        }
    }

    /// Owner label with the common HTML entities decoded, for human-facing
    /// display. The stored label is never modified.
    pub fn owner_text(&self) -> String {
        decode_entities(&self.owner)
    }
}

/// Decode the HTML entities the generator uses in signature text
pub fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// The full record for one search key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    /// Normalized search key (lowercase, punctuation stripped)
    pub key: String,
    /// Human-readable symbol name (e.g. the original function name)
    pub display_name: String,
    /// One occurrence per overload/definition site, in generation order
    pub occurrences: Vec<Occurrence>,
}

impl Entry {
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        occurrences: Vec<Occurrence>,
    ) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            occurrences,
        }
    }
}

/// Statistics about a loaded index or catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of fragment files loaded
    pub fragments: usize,
    /// Total entries across all fragments
    pub entries: usize,
    /// Total occurrences across all entries
    pub occurrences: usize,
}

/// Normalize a symbol name into its search-key form
///
/// Matches the generator's keying scheme: lowercase, with punctuation
/// stripped. Underscores are part of identifiers and survive.
///
/// ```
/// use doxidx::models::normalize_key;
///
/// assert_eq!(normalize_key("GetDistance"), "getdistance");
/// assert_eq!(normalize_key("pfp_producer"), "pfp_producer");
/// ```
pub fn normalize_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .flat_map(char::to_lowercase)
        .collect()
}
