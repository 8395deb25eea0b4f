//! Symbol index and multi-fragment catalog
//!
//! A [`SymbolIndex`] is one loaded fragment: the table is immutable after
//! load and answers exact-match lookups on normalized keys. A documentation
//! site shards its index across many fragment files under `search/`
//! (`functions_67.js`, `classes_76.js`, ...); [`SearchCatalog`] loads a whole
//! directory and answers lookups across all of them.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use walkdir::WalkDir;

use crate::error::IndexError;
use crate::models::{Entry, IndexStats, Occurrence, normalize_key};
use crate::parser::{self, parse_fragment};
use crate::writer::write_fragment;

/// One loaded `searchData` table
///
/// Entries keep their on-disk order; a side map gives O(1) key lookup.
#[derive(Debug, Clone)]
pub struct SymbolIndex {
    entries: Vec<Entry>,
    slots: HashMap<String, usize>,
}

impl SymbolIndex {
    /// Load a fragment file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IndexError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse a fragment from its text form
    pub fn parse(input: &str) -> Result<Self, IndexError> {
        Self::from_entries(parse_fragment(input)?)
    }

    /// Build an index from already-decoded records
    ///
    /// Re-checks the table invariants (non-empty key and occurrence list,
    /// unique keys) so callers constructing entries by hand get the same
    /// guarantees as [`SymbolIndex::load`].
    pub fn from_entries(entries: Vec<Entry>) -> Result<Self, IndexError> {
        let mut slots = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if entry.key.is_empty() {
                return Err(IndexError::malformed(i, "empty search key"));
            }
            if entry.display_name.is_empty() {
                return Err(IndexError::malformed(i, "empty display name"));
            }
            if entry.occurrences.is_empty() {
                return Err(IndexError::malformed(i, "empty occurrence list"));
            }
            if slots.insert(entry.key.clone(), i).is_some() {
                return Err(IndexError::malformed(
                    i,
                    format!("duplicate key '{}'", entry.key),
                ));
            }
        }
        Ok(Self { entries, slots })
    }

    /// Exact-match lookup by normalized key
    ///
    /// The argument is normalized first, so both `GetDistance` and
    /// `getdistance` find the same entry. An absent key yields an empty
    /// slice, never an error.
    pub fn lookup(&self, key: &str) -> &[Occurrence] {
        match self.get(key) {
            Some(entry) => &entry.occurrences,
            None => &[],
        }
    }

    /// Full entry for a key, if present
    pub fn get(&self, key: &str) -> Option<&Entry> {
        let key = normalize_key(key);
        self.slots.get(&key).map(|&i| &self.entries[i])
    }

    /// All entries in on-disk order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            fragments: 1,
            entries: self.entries.len(),
            occurrences: self.entries.iter().map(|e| e.occurrences.len()).sum(),
        }
    }

    /// Serialize back to the fragment form
    ///
    /// For any table produced by [`SymbolIndex::load`] this returns the
    /// original file bytes.
    pub fn to_js(&self) -> String {
        write_fragment(&self.entries)
    }
}

/// One fragment file inside a catalog
#[derive(Debug, Clone)]
pub struct Fragment {
    pub path: PathBuf,
    pub index: SymbolIndex,
}

/// A single lookup hit, flattened for programmatic output
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LookupMatch {
    /// Fragment file the entry came from
    pub fragment: String,
    /// Display name of the matched entry
    pub display_name: String,
    /// Anchor URL of this occurrence
    pub url: String,
    /// Owning-scope label of this occurrence (raw, entities undecoded)
    pub owner: String,
}

/// All fragment tables of a documentation site's `search/` directory
#[derive(Debug, Clone)]
pub struct SearchCatalog {
    fragments: Vec<Fragment>,
}

impl SearchCatalog {
    /// Load from a fragment file or a directory of fragments
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            Self::load_dir(path)
        } else {
            let index = SymbolIndex::load(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            Ok(Self {
                fragments: vec![Fragment {
                    path: path.to_path_buf(),
                    index,
                }],
            })
        }
    }

    /// Load every fragment under a directory
    ///
    /// Non-fragment `.js` files (the search widget script itself lives in the
    /// same directory) are skipped. Files load in sorted path order so
    /// results are deterministic.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut fragments = Vec::new();

        for path in fragment_files(dir)? {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            if !parser::is_fragment(&text) {
                log::debug!("skipping non-fragment file: {}", path.display());
                continue;
            }
            let index = SymbolIndex::parse(&text)
                .with_context(|| format!("failed to load {}", path.display()))?;
            log::info!("loaded {}: {} entries", path.display(), index.len());
            fragments.push(Fragment { path, index });
        }

        if fragments.is_empty() {
            anyhow::bail!("no searchData fragments found under {}", dir.display());
        }
        Ok(Self { fragments })
    }

    /// Look a symbol up across every fragment
    ///
    /// One [`LookupMatch`] per occurrence; absent keys yield an empty vec.
    pub fn lookup(&self, name: &str) -> Vec<LookupMatch> {
        let mut matches = Vec::new();
        for fragment in &self.fragments {
            if let Some(entry) = fragment.index.get(name) {
                for occ in &entry.occurrences {
                    matches.push(LookupMatch {
                        fragment: fragment.path.display().to_string(),
                        display_name: entry.display_name.clone(),
                        url: occ.url.clone(),
                        owner: occ.owner.clone(),
                    });
                }
            }
        }
        matches
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            fragments: self.fragments.len(),
            entries: 0,
            occurrences: 0,
        };
        for fragment in &self.fragments {
            let s = fragment.index.stats();
            stats.entries += s.entries;
            stats.occurrences += s.occurrences;
        }
        stats
    }
}

/// Candidate fragment files under a directory, sorted for determinism
pub fn fragment_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "js")
        {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entries() -> Vec<Entry> {
        vec![
            Entry::new(
                "getdistance",
                "GetDistance",
                vec![Occurrence::new(
                    "../classubxsec_1_1VertexCheck.html#a2cf1",
                    1,
                    "ubxsec::VertexCheck",
                )],
            ),
            Entry::new(
                "gettpcobjects",
                "GetTPCObjects",
                vec![
                    Occurrence::new("../classHelper.html#a36ef", 1, "Helper::GetTPCObjects()"),
                    Occurrence::new("../classHelper.html#a900f", 1, "Helper::GetTPCObjects(int)"),
                ],
            ),
        ]
    }

    #[test]
    fn test_lookup_present_key() {
        let index = SymbolIndex::from_entries(sample_entries()).unwrap();
        let occs = index.lookup("getdistance");
        assert_eq!(occs.len(), 1);
        assert_eq!(occs[0].owner, "ubxsec::VertexCheck");
    }

    #[test]
    fn test_lookup_normalizes_argument() {
        let index = SymbolIndex::from_entries(sample_entries()).unwrap();
        assert_eq!(index.lookup("GetDistance"), index.lookup("getdistance"));
        assert_eq!(index.lookup("GetTPCObjects").len(), 2);
    }

    #[test]
    fn test_lookup_absent_key_is_empty_not_error() {
        let index = SymbolIndex::from_entries(sample_entries()).unwrap();
        assert!(index.lookup("nosuchsymbol").is_empty());
        assert!(index.get("nosuchsymbol").is_none());
    }

    #[test]
    fn test_every_present_key_has_occurrences() {
        let index = SymbolIndex::from_entries(sample_entries()).unwrap();
        for entry in index.entries() {
            assert!(!index.lookup(&entry.key).is_empty());
        }
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let occ = vec![Occurrence::new("../u.html", 1, "Owner")];
        let entries = vec![
            Entry::new("dup", "Dup", occ.clone()),
            Entry::new("dup", "Dup", occ),
        ];
        let err = SymbolIndex::from_entries(entries).unwrap_err();
        match err {
            IndexError::MalformedRecord { record, reason } => {
                assert_eq!(record, 1);
                assert!(reason.contains("duplicate key"));
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_from_entries_rejects_empty_occurrences() {
        let entries = vec![Entry::new("key", "Display", vec![])];
        assert!(SymbolIndex::from_entries(entries).is_err());
    }

    #[test]
    fn test_stats() {
        let index = SymbolIndex::from_entries(sample_entries()).unwrap();
        let stats = index.stats();
        assert_eq!(stats.fragments, 1);
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.occurrences, 3);
    }

    #[test]
    fn test_round_trip_through_to_js() {
        let index = SymbolIndex::from_entries(sample_entries()).unwrap();
        let text = index.to_js();
        let reloaded = SymbolIndex::parse(&text).unwrap();
        assert_eq!(reloaded.entries(), index.entries());
        assert_eq!(reloaded.to_js(), text);
    }
}
