//! Integration tests for doxidx

use std::fs;

use doxidx::{IndexError, SearchCatalog, SymbolIndex};
use tempfile::TempDir;

use test_helpers::{EMPTY_OCCURRENCES_FRAGMENT, MINIMAL_FRAGMENT, fixtures_dir, write_fragment};

#[test]
fn test_load_and_lookup_fixture_fragment() {
    let index = SymbolIndex::load(fixtures_dir().join("functions_67.js")).unwrap();
    assert_eq!(index.len(), 3);

    // exact scenario: one occurrence for getdistance
    let occs = index.lookup("getdistance");
    assert_eq!(occs.len(), 1);
    assert_eq!(occs[0].owner, "ubxsec::VertexCheck");
    assert_eq!(
        occs[0].url,
        "../classubxsec_1_1VertexCheck.html#a2cf14a77ddd16b2fd282e2748ed4a3d9"
    );

    // overloaded symbol keeps generation order
    let overloads = index.lookup("GetNuVertexFromTPCObject");
    assert_eq!(overloads.len(), 2);
    assert!(overloads[0].owner.contains("double *reco_nu_vtx"));
    assert!(overloads[1].owner.contains("recob::Vertex"));
}

#[test]
fn test_round_trip_is_byte_equivalent() {
    let path = fixtures_dir().join("functions_67.js");
    let original = fs::read_to_string(&path).unwrap();
    let index = SymbolIndex::load(&path).unwrap();
    assert_eq!(index.to_js(), original);
}

#[test]
fn test_absent_key_is_empty_not_error() {
    let index = SymbolIndex::load(fixtures_dir().join("functions_67.js")).unwrap();
    assert!(index.lookup("getsliceorigin").is_empty());
}

#[test]
fn test_catalog_spans_fragments_and_skips_widget_script() {
    let catalog = SearchCatalog::load_dir(fixtures_dir()).unwrap();

    // search.js is the widget, not a fragment
    assert_eq!(catalog.stats().fragments, 2);

    // keys resolve regardless of which fragment holds them
    assert_eq!(catalog.lookup("getdistance").len(), 1);
    assert_eq!(catalog.lookup("VertexCheck").len(), 1);
    assert!(catalog.lookup("nosuchsymbol").is_empty());

    let stats = catalog.stats();
    assert_eq!(stats.entries, 4);
    assert_eq!(stats.occurrences, 5);
}

#[test]
fn test_malformed_record_reports_index() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fragment(temp_dir.path(), "functions_66.js", EMPTY_OCCURRENCES_FRAGMENT);

    let err = SymbolIndex::load(&path).unwrap_err();
    match err {
        IndexError::MalformedRecord { record, reason } => {
            assert_eq!(record, 1);
            assert!(reason.contains("empty occurrence list"));
        }
        other => panic!("expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn test_catalog_load_fails_on_malformed_fragment() {
    let temp_dir = TempDir::new().unwrap();
    write_fragment(temp_dir.path(), "functions_66.js", MINIMAL_FRAGMENT);
    write_fragment(temp_dir.path(), "functions_67.js", EMPTY_OCCURRENCES_FRAGMENT);

    assert!(SearchCatalog::load_dir(temp_dir.path()).is_err());
}

#[test]
fn test_catalog_requires_at_least_one_fragment() {
    let temp_dir = TempDir::new().unwrap();
    write_fragment(temp_dir.path(), "search.js", "function SearchBox() {}\n");

    assert!(SearchCatalog::load_dir(temp_dir.path()).is_err());
}

#[test]
fn test_non_canonical_input_is_canonicalized() {
    // same records, squeezed onto one line
    let squeezed =
        "var searchData=[['getdistance',['GetDistance',['../classubxsec_1_1VertexCheck.html#a2cf1',1,'ubxsec::VertexCheck']]]];";
    let index = SymbolIndex::parse(squeezed).unwrap();
    assert_eq!(index.to_js(), MINIMAL_FRAGMENT);
}

#[test]
fn test_load_single_file_through_catalog() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fragment(temp_dir.path(), "functions_66.js", MINIMAL_FRAGMENT);

    let catalog = SearchCatalog::load(&path).unwrap();
    let matches = catalog.lookup("GetDistance");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].display_name, "GetDistance");
    assert_eq!(matches[0].owner, "ubxsec::VertexCheck");
}
