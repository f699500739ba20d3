use crate::test_harness::TestMap;

use super::sample_regions;

#[test]
fn search_selects_matching_region() {
    let mut map = TestMap::with_regions(sample_regions());
    map.search("1811ab");
    assert_eq!(map.selected(), Some(1));
    assert_eq!(map.search_hits(), &[1]);
    assert!(map.search_misses().is_empty());
    assert!(map.entry("1811 AB").is_some(), "search lazily creates the entry");
}

#[test]
fn search_normalizes_whitespace() {
    let mut map = TestMap::with_regions(sample_regions());
    map.search("  1812 cd ");
    assert_eq!(map.selected(), Some(2));
}

#[test]
fn missing_postcode_reports_exactly_once_and_keeps_selection() {
    let mut map = TestMap::with_regions(sample_regions());
    map.select(0);
    map.search("9999ZZ");
    map.tick().tick();

    assert_eq!(map.search_misses(), &["9999ZZ".to_string()]);
    assert!(map.search_hits().is_empty());
    assert_eq!(map.selected(), Some(0), "a miss must not change selection");
    assert_eq!(map.store().len(), 1);
}

#[test]
fn search_before_data_is_loaded_does_nothing() {
    let mut map = TestMap::new();
    map.search("1811AA");
    assert!(map.search_misses().is_empty());
    assert!(map.search_hits().is_empty());
    assert_eq!(map.selected(), None);
}
