//! Postal-code search.

use bevy::prelude::*;

use crate::loading::DatasetStatus;
use crate::region::RegionSet;
use crate::selection::RegionSelected;

/// Submitted from the search box.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
}

/// A region matched a search. The map fits and highlights it.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit {
    pub index: usize,
}

/// No region matched. The UI shows one blocking "not found" alert.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SearchMissed {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// No data layer yet; the request is dropped silently.
    NoData,
    Found(Vec<usize>),
    NotFound,
}

pub fn run_search(regions: &RegionSet, status: &DatasetStatus, query: &str) -> SearchOutcome {
    if !status.is_loaded() {
        return SearchOutcome::NoData;
    }
    let matches = regions.find_matches(query);
    if matches.is_empty() {
        SearchOutcome::NotFound
    } else {
        SearchOutcome::Found(matches)
    }
}

pub fn handle_search_requests(
    mut requests: EventReader<SearchRequest>,
    regions: Res<RegionSet>,
    status: Res<DatasetStatus>,
    mut selected: EventWriter<RegionSelected>,
    mut hits: EventWriter<SearchHit>,
    mut misses: EventWriter<SearchMissed>,
) {
    for request in requests.read() {
        match run_search(&regions, &status, &request.query) {
            SearchOutcome::NoData => {}
            SearchOutcome::Found(indices) => {
                for index in indices {
                    selected.send(RegionSelected { index });
                    hits.send(SearchHit { index });
                }
            }
            SearchOutcome::NotFound => {
                info!("Search for '{}' found no region", request.query);
                misses.send(SearchMissed {
                    query: request.query.clone(),
                });
            }
        }
    }
}
