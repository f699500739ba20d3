//! Per-postcode scenario multipliers for the current session.

use std::collections::HashMap;

use bevy::prelude::*;

/// A region's scenario: multipliers on the 2023 gas and PV figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioEntry {
    /// Share of the baseline gas demand that remains (1.0 = unchanged).
    pub gas_factor: f64,
    /// Multiplier on the baseline PV yield (1.0 = unchanged).
    pub pv_factor: f64,
    /// Set the first time a slider touches this region. Never cleared.
    pub modified: bool,
}

impl ScenarioEntry {
    pub const DEFAULT: Self = Self {
        gas_factor: 1.0,
        pv_factor: 1.0,
        modified: false,
    };
}

impl Default for ScenarioEntry {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Session-lifetime mapping from postal code to scenario entry.
///
/// Entries are created lazily on first interaction and never removed.
/// Factors are kept non-negative.
#[derive(Resource, Debug, Default)]
pub struct ScenarioStore {
    entries: HashMap<String, ScenarioEntry>,
}

impl ScenarioStore {
    pub fn get(&self, postcode: &str) -> Option<&ScenarioEntry> {
        self.entries.get(postcode)
    }

    /// The stored entry, or the default one without creating it.
    pub fn entry_or_default(&self, postcode: &str) -> ScenarioEntry {
        self.get(postcode).copied().unwrap_or_default()
    }

    /// The entry for `postcode`, created with defaults if absent.
    pub fn ensure(&mut self, postcode: &str) -> &mut ScenarioEntry {
        self.entries.entry(postcode.to_string()).or_default()
    }

    pub fn set_gas_factor(&mut self, postcode: &str, factor: f64) {
        let entry = self.ensure(postcode);
        entry.gas_factor = sanitize_factor(factor);
        entry.modified = true;
    }

    pub fn set_pv_factor(&mut self, postcode: &str, factor: f64) {
        let entry = self.ensure(postcode);
        entry.pv_factor = sanitize_factor(factor);
        entry.modified = true;
    }

    pub fn is_modified(&self, postcode: &str) -> bool {
        self.get(postcode).is_some_and(|e| e.modified)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn sanitize_factor(factor: f64) -> f64 {
    if factor.is_finite() {
        factor.max(0.0)
    } else {
        0.0
    }
}
