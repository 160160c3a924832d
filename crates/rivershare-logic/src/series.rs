//! Round-indexed deviation series with a neutral fallback.
//!
//! A series holds per-round multipliers where 1.0 means normal conditions.
//! Index 0 belongs to the pre-game build round and is conventionally unused
//! by lookups, which start at round 1. Any lookup past the end of the data,
//! or into a kind/level slot that was never loaded, answers exactly 1.0:
//! no data means normal conditions, never an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assets::{AssetKind, MAX_LEVEL};

/// The multiplier reported when a series has no data for a round.
pub const NEUTRAL_DEVIATION: f64 = 1.0;

/// A single round-indexed sequence of deviation multipliers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series(Vec<f64>);

impl Series {
    pub fn new(values: Vec<f64>) -> Self {
        Series(values)
    }

    /// Deviation for `round`, or [`NEUTRAL_DEVIATION`] when the series is
    /// shorter than `round + 1`.
    pub fn lookup(&self, round: u32) -> f64 {
        self.0
            .get(round as usize)
            .copied()
            .unwrap_or(NEUTRAL_DEVIATION)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Series::new(values)
    }
}

/// Series keyed by asset kind and productivity level.
///
/// An explicit two-level container rather than a flat array, so the
/// "missing ⇒ neutral" default applies independently per axis: unknown
/// kind, missing level, and out-of-range round all answer 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypedSeries {
    /// Per kind, a level-indexed vector of series. Index 0 is reserved,
    /// like round 0.
    by_kind: BTreeMap<AssetKind, Vec<Series>>,
}

impl TypedSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the series for `(kind, level)`, replacing any prior data in
    /// that slot.
    pub fn insert(&mut self, kind: AssetKind, level: u8, series: Series) {
        let slots = self
            .by_kind
            .entry(kind)
            .or_insert_with(|| vec![Series::default(); usize::from(MAX_LEVEL) + 1]);
        if let Some(slot) = slots.get_mut(usize::from(level)) {
            *slot = series;
        }
    }

    /// Deviation for `(kind, level)` at `round`, falling back to
    /// [`NEUTRAL_DEVIATION`] on any missing axis.
    pub fn lookup(&self, kind: AssetKind, level: u8, round: u32) -> f64 {
        self.by_kind
            .get(&kind)
            .and_then(|slots| slots.get(usize::from(level)))
            .map(|series| series.lookup(round))
            .unwrap_or(NEUTRAL_DEVIATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_lookup_returns_stored_value() {
        let series = Series::new(vec![1.0, 0.9, 1.2]);
        assert_eq!(series.lookup(1), 0.9);
        assert_eq!(series.lookup(2), 1.2);
    }

    #[test]
    fn out_of_range_lookup_is_neutral() {
        let series = Series::new(vec![1.0, 0.9, 1.2]);
        assert_eq!(series.lookup(3), 1.0);
        assert_eq!(series.lookup(100), 1.0);
    }

    #[test]
    fn empty_series_is_neutral_everywhere() {
        let series = Series::default();
        assert_eq!(series.lookup(0), 1.0);
        assert_eq!(series.lookup(7), 1.0);
    }

    #[test]
    fn typed_lookup_hits_the_right_slot() {
        let mut typed = TypedSeries::new();
        typed.insert(AssetKind::Factory, 1, Series::new(vec![1.0, 0.5]));
        typed.insert(AssetKind::Factory, 2, Series::new(vec![1.0, 2.0]));
        assert_eq!(typed.lookup(AssetKind::Factory, 1, 1), 0.5);
        assert_eq!(typed.lookup(AssetKind::Factory, 2, 1), 2.0);
    }

    #[test]
    fn typed_lookup_defaults_per_axis() {
        let mut typed = TypedSeries::new();
        typed.insert(AssetKind::Factory, 1, Series::new(vec![1.0, 0.5]));
        // unknown kind
        assert_eq!(typed.lookup(AssetKind::Cropland, 1, 1), 1.0);
        // missing level
        assert_eq!(typed.lookup(AssetKind::Factory, 3, 1), 1.0);
        // out-of-range round
        assert_eq!(typed.lookup(AssetKind::Factory, 1, 9), 1.0);
    }

    #[test]
    fn insert_replaces_prior_slot_wholesale() {
        let mut typed = TypedSeries::new();
        typed.insert(AssetKind::Housing, 2, Series::new(vec![1.0, 0.8, 0.8]));
        typed.insert(AssetKind::Housing, 2, Series::new(vec![1.0, 1.4]));
        assert_eq!(typed.lookup(AssetKind::Housing, 2, 1), 1.4);
        // round 2 came only from the replaced series, so it is neutral now
        assert_eq!(typed.lookup(AssetKind::Housing, 2, 2), 1.0);
    }
}
