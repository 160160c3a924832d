//! Revenue allocation under per-round economic conditions.
//!
//! Conditions carry one multiplier per (kind, level) pair for the round
//! being realized. Allocation is pure: the distributor computes integer
//! revenue per asset and the caller applies it to each asset's cumulative
//! balance.
//!
//! Unlike series lookups, a missing conditions entry is NOT defaulted to
//! neutral — it means the supplied conditions disagree with the declared
//! asset population, which is a configuration fault the caller must hear
//! about. Revenue rounds half-away-from-zero (half-up for the positive
//! revenues in play).

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::{levels, AssetId, AssetKind, RevenueAsset, MAX_LEVEL};
use crate::config::{ConfigError, ConfigSource};
use crate::series::TypedSeries;

/// Economic multipliers for one round, keyed by asset kind and level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    /// Per kind, a level-indexed vector of multipliers. Index 0 reserved.
    multipliers: BTreeMap<AssetKind, Vec<Option<f64>>>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, kind: AssetKind, level: u8, multiplier: f64) {
        let slots = self
            .multipliers
            .entry(kind)
            .or_insert_with(|| vec![None; usize::from(MAX_LEVEL) + 1]);
        if let Some(slot) = slots.get_mut(usize::from(level)) {
            *slot = Some(multiplier);
        }
    }

    pub fn get(&self, kind: AssetKind, level: u8) -> Option<f64> {
        self.multipliers
            .get(&kind)
            .and_then(|slots| slots.get(usize::from(level)))
            .copied()
            .flatten()
    }

    /// Sample a full conditions table from `series` at `round`.
    ///
    /// Every (kind, level) slot is populated; the series' neutral fallback
    /// fills any gaps, so conditions built this way can never trigger a
    /// missing-entry fault.
    pub fn at_round(series: &TypedSeries, round: u32) -> Self {
        let mut conditions = Conditions::new();
        for kind in AssetKind::ALL {
            for level in levels() {
                conditions.set(kind, level, series.lookup(kind, level, round));
            }
        }
        conditions
    }
}

/// Allocation faults. These report a mismatch between the declared assets
/// and the supplied conditions or revenue tables; the round itself is not
/// aborted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocateError {
    #[error("no economic conditions entry for {kind:?} level {level}")]
    MissingConditions { kind: AssetKind, level: u8 },

    #[error("asset {id} has no revenue table entry for level {level}")]
    MissingRevenue { id: AssetId, level: u8 },
}

/// Allocates realized revenue to assets. Stateless in this variant; the
/// configuration hook exists so stateful distributor variants can share
/// the contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct EconomicDistributor;

impl EconomicDistributor {
    pub fn new() -> Self {
        EconomicDistributor
    }

    /// Accepted for contract-compatibility; this distributor has no
    /// tunables beyond the per-call conditions argument.
    pub fn update_configuration(&mut self, _source: &dyn ConfigSource) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Revenue for one asset: `conditions[kind][level] × revenue_table[level]`,
    /// rounded half-away-from-zero. Does not mutate the asset.
    pub fn allocate(
        &self,
        conditions: &Conditions,
        asset: &dyn RevenueAsset,
    ) -> Result<i64, AllocateError> {
        let kind = asset.kind();
        let level = asset.level();

        let multiplier =
            conditions
                .get(kind, level)
                .ok_or(AllocateError::MissingConditions { kind, level })?;
        let max_revenue = asset
            .max_revenue(level)
            .ok_or(AllocateError::MissingRevenue {
                id: asset.id(),
                level,
            })?;

        Ok((multiplier * max_revenue as f64).round() as i64)
    }

    /// Revenue for every asset in `assets`, one entry per asset, each
    /// computed independently. Fails fast on the first configuration
    /// fault.
    pub fn allocate_all<'a, I>(
        &self,
        conditions: &Conditions,
        assets: I,
    ) -> Result<HashMap<AssetId, i64>, AllocateError>
    where
        I: IntoIterator<Item = &'a dyn RevenueAsset>,
    {
        let mut allocations = HashMap::new();
        for asset in assets {
            let revenue = self.allocate(conditions, asset)?;
            allocations.insert(asset.id(), revenue);
        }
        Ok(allocations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Cropland, Factory};
    use crate::series::Series;

    fn factory(id: AssetId, level: u8) -> Factory {
        Factory {
            id,
            name: format!("Factory {id}"),
            level,
            revenue_table: vec![0, 50, 120, 300],
            water_requirement: 10,
        }
    }

    #[test]
    fn allocates_scaled_revenue() {
        let mut conditions = Conditions::new();
        conditions.set(AssetKind::Factory, 1, 0.5);
        let distributor = EconomicDistributor::new();
        let asset = factory(1, 1);
        assert_eq!(distributor.allocate(&conditions, &asset).unwrap(), 25);
    }

    #[test]
    fn rounds_half_up() {
        let mut conditions = Conditions::new();
        conditions.set(AssetKind::Factory, 1, 0.25);
        let distributor = EconomicDistributor::new();
        let mut asset = factory(1, 1);
        asset.revenue_table = vec![0, 50];
        // 0.25 × 50 = 12.5 → 13
        assert_eq!(distributor.allocate(&conditions, &asset).unwrap(), 13);
    }

    #[test]
    fn missing_conditions_entry_is_a_fault() {
        let conditions = Conditions::new();
        let distributor = EconomicDistributor::new();
        let asset = factory(1, 2);
        assert_eq!(
            distributor.allocate(&conditions, &asset),
            Err(AllocateError::MissingConditions {
                kind: AssetKind::Factory,
                level: 2,
            })
        );
    }

    #[test]
    fn missing_revenue_entry_is_a_fault() {
        let mut conditions = Conditions::new();
        conditions.set(AssetKind::Factory, 3, 1.0);
        let distributor = EconomicDistributor::new();
        let mut asset = factory(1, 3);
        asset.revenue_table = vec![0, 50];
        assert_eq!(
            distributor.allocate(&conditions, &asset),
            Err(AllocateError::MissingRevenue { id: 1, level: 3 })
        );
    }

    #[test]
    fn batch_matches_single_asset_results() {
        let mut conditions = Conditions::new();
        conditions.set(AssetKind::Factory, 1, 0.5);
        conditions.set(AssetKind::Factory, 2, 1.5);
        conditions.set(AssetKind::Cropland, 1, 2.0);

        let f1 = factory(1, 1);
        let f2 = factory(2, 2);
        let crop = Cropland {
            id: 3,
            name: "River Bend".into(),
            level: 1,
            revenue_table: vec![0, 40, 90],
            water_requirement: 30,
        };

        let distributor = EconomicDistributor::new();
        let assets: Vec<&dyn RevenueAsset> = vec![&f1, &f2, &crop];
        let allocations = distributor
            .allocate_all(&conditions, assets.iter().copied())
            .unwrap();

        assert_eq!(allocations.len(), 3);
        assert_eq!(allocations[&1], 25);
        assert_eq!(allocations[&2], 180);
        assert_eq!(allocations[&3], 80);
    }

    #[test]
    fn conditions_from_series_cover_every_slot() {
        let mut typed = TypedSeries::new();
        typed.insert(AssetKind::Factory, 1, Series::new(vec![1.0, 0.5]));
        let conditions = Conditions::at_round(&typed, 1);

        assert_eq!(conditions.get(AssetKind::Factory, 1), Some(0.5));
        // unconfigured slots pick up the series' neutral fallback
        assert_eq!(conditions.get(AssetKind::Housing, 3), Some(1.0));
    }

    #[test]
    fn allocation_is_idempotent() {
        let mut conditions = Conditions::new();
        conditions.set(AssetKind::Factory, 1, 0.5);
        let distributor = EconomicDistributor::new();
        let asset = factory(1, 1);
        let first = distributor.allocate(&conditions, &asset).unwrap();
        let second = distributor.allocate(&conditions, &asset).unwrap();
        assert_eq!(first, second);
    }
}
