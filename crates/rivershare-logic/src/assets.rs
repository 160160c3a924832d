//! Asset kinds, productivity levels, and the revenue capability.
//!
//! Assets are owned by the broader game model. The engine never creates or
//! destroys them — it reads kind, level, and the intrinsic revenue table
//! through the [`RevenueAsset`] capability, and the caller applies computed
//! revenue back to whatever persistent model holds the balances.

use serde::{Deserialize, Serialize};

pub type AssetId = u32;

/// Lowest productivity level an asset can operate at. Level 0 is reserved,
/// like round 0 in a deviation series.
pub const MIN_LEVEL: u8 = 1;

/// Highest productivity level.
pub const MAX_LEVEL: u8 = 3;

/// Iterate the valid productivity levels in ascending order.
pub fn levels() -> std::ops::RangeInclusive<u8> {
    MIN_LEVEL..=MAX_LEVEL
}

/// The closed set of productive asset categories.
///
/// The order of [`AssetKind::ALL`] is the order every kind-indexed output
/// (economic forecasts, condition dumps) is produced in, so it must stay
/// stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Factory,
    Cropland,
    Housing,
}

impl AssetKind {
    pub const ALL: [AssetKind; 3] = [AssetKind::Factory, AssetKind::Cropland, AssetKind::Housing];

    /// Player-facing name.
    pub fn display_name(self) -> &'static str {
        match self {
            AssetKind::Factory => "Factory",
            AssetKind::Cropland => "Cropland",
            AssetKind::Housing => "Housing",
        }
    }

    /// Key fragment used in configuration lookups, e.g. `factory_level_2`.
    pub fn config_key(self) -> &'static str {
        match self {
            AssetKind::Factory => "factory",
            AssetKind::Cropland => "cropland",
            AssetKind::Housing => "housing",
        }
    }
}

/// Capability every productive asset exposes to the engine.
///
/// The distributor and forecaster depend only on this trait, never on the
/// concrete variants below.
pub trait RevenueAsset {
    fn id(&self) -> AssetId;
    fn kind(&self) -> AssetKind;
    fn level(&self) -> u8;

    /// Maximum revenue achievable at `level` under fully normal
    /// (multiplier = 1.0) conditions, from the intrinsic revenue table.
    /// Index 0 of the table is unused. `None` if the table has no entry
    /// for that level.
    fn max_revenue(&self, level: u8) -> Option<i64>;
}

/// An industrial plot. Revenue scales with the economy series for factories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Factory {
    pub id: AssetId,
    pub name: String,
    pub level: u8,
    /// Revenue per round by level, index 0 unused.
    pub revenue_table: Vec<i64>,
    /// Water the factory needs per round to operate at all.
    pub water_requirement: i64,
}

impl RevenueAsset for Factory {
    fn id(&self) -> AssetId {
        self.id
    }
    fn kind(&self) -> AssetKind {
        AssetKind::Factory
    }
    fn level(&self) -> u8 {
        self.level
    }
    fn max_revenue(&self, level: u8) -> Option<i64> {
        self.revenue_table.get(usize::from(level)).copied()
    }
}

/// A farmed parcel. Same revenue capability, different per-kind data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cropland {
    pub id: AssetId,
    pub name: String,
    pub level: u8,
    /// Revenue per round by level, index 0 unused.
    pub revenue_table: Vec<i64>,
    /// Water the crop consumes per round.
    pub water_requirement: i64,
}

impl RevenueAsset for Cropland {
    fn id(&self) -> AssetId {
        self.id
    }
    fn kind(&self) -> AssetKind {
        AssetKind::Cropland
    }
    fn level(&self) -> u8 {
        self.level
    }
    fn max_revenue(&self, level: u8) -> Option<i64> {
        self.revenue_table.get(usize::from(level)).copied()
    }
}

/// A residential development. Earns rent rather than produce, but the
/// distributor treats it identically through the capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Housing {
    pub id: AssetId,
    pub name: String,
    pub level: u8,
    /// Revenue per round by level, index 0 unused.
    pub revenue_table: Vec<i64>,
    /// Number of household units at the current level.
    pub units: u32,
}

impl RevenueAsset for Housing {
    fn id(&self) -> AssetId {
        self.id
    }
    fn kind(&self) -> AssetKind {
        AssetKind::Housing
    }
    fn level(&self) -> u8 {
        self.level
    }
    fn max_revenue(&self, level: u8) -> Option<i64> {
        self.revenue_table.get(usize::from(level)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_order_is_stable() {
        assert_eq!(
            AssetKind::ALL,
            [AssetKind::Factory, AssetKind::Cropland, AssetKind::Housing]
        );
    }

    #[test]
    fn levels_run_one_through_three() {
        let collected: Vec<u8> = levels().collect();
        assert_eq!(collected, vec![1, 2, 3]);
    }

    #[test]
    fn revenue_table_lookup_skips_reserved_index() {
        let factory = Factory {
            id: 7,
            name: "Cannery".into(),
            level: 1,
            revenue_table: vec![0, 50, 120, 300],
            water_requirement: 10,
        };
        assert_eq!(factory.max_revenue(1), Some(50));
        assert_eq!(factory.max_revenue(3), Some(300));
        assert_eq!(factory.max_revenue(4), None);
    }
}
