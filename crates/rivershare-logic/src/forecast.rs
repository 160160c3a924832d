//! Player-facing forecasts derived from deviation series.
//!
//! Forecasts run off the same series data the generator and distributor
//! realize later in the round, classified into a small fixed label set.
//! Category lower bounds are closed: a deviation of exactly 1.0 is Normal,
//! exactly 0.65 is Below Normal, exactly 1.65 is Good. Because series
//! lookups default to neutral, forecasting never fails — missing data
//! simply reads as Normal.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assets::{levels, AssetKind, MAX_LEVEL, MIN_LEVEL};
use crate::config::{
    load_series, load_typed_series, ConfigError, ConfigSource, ECONOMY_SECTION,
    WATER_DEVIATION_KEY, WATER_SECTION,
};
use crate::series::{Series, TypedSeries};
use crate::state::RoundContext;

/// Deviation at or above this is at least Normal (both domains).
const NORMAL_FLOOR: f64 = 1.0;
/// Deviation at or above this (and below normal) is Below Normal.
const BELOW_NORMAL_FLOOR: f64 = 0.65;
/// Economic deviation at or above this is Good.
const GOOD_FLOOR: f64 = 1.65;

/// Water outlook for a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaterForecast {
    #[serde(rename = "Normal")]
    Normal,
    #[serde(rename = "Below Normal")]
    BelowNormal,
    #[serde(rename = "Drought")]
    Drought,
}

impl WaterForecast {
    pub fn from_deviation(d: f64) -> Self {
        if d >= NORMAL_FLOOR {
            WaterForecast::Normal
        } else if d >= BELOW_NORMAL_FLOOR {
            WaterForecast::BelowNormal
        } else {
            WaterForecast::Drought
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WaterForecast::Normal => "Normal",
            WaterForecast::BelowNormal => "Below Normal",
            WaterForecast::Drought => "Drought",
        }
    }
}

impl fmt::Display for WaterForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Economic outlook for one (kind, level) slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EconomicForecast {
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Normal")]
    Normal,
    #[serde(rename = "Below Normal")]
    BelowNormal,
    #[serde(rename = "Recession")]
    Recession,
}

impl EconomicForecast {
    pub fn from_deviation(d: f64) -> Self {
        if d >= GOOD_FLOOR {
            EconomicForecast::Good
        } else if d >= NORMAL_FLOOR {
            EconomicForecast::Normal
        } else if d >= BELOW_NORMAL_FLOOR {
            EconomicForecast::BelowNormal
        } else {
            EconomicForecast::Recession
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EconomicForecast::Good => "Good",
            EconomicForecast::Normal => "Normal",
            EconomicForecast::BelowNormal => "Below Normal",
            EconomicForecast::Recession => "Recession",
        }
    }
}

impl fmt::Display for EconomicForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Forecasts the shared water resource from the `[water] deviation` series.
#[derive(Debug, Clone, Default)]
pub struct WaterForecaster {
    deviation: Series,
}

impl WaterForecaster {
    pub fn new(deviation: Series) -> Self {
        WaterForecaster { deviation }
    }

    /// Reload the deviation series wholesale. Configure before a round
    /// begins, never during one.
    pub fn update_configuration(&mut self, source: &dyn ConfigSource) -> Result<(), ConfigError> {
        self.deviation = load_series(source, WATER_SECTION, WATER_DEVIATION_KEY)?;
        Ok(())
    }

    /// Outlook for `ctx.current_round`, shown to players before they commit
    /// decisions for the round.
    pub fn forecast(&self, ctx: &RoundContext) -> WaterForecast {
        WaterForecast::from_deviation(self.deviation.lookup(ctx.current_round))
    }
}

/// Number of forecast slots per kind, one per level 1..=3.
pub const FORECAST_LEVELS: usize = (MAX_LEVEL - MIN_LEVEL + 1) as usize;

/// Forecasts economic conditions per asset kind and level from the
/// `[economy]` typed series.
#[derive(Debug, Clone, Default)]
pub struct EconomicForecaster {
    series: TypedSeries,
}

impl EconomicForecaster {
    pub fn new(series: TypedSeries) -> Self {
        EconomicForecaster { series }
    }

    /// Reload the kind × level series map wholesale.
    pub fn update_configuration(&mut self, source: &dyn ConfigSource) -> Result<(), ConfigError> {
        self.series = load_typed_series(source, ECONOMY_SECTION)?;
        Ok(())
    }

    /// Outlook for every declared kind and every level, whether or not any
    /// such asset currently exists. Array index is `level - 1`. Iteration
    /// order over kinds is stable ([`AssetKind::ALL`]).
    pub fn forecast(&self, ctx: &RoundContext) -> BTreeMap<AssetKind, [EconomicForecast; FORECAST_LEVELS]> {
        let mut outlook = BTreeMap::new();
        for kind in AssetKind::ALL {
            let mut labels = [EconomicForecast::Normal; FORECAST_LEVELS];
            for level in levels() {
                let deviation = self.series.lookup(kind, level, ctx.current_round);
                labels[usize::from(level - MIN_LEVEL)] = EconomicForecast::from_deviation(deviation);
            }
            outlook.insert(kind, labels);
        }
        outlook
    }
}
