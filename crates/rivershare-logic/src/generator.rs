//! Per-round water generation.
//!
//! The baseline is the sum of every player's water entitlement plus every
//! buy point's initial water rights as of the current round context. The
//! round's deviation multiplier scales that baseline, and the product is
//! truncated to whole units of water. The generator has no side effects:
//! the caller writes the returned quantity into the round's water pool.

use crate::config::{load_series, ConfigError, ConfigSource, WATER_DEVIATION_KEY, WATER_SECTION};
use crate::series::Series;
use crate::state::RoundContext;

/// Produces the total water available each round.
#[derive(Debug, Clone, Default)]
pub struct WaterGenerator {
    deviation: Series,
}

impl WaterGenerator {
    pub fn new(deviation: Series) -> Self {
        WaterGenerator { deviation }
    }

    /// Reload the deviation series from `[water] deviation`.
    ///
    /// All-or-nothing: on a parse error the previously loaded series stays
    /// in place. Call this before a round begins, never during one.
    pub fn update_configuration(&mut self, source: &dyn ConfigSource) -> Result<(), ConfigError> {
        let deviation = load_series(source, WATER_SECTION, WATER_DEVIATION_KEY)?;
        log::debug!(
            "water generator reconfigured with {} rounds of deviation data",
            deviation.len()
        );
        self.deviation = deviation;
        Ok(())
    }

    /// Total water generated for `ctx.current_round`, in whole units.
    ///
    /// A short or absent series degrades to the neutral multiplier, so this
    /// never fails — with no data the round simply gets its baseline.
    pub fn generate(&self, ctx: &RoundContext) -> i64 {
        let deviation = self.deviation.lookup(ctx.current_round);
        (ctx.baseline() as f64 * deviation).trunc() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfig;
    use crate::state::{BuyPoint, Player};

    fn context(round: u32) -> RoundContext {
        RoundContext {
            current_round: round,
            total_rounds: 10,
            players: vec![
                Player {
                    id: 1,
                    name: "Alder Farm".into(),
                    water_entitlement: 500,
                },
                Player {
                    id: 2,
                    name: "Mill Combine".into(),
                    water_entitlement: 300,
                },
            ],
            buy_points: vec![BuyPoint {
                id: 1,
                initial_water_rights: 200,
            }],
        }
    }

    #[test]
    fn scales_baseline_by_round_deviation() {
        let generator = WaterGenerator::new(Series::new(vec![1.0, 0.9, 1.2]));
        assert_eq!(generator.generate(&context(1)), 900);
        assert_eq!(generator.generate(&context(2)), 1200);
    }

    #[test]
    fn out_of_range_round_gets_the_baseline() {
        let generator = WaterGenerator::new(Series::new(vec![1.0, 0.9, 1.2]));
        assert_eq!(generator.generate(&context(3)), 1000);
    }

    #[test]
    fn unconfigured_generator_gets_the_baseline() {
        let generator = WaterGenerator::default();
        assert_eq!(generator.generate(&context(1)), 1000);
    }

    #[test]
    fn generation_is_idempotent() {
        let generator = WaterGenerator::new(Series::new(vec![1.0, 0.9]));
        let ctx = context(1);
        assert_eq!(generator.generate(&ctx), generator.generate(&ctx));
    }

    #[test]
    fn reconfiguration_replaces_the_series_wholesale() {
        let mut generator = WaterGenerator::new(Series::new(vec![1.0, 0.9, 1.2]));
        let mut cfg = MemoryConfig::new();
        cfg.set(WATER_SECTION, WATER_DEVIATION_KEY, "[1.0, 0.5]");
        generator.update_configuration(&cfg).unwrap();
        assert_eq!(generator.generate(&context(1)), 500);
        // round 2 existed only in the old series; it is neutral now
        assert_eq!(generator.generate(&context(2)), 1000);
    }

    #[test]
    fn failed_reconfiguration_keeps_prior_series() {
        let mut generator = WaterGenerator::new(Series::new(vec![1.0, 0.9]));
        let mut cfg = MemoryConfig::new();
        cfg.set(WATER_SECTION, WATER_DEVIATION_KEY, "[1.0, oops]");
        assert!(generator.update_configuration(&cfg).is_err());
        assert_eq!(generator.generate(&context(1)), 900);
    }
}
