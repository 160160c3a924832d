//! Rivershare Headless Round Harness
//!
//! Validates the pure rules engine against a scripted multi-round scenario
//! without any host platform. Runs entirely in-process — no networking, no
//! rendering, no persistence.
//!
//! Usage:
//!   cargo run -p rivershare-simtest
//!   cargo run -p rivershare-simtest -- --verbose

use rivershare_logic::assets::{AssetKind, Cropland, Factory, Housing, RevenueAsset};
use rivershare_logic::config::{
    MemoryConfig, ECONOMY_SECTION, WATER_DEVIATION_KEY, WATER_SECTION,
};
use rivershare_logic::distributor::{Conditions, EconomicDistributor};
use rivershare_logic::forecast::{
    EconomicForecast, EconomicForecaster, WaterForecast, WaterForecaster,
};
use rivershare_logic::generator::WaterGenerator;
use rivershare_logic::state::{BuyPoint, Player, RoundContext};
use serde::Deserialize;

// ── Round scenario (shared JSON fixture) ───────────────────────────────
const SCENARIO_JSON: &str = include_str!("../../../data/round_scenario.json");

#[derive(Debug, Deserialize)]
struct Scenario {
    total_rounds: u32,
    players: Vec<Player>,
    buy_points: Vec<BuyPoint>,
    water_deviation: String,
    economy: std::collections::BTreeMap<String, String>,
    factories: Vec<Factory>,
    croplands: Vec<Cropland>,
    housings: Vec<Housing>,
}

impl Scenario {
    fn config(&self) -> MemoryConfig {
        let mut cfg = MemoryConfig::new();
        cfg.set(WATER_SECTION, WATER_DEVIATION_KEY, &self.water_deviation);
        for (key, literal) in &self.economy {
            cfg.set(ECONOMY_SECTION, key, literal);
        }
        cfg
    }

    fn context(&self, round: u32) -> RoundContext {
        RoundContext {
            current_round: round,
            total_rounds: self.total_rounds,
            players: self.players.clone(),
            buy_points: self.buy_points.clone(),
        }
    }

    fn assets(&self) -> Vec<&dyn RevenueAsset> {
        let mut assets: Vec<&dyn RevenueAsset> = Vec::new();
        assets.extend(self.factories.iter().map(|f| f as &dyn RevenueAsset));
        assets.extend(self.croplands.iter().map(|c| c as &dyn RevenueAsset));
        assets.extend(self.housings.iter().map(|h| h as &dyn RevenueAsset));
        assets
    }
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.to_owned(),
        passed,
        detail,
    }
}

fn main() {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Rivershare Round Harness ===\n");

    let scenario: Scenario =
        serde_json::from_str(SCENARIO_JSON).expect("round_scenario.json must parse");

    let mut results = Vec::new();

    // 1. Series defaults and baseline arithmetic
    results.extend(validate_generation(&scenario, verbose));

    // 2. Forecast labels across the scripted rounds
    results.extend(validate_forecasts(&scenario, verbose));

    // 3. Revenue allocation, single and batch
    results.extend(validate_allocation(&scenario, verbose));

    // 4. Reconfiguration semantics
    results.extend(validate_reconfiguration(&scenario, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    for result in &results {
        if !result.passed {
            println!("FAIL {} — {}", result.name, result.detail);
        } else if verbose {
            println!("ok   {} — {}", result.name, result.detail);
        }
    }
    println!("\n{} passed, {} failed, {} total", passed, failed, results.len());

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── Water generation ────────────────────────────────────────────────────

fn validate_generation(scenario: &Scenario, verbose: bool) -> Vec<TestResult> {
    println!("[1/4] water generation");
    let cfg = scenario.config();
    let mut generator = WaterGenerator::default();
    generator
        .update_configuration(&cfg)
        .expect("scenario water series must load");

    let baseline = scenario.context(1).baseline();
    // fixture: entitlements 500 + 300, buy-point rights 200
    let expected: &[(u32, i64)] = &[(1, 900), (2, 1200), (3, 600), (4, 1000), (9, 1000)];

    let mut results = vec![check(
        "baseline sums entitlements and rights",
        baseline == 1000,
        format!("baseline = {baseline}"),
    )];

    for &(round, want) in expected {
        let got = generator.generate(&scenario.context(round));
        if verbose {
            println!("  round {round}: generated {got} (baseline {baseline})");
        }
        results.push(check(
            &format!("round {round} generation"),
            got == want,
            format!("expected {want}, got {got}"),
        ));
    }

    // repeated reads must not advance anything
    let ctx = scenario.context(2);
    let (first, second) = (generator.generate(&ctx), generator.generate(&ctx));
    results.push(check(
        "generation is idempotent",
        first == second,
        format!("{first} vs {second}"),
    ));
    results
}

// ── Forecasts ───────────────────────────────────────────────────────────

fn validate_forecasts(scenario: &Scenario, verbose: bool) -> Vec<TestResult> {
    println!("[2/4] forecasts");
    let cfg = scenario.config();
    let mut water = WaterForecaster::default();
    let mut economy = EconomicForecaster::default();
    water.update_configuration(&cfg).expect("water series");
    economy.update_configuration(&cfg).expect("economy series");

    let mut results = Vec::new();

    // fixture water series: [1.0, 0.9, 1.2, 0.6]
    let expected_water: &[(u32, WaterForecast)] = &[
        (1, WaterForecast::BelowNormal),
        (2, WaterForecast::Normal),
        (3, WaterForecast::Drought),
        (4, WaterForecast::Normal), // past the series: neutral
    ];
    for &(round, want) in expected_water {
        let got = water.forecast(&scenario.context(round));
        if verbose {
            println!("  round {round}: water outlook {got}");
        }
        results.push(check(
            &format!("round {round} water forecast"),
            got == want,
            format!("expected {want}, got {got}"),
        ));
    }

    let outlook = economy.forecast(&scenario.context(2));
    results.push(check(
        "economic forecast covers every kind",
        outlook.len() == AssetKind::ALL.len(),
        format!("{} kinds", outlook.len()),
    ));
    results.push(check(
        "economic forecast order is stable",
        outlook.keys().copied().collect::<Vec<_>>() == AssetKind::ALL.to_vec(),
        format!("{:?}", outlook.keys().collect::<Vec<_>>()),
    ));
    // factory level 1 round 2 = 1.65 → Good (closed lower bound)
    results.push(check(
        "good boundary is closed",
        outlook[&AssetKind::Factory][0] == EconomicForecast::Good,
        format!("got {}", outlook[&AssetKind::Factory][0]),
    ));
    // housing level 3 round 2 is past its series → Normal
    results.push(check(
        "missing data forecasts normal",
        outlook[&AssetKind::Housing][2] == EconomicForecast::Normal,
        format!("got {}", outlook[&AssetKind::Housing][2]),
    ));
    if verbose {
        for (kind, labels) in &outlook {
            println!(
                "  {}: {} / {} / {}",
                kind.display_name(),
                labels[0],
                labels[1],
                labels[2]
            );
        }
    }
    results
}

// ── Allocation ──────────────────────────────────────────────────────────

fn validate_allocation(scenario: &Scenario, verbose: bool) -> Vec<TestResult> {
    println!("[3/4] revenue allocation");
    let cfg = scenario.config();
    let series = rivershare_logic::config::load_typed_series(&cfg, ECONOMY_SECTION)
        .expect("economy series");
    let distributor = EconomicDistributor::new();

    let mut results = Vec::new();

    // round 1: factory_level_1 = 0.5, revenue table 50 → 25
    let conditions = Conditions::at_round(&series, 1);
    let factory = &scenario.factories[0];
    let got = distributor.allocate(&conditions, factory);
    results.push(check(
        "factory allocation at half conditions",
        got == Ok(25),
        format!("expected Ok(25), got {got:?}"),
    ));

    let assets = scenario.assets();
    let allocations = distributor
        .allocate_all(&conditions, assets.iter().copied())
        .expect("conditions from a series cover every slot");
    results.push(check(
        "batch allocation has one entry per asset",
        allocations.len() == assets.len(),
        format!("{} entries for {} assets", allocations.len(), assets.len()),
    ));

    let mut batch_matches = true;
    for asset in &assets {
        let single = distributor.allocate(&conditions, *asset).unwrap();
        if verbose {
            println!("  asset {}: revenue {single}", asset.id());
        }
        if allocations[&asset.id()] != single {
            batch_matches = false;
        }
    }
    results.push(check(
        "batch matches single-asset allocation",
        batch_matches,
        "per-asset comparison".into(),
    ));

    // hand-built conditions missing an entry must fault, not default
    let mut sparse = Conditions::new();
    sparse.set(AssetKind::Factory, 1, 0.5);
    let fault = distributor.allocate(&sparse, &scenario.croplands[0]);
    results.push(check(
        "missing conditions entry is a fault",
        fault.is_err(),
        format!("got {fault:?}"),
    ));
    results
}

// ── Reconfiguration ─────────────────────────────────────────────────────

fn validate_reconfiguration(scenario: &Scenario, verbose: bool) -> Vec<TestResult> {
    println!("[4/4] reconfiguration");
    let mut generator = WaterGenerator::default();
    generator
        .update_configuration(&scenario.config())
        .expect("scenario water series");

    let mut results = Vec::new();

    let mut replacement = MemoryConfig::new();
    replacement.set(WATER_SECTION, WATER_DEVIATION_KEY, "[1.0, 0.5]");
    generator.update_configuration(&replacement).unwrap();

    let got = generator.generate(&scenario.context(1));
    results.push(check(
        "new series takes effect",
        got == 500,
        format!("expected 500, got {got}"),
    ));
    let got = generator.generate(&scenario.context(2));
    results.push(check(
        "old series is gone wholesale",
        got == 1000,
        format!("expected neutral 1000, got {got}"),
    ));

    let mut bad = MemoryConfig::new();
    bad.set(WATER_SECTION, WATER_DEVIATION_KEY, "[1.0, swamp]");
    let err = generator.update_configuration(&bad);
    results.push(check(
        "malformed literal is rejected",
        err.is_err(),
        format!("got {err:?}"),
    ));
    let got = generator.generate(&scenario.context(1));
    results.push(check(
        "failed load keeps prior series",
        got == 500,
        format!("expected 500, got {got}"),
    ));
    if verbose {
        println!("  reconfiguration error: {err:?}");
    }
    results
}
