//! Configuration ingestion — the seam to the external configuration source.
//!
//! The engine never reads files itself. An external collaborator implements
//! [`ConfigSource`] over whatever format it parses, and the loaders here
//! turn string series literals into [`Series`] data. Loads are
//! all-or-nothing per call: a malformed literal reports a [`ConfigError`]
//! and leaves any previously installed series untouched.

use std::collections::HashMap;

use thiserror::Error;

use crate::assets::{levels, AssetKind};
use crate::series::{Series, TypedSeries};

/// Section holding the water deviation series.
pub const WATER_SECTION: &str = "water";
/// Key of the water deviation series within [`WATER_SECTION`].
pub const WATER_DEVIATION_KEY: &str = "deviation";
/// Section holding the per-kind, per-level economic series.
pub const ECONOMY_SECTION: &str = "economy";

/// Opaque typed-lookup provider backed by the host's configuration format.
pub trait ConfigSource {
    /// Raw string value for `key` in `section`, if present.
    fn get_string(&self, section: &str, key: &str) -> Option<&str>;
}

/// In-memory [`ConfigSource`] used by tests and the simtest harness.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfig {
    entries: HashMap<(String, String), String>,
}

impl MemoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.entries
            .insert((section.to_owned(), key.to_owned()), value.to_owned());
    }
}

impl ConfigSource for MemoryConfig {
    fn get_string(&self, section: &str, key: &str) -> Option<&str> {
        self.entries
            .get(&(section.to_owned(), key.to_owned()))
            .map(String::as_str)
    }
}

/// Configuration-loading faults. Nothing here is fatal to the round; the
/// caller decides whether to halt on a bad load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("series entry `{token}` is not a number")]
    BadToken { token: String },

    #[error("bad series literal in [{section}] {key}: `{token}` is not a number")]
    BadSeries {
        section: String,
        key: String,
        token: String,
    },
}

/// Parse a series literal such as `[1.0, 0.9, 1.2]` or `1.0; 0.9; 1.2`.
///
/// Brackets are optional; comma and semicolon both delimit. Empty tokens
/// (from a trailing delimiter) are skipped. An empty literal yields an
/// empty series, which is neutral at every round.
pub fn parse_series(literal: &str) -> Result<Vec<f64>, ConfigError> {
    let trimmed = literal
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']');

    let mut values = Vec::new();
    for token in trimmed.split([',', ';']) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let value: f64 = token.parse().map_err(|_| ConfigError::BadToken {
            token: token.to_owned(),
        })?;
        values.push(value);
    }
    Ok(values)
}

/// Load one named series. A missing key yields an empty (all-neutral)
/// series; a malformed value is an error.
pub fn load_series(
    source: &dyn ConfigSource,
    section: &str,
    key: &str,
) -> Result<Series, ConfigError> {
    let Some(literal) = source.get_string(section, key) else {
        log::debug!("no series at [{section}] {key}, treating as neutral");
        return Ok(Series::default());
    };

    let values = parse_series(literal).map_err(|err| match err {
        ConfigError::BadToken { token } => ConfigError::BadSeries {
            section: section.to_owned(),
            key: key.to_owned(),
            token,
        },
        other => other,
    })?;

    log::debug!("loaded {} values from [{section}] {key}", values.len());
    Ok(Series::new(values))
}

/// Load the full kind × level series map from `section`, reading keys of
/// the form `<kind>_level_<n>` for every kind and level 1..=3.
///
/// Missing keys stay neutral; any malformed value fails the whole load so
/// a partially applied map can never be observed.
pub fn load_typed_series(
    source: &dyn ConfigSource,
    section: &str,
) -> Result<TypedSeries, ConfigError> {
    let mut typed = TypedSeries::new();
    for kind in AssetKind::ALL {
        for level in levels() {
            let key = format!("{}_level_{}", kind.config_key(), level);
            let series = load_series(source, section, &key)?;
            if !series.is_empty() {
                typed.insert(kind, level, series);
            }
        }
    }
    Ok(typed)
}
