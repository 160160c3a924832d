//! Pure rules engine for Rivershare.
//!
//! This crate contains the round-based water/economy rules that are
//! independent of any host platform, renderer, or storage layer. Functions
//! take plain data and return results, making them unit-testable and
//! portable across the in-world game server and native CLI tools.
//!
//! The engine is single-threaded and synchronous: every operation is a pure
//! computation over in-memory data. Round advancement is serialized by the
//! surrounding game-state machine; components here hold no mutable state
//! across calls other than series data loaded by `update_configuration`,
//! which must happen before a round begins, never during one.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`assets`] | Asset kinds, productivity levels, revenue capability |
//! | [`config`] | Configuration source seam and series-literal parsing |
//! | [`distributor`] | Per-asset revenue allocation under economic conditions |
//! | [`forecast`] | Water and economic forecast labels shown to players |
//! | [`generator`] | Per-round water generation from entitlements and rights |
//! | [`series`] | Round-indexed deviation series with neutral fallback |
//! | [`state`] | Round context — players, buy points, round counters |

pub mod assets;
pub mod config;
pub mod distributor;
pub mod forecast;
pub mod generator;
pub mod series;
pub mod state;
