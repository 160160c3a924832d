//! Round context — the shared game state the engine reads.
//!
//! The context is created at game start and advanced once per round by the
//! external game-state machine. The engine only reads it: generation and
//! distribution results are handed back as plain numbers for the caller to
//! apply to its persistent model.

use serde::{Deserialize, Serialize};

/// A player with a per-round water entitlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub water_entitlement: i64,
}

/// A land-parcel purchase point carrying initial water rights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyPoint {
    pub id: u32,
    pub initial_water_rights: i64,
}

/// Snapshot of the game as of one round.
///
/// `current_round` 0 is the pre-game build phase; play rounds start at 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundContext {
    pub current_round: u32,
    pub total_rounds: u32,
    pub players: Vec<Player>,
    pub buy_points: Vec<BuyPoint>,
}

impl RoundContext {
    /// Sum of every player's water entitlement.
    pub fn entitlement_total(&self) -> i64 {
        self.players.iter().map(|p| p.water_entitlement).sum()
    }

    /// Sum of every buy point's initial water rights.
    pub fn rights_total(&self) -> i64 {
        self.buy_points.iter().map(|b| b.initial_water_rights).sum()
    }

    /// The undistorted water total before the round's deviation applies.
    pub fn baseline(&self) -> i64 {
        self.entitlement_total() + self.rights_total()
    }

    /// Whether the game is still in the pre-game build phase.
    pub fn is_build_round(&self) -> bool {
        self.current_round == 0
    }

    pub fn rounds_remaining(&self) -> u32 {
        self.total_rounds.saturating_sub(self.current_round)
    }
}
