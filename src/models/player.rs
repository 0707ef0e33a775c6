//! Player and PlayerSummary data structures.

use serde::{Deserialize, Serialize};

/// Rating given to players registered without one.
pub const DEFAULT_RATING: u32 = 1000;

/// Players are keyed by their display name.
pub type PlayerName = String;

/// List view of a player (for API / display).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: PlayerName,
    pub rating: u32,
    pub score: f64,
}

impl PlayerSummary {
    pub fn from_player(p: &Player) -> Self {
        Self {
            name: p.name.clone(),
            rating: p.rating,
            score: p.score,
        }
    }
}

/// A player in the tournament.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: PlayerName,
    pub rating: u32,
    /// Cumulative points: 1 per win or bye, 0.5 per draw.
    pub score: f64,
    /// Names of opponents faced, in round order. Byes are not recorded here.
    pub opponents: Vec<PlayerName>,
    /// Derived; only refreshed when a round is recorded.
    pub buchholz_cut1: f64,
    /// Derived; only refreshed when a round is recorded.
    pub buchholz_total: f64,
}

impl Player {
    /// Create a new player with the given name and rating. Score and tie-breaks start at zero.
    pub fn new(name: impl Into<String>, rating: u32) -> Self {
        Self {
            name: name.into(),
            rating,
            score: 0.0,
            opponents: Vec::new(),
            buchholz_cut1: 0.0,
            buchholz_total: 0.0,
        }
    }

    pub fn summary(&self) -> PlayerSummary {
        PlayerSummary::from_player(self)
    }

    pub fn has_played(&self, name: &str) -> bool {
        self.opponents.iter().any(|o| o == name)
    }

    /// Record a finished game against `opponent` worth `points` to this player.
    pub fn record_game(&mut self, opponent: impl Into<String>, points: f64) {
        self.opponents.push(opponent.into());
        self.score += points;
    }

    /// Award the full point for a bye. The opponent list is left alone.
    pub fn record_bye(&mut self) {
        self.score += 1.0;
    }
}
