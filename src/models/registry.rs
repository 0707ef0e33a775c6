//! Player registry: active and removed players, keyed by name.

use crate::models::player::{Player, PlayerSummary};
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// Owns every player of the tournament. Collection order is registration order;
/// restored players go to the back.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRegistry {
    active: Vec<Player>,
    removed: Vec<Player>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new player. Names are trimmed and must be unique among active players.
    pub fn register(&mut self, name: &str, rating: u32) -> Result<(), TournamentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidInput("player name is empty".to_string()));
        }
        if self.get(name).is_some() {
            return Err(TournamentError::DuplicateName(name.to_string()));
        }
        self.active.push(Player::new(name, rating));
        Ok(())
    }

    /// Move an active player to the removed set, keeping score and opponents.
    pub fn remove(&mut self, name: &str) -> Result<(), TournamentError> {
        let name = name.trim();
        let idx = self
            .active
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| TournamentError::PlayerNotFound(name.to_string()))?;
        let player = self.active.remove(idx);
        self.removed.push(player);
        Ok(())
    }

    /// Move a removed player back to the active set with their state intact.
    pub fn restore(&mut self, name: &str) -> Result<(), TournamentError> {
        let name = name.trim();
        let idx = self
            .removed
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| TournamentError::PlayerNotFound(name.to_string()))?;
        if self.get(name).is_some() {
            return Err(TournamentError::DuplicateName(name.to_string()));
        }
        let player = self.removed.remove(idx);
        self.active.push(player);
        Ok(())
    }

    pub fn set_rating(&mut self, name: &str, rating: u32) -> Result<(), TournamentError> {
        let name = name.trim();
        let p = self
            .get_mut(name)
            .ok_or_else(|| TournamentError::PlayerNotFound(name.to_string()))?;
        p.rating = rating;
        Ok(())
    }

    /// Active player by name (surrounding whitespace ignored).
    pub fn get(&self, name: &str) -> Option<&Player> {
        let name = name.trim();
        self.active.iter().find(|p| p.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Player> {
        let name = name.trim();
        self.active.iter_mut().find(|p| p.name == name)
    }

    /// Active players in collection order.
    pub fn active(&self) -> &[Player] {
        &self.active
    }

    pub(crate) fn active_mut(&mut self) -> &mut [Player] {
        &mut self.active
    }

    pub fn removed(&self) -> &[Player] {
        &self.removed
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn active_summaries(&self) -> Vec<PlayerSummary> {
        self.active.iter().map(Player::summary).collect()
    }

    pub fn removed_summaries(&self) -> Vec<PlayerSummary> {
        self.removed.iter().map(Player::summary).collect()
    }
}
