//! Archived rounds: the active round and the append-only history of finished ones.

use crate::models::game::GameMatch;
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// One line of the standings table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandingEntry {
    pub name: String,
    pub rating: u32,
    pub score: f64,
    pub buchholz_cut1: f64,
    pub buchholz_total: f64,
}

/// The round currently being played.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based.
    pub number: u32,
    pub matches: Vec<GameMatch>,
}

/// A finished round: final results plus the standings right after it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub number: u32,
    pub matches: Vec<GameMatch>,
    pub standings: Vec<StandingEntry>,
}

/// Finished rounds, in order. Records are owned copies and never change after `append`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundHistory {
    rounds: Vec<RoundRecord>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number the next appended round must carry.
    pub fn next_round_number(&self) -> u32 {
        self.rounds.len() as u32 + 1
    }

    /// Callers number the record with `next_round_number`.
    pub(crate) fn append(&mut self, record: RoundRecord) {
        debug_assert_eq!(record.number, self.next_round_number());
        self.rounds.push(record);
    }

    pub fn get(&self, number: u32) -> Result<&RoundRecord, TournamentError> {
        number
            .checked_sub(1)
            .and_then(|idx| self.rounds.get(idx as usize))
            .ok_or(TournamentError::RoundNotFound(number))
    }

    pub fn last(&self) -> Option<&RoundRecord> {
        self.rounds.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoundRecord> {
        self.rounds.iter()
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}
