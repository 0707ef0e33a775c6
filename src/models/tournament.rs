//! Tournament, its settings, and the round state.

use crate::logic::standings;
use crate::models::game::GameMatch;
use crate::models::history::{Round, RoundHistory, RoundRecord, StandingEntry};
use crate::models::player::PlayerSummary;
use crate::models::registry::PlayerRegistry;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Empty or malformed input (blank name, bad match index, wrong result kind).
    InvalidInput(String),
    /// An active player already has this name.
    DuplicateName(String),
    /// No player with this name in the set the operation looks at.
    PlayerNotFound(String),
    /// No archived round with this number.
    RoundNotFound(u32),
    /// Tournament is not in a state that allows this action.
    IllegalState(&'static str),
    /// Not every played board has a result.
    IncompleteResults,
    /// No more rounds can be started.
    TournamentFinished,
    /// Reading or writing CSV failed.
    Csv(String),
}

impl TournamentError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TournamentError::PlayerNotFound(_) | TournamentError::RoundNotFound(_)
        )
    }
}

impl fmt::Display for TournamentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            TournamentError::DuplicateName(name) => {
                write!(f, "A player named '{}' already exists", name)
            }
            TournamentError::PlayerNotFound(name) => write!(f, "Player '{}' not found", name),
            TournamentError::RoundNotFound(n) => write!(f, "Round {} not found", n),
            TournamentError::IllegalState(msg) => write!(f, "Invalid state for this action: {}", msg),
            TournamentError::IncompleteResults => write!(f, "Not all matches have a result"),
            TournamentError::TournamentFinished => write!(f, "Tournament is finished"),
            TournamentError::Csv(msg) => write!(f, "CSV error: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

impl From<csv::Error> for TournamentError {
    fn from(e: csv::Error) -> Self {
        TournamentError::Csv(e.to_string())
    }
}

/// Advisory outcome of an allowed but history-affecting change.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsistencyWarning {
    /// Players were removed or re-rated after rounds were archived. Archived rounds keep their values.
    HistoryExists { rounds: usize },
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyWarning::HistoryExists { rounds } => write!(
                f,
                "{} round(s) already played; changing players now affects tie-breaks of later standings",
                rounds
            ),
        }
    }
}

/// How the tournament reaches Finished.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishPolicy {
    /// Finished as soon as `total_rounds` rounds are archived.
    #[default]
    AutoAtLimit,
    /// Finished when the organizer says so, after at least one round.
    Manual,
}

/// Where the round lifecycle currently is.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundState {
    /// No pairings exist; the next round can be started.
    #[default]
    Idle,
    /// Pairings exist and results are being entered.
    Proposed,
    /// No more rounds.
    Finished,
}

/// Descriptive and policy settings of a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentSettings {
    pub name: String,
    pub date: NaiveDate,
    pub location: String,
    pub total_rounds: u32,
    #[serde(default)]
    pub finish_policy: FinishPolicy,
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            name: "Swiss Tournament".to_string(),
            date: chrono::Local::now().date_naive(),
            location: String::new(),
            total_rounds: 5,
            finish_policy: FinishPolicy::AutoAtLimit,
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Full tournament state: players, current round, archived rounds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub settings: TournamentSettings,
    pub(crate) registry: PlayerRegistry,
    pub(crate) active_round: Option<Round>,
    pub(crate) history: RoundHistory,
    pub(crate) finished: bool,
}

impl Tournament {
    /// Create a new tournament with no players.
    pub fn new(settings: TournamentSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            settings,
            registry: PlayerRegistry::new(),
            active_round: None,
            history: RoundHistory::new(),
            finished: false,
        }
    }

    pub fn state(&self) -> RoundState {
        if self.finished {
            RoundState::Finished
        } else if self.active_round.is_some() {
            RoundState::Proposed
        } else {
            RoundState::Idle
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    pub fn history(&self) -> &RoundHistory {
        &self.history
    }

    pub fn active_round(&self) -> Option<&Round> {
        self.active_round.as_ref()
    }

    /// Current round's boards, if a round is proposed.
    pub fn pairings(&self) -> Option<&[GameMatch]> {
        self.active_round.as_ref().map(|r| r.matches.as_slice())
    }

    /// Number the next started round will get.
    pub fn current_round_number(&self) -> u32 {
        self.history.next_round_number()
    }

    pub fn standings(&self) -> Vec<StandingEntry> {
        standings(&self.registry)
    }

    pub fn round(&self, number: u32) -> Result<&RoundRecord, TournamentError> {
        self.history.get(number)
    }

    pub fn active_players(&self) -> Vec<PlayerSummary> {
        self.registry.active_summaries()
    }

    pub fn removed_players(&self) -> Vec<PlayerSummary> {
        self.registry.removed_summaries()
    }

    /// Register a player. New players join from the next started round.
    pub fn add_player(&mut self, name: &str, rating: u32) -> Result<(), TournamentError> {
        self.registry.register(name, rating)?;
        log::debug!("Registered player '{}' ({})", name.trim(), rating);
        Ok(())
    }

    /// Soft-remove a player. Players seated in the proposed round cannot be removed.
    pub fn remove_player(&mut self, name: &str) -> Result<Option<ConsistencyWarning>, TournamentError> {
        let name = name.trim();
        if let Some(round) = &self.active_round {
            if round.matches.iter().any(|m| m.involves(name)) {
                return Err(TournamentError::IllegalState("player is seated in the current round"));
            }
        }
        self.registry.remove(name)?;
        Ok(self.history_warning("removed", name))
    }

    pub fn restore_player(&mut self, name: &str) -> Result<(), TournamentError> {
        self.registry.restore(name)
    }

    pub fn set_player_rating(
        &mut self,
        name: &str,
        rating: u32,
    ) -> Result<Option<ConsistencyWarning>, TournamentError> {
        self.registry.set_rating(name, rating)?;
        Ok(self.history_warning("re-rated", name))
    }

    fn history_warning(&self, action: &str, name: &str) -> Option<ConsistencyWarning> {
        if self.history.is_empty() {
            return None;
        }
        let warning = ConsistencyWarning::HistoryExists {
            rounds: self.history.len(),
        };
        log::warn!("Player '{}' {} after play started: {}", name, action, warning);
        Some(warning)
    }

    /// Replace the settings (not while a round is proposed). Under `AutoAtLimit`, a limit
    /// already reached finishes the tournament.
    pub fn update_settings(&mut self, settings: TournamentSettings) -> Result<(), TournamentError> {
        if self.active_round.is_some() {
            return Err(TournamentError::IllegalState("a round is in progress"));
        }
        if settings.total_rounds == 0 {
            return Err(TournamentError::InvalidInput("total rounds must be at least 1".to_string()));
        }
        self.settings = settings;
        self.finish_if_limit_reached();
        Ok(())
    }

    pub(crate) fn finish_if_limit_reached(&mut self) {
        if self.settings.finish_policy == FinishPolicy::AutoAtLimit
            && !self.finished
            && self.history.len() >= self.settings.total_rounds as usize
        {
            self.finished = true;
            log::info!(
                "Tournament '{}' finished after {} round(s)",
                self.settings.name,
                self.history.len()
            );
        }
    }

    /// Restart: same active players (names and ratings), no rounds, fresh scores.
    /// Removed players are dropped.
    pub fn restart(&mut self) -> Result<(), TournamentError> {
        if self.active_round.is_some() {
            return Err(TournamentError::IllegalState("a round is in progress"));
        }
        let entrants: Vec<(String, u32)> = self
            .registry
            .active()
            .iter()
            .map(|p| (p.name.clone(), p.rating))
            .collect();
        let settings = self.settings.clone();
        *self = Self::new(settings);
        for (name, rating) in entrants {
            self.registry.register(&name, rating)?;
        }
        log::info!("Tournament '{}' restarted", self.settings.name);
        Ok(())
    }

    /// Start over from an empty tournament. Only the settings survive.
    pub fn clear(&mut self) -> Result<(), TournamentError> {
        if self.active_round.is_some() {
            return Err(TournamentError::IllegalState("a round is in progress"));
        }
        let settings = self.settings.clone();
        *self = Self::new(settings);
        log::info!("Tournament '{}' cleared", self.settings.name);
        Ok(())
    }
}
