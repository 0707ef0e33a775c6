//! Data structures for the Swiss tournament: players, boards, rounds, tournament state.

mod game;
mod history;
mod player;
mod registry;
mod tournament;

pub use game::{GameMatch, MatchResult, Opponent, Seat};
pub use history::{Round, RoundHistory, RoundRecord, StandingEntry};
pub use player::{Player, PlayerName, PlayerSummary, DEFAULT_RATING};
pub use registry::PlayerRegistry;
pub use tournament::{
    ConsistencyWarning, FinishPolicy, RoundState, Tournament, TournamentError, TournamentId,
    TournamentSettings,
};
