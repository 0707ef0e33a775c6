//! Swiss tournament organizer: library with models and business logic.

pub mod config;
pub mod logic;
pub mod models;

pub use config::ServerConfig;
pub use logic::{
    compare_standing, finish_tournament, generate_pairings, import_players, record_results,
    round_report_csv, set_match_result, standings, start_round, tiebreaks, update_tiebreaks,
    Tiebreaks,
};
pub use models::{
    ConsistencyWarning, FinishPolicy, GameMatch, MatchResult, Opponent, Player, PlayerName,
    PlayerRegistry, PlayerSummary, Round, RoundHistory, RoundRecord, RoundState, Seat,
    StandingEntry, Tournament, TournamentError, TournamentId, TournamentSettings, DEFAULT_RATING,
};
