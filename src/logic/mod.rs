//! Tournament business logic: pairing, scoring, round lifecycle, reports.

mod pairing;
mod report;
mod rounds;
mod scoring;

pub use pairing::generate_pairings;
pub use report::{import_players, round_report_csv, BYE_LABEL};
pub use rounds::{finish_tournament, record_results, set_match_result, start_round};
pub use scoring::{compare_standing, standings, tiebreaks, update_tiebreaks, Tiebreaks};
