//! Round lifecycle: start a round, enter results, archive it, finish the tournament.

use crate::logic::pairing::generate_pairings;
use crate::logic::scoring::{standings, update_tiebreaks};
use crate::models::{
    FinishPolicy, MatchResult, Round, RoundRecord, RoundState, Tournament, TournamentError,
};
use rand::Rng;
use std::collections::HashMap;

/// Pair the active players for the next round (Idle -> Proposed).
pub fn start_round<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    match tournament.state() {
        RoundState::Finished => return Err(TournamentError::TournamentFinished),
        RoundState::Proposed => return Err(TournamentError::IllegalState("a round is already in progress")),
        RoundState::Idle => {}
    }

    let matches = generate_pairings(tournament.registry.active(), rng)?;
    let number = tournament.current_round_number();
    log::info!(
        "Round {} paired: {} board(s) for {} player(s)",
        number,
        matches.len(),
        tournament.registry.len()
    );
    tournament.active_round = Some(Round { number, matches });
    Ok(())
}

/// Enter the result of one board of the proposed round without committing the round.
pub fn set_match_result(
    tournament: &mut Tournament,
    index: usize,
    result: MatchResult,
) -> Result<(), TournamentError> {
    let round = tournament
        .active_round
        .as_mut()
        .ok_or(TournamentError::IllegalState("no round in progress"))?;
    let count = round.matches.len();
    let m = round
        .matches
        .get_mut(index)
        .ok_or_else(|| TournamentError::InvalidInput(format!("board {} out of range (0..{})", index, count)))?;
    if m.is_bye() {
        return Err(TournamentError::InvalidInput(format!("board {} is a bye", index)));
    }
    if result == MatchResult::Bye {
        return Err(TournamentError::InvalidInput("a played board cannot be a bye".to_string()));
    }
    m.result = result;
    Ok(())
}

/// Commit the proposed round (Proposed -> Idle, or Finished under `AutoAtLimit`).
///
/// `results` (board index -> result) is merged over results already entered. Every played board must end
/// up with a win or draw, otherwise nothing changes and `IncompleteResults` is returned. On success scores
/// and opponent lists are updated, tie-breaks recomputed and the round archived with a standings snapshot.
pub fn record_results(
    tournament: &mut Tournament,
    results: &HashMap<usize, MatchResult>,
) -> Result<(), TournamentError> {
    let round = tournament
        .active_round
        .as_ref()
        .ok_or(TournamentError::IllegalState("no round in progress"))?;

    for (&index, &result) in results {
        let m = round
            .matches
            .get(index)
            .ok_or_else(|| TournamentError::InvalidInput(format!("board {} out of range", index)))?;
        let fits = if m.is_bye() {
            result == MatchResult::Bye
        } else {
            result != MatchResult::Bye
        };
        if !fits {
            return Err(TournamentError::InvalidInput(format!(
                "result {} does not fit board {}",
                result, index
            )));
        }
    }

    let mut finalized = round.matches.clone();
    for (i, m) in finalized.iter_mut().enumerate() {
        if let Some(&r) = results.get(&i) {
            m.result = r;
        }
        if !m.is_bye() && !m.result.is_decisive_or_draw() {
            return Err(TournamentError::IncompleteResults);
        }
    }

    for m in &finalized {
        let seated = std::iter::once(&m.white.name).chain(m.black_seat().map(|s| &s.name));
        for name in seated {
            if tournament.registry.get(name).is_none() {
                return Err(TournamentError::PlayerNotFound(name.clone()));
            }
        }
    }

    // Validated: from here on nothing can fail before the round is archived.
    let registry = &mut tournament.registry;
    for m in &finalized {
        match (m.black_seat(), m.result.points()) {
            (Some(black), Some((white_points, black_points))) => {
                if let Some(w) = registry.get_mut(&m.white.name) {
                    w.record_game(black.name.clone(), white_points);
                }
                if let Some(b) = registry.get_mut(&black.name) {
                    b.record_game(m.white.name.clone(), black_points);
                }
            }
            _ => {
                if let Some(p) = registry.get_mut(&m.white.name) {
                    p.record_bye();
                }
            }
        }
    }

    update_tiebreaks(registry);
    let snapshot = standings(registry);
    let number = round.number;
    tournament.history.append(RoundRecord {
        number,
        matches: finalized,
        standings: snapshot,
    });
    tournament.active_round = None;
    log::info!("Round {} recorded", number);

    tournament.finish_if_limit_reached();
    Ok(())
}

/// Finish the tournament by hand (`Manual` policy, at least one round played, none in progress).
pub fn finish_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    match tournament.state() {
        RoundState::Finished => return Err(TournamentError::TournamentFinished),
        RoundState::Proposed => return Err(TournamentError::IllegalState("a round is in progress")),
        RoundState::Idle => {}
    }
    if tournament.settings.finish_policy != FinishPolicy::Manual {
        return Err(TournamentError::IllegalState(
            "tournament finishes automatically after the last round",
        ));
    }
    if tournament.history.is_empty() {
        return Err(TournamentError::IllegalState("no round has been played yet"));
    }
    tournament.finished = true;
    log::info!(
        "Tournament '{}' finished after {} round(s)",
        tournament.settings.name,
        tournament.history.len()
    );
    Ok(())
}
